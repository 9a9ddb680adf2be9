// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Compass directions around a unit and the quadrants inside it.

/// One of the eight reference points on a unit's border.
///
/// Diagonal directions name corners; the others name edge midpoints.
/// North is +z and east is +x.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Direction {
    /// Midpoint of the upper edge.
    North,
    /// Upper right corner.
    NorthEast,
    /// Midpoint of the right edge.
    East,
    /// Lower right corner.
    SouthEast,
    /// Midpoint of the lower edge.
    South,
    /// Lower left corner.
    SouthWest,
    /// Midpoint of the left edge.
    West,
    /// Upper left corner.
    NorthWest,
}

impl Direction {
    /// All directions, clockwise from north.
    pub const ALL: [Self; 8] = [
        Self::North,
        Self::NorthEast,
        Self::East,
        Self::SouthEast,
        Self::South,
        Self::SouthWest,
        Self::West,
        Self::NorthWest,
    ];

    /// Whether this direction names a corner.
    #[inline]
    pub const fn is_corner(self) -> bool {
        matches!(
            self,
            Self::NorthEast | Self::SouthEast | Self::SouthWest | Self::NorthWest
        )
    }

    /// Unit step `(dx, dz)` pointing across this border.
    #[inline]
    pub const fn step(self) -> (i32, i32) {
        match self {
            Self::North => (0, 1),
            Self::NorthEast => (1, 1),
            Self::East => (1, 0),
            Self::SouthEast => (1, -1),
            Self::South => (0, -1),
            Self::SouthWest => (-1, -1),
            Self::West => (-1, 0),
            Self::NorthWest => (-1, 1),
        }
    }

    /// The single-bit set holding this direction.
    #[inline]
    pub const fn flag(self) -> Directions {
        match self {
            Self::North => Directions::NORTH,
            Self::NorthEast => Directions::NORTH_EAST,
            Self::East => Directions::EAST,
            Self::SouthEast => Directions::SOUTH_EAST,
            Self::South => Directions::SOUTH,
            Self::SouthWest => Directions::SOUTH_WEST,
            Self::West => Directions::WEST,
            Self::NorthWest => Directions::NORTH_WEST,
        }
    }
}

bitflags::bitflags! {
    /// A set of [`Direction`]s.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct Directions: u8 {
        /// [`Direction::North`].
        const NORTH      = 0b0000_0001;
        /// [`Direction::NorthEast`].
        const NORTH_EAST = 0b0000_0010;
        /// [`Direction::East`].
        const EAST       = 0b0000_0100;
        /// [`Direction::SouthEast`].
        const SOUTH_EAST = 0b0000_1000;
        /// [`Direction::South`].
        const SOUTH      = 0b0001_0000;
        /// [`Direction::SouthWest`].
        const SOUTH_WEST = 0b0010_0000;
        /// [`Direction::West`].
        const WEST       = 0b0100_0000;
        /// [`Direction::NorthWest`].
        const NORTH_WEST = 0b1000_0000;
    }
}

impl Directions {
    /// Whether `direction` is in the set.
    #[inline]
    pub fn has(self, direction: Direction) -> bool {
        self.contains(direction.flag())
    }

    /// Iterate the directions in the set, clockwise from north.
    pub fn directions(self) -> impl Iterator<Item = Direction> {
        Direction::ALL.into_iter().filter(move |d| self.has(*d))
    }
}

impl From<Direction> for Directions {
    fn from(direction: Direction) -> Self {
        direction.flag()
    }
}

impl FromIterator<Direction> for Directions {
    fn from_iter<I: IntoIterator<Item = Direction>>(iter: I) -> Self {
        iter.into_iter().fold(Self::empty(), |set, d| set | d.flag())
    }
}

/// One of the four child slots of a fragment.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Quadrant {
    /// West half, north half.
    UpperLeft,
    /// East half, north half.
    UpperRight,
    /// West half, south half.
    LowerLeft,
    /// East half, south half.
    LowerRight,
}

impl Quadrant {
    /// All quadrants in slot order.
    pub const ALL: [Self; 4] = [
        Self::UpperLeft,
        Self::UpperRight,
        Self::LowerLeft,
        Self::LowerRight,
    ];

    /// Pick the quadrant from the sides of the center a point falls on.
    #[inline]
    pub const fn from_sides(east: bool, north: bool) -> Self {
        match (east, north) {
            (false, true) => Self::UpperLeft,
            (true, true) => Self::UpperRight,
            (false, false) => Self::LowerLeft,
            (true, false) => Self::LowerRight,
        }
    }

    /// Whether the quadrant lies east of the center.
    #[inline]
    pub const fn is_east(self) -> bool {
        matches!(self, Self::UpperRight | Self::LowerRight)
    }

    /// Whether the quadrant lies north of the center.
    #[inline]
    pub const fn is_north(self) -> bool {
        matches!(self, Self::UpperLeft | Self::UpperRight)
    }

    #[inline]
    pub(crate) const fn slot(self) -> usize {
        match self {
            Self::UpperLeft => 0,
            Self::UpperRight => 1,
            Self::LowerLeft => 2,
            Self::LowerRight => 3,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec::Vec;

    #[test]
    fn steps_point_away_from_the_unit() {
        for d in Direction::ALL {
            let (dx, dz) = d.step();
            assert!(dx != 0 || dz != 0, "{d:?} must step somewhere");
            assert_eq!(d.is_corner(), dx != 0 && dz != 0);
        }
    }

    #[test]
    fn set_round_trips_through_iterator() {
        let set: Directions = [Direction::West, Direction::North, Direction::SouthEast]
            .into_iter()
            .collect();
        assert!(set.has(Direction::North));
        assert!(!set.has(Direction::South));
        let back: Vec<_> = set.directions().collect();
        assert_eq!(
            back,
            [Direction::North, Direction::SouthEast, Direction::West]
        );
        assert_eq!(Directions::all().directions().count(), 8);
    }

    #[test]
    fn quadrant_sides() {
        for q in Quadrant::ALL {
            assert_eq!(Quadrant::from_sides(q.is_east(), q.is_north()), q);
        }
        let slots: Vec<_> = Quadrant::ALL.iter().map(|q| q.slot()).collect();
        assert_eq!(slots, [0, 1, 2, 3]);
    }
}
