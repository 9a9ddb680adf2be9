// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Square bounds shared by every partition unit.

use core::cell::OnceCell;

#[cfg(not(feature = "std"))]
use kurbo::common::FloatFuncs as _;

use crate::adapter::DimensionAdapter;
use crate::direction::{Direction, Directions, Quadrant};

/// Bounds of a square unit, with the border scalars cached at construction.
///
/// Containment is half-open: the west and south borders belong to the unit,
/// the east and north borders belong to its neighbors.
#[derive(Clone, Debug)]
pub(crate) struct UnitBounds<D> {
    center: D,
    size: f64,
    north: f64,
    east: f64,
    south: f64,
    west: f64,
    // (upper left, lower right)
    corners: OnceCell<(D, D)>,
}

impl<D: Copy> UnitBounds<D> {
    /// Bounds of a square of side `size` centered on `center`.
    pub(crate) fn around<A>(adapter: &A, center: D, size: f64) -> Self
    where
        A: DimensionAdapter<Dim = D>,
    {
        let half = size / 2.0;
        let cx = adapter.x(center);
        let cz = adapter.z(center);
        Self {
            center,
            size,
            north: cz + half,
            east: cx + half,
            south: cz - half,
            west: cx - half,
            corners: OnceCell::new(),
        }
    }

    /// Bounds of one quadrant of this unit.
    ///
    /// The quadrant's borders are taken from this unit's borders and center
    /// so that siblings share their edges exactly.
    pub(crate) fn quadrant<A>(&self, adapter: &A, quadrant: Quadrant) -> Self
    where
        A: DimensionAdapter<Dim = D>,
    {
        let cx = adapter.x(self.center);
        let cz = adapter.z(self.center);
        let (west, east) = if quadrant.is_east() {
            (cx, self.east)
        } else {
            (self.west, cx)
        };
        let (south, north) = if quadrant.is_north() {
            (cz, self.north)
        } else {
            (self.south, cz)
        };
        let center = adapter.with_z(
            adapter.with_x(self.center, 0.5 * (west + east)),
            0.5 * (south + north),
        );
        Self {
            center,
            size: self.size / 2.0,
            north,
            east,
            south,
            west,
            corners: OnceCell::new(),
        }
    }

    #[inline]
    pub(crate) fn center(&self) -> D {
        self.center
    }

    #[inline]
    pub(crate) fn size(&self) -> f64 {
        self.size
    }

    fn corners<A>(&self, adapter: &A) -> (D, D)
    where
        A: DimensionAdapter<Dim = D>,
    {
        *self.corners.get_or_init(|| {
            (
                adapter.make(self.west, self.north),
                adapter.make(self.east, self.south),
            )
        })
    }

    pub(crate) fn corner_upper_left<A>(&self, adapter: &A) -> D
    where
        A: DimensionAdapter<Dim = D>,
    {
        self.corners(adapter).0
    }

    pub(crate) fn corner_lower_right<A>(&self, adapter: &A) -> D
    where
        A: DimensionAdapter<Dim = D>,
    {
        self.corners(adapter).1
    }

    /// Quadrant of this unit that `pos` routes to.
    ///
    /// A point on the center line routes east / north, matching the
    /// half-open containment of the quadrants.
    #[inline]
    pub(crate) fn quadrant_of<A>(&self, adapter: &A, pos: D) -> Quadrant
    where
        A: DimensionAdapter<Dim = D>,
    {
        let east = adapter.compare_x(pos, self.center).is_ge();
        let north = adapter.compare_z(pos, self.center).is_ge();
        Quadrant::from_sides(east, north)
    }

    #[inline]
    pub(crate) fn contains<A>(&self, adapter: &A, pos: D) -> bool
    where
        A: DimensionAdapter<Dim = D>,
    {
        let x = adapter.x(pos);
        let z = adapter.z(pos);
        self.west <= x && x < self.east && self.south <= z && z < self.north
    }

    pub(crate) fn border_point<A>(&self, adapter: &A, direction: Direction) -> D
    where
        A: DimensionAdapter<Dim = D>,
    {
        let cx = adapter.x(self.center);
        let cz = adapter.z(self.center);
        match direction {
            Direction::North => adapter.make(cx, self.north),
            Direction::NorthEast => adapter.make(self.east, self.north),
            Direction::East => adapter.make(self.east, cz),
            Direction::SouthEast => adapter.make(self.east, self.south),
            Direction::South => adapter.make(cx, self.south),
            Direction::SouthWest => adapter.make(self.west, self.south),
            Direction::West => adapter.make(self.west, cz),
            Direction::NorthWest => adapter.make(self.west, self.north),
        }
    }

    pub(crate) fn border_distance<A>(&self, adapter: &A, direction: Direction, pos: D) -> f64
    where
        A: DimensionAdapter<Dim = D>,
    {
        match direction {
            Direction::NorthEast
            | Direction::SouthEast
            | Direction::SouthWest
            | Direction::NorthWest => adapter.distance(self.border_point(adapter, direction), pos),
            Direction::North => (self.north - adapter.z(pos)).abs(),
            Direction::East => (self.east - adapter.x(pos)).abs(),
            Direction::South => (self.south - adapter.z(pos)).abs(),
            Direction::West => (self.west - adapter.x(pos)).abs(),
        }
    }

    pub(crate) fn borders_closer_than<A>(&self, adapter: &A, pos: D, threshold: f64) -> Directions
    where
        A: DimensionAdapter<Dim = D>,
    {
        Direction::ALL
            .into_iter()
            .filter(|d| self.border_distance(adapter, *d, pos) < threshold)
            .collect()
    }

    pub(crate) fn nearest_border_distance<A>(&self, adapter: &A, pos: D) -> f64
    where
        A: DimensionAdapter<Dim = D>,
    {
        Direction::ALL
            .into_iter()
            .map(|d| self.border_distance(adapter, d, pos))
            .fold(f64::MAX, f64::min)
    }
}
