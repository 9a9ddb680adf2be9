// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Coordinate abstraction used by the partition.

use core::cmp::Ordering;
use core::fmt::Debug;

#[cfg(not(feature = "std"))]
use kurbo::common::FloatFuncs as _;
use kurbo::Point;

/// Coordinate abstraction over an opaque two-axis position type.
///
/// The partition never looks inside [`Dim`][DimensionAdapter::Dim] directly;
/// every bit of arithmetic, comparison and distance goes through the adapter.
/// The two logical axes are called `x` and `z` (the horizontal plane of a
/// 3D world), which lets adapters project richer vector types onto the plane.
///
/// All methods are pure. Implementations return new values and never mutate
/// their inputs.
pub trait DimensionAdapter {
    /// Coordinate type handled by this adapter.
    type Dim: Copy + Debug;

    /// Translate `pos` by whole steps along both axes.
    fn offset(&self, pos: Self::Dim, dx: i32, dz: i32) -> Self::Dim;

    /// Distance between two positions under this adapter's metric.
    fn distance(&self, a: Self::Dim, b: Self::Dim) -> f64;

    /// Value monotonic in [`distance`][Self::distance], used for ranking.
    ///
    /// Callers only ever compare these values with each other, so an adapter
    /// may return something that is not literally the square of the distance.
    fn distance_squared(&self, a: Self::Dim, b: Self::Dim) -> f64;

    /// Compare the x components: `Less` if `a` lies west of `b`.
    fn compare_x(&self, a: Self::Dim, b: Self::Dim) -> Ordering;

    /// Compare the z components: `Less` if `a` lies south of `b`.
    fn compare_z(&self, a: Self::Dim, b: Self::Dim) -> Ordering;

    /// The x component.
    fn x(&self, pos: Self::Dim) -> f64;

    /// The z component.
    fn z(&self, pos: Self::Dim) -> f64;

    /// Copy of `pos` with the x component replaced.
    fn with_x(&self, pos: Self::Dim, value: f64) -> Self::Dim;

    /// Copy of `pos` with the z component replaced.
    fn with_z(&self, pos: Self::Dim, value: f64) -> Self::Dim;

    /// Build a coordinate from its two components.
    fn make(&self, x: f64, z: f64) -> Self::Dim;

    /// Multiply both components by `factor`.
    fn scale(&self, pos: Self::Dim, factor: f64) -> Self::Dim;
}

/// Euclidean (L2) adapter for [`kurbo::Point`].
///
/// `Point::x` is the x axis and `Point::y` plays the role of the z axis.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct EuclideanAdapter;

impl DimensionAdapter for EuclideanAdapter {
    type Dim = Point;

    #[inline]
    fn offset(&self, pos: Point, dx: i32, dz: i32) -> Point {
        Point::new(pos.x + f64::from(dx), pos.y + f64::from(dz))
    }

    #[inline]
    fn distance(&self, a: Point, b: Point) -> f64 {
        self.distance_squared(a, b).sqrt()
    }

    #[inline]
    fn distance_squared(&self, a: Point, b: Point) -> f64 {
        let dx = a.x - b.x;
        let dz = a.y - b.y;
        dx * dx + dz * dz
    }

    #[inline]
    fn compare_x(&self, a: Point, b: Point) -> Ordering {
        cmp_f64(a.x, b.x)
    }

    #[inline]
    fn compare_z(&self, a: Point, b: Point) -> Ordering {
        cmp_f64(a.y, b.y)
    }

    #[inline(always)]
    fn x(&self, pos: Point) -> f64 {
        pos.x
    }

    #[inline(always)]
    fn z(&self, pos: Point) -> f64 {
        pos.y
    }

    #[inline]
    fn with_x(&self, pos: Point, value: f64) -> Point {
        Point::new(value, pos.y)
    }

    #[inline]
    fn with_z(&self, pos: Point, value: f64) -> Point {
        Point::new(pos.x, value)
    }

    #[inline]
    fn make(&self, x: f64, z: f64) -> Point {
        Point::new(x, z)
    }

    #[inline]
    fn scale(&self, pos: Point, factor: f64) -> Point {
        Point::new(pos.x * factor, pos.y * factor)
    }
}

/// Manhattan (L1) adapter for [`kurbo::Point`].
///
/// Both [`distance`][DimensionAdapter::distance] and
/// [`distance_squared`][DimensionAdapter::distance_squared] return the plain
/// L1 distance. The "squared" value is therefore not squared at all; this is
/// fine for ranking, which is the only thing the partition uses it for, but
/// callers must not treat it as a true square.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct ManhattanAdapter;

impl DimensionAdapter for ManhattanAdapter {
    type Dim = Point;

    #[inline]
    fn offset(&self, pos: Point, dx: i32, dz: i32) -> Point {
        EuclideanAdapter.offset(pos, dx, dz)
    }

    #[inline]
    fn distance(&self, a: Point, b: Point) -> f64 {
        self.distance_squared(a, b)
    }

    #[inline]
    fn distance_squared(&self, a: Point, b: Point) -> f64 {
        (a.x - b.x).abs() + (a.y - b.y).abs()
    }

    #[inline]
    fn compare_x(&self, a: Point, b: Point) -> Ordering {
        EuclideanAdapter.compare_x(a, b)
    }

    #[inline]
    fn compare_z(&self, a: Point, b: Point) -> Ordering {
        EuclideanAdapter.compare_z(a, b)
    }

    #[inline(always)]
    fn x(&self, pos: Point) -> f64 {
        pos.x
    }

    #[inline(always)]
    fn z(&self, pos: Point) -> f64 {
        pos.y
    }

    #[inline]
    fn with_x(&self, pos: Point, value: f64) -> Point {
        EuclideanAdapter.with_x(pos, value)
    }

    #[inline]
    fn with_z(&self, pos: Point, value: f64) -> Point {
        EuclideanAdapter.with_z(pos, value)
    }

    #[inline]
    fn make(&self, x: f64, z: f64) -> Point {
        Point::new(x, z)
    }

    #[inline]
    fn scale(&self, pos: Point, factor: f64) -> Point {
        EuclideanAdapter.scale(pos, factor)
    }
}

/// Total order for non-NaN floats; NaN compares equal to everything.
#[inline]
pub(crate) fn cmp_f64(a: f64, b: f64) -> Ordering {
    a.partial_cmp(&b).unwrap_or(Ordering::Equal)
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f64 = 1e-10;

    #[test]
    fn euclidean_distance_is_l2() {
        let a = Point::new(0.0, 0.0);
        let b = Point::new(3.0, 4.0);
        assert!((EuclideanAdapter.distance(a, b) - 5.0).abs() < EPSILON);
        assert!((EuclideanAdapter.distance_squared(a, b) - 25.0).abs() < EPSILON);
    }

    #[test]
    fn manhattan_squared_equals_distance() {
        let a = Point::new(-1.0, 2.0);
        let b = Point::new(3.0, -4.0);
        assert!((ManhattanAdapter.distance(a, b) - 10.0).abs() < EPSILON);
        // Not squared: the value is only ever used for ranking.
        assert!(
            (ManhattanAdapter.distance_squared(a, b) - ManhattanAdapter.distance(a, b)).abs()
                < EPSILON
        );
    }

    #[test]
    fn offset_steps_both_axes() {
        let p = EuclideanAdapter.offset(Point::new(10.0, 20.0), -1, 3);
        assert_eq!(p, Point::new(9.0, 23.0));
    }

    #[test]
    fn comparisons_follow_axes() {
        let a = Point::new(1.0, 5.0);
        let b = Point::new(2.0, 5.0);
        assert_eq!(EuclideanAdapter.compare_x(a, b), Ordering::Less);
        assert_eq!(EuclideanAdapter.compare_x(b, a), Ordering::Greater);
        assert_eq!(EuclideanAdapter.compare_z(a, b), Ordering::Equal);
        // Negative zero sits on the same side as zero.
        assert_eq!(
            EuclideanAdapter.compare_x(Point::new(-0.0, 0.0), Point::ZERO),
            Ordering::Equal
        );
    }

    #[test]
    fn functional_setters_return_copies() {
        let p = Point::new(1.0, 2.0);
        assert_eq!(EuclideanAdapter.with_x(p, 7.0), Point::new(7.0, 2.0));
        assert_eq!(EuclideanAdapter.with_z(p, 7.0), Point::new(1.0, 7.0));
        assert_eq!(EuclideanAdapter.scale(p, 2.0), Point::new(2.0, 4.0));
        assert_eq!(EuclideanAdapter.make(3.0, 4.0), Point::new(3.0, 4.0));
        assert_eq!(p, Point::new(1.0, 2.0));
    }
}
