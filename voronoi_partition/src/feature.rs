// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Indexed features and their per-query weighting.

use core::cmp::Ordering;

#[cfg(not(feature = "std"))]
use kurbo::common::FloatFuncs as _;

use crate::adapter::DimensionAdapter;

/// A positioned payload stored in the partition.
///
/// Features are immutable once built. The chunk they are inserted into owns
/// them for the rest of the tree's lifetime.
#[derive(Clone, Debug, PartialEq)]
pub struct Feature<D, T> {
    position: D,
    payload: T,
}

impl<D: Copy, T> Feature<D, T> {
    /// Create a feature at `position` carrying `payload`.
    #[inline]
    pub const fn new(position: D, payload: T) -> Self {
        Self { position, payload }
    }

    /// Position of the feature.
    #[inline]
    pub fn position(&self) -> D {
        self.position
    }

    /// User data attached to the feature.
    #[inline]
    pub fn payload(&self) -> &T {
        &self.payload
    }

    /// Consume the feature and return its payload.
    #[inline]
    pub fn into_payload(self) -> T {
        self.payload
    }
}

/// A feature annotated with its distance to a query point.
///
/// Produced by queries and never stored. Ordered ascending by
/// [`distance_squared`][Self::distance_squared].
#[derive(Debug)]
pub struct WeightedFeature<'a, D, T> {
    feature: &'a Feature<D, T>,
    distance_squared: f64,
}

impl<'a, D: Copy, T> WeightedFeature<'a, D, T> {
    /// Weight `feature` by its distance to `pos` under `adapter`.
    #[inline]
    pub fn weigh<A>(adapter: &A, pos: D, feature: &'a Feature<D, T>) -> Self
    where
        A: DimensionAdapter<Dim = D>,
    {
        Self {
            feature,
            distance_squared: adapter.distance_squared(feature.position, pos),
        }
    }

    /// The weighted feature.
    #[inline]
    pub fn feature(&self) -> &'a Feature<D, T> {
        self.feature
    }

    /// Ranking value reported by the adapter.
    #[inline]
    pub fn distance_squared(&self) -> f64 {
        self.distance_squared
    }

    /// Square root of [`distance_squared`][Self::distance_squared].
    ///
    /// Only a true distance for adapters whose `distance_squared` really is a
    /// square (e.g. [`EuclideanAdapter`][crate::EuclideanAdapter]).
    #[inline]
    pub fn distance(&self) -> f64 {
        self.distance_squared.sqrt()
    }
}

// Manual impls: `T` need not be `Clone` to copy a reference.
impl<D, T> Clone for WeightedFeature<'_, D, T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<D, T> Copy for WeightedFeature<'_, D, T> {}

impl<D, T> PartialEq for WeightedFeature<'_, D, T> {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl<D, T> Eq for WeightedFeature<'_, D, T> {}

impl<D, T> PartialOrd for WeightedFeature<'_, D, T> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<D, T> Ord for WeightedFeature<'_, D, T> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.distance_squared.total_cmp(&other.distance_squared)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapter::{EuclideanAdapter, ManhattanAdapter};
    use alloc::vec::Vec;
    use kurbo::Point;

    #[test]
    fn weighting_uses_adapter_metric() {
        let f = Feature::new(Point::new(3.0, 4.0), "a");
        let w = WeightedFeature::weigh(&EuclideanAdapter, Point::ZERO, &f);
        assert_eq!(w.distance_squared(), 25.0);
        assert_eq!(w.distance(), 5.0);
        assert_eq!(*w.feature().payload(), "a");

        let w = WeightedFeature::weigh(&ManhattanAdapter, Point::ZERO, &f);
        assert_eq!(w.distance_squared(), 7.0);
    }

    #[test]
    fn sorts_ascending_and_keeps_ties_in_order() {
        let features = [
            Feature::new(Point::new(5.0, 0.0), 0),
            Feature::new(Point::new(1.0, 0.0), 1),
            Feature::new(Point::new(-1.0, 0.0), 2),
        ];
        let mut weighted: Vec<_> = features
            .iter()
            .map(|f| WeightedFeature::weigh(&EuclideanAdapter, Point::ZERO, f))
            .collect();
        weighted.sort();
        let order: Vec<i32> = weighted.iter().map(|w| *w.feature().payload()).collect();
        assert_eq!(order, [1, 2, 0]);
    }

    #[test]
    fn payload_round_trip() {
        let f = Feature::new(Point::new(1.0, 1.0), 42_u32);
        assert_eq!(f.position(), Point::new(1.0, 1.0));
        assert_eq!(f.into_payload(), 42);
    }
}
