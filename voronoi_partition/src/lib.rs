// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=voronoi_partition --heading-base-level=0

//! Voronoi Partition: a lazily subdivided 2D quad-partition for nearest-feature queries.
//!
//! The partition covers a square domain and splits it recursively into four
//! quadrants. Units are only allocated where features are inserted, so huge
//! sparse worlds stay cheap.
//!
//! - Insert positioned features with user payloads.
//! - Ask for the feature nearest to a point. The answer approximates a
//!   Voronoi lookup: the search stays local and only crosses one unit border
//!   when the local winner is closer to that border than to the query point.
//!   It may miss the true nearest feature.
//! - Walk the partition: layers, quadrants, neighbors across each of the
//!   eight border directions.
//!
//! Coordinates are opaque to the partition; every computation goes through a
//! [`DimensionAdapter`]. Two adapters over [`kurbo::Point`] are provided:
//! [`EuclideanAdapter`] and [`ManhattanAdapter`]. The adapter is chosen by
//! type when the tree is built.
//!
//! ## Features
//!
//! - `std` *(default)*: use the standard library's float math.
//! - `libm`: `no_std` float math via `kurbo`'s `libm` support. One of `std`
//!   or `libm` must be enabled.
//!
//! # Example
//!
//! ```rust
//! use kurbo::Point;
//! use voronoi_partition::{
//!     Direction, EuclideanAdapter, Feature, PartitionSettings, UnitKind, Voronoi,
//! };
//!
//! let settings = PartitionSettings::new(1024, Point::ZERO, 16);
//! let mut voronoi = Voronoi::create(settings, EuclideanAdapter);
//! voronoi.extend([
//!     Feature::new(Point::new(-100.0, 40.0), "camp"),
//!     Feature::new(Point::new(250.0, -20.0), "village"),
//!     Feature::new(Point::new(12.0, 900.0), "tower"),
//! ]);
//! assert_eq!(voronoi.feature_count(), 3);
//!
//! let nearest = voronoi.closest_feature(Point::new(200.0, 0.0)).unwrap();
//! assert_eq!(*nearest.feature().payload(), "village");
//!
//! // The chunk holding the village, and the unit just north of it.
//! let chunk = voronoi.chunk_at(Point::new(250.0, -20.0));
//! let chunk = voronoi.unit(chunk);
//! assert_eq!(chunk.kind(), UnitKind::Chunk);
//! let north = chunk.neighbor(Direction::North).unwrap();
//! assert!(north.contains(Point::new(250.0, -10.0)));
//! assert!(!chunk.contains(Point::new(250.0, -10.0)));
//! ```
//!
//! Fallible variants report contract violations as [`PartitionError`]s:
//!
//! ```rust
//! use kurbo::Point;
//! use voronoi_partition::{EuclideanAdapter, PartitionError, PartitionSettings, Voronoi};
//!
//! let settings = PartitionSettings::new(0, Point::ZERO, 16);
//! let err = Voronoi::<_, ()>::try_create(settings, EuclideanAdapter).unwrap_err();
//! assert_eq!(err, PartitionError::InvalidRadius(0));
//! ```
//!
//! ### Float semantics
//!
//! This crate assumes no NaNs in coordinates. A NaN compares equal to
//! everything and is routed to the north east.

#![no_std]

extern crate alloc;

mod adapter;
mod bounds;
mod direction;
mod error;
mod feature;
mod settings;
mod tree;

pub use adapter::{DimensionAdapter, EuclideanAdapter, ManhattanAdapter};
pub use direction::{Direction, Directions, Quadrant};
pub use error::PartitionError;
pub use feature::{Feature, WeightedFeature};
pub use settings::PartitionSettings;
pub use tree::{EmptyUnit, PartitionStats, UnitId, UnitKind, UnitRef, UnitView, Voronoi};

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec::Vec;
    use kurbo::Point;

    #[test]
    fn weighted_features_of_a_unit_are_sorted() {
        let mut voronoi = Voronoi::create(
            PartitionSettings::new(100, Point::ZERO, 50),
            EuclideanAdapter,
        );
        voronoi.extend([
            Feature::new(Point::new(40.0, 40.0), 0),
            Feature::new(Point::new(10.0, 10.0), 1),
            Feature::new(Point::new(20.0, 20.0), 2),
        ]);
        let order: Vec<i32> = voronoi
            .root()
            .weight_features(Point::ZERO)
            .iter()
            .map(|w| *w.feature().payload())
            .collect();
        assert_eq!(order, [1, 2, 0]);
    }

    #[test]
    fn query_from_a_subtree() {
        let mut voronoi = Voronoi::create(
            PartitionSettings::new(100, Point::ZERO, 10),
            ManhattanAdapter,
        );
        voronoi.add_feature(Feature::new(Point::new(30.0, 30.0), 'a'));
        voronoi.add_feature(Feature::new(Point::new(-30.0, 30.0), 'b'));

        let upper_right = voronoi.root().quadrant(Quadrant::UpperRight).unwrap();
        let found = upper_right.closest_feature(Point::new(60.0, 30.0)).unwrap();
        assert_eq!(*found.feature().payload(), 'a');
        assert_eq!(found.distance_squared(), 30.0);

        // 'a' is closer to the west border than to the query, so the search
        // crosses into the upper left quadrant.
        let found = upper_right.closest_feature(Point::new(-20.0, 30.0)).unwrap();
        assert_eq!(*found.feature().payload(), 'b');
        assert_eq!(found.distance_squared(), 10.0);
    }

    #[test]
    fn domain_bounds() {
        let voronoi: Voronoi<_, ()> = Voronoi::create(
            PartitionSettings::new(50, Point::new(100.0, 100.0), 8),
            EuclideanAdapter,
        );
        assert_eq!(
            voronoi.bounds(),
            (Point::new(50.0, 150.0), Point::new(150.0, 50.0))
        );
        assert_eq!(voronoi.root().center(), Point::new(100.0, 100.0));
        assert_eq!(voronoi.root().size(), 100.0);
        assert_eq!(voronoi.root().layer_count(), 0);
        assert!(voronoi.root().parent().is_none());
    }
}
