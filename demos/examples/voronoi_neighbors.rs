// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Walk the partition around one chunk: its layers, borders and neighbors.
//!
//! Run:
//! - `cargo run -p voronoi_partition_demos --example voronoi_neighbors`

use kurbo::Point;
use voronoi_partition::{
    Direction, EuclideanAdapter, Feature, PartitionSettings, UnitKind, Voronoi,
};

fn main() {
    let settings = PartitionSettings::new(4096, Point::ZERO, 64);
    let mut voronoi = Voronoi::create(settings, EuclideanAdapter);

    // A ring of features around the origin.
    for i in 0..12 {
        let angle = f64::from(i) * core::f64::consts::TAU / 12.0;
        let p = Point::new(300.0 * angle.cos(), 300.0 * angle.sin());
        voronoi.add_feature(Feature::new(p, i));
    }
    println!("{voronoi:?}");

    let id = voronoi.chunk_at(Point::new(300.0, 0.0));
    let chunk = voronoi.unit(id);
    assert_eq!(chunk.kind(), UnitKind::Chunk);
    println!(
        "chunk {:?}: layer {}, bounds {:?}, {} feature(s)",
        chunk.id(),
        chunk.layer_count(),
        chunk.bounds(),
        chunk.feature_count()
    );

    for direction in Direction::ALL {
        match chunk.neighbor(direction) {
            Some(n) => println!(
                "  {direction:?}: {:?} layer {} centered at {:?}",
                n.kind(),
                n.layer_count(),
                n.center()
            ),
            None => println!("  {direction:?}: outside the domain"),
        }
    }

    // Climb back to the root.
    let mut unit = Some(chunk);
    while let Some(u) = unit {
        println!("layer {} size {}", u.layer_count(), u.size());
        unit = u.parent();
    }

    let query = Point::new(200.0, 120.0);
    let nearest = voronoi.closest_feature(query).unwrap();
    println!(
        "nearest to {query:?}: #{} at distance {:.1}",
        nearest.feature().payload(),
        nearest.distance()
    );
    assert_eq!(*nearest.feature().payload(), 1);
}
