// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Render the Manhattan Voronoi regions of a few random features as ASCII.
//!
//! Every character pair on the map names the feature nearest to that cell.
//! The partition covers a million units in each direction while all features
//! sit near the origin, so nearly the whole tree stays unallocated.
//!
//! Run:
//! - `cargo run -p voronoi_partition_demos --example voronoi_ascii`

use std::time::Instant;

use kurbo::Point;
use voronoi_partition::{Feature, ManhattanAdapter, PartitionSettings, Voronoi};

const FEATURES: usize = 20;
const RANGE: i32 = 100;
const STEP: usize = 5;

struct Rng(u64);

impl Rng {
    fn next_u64(&mut self) -> u64 {
        let mut x = self.0;
        x ^= x << 13;
        x ^= x >> 7;
        x ^= x << 17;
        self.0 = x;
        x
    }

    fn next_coord(&mut self) -> f64 {
        let span = u64::from(RANGE.unsigned_abs()) * 2;
        (self.next_u64() % span) as f64 - f64::from(RANGE)
    }
}

fn main() {
    let settings = PartitionSettings::new(1_000_000, Point::ZERO, 8);
    let mut voronoi = Voronoi::create(settings, ManhattanAdapter);
    let mut rng = Rng(0x2545_F491_4F6C_DD1D);

    println!("Features: {FEATURES}");
    println!("Range: {RANGE}");

    let features: Vec<_> = (0..FEATURES)
        .map(|i| Feature::new(Point::new(rng.next_coord(), rng.next_coord()), format!("{i:02X}")))
        .collect();

    let start = Instant::now();
    voronoi.extend(features.iter().cloned());
    println!("Insert: {:?}", start.elapsed());
    println!("{:?}", voronoi.stats());

    let start = Instant::now();
    let mut lines = Vec::new();
    for z in (-RANGE..RANGE).rev().step_by(STEP) {
        let mut line = String::new();
        for x in (-RANGE..RANGE).step_by(STEP) {
            let query = Point::new(f64::from(x), f64::from(z));
            match voronoi.closest_feature(query) {
                Some(found) => line.push_str(found.feature().payload()),
                None => line.push_str(".."),
            }
        }
        lines.push(line);
    }
    println!("Lookup: {:?}", start.elapsed());

    for line in &lines {
        println!("{line}");
    }

    // Every feature sits in its own region.
    for feature in &features {
        let found = voronoi.closest_feature(feature.position()).unwrap();
        assert_eq!(found.distance_squared(), 0.0);
    }
}
