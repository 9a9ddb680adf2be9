// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use criterion::{BatchSize, Criterion, Throughput, black_box, criterion_group, criterion_main};
use kurbo::Point;
use voronoi_partition::{
    DimensionAdapter, EuclideanAdapter, Feature, ManhattanAdapter, PartitionSettings, Voronoi,
};

const RADIUS: i32 = 1_000_000;

#[derive(Clone)]
struct Rng(u64);

impl Rng {
    fn new(seed: u64) -> Self {
        Self(seed)
    }
    fn next_u64(&mut self) -> u64 {
        let mut x = self.0;
        x ^= x << 13;
        x ^= x >> 7;
        x ^= x << 17;
        self.0 = x;
        x
    }
    fn next_f64(&mut self) -> f64 {
        let v = self.next_u64() >> 11;
        (v as f64) / ((1u64 << 53) as f64)
    }
}

fn gen_uniform_points(count: usize, extent: f64, seed: u64) -> Vec<Point> {
    let mut rng = Rng::new(seed);
    (0..count)
        .map(|_| {
            Point::new(
                (rng.next_f64() - 0.5) * 2.0 * extent,
                (rng.next_f64() - 0.5) * 2.0 * extent,
            )
        })
        .collect()
}

fn gen_clustered_points(n_clusters: usize, per_cluster: usize, spread: f64) -> Vec<Point> {
    let mut rng = Rng::new(0xC1A5_7E55_9999_ABCD);
    let mut out = Vec::with_capacity(n_clusters * per_cluster);
    for _ in 0..n_clusters {
        let cx = (rng.next_f64() - 0.5) * f64::from(RADIUS);
        let cz = (rng.next_f64() - 0.5) * f64::from(RADIUS);
        for _ in 0..per_cluster {
            let dx = (rng.next_f64() - 0.5) * spread;
            let dz = (rng.next_f64() - 0.5) * spread;
            out.push(Point::new(cx + dx, cz + dz));
        }
    }
    out
}

fn build<A: DimensionAdapter<Dim = Point>>(
    adapter: A,
    min_leaf_size: i32,
    points: &[Point],
) -> Voronoi<A, u32> {
    let mut voronoi = Voronoi::create(
        PartitionSettings::new(RADIUS, Point::ZERO, min_leaf_size),
        adapter,
    );
    for (i, p) in points.iter().copied().enumerate() {
        voronoi.add_feature(Feature::new(p, i as u32));
    }
    voronoi
}

fn bench_insert(c: &mut Criterion) {
    let mut group = c.benchmark_group("insert");
    for &n in &[1_000usize, 10_000, 100_000] {
        let points = gen_uniform_points(n, f64::from(RADIUS), 0xCAFE_F00D_DEAD_BEEF);
        group.throughput(Throughput::Elements(n as u64));
        group.bench_function(format!("uniform_n{}", n), |b| {
            b.iter_batched(
                || points.clone(),
                |points| black_box(build(EuclideanAdapter, 1024, &points)),
                BatchSize::LargeInput,
            )
        });
    }
    group.finish();
}

fn bench_closest(c: &mut Criterion) {
    let mut group = c.benchmark_group("closest_feature");
    let points = gen_uniform_points(100_000, f64::from(RADIUS), 0xCAFE_F00D_DEAD_BEEF);
    let queries = gen_uniform_points(1_000, f64::from(RADIUS), 0xFACE_FEED_CAFE_BABE);
    group.throughput(Throughput::Elements(queries.len() as u64));

    let euclid = build(EuclideanAdapter, 1024, &points);
    group.bench_function("euclidean_uniform", |b| {
        b.iter(|| {
            for q in &queries {
                black_box(euclid.closest_feature(*q));
            }
        })
    });

    let manhattan = build(ManhattanAdapter, 1024, &points);
    group.bench_function("manhattan_uniform", |b| {
        b.iter(|| {
            for q in &queries {
                black_box(manhattan.closest_feature(*q));
            }
        })
    });

    // Queries hitting stored positions never leave their chunk.
    group.bench_function("euclidean_hot", |b| {
        b.iter(|| {
            for p in points.iter().take(queries.len()) {
                black_box(euclid.closest_feature(*p));
            }
        })
    });

    let clustered = gen_clustered_points(64, 500, 20_000.0);
    let clustered = build(EuclideanAdapter, 256, &clustered);
    group.bench_function("euclidean_clustered", |b| {
        b.iter(|| {
            for q in &queries {
                black_box(clustered.closest_feature(*q));
            }
        })
    });
    group.finish();
}

fn bench_neighbors(c: &mut Criterion) {
    let points = gen_uniform_points(10_000, f64::from(RADIUS), 0xBADC_F00D_1234_5678);
    let mut voronoi = build(EuclideanAdapter, 1024, &points);
    let chunks: Vec<_> = points.iter().map(|p| voronoi.chunk_at(*p)).collect();
    c.bench_function("neighbors_all_directions", |b| {
        b.iter(|| {
            let mut found = 0_usize;
            for id in &chunks {
                let unit = voronoi.unit(*id);
                for d in voronoi_partition::Direction::ALL {
                    found += usize::from(unit.neighbor(d).is_some());
                }
            }
            black_box(found)
        })
    });
}

criterion_group!(benches, bench_insert, bench_closest, bench_neighbors);
criterion_main!(benches);
