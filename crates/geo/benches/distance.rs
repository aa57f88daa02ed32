//! Benchmarks for geo crate distance calculations.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use souk_geo::{haversine_distance, BoundingBox, GeoPoint};

fn create_test_points(count: usize) -> Vec<GeoPoint> {
    (0..count)
        .map(|i| {
            // Generate points in a grid around Casablanca
            let lat = 33.0 + (i as f64 * 0.01) % 1.0;
            let lng = -8.0 + (i as f64 * 0.01) % 1.0;
            GeoPoint::new(lat, lng)
        })
        .collect()
}

fn bench_single_distance(c: &mut Criterion) {
    let casablanca = GeoPoint::new(33.5731, -7.5898);
    let rabat = GeoPoint::new(34.0209, -6.8416);

    c.bench_function("haversine_single", |b| {
        b.iter(|| haversine_distance(black_box(&casablanca), black_box(&rabat)))
    });
}

fn bench_prefilter(c: &mut Criterion) {
    let mut group = c.benchmark_group("radius_filter");
    let center = GeoPoint::new(33.5731, -7.5898);

    for size in [10, 100, 1000, 10000].iter() {
        let points = create_test_points(*size);

        group.bench_with_input(BenchmarkId::new("haversine_only", size), size, |b, _| {
            b.iter(|| {
                points
                    .iter()
                    .filter(|p| haversine_distance(&center, p) <= 10.0)
                    .count()
            })
        });

        group.bench_with_input(BenchmarkId::new("bbox_then_haversine", size), size, |b, _| {
            b.iter(|| {
                let bbox = BoundingBox::around(black_box(&center), 10.0);
                points
                    .iter()
                    .filter(|p| bbox.contains(p))
                    .filter(|p| haversine_distance(&center, p) <= 10.0)
                    .count()
            })
        });
    }

    group.finish();
}

criterion_group!(benches, bench_single_distance, bench_prefilter);
criterion_main!(benches);
