// Criterion benchmarks for AgriGuru Locator

use agriguru_locator::core::{distance::haversine_distance, ranker::rank, Catalog, Locator};
use agriguru_locator::models::{CatalogEntry, GeoPoint, SearchQuery};
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use std::collections::BTreeMap;

const STATES: [&str; 4] = ["Karnataka", "Maharashtra", "Punjab", "Tamil Nadu"];

fn create_entry(id: usize, lat: f64, lon: f64) -> CatalogEntry {
    CatalogEntry {
        id: id.to_string(),
        location: GeoPoint::new(lat, lon),
        attributes: BTreeMap::from([("state".to_string(), STATES[id % STATES.len()].to_string())]),
        details: serde_json::Map::new(),
    }
}

fn create_catalog(size: usize) -> Catalog {
    let entries = (0..size)
        .map(|i| {
            let lat_offset = (i as f64 * 0.013) % 20.0;
            let lon_offset = (i as f64 * 0.017) % 20.0;
            create_entry(i, 8.0 + lat_offset, 68.0 + lon_offset)
        })
        .collect();

    Catalog::new("bench", entries).unwrap()
}

fn bench_haversine_distance(c: &mut Criterion) {
    c.bench_function("haversine_distance", |b| {
        b.iter(|| {
            haversine_distance(
                black_box(GeoPoint::new(28.6139, 77.2090)),
                black_box(GeoPoint::new(19.0760, 72.8777)),
            )
        });
    });
}

fn bench_rank(c: &mut Criterion) {
    let query = GeoPoint::new(12.9716, 77.5946);
    let mut group = c.benchmark_group("rank");

    for size in [10, 100, 1000, 10000].iter() {
        let catalog = create_catalog(*size);
        group.bench_with_input(BenchmarkId::from_parameter(size), &catalog, |b, catalog| {
            b.iter(|| rank(black_box(catalog.all()), black_box(query), Some(500.0)));
        });
    }

    group.finish();
}

fn bench_search(c: &mut Criterion) {
    let locator = Locator::default();
    let query = SearchQuery::new(GeoPoint::new(12.9716, 77.5946))
        .with_criterion("state", "karnataka")
        .with_radius(1000.0);
    let mut group = c.benchmark_group("search");

    for size in [100, 1000, 10000].iter() {
        let catalog = create_catalog(*size);
        group.bench_with_input(BenchmarkId::from_parameter(size), &catalog, |b, catalog| {
            b.iter(|| locator.search(black_box(catalog), black_box(&query)));
        });
    }

    group.finish();
}

criterion_group!(benches, bench_haversine_distance, bench_rank, bench_search);
criterion_main!(benches);
