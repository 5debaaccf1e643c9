//! Aggregation benchmarks.
//!
//! Run with: `cargo bench --package hourbar-bench`

use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use hourbar_bench::{BenchmarkConfig, synthetic_records, write_csv};
use hourbar_lib::prelude::*;
use std::hint::black_box;
use std::sync::Arc;
use tempfile::TempDir;

/// Tick counts for each benchmark size.
const SIZES: [(&str, usize); 3] = [("10k", 10_000), ("100k", 100_000), ("1m", 1_000_000)];

fn aggregate_benchmark(c: &mut Criterion) {
    let aggregator = TickAggregator::default();

    let mut group = c.benchmark_group("aggregate_records");
    group.sample_size(10);

    for (name, ticks) in SIZES {
        let records = synthetic_records(&BenchmarkConfig::with_ticks(ticks));
        group.throughput(Throughput::Elements(ticks as u64));
        group.bench_with_input(BenchmarkId::from_parameter(name), &records, |b, records| {
            b.iter(|| black_box(aggregator.aggregate_records(records.iter().cloned())));
        });
    }

    group.finish();
}

fn refresh_benchmark(c: &mut Criterion) {
    let runtime = tokio::runtime::Runtime::new().unwrap();
    let temp_dir = TempDir::new().unwrap();

    let mut group = c.benchmark_group("store_refresh_csv");
    group.sample_size(10);

    for (name, ticks) in SIZES {
        let path = temp_dir.path().join(format!("{name}.csv"));
        write_csv(&synthetic_records(&BenchmarkConfig::with_ticks(ticks)), &path).unwrap();

        let source: Arc<dyn TickSource> = Arc::new(CsvFileSource::new(&path));
        let store = CandleStore::new(
            source,
            TickAggregator::default(),
            StoreConfig::default().with_rebuild_timeout(None),
        );

        group.throughput(Throughput::Elements(ticks as u64));
        group.bench_function(BenchmarkId::from_parameter(name), |b| {
            b.to_async(&runtime)
                .iter(|| async { black_box(store.refresh().await.unwrap()) });
        });
    }

    group.finish();
}

fn lookup_benchmark(c: &mut Criterion) {
    let runtime = tokio::runtime::Runtime::new().unwrap();
    let source: Arc<dyn TickSource> = Arc::new(MemorySource::new(synthetic_records(
        &BenchmarkConfig::with_ticks(100_000),
    )));
    let resolver = Resolver::new(CandleStore::new(
        source,
        TickAggregator::default(),
        StoreConfig::default(),
    ));
    let query = QueryParams::new("SYM007", 2024, 1, 1, 12);
    runtime.block_on(resolver.resolve(&query)).unwrap();

    c.bench_function("resolve_cached", |b| {
        b.to_async(&runtime)
            .iter(|| async { black_box(resolver.resolve(&query).await.unwrap()) });
    });
}

criterion_group!(
    benches,
    aggregate_benchmark,
    refresh_benchmark,
    lookup_benchmark
);
criterion_main!(benches);
