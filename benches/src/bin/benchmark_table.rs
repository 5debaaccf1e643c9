//! Benchmark runner that outputs a markdown table for the README.
//!
//! Run with: `cargo run --package hourbar-bench --bin benchmark_table --release`

use hourbar_bench::{BenchmarkConfig, format_duration, format_rate, synthetic_records, write_csv};
use hourbar_lib::prelude::*;
use std::io::Write;
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Number of iterations per benchmark for statistical significance.
const ITERATIONS: u32 = 3;

/// One measured size.
struct Row {
    name: &'static str,
    ticks: usize,
    buckets: usize,
    aggregate: Duration,
    refresh: Duration,
}

fn main() {
    println!("hourbar Aggregation Benchmark");
    println!("=============================\n");

    let temp_dir = match tempfile::TempDir::new() {
        Ok(dir) => dir,
        Err(error) => {
            eprintln!("Error: failed to create a temporary directory: {error}");
            std::process::exit(1);
        }
    };
    let runtime = match tokio::runtime::Runtime::new() {
        Ok(runtime) => runtime,
        Err(error) => {
            eprintln!("Error: failed to start the tokio runtime: {error}");
            std::process::exit(1);
        }
    };

    println!("Running benchmarks ({ITERATIONS} iterations each)...\n");

    let sizes = [("10k ticks", 10_000), ("100k ticks", 100_000), ("1M ticks", 1_000_000)];
    let aggregator = TickAggregator::default();
    let mut rows = Vec::new();

    for (name, ticks) in sizes {
        print!("Benchmarking {name}... ");
        let _ = std::io::stdout().flush();

        let records = synthetic_records(&BenchmarkConfig::with_ticks(ticks));
        let path = temp_dir.path().join("ticks.csv");
        if let Err(error) = write_csv(&records, &path) {
            eprintln!("\nError: failed to write {}: {error}", path.display());
            std::process::exit(1);
        }

        let mut aggregate = Duration::ZERO;
        let mut buckets = 0;
        for _ in 0..ITERATIONS {
            let started = Instant::now();
            let result = aggregator.aggregate_records(records.iter().cloned());
            aggregate += started.elapsed();
            buckets = result.stats.buckets;
        }

        let source: Arc<dyn TickSource> = Arc::new(CsvFileSource::new(&path));
        let store = CandleStore::new(
            source,
            aggregator,
            StoreConfig::default().with_rebuild_timeout(None),
        );
        let mut refresh = Duration::ZERO;
        for _ in 0..ITERATIONS {
            let started = Instant::now();
            if let Err(error) = runtime.block_on(store.refresh()) {
                eprintln!("\nError: refresh failed: {error}");
                std::process::exit(1);
            }
            refresh += started.elapsed();
        }

        rows.push(Row {
            name,
            ticks,
            buckets,
            aggregate: aggregate / ITERATIONS,
            refresh: refresh / ITERATIONS,
        });
        println!("done");
    }

    println!("\n## Results\n");
    println!("| Data Size | Buckets | Aggregate | Throughput | CSV Refresh | Throughput |");
    println!("|-----------|---------|-----------|------------|-------------|------------|");

    for row in &rows {
        println!(
            "| {} | {} | {} | {} | {} | {} |",
            row.name,
            row.buckets,
            format_duration(row.aggregate),
            format_rate(row.ticks, row.aggregate),
            format_duration(row.refresh),
            format_rate(row.ticks, row.refresh),
        );
    }

    println!("\n### Environment\n");
    println!("- OS: {}", std::env::consts::OS);
    println!("- Arch: {}", std::env::consts::ARCH);
    println!("- hourbar version: {}", env!("CARGO_PKG_VERSION"));
}
