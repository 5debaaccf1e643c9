//! Benchmark utilities for hourbar.

use chrono::{NaiveDate, NaiveDateTime, TimeDelta};
use hourbar_lib::RawRecord;
use std::io::{BufWriter, Write};
use std::path::Path;
use std::time::Duration;

/// Shape of a synthetic tick set.
#[derive(Debug, Clone)]
pub struct BenchmarkConfig {
    /// Number of records to generate.
    pub ticks: usize,
    /// Number of distinct instrument codes.
    pub instruments: usize,
    /// Wall-clock spacing between consecutive records.
    pub spacing: TimeDelta,
    /// Share of records made deliberately malformed, in percent.
    pub malformed_percent: u8,
}

impl Default for BenchmarkConfig {
    fn default() -> Self {
        Self {
            ticks: 100_000,
            instruments: 20,
            spacing: TimeDelta::seconds(2),
            malformed_percent: 1,
        }
    }
}

impl BenchmarkConfig {
    /// Creates a config with the given tick count and default shape.
    pub fn with_ticks(ticks: usize) -> Self {
        Self {
            ticks,
            ..Self::default()
        }
    }
}

/// Generates a deterministic tick set starting at 2024-01-01 00:00 local.
///
/// Prices follow a bounded pseudo-random walk. Records are emitted in time
/// order except that every 97th record is swapped with its predecessor, so
/// the aggregator's ordering pass has real work to do.
pub fn synthetic_records(config: &BenchmarkConfig) -> Vec<RawRecord> {
    let start = NaiveDate::from_ymd_opt(2024, 1, 1)
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .unwrap_or(NaiveDateTime::MIN);
    let instruments = config.instruments.max(1);

    let mut seed: u64 = 0x9E37_79B9_7F4A_7C15;
    let mut price: i64 = 50_000;
    let mut records = Vec::with_capacity(config.ticks);

    for i in 0..config.ticks {
        seed ^= seed << 13;
        seed ^= seed >> 7;
        seed ^= seed << 17;

        price = (price + (seed % 201) as i64 - 100).clamp(1, 1_000_000);
        let at = start + config.spacing * i as i32;
        let code = format!("SYM{:03}", i % instruments);

        let malformed = (seed % 100) < u64::from(config.malformed_percent);
        let price_text = if malformed {
            "n/a".to_string()
        } else {
            price.to_string()
        };

        records.push(RawRecord::new(
            at.format("%Y-%m-%d %H:%M:%S").to_string(),
            code,
            price_text,
        ));
        if i % 97 == 96 {
            records.swap(i, i - 1);
        }
    }

    records
}

/// Writes records as a headerless `time,code,price` CSV file.
pub fn write_csv(records: &[RawRecord], path: &Path) -> std::io::Result<()> {
    let mut writer = BufWriter::new(std::fs::File::create(path)?);
    for record in records {
        writeln!(
            writer,
            "{},{},{}",
            record.timestamp, record.instrument, record.price
        )?;
    }
    writer.flush()
}

/// Format duration for display.
pub fn format_duration(d: Duration) -> String {
    let secs = d.as_secs_f64();
    if secs < 1.0 {
        format!("{:.1}ms", secs * 1000.0)
    } else if secs < 60.0 {
        format!("{:.2}s", secs)
    } else {
        let mins = secs / 60.0;
        format!("{:.1}m", mins)
    }
}

/// Format a rate in records per second for display.
pub fn format_rate(records: usize, d: Duration) -> String {
    let secs = d.as_secs_f64();
    if secs <= 0.0 {
        return "N/A".to_string();
    }
    let rate = records as f64 / secs;
    if rate >= 1_000_000.0 {
        format!("{:.2}M/s", rate / 1_000_000.0)
    } else {
        format!("{:.0}k/s", rate / 1000.0)
    }
}
