//! CSV and Parquet round trips through the study pipeline

use chrono::{Duration, NaiveDate};
use event_lag::anomaly::EventKind;
use event_lag::cli::load_inputs;
use event_lag::config::{Config, SeriesSource};
use event_lag::data::{
    lag_stats_header, load_series, write_event_table, write_lag_stats, write_profile,
    ParquetReader, ParquetWriter,
};
use event_lag::pipeline::{run_study, StudyConfig, StudyResult};
use std::fmt::Write as _;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Write a Yahoo-style CSV with a +6% primary jump every 45 days
fn write_inputs(dir: &Path) -> (PathBuf, PathBuf) {
    let start = NaiveDate::from_ymd_opt(2001, 1, 1).unwrap();
    let mut oil = String::from("Date,Open,High,Low,Close,Volume\n");
    let mut vix = String::from("Date,Close\n");
    let (mut p, mut v) = (30.0_f64, 20.0_f64);

    for i in 0..600i64 {
        let date = start + Duration::days(i);
        let r = if i > 0 && i % 45 == 0 {
            0.06
        } else {
            0.002 * ((i as f64) * 0.9).sin()
        };
        p *= 1.0 + r;
        v *= 1.0 + 0.01 * ((i as f64) * 0.37).cos();
        writeln!(oil, "{date},{p},{p},{p},{p},100").unwrap();
        // Every 50th day is missing from the secondary series
        if i % 50 != 7 {
            writeln!(vix, "{date},{v}").unwrap();
        }
    }

    let oil_path = dir.join("oil.csv");
    let vix_path = dir.join("vix.csv");
    std::fs::write(&oil_path, oil).unwrap();
    std::fs::write(&vix_path, vix).unwrap();
    (oil_path, vix_path)
}

fn study(dir: &Path) -> StudyResult {
    let (oil_path, vix_path) = write_inputs(dir);
    let oil = load_series(&oil_path, "oil", "Close").unwrap();
    let vix = load_series(&vix_path, "vix", "close").unwrap();
    let config = StudyConfig {
        max_lag: 10,
        ..StudyConfig::default()
    };
    run_study(&oil, &vix, &config).unwrap()
}

#[test]
fn test_loaded_series_align_with_gaps() {
    let dir = TempDir::new().unwrap();
    let result = study(dir.path());
    assert_eq!(result.events.len(), 600 - 12);
    assert!(result.events.events(EventKind::Peak).count() >= 10);
    assert!(!result.stats.is_empty());
}

#[test]
fn test_lag_stats_csv() {
    let dir = TempDir::new().unwrap();
    let result = study(dir.path());
    let path = dir.path().join("out").join("lag_statistics.csv");
    write_lag_stats(&path, &result.stats).unwrap();

    let mut reader = csv::Reader::from_path(&path).unwrap();
    let headers: Vec<String> = reader.headers().unwrap().iter().map(String::from).collect();
    assert_eq!(headers, lag_stats_header());

    let rows: Vec<csv::StringRecord> = reader.records().map(Result::unwrap).collect();
    assert_eq!(rows.len(), result.stats.len());

    let (pos, record) = result
        .stats
        .records()
        .enumerate()
        .find(|(_, r)| r.peak.is_some())
        .expect("peaks spaced 45 days apart clear the sample gate");
    let row = &rows[pos];
    assert_eq!(row[0].parse::<usize>().unwrap(), record.lag);
    let peak = record.peak.unwrap();
    assert_eq!(row[1].parse::<usize>().unwrap(), peak.count);
    assert_eq!(row[2].parse::<f64>().unwrap(), peak.mean);
    if record.trough.is_none() {
        assert!(row[6].is_empty());
    }
}

#[test]
fn test_lag_stats_parquet_round_trip() {
    let dir = TempDir::new().unwrap();
    let result = study(dir.path());

    let writer = ParquetWriter::new(dir.path().join("parquet"));
    let path = writer.file_path("lag_statistics");
    writer.write_lag_stats(&path, &result.stats).unwrap();

    let records = ParquetReader::new(path).read_lag_records().unwrap();
    let expected: Vec<_> = result.stats.records().copied().collect();
    assert_eq!(records, expected);
}

#[test]
fn test_event_table_exports() {
    let dir = TempDir::new().unwrap();
    let result = study(dir.path());

    let csv_path = dir.path().join("events.csv");
    write_event_table(&csv_path, &result.events).unwrap();
    let mut reader = csv::Reader::from_path(&csv_path).unwrap();
    let headers = reader.headers().unwrap().clone();
    assert_eq!(headers.len(), 7 + 11);
    assert_eq!(&headers[3], "oil_return");
    assert_eq!(&headers[17], "vix_lag_10");

    let rows: Vec<csv::StringRecord> = reader.records().map(Result::unwrap).collect();
    assert_eq!(rows.len(), result.events.len());
    // First row has no return and no z-score
    assert!(rows[0][3].is_empty());
    assert!(rows[0][5].is_empty());
    // Last row: only lag 0 is defined
    let last = rows.last().unwrap();
    assert!(!last[7].is_empty());
    assert!(last[8].is_empty());

    let writer = ParquetWriter::new(dir.path().to_path_buf());
    let parquet_path = writer.file_path("events");
    writer.write_event_table(&parquet_path, &result.events).unwrap();
    assert!(parquet_path.exists());
}

#[test]
fn test_profile_csv() {
    let dir = TempDir::new().unwrap();
    let result = study(dir.path());
    let profile = result.events.profile(EventKind::Peak);

    let path = dir.path().join("peak_profile.csv");
    write_profile(&path, &profile).unwrap();

    let mut reader = csv::Reader::from_path(&path).unwrap();
    let rows: Vec<csv::StringRecord> = reader.records().map(Result::unwrap).collect();
    assert_eq!(rows.len(), 11);
    assert_eq!(&rows[0][0], "0");
    let count: usize = rows[0][1].parse().unwrap();
    assert_eq!(count, profile.points[0].count);
}

#[test]
fn test_load_inputs_applies_date_range() {
    let dir = TempDir::new().unwrap();
    let (oil_path, vix_path) = write_inputs(dir.path());

    let mut config = Config::default();
    config.data.primary = SeriesSource::new(oil_path, "oil");
    config.data.secondary = SeriesSource::new(vix_path, "vix");
    config.data.start = NaiveDate::from_ymd_opt(2001, 2, 1);
    config.data.end = NaiveDate::from_ymd_opt(2001, 2, 28);

    let (oil, vix) = load_inputs(&config).unwrap();
    assert_eq!(oil.len(), 28);
    assert!(vix.len() <= 28);
    assert_eq!(
        oil.points()[0].0.date_naive(),
        NaiveDate::from_ymd_opt(2001, 2, 1).unwrap()
    );
}
