//! CSV input and output

use anyhow::{Context, Result};
use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use csv::{ReaderBuilder, Trim, Writer};
use std::fs::{self, File};
use std::path::Path;

use crate::pipeline::EventTable;
use crate::series::Series;
use crate::stats::{EventProfile, LagStatistic, LagStatsTable};

/// Parse a timestamp cell: RFC 3339, `YYYY-MM-DD HH:MM:SS[+zz:zz]` or `YYYY-MM-DD` (UTC)
pub fn parse_timestamp(s: &str) -> Option<DateTime<Utc>> {
    let s = s.trim();
    if let Ok(ts) = DateTime::parse_from_rfc3339(s) {
        return Some(ts.with_timezone(&Utc));
    }
    if let Ok(ts) = DateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S%:z") {
        return Some(ts.with_timezone(&Utc));
    }
    if let Ok(ts) = NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S") {
        return Some(ts.and_utc());
    }
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|ts| ts.and_utc())
}

/// Parse a value cell; blanks, `null` and non-finite numbers are missing
fn parse_value(s: &str) -> Option<f64> {
    let s = s.trim();
    if s.is_empty() || s.eq_ignore_ascii_case("null") {
        return None;
    }
    s.parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Load one series from a CSV file with a header row
///
/// The timestamp column is `timestamp` or `date`; the value column is
/// `column`. Both are matched case-insensitively. Rows with a missing value
/// are dropped.
pub fn load_series(path: &Path, label: &str, column: &str) -> Result<Series> {
    let mut reader = ReaderBuilder::new()
        .trim(Trim::All)
        .from_path(path)
        .with_context(|| format!("Failed to open {}", path.display()))?;

    let headers = reader.headers()?.clone();
    let find = |name: &str| headers.iter().position(|h| h.eq_ignore_ascii_case(name));
    let ts_idx = find("timestamp")
        .or_else(|| find("date"))
        .ok_or_else(|| anyhow::anyhow!("{}: no timestamp or date column", path.display()))?;
    let value_idx = find(column)
        .ok_or_else(|| anyhow::anyhow!("{}: no '{}' column", path.display(), column))?;

    let mut points = Vec::new();
    let mut missing = 0usize;
    for (line, record) in reader.records().enumerate() {
        let record = record?;
        let ts_cell = record.get(ts_idx).unwrap_or_default();
        let timestamp = parse_timestamp(ts_cell).ok_or_else(|| {
            anyhow::anyhow!(
                "{}: unparsable timestamp '{}' on row {}",
                path.display(),
                ts_cell,
                line + 1
            )
        })?;
        match record.get(value_idx).and_then(parse_value) {
            Some(value) => points.push((timestamp, value)),
            None => missing += 1,
        }
    }

    tracing::info!(
        path = %path.display(),
        label,
        rows = points.len(),
        missing,
        "Loaded series"
    );

    Ok(Series::new(label, points)?)
}

fn opt(value: Option<f64>) -> String {
    value.map(|v| v.to_string()).unwrap_or_default()
}

fn stat_fields(stat: Option<&LagStatistic>) -> [String; 5] {
    match stat {
        Some(s) => [
            s.count.to_string(),
            s.mean.to_string(),
            opt(s.std_dev),
            opt(s.t_statistic),
            opt(s.p_value),
        ],
        None => Default::default(),
    }
}

fn create(path: &Path) -> Result<Writer<File>> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    let file = File::create(path).with_context(|| format!("Failed to create {}", path.display()))?;
    Ok(Writer::from_writer(file))
}

/// Column names of the lag statistics CSV
pub fn lag_stats_header() -> Vec<String> {
    let mut header = vec!["lag".to_string()];
    for kind in ["peak", "trough"] {
        for field in ["count", "mean", "std", "t_stat", "p_value"] {
            header.push(format!("{kind}_{field}"));
        }
    }
    header
}

/// One row per emitted lag; a category without a statistic leaves its cells empty
pub fn write_lag_stats(path: &Path, table: &LagStatsTable) -> Result<()> {
    let mut writer = create(path)?;
    writer.write_record(lag_stats_header())?;

    for record in table.records() {
        let mut row = vec![record.lag.to_string()];
        row.extend(stat_fields(record.peak.as_ref()));
        row.extend(stat_fields(record.trough.as_ref()));
        writer.write_record(&row)?;
    }

    writer.flush()?;
    tracing::debug!(path = %path.display(), rows = table.len(), "Wrote lag statistics CSV");
    Ok(())
}

/// Event table with one `<secondary>_lag_<k>` column per offset
pub fn write_event_table(path: &Path, table: &EventTable) -> Result<()> {
    let mut writer = create(path)?;
    let p = &table.primary_label;
    let s = &table.secondary_label;

    let mut header = vec![
        "timestamp".to_string(),
        p.clone(),
        s.clone(),
        format!("{p}_return"),
        format!("{s}_return"),
        "zscore".to_string(),
        "flag".to_string(),
    ];
    header.extend((0..=table.lags.max_lag()).map(|k| format!("{s}_lag_{k}")));
    writer.write_record(&header)?;

    for (i, row) in table.rows.iter().enumerate() {
        let mut record = vec![
            row.timestamp.to_rfc3339(),
            row.primary.to_string(),
            row.secondary.to_string(),
            opt(row.primary_return),
            opt(row.secondary_return),
            opt(row.zscore),
            row.flag.to_string(),
        ];
        if let Some(lags) = table.lags.row(i) {
            record.extend(lags.iter().map(|v| opt(*v)));
        }
        writer.write_record(&record)?;
    }

    writer.flush()?;
    tracing::debug!(path = %path.display(), rows = table.len(), "Wrote event table CSV");
    Ok(())
}

/// Mean reaction per lag for one category
pub fn write_profile(path: &Path, profile: &EventProfile) -> Result<()> {
    let mut writer = create(path)?;
    writer.write_record(["lag", "count", "mean"])?;
    for point in &profile.points {
        writer.write_record([point.lag.to_string(), point.count.to_string(), opt(point.mean)])?;
    }
    writer.flush()?;
    tracing::debug!(path = %path.display(), kind = %profile.kind, "Wrote event profile CSV");
    Ok(())
}
