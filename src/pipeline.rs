//! Study pipeline
//!
//! Wires the stages together: align → returns → detect → lag table →
//! statistics. Every stage builds a fresh table from the previous one, so a
//! run is a pure function of its inputs and configuration.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::time::Instant;

use crate::anomaly::{AnomalyConfig, AnomalyDetector, EventFlag, EventKind};
use crate::error::StudyError;
use crate::lag::LagTable;
use crate::series::{align, to_returns, Series};
use crate::stats::{event_profile, EventProfile, EventStatisticsEngine, LagStatsTable};
use crate::telemetry;

/// Parameters of a study run
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StudyConfig {
    pub anomaly: AnomalyConfig,
    /// Largest forward offset (default: 90)
    pub max_lag: usize,
    /// Minimum defined values per lag and category (default: 10)
    pub min_samples: usize,
}

impl Default for StudyConfig {
    fn default() -> Self {
        Self {
            anomaly: AnomalyConfig::default(),
            max_lag: 90,
            min_samples: crate::stats::DEFAULT_MIN_SAMPLES,
        }
    }
}

impl StudyConfig {
    pub fn validate(&self) -> Result<(), StudyError> {
        self.anomaly.validate()?;
        if self.min_samples == 0 {
            return Err(StudyError::InvalidConfig(
                "min_samples must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

/// One timestamp of the event table
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EventRow {
    pub timestamp: DateTime<Utc>,
    pub primary: f64,
    pub secondary: f64,
    pub primary_return: Option<f64>,
    pub secondary_return: Option<f64>,
    pub zscore: Option<f64>,
    pub flag: EventFlag,
}

/// Event-flagged table with the forward lag values of every row
///
/// `lags.row(i)` holds the lag entries for `rows[i]`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventTable {
    pub primary_label: String,
    pub secondary_label: String,
    pub rows: Vec<EventRow>,
    pub lags: LagTable,
}

impl EventTable {
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn flags(&self) -> Vec<EventFlag> {
        self.rows.iter().map(|r| r.flag).collect()
    }

    /// Rows flagged `kind`
    pub fn events(&self, kind: EventKind) -> impl Iterator<Item = &EventRow> {
        self.rows.iter().filter(move |r| r.flag.is(kind))
    }

    /// Mean reaction curve for one category
    pub fn profile(&self, kind: EventKind) -> EventProfile {
        event_profile(&self.flags(), &self.lags, kind)
    }
}

/// Complete output of a study run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StudyResult {
    pub config: StudyConfig,
    pub events: EventTable,
    pub stats: LagStatsTable,
}

fn log_zscore_summary(rows: &[EventRow]) {
    let defined: Vec<f64> = rows.iter().filter_map(|r| r.zscore).collect();
    let min = defined.iter().copied().reduce(f64::min);
    let max = defined.iter().copied().reduce(f64::max);
    metrics::gauge!(telemetry::ZSCORES_DEFINED).set(defined.len() as f64);
    tracing::debug!(defined = defined.len(), ?min, ?max, "Z-score summary");
}

/// Run the full study on two raw level series
pub fn run_study(
    primary: &Series,
    secondary: &Series,
    config: &StudyConfig,
) -> Result<StudyResult, StudyError> {
    let started = Instant::now();
    config.validate()?;
    let detector = AnomalyDetector::new(config.anomaly)?;
    let engine = EventStatisticsEngine::new(config.min_samples)?;

    let aligned = align(primary, secondary)?;
    metrics::gauge!(telemetry::ALIGNED_ROWS).set(aligned.len() as f64);
    tracing::info!(
        primary = primary.label(),
        secondary = secondary.label(),
        rows = aligned.len(),
        "Aligned input series"
    );

    let returns = to_returns(&aligned);
    let primary_returns: Vec<Option<f64>> = returns.iter().map(|r| r.primary).collect();
    let secondary_returns: Vec<Option<f64>> = returns.iter().map(|r| r.secondary).collect();

    let detections = detector.detect(&primary_returns);
    let lags = LagTable::build(&secondary_returns, config.max_lag);

    let rows: Vec<EventRow> = aligned
        .points
        .iter()
        .zip(&returns)
        .zip(&detections)
        .map(|((point, ret), detection)| EventRow {
            timestamp: point.timestamp,
            primary: point.primary,
            secondary: point.secondary,
            primary_return: ret.primary,
            secondary_return: ret.secondary,
            zscore: detection.zscore,
            flag: detection.flag,
        })
        .collect();
    log_zscore_summary(&rows);

    for kind in EventKind::ALL {
        let count = rows.iter().filter(|r| r.flag.is(kind)).count();
        metrics::counter!(telemetry::EVENTS_DETECTED, "kind" => kind.as_str())
            .increment(count as u64);
    }

    let flags: Vec<EventFlag> = rows.iter().map(|r| r.flag).collect();
    let stats = engine.compute(&flags, &lags);

    metrics::histogram!(telemetry::STUDY_DURATION).record(started.elapsed().as_secs_f64());

    Ok(StudyResult {
        config: *config,
        events: EventTable {
            primary_label: aligned.primary_label,
            secondary_label: aligned.secondary_label,
            rows,
            lags,
        },
        stats,
    })
}
