//! Event statistics types

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

use super::descriptive::{is_zero_std, mean, sample_std};
use super::ttest::one_sample_t_test;
use crate::anomaly::EventKind;

/// Aggregate of the lag-k secondary returns for one event category
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LagStatistic {
    pub count: usize,
    pub mean: f64,
    /// `None` below two values, `0.0` when the spread is within rounding
    pub std_dev: Option<f64>,
    /// `None` when the sample has no spread
    pub t_statistic: Option<f64>,
    /// Two-sided, against a true mean of zero
    pub p_value: Option<f64>,
}

impl LagStatistic {
    /// Summarise a sample; `None` for an empty one
    pub fn from_sample(values: &[f64]) -> Option<Self> {
        let mean = mean(values)?;
        let test = one_sample_t_test(values, 0.0);
        Some(Self {
            count: values.len(),
            mean,
            std_dev: sample_std(values).map(|std| if is_zero_std(std, values) { 0.0 } else { std }),
            t_statistic: test.t_statistic,
            p_value: test.p_value,
        })
    }

    /// Whether the mean differs from zero at level `alpha`
    pub fn is_significant(&self, alpha: f64) -> bool {
        self.p_value.is_some_and(|p| p < alpha)
    }
}

/// Statistics for both categories at one lag
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LagRecord {
    pub lag: usize,
    pub peak: Option<LagStatistic>,
    pub trough: Option<LagStatistic>,
}

impl LagRecord {
    pub fn new(lag: usize) -> Self {
        Self {
            lag,
            peak: None,
            trough: None,
        }
    }

    pub fn get(&self, kind: EventKind) -> Option<&LagStatistic> {
        match kind {
            EventKind::Peak => self.peak.as_ref(),
            EventKind::Trough => self.trough.as_ref(),
        }
    }

    /// Same record with the statistic for `kind` replaced
    pub fn with(self, kind: EventKind, stat: LagStatistic) -> Self {
        match kind {
            EventKind::Peak => Self {
                peak: Some(stat),
                ..self
            },
            EventKind::Trough => Self {
                trough: Some(stat),
                ..self
            },
        }
    }

    pub fn is_empty(&self) -> bool {
        self.peak.is_none() && self.trough.is_none()
    }
}

/// Why a lag was left out for one category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SkipReason {
    /// Fewer defined values than the minimum sample size
    InsufficientSamples { have: usize, need: usize },
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SkipReason::InsufficientSamples { have, need } => {
                write!(f, "Insufficient samples: {have} < {need}")
            }
        }
    }
}

/// A lag/category pair with no emitted statistic
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkippedLag {
    pub lag: usize,
    pub kind: EventKind,
    pub reason: SkipReason,
}

/// Per-lag event statistics, keyed by lag
///
/// Lags where neither category met the minimum sample size are absent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LagStatsTable {
    pub max_lag: usize,
    pub min_samples: usize,
    pub records: BTreeMap<usize, LagRecord>,
    pub skipped: Vec<SkippedLag>,
}

impl LagStatsTable {
    pub fn get(&self, lag: usize) -> Option<&LagRecord> {
        self.records.get(&lag)
    }

    /// Statistic for one lag and category, if emitted
    pub fn stat(&self, lag: usize, kind: EventKind) -> Option<&LagStatistic> {
        self.get(lag)?.get(kind)
    }

    /// Records in ascending lag order
    pub fn records(&self) -> impl Iterator<Item = &LagRecord> {
        self.records.values()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Number of lags with a statistic for `kind`
    pub fn emitted(&self, kind: EventKind) -> usize {
        self.records().filter(|r| r.get(kind).is_some()).count()
    }

    /// Lags whose p-value for `kind` is below `alpha`
    pub fn significant(&self, kind: EventKind, alpha: f64) -> Vec<usize> {
        self.records()
            .filter(|r| r.get(kind).is_some_and(|s| s.is_significant(alpha)))
            .map(|r| r.lag)
            .collect()
    }
}
