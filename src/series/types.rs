//! Time series types
//!
//! Raw input series, the time-aligned table and the derived return table.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::StudyError;

/// A labelled, strictly ascending sequence of (timestamp, value) observations
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Series {
    label: String,
    points: Vec<(DateTime<Utc>, f64)>,
}

impl Series {
    /// Create a series, rejecting unordered timestamps and non-finite values
    pub fn new(
        label: impl Into<String>,
        points: Vec<(DateTime<Utc>, f64)>,
    ) -> Result<Self, StudyError> {
        let label = label.into();

        if let Some(index) = points.iter().position(|(_, v)| !v.is_finite()) {
            return Err(StudyError::NonFiniteValue { label, index });
        }
        if let Some(index) = points.windows(2).position(|w| w[1].0 <= w[0].0) {
            return Err(StudyError::UnorderedSeries {
                label,
                index: index + 1,
            });
        }

        Ok(Self { label, points })
    }

    /// Series label, e.g. "oil"
    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn points(&self) -> &[(DateTime<Utc>, f64)] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Restrict to an inclusive time range. Open ends are unbounded.
    pub fn between(&self, start: Option<DateTime<Utc>>, end: Option<DateTime<Utc>>) -> Self {
        let points = self
            .points
            .iter()
            .filter(|(ts, _)| start.map_or(true, |s| *ts >= s) && end.map_or(true, |e| *ts <= e))
            .copied()
            .collect();
        Self {
            label: self.label.clone(),
            points,
        }
    }
}

/// One timestamp with both observations present
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TimePoint {
    pub timestamp: DateTime<Utc>,
    pub primary: f64,
    pub secondary: f64,
}

/// Inner join of two series on timestamp
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AlignedSeries {
    pub primary_label: String,
    pub secondary_label: String,
    pub points: Vec<TimePoint>,
}

impl AlignedSeries {
    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Primary observations in time order
    pub fn primary_values(&self) -> Vec<f64> {
        self.points.iter().map(|p| p.primary).collect()
    }

    /// Secondary observations in time order
    pub fn secondary_values(&self) -> Vec<f64> {
        self.points.iter().map(|p| p.secondary).collect()
    }
}

/// Period-over-period returns at one timestamp. `None` marks an undefined return.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ReturnPoint {
    pub timestamp: DateTime<Utc>,
    pub primary: Option<f64>,
    pub secondary: Option<f64>,
}
