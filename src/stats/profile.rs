//! Average reaction profile for a single event category
//!
//! The mean lag-k secondary return over every flagged timestamp, with no
//! minimum-sample gate. This is the curve plotted against lag.

use serde::{Deserialize, Serialize};

use super::descriptive::mean;
use crate::anomaly::{EventFlag, EventKind};
use crate::lag::LagTable;

/// Mean reaction at one lag
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ProfilePoint {
    pub lag: usize,
    pub count: usize,
    /// `None` when no flagged timestamp has a defined value at this lag
    pub mean: Option<f64>,
}

/// Mean reaction curve for one category
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventProfile {
    pub kind: EventKind,
    pub points: Vec<ProfilePoint>,
}

impl EventProfile {
    /// Lag with the largest absolute mean
    pub fn strongest(&self) -> Option<&ProfilePoint> {
        self.points
            .iter()
            .filter(|p| p.mean.is_some())
            .max_by(|a, b| {
                let a = a.mean.unwrap_or_default().abs();
                let b = b.mean.unwrap_or_default().abs();
                a.total_cmp(&b)
            })
    }
}

/// Mean lag value over timestamps flagged `kind`, for every lag
pub fn event_profile(flags: &[EventFlag], table: &LagTable, kind: EventKind) -> EventProfile {
    let points = (0..=table.max_lag())
        .map(|lag| {
            let sample: Vec<f64> = table
                .defined_at(lag, |i| flags.get(i).is_some_and(|f| f.is(kind)))
                .collect();
            ProfilePoint {
                lag,
                count: sample.len(),
                mean: mean(&sample),
            }
        })
        .collect();

    EventProfile { kind, points }
}
