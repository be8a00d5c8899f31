//! Event statistics engine
//!
//! For every lag and event category, gathers the defined lag values at
//! flagged timestamps and summarises them with a one-sample t-test against
//! zero. Each category is gated on its own sample size.

use std::collections::BTreeMap;

use super::types::{LagRecord, LagStatistic, LagStatsTable, SkipReason, SkippedLag};
use crate::anomaly::{EventFlag, EventKind};
use crate::error::StudyError;
use crate::lag::LagTable;
use crate::telemetry;

/// Default minimum number of defined values per lag and category
pub const DEFAULT_MIN_SAMPLES: usize = 10;

/// Per-lag statistics over flagged timestamps
#[derive(Debug, Clone)]
pub struct EventStatisticsEngine {
    min_samples: usize,
}

impl Default for EventStatisticsEngine {
    fn default() -> Self {
        Self {
            min_samples: DEFAULT_MIN_SAMPLES,
        }
    }
}

impl EventStatisticsEngine {
    pub fn new(min_samples: usize) -> Result<Self, StudyError> {
        if min_samples == 0 {
            return Err(StudyError::InvalidConfig(
                "min_samples must be at least 1".to_string(),
            ));
        }
        Ok(Self { min_samples })
    }

    pub fn min_samples(&self) -> usize {
        self.min_samples
    }

    /// Statistic for one lag and category, or why there is none
    fn evaluate(
        &self,
        flags: &[EventFlag],
        table: &LagTable,
        lag: usize,
        kind: EventKind,
    ) -> Result<LagStatistic, SkipReason> {
        let sample: Vec<f64> = table
            .defined_at(lag, |i| flags.get(i).is_some_and(|f| f.is(kind)))
            .collect();

        let insufficient = SkipReason::InsufficientSamples {
            have: sample.len(),
            need: self.min_samples,
        };
        if sample.len() < self.min_samples {
            return Err(insufficient);
        }
        LagStatistic::from_sample(&sample).ok_or(insufficient)
    }

    /// Build the per-lag table for lags `0..=table.max_lag()`
    pub fn compute(&self, flags: &[EventFlag], table: &LagTable) -> LagStatsTable {
        let outcomes: Vec<(usize, EventKind, Result<LagStatistic, SkipReason>)> =
            (0..=table.max_lag())
                .flat_map(|lag| {
                    EventKind::ALL
                        .into_iter()
                        .map(move |kind| (lag, kind, self.evaluate(flags, table, lag, kind)))
                })
                .collect();

        let records = outcomes.iter().fold(
            BTreeMap::<usize, LagRecord>::new(),
            |mut acc, (lag, kind, outcome)| {
                if let Ok(stat) = outcome {
                    let record = acc.remove(lag).unwrap_or_else(|| LagRecord::new(*lag));
                    acc.insert(*lag, record.with(*kind, *stat));
                }
                acc
            },
        );

        let skipped: Vec<SkippedLag> = outcomes
            .iter()
            .filter_map(|(lag, kind, outcome)| {
                outcome.as_ref().err().map(|reason| SkippedLag {
                    lag: *lag,
                    kind: *kind,
                    reason: *reason,
                })
            })
            .collect();

        for skip in &skipped {
            tracing::trace!(lag = skip.lag, kind = %skip.kind, reason = %skip.reason, "Skipped lag");
        }

        let stats = LagStatsTable {
            max_lag: table.max_lag(),
            min_samples: self.min_samples,
            records,
            skipped,
        };

        for kind in EventKind::ALL {
            let emitted = stats.emitted(kind);
            let skipped = stats.skipped.iter().filter(|s| s.kind == kind).count();
            metrics::counter!(telemetry::LAGS_EMITTED, "kind" => kind.as_str())
                .increment(emitted as u64);
            metrics::counter!(telemetry::LAGS_SKIPPED, "kind" => kind.as_str())
                .increment(skipped as u64);
            tracing::info!(kind = %kind, emitted, skipped, "Computed lag statistics");
        }

        stats
    }
}
