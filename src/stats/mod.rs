//! Event statistics module
//!
//! Descriptive statistics, the one-sample t-test, and the per-lag event
//! statistics built on them.

pub mod descriptive;
mod engine;
mod profile;
mod report;
mod ttest;
mod types;

pub use engine::{EventStatisticsEngine, DEFAULT_MIN_SAMPLES};
pub use profile::{event_profile, EventProfile, ProfilePoint};
pub use ttest::{one_sample_t_test, TTest};
pub use types::{LagRecord, LagStatistic, LagStatsTable, SkipReason, SkippedLag};
