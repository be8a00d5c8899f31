//! event-lag: event study of one time series' reaction to spikes in another
//!
//! This library provides the core components for:
//! - Time alignment of two series and percentage returns
//! - Rolling z-score detection of peaks and troughs
//! - Forward lag alignment of the reacting series
//! - Per-lag event statistics with one-sample t-tests
//! - CSV input, CSV/Parquet export
//! - Logging and metrics
//!
//! ```no_run
//! use event_lag::data::load_series;
//! use event_lag::pipeline::{run_study, StudyConfig};
//! use std::path::Path;
//!
//! fn main() -> anyhow::Result<()> {
//!     let oil = load_series(Path::new("oil.csv"), "oil", "close")?;
//!     let vix = load_series(Path::new("vix.csv"), "vix", "close")?;
//!     let result = run_study(&oil, &vix, &StudyConfig::default())?;
//!     println!("{}", result.stats.format_table(0.05));
//!     Ok(())
//! }
//! ```

pub mod anomaly;
pub mod cli;
pub mod config;
pub mod data;
pub mod error;
pub mod lag;
pub mod pipeline;
pub mod series;
pub mod stats;
pub mod telemetry;
