//! Telemetry module
//!
//! Logging and metrics

mod logging;
mod metrics;

pub use self::logging::{init_logging, LogFormat};
pub use self::metrics::{
    describe_metrics, ALIGNED_ROWS, EVENTS_DETECTED, LAGS_EMITTED, LAGS_SKIPPED,
    STUDY_DURATION, ZSCORES_DEFINED,
};

use crate::config::TelemetryConfig;

/// Install the log subscriber and register metric descriptions
///
/// Metrics go to whichever recorder the host process installs; without one
/// they are no-ops.
pub fn init_telemetry(config: &TelemetryConfig) -> anyhow::Result<()> {
    init_logging(&config.log_level, config.log_format)?;
    describe_metrics();
    Ok(())
}
