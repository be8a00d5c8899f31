//! Metric names and descriptions
//!
//! Recorded through the `metrics` facade. The binary does not install an
//! exporter, so these are no-ops unless an embedding application does.

/// Events flagged, labelled by `kind`
pub const EVENTS_DETECTED: &str = "event_lag_events_detected_total";
/// Lags with a statistic, labelled by `kind`
pub const LAGS_EMITTED: &str = "event_lag_lags_emitted_total";
/// Lags omitted for insufficient samples, labelled by `kind`
pub const LAGS_SKIPPED: &str = "event_lag_lags_skipped_total";
/// Rows after aligning the inputs
pub const ALIGNED_ROWS: &str = "event_lag_aligned_rows";
/// Rows with a defined z-score
pub const ZSCORES_DEFINED: &str = "event_lag_zscores_defined";
/// Wall time of one study run
pub const STUDY_DURATION: &str = "event_lag_study_duration_seconds";

/// Register descriptions with the installed recorder
pub fn describe_metrics() {
    metrics::describe_counter!(EVENTS_DETECTED, "Timestamps flagged as peak or trough");
    metrics::describe_counter!(LAGS_EMITTED, "Lags with an emitted statistic");
    metrics::describe_counter!(LAGS_SKIPPED, "Lags omitted below the minimum sample size");
    metrics::describe_gauge!(ALIGNED_ROWS, "Rows shared by both input series");
    metrics::describe_gauge!(ZSCORES_DEFINED, "Rows with a defined rolling z-score");
    metrics::describe_histogram!(
        STUDY_DURATION,
        metrics::Unit::Seconds,
        "Wall time of a study run"
    );
}
