//! Anomaly detection module
//!
//! Flags spikes in the primary return series with a rolling z-score. A point
//! is a peak when its z-score is strictly above the threshold and a trough
//! when strictly below its negative; everything else, including points with
//! no defined z-score, is not an event.

mod detector;
mod types;

pub use detector::{AnomalyConfig, AnomalyDetector};
pub use types::{Detection, EventFlag, EventKind};
