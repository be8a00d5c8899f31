//! Rolling z-score anomaly detector
//!
//! The window is trailing and includes the current point: the z-score at
//! index `i` compares `returns[i]` against the mean and sample standard
//! deviation of `returns[i + 1 - window ..= i]`. Every return in the window
//! must be defined, so with a leading undefined return the first z-score
//! appears at index `window`.

use serde::{Deserialize, Serialize};

use super::types::{Detection, EventFlag};
use crate::error::StudyError;
use crate::stats::descriptive::{is_zero_std, mean, sample_std};

/// Configuration for anomaly detection
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AnomalyConfig {
    /// Rolling window length (default: 30)
    pub window: usize,

    /// Symmetric z-score bound (default: 2.0)
    pub threshold: f64,
}

impl Default for AnomalyConfig {
    fn default() -> Self {
        Self {
            window: 30,
            threshold: 2.0,
        }
    }
}

impl AnomalyConfig {
    pub fn validate(&self) -> Result<(), StudyError> {
        if self.window < 2 {
            return Err(StudyError::InvalidConfig(format!(
                "window must be at least 2, got {}",
                self.window
            )));
        }
        if !self.threshold.is_finite() || self.threshold <= 0.0 {
            return Err(StudyError::InvalidConfig(format!(
                "threshold must be a positive finite number, got {}",
                self.threshold
            )));
        }
        Ok(())
    }
}

/// Flags peaks and troughs in a return series
#[derive(Debug, Clone)]
pub struct AnomalyDetector {
    config: AnomalyConfig,
}

impl AnomalyDetector {
    /// Create a detector, rejecting an unusable window or threshold
    pub fn new(config: AnomalyConfig) -> Result<Self, StudyError> {
        config.validate()?;
        Ok(Self { config })
    }

    /// Rolling z-score at every index
    pub fn zscores(&self, returns: &[Option<f64>]) -> Vec<Option<f64>> {
        let w = self.config.window;
        (0..returns.len())
            .map(|i| {
                if i + 1 < w {
                    return None;
                }
                let window: Option<Vec<f64>> = returns[i + 1 - w..=i].iter().copied().collect();
                let window = window?;
                let m = mean(&window)?;
                let std = sample_std(&window)?;
                if is_zero_std(std, &window) {
                    return None;
                }
                let current = returns[i]?;
                Some((current - m) / std)
            })
            .collect()
    }

    /// Strict-inequality classification; an undefined z-score is never an event
    pub fn classify(&self, zscore: Option<f64>) -> EventFlag {
        match zscore {
            Some(z) if z > self.config.threshold => EventFlag::Peak,
            Some(z) if z < -self.config.threshold => EventFlag::Trough,
            _ => EventFlag::None,
        }
    }

    /// Z-score and flag at every index
    pub fn detect(&self, returns: &[Option<f64>]) -> Vec<Detection> {
        let detections: Vec<Detection> = self
            .zscores(returns)
            .into_iter()
            .map(|zscore| Detection {
                zscore,
                flag: self.classify(zscore),
            })
            .collect();

        let peaks = detections.iter().filter(|d| d.flag == EventFlag::Peak).count();
        let troughs = detections.iter().filter(|d| d.flag == EventFlag::Trough).count();
        tracing::info!(
            window = self.config.window,
            threshold = self.config.threshold,
            peaks,
            troughs,
            "Detected anomalies"
        );

        detections
    }
}
