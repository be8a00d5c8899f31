//! Configuration types for event-lag

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::anomaly::{AnomalyConfig, EventKind};
use crate::error::StudyError;
use crate::pipeline::StudyConfig;
use crate::telemetry::LogFormat;

/// Root configuration structure
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub analysis: AnalysisConfig,
    #[serde(default)]
    pub data: DataConfig,
    #[serde(default)]
    pub telemetry: TelemetryConfig,
}

/// Event study parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisConfig {
    /// Rolling z-score window
    #[serde(default = "default_window")]
    pub window: usize,

    /// Symmetric z-score bound for peaks and troughs
    #[serde(default = "default_threshold")]
    pub threshold: f64,

    /// Largest forward lag
    #[serde(default = "default_max_lag")]
    pub max_lag: usize,

    /// Minimum defined values per lag and category
    #[serde(default = "default_min_samples")]
    pub min_samples: usize,

    /// Category used by single-category exports
    #[serde(default = "default_category")]
    pub category: EventKind,

    /// Significance level for marking lags in reports
    #[serde(default = "default_significance")]
    pub significance: f64,
}

fn default_window() -> usize {
    30
}
fn default_threshold() -> f64 {
    2.0
}
fn default_max_lag() -> usize {
    90
}
fn default_min_samples() -> usize {
    10
}
fn default_category() -> EventKind {
    EventKind::Peak
}
fn default_significance() -> f64 {
    0.05
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            window: 30,
            threshold: 2.0,
            max_lag: 90,
            min_samples: 10,
            category: EventKind::Peak,
            significance: 0.05,
        }
    }
}

impl AnalysisConfig {
    /// Pipeline parameters
    pub fn study(&self) -> StudyConfig {
        StudyConfig {
            anomaly: AnomalyConfig {
                window: self.window,
                threshold: self.threshold,
            },
            max_lag: self.max_lag,
            min_samples: self.min_samples,
        }
    }

    pub fn validate(&self) -> Result<(), StudyError> {
        self.study().validate()?;
        if !(self.significance > 0.0 && self.significance < 1.0) {
            return Err(StudyError::InvalidConfig(format!(
                "significance must be in (0, 1), got {}",
                self.significance
            )));
        }
        Ok(())
    }
}

/// One input series file
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeriesSource {
    pub path: PathBuf,

    /// Display label; defaults to the file stem
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,

    /// Value column, matched case-insensitively
    #[serde(default = "default_column")]
    pub column: String,
}

fn default_column() -> String {
    "close".to_string()
}

impl SeriesSource {
    pub fn new(path: impl Into<PathBuf>, label: &str) -> Self {
        Self {
            path: path.into(),
            label: Some(label.to_string()),
            column: default_column(),
        }
    }

    /// Configured label, or the file stem
    pub fn label(&self) -> String {
        self.label.clone().unwrap_or_else(|| {
            self.path
                .file_stem()
                .map(|s| s.to_string_lossy().into_owned())
                .unwrap_or_else(|| "series".to_string())
        })
    }
}

/// Input and output locations
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DataConfig {
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,

    /// Inclusive first day
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start: Option<NaiveDate>,

    /// Inclusive last day
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end: Option<NaiveDate>,

    /// Series scanned for spikes
    #[serde(default = "default_primary")]
    pub primary: SeriesSource,

    /// Series whose forward reaction is measured
    #[serde(default = "default_secondary")]
    pub secondary: SeriesSource,
}

fn default_output_dir() -> PathBuf {
    PathBuf::from("./output")
}
fn default_primary() -> SeriesSource {
    SeriesSource::new("oil.csv", "oil")
}
fn default_secondary() -> SeriesSource {
    SeriesSource::new("vix.csv", "vix")
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            output_dir: default_output_dir(),
            start: None,
            end: None,
            primary: default_primary(),
            secondary: default_secondary(),
        }
    }
}

/// Telemetry configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TelemetryConfig {
    /// Filter directive, overridden by `RUST_LOG`
    #[serde(default = "default_log_level")]
    pub log_level: String,

    #[serde(default)]
    pub log_format: LogFormat,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for TelemetryConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            log_format: LogFormat::Pretty,
        }
    }
}

impl Config {
    /// Load configuration from a TOML file
    pub fn load(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        config.analysis.validate()?;
        Ok(config)
    }
}
