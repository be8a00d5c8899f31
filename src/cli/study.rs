//! Flags shared by every command that runs the study

use anyhow::Context;
use chrono::{DateTime, NaiveDate, Utc};
use clap::Args;
use std::path::PathBuf;

use crate::config::Config;
use crate::data::load_series;
use crate::pipeline::{run_study, StudyResult};
use crate::series::Series;

#[derive(Args, Debug, Clone, Default)]
pub struct StudyArgs {
    /// CSV file of the series scanned for spikes
    #[arg(long)]
    pub primary: Option<PathBuf>,

    /// CSV file of the series whose reaction is measured
    #[arg(long)]
    pub secondary: Option<PathBuf>,

    /// Rolling z-score window
    #[arg(long)]
    pub window: Option<usize>,

    /// Z-score threshold for peaks and troughs
    #[arg(long)]
    pub threshold: Option<f64>,

    /// Largest forward lag
    #[arg(long)]
    pub max_lag: Option<usize>,

    /// Minimum events per lag and category
    #[arg(long)]
    pub min_samples: Option<usize>,

    /// First day to include (YYYY-MM-DD)
    #[arg(long)]
    pub start: Option<NaiveDate>,

    /// Last day to include (YYYY-MM-DD)
    #[arg(long)]
    pub end: Option<NaiveDate>,

    /// Output directory
    #[arg(long)]
    pub output: Option<PathBuf>,
}

impl StudyArgs {
    /// Configuration with command-line overrides applied
    pub fn apply(&self, config: &Config) -> Config {
        let mut config = config.clone();
        let analysis = &mut config.analysis;
        let data = &mut config.data;

        if let Some(path) = &self.primary {
            data.primary.path = path.clone();
            data.primary.label = None;
        }
        if let Some(path) = &self.secondary {
            data.secondary.path = path.clone();
            data.secondary.label = None;
        }
        analysis.window = self.window.unwrap_or(analysis.window);
        analysis.threshold = self.threshold.unwrap_or(analysis.threshold);
        analysis.max_lag = self.max_lag.unwrap_or(analysis.max_lag);
        analysis.min_samples = self.min_samples.unwrap_or(analysis.min_samples);
        data.start = self.start.or(data.start);
        data.end = self.end.or(data.end);
        if let Some(output) = &self.output {
            data.output_dir = output.clone();
        }

        config
    }

    /// Apply overrides, load both series and run the study
    pub fn run(&self, config: &Config) -> anyhow::Result<(Config, StudyResult)> {
        let config = self.apply(config);
        config.analysis.validate()?;

        let (primary, secondary) = load_inputs(&config)?;
        let result = run_study(&primary, &secondary, &config.analysis.study())
            .context("Study failed")?;

        Ok((config, result))
    }
}

fn day_start(date: NaiveDate) -> Option<DateTime<Utc>> {
    date.and_hms_opt(0, 0, 0).map(|ts| ts.and_utc())
}

fn day_end(date: NaiveDate) -> Option<DateTime<Utc>> {
    date.and_hms_opt(23, 59, 59).map(|ts| ts.and_utc())
}

/// Load the configured series, restricted to the configured date range
pub fn load_inputs(config: &Config) -> anyhow::Result<(Series, Series)> {
    let data = &config.data;
    let start = data.start.and_then(day_start);
    let end = data.end.and_then(day_end);

    let load = |source: &crate::config::SeriesSource| -> anyhow::Result<Series> {
        let series = load_series(&source.path, &source.label(), &source.column)?;
        Ok(series.between(start, end))
    };

    Ok((load(&data.primary)?, load(&data.secondary)?))
}
