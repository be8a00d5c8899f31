//! Analyze command implementation

use clap::{Args, ValueEnum};

use super::StudyArgs;
use crate::config::Config;
use crate::data::{write_lag_stats, ParquetWriter};

/// Report format on stdout
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Table,
    Json,
}

#[derive(Args, Debug)]
pub struct AnalyzeArgs {
    #[command(flatten)]
    pub study: StudyArgs,

    /// Significance level for marking lags
    #[arg(long)]
    pub alpha: Option<f64>,

    /// Also write lag statistics as Parquet
    #[arg(long)]
    pub parquet: bool,

    /// Output format: json or table
    #[arg(long, value_enum, default_value = "table")]
    pub format: OutputFormat,
}

impl AnalyzeArgs {
    pub fn execute(&self, config: &Config) -> anyhow::Result<()> {
        let (config, result) = self.study.run(config)?;
        let alpha = self.alpha.unwrap_or(config.analysis.significance);
        let output_dir = &config.data.output_dir;

        let csv_path = output_dir.join("lag_statistics.csv");
        write_lag_stats(&csv_path, &result.stats)?;
        tracing::info!(path = %csv_path.display(), lags = result.stats.len(), "Wrote lag statistics");

        if self.parquet {
            let writer = ParquetWriter::new(output_dir.clone());
            let path = writer.file_path("lag_statistics");
            writer.write_lag_stats(&path, &result.stats)?;
            tracing::info!(path = %path.display(), "Wrote lag statistics Parquet");
        }

        match self.format {
            OutputFormat::Table => println!("{}", result.stats.format_table(alpha)),
            OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&result.stats)?),
        }

        Ok(())
    }
}
