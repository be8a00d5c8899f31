//! Events command implementation

use clap::Args;

use super::StudyArgs;
use crate::anomaly::EventKind;
use crate::config::Config;
use crate::data::{write_event_table, ParquetWriter};

#[derive(Args, Debug)]
pub struct EventsArgs {
    #[command(flatten)]
    pub study: StudyArgs,

    /// Write Parquet instead of CSV
    #[arg(long)]
    pub parquet: bool,
}

impl EventsArgs {
    pub fn execute(&self, config: &Config) -> anyhow::Result<()> {
        let (config, result) = self.study.run(config)?;
        let events = &result.events;

        let path = if self.parquet {
            let writer = ParquetWriter::new(config.data.output_dir.clone());
            let path = writer.file_path("events");
            writer.write_event_table(&path, events)?;
            path
        } else {
            let path = config.data.output_dir.join("events.csv");
            write_event_table(&path, events)?;
            path
        };

        println!("Event table: {}", path.display());
        println!("  Rows:    {}", events.len());
        for kind in EventKind::ALL {
            println!("  {:<8} {}", format!("{kind}s:"), events.events(kind).count());
        }

        Ok(())
    }
}
