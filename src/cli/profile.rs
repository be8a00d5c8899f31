//! Profile command implementation

use clap::Args;

use super::StudyArgs;
use crate::anomaly::EventKind;
use crate::config::Config;
use crate::data::write_profile;

#[derive(Args, Debug)]
pub struct ProfileArgs {
    #[command(flatten)]
    pub study: StudyArgs,

    /// Event category: peak or trough
    #[arg(long)]
    pub category: Option<EventKind>,
}

impl ProfileArgs {
    pub fn execute(&self, config: &Config) -> anyhow::Result<()> {
        let (config, result) = self.study.run(config)?;
        let kind = self.category.unwrap_or(config.analysis.category);

        let profile = result.events.profile(kind);
        let path = config.data.output_dir.join(format!("{kind}_profile.csv"));
        write_profile(&path, &profile)?;

        println!(
            "Average {} return after {} {}s: {}",
            result.events.secondary_label,
            result.events.primary_label,
            kind,
            path.display()
        );
        if let Some(point) = profile.strongest() {
            println!(
                "  Strongest reaction: lag {} mean {:+.5} over {} events",
                point.lag,
                point.mean.unwrap_or_default(),
                point.count
            );
        }

        Ok(())
    }
}
