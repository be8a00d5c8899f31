//! CLI interface for event-lag
//!
//! Provides subcommands for:
//! - `analyze`: Per-lag statistics with significance tests
//! - `events`: Export the event-flagged, lag-aligned table
//! - `profile`: Mean reaction curve for one event category
//! - `config`: Show the effective configuration

mod analyze;
mod events;
mod profile;
mod study;

pub use analyze::{AnalyzeArgs, OutputFormat};
pub use events::EventsArgs;
pub use profile::ProfileArgs;
pub use study::{load_inputs, StudyArgs};

use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "event-lag")]
#[command(about = "Measure how one series reacts in the days after spikes in another")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Path to configuration file
    #[arg(short, long, default_value = "config.toml")]
    pub config: String,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Per-lag statistics with significance tests
    Analyze(AnalyzeArgs),
    /// Export the event-flagged, lag-aligned table
    Events(EventsArgs),
    /// Mean reaction curve for one event category
    Profile(ProfileArgs),
    /// Show configuration
    Config,
}
