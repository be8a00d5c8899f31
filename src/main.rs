use clap::Parser;
use event_lag::cli::{Cli, Commands};
use event_lag::config::Config;
use std::path::Path;

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Load configuration; a missing file means defaults
    let config_found = Path::new(&cli.config).exists();
    let config = if config_found {
        Config::load(&cli.config)?
    } else {
        Config::default()
    };

    // Initialize telemetry
    event_lag::telemetry::init_telemetry(&config.telemetry)?;
    if !config_found {
        tracing::debug!(path = %cli.config, "No configuration file, using defaults");
    }

    match cli.command {
        Commands::Analyze(args) => {
            tracing::info!("Running event study");
            args.execute(&config)?;
        }
        Commands::Events(args) => {
            tracing::info!("Exporting event table");
            args.execute(&config)?;
        }
        Commands::Profile(args) => {
            tracing::info!("Computing event profile");
            args.execute(&config)?;
        }
        Commands::Config => {
            println!("Current configuration:");
            print!("{}", toml::to_string_pretty(&config)?);
        }
    }

    Ok(())
}
