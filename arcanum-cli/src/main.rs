//! ARCANUM CLI - Command-line interface
//!
//! Commands:
//! - demo: Watch a seeded auto-played match in the terminal
//! - scenario: Write the standard deployment to a JSON file

use clap::{Parser, Subcommand};
use std::path::PathBuf;

mod demo;

#[derive(Parser)]
#[command(name = "arcanum")]
#[command(about = "ARCANUM hex-grid tactics engine")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Watch a seeded auto-played match
    Demo {
        #[arg(long, default_value = "0")]
        seed: u64,
        #[arg(long, default_value = "60")]
        max_rounds: u32,
        /// Scenario JSON to start from instead of the standard deployment
        #[arg(long)]
        scenario: Option<PathBuf>,
    },
    /// Write the standard deployment scenario as JSON
    Scenario {
        #[arg(long)]
        output: PathBuf,
    },
}

fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Demo { seed, max_rounds, scenario } => {
            demo::run(seed, max_rounds, scenario.as_deref())
        }
        Commands::Scenario { output } => {
            let scenario = arcanum_core::Scenario::default();
            scenario.save(&output)?;
            println!("Wrote scenario '{}' to {}", scenario.name, output.display());
            Ok(())
        }
    }
}
