use std::path::PathBuf;

use clap::{Parser, Subcommand};
use snooze_core::config::DEFAULT_CONFIG_FILE;

mod commands;

#[derive(Parser)]
#[command(
    name = "snooze-cli",
    version,
    about = "Schedule Cloud Monitoring snoozes for weekday nights and weekends"
)]
struct Cli {
    /// Schedule file (.yaml, .yml, .toml or .json)
    #[arg(long, short, global = true, env = "SNOOZE_CONFIG", default_value = DEFAULT_CONFIG_FILE)]
    config: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the snoozes a run would create, without calling the API
    Plan(commands::plan::PlanArgs),
    /// Create the snoozes in Cloud Monitoring
    Apply(commands::apply::ApplyArgs),
}

fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() {
    init_tracing();

    let cli = Cli::parse();
    let result = match cli.command {
        Commands::Plan(args) => commands::plan::run(&cli.config, args),
        Commands::Apply(args) => commands::apply::run(&cli.config, args),
    };

    if let Err(e) = result {
        tracing::error!(error = %e, "run aborted");
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
