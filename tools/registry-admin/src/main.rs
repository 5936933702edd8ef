//! Registry Admin: operator CLI for the document registry.

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use registry_admin::{AdminConfig, Cli};

fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = AdminConfig::load(&cli)?;

    // Logs go to stderr so stdout carries only command output.
    let filter = EnvFilter::try_new(&config.log_filter)
        .with_context(|| format!("invalid log filter {:?}", config.log_filter))?;
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let output = registry_admin::run(cli.command, &config)?;
    println!("{output}");
    Ok(())
}
