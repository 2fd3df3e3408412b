//! Reelfind CLI - Command-line interface
//!
//! Provides command-line access to movie search, detail lookup, and the
//! web server.

mod commands;

use clap::Parser;
use reelfind_core::tracing_setup::{CliLogLevel, init_tracing};

#[derive(Parser)]
#[command(name = "reelfind")]
#[command(about = "A movie search and browse tool")]
struct Cli {
    /// Console log verbosity; the file log always captures everything
    #[arg(long, value_enum, default_value_t = CliLogLevel::Warn)]
    log_level: CliLogLevel,

    #[command(subcommand)]
    command: commands::Commands,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    if let Err(e) = init_tracing(cli.log_level.as_tracing_level(), None) {
        eprintln!("Warning: failed to initialize tracing: {e}");
    }

    commands::handle_command(cli.command).await
}
