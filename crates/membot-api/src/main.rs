//! Membot CLI entry point.
//!
//! Binary name: `mbot`
//!
//! Parses CLI arguments, initializes tracing, then dispatches to the
//! interactive chat loop.

mod cli;

use clap::Parser;

use cli::{Cli, Commands};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Set up tracing based on verbosity
    let filter = match cli.verbose {
        0 if cli.quiet => "error",
        0 => "warn",
        1 => "info,membot=debug",
        _ => "trace",
    };

    membot_observe::tracing_setup::init_tracing(filter, cli.otel)
        .map_err(|e| anyhow::anyhow!("failed to initialize tracing: {e}"))?;

    let result = match cli.command {
        Commands::Chat(args) => cli::chat::run_chat_loop(&args).await,
    };

    membot_observe::tracing_setup::shutdown_tracing();
    result
}
