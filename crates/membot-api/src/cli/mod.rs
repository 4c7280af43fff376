//! CLI command definitions and dispatch for the `mbot` binary.
//!
//! Uses clap derive macros for argument parsing.

pub mod chat;

use clap::{Args, Parser, Subcommand};

/// Chat with an assistant that remembers.
#[derive(Parser)]
#[command(name = "mbot", version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Suppress all output except errors.
    #[arg(long, global = true)]
    pub quiet: bool,

    /// Detailed output (-v for verbose, -vv for debug/trace).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Export traces to stdout via OpenTelemetry.
    #[arg(long, global = true)]
    pub otel: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start an interactive chat session with memory.
    Chat(ChatArgs),
}

#[derive(Args)]
pub struct ChatArgs {
    /// Model to use (overrides config).
    #[arg(long)]
    pub model: Option<String>,

    /// Short-term buffer capacity (overrides config).
    #[arg(long)]
    pub capacity: Option<usize>,

    /// Number of long-term memories retrieved per turn (overrides config).
    #[arg(long)]
    pub top_k: Option<usize>,

    /// Completion token cap per call (overrides config).
    #[arg(long)]
    pub max_tokens: Option<u32>,

    /// API key for the chat provider.
    #[arg(long, env = "OPENAI_API_KEY", hide_env_values = true)]
    pub api_key: Option<String>,

    /// Custom OpenAI-compatible base URL.
    #[arg(long, env = "OPENAI_BASE_URL")]
    pub base_url: Option<String>,
}
