//! ragagent CLI entry point.
//!
//! Commands:
//! - `ask`: Answer a question with retrieval and print the transcript
//! - `search`: Query the knowledge base directly
//! - `check`: Send one message to the configured endpoint

use clap::{Parser, Subcommand};
use std::path::PathBuf;

mod commands;

#[derive(Parser)]
#[command(
    name = "ragagent",
    about = "ragagent: retrieval-augmented chat agent",
    version,
    author
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Config file (defaults to $RAGAGENT_CONFIG, then ~/.ragagent/config.toml)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Ask the agent a question and print the transcript
    Ask {
        /// The question (a built-in sample when omitted)
        query: Option<String>,

        /// Print the raw message sequence as JSON
        #[arg(long)]
        raw: bool,
    },

    /// Search the knowledge base without the agent
    Search {
        /// The search query
        query: String,

        /// Number of documents to return
        #[arg(short, long)]
        k: Option<usize>,
    },

    /// Check connectivity with a single chat completion
    Check {
        /// Message to send
        #[arg(short, long)]
        message: Option<String>,
    },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // Logs go to stderr; stdout carries only the transcript
    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(filter)),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let config_path = cli.config.as_deref();
    match cli.command {
        Commands::Ask { query, raw } => commands::ask::run(config_path, query, raw).await?,
        Commands::Search { query, k } => commands::search::run(config_path, &query, k).await?,
        Commands::Check { message } => commands::check::run(config_path, message).await?,
    }

    Ok(())
}
