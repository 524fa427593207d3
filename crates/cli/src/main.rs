//! orgassist CLI — the main entry point.
//!
//! Commands:
//! - `chat`    — Interactive or single-message chat through the router
//! - `index`   — Build the knowledge index from Markdown documents
//! - `plan`    — Generate a numbered plan for a goal
//! - `decide`  — Suggest the next step for a context summary
//! - `notes`   — Show the saved notes
//! - `stats`   — Summarize the interaction log
//! - `config`  — Show the effective configuration

use clap::{Parser, Subcommand};

mod app;
mod commands;

#[derive(Parser)]
#[command(
    name = "orgassist",
    about = "orgassist — organizational assistant over a local language model",
    version,
    author
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Chat with the assistant
    Chat {
        /// Send a single message instead of entering interactive mode
        #[arg(short, long)]
        message: Option<String>,

        /// Print the routing trace of every answer
        #[arg(long)]
        thoughts: bool,
    },

    /// Build the knowledge index used by policy questions
    Index,

    /// Generate a step-by-step plan for a goal
    Plan {
        /// The goal to plan for
        goal: String,
    },

    /// Suggest the next step given a context summary
    Decide {
        /// Context summary (read from stdin when omitted)
        #[arg(short, long)]
        context: Option<String>,
    },

    /// List saved notes
    Notes,

    /// Summarize the interaction log
    Stats {
        /// Only consider the most recent N interactions
        #[arg(long)]
        recent: Option<usize>,

        /// Also list the 50 most recent interactions
        #[arg(long)]
        detail: bool,
    },

    /// Show the effective configuration
    Config,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // Initialize tracing on stderr so answers stay clean on stdout
    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(filter)),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    match cli.command {
        Commands::Chat { message, thoughts } => commands::chat::run(message, thoughts).await?,
        Commands::Index => commands::index::run().await?,
        Commands::Plan { goal } => commands::plan::plan(goal).await?,
        Commands::Decide { context } => commands::plan::decide(context).await?,
        Commands::Notes => commands::notes::run().await?,
        Commands::Stats { recent, detail } => commands::stats::run(recent, detail).await?,
        Commands::Config => commands::config_cmd::show().await?,
    }

    Ok(())
}
