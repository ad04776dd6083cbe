use std::sync::Arc;

use anyhow::Result;
use clap::{Parser, Subcommand};

use ollama_agent::OllamaClient;
use taskplan_core::PlanBoard;
use taskplan_server::AppState;

#[derive(Parser)]
#[command(
    name = "taskplan",
    about = "AI-assisted task plan tracker — draft, refine, confirm, and finalize plans",
    version,
    propagate_version = true
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the HTTP API server
    Serve {
        /// Port to listen on
        #[arg(long, env = "TASKPLAN_PORT", default_value = "3000")]
        port: u16,

        /// Base URL of the Ollama server
        #[arg(long, env = "OLLAMA_HOST", default_value = ollama_agent::DEFAULT_HOST)]
        ollama_host: String,

        /// Model used for plan generation
        #[arg(long, env = "TASKPLAN_MODEL", default_value = ollama_agent::DEFAULT_MODEL)]
        model: String,
    },
}

fn main() {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .with_target(false)
        .init();

    let result = match cli.command {
        Commands::Serve {
            port,
            ollama_host,
            model,
        } => run_serve(port, ollama_host, model),
    };

    if let Err(e) = result {
        // Print the full error chain (anyhow's alternate Display)
        eprintln!("error: {e:#}");
        std::process::exit(1);
    }
}

fn run_serve(port: u16, ollama_host: String, model: String) -> Result<()> {
    tracing::info!(host = %ollama_host, model = %model, "using ollama backend");

    let client = OllamaClient::new(ollama_host, model);
    let board = PlanBoard::new(Arc::new(client));
    let state = AppState::new(board);

    let rt = tokio::runtime::Runtime::new()?;
    rt.block_on(async move {
        tokio::select! {
            res = taskplan_server::serve(state, port) => res,
            _ = tokio::signal::ctrl_c() => Ok(()),
        }
    })
}
