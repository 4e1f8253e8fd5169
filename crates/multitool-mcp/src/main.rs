//! multitool MCP Server
//!
//! # Usage
//!
//! ```bash
//! multitool-mcp [--config <path>] [--log-level <level>]
//! ```
//!
//! # Environment Variables
//!
//! - `MULTITOOL_CONFIG`: Path to the TOML configuration file
//! - `LOG_LEVEL`: Log verbosity (e.g. `DEBUG`, `info`)
//! - `RUST_LOG`: Filter used when no level is given (default: `info`)
//!
//! # Protocol
//!
//! JSON-RPC 2.0 over stdio:
//! - Requests/responses go through stdout
//! - Logs go to stderr

use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use clap::Parser;
use multitool_mcp::{McpServer, ServerConfig, builtin_registry, logging};

/// MCP server exposing the multitool tools
#[derive(Parser)]
#[command(name = "multitool-mcp")]
#[command(about = "MCP server exposing transcript and commit tools")]
#[command(version)]
struct Args {
    /// TOML configuration file
    #[arg(short, long, env = "MULTITOOL_CONFIG")]
    config: Option<PathBuf>,

    /// Log level or filter directive; overrides RUST_LOG
    #[arg(long, env = "LOG_LEVEL")]
    log_level: Option<String>,
}

#[tokio::main]
async fn main() -> ExitCode {
    let args = Args::parse();
    match run(args).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("multitool-mcp: {e}");
            ExitCode::FAILURE
        }
    }
}

async fn run(args: Args) -> Result<(), Box<dyn std::error::Error>> {
    logging::init(args.log_level.as_deref())?;

    let config = ServerConfig::load(args.config.as_deref())?;
    tracing::info!(
        config = ?args.config,
        git = %config.git.executable,
        "Starting multitool-mcp server"
    );

    let registry = builtin_registry(config.transcript_source(), config.git_cli())?;
    let server = McpServer::new(Arc::new(registry));

    tokio::select! {
        result = server.run() => result?,
        _ = tokio::signal::ctrl_c() => tracing::info!("Interrupted, shutting down"),
    }

    Ok(())
}
