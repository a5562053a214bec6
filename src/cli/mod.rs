//! cli
//!
//! Command-line interface layer for the gateway.
//!
//! # Responsibilities
//!
//! - Parse command-line arguments and global flags
//! - Load configuration and assemble the collaborators
//! - Delegate to the transports
//!
//! The CLI layer is thin: all changelist semantics live in
//! [`crate::protocol`]; the transports own their projections.

pub mod args;
pub mod commands;

pub use args::{Cli, Command};

use anyhow::Result;
use tracing_subscriber::EnvFilter;

use crate::config::GatewayConfig;

/// Run the CLI application.
///
/// This is the main entry point called from `main.rs`.
pub async fn run() -> Result<()> {
    let cli = Cli::parse_args();
    init_tracing(cli.debug);

    let config = GatewayConfig::load(cli.config.as_deref())?;

    match cli.command {
        Command::Serve { bind, projects } => commands::serve(&config, bind, projects).await,
        Command::Handle { command } => commands::handle(&config, &command).await,
    }
}

/// Install the tracing subscriber. `RUST_LOG` wins over the `--debug` flag.
fn init_tracing(debug: bool) {
    let fallback = if debug { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}
