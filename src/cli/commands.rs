//! cli::commands
//!
//! Command handlers: assemble collaborators from config and delegate.

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::{bail, Context, Result};
use tracing::{info, warn};

use crate::callback::SystemCallbackInvoker;
use crate::config::GatewayConfig;
use crate::protocol::Dispatcher;
use crate::rest;
use crate::scheme::SchemeGateway;
use crate::store::memory::MemoryLocator;

/// Run the REST gateway over an in-memory store.
///
/// Seed projects come from the config file plus any `--project` flags; each
/// starts with the configured default changelist present and active.
pub async fn serve(
    config: &GatewayConfig,
    bind: Option<SocketAddr>,
    projects: Vec<String>,
) -> Result<()> {
    let locator = seeded_locator(config, &projects);
    if locator.project_names().is_empty() {
        warn!("no seed projects configured; every request will report project-not-found");
    } else {
        info!(projects = ?locator.project_names(), "seeded projects");
    }

    let addr = bind.unwrap_or(config.rest.bind);
    rest::serve(addr, Dispatcher::new(locator))
        .await
        .with_context(|| format!("REST gateway failed on {addr}"))
}

/// Execute one URL-scheme command string.
///
/// Succeeds silently; a handled-but-failed command surfaces its rendered
/// message as the process error.
pub async fn handle(config: &GatewayConfig, command: &str) -> Result<()> {
    let locator = seeded_locator(config, &[]);
    let invoker = Arc::new(SystemCallbackInvoker::new(config.callback_timeout()));
    let gateway = SchemeGateway::new(locator, invoker, config.default_changelist.clone());

    match gateway.handle_command(command).await? {
        None => Ok(()),
        Some(message) => bail!("{message}"),
    }
}

fn seeded_locator(config: &GatewayConfig, extra: &[String]) -> Arc<MemoryLocator> {
    let locator = Arc::new(MemoryLocator::new());
    for seed in &config.seed_projects {
        locator.create_project(&seed.name, &config.default_changelist);
    }
    for name in extra {
        locator.create_project(name, &config.default_changelist);
    }
    locator
}
