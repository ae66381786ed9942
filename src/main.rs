//! # Warden — scheduled AI watchdog for game-server logs.
//!
//! Loads the configured agents, validates every definition, then runs two
//! trigger paths side by side: a periodic scheduler and an HTTP webhook
//! gateway. Per-agent execution is mutually exclusive; a restart simply
//! re-fires every periodic agent immediately.
//!
//! Usage:
//!   warden                         # ~/.warden/config.toml
//!   warden --config warden.toml    # explicit config
//!   warden --port 8080             # gateway port override

use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result, bail};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use warden_core::WardenConfig;
use warden_gateway::AppState;
use warden_registry::TaskRegistry;
use warden_runner::ChatAgentRunner;
use warden_scheduler::{Dispatcher, ExecutionGuard, ScheduleTable, run_scheduler};

#[derive(Parser)]
#[command(
    name = "warden",
    version,
    about = "🛡️ Warden — scheduled AI watchdog for game-server logs"
)]
struct Cli {
    /// Path to config file (default: ~/.warden/config.toml)
    #[arg(short, long)]
    config: Option<String>,

    /// Gateway port override
    #[arg(short, long)]
    port: Option<u16>,

    /// Verbose logging
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        "warden=debug,tower_http=debug"
    } else {
        "warden=info"
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)),
        )
        .with_target(false)
        .init();

    let mut config = match &cli.config {
        Some(path) => {
            let path = shellexpand::tilde(path).to_string();
            WardenConfig::load_from(Path::new(&path))
                .with_context(|| format!("failed to load config from {path}"))?
        }
        None => WardenConfig::load().context("failed to load config")?,
    };
    if let Some(port) = cli.port {
        config.gateway.port = port;
    }

    if config.agents.is_empty() {
        bail!("no agents configured — add an `agents = [...]` list to the config");
    }

    let agents_dir = shellexpand::tilde(&config.agents_dir).to_string();
    let registry = Arc::new(TaskRegistry::new(
        &agents_dir,
        warden_runner::tools::catalog_names(),
    ));

    // Startup validation: every configured agent must resolve cleanly,
    // or startup aborts.
    let mut definitions = Vec::new();
    for name in &config.agents {
        let definition = registry
            .lookup(name)
            .with_context(|| format!("invalid agent definition '{name}' in {agents_dir}"))?;
        tracing::info!("📅 Agent '{}' loaded ({})", name, definition.frequency.describe());
        definitions.push(definition);
    }

    // The tick must be finer than the smallest interval or dispatch
    // latency exceeds one period.
    if let Some(smallest) = definitions
        .iter()
        .filter_map(|d| d.frequency.interval())
        .min()
        && Duration::from_secs(config.scheduler.tick_secs) >= smallest
    {
        tracing::warn!(
            "⚠️ Tick ({}s) is not finer than the smallest agent interval ({}s)",
            config.scheduler.tick_secs,
            smallest.as_secs()
        );
    }

    let table = Arc::new(ScheduleTable::from_definitions(
        &definitions,
        chrono::Utc::now(),
    ));
    let guard = ExecutionGuard::new(config.agents.iter().cloned());
    let runner = Arc::new(ChatAgentRunner::from_config(&config));
    let dispatcher = Dispatcher::new(registry, runner, guard);

    let (shutdown_tx, shutdown_rx) = tokio::sync::watch::channel(false);

    let scheduler_handle = tokio::spawn(run_scheduler(
        table.clone(),
        dispatcher.clone(),
        Duration::from_secs(config.scheduler.tick_secs),
        shutdown_rx.clone(),
    ));

    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            tracing::info!("🛑 Shutdown requested");
            shutdown_tx.send(true).ok();
        }
    });

    let state = Arc::new(AppState {
        tasks: config.agents.clone(),
        schedule: table,
        dispatcher: dispatcher.clone(),
        start_time: std::time::Instant::now(),
    });
    let addr = format!("{}:{}", config.gateway.host, config.gateway.port);

    warden_gateway::serve(state, &addr, shutdown_rx)
        .await
        .with_context(|| format!("gateway server failed on {addr}"))?;

    scheduler_handle.await.ok();

    // Let in-flight agent runs finish — no forced cancellation.
    let in_flight = dispatcher.in_flight();
    if in_flight > 0 {
        tracing::info!("⏳ Waiting for {in_flight} in-flight run(s) to finish");
    }
    dispatcher.wait_idle().await;

    tracing::info!("👋 Warden stopped");
    Ok(())
}
