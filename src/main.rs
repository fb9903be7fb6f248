//! Cycle Wellness Server
//!
//! Loads configuration, installs logging and serves the HTTP API until
//! Ctrl-C or SIGTERM.

use anyhow::Context;
use cycle_wellness::{api, logging, AppState, Config};
use std::path::PathBuf;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = match std::env::args_os().nth(1).map(PathBuf::from) {
        Some(path) => Config::load_with_env(&path)
            .with_context(|| format!("loading config from {}", path.display()))?,
        None => Config::load_default(),
    };

    let _log_guard = logging::init_logging(&config.logging).context("initializing logging")?;

    tracing::info!("Cycle Wellness v{}", env!("CARGO_PKG_VERSION"));
    tracing::info!(
        bind = %config.server.bind_address(),
        default_cycle_length = config.cycle.default_length,
        analysis_window = config.store.analysis_window,
        "Configuration loaded"
    );

    api::serve(AppState::new(config)).await?;

    tracing::info!("Cycle Wellness shutdown complete");
    Ok(())
}
