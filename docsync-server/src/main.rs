//! DocSync - object store → knowledge service document sync
//!
//! Modes:
//! - default: one reconciliation pass, then exit
//! - `--daemon`: a pass every `--interval` seconds until Ctrl+C / SIGTERM
//! - `--dry-run`: print the skip/sync plan without writing anything
//!
//! Exit code 1 only when required credentials are missing.

use anyhow::Result;
use clap::Parser;
use std::sync::Arc;
use std::time::Duration;

mod cli;
mod commands;
mod daemon;
mod logging;
mod shutdown;

use cli::Cli;
use docsync_client::{ClientConfig, KnowledgeClient};
use docsync_core::{config, Engine, S3Store};
use docsync_types::{AppConfig, ConfigError};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    let config = match build_config(&cli) {
        Ok(config) => config,
        Err(e) if e.is_fatal_credential() => {
            tracing::error!("{}", e);
            std::process::exit(1);
        }
        Err(e) => return Err(e.into()),
    };

    tracing::info!(
        "DocSync v{} - bucket {} at {}, {} routes",
        env!("CARGO_PKG_VERSION"),
        config.store.bucket,
        config.store.endpoint,
        config.routes.len()
    );

    let store = S3Store::new(&config.store)?;
    let documents = KnowledgeClient::new(ClientConfig::from(&config.knowledge))?;
    let engine = Engine::new(&config, Arc::new(store), Arc::new(documents));

    if cli.dry_run {
        commands::dry_run(&engine, cli.json).await
    } else if cli.daemon {
        let every = Duration::from_secs(config.interval_secs);
        daemon::run(&engine, every, shutdown::shutdown_signal()).await;
        Ok(())
    } else {
        commands::run_once(&engine).await
    }
}

fn build_config(cli: &Cli) -> Result<AppConfig, ConfigError> {
    let mut config = config::load_config(cli.config.as_deref())?;
    if let Some(interval) = cli.interval {
        config.interval_secs = interval;
    }
    config::validate(&config)?;
    Ok(config)
}
