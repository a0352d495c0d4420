//! Daemon loop: one pass per interval until shutdown.
//!
//! The wait between passes is raced against the shutdown future, so a signal
//! ends the loop promptly. A pass that has started always runs to completion.

use docsync_core::Engine;
use std::future::Future;
use std::time::Duration;
use tokio::time::{interval, MissedTickBehavior};

/// Run passes until `shutdown` resolves. Returns the number of passes started.
pub async fn run<F>(engine: &Engine, every: Duration, shutdown: F) -> u64
where
    F: Future<Output = ()>,
{
    tracing::info!("Starting daemon mode (interval: {}s)", every.as_secs());
    let mut ticker = interval(every);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
    tokio::pin!(shutdown);

    let mut passes = 0;
    loop {
        tokio::select! {
            biased;
            () = &mut shutdown => break,
            _ = ticker.tick() => {}
        }

        passes += 1;
        match engine.run_pass().await {
            Ok(report) => tracing::debug!(
                synced = report.synced,
                skipped = report.skipped,
                failed = report.failed,
                "Pass {} finished",
                passes
            ),
            Err(e) => tracing::error!("Sync cycle failed: {}", e),
        }
        tracing::info!("Sleeping for {} seconds...", every.as_secs());
    }

    tracing::info!("Daemon stopped after {} passes", passes);
    passes
}
