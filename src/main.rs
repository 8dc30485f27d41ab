//! Tag Cache host process
//!
//! Composition root: builds the one process-wide tag cache, drives its
//! periodic sweep, and reports its size until shutdown.

use std::time::Duration;

use anyhow::Context;
use tokio::signal;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use tag_cache::{spawn_cleanup_task, CacheConfig, SharedTagCache, TagCache};

/// How often the host logs a stats line
const STATS_INTERVAL: Duration = Duration::from_secs(60);

/// # Startup Sequence
/// 1. Initialize tracing subscriber for logging
/// 2. Load configuration from environment variables
/// 3. Create the shared tag cache
/// 4. Start the background cleanup task
/// 5. Log cache stats periodically until SIGINT/SIGTERM
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Defaults to "info" level, can be overridden with RUST_LOG env var
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "tag_cache=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting tag cache");

    let config = CacheConfig::from_env().context("Failed to load tag cache configuration")?;
    info!(
        "Configuration loaded: list={:?}/{}, stats={:?}/{}, search={:?}/{}, cleanup_interval={:?}",
        config.tag_list.ttl,
        config.tag_list.capacity,
        config.tag_stats.ttl,
        config.tag_stats.capacity,
        config.tag_search.ttl,
        config.tag_search.capacity,
        config.cleanup_interval
    );

    let cache = TagCache::new(&config).into_shared();
    let cleanup_handle = spawn_cleanup_task(cache.clone(), config.cleanup_interval);
    info!("Background cleanup task started");

    tokio::select! {
        _ = report_stats(cache.clone()) => {}
        _ = shutdown_signal() => {}
    }

    cleanup_handle.abort();
    warn!("Cleanup task aborted");

    let stats = cache.read().await.stats();
    info!(
        total_entries = stats.total_entries,
        hit_rate = stats.hit_rate(),
        "Tag cache shutdown complete"
    );
    Ok(())
}

/// Logs a stats snapshot every [`STATS_INTERVAL`].
async fn report_stats(cache: SharedTagCache) {
    let mut ticker = tokio::time::interval(STATS_INTERVAL);
    ticker.tick().await;
    loop {
        ticker.tick().await;
        let stats = cache.read().await.stats();
        match serde_json::to_string(&stats) {
            Ok(json) => info!(stats = %json, "Tag cache stats"),
            Err(err) => warn!(error = %err, "Failed to serialize tag cache stats"),
        }
    }
}

/// Waits for shutdown signal (Ctrl+C or SIGTERM).
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = signal::ctrl_c().await {
            warn!(error = %err, "Failed to listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(err) => {
                warn!(error = %err, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C, initiating shutdown...");
        }
        _ = terminate => {
            info!("Received SIGTERM, initiating shutdown...");
        }
    }
}
