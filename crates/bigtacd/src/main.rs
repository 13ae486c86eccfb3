//! bigtacd — Big Tac turn relay daemon.

use std::time::Duration;

use anyhow::{Context, Result};

use bigtac_core::config::BigtacConfig;
use bigtac_services::{Coordinator, IdleTimeout};

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    // Load config
    if let Err(e) = BigtacConfig::write_default_if_missing() {
        tracing::warn!(error = %e, "failed to write default config");
    }
    let config = BigtacConfig::load().unwrap_or_else(|e| {
        tracing::warn!(error = %e, "failed to load config, using defaults");
        BigtacConfig::default()
    });

    let default_timeout = config.sessions.wait_timeout();
    tracing::info!(
        bind = %config.network.bind_addr,
        port = config.network.api_port,
        wait_timeout = ?default_timeout,
        idle_eviction = ?config.sessions.idle_eviction(),
        "bigtacd starting"
    );

    let coordinator = Coordinator::new();

    // ── Shutdown channel ─────────────────────────────────────────────────────
    let (shutdown_tx, _) = tokio::sync::broadcast::channel::<()>(1);

    {
        let shutdown = shutdown_tx.clone();
        let coordinator = coordinator.clone();
        tokio::spawn(async move {
            tokio::signal::ctrl_c().await.ok();
            tracing::info!("shutdown signal received");
            // Release requests parked on sessions so the server can drain.
            coordinator.shutdown();
            let _ = shutdown.send(());
        });
    }

    // ── Spawn tasks ──────────────────────────────────────────────────────────

    let eviction_task = match config.sessions.idle_eviction() {
        Some(max_idle) => tokio::spawn(eviction_loop(
            coordinator.clone(),
            max_idle,
            config.sessions.eviction_interval(),
        )),
        None => {
            tracing::info!("session eviction disabled, sessions are kept for the process lifetime");
            tokio::spawn(std::future::pending::<()>())
        }
    };

    let session_printer = {
        let coordinator = coordinator.clone();
        tokio::spawn(async move {
            let mut interval = tokio::time::interval(Duration::from_secs(30));
            loop {
                interval.tick().await;
                tracing::debug!(count = coordinator.registry().len(), "session table snapshot");
            }
        })
    };

    let listener = tokio::net::TcpListener::bind((
        config.network.bind_addr.as_str(),
        config.network.api_port,
    ))
    .await
    .with_context(|| {
        format!(
            "failed to bind API on {}:{}",
            config.network.bind_addr, config.network.api_port
        )
    })?;

    let api_task = {
        let state = bigtac_api::ApiState::new(coordinator.clone(), default_timeout);
        let mut shutdown_rx = shutdown_tx.subscribe();
        tokio::spawn(async move {
            let stop = async move {
                let _ = shutdown_rx.recv().await;
            };
            if let Err(e) = bigtac_api::serve_on(listener, state, stop).await {
                tracing::error!(error = %e, "API server failed");
            }
        })
    };

    // ── Wait for exit ────────────────────────────────────────────────────────

    tokio::select! {
        r = api_task         => tracing::info!("API server exited: {:?}", r),
        r = eviction_task    => tracing::error!("eviction task exited: {:?}", r),
        r = session_printer  => tracing::error!("session printer exited: {:?}", r),
    }

    Ok(())
}

/// Periodically drop sessions idle for longer than `max_idle`.
async fn eviction_loop(coordinator: Coordinator, max_idle: Duration, every: Duration) {
    let policy = IdleTimeout::new(max_idle);
    let mut interval = tokio::time::interval(every);
    loop {
        interval.tick().await;
        let evicted = coordinator.evict(&policy);
        if evicted > 0 {
            tracing::debug!(evicted, remaining = coordinator.registry().len(), "eviction sweep");
        }
    }
}
