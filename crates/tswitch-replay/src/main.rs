//! Tongue switch replay binary.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use metrics_exporter_prometheus::PrometheusBuilder;
use tokio::sync::watch;
use tracing::{info, warn};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use tswitch_replay::{replay, Recording, ReplayConfig};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables
    dotenvy::dotenv().ok();

    // Initialize tracing with colored output for dev, JSON for production
    let use_json = std::env::var("LOG_FORMAT")
        .map(|v| v.to_lowercase() == "json")
        .unwrap_or(false);

    let env_filter = EnvFilter::from_default_env()
        .add_directive("tswitch_replay=info".parse()?)
        .add_directive("tswitch_vision=info".parse()?);

    if use_json {
        tracing_subscriber::registry()
            .with(fmt::layer().json())
            .with(env_filter)
            .init();
    } else {
        tracing_subscriber::registry()
            .with(
                fmt::layer()
                    .with_ansi(true)
                    .with_target(true)
                    .with_thread_ids(false)
                    .with_file(false)
                    .with_line_number(false),
            )
            .with(env_filter)
            .init();
    }

    info!("Starting tswitch-replay");

    let mut config = ReplayConfig::from_env();
    if let Some(dir) = std::env::args().nth(1) {
        config.recording_dir = PathBuf::from(dir);
    }
    info!("Replay config: {:?}", config);

    let metrics_handle = if config.metrics_enabled {
        Some(
            PrometheusBuilder::new()
                .install_recorder()
                .context("failed to install Prometheus recorder")?,
        )
    } else {
        None
    };

    let gesture = config.gesture_config()?;
    let recording = Arc::new(
        Recording::load(&config.recording_dir)
            .with_context(|| format!("loading {}", config.recording_dir.display()))?,
    );

    // Setup signal handler
    let (shutdown_tx, shutdown_rx) = watch::channel(false);
    tokio::spawn(async move {
        match tokio::signal::ctrl_c().await {
            Ok(()) => {
                info!("Received shutdown signal");
                shutdown_tx.send(true).ok();
            }
            Err(e) => warn!("Failed to listen for shutdown signal: {}", e),
        }
    });

    let summary = replay(recording, gesture, &config, shutdown_rx).await?;
    info!(
        frames = summary.frames_processed,
        p1_jumps = summary.jumps[0],
        p2_jumps = summary.jumps[1],
        "Replay complete"
    );
    println!("{}", serde_json::to_string_pretty(&summary)?);

    if let Some(handle) = metrics_handle {
        println!("{}", handle.render());
    }

    Ok(())
}
