//! # Tello Bridge
//!
//! Replays recorded Tello telemetry and publishes pose, IMU, transform and
//! flight status records as JSON Lines.
//!
//! # Usage
//!
//! ```bash
//! cargo run --release -- config/default.toml
//! ```
//!
//! Expected output (on stderr; records go to the configured output):
//! ```text
//! INFO tello_bridge: Tello Bridge v0.1.0 starting...
//! INFO tello_bridge: Replaying telemetry.jsonl (odom=odom, imu=imu, drone=base_link)
//! INFO tello_bridge: Replay complete: 1200 logs, 120 flight status, 0 skipped
//! ```

use anyhow::{Context, Result};
use chrono::Utc;
use std::io::{BufWriter, Write};
use tokio::io::BufReader;
use tracing::info;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

use tello_bridge::bridge::observer::TracingObserver;
use tello_bridge::bridge::publisher::JsonlPublisher;
use tello_bridge::bridge::{replay, Bridge, FrameIds};
use tello_bridge::config::{Config, LoggingConfig};
use tello_bridge::messages::Time;
use tello_bridge::telemetry::logger::TelemetryLogger;

/// Configuration file used when no path is given on the command line
const DEFAULT_CONFIG_PATH: &str = "config/default.toml";

/// Name of the rolling log file when `[logging] file` is set
const LOG_FILE_NAME: &str = "tello-bridge.log";

/// Initializes tracing to stderr, or to a daily rolling file.
///
/// `RUST_LOG` takes precedence over the configured level. The returned guard
/// must be held for the life of the program when logging to a file.
fn init_logging(config: &LoggingConfig) -> Option<WorkerGuard> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.level));

    if config.file.is_empty() {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .init();
        None
    } else {
        let appender = tracing_appender::rolling::daily(&config.file, LOG_FILE_NAME);
        let (writer, guard) = tracing_appender::non_blocking(appender);
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(writer)
            .with_ansi(false)
            .init();
        Some(guard)
    }
}

/// Opens the replay output; `-` is stdout.
fn open_output(path: &str) -> Result<Box<dyn Write + Send>> {
    if path == "-" {
        return Ok(Box::new(std::io::stdout()));
    }

    let file = std::fs::File::create(path)
        .with_context(|| format!("Failed to create output file {}", path))?;
    Ok(Box::new(BufWriter::new(file)))
}

#[tokio::main]
async fn main() -> Result<()> {
    let config_path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| DEFAULT_CONFIG_PATH.to_string());
    let config = Config::load(&config_path)
        .with_context(|| format!("Failed to load configuration from {}", config_path))?;

    let _log_guard = init_logging(&config.logging);
    info!("Tello Bridge v{} starting...", env!("CARGO_PKG_VERSION"));

    let frames = FrameIds::from(&config.frames);
    let mut bridge = Bridge::new(frames.clone());

    if config.diagnostics.trace_flight_status {
        bridge.add_observer(Box::new(TracingObserver));
    }

    if config.recording.enabled {
        let logger = TelemetryLogger::new(&config.recording)
            .context("Failed to start flight status recording")?;
        bridge.add_observer(Box::new(logger));
    }

    let input = tokio::fs::File::open(&config.replay.input)
        .await
        .with_context(|| format!("Failed to open replay input {}", config.replay.input))?;
    let mut publisher = JsonlPublisher::new(open_output(&config.replay.output)?);

    info!(
        "Replaying {} (odom={}, imu={}, drone={})",
        config.replay.input, frames.odom, frames.imu, frames.drone
    );

    tokio::select! {
        result = replay(BufReader::new(input), &mut bridge, &mut publisher, || Time::from(Utc::now())) => {
            let stats = result?;
            info!(
                "Replay complete: {} logs, {} flight status, {} skipped",
                stats.logs, stats.flight_status, stats.skipped
            );
        }

        // Handle Ctrl+C for graceful shutdown
        _ = tokio::signal::ctrl_c() => {
            info!("Received Ctrl+C, shutting down...");
        }
    }

    info!("Total records published: {}", publisher.published());
    Ok(())
}
