//! Doorflow - doorway foot-traffic counter
//!
//! Polls a pair of motion sensors flanking a doorway, turns their edges into
//! entry/exit events, and serves a small traffic dashboard over HTTP.
//!
//! Module structure:
//! - `domain/` - Core types (Direction, ClockReading, DoorEvent)
//! - `io/` - External interfaces (Clock, Sensors, EventLog, Dashboard)
//! - `services/` - Business logic (DirectionDetector, Sampler)
//! - `infra/` - Infrastructure (Config, TrafficStats)

use clap::Parser;
use doorflow::infra::{Config, TrafficStats};

/// Doorflow - doorway foot-traffic counter
#[derive(Parser, Debug)]
#[command(name = "doorflow", version, about)]
struct Args {
    /// Path to TOML configuration file
    #[arg(short, long, default_value = "config/doorflow.toml")]
    config: String,
}
use doorflow::io::{DashboardServer, EventLog, GpioValueSensor, SystemClock};
use doorflow::services::Sampler;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;
use tracing::info;
use tracing_subscriber::fmt::time::UtcTime;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize structured logging with configurable level via RUST_LOG env var
    // Default: INFO, use RUST_LOG=debug for per-crossing visibility
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_timer(UtcTime::rfc_3339())
        .with_target(false)
        .init();

    info!(
        version = %env!("CARGO_PKG_VERSION"),
        git_hash = %env!("GIT_HASH"),
        "doorflow starting"
    );

    // Parse command line arguments using clap
    let args = Args::parse();

    // Load configuration from TOML file
    let config = Config::load_from_path(&args.config);

    // Log configuration
    info!(
        config_file = %config.config_file(),
        site = %config.site_name(),
        inside_sensor = %config.inside_sensor_path(),
        outside_sensor = %config.outside_sensor_path(),
        poll_interval_ms = %config.poll_interval_ms(),
        event_log_file = %config.event_log_file(),
        dashboard_port = %config.dashboard_port(),
        "config_loaded"
    );

    // Create shutdown signal
    let (shutdown_tx, shutdown_rx) = watch::channel(false);

    // Create shared components
    let stats = Arc::new(TrafficStats::new());

    // Start dashboard HTTP server. A failed bind (port in use, missing
    // privileges for port 80) disables the dashboard but never stops counting.
    match DashboardServer::bind(config.dashboard_port(), stats.clone(), config.site_name()).await {
        Ok(server) => {
            let dashboard_shutdown = shutdown_rx.clone();
            tokio::spawn(async move {
                server.run(dashboard_shutdown).await;
            });
        }
        Err(e) => {
            tracing::error!(error = %e, "dashboard_bind_failed");
        }
    }

    // Start stats reporter (periodic summary of the shared counters)
    let stats_clone = stats.clone();
    let summary_interval = config.summary_interval_secs();
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(Duration::from_secs(summary_interval));
        loop {
            interval.tick().await;
            stats_clone.snapshot().log();
        }
    });

    // Handle shutdown on Ctrl+C
    let shutdown_signal = shutdown_tx;
    tokio::spawn(async move {
        tokio::signal::ctrl_c().await.ok();
        info!("shutdown_signal_received");
        let _ = shutdown_signal.send(true);
    });

    // Run sampler - polls sensors until shutdown
    let sampler = Sampler::new(
        SystemClock,
        GpioValueSensor::new(config.inside_sensor_path()),
        GpioValueSensor::new(config.outside_sensor_path()),
        EventLog::new(config.event_log_file()),
        stats,
        Duration::from_millis(config.poll_interval_ms()),
    );
    sampler.run(shutdown_rx).await;

    info!("doorflow shutdown complete");
    Ok(())
}
