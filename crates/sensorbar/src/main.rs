//! sensorbar
//!
//! Status bar module that polls a temperature, fan or power sensor and prints
//! one JSON line per update.

mod config;
mod output;
mod probe;

use anyhow::{bail, Context, Result};
use clap::Parser;
use sensorbar_core::locator::THERMAL_ROOT;
use sensorbar_core::{SensorModule, Ticker};
use std::io;
use std::path::{Path, PathBuf};
use tokio::signal::unix::{signal, SignalKind};
use tokio::sync::{mpsc, watch};
use tracing::info;
use tracing_subscriber::EnvFilter;

use config::Config;
use output::JsonSurface;

#[derive(Parser)]
#[command(name = "sensorbar")]
#[command(about = "Hardware sensor module for status bars")]
#[command(version)]
struct Cli {
    /// Configuration file
    #[arg(default_value = "config/default.toml")]
    config: PathBuf,

    /// Print a single update and exit
    #[arg(long)]
    once: bool,

    /// List hwmon devices and thermal zones, then exit
    #[arg(long)]
    probe: bool,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Setup logging; stdout carries the bar protocol
    let level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_env_filter(EnvFilter::from_default_env().add_directive(level.parse()?))
        .init();

    if cli.probe {
        probe::print(
            &mut io::stdout().lock(),
            Path::new(probe::HWMON_ROOT),
            Path::new(THERMAL_ROOT),
        )?;
        return Ok(());
    }

    // Load configuration
    let config = Config::load(&cli.config).context("Failed to load configuration")?;
    info!("Loaded configuration from: {}", cli.config.display());

    let mut module =
        SensorModule::new(config.module_config()).context("Failed to initialize sensor")?;
    let mut surface = JsonSurface::new(io::stdout());

    if cli.once {
        if !module.update(&mut surface, config.tooltip) {
            bail!("Failed to read {} sensor", module.kind());
        }
        surface.flush().context("Failed to write output")?;
        return Ok(());
    }

    // Start the refresh timer
    let (refresh_tx, mut refresh_rx) = mpsc::channel::<()>(1);
    let (shutdown_tx, shutdown_rx) = watch::channel(false);
    let ticker = Ticker::new(config.interval());
    info!(
        "Polling {} sensor at {} every {:?}",
        module.kind(),
        module.poller().source(),
        ticker.interval()
    );
    let ticker_handle = tokio::spawn(ticker.run(refresh_tx, shutdown_rx));

    // Setup Unix signal handlers
    let mut sigterm = signal(SignalKind::terminate())?;
    let mut sigint = signal(SignalKind::interrupt())?;

    loop {
        tokio::select! {
            refresh = refresh_rx.recv() => {
                if refresh.is_none() {
                    break;
                }
                if module.update(&mut surface, config.tooltip) {
                    surface.flush().context("Failed to write output")?;
                }
            }
            _ = sigterm.recv() => {
                info!("Received SIGTERM, shutting down");
                break;
            }
            _ = sigint.recv() => {
                info!("Received SIGINT, shutting down");
                break;
            }
        }
    }

    // The ticker exits on its own if it already stopped
    let _ = shutdown_tx.send(true);
    drop(refresh_rx);
    ticker_handle.await?;

    Ok(())
}
