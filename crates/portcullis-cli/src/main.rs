//! Portcullis line controller daemon.
//!
//! Usage: `portcullis [--mock] [CONFIG.json]`
//!
//! Starts the door, alarm and light executors, runs the boot light sequence
//! and then reads control commands from stdin (see [`command`]). Logging is
//! controlled with `RUST_LOG` (default `info`).

mod command;

use anyhow::{Context, Result};
use clap::Parser;
use command::Command;
use portcullis_core::GpioConfig;
use portcullis_executor::Coordinator;
use portcullis_hardware::{AnyLineDriver, SysfsDriver, mock::MockDriver};
use std::path::{Path, PathBuf};
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "portcullis")]
#[command(about = "Door, alarm and light line controller", long_about = None)]
struct Args {
    /// Record line writes in memory instead of touching sysfs
    #[arg(long)]
    mock: bool,

    /// JSON file overriding the default GPIO configuration
    config: Option<PathBuf>,
}

fn load_config(path: Option<&Path>) -> Result<GpioConfig> {
    let Some(path) = path else {
        return Ok(GpioConfig::default());
    };
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("reading config {}", path.display()))?;
    let config: GpioConfig = serde_json::from_str(&raw)
        .with_context(|| format!("parsing config {}", path.display()))?;
    Ok(config)
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();
    let config = load_config(args.config.as_deref())?;

    let driver = if args.mock {
        info!("Using mock line driver");
        AnyLineDriver::Mock(MockDriver::default())
    } else {
        AnyLineDriver::Sysfs(SysfsDriver::new())
    };

    let coordinator = Coordinator::start(config, driver).context("starting coordinator")?;
    coordinator.boot_light_sequence();

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        let line = tokio::select! {
            line = lines.next_line() => line.context("reading stdin")?,
            _ = tokio::signal::ctrl_c() => {
                info!("Interrupted");
                break;
            }
        };
        let Some(line) = line else {
            break;
        };
        if line.trim().is_empty() {
            continue;
        }

        match line.parse::<Command>() {
            Ok(Command::Quit) => break,
            Ok(command) => println!("{}", command.execute(&coordinator)),
            Err(e) => warn!("{}", e),
        }
    }

    coordinator.shutdown().await;
    Ok(())
}
