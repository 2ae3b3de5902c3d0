//! Fluidics bench runner.
//!
//! Loads an instrument configuration (first argument, JSON) or the default
//! one, builds every manifold on a simulated board, walks each manifold
//! through a one-hot sweep, then hosts the periodic toggler on the first
//! device of the first manifold.
//!
//! ```text
//!   InstrumentConfig ──▶ Manifold<Box<dyn Switchable>> ──▶ SimulatedBoard
//!                                   │
//!                                   └──▶ LogEventSink ──▶ tracing fmt
//! ```

use std::sync::Arc;

use anyhow::{Context, Result, bail};
use log::{info, warn};
use tracing_subscriber::EnvFilter;

use fluidics::Switchable;
use fluidics::adapters::sim_board::SimulatedBoard;
use fluidics::config::InstrumentConfig;
use fluidics::toggler::{ToggleOutcome, log_sink, spawn_toggler};

fn load_config() -> Result<InstrumentConfig> {
    match std::env::args().nth(1) {
        Some(path) => {
            let text = std::fs::read_to_string(&path)
                .with_context(|| format!("reading config {path}"))?;
            Ok(InstrumentConfig::from_json(&text)?)
        }
        None => {
            warn!("No config given, running with defaults");
            Ok(InstrumentConfig::default())
        }
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    info!("Fluidics bench v{}", env!("CARGO_PKG_VERSION"));

    let config = load_config()?;
    let board = Arc::new(SimulatedBoard::new());
    let sink = log_sink();

    let mut manifolds = Vec::with_capacity(config.manifolds.len());
    for entry in &config.manifolds {
        let mut manifold = entry
            .build(&board, &sink)
            .with_context(|| format!("building manifold '{}'", entry.name))?;

        for line in 0..manifold.size() {
            manifold.set_one_hot(line)?;
        }
        manifold.set_all(false);
        info!(
            "Manifold '{}' swept, values {:?}",
            entry.name,
            manifold.values()?
        );
        manifolds.push(manifold);
    }

    let Some(first) = manifolds.into_iter().next() else {
        bail!("configuration has no manifolds");
    };
    let Some(device) = first.into_devices().into_iter().next() else {
        bail!("first manifold has no devices");
    };

    let toggler = config.toggler.toggler()?;
    let handle = spawn_toggler("toggler", device, toggler, Arc::clone(&sink))?;
    let (device, report) = handle
        .join()
        .map_err(|_| anyhow::anyhow!("toggler thread panicked"))?;
    let report = report?;

    match report.outcome {
        ToggleOutcome::Completed => info!(
            "{} toggled {} times, {} switches total",
            device.name(),
            report.toggles,
            device.switch_count()
        ),
        ToggleOutcome::Stopped(fault) => bail!("toggler stopped: {fault}"),
    }
    Ok(())
}
