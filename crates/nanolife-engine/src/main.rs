//! Headless simulation entry point for the Nanolife simulation.
//!
//! Loads `nanolife-config.yaml` (falling back to defaults when absent),
//! builds the world, wires ctrl-c to a stop handle, and drives the tick
//! loop with the diagnostic reporter attached.

mod error;
mod reporter;

use std::path::Path;

use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use nanolife_core::{SimulationConfig, StopHandle, World, run_simulation};

use crate::error::EngineError;
use crate::reporter::Reporter;

/// Default configuration file location, relative to the working
/// directory.
const CONFIG_PATH: &str = "nanolife-config.yaml";

/// Application entry point.
///
/// # Errors
///
/// Returns an error when configuration is invalid or the report file
/// cannot be opened.
#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize structured logging
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(true)
        .init();

    info!("nanolife-engine starting");

    let config = load_config(Path::new(CONFIG_PATH))?;
    info!(
        grid_width = config.grid.width,
        grid_height = config.grid.height,
        genome_length = config.genome.length,
        capacity = config.population.capacity,
        food_rate = config.population.food_rate,
        max_ticks = config.run.max_ticks,
        "configuration loaded"
    );

    let mut world = World::new(&config).map_err(EngineError::from)?;
    let mut reporter = Reporter::open(
        &config.reporting.data_path,
        config.reporting.report_interval,
    )
    .map_err(EngineError::from)?;

    let stop = StopHandle::new();
    let ctrl_c_stop = stop.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            info!("ctrl-c received, stopping at the next tick boundary");
            ctrl_c_stop.stop();
        }
    });

    let result = run_simulation(&mut world, &config.run, &stop, &mut reporter).await;
    info!(
        total_ticks = result.total_ticks,
        end_reason = ?result.end_reason,
        final_population = result.final_summary.as_ref().map_or(0, |s| s.population),
        "simulation ended"
    );
    Ok(())
}

/// Read the YAML configuration, falling back to defaults when the file
/// does not exist.
fn load_config(path: &Path) -> Result<SimulationConfig, EngineError> {
    if path.exists() {
        let config = SimulationConfig::from_file(path)?;
        config.validate()?;
        Ok(config)
    } else {
        warn!(path = %path.display(), "config file not found, using defaults");
        Ok(SimulationConfig::default())
    }
}
