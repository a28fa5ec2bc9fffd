//! Bounded async simulation loop.
//!
//! [`run_simulation`] drives the tick cycle until a termination condition
//! is met: a configured tick budget, or an external stop request.
//! Stopping is checked only at tick boundaries; a tick never tears down
//! partway.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use nanolife_types::TickSummary;
use tracing::info;

use crate::config::RunConfig;
use crate::tick;
use crate::world::World;

/// Cloneable handle for requesting a stop from outside the loop, e.g.
/// from a signal handler.
#[derive(Debug, Clone, Default)]
pub struct StopHandle(Arc<AtomicBool>);

impl StopHandle {
    /// A fresh, unstopped handle.
    pub fn new() -> Self {
        Self::default()
    }

    /// Request a stop at the next tick boundary.
    pub fn stop(&self) {
        self.0.store(true, Ordering::Relaxed);
    }

    /// Whether a stop has been requested.
    pub fn is_stopped(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }
}

/// Why the simulation loop ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EndReason {
    /// An external stop was requested.
    Stopped,
    /// The configured tick budget was exhausted.
    MaxTicksReached,
}

/// Result of a completed simulation run.
#[derive(Debug)]
pub struct SimulationResult {
    /// Why the loop ended.
    pub end_reason: EndReason,
    /// The last tick summary, if any tick completed.
    pub final_summary: Option<TickSummary>,
    /// Total number of ticks executed.
    pub total_ticks: u64,
}

/// Callback invoked after each tick completes.
///
/// Implementations can forward summaries to a diagnostic sink, a
/// renderer, or a test harness. The callback also receives the world for
/// read-only inspection of the live population.
pub trait TickCallback: Send {
    /// Called once per completed tick.
    fn on_tick(&mut self, summary: &TickSummary, world: &World);
}

/// A no-op tick callback for tests and headless runs.
#[derive(Debug, Default)]
pub struct NoOpCallback;

impl TickCallback for NoOpCallback {
    fn on_tick(&mut self, _summary: &TickSummary, _world: &World) {}
}

/// Run the simulation loop until the tick budget runs out or a stop is
/// requested. A `max_ticks` of 0 runs unbounded; a nonzero
/// `tick_interval_ms` sleeps between ticks.
pub async fn run_simulation(
    world: &mut World,
    run: &RunConfig,
    stop: &StopHandle,
    callback: &mut dyn TickCallback,
) -> SimulationResult {
    let mut last_summary: Option<TickSummary> = None;
    let mut total_ticks: u64 = 0;

    info!(
        max_ticks = run.max_ticks,
        tick_interval_ms = run.tick_interval_ms,
        "simulation starting"
    );

    loop {
        if stop.is_stopped() {
            info!(total_ticks, "stop requested");
            return SimulationResult {
                end_reason: EndReason::Stopped,
                final_summary: last_summary,
                total_ticks,
            };
        }
        if run.max_ticks > 0 && total_ticks >= run.max_ticks {
            info!(total_ticks, "tick budget exhausted");
            return SimulationResult {
                end_reason: EndReason::MaxTicksReached,
                final_summary: last_summary,
                total_ticks,
            };
        }

        let summary = tick::run_tick(world);
        total_ticks = total_ticks.saturating_add(1);
        info!(
            tick = summary.tick,
            population = summary.population,
            total_energy = %summary.total_energy,
            "tick"
        );
        callback.on_tick(&summary, world);
        last_summary = Some(summary);

        if run.tick_interval_ms > 0 {
            tokio::time::sleep(Duration::from_millis(run.tick_interval_ms)).await;
        }
    }
}
