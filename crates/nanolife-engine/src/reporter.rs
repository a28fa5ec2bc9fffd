//! Append-only diagnostic record sink.
//!
//! Every `report_interval` ticks, when a best-fit bot exists, one
//! comma-delimited record is appended to the data file: the best bot's
//! genome cells, the live population count, and the total energy. The
//! format matches the historical `data.txt` layout, so existing plotting
//! scripts keep working.

use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::Path;

use nanolife_core::{TickCallback, World};
use nanolife_types::TickSummary;
use tracing::{info, warn};

/// Tick callback that appends periodic records to a file.
#[derive(Debug)]
pub struct Reporter {
    file: File,
    interval: u64,
}

impl Reporter {
    /// Open (or create) the record file in append mode.
    ///
    /// # Errors
    ///
    /// Returns the underlying I/O error when the file cannot be opened.
    pub fn open(path: &Path, interval: u64) -> Result<Self, std::io::Error> {
        let file = OpenOptions::new().create(true).append(true).open(path)?;
        info!(path = %path.display(), interval, "diagnostic reporter ready");
        Ok(Self { file, interval })
    }

    fn record(summary: &TickSummary) -> Option<String> {
        let best = summary.best.as_ref()?;
        let mut fields: Vec<String> = best
            .genome
            .cells()
            .iter()
            .map(ToString::to_string)
            .collect();
        fields.push(summary.population.to_string());
        fields.push(summary.total_energy.to_string());
        Some(fields.join(", "))
    }
}

impl TickCallback for Reporter {
    /// Write failures are logged and skipped; reporting never stops the
    /// simulation.
    fn on_tick(&mut self, summary: &TickSummary, _world: &World) {
        if self.interval == 0 || summary.tick.checked_rem(self.interval) != Some(0) {
            return;
        }
        let Some(record) = Self::record(summary) else {
            return;
        };
        if let Err(err) = writeln!(self.file, "{record}") {
            warn!(tick = summary.tick, %err, "failed to append diagnostic record");
        }
    }
}
