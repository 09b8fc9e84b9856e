//! Pipeline run loop.
//!
//! Drives an `AcquisitionController` for a fixed number of cycles and
//! collects statistics along the way.

mod stats;

pub use stats::RunStats;

use std::time::Instant;

use acquisition::{AcquisitionController, AcquisitionError};
use anyhow::Result;
use tracing::{info, warn};

/// Run `iterations` acquisition cycles on `controller`
///
/// Malformed records are counted and skipped. Any other error ends the run.
pub fn run(controller: &mut AcquisitionController, iterations: u64) -> Result<RunStats> {
    let mut stats = RunStats::new(controller.mode(), controller.describe_source());
    let start = Instant::now();

    info!(
        iterations,
        source = %stats.source,
        mode = %stats.mode,
        "Starting acquisition"
    );

    for cycle in 0..iterations {
        match controller.acquire() {
            Ok(report) => {
                stats.metrics.record_cycle(
                    report.rows_read,
                    report.store.stored,
                    report.store.truncated(),
                    report.filter_ms,
                );
            }
            Err(AcquisitionError::Parse { message }) => {
                stats.metrics.record_error();
                warn!(cycle, error = %message, "Skipping malformed record");
            }
            Err(e) => {
                stats.metrics.record_error();
                stats.duration = start.elapsed();
                return Err(
                    anyhow::Error::new(e).context(format!("Acquisition failed at cycle {cycle}"))
                );
            }
        }
    }

    stats.duration = start.elapsed();
    stats.snapshot = controller.cache();

    info!(
        cycles = stats.metrics.cycles,
        errors = stats.metrics.errors,
        duration_secs = stats.duration.as_secs_f64(),
        "Acquisition completed"
    );

    Ok(stats)
}
