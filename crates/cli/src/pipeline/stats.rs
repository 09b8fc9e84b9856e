//! Run statistics.

use std::time::Duration;

use contracts::{SampleMatrix, SourceKind, CHANNEL_COUNT};
use observability::{AcquisitionMetricsAggregator, ChannelSummary};
use serde_json::{json, Value};

/// Statistics from an acquisition run
#[derive(Debug, Clone)]
pub struct RunStats {
    pub mode: SourceKind,

    /// Source description (port or "mock")
    pub source: String,

    pub duration: Duration,

    pub metrics: AcquisitionMetricsAggregator,

    /// Cache contents at the end of the run
    pub snapshot: SampleMatrix,
}

impl RunStats {
    pub fn new(mode: SourceKind, source: String) -> Self {
        Self {
            mode,
            source,
            duration: Duration::ZERO,
            metrics: AcquisitionMetricsAggregator::new(),
            snapshot: SampleMatrix::new(CHANNEL_COUNT),
        }
    }

    pub fn channels(&self) -> Vec<ChannelSummary> {
        ChannelSummary::from_matrix(&self.snapshot)
    }

    /// Print detailed summary
    pub fn print_summary(&self) {
        println!("\n╔══════════════════════════════════════════════════════════════╗");
        println!("║                  Acquisition Statistics                      ║");
        println!("╚══════════════════════════════════════════════════════════════╝\n");

        println!("📊 Overview");
        println!("   ├─ Mode: {}", self.mode);
        println!("   ├─ Source: {}", self.source);
        println!("   └─ Duration: {:.3}s", self.duration.as_secs_f64());

        let summary = self.metrics.summary();
        println!("\n📈 Pipeline");
        println!("   ├─ Cycles: {}", summary.cycles);
        println!("   ├─ Rows read: {}", summary.rows_read);
        println!("   ├─ Rows stored: {}", summary.rows_stored);
        println!("   ├─ Truncated stores: {}", summary.truncations);
        println!("   ├─ Errors: {} ({:.2}%)", summary.errors, summary.error_rate);
        println!("   └─ Filter latency (ms): {}", summary.filter_latency_ms);

        let channels = self.channels();
        println!("\n🌡  Cache ({} rows)", self.snapshot.len());
        for (i, channel) in channels.iter().enumerate() {
            let prefix = if i + 1 == channels.len() { "└─" } else { "├─" };
            println!("   {} {}", prefix, channel);
        }

        println!();
    }

    /// Summary and snapshot as a JSON value
    pub fn to_json(&self) -> Value {
        let summary = self.metrics.summary();
        let channels: Vec<Value> = self
            .channels()
            .iter()
            .map(|c| {
                json!({
                    "label": c.label,
                    "count": c.stats.count,
                    "min": c.stats.min,
                    "max": c.stats.max,
                    "mean": c.stats.mean,
                    "std_dev": c.stats.std_dev,
                })
            })
            .collect();
        let rows: Vec<&[f64]> = self.snapshot.rows().collect();

        json!({
            "mode": self.mode.as_str(),
            "source": self.source,
            "duration_secs": self.duration.as_secs_f64(),
            "cycles": summary.cycles,
            "rows_read": summary.rows_read,
            "rows_stored": summary.rows_stored,
            "truncations": summary.truncations,
            "errors": summary.errors,
            "channels": channels,
            "snapshot": rows,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_json_contains_snapshot_rows() {
        let mut stats = RunStats::new(SourceKind::Mock, "mock".into());
        stats.snapshot = SampleMatrix::from_rows(&[[1.0, 2.0, 3.0, 4.0]]).unwrap();
        stats.metrics.record_cycle(10, 1, false, 0.5);

        let value = stats.to_json();
        assert_eq!(value["mode"], "mock");
        assert_eq!(value["cycles"], 1);
        assert_eq!(value["snapshot"][0][3], 4.0);
        assert_eq!(value["channels"][0]["label"], "sensor1");
    }
}
