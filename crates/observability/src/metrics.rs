//! Acquisition metrics
//!
//! Counters and histograms exported through the `metrics` facade, plus an
//! in-memory aggregator used for end-of-run summaries.

use contracts::{SampleMatrix, CHANNEL_LABELS};
use metrics::{counter, gauge, histogram};

/// Record rows delivered by a sample source
pub fn record_rows_read(source: &str, rows: usize) {
    counter!(
        "thermo_acq_rows_read_total",
        "source" => source.to_string()
    )
    .increment(rows as u64);
}

/// Record a failed read
pub fn record_read_error(source: &str, error_kind: &str) {
    counter!(
        "thermo_acq_read_errors_total",
        "source" => source.to_string(),
        "kind" => error_kind.to_string()
    )
    .increment(1);
}

/// Record rows committed to the cache
pub fn record_rows_stored(rows: usize, total_stored: u64) {
    counter!("thermo_acq_rows_stored_total").increment(rows as u64);
    gauge!("thermo_acq_cache_total_stored").set(total_stored as f64);
}

/// Record an oversized store that was cut down to the cache capacity
pub fn record_cache_truncation(dropped_rows: usize) {
    counter!("thermo_acq_cache_truncations_total").increment(1);
    counter!("thermo_acq_cache_rows_discarded_total").increment(dropped_rows as u64);
}

/// Record a store rejected for its column count
pub fn record_shape_rejected(actual_width: usize) {
    counter!(
        "thermo_acq_shape_rejected_total",
        "width" => actual_width.to_string()
    )
    .increment(1);
}

/// Record time spent filtering one matrix
pub fn record_filter_latency_ms(filter: &str, latency_ms: f64) {
    histogram!(
        "thermo_acq_filter_latency_ms",
        "filter" => filter.to_string()
    )
    .record(latency_ms);
}

/// Acquisition metrics aggregator
///
/// Aggregates in memory for the run summary.
#[derive(Debug, Clone, Default)]
pub struct AcquisitionMetricsAggregator {
    /// Completed read → filter → store cycles
    pub cycles: u64,

    /// Rows delivered by the source
    pub rows_read: u64,

    /// Rows committed to the cache
    pub rows_stored: u64,

    /// Stores cut down to capacity
    pub truncations: u64,

    /// Failed cycles
    pub errors: u64,

    /// Filter latency (ms)
    pub filter_latency: RunningStats,
}

impl AcquisitionMetricsAggregator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Update with one successful cycle
    pub fn record_cycle(
        &mut self,
        rows_read: usize,
        rows_stored: usize,
        truncated: bool,
        filter_ms: f64,
    ) {
        self.cycles += 1;
        self.rows_read += rows_read as u64;
        self.rows_stored += rows_stored as u64;
        if truncated {
            self.truncations += 1;
        }
        self.filter_latency.push(filter_ms);
    }

    pub fn record_error(&mut self) {
        self.errors += 1;
    }

    /// Generate summary report
    pub fn summary(&self) -> MetricsSummary {
        let attempts = self.cycles + self.errors;
        MetricsSummary {
            cycles: self.cycles,
            rows_read: self.rows_read,
            rows_stored: self.rows_stored,
            truncations: self.truncations,
            errors: self.errors,
            error_rate: if attempts > 0 {
                self.errors as f64 / attempts as f64 * 100.0
            } else {
                0.0
            },
            filter_latency_ms: StatsSummary::from(&self.filter_latency),
        }
    }
}

/// Run summary
#[derive(Debug, Clone, Default)]
pub struct MetricsSummary {
    pub cycles: u64,
    pub rows_read: u64,
    pub rows_stored: u64,
    pub truncations: u64,
    pub errors: u64,
    pub error_rate: f64,
    pub filter_latency_ms: StatsSummary,
}

/// Per-channel statistics of a sample matrix
#[derive(Debug, Clone)]
pub struct ChannelSummary {
    pub label: String,
    pub stats: StatsSummary,
}

impl ChannelSummary {
    /// Summarize every column of `matrix`
    ///
    /// Columns beyond the known channel labels are named by index.
    pub fn from_matrix(matrix: &SampleMatrix) -> Vec<Self> {
        (0..matrix.width())
            .map(|j| {
                let mut stats = RunningStats::default();
                for row in matrix.rows() {
                    stats.push(row[j]);
                }
                let label = CHANNEL_LABELS
                    .get(j)
                    .map(|l| l.to_string())
                    .unwrap_or_else(|| format!("channel{j}"));
                Self {
                    label,
                    stats: StatsSummary::from(&stats),
                }
            })
            .collect()
    }
}

impl std::fmt::Display for ChannelSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:<10} {}", self.label, self.stats)
    }
}

/// Statistics summary
#[derive(Debug, Clone, Default)]
pub struct StatsSummary {
    pub count: u64,
    pub min: f64,
    pub max: f64,
    pub mean: f64,
    pub std_dev: f64,
}

impl From<&RunningStats> for StatsSummary {
    fn from(stats: &RunningStats) -> Self {
        Self {
            count: stats.count,
            min: stats.min,
            max: stats.max,
            mean: stats.mean(),
            std_dev: stats.std_dev(),
        }
    }
}

impl std::fmt::Display for StatsSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.count == 0 {
            write!(f, "N/A")
        } else {
            write!(
                f,
                "min={:.3}, max={:.3}, mean={:.3}, std={:.3} (n={})",
                self.min, self.max, self.mean, self.std_dev, self.count
            )
        }
    }
}

/// Online statistics (Welford's algorithm)
#[derive(Debug, Clone, Default)]
pub struct RunningStats {
    count: u64,
    mean: f64,
    m2: f64,
    min: f64,
    max: f64,
}

impl RunningStats {
    pub fn push(&mut self, value: f64) {
        self.count += 1;

        if self.count == 1 {
            self.min = value;
            self.max = value;
            self.mean = value;
            self.m2 = 0.0;
        } else {
            self.min = self.min.min(value);
            self.max = self.max.max(value);

            let delta = value - self.mean;
            self.mean += delta / self.count as f64;
            let delta2 = value - self.mean;
            self.m2 += delta * delta2;
        }
    }

    pub fn count(&self) -> u64 {
        self.count
    }

    pub fn mean(&self) -> f64 {
        if self.count == 0 {
            0.0
        } else {
            self.mean
        }
    }

    /// Sample variance
    pub fn variance(&self) -> f64 {
        if self.count < 2 {
            0.0
        } else {
            self.m2 / (self.count - 1) as f64
        }
    }

    pub fn std_dev(&self) -> f64 {
        self.variance().sqrt()
    }

    pub fn min(&self) -> f64 {
        self.min
    }

    pub fn max(&self) -> f64 {
        self.max
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_running_stats() {
        let mut stats = RunningStats::default();
        for v in [1.0, 2.0, 3.0, 4.0, 5.0] {
            stats.push(v);
        }

        assert_eq!(stats.count(), 5);
        assert!((stats.mean() - 3.0).abs() < 1e-10);
        assert!((stats.min() - 1.0).abs() < 1e-10);
        assert!((stats.max() - 5.0).abs() < 1e-10);
        assert!((stats.variance() - 2.5).abs() < 1e-10);
    }

    #[test]
    fn test_aggregator_cycles() {
        let mut aggregator = AcquisitionMetricsAggregator::new();
        aggregator.record_cycle(10_000, 100, true, 2.0);
        aggregator.record_cycle(1, 1, false, 4.0);
        aggregator.record_error();

        let summary = aggregator.summary();
        assert_eq!(summary.cycles, 2);
        assert_eq!(summary.rows_read, 10_001);
        assert_eq!(summary.rows_stored, 101);
        assert_eq!(summary.truncations, 1);
        assert!((summary.error_rate - 100.0 / 3.0).abs() < 1e-9);
        assert!((summary.filter_latency_ms.mean - 3.0).abs() < 1e-10);
    }

    #[test]
    fn test_channel_summary_labels() {
        let matrix =
            SampleMatrix::from_rows(&[[1.0, 2.0, 3.0, 4.0], [3.0, 2.0, 1.0, 0.0]]).unwrap();
        let channels = ChannelSummary::from_matrix(&matrix);

        assert_eq!(channels.len(), 4);
        assert_eq!(channels[0].label, "sensor1");
        assert_eq!(channels[3].label, "reference");
        assert!((channels[0].stats.mean - 2.0).abs() < 1e-10);
        assert_eq!(channels[1].stats.std_dev, 0.0);
    }
}
