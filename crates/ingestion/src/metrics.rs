//! Line source metrics

use std::sync::atomic::{AtomicU64, Ordering};

/// Line source counters
#[derive(Debug, Default)]
pub struct LineMetrics {
    /// Records parsed successfully
    pub records_read: AtomicU64,

    /// Raw bytes consumed from the stream
    pub bytes_read: AtomicU64,

    /// Malformed records
    pub parse_errors: AtomicU64,

    /// Stream failures (timeouts, closed stream, IO)
    pub stream_errors: AtomicU64,
}

impl LineMetrics {
    /// Create new metrics instance
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a parsed record of `bytes` raw bytes
    pub fn record_read(&self, bytes: usize) {
        self.records_read.fetch_add(1, Ordering::Relaxed);
        self.bytes_read.fetch_add(bytes as u64, Ordering::Relaxed);
    }

    /// Record parse error
    pub fn record_parse_error(&self) {
        self.parse_errors.fetch_add(1, Ordering::Relaxed);
    }

    /// Record stream error
    pub fn record_stream_error(&self) {
        self.stream_errors.fetch_add(1, Ordering::Relaxed);
    }

    /// Get snapshot
    pub fn snapshot(&self) -> LineMetricsSnapshot {
        LineMetricsSnapshot {
            records_read: self.records_read.load(Ordering::Relaxed),
            bytes_read: self.bytes_read.load(Ordering::Relaxed),
            parse_errors: self.parse_errors.load(Ordering::Relaxed),
            stream_errors: self.stream_errors.load(Ordering::Relaxed),
        }
    }
}

/// Metrics snapshot
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LineMetricsSnapshot {
    pub records_read: u64,
    pub bytes_read: u64,
    pub parse_errors: u64,
    pub stream_errors: u64,
}
