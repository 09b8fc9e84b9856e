//! Line-oriented sample source over any buffered byte stream.

use std::io::{BufRead, ErrorKind};
use std::sync::Arc;

use contracts::{AcquisitionError, SampleMatrix, SampleSource, SourceKind};
use tracing::{debug, trace, warn};

use crate::metrics::LineMetrics;
use crate::record::parse_record;

/// Reads one record per call from a buffered byte stream
///
/// The stream is owned; dropping the source releases it.
pub struct LineSource<R> {
    name: String,
    reader: R,
    line: String,
    metrics: Arc<LineMetrics>,
}

impl<R: BufRead> LineSource<R> {
    /// Wrap a reader. `name` identifies the stream in errors and logs.
    pub fn new(name: impl Into<String>, reader: R) -> Self {
        Self {
            name: name.into(),
            reader,
            line: String::new(),
            metrics: Arc::new(LineMetrics::new()),
        }
    }

    /// Share externally owned metrics
    pub fn with_metrics(mut self, metrics: Arc<LineMetrics>) -> Self {
        self.metrics = metrics;
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn metrics(&self) -> Arc<LineMetrics> {
        self.metrics.clone()
    }

    /// Block until one record is available and parse it
    ///
    /// Bytes received before a read timeout are kept and completed by the
    /// next call.
    ///
    /// # Errors
    /// - `Port` if the stream is closed, times out, or fails
    /// - `Parse` for invalid UTF-8, empty or non-numeric records
    pub fn read_record(&mut self) -> Result<Vec<f64>, AcquisitionError> {
        match self.reader.read_line(&mut self.line) {
            Ok(0) => {
                self.line.clear();
                self.metrics.record_stream_error();
                warn!(port = %self.name, "stream closed");
                return Err(AcquisitionError::port(&self.name, "stream closed"));
            }
            Ok(_) => {}
            Err(e) if e.kind() == ErrorKind::InvalidData => {
                self.line.clear();
                self.metrics.record_parse_error();
                warn!(port = %self.name, error = %e, "record is not valid UTF-8");
                return Err(AcquisitionError::parse(format!("record is not valid UTF-8: {e}")));
            }
            Err(e) if matches!(e.kind(), ErrorKind::TimedOut | ErrorKind::WouldBlock) => {
                self.metrics.record_stream_error();
                warn!(port = %self.name, pending = self.line.len(), error = %e, "read timed out");
                return Err(AcquisitionError::port(&self.name, format!("read timed out: {e}")));
            }
            Err(e) => {
                self.line.clear();
                self.metrics.record_stream_error();
                warn!(port = %self.name, error = %e, "stream read failed");
                return Err(AcquisitionError::port(&self.name, e.to_string()));
            }
        }

        let bytes = self.line.len();
        let parsed = parse_record(&self.line);
        match &parsed {
            Ok(row) => {
                self.metrics.record_read(bytes);
                trace!(port = %self.name, fields = row.len(), "record parsed");
            }
            Err(e) => {
                self.metrics.record_parse_error();
                debug!(
                    port = %self.name,
                    line = %self.line.trim_end(),
                    error = %e,
                    "malformed record"
                );
            }
        }
        self.line.clear();
        parsed
    }
}

impl<R: BufRead + Send> SampleSource for LineSource<R> {
    fn describe(&self) -> String {
        self.name.clone()
    }

    fn kind(&self) -> SourceKind {
        SourceKind::Real
    }

    fn read(&mut self) -> Result<SampleMatrix, AcquisitionError> {
        let row = self.read_record()?;
        SampleMatrix::from_rows(&[row])
    }
}
