//! # Ingestion
//!
//! Real-device sample ingestion.
//!
//! Responsibilities:
//! - Parse comma-separated line records into numeric rows
//! - Read records from any buffered byte stream (`LineSource`)
//! - Open and own the serial port (`SerialLineSource`, `hardware` feature)
//! - Count records, bytes and failures
//!
//! ## Usage Example
//!
//! ```ignore
//! use ingestion::SerialLineSource;
//! use contracts::SampleSource;
//! use std::time::Duration;
//!
//! let mut source = SerialLineSource::open("/dev/ttyACM0", 9600, Duration::from_secs(1))?;
//! let row = source.read()?; // 1×N matrix
//! ```
//!
//! ## Testing Without Hardware
//!
//! ```ignore
//! use ingestion::LineSource;
//! use std::io::Cursor;
//!
//! let mut source = LineSource::new("fixture", Cursor::new("1,2,3,4\n"));
//! assert_eq!(source.read_record()?, vec![1.0, 2.0, 3.0, 4.0]);
//! ```

mod line_source;
mod metrics;
mod record;
mod serial;

// Re-exports
pub use line_source::LineSource;
pub use metrics::{LineMetrics, LineMetricsSnapshot};
pub use record::{parse_record, FIELD_SEPARATOR};
pub use serial::SerialLineSource;
