//! SampleSource trait - sample data source abstraction
//!
//! Decouples the acquisition controller from where rows come from.
//! Mock simulation and the real serial line implement the same trait.

use crate::{AcquisitionError, SampleMatrix};

/// Where a [`SampleSource`] gets its data
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceKind {
    /// Simulated second-order sensor responses
    Mock,
    /// Line-oriented records from a device
    Real,
}

impl SourceKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Mock => "mock",
            Self::Real => "real",
        }
    }
}

impl std::fmt::Display for SourceKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Sample data source
///
/// Implementations are synchronous. A real source blocks the caller until a
/// record arrives or its read timeout elapses.
///
/// # Example
///
/// ```ignore
/// let mock = MockDataSource::from_config(config.mock.clone(), &config.sensors)?;
/// let mut source: Box<dyn SampleSource> = Box::new(mock);
/// let matrix = source.read()?;
/// assert_eq!(matrix.width(), CHANNEL_COUNT);
/// ```
pub trait SampleSource: Send {
    /// Short human-readable description (port name, "mock", ...)
    fn describe(&self) -> String;

    /// Kind of source
    fn kind(&self) -> SourceKind;

    /// Read the next block of rows
    ///
    /// A mock source returns a full simulated run; a real source returns a
    /// single parsed record.
    fn read(&mut self) -> Result<SampleMatrix, AcquisitionError>;
}
