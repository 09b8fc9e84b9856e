//! Serial-port line source.
//!
//! The port is opened on construction and closed when the source drops,
//! including when a later construction step fails.

use std::time::Duration;

use contracts::{AcquisitionError, SampleMatrix, SampleSource, SerialConfig, SourceKind};
use tracing::info;

use crate::line_source::LineSource;

#[cfg(feature = "hardware")]
type PortReader = std::io::BufReader<serial2::SerialPort>;

/// Line source reading records from a serial port
pub struct SerialLineSource {
    #[cfg(feature = "hardware")]
    inner: LineSource<PortReader>,
    #[cfg(not(feature = "hardware"))]
    inner: LineSource<std::io::Empty>,
    baud_rate: u32,
    virtual_port: bool,
}

impl SerialLineSource {
    /// Open `port` at `baud_rate`, with reads bounded by `read_timeout`
    ///
    /// # Errors
    /// `Port` if the device cannot be opened or configured.
    #[cfg(feature = "hardware")]
    pub fn open(
        port: &str,
        baud_rate: u32,
        read_timeout: Duration,
    ) -> Result<Self, AcquisitionError> {
        let mut serial = serial2::SerialPort::open(port, baud_rate)
            .map_err(|e| AcquisitionError::port(port, format!("failed to open: {e}")))?;
        serial
            .set_read_timeout(read_timeout)
            .map_err(|e| AcquisitionError::port(port, format!("failed to set read timeout: {e}")))?;

        info!(port, baud_rate, timeout_ms = read_timeout.as_millis() as u64, "serial port opened");

        Ok(Self {
            inner: LineSource::new(port, std::io::BufReader::new(serial)),
            baud_rate,
            virtual_port: false,
        })
    }

    /// Without hardware support every open attempt fails
    #[cfg(not(feature = "hardware"))]
    pub fn open(
        port: &str,
        baud_rate: u32,
        read_timeout: Duration,
    ) -> Result<Self, AcquisitionError> {
        let _ = (baud_rate, read_timeout);
        info!(port, "serial support disabled at build time");
        Err(AcquisitionError::port(
            port,
            "built without the `hardware` feature",
        ))
    }

    /// Open the port described by `config`
    pub fn from_config(config: &SerialConfig) -> Result<Self, AcquisitionError> {
        let mut source = Self::open(
            &config.port,
            config.baud_rate,
            Duration::from_millis(config.read_timeout_ms),
        )?;
        source.virtual_port = config.virtual_port;
        Ok(source)
    }

    pub fn port(&self) -> &str {
        self.inner.name()
    }

    pub fn baud_rate(&self) -> u32 {
        self.baud_rate
    }

    pub fn is_virtual(&self) -> bool {
        self.virtual_port
    }

    /// Shared line metrics of the underlying stream
    pub fn metrics(&self) -> std::sync::Arc<crate::LineMetrics> {
        self.inner.metrics()
    }
}

impl SampleSource for SerialLineSource {
    fn describe(&self) -> String {
        let suffix = if self.virtual_port { ", virtual" } else { "" };
        format!("{} @ {} baud{}", self.port(), self.baud_rate, suffix)
    }

    fn kind(&self) -> SourceKind {
        SourceKind::Real
    }

    fn read(&mut self) -> Result<SampleMatrix, AcquisitionError> {
        self.inner.read()
    }
}
