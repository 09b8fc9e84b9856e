//! AcquisitionConfig - Config Loader output
//!
//! Describes the complete acquisition setup: serial link, acquisition mode,
//! filter policy, mock signal generation and sensor parameters.

use serde::{Deserialize, Serialize};

use crate::{AcquisitionError, FilterKind, FilterSettings, SensorSet};

/// Configuration version
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ConfigVersion {
    #[default]
    V1,
}

/// Complete acquisition configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AcquisitionConfig {
    /// Configuration version
    #[serde(default)]
    pub version: ConfigVersion,

    /// Serial link settings (ignored in mock mode)
    #[serde(default)]
    pub serial: SerialConfig,

    /// Acquisition mode, filter and cache
    pub acquisition: AcquisitionSettings,

    /// Filter tunables
    #[serde(default)]
    pub filter: FilterSettings,

    /// Mock data generation
    #[serde(default)]
    pub mock: MockConfig,

    /// Simulated sensor parameters
    #[serde(default)]
    pub sensors: SensorSet,
}

impl AcquisitionConfig {
    /// Mock-mode configuration with every default filled in
    pub fn mock_defaults(filter: FilterKind, cache_capacity: usize) -> Self {
        Self {
            version: ConfigVersion::V1,
            serial: SerialConfig::default(),
            acquisition: AcquisitionSettings {
                sample_frequency_hz: default_sample_frequency_hz(),
                filter: filter.as_str().to_string(),
                cache_capacity,
                mock: true,
            },
            filter: FilterSettings::default(),
            mock: MockConfig::default(),
            sensors: SensorSet::default(),
        }
    }

    /// Parse the configured filter identifier
    ///
    /// # Errors
    /// `InvalidFilterType` for unknown identifiers.
    pub fn filter_kind(&self) -> Result<FilterKind, AcquisitionError> {
        self.acquisition.filter.parse()
    }
}

/// Serial port settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SerialConfig {
    /// Port identifier (e.g. "/dev/ttyACM0", "COM3")
    #[serde(default = "default_port")]
    pub port: String,

    /// Baud rate
    #[serde(default = "default_baud_rate")]
    pub baud_rate: u32,

    /// Whether the port is a virtual (pty) device. Informational only.
    #[serde(default)]
    pub virtual_port: bool,

    /// Read timeout in milliseconds
    #[serde(default = "default_read_timeout_ms")]
    pub read_timeout_ms: u64,
}

impl Default for SerialConfig {
    fn default() -> Self {
        Self {
            port: default_port(),
            baud_rate: default_baud_rate(),
            virtual_port: false,
            read_timeout_ms: default_read_timeout_ms(),
        }
    }
}

fn default_port() -> String {
    "/dev/ttyACM0".to_string()
}

fn default_baud_rate() -> u32 {
    9600
}

fn default_read_timeout_ms() -> u64 {
    1000
}

/// Acquisition mode and pipeline settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AcquisitionSettings {
    /// Sample frequency (Hz), used by the low-pass design
    #[serde(default = "default_sample_frequency_hz")]
    pub sample_frequency_hz: f64,

    /// Filter identifier ("promedio" or "pasos_bajos")
    pub filter: String,

    /// Cache capacity in rows
    pub cache_capacity: usize,

    /// Use the simulated data source instead of the serial port
    #[serde(default)]
    pub mock: bool,
}

fn default_sample_frequency_hz() -> f64 {
    100.0
}

/// Mock data generation settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MockConfig {
    /// Number of samples per generated matrix
    #[serde(default = "default_sample_count")]
    pub sample_count: usize,

    /// Simulated span in seconds, starting at 0
    #[serde(default = "default_duration_s")]
    pub duration_s: f64,

    /// Square-wave reference frequency (Hz)
    #[serde(default = "default_reference_frequency_hz")]
    pub reference_frequency_hz: f64,

    /// Square-wave reference amplitude
    #[serde(default = "default_reference_amplitude")]
    pub reference_amplitude: f64,

    /// Add each sensor's random-walk noise to its simulated response
    #[serde(default)]
    pub measurement_noise: bool,

    /// Seed for the noise stream (None = seeded from the OS)
    #[serde(default)]
    pub seed: Option<u64>,
}

impl Default for MockConfig {
    fn default() -> Self {
        Self {
            sample_count: default_sample_count(),
            duration_s: default_duration_s(),
            reference_frequency_hz: default_reference_frequency_hz(),
            reference_amplitude: default_reference_amplitude(),
            measurement_noise: false,
            seed: None,
        }
    }
}

fn default_sample_count() -> usize {
    10_000
}

fn default_duration_s() -> f64 {
    100.0
}

fn default_reference_frequency_hz() -> f64 {
    0.2
}

fn default_reference_amplitude() -> f64 {
    1.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_minimal_json_fills_defaults() {
        let json = r#"{ "acquisition": { "filter": "promedio", "cache_capacity": 100 } }"#;
        let config: AcquisitionConfig = serde_json::from_str(json).unwrap();

        assert!(!config.acquisition.mock);
        assert_eq!(config.acquisition.sample_frequency_hz, 100.0);
        assert_eq!(config.serial.baud_rate, 9600);
        assert_eq!(config.mock.sample_count, 10_000);
        assert_eq!(config.filter.block_size, 10);
        assert_eq!(config.sensors.thermocouple.natural_freq, 10.0);
        assert_eq!(config.filter_kind().unwrap(), FilterKind::BlockAverage);
    }

    #[test]
    fn test_unknown_filter_surfaces_on_parse() {
        let mut config = AcquisitionConfig::mock_defaults(FilterKind::LowPass, 10);
        config.acquisition.filter = "median".to_string();
        assert!(matches!(
            config.filter_kind(),
            Err(AcquisitionError::InvalidFilterType { .. })
        ));
    }
}
