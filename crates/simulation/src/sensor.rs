//! Simulated sensor with a random-walk noise stream.

use contracts::{AcquisitionError, SensorConfig, SensorKind};
use rand::Rng;
use rand_distr::{Distribution, Normal};
use tracing::trace;

/// Stateful noise stream for one sensor
///
/// Every call to [`Sensor::generate`] adds a fresh `N(0, σ)` draw to the
/// current value and keeps the result, so noise accumulates across calls
/// until [`Sensor::reset`].
#[derive(Debug, Clone)]
pub struct Sensor {
    kind: SensorKind,
    noise: Normal<f64>,
    current_value: f64,
}

impl Sensor {
    /// Create a sensor with the given noise standard deviation
    ///
    /// # Errors
    /// `InvalidParameter` if `noise_std` is negative or not finite.
    pub fn new(kind: SensorKind, noise_std: f64) -> Result<Self, AcquisitionError> {
        if !noise_std.is_finite() || noise_std < 0.0 {
            return Err(AcquisitionError::invalid_parameter(
                "noise_std",
                format!("must be finite and >= 0, got {noise_std}"),
            ));
        }
        let noise = Normal::new(0.0, noise_std)
            .map_err(|e| AcquisitionError::invalid_parameter("noise_std", e.to_string()))?;

        Ok(Self {
            kind,
            noise,
            current_value: 0.0,
        })
    }

    /// Create a sensor from a textual kind identifier
    ///
    /// # Errors
    /// `InvalidSensorType` for unknown identifiers.
    pub fn from_identifier(identifier: &str, noise_std: f64) -> Result<Self, AcquisitionError> {
        let kind: SensorKind = identifier.parse()?;
        Self::new(kind, noise_std)
    }

    /// Create a sensor using the noise level of `config`
    pub fn from_config(kind: SensorKind, config: &SensorConfig) -> Result<Self, AcquisitionError> {
        Self::new(kind, config.noise_std)
    }

    pub fn kind(&self) -> SensorKind {
        self.kind
    }

    pub fn noise_std(&self) -> f64 {
        self.noise.std_dev()
    }

    pub fn current_value(&self) -> f64 {
        self.current_value
    }

    /// Draw the next reading: `current + N(0, σ)`, which becomes the new current value
    pub fn generate<R: Rng + ?Sized>(&mut self, rng: &mut R) -> f64 {
        let value = self.current_value + self.noise.sample(rng);
        self.current_value = value;
        trace!(sensor = %self.kind, value, "sensor reading");
        value
    }

    /// Return the accumulated state to zero
    pub fn reset(&mut self) {
        self.current_value = 0.0;
    }
}
