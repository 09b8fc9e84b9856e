//! Mock data source
//!
//! Drives the three simulated sensors with a shared square-wave reference and
//! assembles an N×4 sample matrix. Used for development without hardware.

use contracts::{
    AcquisitionError, MockConfig, SampleMatrix, SampleSource, SensorKind, SensorSet, SourceKind,
    CHANNEL_COUNT,
};
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::{debug, trace};

use crate::plant::SecondOrderModel;
use crate::sensor::Sensor;
use crate::signal::{linspace, square_wave};

/// One simulated channel: response model plus its noise stream
#[derive(Debug, Clone)]
struct SimulatedChannel {
    model: SecondOrderModel,
    sensor: Sensor,
}

/// Mock data source
///
/// `generate` returns the noiseless system response unless
/// `MockConfig::measurement_noise` is set, in which case each sensor's
/// random-walk stream is added sample by sample to its column.
pub struct MockDataSource {
    config: MockConfig,
    channels: Vec<SimulatedChannel>,
    rng: StdRng,
    runs: u64,
}

impl MockDataSource {
    /// Create a mock source with an explicit random source
    ///
    /// # Errors
    /// `InvalidParameter` for a non-positive duration or invalid sensor noise.
    pub fn new(
        config: MockConfig,
        sensors: &SensorSet,
        rng: StdRng,
    ) -> Result<Self, AcquisitionError> {
        if !config.duration_s.is_finite() || config.duration_s <= 0.0 {
            return Err(AcquisitionError::invalid_parameter(
                "mock.duration_s",
                format!("must be > 0, got {}", config.duration_s),
            ));
        }

        let channels = sensors
            .iter()
            .map(|(kind, cfg)| {
                Ok(SimulatedChannel {
                    model: SecondOrderModel::from_config(cfg),
                    sensor: Sensor::from_config(kind, cfg)?,
                })
            })
            .collect::<Result<Vec<_>, AcquisitionError>>()?;

        Ok(Self {
            config,
            channels,
            rng,
            runs: 0,
        })
    }

    /// Create a mock source seeded from `config.seed`, or from the OS if unset
    pub fn from_config(config: MockConfig, sensors: &SensorSet) -> Result<Self, AcquisitionError> {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };
        Self::new(config, sensors, rng)
    }

    pub fn config(&self) -> &MockConfig {
        &self.config
    }

    /// Sensor kinds in column order
    pub fn kinds(&self) -> Vec<SensorKind> {
        self.channels.iter().map(|c| c.sensor.kind()).collect()
    }

    /// Number of matrices generated so far
    pub fn runs(&self) -> u64 {
        self.runs
    }

    /// Simulate all sensors over the configured span
    pub fn generate(&mut self) -> Result<SampleMatrix, AcquisitionError> {
        let time = linspace(0.0, self.config.duration_s, self.config.sample_count);
        let reference = square_wave(
            &time,
            self.config.reference_frequency_hz,
            self.config.reference_amplitude,
        );

        let mut columns: Vec<Vec<f64>> = Vec::with_capacity(CHANNEL_COUNT);
        for channel in &mut self.channels {
            let mut response = channel.model.simulate(&time, &reference)?;

            if self.config.measurement_noise {
                for value in response.iter_mut() {
                    *value += channel.sensor.generate(&mut self.rng);
                }
            }

            trace!(
                sensor = %channel.sensor.kind(),
                samples = response.len(),
                "channel simulated"
            );
            columns.push(response);
        }
        columns.push(reference);

        let matrix = SampleMatrix::from_columns(&columns)?;
        self.runs += 1;

        debug!(
            rows = matrix.len(),
            duration_s = self.config.duration_s,
            noise = self.config.measurement_noise,
            run = self.runs,
            "mock matrix generated"
        );

        Ok(matrix)
    }
}

impl SampleSource for MockDataSource {
    fn describe(&self) -> String {
        format!(
            "mock ({} samples over {} s)",
            self.config.sample_count, self.config.duration_s
        )
    }

    fn kind(&self) -> SourceKind {
        SourceKind::Mock
    }

    fn read(&mut self) -> Result<SampleMatrix, AcquisitionError> {
        self.generate()
    }
}
