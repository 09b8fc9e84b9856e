//! Sensor kinds and their simulation parameters.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::AcquisitionError;

/// Simulated sensor kind
///
/// Column order in every sample matrix follows [`SensorKind::ALL`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SensorKind {
    /// Thermocouple junction
    Thermocouple,
    /// Resistance thermometer (RTD)
    Resistance,
    /// Surface contact probe
    Surface,
}

impl SensorKind {
    /// All kinds in channel order
    pub const ALL: [SensorKind; 3] = [Self::Thermocouple, Self::Resistance, Self::Surface];

    /// Canonical identifier
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Thermocouple => "thermocouple",
            Self::Resistance => "resistance",
            Self::Surface => "surface",
        }
    }

    /// Default measurement noise standard deviation
    pub fn default_noise_std(&self) -> f64 {
        match self {
            Self::Thermocouple => 0.01,
            Self::Resistance => 0.02,
            Self::Surface => 0.03,
        }
    }

    /// Default second-order response parameters for this kind
    pub fn default_config(&self) -> SensorConfig {
        let (natural_freq, damping_ratio, gain) = match self {
            Self::Thermocouple => (10.0, 0.5, 1.0),
            Self::Resistance => (20.0, 0.6, 2.0),
            Self::Surface => (30.0, 0.7, 0.5),
        };
        SensorConfig {
            natural_freq,
            damping_ratio,
            gain,
            time_constant: 1.0,
            dead_time: 0.0,
            noise_std: self.default_noise_std(),
        }
    }
}

impl fmt::Display for SensorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SensorKind {
    type Err = AcquisitionError;

    /// Accepts the canonical names and the lab's Spanish identifiers.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "thermocouple" | "termocupla" => Ok(Self::Thermocouple),
            "resistance" | "resistencia" => Ok(Self::Resistance),
            "surface" | "superficie" => Ok(Self::Surface),
            _ => Err(AcquisitionError::invalid_sensor_type(s)),
        }
    }
}

/// Second-order response parameters of one sensor
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SensorConfig {
    /// Natural frequency ωn (rad/s)
    pub natural_freq: f64,

    /// Damping ratio ζ
    pub damping_ratio: f64,

    /// Static gain Kp
    pub gain: f64,

    /// Time constant τ (s)
    pub time_constant: f64,

    /// Dead time θ (s). Accepted for completeness, not used by the model.
    #[serde(default)]
    pub dead_time: f64,

    /// Measurement noise standard deviation
    pub noise_std: f64,
}

/// Parameters for the three simulated sensors
///
/// Each section is deserialized field by field over that kind's defaults, so
/// `[sensors.thermocouple]` with only `natural_freq` keeps the rest.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "SensorSetOverrides")]
pub struct SensorSet {
    pub thermocouple: SensorConfig,
    pub resistance: SensorConfig,
    pub surface: SensorConfig,
}

impl SensorSet {
    /// Config for a given kind
    pub fn get(&self, kind: SensorKind) -> &SensorConfig {
        match kind {
            SensorKind::Thermocouple => &self.thermocouple,
            SensorKind::Resistance => &self.resistance,
            SensorKind::Surface => &self.surface,
        }
    }

    /// (kind, config) pairs in channel order
    pub fn iter(&self) -> impl Iterator<Item = (SensorKind, &SensorConfig)> {
        SensorKind::ALL.into_iter().map(move |k| (k, self.get(k)))
    }
}

impl Default for SensorSet {
    fn default() -> Self {
        Self {
            thermocouple: SensorKind::Thermocouple.default_config(),
            resistance: SensorKind::Resistance.default_config(),
            surface: SensorKind::Surface.default_config(),
        }
    }
}

/// Partial sensor section as written in a config file
#[derive(Debug, Clone, Copy, Default, Deserialize)]
struct SensorOverride {
    natural_freq: Option<f64>,
    damping_ratio: Option<f64>,
    gain: Option<f64>,
    time_constant: Option<f64>,
    dead_time: Option<f64>,
    noise_std: Option<f64>,
}

impl SensorOverride {
    fn resolve(self, kind: SensorKind) -> SensorConfig {
        let base = kind.default_config();
        SensorConfig {
            natural_freq: self.natural_freq.unwrap_or(base.natural_freq),
            damping_ratio: self.damping_ratio.unwrap_or(base.damping_ratio),
            gain: self.gain.unwrap_or(base.gain),
            time_constant: self.time_constant.unwrap_or(base.time_constant),
            dead_time: self.dead_time.unwrap_or(base.dead_time),
            noise_std: self.noise_std.unwrap_or(base.noise_std),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
struct SensorSetOverrides {
    #[serde(default)]
    thermocouple: SensorOverride,
    #[serde(default)]
    resistance: SensorOverride,
    #[serde(default)]
    surface: SensorOverride,
}

impl From<SensorSetOverrides> for SensorSet {
    fn from(overrides: SensorSetOverrides) -> Self {
        Self {
            thermocouple: overrides.thermocouple.resolve(SensorKind::Thermocouple),
            resistance: overrides.resistance.resolve(SensorKind::Resistance),
            surface: overrides.surface.resolve(SensorKind::Surface),
        }
    }
}
