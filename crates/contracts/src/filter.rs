//! Digital filter policy identifiers and settings.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::AcquisitionError;

/// Filtering policy applied before samples reach the cache
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FilterKind {
    /// Block-average downsampling
    BlockAverage,
    /// Butterworth low-pass IIR
    LowPass,
}

impl FilterKind {
    /// Identifier used in configuration files
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::BlockAverage => "promedio",
            Self::LowPass => "pasos_bajos",
        }
    }
}

impl fmt::Display for FilterKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FilterKind {
    type Err = AcquisitionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "promedio" | "block_average" | "average" => Ok(Self::BlockAverage),
            "pasos_bajos" | "low_pass" | "lowpass" => Ok(Self::LowPass),
            _ => Err(AcquisitionError::invalid_filter_type(s)),
        }
    }
}

/// Tunables for both filter policies
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FilterSettings {
    /// Samples per block for block-average
    #[serde(default = "default_block_size")]
    pub block_size: usize,

    /// Low-pass cutoff frequency (Hz)
    #[serde(default = "default_cutoff_hz")]
    pub cutoff_hz: f64,

    /// Low-pass Butterworth order
    #[serde(default = "default_order")]
    pub order: usize,
}

impl Default for FilterSettings {
    fn default() -> Self {
        Self {
            block_size: default_block_size(),
            cutoff_hz: default_cutoff_hz(),
            order: default_order(),
        }
    }
}

fn default_block_size() -> usize {
    10
}

fn default_cutoff_hz() -> f64 {
    10.0
}

fn default_order() -> usize {
    4
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_filter_kind_identifiers() {
        assert_eq!("promedio".parse::<FilterKind>().unwrap(), FilterKind::BlockAverage);
        assert_eq!("pasos_bajos".parse::<FilterKind>().unwrap(), FilterKind::LowPass);
        assert_eq!("low_pass".parse::<FilterKind>().unwrap(), FilterKind::LowPass);
        assert!(matches!(
            "kalman".parse::<FilterKind>(),
            Err(AcquisitionError::InvalidFilterType { .. })
        ));
    }

    #[test]
    fn test_display_round_trips() {
        for kind in [FilterKind::BlockAverage, FilterKind::LowPass] {
            assert_eq!(kind.to_string().parse::<FilterKind>().unwrap(), kind);
        }
    }
}
