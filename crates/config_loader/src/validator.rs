//! Configuration validation
//!
//! Rules:
//! - filter identifier is known
//! - cache capacity, sample frequency, block size and order are positive
//! - low-pass cutoff lies strictly below Nyquist
//! - mock run has samples and a positive duration
//! - sensor parameters are finite, time constants non-zero, noise non-negative
//! - serial baud rate is positive

use contracts::{AcquisitionConfig, AcquisitionError, FilterKind, SensorConfig};

/// Validate an `AcquisitionConfig`
///
/// Returns the first error encountered, or Ok(()).
pub fn validate(config: &AcquisitionConfig) -> Result<(), AcquisitionError> {
    validate_acquisition(config)?;
    validate_filter(config)?;
    validate_mock(config)?;
    validate_sensors(config)?;
    validate_serial(config)?;
    Ok(())
}

fn validate_acquisition(config: &AcquisitionConfig) -> Result<(), AcquisitionError> {
    let acq = &config.acquisition;

    if acq.cache_capacity == 0 {
        return Err(AcquisitionError::config_validation(
            "acquisition.cache_capacity",
            "cache_capacity must be > 0",
        ));
    }

    if !acq.sample_frequency_hz.is_finite() || acq.sample_frequency_hz <= 0.0 {
        return Err(AcquisitionError::config_validation(
            "acquisition.sample_frequency_hz",
            format!("sample_frequency_hz must be > 0, got {}", acq.sample_frequency_hz),
        ));
    }

    Ok(())
}

fn validate_filter(config: &AcquisitionConfig) -> Result<(), AcquisitionError> {
    // unknown identifiers keep their own error kind
    let kind = config.filter_kind()?;
    let filter = &config.filter;

    match kind {
        FilterKind::BlockAverage => {
            if filter.block_size == 0 {
                return Err(AcquisitionError::config_validation(
                    "filter.block_size",
                    "block_size must be > 0",
                ));
            }
        }
        FilterKind::LowPass => {
            if filter.order == 0 {
                return Err(AcquisitionError::config_validation(
                    "filter.order",
                    "order must be > 0",
                ));
            }
            let nyquist = config.acquisition.sample_frequency_hz / 2.0;
            if !filter.cutoff_hz.is_finite()
                || filter.cutoff_hz <= 0.0
                || filter.cutoff_hz >= nyquist
            {
                return Err(AcquisitionError::config_validation(
                    "filter.cutoff_hz",
                    format!(
                        "cutoff_hz must satisfy 0 < cutoff_hz < {nyquist} (Nyquist), got {}",
                        filter.cutoff_hz
                    ),
                ));
            }
        }
    }

    Ok(())
}

fn validate_mock(config: &AcquisitionConfig) -> Result<(), AcquisitionError> {
    let mock = &config.mock;

    if mock.sample_count == 0 {
        return Err(AcquisitionError::config_validation(
            "mock.sample_count",
            "sample_count must be > 0",
        ));
    }

    if !mock.duration_s.is_finite() || mock.duration_s <= 0.0 {
        return Err(AcquisitionError::config_validation(
            "mock.duration_s",
            format!("duration_s must be > 0, got {}", mock.duration_s),
        ));
    }

    if !mock.reference_frequency_hz.is_finite() || !mock.reference_amplitude.is_finite() {
        return Err(AcquisitionError::config_validation(
            "mock.reference",
            "reference frequency and amplitude must be finite",
        ));
    }

    Ok(())
}

fn validate_sensors(config: &AcquisitionConfig) -> Result<(), AcquisitionError> {
    for (kind, sensor) in config.sensors.iter() {
        validate_sensor(&format!("sensors.{kind}"), sensor)?;
    }
    Ok(())
}

fn validate_sensor(field: &str, sensor: &SensorConfig) -> Result<(), AcquisitionError> {
    let params = [
        ("natural_freq", sensor.natural_freq),
        ("damping_ratio", sensor.damping_ratio),
        ("gain", sensor.gain),
        ("time_constant", sensor.time_constant),
        ("dead_time", sensor.dead_time),
        ("noise_std", sensor.noise_std),
    ];
    if let Some((name, value)) = params.iter().find(|(_, v)| !v.is_finite()) {
        return Err(AcquisitionError::config_validation(
            format!("{field}.{name}"),
            format!("{name} must be finite, got {value}"),
        ));
    }

    if sensor.time_constant == 0.0 {
        return Err(AcquisitionError::config_validation(
            format!("{field}.time_constant"),
            "time_constant must be non-zero",
        ));
    }

    if sensor.noise_std < 0.0 {
        return Err(AcquisitionError::config_validation(
            format!("{field}.noise_std"),
            format!("noise_std must be >= 0, got {}", sensor.noise_std),
        ));
    }

    Ok(())
}

fn validate_serial(config: &AcquisitionConfig) -> Result<(), AcquisitionError> {
    if config.serial.baud_rate == 0 {
        return Err(AcquisitionError::config_validation(
            "serial.baud_rate",
            "baud_rate must be > 0",
        ));
    }

    if !config.acquisition.mock && config.serial.port.trim().is_empty() {
        return Err(AcquisitionError::config_validation(
            "serial.port",
            "port cannot be empty in real mode",
        ));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn minimal_config() -> AcquisitionConfig {
        AcquisitionConfig::mock_defaults(FilterKind::BlockAverage, 100)
    }

    #[test]
    fn test_valid_config() {
        assert!(validate(&minimal_config()).is_ok());
    }

    #[test]
    fn test_zero_cache_capacity() {
        let mut config = minimal_config();
        config.acquisition.cache_capacity = 0;
        let err = validate(&config).unwrap_err();
        assert!(err.to_string().contains("cache_capacity"));
    }

    #[test]
    fn test_unknown_filter_keeps_error_kind() {
        let mut config = minimal_config();
        config.acquisition.filter = "median".into();
        assert!(matches!(
            validate(&config),
            Err(AcquisitionError::InvalidFilterType { .. })
        ));
    }

    #[test]
    fn test_cutoff_at_nyquist() {
        let mut config = AcquisitionConfig::mock_defaults(FilterKind::LowPass, 100);
        config.acquisition.sample_frequency_hz = 20.0;
        let err = validate(&config).unwrap_err();
        assert!(err.to_string().contains("filter.cutoff_hz"));

        // block average does not care about the cutoff
        config.acquisition.filter = "promedio".into();
        assert!(validate(&config).is_ok());
    }

    #[test]
    fn test_zero_time_constant() {
        let mut config = minimal_config();
        config.sensors.surface.time_constant = 0.0;
        let err = validate(&config).unwrap_err();
        assert!(err.to_string().contains("sensors.surface.time_constant"));
    }

    #[test]
    fn test_negative_noise() {
        let mut config = minimal_config();
        config.sensors.thermocouple.noise_std = -0.1;
        assert!(validate(&config).is_err());
    }

    #[test]
    fn test_non_finite_parameter() {
        let mut config = minimal_config();
        config.sensors.resistance.gain = f64::NAN;
        let err = validate(&config).unwrap_err();
        assert!(err.to_string().contains("sensors.resistance.gain"));
    }

    #[test]
    fn test_mock_duration() {
        let mut config = minimal_config();
        config.mock.duration_s = 0.0;
        assert!(validate(&config).is_err());
    }

    #[test]
    fn test_empty_port_only_matters_in_real_mode() {
        let mut config = minimal_config();
        config.serial.port = String::new();
        assert!(validate(&config).is_ok());

        config.acquisition.mock = false;
        assert!(validate(&config).is_err());
    }
}
