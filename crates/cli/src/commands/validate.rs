//! `validate` command implementation.

use anyhow::{Context, Result};
use contracts::{AcquisitionConfig, FilterKind};
use serde::Serialize;
use tracing::info;

use crate::cli::ValidateArgs;

/// Validation result for JSON output
#[derive(Serialize)]
struct ValidationResult {
    valid: bool,
    config_path: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    warnings: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    summary: Option<ConfigSummary>,
}

#[derive(Serialize)]
struct ConfigSummary {
    version: String,
    mode: &'static str,
    filter: String,
    cache_capacity: usize,
    sample_frequency_hz: f64,
}

/// Execute the `validate` command
pub fn run_validate(args: &ValidateArgs) -> Result<()> {
    info!(config = %args.config.display(), "Validating configuration");

    let result = validate_config(args);

    if args.json {
        let json = serde_json::to_string_pretty(&result)
            .context("Failed to serialize validation result")?;
        println!("{}", json);
    } else {
        print_validation_result(&result);
    }

    if result.valid {
        Ok(())
    } else {
        anyhow::bail!("Configuration validation failed")
    }
}

fn validate_config(args: &ValidateArgs) -> ValidationResult {
    let config_path = args.config.display().to_string();

    if !args.config.exists() {
        return ValidationResult {
            valid: false,
            config_path,
            error: Some(format!("File not found: {}", args.config.display())),
            warnings: None,
            summary: None,
        };
    }

    match config_loader::ConfigLoader::load_from_path(&args.config) {
        Ok(config) => {
            let warnings = collect_warnings(&config);

            ValidationResult {
                valid: true,
                config_path,
                error: None,
                warnings: if warnings.is_empty() {
                    None
                } else {
                    Some(warnings)
                },
                summary: Some(ConfigSummary {
                    version: format!("{:?}", config.version),
                    mode: if config.acquisition.mock { "mock" } else { "real" },
                    filter: config.acquisition.filter.clone(),
                    cache_capacity: config.acquisition.cache_capacity,
                    sample_frequency_hz: config.acquisition.sample_frequency_hz,
                }),
            }
        }
        Err(e) => ValidationResult {
            valid: false,
            config_path,
            error: Some(e.to_string()),
            warnings: None,
            summary: None,
        },
    }
}

/// Collect configuration warnings (non-fatal issues)
fn collect_warnings(config: &AcquisitionConfig) -> Vec<String> {
    let mut warnings = Vec::new();
    let acq = &config.acquisition;

    if acq.mock {
        // rows a single mock run delivers after filtering
        let produced = match config.filter_kind() {
            Ok(FilterKind::BlockAverage) => {
                config.mock.sample_count.div_ceil(config.filter.block_size.max(1))
            }
            _ => config.mock.sample_count,
        };
        if produced > acq.cache_capacity {
            warnings.push(format!(
                "A mock run yields {produced} filtered rows but the cache holds {}; \
                 older rows will be discarded",
                acq.cache_capacity
            ));
        }

        let grid_rate = config.mock.sample_count.saturating_sub(1) as f64 / config.mock.duration_s;
        if (grid_rate - acq.sample_frequency_hz).abs() > 0.01 * acq.sample_frequency_hz {
            warnings.push(format!(
                "Mock grid rate ({grid_rate:.2} Hz) differs from sample_frequency_hz ({} Hz)",
                acq.sample_frequency_hz
            ));
        }

        if config.mock.measurement_noise && config.mock.seed.is_none() {
            warnings.push(
                "mock.measurement_noise is enabled without a seed - runs are not reproducible"
                    .to_string(),
            );
        }
    } else if config.serial.virtual_port {
        warnings.push(format!(
            "serial.virtual_port is set for real mode on {}",
            config.serial.port
        ));
    }

    for (kind, sensor) in config.sensors.iter() {
        if sensor.dead_time != 0.0 {
            warnings.push(format!("sensors.{kind}.dead_time is not modelled and will be ignored"));
        }
    }

    warnings
}

fn print_validation_result(result: &ValidationResult) {
    if result.valid {
        println!("✓ Configuration is valid: {}", result.config_path);

        if let Some(ref summary) = result.summary {
            println!("\n  Version: {}", summary.version);
            println!("  Mode: {}", summary.mode);
            println!("  Filter: {}", summary.filter);
            println!("  Cache capacity: {}", summary.cache_capacity);
            println!("  Sample frequency: {} Hz", summary.sample_frequency_hz);
        }

        if let Some(ref warnings) = result.warnings {
            println!("\n⚠ Warnings:");
            for warning in warnings {
                println!("  - {}", warning);
            }
        }
    } else {
        println!("✗ Configuration is invalid: {}", result.config_path);
        if let Some(ref error) = result.error {
            println!("\n  Error: {}", error);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_mock_config_warns_about_capacity() {
        let config = AcquisitionConfig::mock_defaults(FilterKind::BlockAverage, 100);
        let warnings = collect_warnings(&config);
        // 10000 samples → 1000 block means
        assert!(warnings.iter().any(|w| w.contains("1000 filtered rows")));
        // 9999 / 100 s is within 1% of 100 Hz
        assert!(!warnings.iter().any(|w| w.contains("grid rate")));
    }

    #[test]
    fn test_dead_time_warning() {
        let mut config = AcquisitionConfig::mock_defaults(FilterKind::BlockAverage, 10_000);
        config.sensors.surface.dead_time = 0.5;
        let warnings = collect_warnings(&config);
        assert_eq!(warnings.len(), 1);
        assert!(warnings[0].contains("sensors.surface.dead_time"));
    }

    #[test]
    fn test_validate_file() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(
            file,
            "[acquisition]\nfilter = \"promedio\"\ncache_capacity = 1000\nmock = true"
        )
        .unwrap();

        let args = ValidateArgs {
            config: file.path().to_path_buf(),
            json: true,
        };
        let result = validate_config(&args);
        assert!(result.valid);
        assert_eq!(result.summary.unwrap().mode, "mock");
    }

    #[test]
    fn test_validate_reports_error() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(file, "[acquisition]\nfilter = \"median\"\ncache_capacity = 10").unwrap();

        let args = ValidateArgs {
            config: file.path().to_path_buf(),
            json: false,
        };
        let result = validate_config(&args);
        assert!(!result.valid);
        assert!(result.error.unwrap().contains("median"));
    }
}
