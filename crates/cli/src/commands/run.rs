//! `run` command implementation.

use std::fs::File;

use acquisition::{AcquisitionConfig, AcquisitionController, SourceKind};
use anyhow::{Context, Result};
use tracing::info;

use crate::cli::RunArgs;
use crate::output::write_csv;
use crate::pipeline;

/// Execute the `run` command
pub fn run_acquisition(args: &RunArgs) -> Result<()> {
    info!(config = %args.config.display(), "Loading configuration");

    if !args.config.exists() {
        anyhow::bail!("Configuration file not found: {}", args.config.display());
    }

    let mut config = config_loader::ConfigLoader::load_from_path(&args.config)
        .with_context(|| format!("Failed to load config from {}", args.config.display()))?;

    apply_overrides(&mut config, args);
    config_loader::ConfigLoader::validate(&config)
        .context("Invalid configuration after CLI overrides")?;

    info!(
        mock = config.acquisition.mock,
        filter = %config.acquisition.filter,
        cache_capacity = config.acquisition.cache_capacity,
        sample_frequency_hz = config.acquisition.sample_frequency_hz,
        "Configuration loaded"
    );

    let mut controller =
        AcquisitionController::new(config).context("Failed to set up acquisition")?;

    let iterations = args.iterations.unwrap_or_else(|| match controller.mode() {
        SourceKind::Mock => 1,
        SourceKind::Real => controller.rolling_cache().capacity() as u64,
    });

    let stats = pipeline::run(&mut controller, iterations)?;

    if let Some(ref path) = args.output {
        let file = File::create(path)
            .with_context(|| format!("Failed to create {}", path.display()))?;
        write_csv(file, &stats.snapshot, None)?;
        info!(path = %path.display(), rows = stats.snapshot.len(), "Cache snapshot written");
    }

    if args.json {
        let json = serde_json::to_string_pretty(&stats.to_json())
            .context("Failed to serialize run summary")?;
        println!("{}", json);
    } else {
        stats.print_summary();
    }

    Ok(())
}

/// Apply CLI overrides on top of the loaded configuration
fn apply_overrides(config: &mut AcquisitionConfig, args: &RunArgs) {
    if args.mock {
        info!("Forcing mock mode from CLI");
        config.acquisition.mock = true;
    }
    if args.real {
        info!("Forcing real mode from CLI");
        config.acquisition.mock = false;
    }
    if let Some(ref filter) = args.filter {
        info!(filter = %filter, "Overriding filter from CLI");
        config.acquisition.filter = filter.clone();
    }
    if let Some(capacity) = args.cache_capacity {
        info!(capacity, "Overriding cache capacity from CLI");
        config.acquisition.cache_capacity = capacity;
    }
    if let Some(ref port) = args.port {
        info!(port = %port, "Overriding serial port from CLI");
        config.serial.port = port.clone();
    }
    if let Some(baud) = args.baud {
        info!(baud, "Overriding baud rate from CLI");
        config.serial.baud_rate = baud;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use contracts::FilterKind;

    fn run_args(argv: &[&str]) -> RunArgs {
        let mut full = vec!["thermo-acq", "run"];
        full.extend_from_slice(argv);
        match crate::cli::Cli::try_parse_from(full).unwrap().command {
            crate::cli::Commands::Run(args) => args,
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn test_overrides_applied() {
        let mut config = AcquisitionConfig::mock_defaults(FilterKind::BlockAverage, 100);
        let args = run_args(&[
            "--real",
            "--filter",
            "pasos_bajos",
            "--cache-capacity",
            "7",
            "--port",
            "/dev/ttyUSB1",
            "--baud",
            "115200",
        ]);
        apply_overrides(&mut config, &args);

        assert!(!config.acquisition.mock);
        assert_eq!(config.acquisition.filter, "pasos_bajos");
        assert_eq!(config.acquisition.cache_capacity, 7);
        assert_eq!(config.serial.port, "/dev/ttyUSB1");
        assert_eq!(config.serial.baud_rate, 115200);
    }

    #[test]
    fn test_no_overrides_keeps_config() {
        let mut config = AcquisitionConfig::mock_defaults(FilterKind::LowPass, 100);
        apply_overrides(&mut config, &run_args(&[]));
        assert!(config.acquisition.mock);
        assert_eq!(config.acquisition.filter, "pasos_bajos");
    }

    #[test]
    fn test_missing_config_file() {
        let args = run_args(&["--config", "/nonexistent/bench.toml"]);
        let err = run_acquisition(&args).unwrap_err();
        assert!(err.to_string().contains("not found"));
    }
}
