//! # Thermo Acq CLI
//!
//! Command-line entry point.
//!
//! Provides:
//! - Configuration loading and validation
//! - Acquisition runs with summaries and CSV/JSON output
//! - Raw mock data generation

mod cli;
mod commands;
mod output;
mod pipeline;

use anyhow::Result;
use clap::Parser;
use observability::ObservabilityConfig;
use tracing::debug;

use cli::{Cli, Commands};
use commands::{run_acquisition, run_info, run_simulate, run_validate};

fn main() -> Result<()> {
    // Load .env file if present
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    init_logging(&cli)?;

    debug!(version = env!("CARGO_PKG_VERSION"), "thermo-acq starting");

    let result = match &cli.command {
        Commands::Run(args) => run_acquisition(args),
        Commands::Validate(args) => run_validate(args),
        Commands::Info(args) => run_info(args),
        Commands::Simulate(args) => run_simulate(args),
    };

    if let Err(ref e) = result {
        tracing::error!(error = %e, "Command failed");
    }

    result
}

/// Initialize logging and the optional metrics exporter from CLI options
fn init_logging(cli: &Cli) -> Result<()> {
    observability::init_with_config(observability_config(cli))
}

fn observability_config(cli: &Cli) -> ObservabilityConfig {
    let default_log_level = if cli.quiet {
        "warn"
    } else {
        match cli.verbose {
            0 => "info",
            1 => "debug",
            _ => "trace",
        }
    };

    let metrics_port = match &cli.command {
        Commands::Run(args) if args.metrics_port != 0 => Some(args.metrics_port),
        _ => None,
    };

    ObservabilityConfig {
        log_format: cli.log_format.into(),
        metrics_port,
        default_log_level: default_log_level.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use observability::LogFormat;

    #[test]
    fn test_observability_config_from_flags() {
        let cli = Cli::try_parse_from([
            "thermo-acq",
            "-vv",
            "--log-format",
            "compact",
            "run",
            "--metrics-port",
            "9100",
        ])
        .unwrap();
        let config = observability_config(&cli);

        assert_eq!(config.default_log_level, "trace");
        assert_eq!(config.log_format, LogFormat::Compact);
        assert_eq!(config.metrics_port, Some(9100));
    }

    #[test]
    fn test_quiet_and_no_exporter_outside_run() {
        let cli = Cli::try_parse_from(["thermo-acq", "-q", "validate"]).unwrap();
        let config = observability_config(&cli);

        assert_eq!(config.default_log_level, "warn");
        assert_eq!(config.metrics_port, None);
    }
}
