//! CLI argument definitions using clap.

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Thermo Acq - thermal sensor acquisition pipeline
#[derive(Parser, Debug)]
#[command(
    name = "thermo-acq",
    author,
    version,
    about = "Thermal sensor acquisition pipeline",
    long_about = "Acquires temperature sensor samples from a serial device or a simulated \n\
                  second-order sensor bench, filters them and keeps the most recent \n\
                  rows in a rolling cache."
)]
pub struct Cli {
    /// Increase logging verbosity (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true, env = "THERMO_ACQ_VERBOSE")]
    pub verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Log output format
    #[arg(
        long,
        value_enum,
        default_value = "pretty",
        global = true,
        env = "THERMO_ACQ_LOG_FORMAT"
    )]
    pub log_format: LogFormat,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available CLI commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run the acquisition pipeline
    Run(RunArgs),

    /// Validate configuration file without running
    Validate(ValidateArgs),

    /// Display configuration information
    Info(InfoArgs),

    /// Print one raw simulated run as CSV
    Simulate(SimulateArgs),
}

/// Arguments for the `run` command
#[derive(Parser, Debug, Clone)]
pub struct RunArgs {
    /// Path to configuration file (TOML or JSON)
    #[arg(
        short,
        long,
        default_value = "acquisition.toml",
        env = "THERMO_ACQ_CONFIG"
    )]
    pub config: PathBuf,

    /// Force mock mode
    #[arg(long, conflicts_with = "real")]
    pub mock: bool,

    /// Force real (serial) mode
    #[arg(long)]
    pub real: bool,

    /// Override filter identifier (promedio | pasos_bajos)
    #[arg(long, env = "THERMO_ACQ_FILTER")]
    pub filter: Option<String>,

    /// Override cache capacity (rows)
    #[arg(long)]
    pub cache_capacity: Option<usize>,

    /// Override serial port
    #[arg(long, env = "THERMO_ACQ_PORT")]
    pub port: Option<String>,

    /// Override serial baud rate
    #[arg(long, env = "THERMO_ACQ_BAUD")]
    pub baud: Option<u32>,

    /// Acquisition cycles to run (default: 1 in mock mode, cache capacity in real mode)
    #[arg(long)]
    pub iterations: Option<u64>,

    /// Write the final cache snapshot to a CSV file
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Print summary and snapshot as JSON
    #[arg(long)]
    pub json: bool,

    /// Metrics server port (0 = disabled)
    #[arg(long, default_value = "0", env = "THERMO_ACQ_METRICS_PORT")]
    pub metrics_port: u16,
}

/// Arguments for the `validate` command
#[derive(Parser, Debug)]
pub struct ValidateArgs {
    /// Path to configuration file to validate
    #[arg(short, long, default_value = "acquisition.toml")]
    pub config: PathBuf,

    /// Output validation result as JSON
    #[arg(long)]
    pub json: bool,
}

/// Arguments for the `info` command
#[derive(Parser, Debug)]
pub struct InfoArgs {
    /// Path to configuration file
    #[arg(short, long, default_value = "acquisition.toml")]
    pub config: PathBuf,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,

    /// Show simulated sensor parameters
    #[arg(long)]
    pub sensors: bool,
}

/// Arguments for the `simulate` command
#[derive(Parser, Debug)]
pub struct SimulateArgs {
    /// Optional configuration file supplying mock and sensor parameters
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Number of samples
    #[arg(long)]
    pub samples: Option<usize>,

    /// Simulated duration in seconds
    #[arg(long)]
    pub duration: Option<f64>,

    /// Seed for the noise streams
    #[arg(long)]
    pub seed: Option<u64>,

    /// Add each sensor's random-walk noise
    #[arg(long)]
    pub noise: bool,
}

/// Log output format
#[derive(ValueEnum, Clone, Copy, Debug, Default)]
pub enum LogFormat {
    /// JSON structured logging
    Json,
    /// Human-readable pretty format
    #[default]
    Pretty,
    /// Compact single-line format
    Compact,
}

impl From<LogFormat> for observability::LogFormat {
    fn from(format: LogFormat) -> Self {
        match format {
            LogFormat::Json => Self::Json,
            LogFormat::Pretty => Self::Pretty,
            LogFormat::Compact => Self::Compact,
        }
    }
}
