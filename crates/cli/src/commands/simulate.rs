//! `simulate` command implementation.

use std::io;

use anyhow::{Context, Result};
use contracts::{MockConfig, SensorSet};
use simulation::{linspace, MockDataSource};
use tracing::info;

use crate::cli::SimulateArgs;
use crate::output::write_csv;

/// Execute the `simulate` command
///
/// Prints the unfiltered mock matrix with a leading time column.
pub fn run_simulate(args: &SimulateArgs) -> Result<()> {
    let (mut mock, sensors) = match args.config {
        Some(ref path) => {
            let config = config_loader::ConfigLoader::load_from_path(path)
                .with_context(|| format!("Failed to load config from {}", path.display()))?;
            (config.mock, config.sensors)
        }
        None => (MockConfig::default(), SensorSet::default()),
    };
    apply_overrides(&mut mock, args);
    anyhow::ensure!(mock.sample_count > 0, "--samples must be > 0");

    info!(
        samples = mock.sample_count,
        duration_s = mock.duration_s,
        seed = ?mock.seed,
        noise = mock.measurement_noise,
        "Simulating mock run"
    );

    let time = linspace(0.0, mock.duration_s, mock.sample_count);
    let mut source = MockDataSource::from_config(mock, &sensors)?;
    let matrix = source.generate()?;

    write_csv(io::stdout().lock(), &matrix, Some(&time))
}

fn apply_overrides(mock: &mut MockConfig, args: &SimulateArgs) {
    if let Some(samples) = args.samples {
        mock.sample_count = samples;
    }
    if let Some(duration) = args.duration {
        mock.duration_s = duration;
    }
    if args.seed.is_some() {
        mock.seed = args.seed;
    }
    if args.noise {
        mock.measurement_noise = true;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_overrides() {
        let mut mock = MockConfig::default();
        let args = SimulateArgs {
            config: None,
            samples: Some(50),
            duration: Some(0.5),
            seed: Some(3),
            noise: true,
        };
        apply_overrides(&mut mock, &args);
        assert_eq!(mock.sample_count, 50);
        assert_eq!(mock.duration_s, 0.5);
        assert_eq!(mock.seed, Some(3));
        assert!(mock.measurement_noise);
    }

    #[test]
    fn test_defaults_untouched() {
        let mut mock = MockConfig::default();
        let args = SimulateArgs {
            config: None,
            samples: None,
            duration: None,
            seed: None,
            noise: false,
        };
        apply_overrides(&mut mock, &args);
        assert_eq!(mock, MockConfig::default());
    }
}
