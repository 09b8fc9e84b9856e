//! `info` command implementation.

use anyhow::{Context, Result};
use contracts::{AcquisitionConfig, SensorConfig};
use serde::Serialize;
use tracing::info;

use crate::cli::InfoArgs;

/// Configuration info for JSON output
#[derive(Serialize)]
struct ConfigInfo {
    version: String,
    mode: &'static str,
    serial: SerialInfo,
    acquisition: AcquisitionInfo,
    mock: contracts::MockConfig,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    sensors: Vec<SensorInfo>,
}

#[derive(Serialize)]
struct SerialInfo {
    port: String,
    baud_rate: u32,
    virtual_port: bool,
    read_timeout_ms: u64,
}

#[derive(Serialize)]
struct AcquisitionInfo {
    sample_frequency_hz: f64,
    filter: String,
    filter_settings: contracts::FilterSettings,
    cache_capacity: usize,
}

#[derive(Serialize)]
struct SensorInfo {
    kind: String,
    #[serde(flatten)]
    params: SensorConfig,
}

/// Execute the `info` command
pub fn run_info(args: &InfoArgs) -> Result<()> {
    info!(config = %args.config.display(), "Loading configuration info");

    if !args.config.exists() {
        anyhow::bail!("Configuration file not found: {}", args.config.display());
    }

    let config = config_loader::ConfigLoader::load_from_path(&args.config)
        .with_context(|| format!("Failed to load config from {}", args.config.display()))?;

    if args.json {
        let info = build_config_info(&config, args);
        let json =
            serde_json::to_string_pretty(&info).context("Failed to serialize config info")?;
        println!("{}", json);
    } else {
        print_config_info(&config, args);
    }

    Ok(())
}

fn build_config_info(config: &AcquisitionConfig, args: &InfoArgs) -> ConfigInfo {
    let sensors = if args.sensors {
        config
            .sensors
            .iter()
            .map(|(kind, params)| SensorInfo {
                kind: kind.to_string(),
                params: *params,
            })
            .collect()
    } else {
        Vec::new()
    };

    ConfigInfo {
        version: format!("{:?}", config.version),
        mode: if config.acquisition.mock { "mock" } else { "real" },
        serial: SerialInfo {
            port: config.serial.port.clone(),
            baud_rate: config.serial.baud_rate,
            virtual_port: config.serial.virtual_port,
            read_timeout_ms: config.serial.read_timeout_ms,
        },
        acquisition: AcquisitionInfo {
            sample_frequency_hz: config.acquisition.sample_frequency_hz,
            filter: config.acquisition.filter.clone(),
            filter_settings: config.filter,
            cache_capacity: config.acquisition.cache_capacity,
        },
        mock: config.mock.clone(),
        sensors,
    }
}

fn print_config_info(config: &AcquisitionConfig, args: &InfoArgs) {
    println!("╔══════════════════════════════════════════════════════════════╗");
    println!("║               Thermo Acq Configuration                       ║");
    println!("╚══════════════════════════════════════════════════════════════╝\n");

    let acq = &config.acquisition;
    println!("⚙️  Acquisition");
    println!("   ├─ Version: {:?}", config.version);
    println!("   ├─ Mode: {}", if acq.mock { "mock" } else { "real" });
    println!("   ├─ Sample frequency: {} Hz", acq.sample_frequency_hz);
    println!("   ├─ Filter: {}", acq.filter);
    println!(
        "   │   └─ block_size={}, cutoff={} Hz, order={}",
        config.filter.block_size, config.filter.cutoff_hz, config.filter.order
    );
    println!("   └─ Cache capacity: {} rows", acq.cache_capacity);

    let serial = &config.serial;
    println!("\n🔌 Serial");
    println!("   ├─ Port: {}{}", serial.port, if serial.virtual_port { " (virtual)" } else { "" });
    println!("   ├─ Baud rate: {}", serial.baud_rate);
    println!("   └─ Read timeout: {} ms", serial.read_timeout_ms);

    let mock = &config.mock;
    println!("\n🧪 Mock");
    println!("   ├─ Samples: {} over {} s", mock.sample_count, mock.duration_s);
    println!(
        "   ├─ Reference: square wave {} Hz, amplitude {}",
        mock.reference_frequency_hz, mock.reference_amplitude
    );
    println!("   ├─ Measurement noise: {}", mock.measurement_noise);
    match mock.seed {
        Some(seed) => println!("   └─ Seed: {}", seed),
        None => println!("   └─ Seed: (random)"),
    }

    if args.sensors {
        println!("\n🌡  Sensors");
        let sensors: Vec<_> = config.sensors.iter().collect();
        for (i, (kind, s)) in sensors.iter().enumerate() {
            let prefix = if i + 1 == sensors.len() { "└─" } else { "├─" };
            println!(
                "   {} {}: wn={} zeta={} K={} tau={} theta={} sigma={}",
                prefix,
                kind,
                s.natural_freq,
                s.damping_ratio,
                s.gain,
                s.time_constant,
                s.dead_time,
                s.noise_std
            );
        }
    }

    println!();
}
