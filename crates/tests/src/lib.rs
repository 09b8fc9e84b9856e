//! # Integration Tests
//!
//! End-to-end tests across the workspace crates:
//! - contract smoke tests
//! - mock acquisition from a configuration file
//! - real-mode acquisition over an in-memory line stream

#[cfg(test)]
mod contract_tests {
    use contracts::{FilterKind, SensorKind, CHANNEL_COUNT, REFERENCE_CHANNEL};

    #[test]
    fn test_channel_layout() {
        assert_eq!(CHANNEL_COUNT, 4);
        assert_eq!(REFERENCE_CHANNEL, CHANNEL_COUNT - 1);
        assert_eq!(SensorKind::ALL.len(), REFERENCE_CHANNEL);
    }

    #[test]
    fn test_identifiers_round_trip_through_display() {
        for kind in SensorKind::ALL {
            assert_eq!(kind.to_string().parse::<SensorKind>().unwrap(), kind);
        }
        for kind in [FilterKind::BlockAverage, FilterKind::LowPass] {
            assert_eq!(kind.to_string().parse::<FilterKind>().unwrap(), kind);
        }
    }
}

#[cfg(test)]
mod e2e_tests {
    use std::io::{Cursor, Write};
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    use acquisition::{AcquisitionController, RollingCache};
    use config_loader::ConfigLoader;
    use contracts::{
        AcquisitionConfig, AcquisitionError, FilterKind, MockConfig, SampleMatrix, SampleSource,
        SourceKind, CHANNEL_COUNT, REFERENCE_CHANNEL,
    };
    use filtering::FilterStage;
    use ingestion::LineSource;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use simulation::{MockDataSource, Sensor};

    const BENCH_TOML: &str = r#"
[acquisition]
sample_frequency_hz = 100.0
filter = "promedio"
cache_capacity = 100
mock = true

[mock]
sample_count = 1000
duration_s = 10.0
seed = 11
"#;

    fn load(content: &str) -> AcquisitionConfig {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        ConfigLoader::load_from_path(file.path()).unwrap()
    }

    /// Config file → mock source → block average → cache
    #[test]
    fn test_e2e_mock_pipeline_from_file() {
        let config = load(BENCH_TOML);
        let mut controller = AcquisitionController::new(config).unwrap();
        assert_eq!(controller.mode(), SourceKind::Mock);

        let raw = controller.read().unwrap();
        assert_eq!(raw.len(), 1000);
        assert_eq!(raw.width(), CHANNEL_COUNT);

        let filtered = controller.apply_filter(&raw).unwrap();
        assert_eq!(filtered.len(), 100);

        let report = controller.store(&filtered).unwrap();
        assert_eq!(report.stored, 100);
        assert!(!report.truncated());
        assert_eq!(controller.cache(), filtered);

        // every value is a finite, bounded response to a unit square wave
        for row in controller.cache().rows() {
            assert!(row.iter().all(|v| v.is_finite()));
            assert!(row[REFERENCE_CHANNEL].abs() <= 1.0);
        }
    }

    /// The same mock run filtered by the controller and by a standalone stage agree
    #[test]
    fn test_e2e_low_pass_matches_standalone_stage() {
        let mut config = load(BENCH_TOML);
        config.acquisition.filter = "pasos_bajos".into();
        config.acquisition.cache_capacity = 250;

        let mut source = MockDataSource::from_config(config.mock.clone(), &config.sensors).unwrap();
        let raw = source.generate().unwrap();
        let stage = FilterStage::new(FilterKind::LowPass, config.filter, 100.0).unwrap();
        let expected = stage.apply(&raw).unwrap().tail(250);

        let mut controller = AcquisitionController::new(config).unwrap();
        let report = controller.acquire().unwrap();
        assert_eq!(report.rows_filtered, 1000);
        assert!(report.store.truncated());
        assert_eq!(controller.cache(), expected);
    }

    /// Sensors settle at gain × reference after a long plateau
    #[test]
    fn test_e2e_mock_steady_state() {
        let mut config = AcquisitionConfig::mock_defaults(FilterKind::BlockAverage, 10);
        // one plateau of +1 over the whole run
        config.mock = MockConfig {
            sample_count: 2001,
            duration_s: 2.0,
            reference_frequency_hz: 0.1,
            ..MockConfig::default()
        };
        let mut source = MockDataSource::from_config(config.mock.clone(), &config.sensors).unwrap();
        let raw = source.generate().unwrap();

        let last = raw.row(raw.len() - 1).unwrap();
        for (j, (_, sensor)) in config.sensors.iter().enumerate() {
            assert!(
                (last[j] - sensor.gain).abs() < 1e-3,
                "channel {j}: {} vs gain {}",
                last[j],
                sensor.gain
            );
        }
        assert_eq!(last[REFERENCE_CHANNEL], 1.0);
    }

    /// Seeded noisy runs are reproducible across controllers
    #[test]
    fn test_e2e_seeded_noise_is_reproducible() {
        let mut config = load(BENCH_TOML);
        config.mock.measurement_noise = true;

        let mut a = AcquisitionController::new(config.clone()).unwrap();
        let mut b = AcquisitionController::new(config).unwrap();
        a.acquire().unwrap();
        b.acquire().unwrap();
        assert_eq!(a.cache(), b.cache());
    }

    /// Real mode over an injected stream: records arrive one row at a time
    #[test]
    fn test_e2e_real_mode_line_stream() {
        let mut config = load(BENCH_TOML);
        config.acquisition.mock = false;
        config.acquisition.cache_capacity = 3;

        let stream =
            "20.1, 20.3, 19.8, 1\n20.2,20.4,19.9,1\n20.5,20.6,20.0,-1\n20.7,20.9,20.1,-1\n";
        let source = LineSource::new("ttyFIXTURE", Cursor::new(stream));
        let mut controller = AcquisitionController::with_source(config, Box::new(source)).unwrap();
        assert_eq!(controller.mode(), SourceKind::Real);

        for _ in 0..4 {
            let report = controller.acquire().unwrap();
            assert_eq!(report.rows_read, 1);
        }

        let cache = controller.cache();
        let firsts: Vec<f64> = cache.rows().map(|r| r[0]).collect();
        assert_eq!(firsts, vec![20.2, 20.5, 20.7]);

        // stream exhausted
        assert!(matches!(controller.read(), Err(AcquisitionError::Port { .. })));
        assert_eq!(controller.cache(), cache);
    }

    /// Record-by-record low-pass equals filtering the whole stream at once
    #[test]
    fn test_e2e_real_mode_low_pass_tracks_stream() {
        let mut config = load(BENCH_TOML);
        config.acquisition.mock = false;
        config.acquisition.filter = "pasos_bajos".into();
        config.acquisition.cache_capacity = 300;

        let rows: Vec<[f64; CHANNEL_COUNT]> = (0..300)
            .map(|k| if k < 150 { [20.0, 40.0, 10.0, 1.0] } else { [25.0, 50.0, 12.5, -1.0] })
            .collect();
        let stream: String = rows
            .iter()
            .map(|r| format!("{},{},{},{}\n", r[0], r[1], r[2], r[3]))
            .collect();
        let whole = SampleMatrix::from_rows(&rows).unwrap();
        let stage = FilterStage::new(FilterKind::LowPass, config.filter, 100.0).unwrap();
        let expected = stage.apply(&whole).unwrap();

        let source = LineSource::new("ttyFIXTURE", Cursor::new(stream));
        let mut controller = AcquisitionController::with_source(config, Box::new(source)).unwrap();
        for _ in 0..300 {
            controller.acquire().unwrap();
        }

        let cache = controller.cache();
        for (got, want) in cache.as_slice().iter().zip(expected.as_slice()) {
            assert!((got - want).abs() < 1e-9, "{got} vs {want}");
        }
        let last = controller.rolling_cache().latest().unwrap();
        assert!((last[0] - 25.0).abs() < 1e-3);
        assert!((last[3] + 1.0).abs() < 1e-3);
    }

    /// A record with the wrong field count reaches the cache and is rejected there
    #[test]
    fn test_e2e_short_record_rejected_by_cache() {
        let config = load(BENCH_TOML);
        let source = LineSource::new("fixture", Cursor::new("1,2,3\n"));
        let mut controller = AcquisitionController::with_source(config, Box::new(source)).unwrap();
        let before = controller.cache();

        let err = controller.acquire().unwrap_err();
        assert!(matches!(err, AcquisitionError::ShapeMismatch { expected: 4, actual: 3 }));
        assert_eq!(controller.cache(), before);
    }

    struct CountingSource {
        reads: Arc<AtomicUsize>,
    }

    impl SampleSource for CountingSource {
        fn describe(&self) -> String {
            "counting".into()
        }

        fn kind(&self) -> SourceKind {
            SourceKind::Real
        }

        fn read(&mut self) -> Result<SampleMatrix, AcquisitionError> {
            self.reads.fetch_add(1, Ordering::SeqCst);
            Ok(SampleMatrix::zeros(1, CHANNEL_COUNT))
        }
    }

    /// An unknown filter identifier fails before the source is touched
    #[test]
    fn test_e2e_unknown_filter_fails_fast() {
        let mut config = AcquisitionConfig::mock_defaults(FilterKind::BlockAverage, 5);
        config.acquisition.filter = "savitzky_golay".into();

        let reads = Arc::new(AtomicUsize::new(0));
        let source = CountingSource {
            reads: reads.clone(),
        };
        let err = AcquisitionController::with_source(config, Box::new(source)).unwrap_err();
        assert!(matches!(err, AcquisitionError::InvalidFilterType { .. }));
        assert_eq!(reads.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_e2e_unknown_filter_in_file() {
        let content = BENCH_TOML.replace("\"promedio\"", "\"mediana\"");
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        file.write_all(content.as_bytes()).unwrap();

        let err = ConfigLoader::load_from_path(file.path()).unwrap_err();
        assert!(matches!(
            err,
            AcquisitionError::InvalidFilterType { ref identifier } if identifier == "mediana"
        ));
    }

    #[test]
    fn test_e2e_sensor_noise_stream() {
        let mut rng = StdRng::seed_from_u64(5);
        let mut sensor = Sensor::from_identifier("thermocouple", 0.01).unwrap();
        let values: Vec<f64> = (0..100).map(|_| sensor.generate(&mut rng)).collect();
        assert!(values.iter().all(|v| v.is_finite()));
        assert_eq!(sensor.current_value(), values[99]);

        assert!(matches!(
            Sensor::from_identifier("pyrometer", 0.01),
            Err(AcquisitionError::InvalidSensorType { .. })
        ));
    }

    #[test]
    fn test_e2e_cache_holds_most_recent_rows_across_stores() {
        let mut cache = RollingCache::new(4).unwrap();
        for block in 0..5 {
            let rows: Vec<[f64; 4]> = (0..3).map(|i| [f64::from(block * 3 + i); 4]).collect();
            cache.store(&SampleMatrix::from_rows(&rows).unwrap()).unwrap();
        }
        let firsts: Vec<f64> = cache.snapshot().rows().map(|r| r[0]).collect();
        assert_eq!(firsts, vec![11.0, 12.0, 13.0, 14.0]);
        assert_eq!(cache.total_stored(), 15);
    }
}
