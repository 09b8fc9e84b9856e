//! Acquisition controller: source → filter → cache.

use std::time::Instant;

use contracts::{AcquisitionConfig, AcquisitionError, SampleMatrix, SampleSource, SourceKind};
use filtering::FilterStage;
use ingestion::SerialLineSource;
use simulation::MockDataSource;
use tracing::{debug, error, info, instrument};

use crate::cache::{RollingCache, StoreReport};

/// Outcome of one read → filter → store cycle
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AcquireReport {
    /// Rows delivered by the source
    pub rows_read: usize,
    /// Rows produced by the filter stage
    pub rows_filtered: usize,
    pub store: StoreReport,
    /// Time spent in the filter stage
    pub filter_ms: f64,
}

/// Owns the sample source, the filter stage and the rolling cache
///
/// The mode (mock or real) is fixed at construction. In real mode the serial
/// port stays open for the controller's lifetime.
pub struct AcquisitionController {
    config: AcquisitionConfig,
    source: Box<dyn SampleSource>,
    filter: FilterStage,
    cache: RollingCache,
}

impl std::fmt::Debug for AcquisitionController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AcquisitionController")
            .field("source", &self.source.describe())
            .field("mode", &self.source.kind())
            .field("filter", &self.filter.kind())
            .field("cache", &self.cache)
            .finish()
    }
}

impl AcquisitionController {
    /// Build a controller and its source from configuration
    ///
    /// Filter and cache settings are checked before any port is opened.
    ///
    /// # Errors
    /// - `InvalidFilterType` for an unknown filter identifier
    /// - `FilterDesign` / `InvalidParameter` for invalid filter or cache settings
    /// - `Port` if the serial port cannot be opened (real mode)
    pub fn new(config: AcquisitionConfig) -> Result<Self, AcquisitionError> {
        let filter = build_filter(&config)?;
        let cache = RollingCache::new(config.acquisition.cache_capacity)?;

        let source: Box<dyn SampleSource> = if config.acquisition.mock {
            Box::new(MockDataSource::from_config(config.mock.clone(), &config.sensors)?)
        } else {
            Box::new(SerialLineSource::from_config(&config.serial)?)
        };

        Ok(Self::assemble(config, source, filter, cache))
    }

    /// Build a controller around an existing source
    ///
    /// The mode follows `source.kind()` rather than `acquisition.mock`.
    pub fn with_source(
        config: AcquisitionConfig,
        source: Box<dyn SampleSource>,
    ) -> Result<Self, AcquisitionError> {
        let filter = build_filter(&config)?;
        let cache = RollingCache::new(config.acquisition.cache_capacity)?;
        Ok(Self::assemble(config, source, filter, cache))
    }

    fn assemble(
        config: AcquisitionConfig,
        source: Box<dyn SampleSource>,
        filter: FilterStage,
        cache: RollingCache,
    ) -> Self {
        info!(
            source = %source.describe(),
            mode = %source.kind(),
            filter = %filter.kind(),
            cache_capacity = cache.capacity(),
            "acquisition controller ready"
        );
        Self {
            config,
            source,
            filter,
            cache,
        }
    }

    /// Read the next block from the source
    ///
    /// Mock mode returns a full simulated run; real mode a single record.
    pub fn read(&mut self) -> Result<SampleMatrix, AcquisitionError> {
        let mode = self.source.kind();
        match self.source.read() {
            Ok(matrix) => {
                observability::record_rows_read(mode.as_str(), matrix.len());
                debug!(%mode, rows = matrix.len(), width = matrix.width(), "read complete");
                Ok(matrix)
            }
            Err(e) => {
                observability::record_read_error(mode.as_str(), e.category());
                error!(%mode, source = %self.source.describe(), error = %e, "read failed");
                Err(e)
            }
        }
    }

    /// Apply the configured filter to every column
    ///
    /// A mock read is a complete run and is filtered from rest. Real-mode
    /// records are successive samples of one series, so the low-pass state
    /// carries over from the previous record.
    pub fn apply_filter(
        &mut self,
        matrix: &SampleMatrix,
    ) -> Result<SampleMatrix, AcquisitionError> {
        let start = Instant::now();
        let filtered = match self.source.kind() {
            SourceKind::Mock => self.filter.apply(matrix)?,
            SourceKind::Real => self.filter.apply_streaming(matrix)?,
        };
        observability::record_filter_latency_ms(
            self.filter.kind().as_str(),
            start.elapsed().as_secs_f64() * 1000.0,
        );
        Ok(filtered)
    }

    /// Shift rows into the cache
    pub fn store(&mut self, matrix: &SampleMatrix) -> Result<StoreReport, AcquisitionError> {
        match self.cache.store(matrix) {
            Ok(report) => {
                if report.truncated() {
                    observability::record_cache_truncation(report.discarded);
                }
                observability::record_rows_stored(report.stored, self.cache.total_stored());
                Ok(report)
            }
            Err(e) => {
                if let AcquisitionError::ShapeMismatch { actual, .. } = e {
                    observability::record_shape_rejected(actual);
                }
                Err(e)
            }
        }
    }

    /// Copy of the cache contents, oldest row first
    pub fn cache(&self) -> SampleMatrix {
        self.cache.snapshot()
    }

    pub fn rolling_cache(&self) -> &RollingCache {
        &self.cache
    }

    /// Run read → filter → store once
    #[instrument(skip(self), fields(mode = %self.source.kind()))]
    pub fn acquire(&mut self) -> Result<AcquireReport, AcquisitionError> {
        let raw = self.read()?;

        let start = Instant::now();
        let filtered = self.apply_filter(&raw)?;
        let filter_ms = start.elapsed().as_secs_f64() * 1000.0;

        let store = self.store(&filtered)?;

        Ok(AcquireReport {
            rows_read: raw.len(),
            rows_filtered: filtered.len(),
            store,
            filter_ms,
        })
    }

    pub fn mode(&self) -> SourceKind {
        self.source.kind()
    }

    pub fn describe_source(&self) -> String {
        self.source.describe()
    }

    pub fn filter(&self) -> &FilterStage {
        &self.filter
    }

    pub fn config(&self) -> &AcquisitionConfig {
        &self.config
    }
}

fn build_filter(config: &AcquisitionConfig) -> Result<FilterStage, AcquisitionError> {
    let kind = config.filter_kind().inspect_err(|e| {
        error!(filter = %config.acquisition.filter, error = %e, "unknown filter identifier");
    })?;
    FilterStage::new(kind, config.filter, config.acquisition.sample_frequency_hz)
}
