//! Filter stage applied between acquisition and the cache.

use std::time::Instant;

use contracts::{AcquisitionError, FilterKind, FilterSettings, SampleMatrix};
use tracing::{debug, info};

use crate::block_average::block_average;
use crate::butterworth::{butterworth_lowpass, FilterCoefficients};
use crate::iir::{lfilter, lfilter_with_state, state_len};

/// Configured filter policy
///
/// Low-pass coefficients are designed once on construction, so a cutoff
/// outside the valid band fails before any sample is processed.
///
/// [`FilterStage::apply`] treats each matrix as a complete series.
/// [`FilterStage::apply_streaming`] treats consecutive matrices as pieces of
/// one series and carries the low-pass delay line across calls.
#[derive(Debug, Clone)]
pub struct FilterStage {
    kind: FilterKind,
    settings: FilterSettings,
    sample_rate_hz: f64,
    coefficients: Option<FilterCoefficients>,
    /// Per-column delay lines for streaming, sized on first use
    stream_state: Vec<Vec<f64>>,
}

impl FilterStage {
    /// Build a stage for `kind` at `sample_rate_hz`
    ///
    /// # Errors
    /// - `InvalidParameter` for a zero block size (block-average)
    /// - `FilterDesign` for an invalid order or cutoff (low-pass)
    pub fn new(
        kind: FilterKind,
        settings: FilterSettings,
        sample_rate_hz: f64,
    ) -> Result<Self, AcquisitionError> {
        let coefficients = match kind {
            FilterKind::BlockAverage => {
                if settings.block_size == 0 {
                    return Err(AcquisitionError::invalid_parameter(
                        "block_size",
                        "must be > 0",
                    ));
                }
                None
            }
            FilterKind::LowPass => Some(butterworth_lowpass(
                settings.order,
                settings.cutoff_hz,
                sample_rate_hz,
            )?),
        };

        info!(
            filter = %kind,
            sample_rate_hz,
            block_size = settings.block_size,
            cutoff_hz = settings.cutoff_hz,
            order = settings.order,
            "filter stage ready"
        );

        Ok(Self {
            kind,
            settings,
            sample_rate_hz,
            coefficients,
            stream_state: Vec::new(),
        })
    }

    /// Build a stage from a configuration identifier
    ///
    /// # Errors
    /// `InvalidFilterType` for an unknown identifier, otherwise as [`FilterStage::new`].
    pub fn from_identifier(
        identifier: &str,
        settings: FilterSettings,
        sample_rate_hz: f64,
    ) -> Result<Self, AcquisitionError> {
        Self::new(identifier.parse()?, settings, sample_rate_hz)
    }

    pub fn kind(&self) -> FilterKind {
        self.kind
    }

    pub fn settings(&self) -> &FilterSettings {
        &self.settings
    }

    pub fn sample_rate_hz(&self) -> f64 {
        self.sample_rate_hz
    }

    /// Designed low-pass coefficients, if any
    pub fn coefficients(&self) -> Option<&FilterCoefficients> {
        self.coefficients.as_ref()
    }

    /// Filter one channel's time series
    pub fn apply_channel(&self, samples: &[f64]) -> Result<Vec<f64>, AcquisitionError> {
        match &self.coefficients {
            Some(c) => lfilter(&c.b, &c.a, samples),
            None => block_average(samples, self.settings.block_size),
        }
    }

    /// Filter every column of `matrix` independently along time
    pub fn apply(&self, matrix: &SampleMatrix) -> Result<SampleMatrix, AcquisitionError> {
        let start = Instant::now();

        let columns = (0..matrix.width())
            .filter_map(|j| matrix.column(j))
            .map(|column| self.apply_channel(&column))
            .collect::<Result<Vec<_>, _>>()?;
        let filtered = SampleMatrix::from_columns(&columns)?;

        debug!(
            filter = %self.kind,
            rows_in = matrix.len(),
            rows_out = filtered.len(),
            elapsed_us = start.elapsed().as_micros() as u64,
            "matrix filtered"
        );

        Ok(filtered)
    }

    /// Filter `matrix` as the continuation of every previously streamed row
    ///
    /// Low-pass output matches a single [`FilterStage::apply`] over all rows
    /// streamed so far. Block averaging has no memory and behaves like `apply`.
    pub fn apply_streaming(
        &mut self,
        matrix: &SampleMatrix,
    ) -> Result<SampleMatrix, AcquisitionError> {
        let Some(c) = &self.coefficients else {
            return self.apply(matrix);
        };

        let width = matrix.width();
        if self.stream_state.len() != width {
            self.stream_state = vec![vec![0.0; state_len(&c.b, &c.a)]; width];
        }

        let columns = (0..width)
            .filter_map(|j| matrix.column(j))
            .zip(self.stream_state.iter_mut())
            .map(|(column, state)| lfilter_with_state(&c.b, &c.a, &column, state))
            .collect::<Result<Vec<_>, _>>()?;
        let filtered = SampleMatrix::from_columns(&columns)?;

        debug!(filter = %self.kind, rows = matrix.len(), "stream chunk filtered");
        Ok(filtered)
    }

    /// Drop the streaming delay lines so the next chunk starts from rest
    pub fn reset_stream(&mut self) {
        self.stream_state.clear();
    }
}
