//! SampleMatrix - time-ordered multi-channel samples
//!
//! Row order is time order. Channel order is fixed end-to-end:
//! sensor1, sensor2, sensor3, reference.

use serde::{Deserialize, Serialize};

use crate::AcquisitionError;

/// Number of channels carried through the pipeline (three sensors + reference)
pub const CHANNEL_COUNT: usize = 4;

/// Column index of the reference / controller action channel
pub const REFERENCE_CHANNEL: usize = 3;

/// Human-readable channel labels, in column order
pub const CHANNEL_LABELS: [&str; CHANNEL_COUNT] = ["sensor1", "sensor2", "sensor3", "reference"];

/// Row-major sample matrix
///
/// The width is stored per matrix rather than fixed at the type level so that
/// records read from a real device can be represented before the cache
/// checks them against [`CHANNEL_COUNT`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SampleMatrix {
    width: usize,
    values: Vec<f64>,
}

impl SampleMatrix {
    /// Create an empty matrix with the given row width
    pub fn new(width: usize) -> Self {
        Self {
            width,
            values: Vec::new(),
        }
    }

    /// Create an empty matrix with reserved space for `rows` rows
    pub fn with_capacity(width: usize, rows: usize) -> Self {
        Self {
            width,
            values: Vec::with_capacity(width * rows),
        }
    }

    /// Create a `rows × width` matrix filled with zeros
    pub fn zeros(rows: usize, width: usize) -> Self {
        Self {
            width,
            values: vec![0.0; rows * width],
        }
    }

    /// Build a matrix from rows
    ///
    /// # Errors
    /// `ShapeMismatch` if rows have different lengths.
    pub fn from_rows<R: AsRef<[f64]>>(rows: &[R]) -> Result<Self, AcquisitionError> {
        let width = rows.first().map(|r| r.as_ref().len()).unwrap_or(0);
        let mut matrix = Self::with_capacity(width, rows.len());
        for row in rows {
            matrix.push_row(row.as_ref())?;
        }
        Ok(matrix)
    }

    /// Build a matrix from equally long columns
    ///
    /// # Errors
    /// `ShapeMismatch` if columns have different lengths.
    pub fn from_columns<C: AsRef<[f64]>>(columns: &[C]) -> Result<Self, AcquisitionError> {
        let width = columns.len();
        let rows = columns.first().map(|c| c.as_ref().len()).unwrap_or(0);

        if let Some(bad) = columns.iter().find(|c| c.as_ref().len() != rows) {
            return Err(AcquisitionError::ShapeMismatch {
                expected: rows,
                actual: bad.as_ref().len(),
            });
        }

        let mut values = Vec::with_capacity(rows * width);
        for i in 0..rows {
            values.extend(columns.iter().map(|c| c.as_ref()[i]));
        }
        Ok(Self { width, values })
    }

    /// Append one row
    ///
    /// # Errors
    /// `ShapeMismatch` if `row.len()` differs from the matrix width.
    pub fn push_row(&mut self, row: &[f64]) -> Result<(), AcquisitionError> {
        if row.len() != self.width {
            return Err(AcquisitionError::ShapeMismatch {
                expected: self.width,
                actual: row.len(),
            });
        }
        self.values.extend_from_slice(row);
        Ok(())
    }

    /// Number of rows
    #[inline]
    pub fn len(&self) -> usize {
        if self.width == 0 {
            0
        } else {
            self.values.len() / self.width
        }
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Number of channels per row
    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    /// Borrow row `index`
    pub fn row(&self, index: usize) -> Option<&[f64]> {
        let start = index.checked_mul(self.width)?;
        self.values.get(start..start + self.width)
    }

    /// Mutably borrow row `index`
    pub fn row_mut(&mut self, index: usize) -> Option<&mut [f64]> {
        let start = index.checked_mul(self.width)?;
        self.values.get_mut(start..start + self.width)
    }

    /// Iterate rows in time order
    pub fn rows(&self) -> impl Iterator<Item = &[f64]> {
        // chunks_exact panics on a zero chunk size
        self.values.chunks_exact(self.width.max(1))
    }

    /// Copy column `index` out as a time series
    pub fn column(&self, index: usize) -> Option<Vec<f64>> {
        if index >= self.width {
            return None;
        }
        Some(self.rows().map(|r| r[index]).collect())
    }

    /// Copy of the last `n` rows (or all rows if fewer)
    pub fn tail(&self, n: usize) -> Self {
        let skip = self.len().saturating_sub(n);
        Self {
            width: self.width,
            values: self.values[skip * self.width..].to_vec(),
        }
    }

    /// Flat row-major view
    #[inline]
    pub fn as_slice(&self) -> &[f64] {
        &self.values
    }
}
