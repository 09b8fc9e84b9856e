//! Fixed-capacity rolling cache of the most recent sample rows.
//!
//! Backed by a `HeapRb` pre-filled with zero rows, so the cache is always
//! full and every store shifts older rows out of the head.

use std::fmt;

use contracts::{AcquisitionError, SampleMatrix, CHANNEL_COUNT};
use ringbuf::{traits::*, HeapRb};
use tracing::{debug, error, warn};

type Row = [f64; CHANNEL_COUNT];

/// Outcome of a successful store
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StoreReport {
    /// Rows committed
    pub stored: usize,
    /// Rows discarded from the head of an oversized input
    pub discarded: usize,
}

impl StoreReport {
    pub fn truncated(&self) -> bool {
        self.discarded > 0
    }
}

/// Rolling window of the last `capacity` rows, oldest first
pub struct RollingCache {
    rows: HeapRb<Row>,
    capacity: usize,
    total_stored: u64,
}

impl fmt::Debug for RollingCache {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RollingCache")
            .field("capacity", &self.capacity)
            .field("total_stored", &self.total_stored)
            .finish()
    }
}

impl RollingCache {
    /// Create a cache holding `capacity` zero rows
    ///
    /// # Errors
    /// `InvalidParameter` if `capacity == 0`.
    pub fn new(capacity: usize) -> Result<Self, AcquisitionError> {
        if capacity == 0 {
            return Err(AcquisitionError::invalid_parameter(
                "cache_capacity",
                "must be > 0",
            ));
        }

        let mut rows = HeapRb::new(capacity);
        for _ in 0..capacity {
            rows.push_overwrite([0.0; CHANNEL_COUNT]);
        }

        Ok(Self {
            rows,
            capacity,
            total_stored: 0,
        })
    }

    /// Shift in the rows of `matrix`, dropping as many of the oldest rows
    ///
    /// Validation happens before any row is committed: a matrix with the
    /// wrong column count leaves the cache untouched. A matrix with more rows
    /// than the capacity is cut down to its most recent `capacity` rows.
    ///
    /// # Errors
    /// `ShapeMismatch` if the matrix is not `CHANNEL_COUNT` columns wide.
    pub fn store(&mut self, matrix: &SampleMatrix) -> Result<StoreReport, AcquisitionError> {
        // validate
        if matrix.width() != CHANNEL_COUNT {
            error!(
                expected = CHANNEL_COUNT,
                actual = matrix.width(),
                rows = matrix.len(),
                "rejected store: wrong column count"
            );
            return Err(AcquisitionError::ShapeMismatch {
                expected: CHANNEL_COUNT,
                actual: matrix.width(),
            });
        }

        let incoming = matrix.len();
        let discarded = incoming.saturating_sub(self.capacity);
        if discarded > 0 {
            warn!(
                rows = incoming,
                capacity = self.capacity,
                discarded,
                "input exceeds cache capacity, keeping most recent rows"
            );
        }

        // commit
        for row in matrix.rows().skip(discarded) {
            let mut entry = [0.0; CHANNEL_COUNT];
            entry.copy_from_slice(row);
            self.rows.push_overwrite(entry);
        }

        let stored = incoming - discarded;
        self.total_stored += stored as u64;
        debug!(stored, total_stored = self.total_stored, "rows cached");

        Ok(StoreReport { stored, discarded })
    }

    /// Copy of the cache contents, `capacity × CHANNEL_COUNT`, oldest first
    pub fn snapshot(&self) -> SampleMatrix {
        let mut matrix = SampleMatrix::with_capacity(CHANNEL_COUNT, self.capacity);
        for row in self.rows.iter() {
            // width always matches
            let _ = matrix.push_row(row);
        }
        matrix
    }

    /// Most recently stored row
    pub fn latest(&self) -> Option<Row> {
        self.rows.iter().last().copied()
    }

    #[inline]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Rows committed since construction
    #[inline]
    pub fn total_stored(&self) -> u64 {
        self.total_stored
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rows(range: std::ops::RangeInclusive<u32>) -> SampleMatrix {
        let rows: Vec<Row> = range
            .map(|i| {
                let v = f64::from(i);
                [v, v + 0.1, v + 0.2, v + 0.3]
            })
            .collect();
        SampleMatrix::from_rows(&rows).unwrap()
    }

    #[test]
    fn test_starts_with_zero_rows() {
        let cache = RollingCache::new(5).unwrap();
        let snap = cache.snapshot();
        assert_eq!(snap.len(), 5);
        assert_eq!(snap.width(), CHANNEL_COUNT);
        assert!(snap.as_slice().iter().all(|v| *v == 0.0));
        assert_eq!(cache.latest(), Some([0.0; CHANNEL_COUNT]));
    }

    #[test]
    fn test_zero_capacity_rejected() {
        assert!(RollingCache::new(0).is_err());
    }

    #[test]
    fn test_store_shifts_rows() {
        let mut cache = RollingCache::new(5).unwrap();
        cache.store(&rows(1..=3)).unwrap();
        cache.store(&rows(4..=5)).unwrap();

        let snap = cache.snapshot();
        let firsts: Vec<f64> = snap.rows().map(|r| r[0]).collect();
        assert_eq!(firsts, vec![1.0, 2.0, 3.0, 4.0, 5.0]);

        let report = cache.store(&rows(6..=7)).unwrap();
        assert_eq!(report, StoreReport { stored: 2, discarded: 0 });

        let snap = cache.snapshot();
        let firsts: Vec<f64> = snap.rows().map(|r| r[0]).collect();
        assert_eq!(firsts, vec![3.0, 4.0, 5.0, 6.0, 7.0]);
        assert_eq!(cache.latest(), Some([7.0, 7.1, 7.2, 7.3]));
        assert_eq!(cache.total_stored(), 7);
    }

    #[test]
    fn test_previous_contents_shift_to_head() {
        let mut cache = RollingCache::new(4).unwrap();
        cache.store(&rows(1..=4)).unwrap();
        let before = cache.snapshot();

        cache.store(&rows(9..=9)).unwrap();
        let after = cache.snapshot();

        for i in 0..3 {
            assert_eq!(after.row(i), before.row(i + 1));
        }
        assert_eq!(after.row(3), Some(&[9.0, 9.1, 9.2, 9.3][..]));
    }

    #[test]
    fn test_oversized_input_keeps_most_recent() {
        let mut cache = RollingCache::new(3).unwrap();
        let report = cache.store(&rows(1..=10)).unwrap();

        assert!(report.truncated());
        assert_eq!(report.stored, 3);
        assert_eq!(report.discarded, 7);

        let firsts: Vec<f64> = cache.snapshot().rows().map(|r| r[0]).collect();
        assert_eq!(firsts, vec![8.0, 9.0, 10.0]);
    }

    #[test]
    fn test_wrong_width_leaves_cache_untouched() {
        let mut cache = RollingCache::new(3).unwrap();
        cache.store(&rows(1..=3)).unwrap();
        let before = cache.snapshot();

        let narrow = SampleMatrix::from_rows(&[[1.0, 2.0, 3.0]]).unwrap();
        let err = cache.store(&narrow).unwrap_err();
        assert!(matches!(err, AcquisitionError::ShapeMismatch { expected: 4, actual: 3 }));
        assert_eq!(cache.snapshot(), before);
        assert_eq!(cache.total_stored(), 3);
    }

    #[test]
    fn test_empty_store_is_noop() {
        let mut cache = RollingCache::new(2).unwrap();
        let report = cache.store(&SampleMatrix::new(CHANNEL_COUNT)).unwrap();
        assert_eq!(report.stored, 0);
        assert!(!report.truncated());
    }

    #[test]
    fn test_snapshot_is_a_copy() {
        let mut cache = RollingCache::new(2).unwrap();
        let mut snap = cache.snapshot();
        if let Some(row) = snap.row_mut(0) {
            row[0] = 42.0;
        }
        assert_eq!(cache.snapshot().row(0), Some(&[0.0; 4][..]));

        cache.store(&rows(1..=1)).unwrap();
        assert_eq!(snap.row(1), Some(&[0.0; 4][..]));
    }
}
