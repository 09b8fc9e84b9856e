//! Block-average downsampling.

use contracts::AcquisitionError;

/// Replace each consecutive block of `block_size` samples with its mean
///
/// The last block may be shorter and is averaged over its own length.
/// Output length is `ceil(len / block_size)`.
///
/// # Errors
/// `InvalidParameter` if `block_size == 0`.
pub fn block_average(samples: &[f64], block_size: usize) -> Result<Vec<f64>, AcquisitionError> {
    if block_size == 0 {
        return Err(AcquisitionError::invalid_parameter(
            "block_size",
            "must be > 0",
        ));
    }

    Ok(samples
        .chunks(block_size)
        .map(|block| block.iter().sum::<f64>() / block.len() as f64)
        .collect())
}
