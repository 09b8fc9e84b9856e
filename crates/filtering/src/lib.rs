//! # Filtering
//!
//! Digital filter stage for acquired sample matrices.
//!
//! - Block-average downsampling
//! - Butterworth low-pass design (bilinear transform)
//! - Causal IIR application
//!
//! Every column of a matrix is filtered independently along time. Record by
//! record streams keep the low-pass delay line between calls
//! ([`FilterStage::apply_streaming`]).

mod block_average;
mod butterworth;
mod iir;
mod stage;

pub use block_average::block_average;
pub use butterworth::{butterworth_lowpass, FilterCoefficients, MAX_ORDER};
pub use iir::{lfilter, lfilter_with_state, state_len};
pub use stage::FilterStage;

// Re-export contracts types
pub use contracts::{FilterKind, FilterSettings};
