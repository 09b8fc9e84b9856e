//! # Contracts
//!
//! Frozen interface contracts, defining inter-crate data structures and traits.
//! All business crates can only depend on this crate, reverse dependencies are prohibited.
//!
//! ## Sample Model
//! - Rows are time-ordered; channels are sensor1, sensor2, sensor3, reference
//! - Values are `f64` in engineering units of the sensor

mod config;
mod error;
mod filter;
mod sample;
mod sample_source;
mod sensor;

pub use config::*;
pub use error::*;
pub use filter::*;
pub use sample::*;
pub use sample_source::{SampleSource, SourceKind};
pub use sensor::*;
