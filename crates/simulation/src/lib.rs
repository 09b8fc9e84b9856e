//! # Simulation
//!
//! Sampled-data plant simulation for development without hardware.
//!
//! Responsibilities:
//! - Square-wave reference generation over a time grid
//! - Second-order sensor response simulation (zero initial state)
//! - Per-sensor random-walk measurement noise
//! - Assembly of N×4 mock sample matrices
//!
//! ## Usage Example
//!
//! ```ignore
//! use simulation::MockDataSource;
//! use contracts::{MockConfig, SensorSet};
//!
//! let mut source = MockDataSource::from_config(MockConfig::default(), &SensorSet::default())?;
//! let matrix = source.generate()?;
//! assert_eq!(matrix.width(), 4);
//! ```

mod mock;
mod plant;
mod sensor;
mod signal;

// Re-exports
pub use mock::MockDataSource;
pub use plant::{simulate, SecondOrderModel};
pub use sensor::Sensor;
pub use signal::{linspace, square_wave, SIGN_AT_ZERO};
