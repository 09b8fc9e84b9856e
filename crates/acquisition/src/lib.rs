//! # Acquisition
//!
//! Orchestrates one acquisition pipeline: a sample source (mock simulation
//! or serial line), the digital filter stage and the rolling cache.
//!
//! ```ignore
//! use acquisition::AcquisitionController;
//!
//! let mut controller = AcquisitionController::new(config)?;
//! controller.acquire()?;
//! let snapshot = controller.cache();
//! ```

mod cache;
mod controller;

pub use cache::{RollingCache, StoreReport};
pub use controller::{AcquireReport, AcquisitionController};

// Re-export contracts types
pub use contracts::{AcquisitionConfig, AcquisitionError, SampleMatrix, SampleSource, SourceKind};
