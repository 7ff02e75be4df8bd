//! Core detection engine for TSGuard
//!
//! Diagnoses data-quality defects in irregularly sampled industrial time
//! series: missing-data gaps, low-density windows, and shut-in intervals.
//!
//! Key constraints:
//! - Pure, synchronous, single-pass computations
//! - Inputs are never mutated; every output is a new series
//! - Works without `std` (needs `alloc`)
//!
//! ```no_run
//! use tsguard_core::{Detector, GapIdentifier, TimeSeries};
//! use tsguard_core::time::minutes;
//!
//! let series = TimeSeries::from_timestamps([0, minutes(5), minutes(10), minutes(50)])?;
//! let detector = GapIdentifier::threshold(minutes(35));
//!
//! match detector.detect(&series) {
//!     Ok(gaps) => {}, // One flag per step
//!     Err(e) => {},   // Malformed input or configuration
//! }
//! # Ok::<(), tsguard_core::DetectionError>(())
//! ```

#![cfg_attr(not(feature = "std"), no_std)]
#![deny(unsafe_code)]
#![warn(missing_docs)]

extern crate alloc;

// Macros for optional logging
#[cfg(feature = "log")]
macro_rules! log_debug {
    ($($arg:tt)*) => { log::debug!($($arg)*) };
}

#[cfg(not(feature = "log"))]
macro_rules! log_debug {
    ($($arg:tt)*) => {};
}

#[cfg(feature = "log")]
macro_rules! log_warn {
    ($($arg:tt)*) => { log::warn!($($arg)*) };
}

#[cfg(not(feature = "log"))]
macro_rules! log_warn {
    ($($arg:tt)*) => {};
}

pub mod constants;
pub mod detectors;
pub mod errors;
pub mod series;
pub mod statistics;
pub mod time;
pub mod traits;

// Public API
pub use errors::{DetectionError, DetectionResult, ErrorKind};
pub use traits::Detector;
pub use series::{FlagPoint, FlagSeries, Sample, TimeSeries};
pub use statistics::{MethodKind, OutlierMethod, Side};
pub use detectors::{
    GapIdentifier,
    LowDensityIdentifier,
    ShutInConfig,
    ShutInDetector,
};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
