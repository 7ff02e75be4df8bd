//! Data-Quality Detectors
//!
//! ## Overview
//!
//! Three detectors diagnose defects in irregularly sampled industrial series:
//!
//! - [`GapIdentifier`]: inter-sample steps that are abnormally long
//! - [`LowDensityIdentifier`]: fixed windows that received too few samples
//! - [`ShutInDetector`]: sustained periods on one side of a threshold,
//!   debounced by a minimum duration
//!
//! The first two reduce the series to a plain sample (step sizes, window
//! counts) and hand it to one of the [`OutlierMethod`]s. The shut-in
//! detector runs a small hysteresis state machine instead. All three share
//! the same shape: flag, filter, emit one boolean per timestamp.
//!
//! ## Choosing a Method
//!
//! | Method            | Good for                                | Blind spot                         |
//! |-------------------|-----------------------------------------|------------------------------------|
//! | z-scores          | a few strong outliers in noisy cadence  | many outliers inflate the std      |
//! | modified z-scores | heavy-tailed cadence                    | mostly-constant cadence (MAD = 0)  |
//! | IQR               | mostly-constant cadence                 | outliers making up > 25% of sample |
//! | threshold         | known nominal cadence                   | needs domain knowledge             |
//!
//! ## Usage Example
//!
//! ```rust
//! use tsguard_core::detectors::{GapIdentifier, LowDensityIdentifier, ShutInDetector};
//! use tsguard_core::{Detector, TimeSeries};
//! use tsguard_core::time::{hours, minutes};
//!
//! let series = TimeSeries::from_pairs(
//!     (0..288u64)
//!         .filter(|i| !(100..110).contains(i))
//!         .map(|i| (minutes(5 * i), 1.0)),
//! )?;
//!
//! let gaps = GapIdentifier::iqr_default().detect(&series)?;
//! assert_eq!(gaps.flagged_timestamps(), vec![minutes(550)]);
//!
//! let sparse = LowDensityIdentifier::threshold(hours(1), 10).detect(&series)?;
//! assert_eq!(sparse.flagged_count(), 1);
//!
//! let shut_in = ShutInDetector::default().with_threshold(0.5).detect(&series)?;
//! assert!(!shut_in.any_flagged());
//! # Ok::<(), tsguard_core::DetectionError>(())
//! ```

mod gaps;
mod density;
mod shutin;
mod utils;

pub use gaps::GapIdentifier;
pub use density::LowDensityIdentifier;
pub use shutin::{ShutInConfig, ShutInDetector};
pub use utils::{window_ranges, Partitioning};

pub use crate::statistics::OutlierMethod;
