//! Constants for TSGuard Core
//!
//! Centralized, documented constants used by the detectors. Defaults that a
//! caller can override live here next to the reason they were chosen.
//!
//! ## Organization
//!
//! - **Time**: unit conversions between milliseconds, minutes and hours
//! - **Detection**: cutoffs and multipliers for the outlier methods, plus
//!   shut-in debouncing defaults
//!
//! ## Usage Guidelines
//!
//! 1. Always use these constants instead of magic numbers
//! 2. Use descriptive names that include units

/// Time unit conversions.
pub mod time;

/// Default parameters for gap, density and shut-in detection.
pub mod detection;

pub use time::{MS_PER_SECOND, MS_PER_MINUTE, MS_PER_HOUR};

pub use detection::{
    DEFAULT_Z_SCORE_CUTOFF, DEFAULT_MODIFIED_Z_CUTOFF, MODIFIED_Z_SCALE,
    DEFAULT_IQR_MULTIPLIER, DEFAULT_MIN_SHUTIN_LEN_MS,
};
