//! Error Types for Detector Calls
//!
//! ## Design Philosophy
//!
//! Errors follow the same rules as the rest of the crate's embedded-friendly
//! surface:
//!
//! 1. **No Heap Allocation**: payloads are plain numbers or `&'static str`.
//!
//! 2. **Copy Semantics**: errors are `Copy` so they can be returned and
//!    matched without move complications.
//!
//! 3. **Synchronous and Local**: every error is raised at call time, before
//!    any output is produced. A detector never returns a partial result.
//!
//! ## Error Categories
//!
//! ### Input Shape
//! - `InsufficientData`: fewer samples than the detector needs
//! - `NonIncreasingTimestamp`: duplicate or out-of-order timestamps
//! - `InvalidValue`: a present value that is NaN or infinite
//!
//! ### Configuration
//! - `InvalidConfiguration`: zero window, negative cutoff, NaN threshold...
//! - `UnknownMethod`: a method name that does not parse
//!
//! Zero spread (zero standard deviation, zero MAD) is *not* an error. The
//! statistic degrades to "no anomalies flagged" and the call succeeds.
//!
//! ```rust
//! use tsguard_core::{DetectionError, ErrorKind};
//!
//! fn describe(err: DetectionError) -> &'static str {
//!     match err.kind() {
//!         ErrorKind::InputShape => "clean the series upstream and retry",
//!         ErrorKind::Configuration => "fix the detector settings",
//!     }
//! }
//!
//! let err = DetectionError::InsufficientData { required: 2, available: 1 };
//! assert_eq!(describe(err), "clean the series upstream and retry");
//! ```

use thiserror_no_std::Error;

use crate::time::Timestamp;

/// Result type for detector operations
pub type DetectionResult<T> = Result<T, DetectionError>;

/// Detector errors - kept small and `Copy`
#[derive(Error, Debug, Clone, Copy, PartialEq)]
pub enum DetectionError {
    /// Not enough samples for the requested computation
    #[error("Insufficient data: need {required}, have {available}")]
    InsufficientData {
        /// Minimum number of samples the detector needs
        required: usize,
        /// Number of samples supplied
        available: usize,
    },

    /// Timestamps must be strictly increasing
    #[error("Timestamp {current} at index {index} does not follow {previous}")]
    NonIncreasingTimestamp {
        /// Index of the offending sample
        index: usize,
        /// Timestamp of the preceding sample
        previous: Timestamp,
        /// Timestamp of the offending sample
        current: Timestamp,
    },

    /// Present value is NaN or infinite
    #[error("Invalid value at index {index}: not a finite number")]
    InvalidValue {
        /// Index of the offending sample
        index: usize,
    },

    /// Detector parameter rejected before computation
    #[error("Invalid configuration: {parameter} {reason}")]
    InvalidConfiguration {
        /// Name of the rejected parameter
        parameter: &'static str,
        /// What is wrong with it
        reason: &'static str,
    },

    /// Method name did not match any known outlier method
    #[error("Unknown method: expected z_scores, modified_z_scores, iqr or threshold")]
    UnknownMethod,
}

/// Coarse classification of a [`DetectionError`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// The series itself is malformed or too short
    InputShape,
    /// The detector settings are unusable
    Configuration,
}

impl DetectionError {
    /// Which side of the call is at fault
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::InsufficientData { .. }
            | Self::NonIncreasingTimestamp { .. }
            | Self::InvalidValue { .. } => ErrorKind::InputShape,
            Self::InvalidConfiguration { .. } | Self::UnknownMethod => ErrorKind::Configuration,
        }
    }

    pub(crate) fn config(parameter: &'static str, reason: &'static str) -> Self {
        Self::InvalidConfiguration { parameter, reason }
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for DetectionError {
    fn format(&self, fmt: defmt::Formatter) {
        match self {
            Self::InsufficientData { required, available } =>
                defmt::write!(fmt, "Need {} samples, have {}", required, available),
            Self::NonIncreasingTimestamp { index, previous, current } =>
                defmt::write!(fmt, "Timestamp {} at {} after {}", current, index, previous),
            Self::InvalidValue { index } =>
                defmt::write!(fmt, "Invalid value at {}", index),
            Self::InvalidConfiguration { parameter, reason } =>
                defmt::write!(fmt, "Config {}: {}", parameter, reason),
            Self::UnknownMethod =>
                defmt::write!(fmt, "Unknown method"),
        }
    }
}
