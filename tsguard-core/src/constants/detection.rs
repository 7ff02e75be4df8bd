//! Detection Defaults
//!
//! Cutoffs and multipliers for the outlier methods and the debouncing
//! defaults for shut-in detection.
//!
//! References: Iglewicz, B. and Hoaglin, D. C. (1993), *How to Detect and
//! Handle Outliers*. ASQC Basic References in Quality Control, Vol. 16.

use super::time::{MS_PER_HOUR, MS_PER_MINUTE};

// ===== Z-SCORES =====

/// Default z-score cutoff.
///
/// Three standard deviations: under a normal model about 0.13% of points
/// fall beyond on one side.
pub const DEFAULT_Z_SCORE_CUTOFF: f64 = 3.0;

// ===== MODIFIED Z-SCORES =====

/// Default modified z-score cutoff.
///
/// Source: Iglewicz & Hoaglin (1993), recommended value 3.5
pub const DEFAULT_MODIFIED_Z_CUTOFF: f64 = 3.5;

/// Scale applied to `(x - median) / MAD`.
///
/// 0.6745 is the 0.75 quantile of the standard normal, which makes the
/// modified z-score comparable to an ordinary z-score for normal data.
pub const MODIFIED_Z_SCALE: f64 = 0.6745;

// ===== INTERQUARTILE RANGE =====

/// Default IQR fence multiplier (Tukey's fences).
pub const DEFAULT_IQR_MULTIPLIER: f64 = 1.5;

// ===== FIXED THRESHOLDS =====

/// Default time step above which a step is a gap (milliseconds).
pub const DEFAULT_GAP_TIME_DELTA_MS: u64 = 5 * MS_PER_MINUTE;

/// Default density window (milliseconds).
pub const DEFAULT_DENSITY_WINDOW_MS: u64 = 5 * MS_PER_MINUTE;

/// Default minimum sample count per density window.
///
/// With a count threshold of 1 only empty windows are low density.
pub const DEFAULT_DENSITY_COUNT_THRESHOLD: u32 = 1;

// ===== SHUT-IN DETECTION =====

/// Default minimum duration of a threshold-crossing run before it is
/// accepted as a shut-in (milliseconds).
pub const DEFAULT_MIN_SHUTIN_LEN_MS: u64 = 6 * MS_PER_HOUR;

/// Minimum samples for a statistic to be computed over a sub-window.
///
/// A single value has no spread; sub-windows smaller than this are never
/// flagged by z-scores, modified z-scores or IQR.
pub const MIN_STATISTIC_SAMPLES: usize = 2;

/// Upper bound on the number of windows a series span may be split into.
///
/// Every window, empty or not, gets a count, so a tiny window over a long
/// sparse span would otherwise try to allocate one slot per millisecond.
pub const MAX_WINDOW_COUNT: u64 = 1 << 26;
