//! Time handling for sampled series
//!
//! Timestamps are integer milliseconds since the Unix epoch. Durations are
//! plain millisecond counts, which keeps window arithmetic exact: a 5 minute
//! cadence never accumulates float rounding across a day of samples.

use crate::constants::time::{MS_PER_HOUR, MS_PER_MINUTE, MS_PER_SECOND};

/// Timestamp in milliseconds since epoch
pub type Timestamp = u64;

/// Duration in milliseconds
pub type DurationMs = u64;

/// Duration of `n` seconds
pub const fn seconds(n: u64) -> DurationMs {
    n * MS_PER_SECOND
}

/// Duration of `n` minutes
pub const fn minutes(n: u64) -> DurationMs {
    n * MS_PER_MINUTE
}

/// Duration of `n` hours
pub const fn hours(n: u64) -> DurationMs {
    n * MS_PER_HOUR
}

/// Time elapsed from `earlier` to `later`, zero if the order is reversed
pub fn delta_ms(earlier: Timestamp, later: Timestamp) -> DurationMs {
    later.saturating_sub(earlier)
}

/// Index of the fixed window of width `window` anchored at `origin` that
/// contains `timestamp`
///
/// Window `i` covers `[origin + i * window, origin + (i + 1) * window)`.
pub fn window_index(origin: Timestamp, timestamp: Timestamp, window: DurationMs) -> usize {
    (delta_ms(origin, timestamp) / window) as usize
}
