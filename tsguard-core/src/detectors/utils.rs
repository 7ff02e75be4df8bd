//! Shared partitioning for windowed statistics
//!
//! Gap identification can compute its statistic over the whole series or
//! independently per fixed window. The two modes are kept as explicit
//! variants of [`Partitioning`] so a windowed call can never silently fall
//! back to the global statistic.
//!
//! Windows are anchored at the first sample of the series: window `i`
//! covers `[t0 + i*w, t0 + (i+1)*w)`. Each value is attributed to a window
//! by its own timestamp.

use alloc::vec::Vec;

use crate::{
    constants::detection::MIN_STATISTIC_SAMPLES,
    errors::{DetectionError, DetectionResult},
    statistics::{OutlierMethod, Side},
    time::{self, DurationMs, Timestamp},
};

/// How a sample is split before the statistic runs
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Partitioning {
    /// One statistic over every value
    Global,
    /// One statistic per fixed window
    Windowed {
        /// Window width
        window_ms: DurationMs,
    },
}

impl Partitioning {
    /// Global when `window` is `None`, windowed otherwise
    pub fn from_window(window: Option<DurationMs>) -> DetectionResult<Self> {
        match window {
            None => Ok(Self::Global),
            Some(0) => Err(DetectionError::config("time_window", "must be greater than zero")),
            Some(window_ms) => Ok(Self::Windowed { window_ms }),
        }
    }

    /// Classify `values`, each attributed to the timestamp at the same index
    ///
    /// In windowed mode a window holding fewer than two values is never
    /// flagged by a statistical method; a fixed threshold still applies to
    /// every value.
    pub fn classify(
        &self,
        method: &OutlierMethod,
        origin: Timestamp,
        timestamps: &[Timestamp],
        values: &[f64],
        side: Side,
    ) -> Vec<bool> {
        debug_assert_eq!(timestamps.len(), values.len());

        let window_ms = match *self {
            Self::Global => return method.classify(values, side),
            Self::Windowed { window_ms } => window_ms,
        };

        let mut flags = Vec::with_capacity(values.len());
        for range in window_ranges(origin, timestamps, window_ms) {
            let slice = &values[range];
            if method.is_statistical() && slice.len() < MIN_STATISTIC_SAMPLES {
                flags.extend(core::iter::repeat(false).take(slice.len()));
            } else {
                flags.extend(method.classify(slice, side));
            }
        }
        flags
    }
}

/// Index ranges of consecutive timestamps that share a window
///
/// `timestamps` must be ascending. Windows without any timestamp produce no
/// range.
pub fn window_ranges(
    origin: Timestamp,
    timestamps: &[Timestamp],
    window_ms: DurationMs,
) -> Vec<core::ops::Range<usize>> {
    let mut ranges = Vec::new();
    let mut start = 0;
    for i in 1..=timestamps.len() {
        let boundary = i == timestamps.len()
            || time::window_index(origin, timestamps[i], window_ms)
                != time::window_index(origin, timestamps[start], window_ms);
        if boundary {
            ranges.push(start..i);
            start = i;
        }
    }
    ranges
}
