//! Low-density identification
//!
//! Partitions the series' time span into fixed windows, counts the samples
//! that arrived in each, and flags windows whose count is anomalously
//! *low*. The test is one-sided: a burst of extra samples is never flagged.
//!
//! Windows are anchored at the first sample. Empty windows inside the span
//! count as zero, and the trailing window is evaluated even when the
//! series ends before it is complete. A short trailing window therefore
//! tends to look sparse; trim the series to whole windows if that matters.
//!
//! ```rust
//! use tsguard_core::{Detector, LowDensityIdentifier, TimeSeries};
//! use tsguard_core::time::minutes;
//!
//! // 5 minute cadence for two hours, except a hole from 70 to 110 minutes
//! let series = TimeSeries::from_timestamps(
//!     (0..24).map(|i| minutes(5 * i)).filter(|t| *t < minutes(70) || *t > minutes(110)),
//! )?;
//!
//! let low = LowDensityIdentifier::threshold(minutes(60), 10).detect(&series)?;
//! assert_eq!(low.flagged_timestamps(), vec![minutes(60)]);
//! # Ok::<(), tsguard_core::DetectionError>(())
//! ```

use crate::{
    constants::detection::{
        DEFAULT_DENSITY_COUNT_THRESHOLD, DEFAULT_DENSITY_WINDOW_MS, DEFAULT_IQR_MULTIPLIER,
        DEFAULT_MODIFIED_Z_CUTOFF, DEFAULT_Z_SCORE_CUTOFF,
    },
    errors::{DetectionError, DetectionResult},
    series::{FlagSeries, TimeSeries},
    statistics::{OutlierMethod, Side},
    time::DurationMs,
    traits::Detector,
};

/// Low-density window identifier
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LowDensityIdentifier {
    /// Outlier criterion applied to per-window counts
    #[cfg_attr(feature = "serde", serde(flatten))]
    method: OutlierMethod,

    /// Width of the counting windows
    time_window_ms: DurationMs,
}

impl Default for LowDensityIdentifier {
    fn default() -> Self {
        Self::threshold(DEFAULT_DENSITY_WINDOW_MS, DEFAULT_DENSITY_COUNT_THRESHOLD)
    }
}

impl LowDensityIdentifier {
    /// Identifier with an explicit method
    pub fn new(time_window_ms: DurationMs, method: OutlierMethod) -> Self {
        Self { method, time_window_ms }
    }

    /// Flag windows whose count is more than `cutoff` standard deviations
    /// below the mean count
    pub fn z_scores(time_window_ms: DurationMs, cutoff: f64) -> Self {
        Self::new(time_window_ms, OutlierMethod::ZScores { cutoff })
    }

    /// Flag windows whose modified z-score is below `-cutoff`
    pub fn modified_z_scores(time_window_ms: DurationMs, cutoff: f64) -> Self {
        Self::new(time_window_ms, OutlierMethod::ModifiedZScores { cutoff })
    }

    /// Flag windows whose count is below `Q1 - k * IQR`
    pub fn iqr(time_window_ms: DurationMs, k: f64) -> Self {
        Self::new(time_window_ms, OutlierMethod::Iqr { k })
    }

    /// Flag windows holding fewer than `count_threshold` samples
    pub fn threshold(time_window_ms: DurationMs, count_threshold: u32) -> Self {
        Self::new(
            time_window_ms,
            OutlierMethod::Threshold { value: f64::from(count_threshold) },
        )
    }

    /// Z-scores over `time_window_ms` windows with the default cutoff
    pub fn z_scores_default(time_window_ms: DurationMs) -> Self {
        Self::z_scores(time_window_ms, DEFAULT_Z_SCORE_CUTOFF)
    }

    /// Modified z-scores over `time_window_ms` windows with the default cutoff
    pub fn modified_z_scores_default(time_window_ms: DurationMs) -> Self {
        Self::modified_z_scores(time_window_ms, DEFAULT_MODIFIED_Z_CUTOFF)
    }

    /// IQR over `time_window_ms` windows with the default multiplier
    pub fn iqr_default(time_window_ms: DurationMs) -> Self {
        Self::iqr(time_window_ms, DEFAULT_IQR_MULTIPLIER)
    }

    /// Configured method
    pub fn method(&self) -> OutlierMethod {
        self.method
    }

    /// Counting window width
    pub fn time_window_ms(&self) -> DurationMs {
        self.time_window_ms
    }
}

impl Detector for LowDensityIdentifier {
    fn validate(&self) -> DetectionResult<()> {
        self.method.validate()?;
        if let OutlierMethod::Threshold { value } = self.method {
            if value < 0.0 {
                return Err(DetectionError::config("count_threshold", "must be non-negative"));
            }
        }
        if self.time_window_ms == 0 {
            return Err(DetectionError::config("time_window", "must be greater than zero"));
        }
        Ok(())
    }

    fn detect(&self, series: &TimeSeries) -> DetectionResult<FlagSeries> {
        self.validate()?;
        series.require_len(1)?;

        let windows = series.window_counts(self.time_window_ms)?;
        let flags = self.method.classify(&windows.counts(), Side::Lower);
        let result = FlagSeries::from_parts(windows.points().iter().map(|w| w.start), flags);

        log_debug!(
            "low-density identification ({}) flagged {} of {} windows",
            self.method.kind(),
            result.flagged_count(),
            result.len()
        );
        Ok(result)
    }
}
