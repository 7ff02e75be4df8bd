//! Gap identification
//!
//! A gap is an inter-sample step that is abnormally long compared to the
//! series' usual cadence. Sample values play no part: only the step sizes
//! `Δt` between consecutive timestamps are scored.
//!
//! Each step is attributed to the sample *after* it, so the output has one
//! point per sample except the first.
//!
//! Four methods are available, one constructor each:
//! - [`GapIdentifier::z_scores`]: step exceeds `cutoff` standard deviations
//! - [`GapIdentifier::modified_z_scores`]: median/MAD based, flags steps
//!   with `|z'| > cutoff` (so an abnormally short step too); robust to
//!   spread but blind to a few strong gaps in otherwise regular data
//! - [`GapIdentifier::iqr`]: step above `Q3 + k * IQR`
//! - [`GapIdentifier::threshold`]: step longer than a fixed `time_delta`
//!
//! With [`GapIdentifier::with_time_window`] the statistic is computed
//! independently per window of that width instead of over the whole series.

use alloc::vec::Vec;

use crate::{
    constants::detection::{
        DEFAULT_GAP_TIME_DELTA_MS, DEFAULT_IQR_MULTIPLIER, DEFAULT_MODIFIED_Z_CUTOFF,
        DEFAULT_Z_SCORE_CUTOFF,
    },
    errors::{DetectionError, DetectionResult},
    series::{FlagSeries, TimeSeries},
    statistics::{OutlierMethod, Side},
    time::{DurationMs, Timestamp},
    traits::Detector,
};

use super::utils::Partitioning;

/// Minimum samples for a series to have at least one step
const MIN_GAP_SAMPLES: usize = 2;

/// Gap identifier for irregularly sampled series
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GapIdentifier {
    /// Outlier criterion applied to the step sizes (milliseconds)
    #[cfg_attr(feature = "serde", serde(flatten))]
    method: OutlierMethod,

    /// Width of the independent statistic windows, `None` for one global
    /// statistic
    #[cfg_attr(feature = "serde", serde(default))]
    time_window_ms: Option<DurationMs>,
}

impl Default for GapIdentifier {
    fn default() -> Self {
        Self::z_scores(DEFAULT_Z_SCORE_CUTOFF)
    }
}

impl GapIdentifier {
    /// Identifier with an explicit method
    pub fn new(method: OutlierMethod) -> Self {
        Self { method, time_window_ms: None }
    }

    /// Flag steps more than `cutoff` standard deviations above the mean
    pub fn z_scores(cutoff: f64) -> Self {
        Self::new(OutlierMethod::ZScores { cutoff })
    }

    /// Flag steps whose modified z-score exceeds `cutoff`
    pub fn modified_z_scores(cutoff: f64) -> Self {
        Self::new(OutlierMethod::ModifiedZScores { cutoff })
    }

    /// Flag steps above `Q3 + k * IQR`
    pub fn iqr(k: f64) -> Self {
        Self::new(OutlierMethod::Iqr { k })
    }

    /// Flag steps strictly longer than `time_delta_ms`
    pub fn threshold(time_delta_ms: DurationMs) -> Self {
        Self::new(OutlierMethod::Threshold { value: time_delta_ms as f64 })
    }

    /// Modified z-scores with the default cutoff
    pub fn modified_z_scores_default() -> Self {
        Self::modified_z_scores(DEFAULT_MODIFIED_Z_CUTOFF)
    }

    /// IQR with the default multiplier
    pub fn iqr_default() -> Self {
        Self::iqr(DEFAULT_IQR_MULTIPLIER)
    }

    /// Fixed threshold of 5 minutes
    pub fn threshold_default() -> Self {
        Self::threshold(DEFAULT_GAP_TIME_DELTA_MS)
    }

    /// Compute the statistic per window of `window_ms` instead of globally
    pub fn with_time_window(mut self, window_ms: DurationMs) -> Self {
        self.time_window_ms = Some(window_ms);
        self
    }

    /// Configured method
    pub fn method(&self) -> OutlierMethod {
        self.method
    }

    /// Configured statistic window, if any
    pub fn time_window_ms(&self) -> Option<DurationMs> {
        self.time_window_ms
    }

    /// Tail scored by the configured method
    fn side(&self) -> Side {
        match self.method {
            OutlierMethod::ModifiedZScores { .. } => Side::Both,
            _ => Side::Upper,
        }
    }
}

impl Detector for GapIdentifier {
    fn validate(&self) -> DetectionResult<()> {
        self.method.validate()?;
        if let OutlierMethod::Threshold { value } = self.method {
            if value < 0.0 {
                return Err(DetectionError::config("time_delta", "must be non-negative"));
            }
        }
        Partitioning::from_window(self.time_window_ms)?;
        Ok(())
    }

    fn detect(&self, series: &TimeSeries) -> DetectionResult<FlagSeries> {
        self.validate()?;
        let partitioning = Partitioning::from_window(self.time_window_ms)?;
        series.require_len(MIN_GAP_SAMPLES)?;

        let steps = series.time_steps();
        let timestamps: Vec<Timestamp> = steps.points().iter().map(|p| p.timestamp).collect();
        let origin = series.first_timestamp().unwrap_or_default();

        let flags = partitioning.classify(
            &self.method,
            origin,
            &timestamps,
            &steps.deltas(),
            self.side(),
        );
        let result = FlagSeries::from_parts(timestamps, flags);

        log_debug!(
            "gap identification ({}) flagged {} of {} steps",
            self.method.kind(),
            result.flagged_count(),
            result.len()
        );
        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::time::{hours, minutes, seconds};
    use alloc::vec;

    /// Regular 5 minute cadence with the samples in `(from, to)` removed
    fn cadence_with_hole(count: u64, from: u64, to: u64) -> TimeSeries {
        TimeSeries::from_timestamps(
            (0..count)
                .map(|i| minutes(5 * i))
                .filter(|t| *t <= from || *t >= to),
        )
        .unwrap()
    }

    #[test]
    fn output_is_aligned_to_later_sample() {
        let series = TimeSeries::from_timestamps(vec![0, minutes(5), minutes(10)]).unwrap();
        let flags = GapIdentifier::threshold(minutes(5)).detect(&series).unwrap();
        assert_eq!(flags.len(), 2);
        assert_eq!(flags.points()[0].timestamp, minutes(5));
        assert_eq!(flags.points()[1].timestamp, minutes(10));
        assert!(!flags.any_flagged());
    }

    #[test]
    fn threshold_flags_only_the_long_step() {
        let series = cadence_with_hole(100, minutes(100), minutes(140));
        let flags = GapIdentifier::threshold(minutes(35)).detect(&series).unwrap();
        assert_eq!(flags.flagged_timestamps(), vec![minutes(140)]);
    }

    #[test]
    fn statistical_methods_find_a_clear_gap() {
        let series = cadence_with_hole(100, minutes(100), minutes(140));
        for identifier in [GapIdentifier::default(), GapIdentifier::iqr_default()] {
            let flags = identifier.detect(&series).unwrap();
            assert_eq!(flags.flagged_timestamps(), vec![minutes(140)], "{:?}", identifier);
        }
    }

    #[test]
    fn modified_z_scores_ignore_few_strong_gaps() {
        // Every step but one is identical, so the MAD is zero
        let series = cadence_with_hole(100, minutes(100), minutes(140));
        let flags = GapIdentifier::modified_z_scores_default().detect(&series).unwrap();
        assert!(!flags.any_flagged());
    }

    #[test]
    fn modified_z_scores_flag_abnormally_short_step() {
        // Steps in seconds; the final 1 s step sits far below the median
        let mut t = 0;
        let mut ts = vec![t];
        for step in [55, 60, 65, 58, 62, 60, 57, 63, 1] {
            t += seconds(step);
            ts.push(t);
        }
        let series = TimeSeries::from_timestamps(ts).unwrap();
        let flags = GapIdentifier::modified_z_scores_default().detect(&series).unwrap();
        assert_eq!(flags.flagged_timestamps(), vec![seconds(481)]);

        // Other methods stay one-sided
        assert!(!GapIdentifier::iqr_default().detect(&series).unwrap().any_flagged());
    }

    #[test]
    fn threshold_default_is_five_minutes() {
        let series = TimeSeries::from_timestamps(vec![0, minutes(5), minutes(11)]).unwrap();
        assert_eq!(
            GapIdentifier::threshold_default().method(),
            OutlierMethod::Threshold { value: minutes(5) as f64 }
        );
        let flags = GapIdentifier::threshold_default().detect(&series).unwrap();
        assert_eq!(flags.flagged_timestamps(), vec![minutes(11)]);
    }

    #[test]
    fn two_points_only_threshold_applies() {
        let series = TimeSeries::from_timestamps(vec![0, hours(3)]).unwrap();
        assert!(!GapIdentifier::default().detect(&series).unwrap().any_flagged());
        assert!(!GapIdentifier::iqr_default().detect(&series).unwrap().any_flagged());
        assert!(!GapIdentifier::modified_z_scores_default().detect(&series).unwrap().any_flagged());
        let flags = GapIdentifier::threshold(hours(1)).detect(&series).unwrap();
        assert_eq!(flags.flagged_timestamps(), vec![hours(3)]);
    }

    #[test]
    fn fewer_than_two_samples_is_an_input_error() {
        let series = TimeSeries::from_timestamps(vec![0]).unwrap();
        assert_eq!(
            GapIdentifier::default().detect(&series),
            Err(DetectionError::InsufficientData { required: 2, available: 1 })
        );
    }

    #[test]
    fn configuration_is_checked_before_input() {
        let empty = TimeSeries::from_timestamps(Vec::new()).unwrap();
        let err = GapIdentifier::z_scores(-1.0).detect(&empty).unwrap_err();
        assert!(matches!(err, DetectionError::InvalidConfiguration { parameter: "cutoff", .. }));

        let err = GapIdentifier::default().with_time_window(0).detect(&empty).unwrap_err();
        assert!(matches!(err, DetectionError::InvalidConfiguration { parameter: "time_window", .. }));

        let err = GapIdentifier::new(OutlierMethod::threshold(-5.0)).detect(&empty).unwrap_err();
        assert!(matches!(err, DetectionError::InvalidConfiguration { parameter: "time_delta", .. }));
    }

    #[test]
    fn windowed_statistic_is_local() {
        // First 6 hours at 5 minutes with one 20 minute step, next 12
        // hours at 30 minutes. Globally the 20 minute step is ordinary;
        // inside its own window it stands out.
        let mut ts: Vec<u64> = (0..72)
            .map(|i| minutes(5 * i))
            .filter(|t| !(minutes(50)..=minutes(60)).contains(t))
            .collect();
        ts.extend((0..24).map(|i| hours(6) + minutes(30 * i)));
        let series = TimeSeries::from_timestamps(ts).unwrap();

        let global = GapIdentifier::iqr_default().detect(&series).unwrap();
        assert!(!global.flagged_timestamps().contains(&minutes(65)));

        let windowed = GapIdentifier::iqr_default()
            .with_time_window(hours(6))
            .detect(&series)
            .unwrap();
        assert!(windowed.flagged_timestamps().contains(&minutes(65)));
    }
}
