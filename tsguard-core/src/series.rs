//! Time series data model
//!
//! [`TimeSeries`] is the validated input every detector consumes. The
//! derived series ([`TimeStepSeries`], [`WindowCountSeries`]) are what the
//! statistics actually run over, and [`FlagSeries`] is what detectors hand
//! back. Detectors never mutate their input; every derived series is a
//! fresh allocation.
//!
//! ```rust
//! use tsguard_core::series::{Sample, TimeSeries};
//! use tsguard_core::time::minutes;
//!
//! let series = TimeSeries::new(vec![
//!     Sample::new(0, 1.0),
//!     Sample::new(minutes(5), 1.1),
//!     Sample::missing(minutes(10)),
//! ])?;
//!
//! let steps = series.time_steps();
//! assert_eq!(steps.len(), 2);
//! assert_eq!(steps.points()[0].timestamp, minutes(5));
//! # Ok::<(), tsguard_core::DetectionError>(())
//! ```

use alloc::vec::Vec;

use crate::{
    constants::detection::MAX_WINDOW_COUNT,
    errors::{DetectionError, DetectionResult},
    time::{self, DurationMs, Timestamp},
};

/// One observation: a timestamp and a value that may be missing
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Sample {
    /// Milliseconds since epoch
    pub timestamp: Timestamp,
    /// Reading, `None` when the source reported no value
    pub value: Option<f64>,
}

impl Sample {
    /// Sample with a present value
    pub fn new(timestamp: Timestamp, value: f64) -> Self {
        Self { timestamp, value: Some(value) }
    }

    /// Sample whose value is missing
    pub fn missing(timestamp: Timestamp) -> Self {
        Self { timestamp, value: None }
    }
}

/// Ordered samples with strictly increasing timestamps
///
/// Construction validates ordering and finiteness, so every detector can
/// rely on `Δt > 0` between neighbours.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(try_from = "Vec<Sample>", into = "Vec<Sample>")
)]
pub struct TimeSeries {
    samples: Vec<Sample>,
}

impl TimeSeries {
    /// Validate and wrap samples
    ///
    /// Rejects duplicate or decreasing timestamps and present values that
    /// are NaN or infinite. An empty series is allowed here; each detector
    /// enforces its own minimum length.
    pub fn new(samples: Vec<Sample>) -> DetectionResult<Self> {
        for (index, sample) in samples.iter().enumerate() {
            if let Some(value) = sample.value {
                if !value.is_finite() {
                    return Err(DetectionError::InvalidValue { index });
                }
            }
            if index > 0 {
                let previous = samples[index - 1].timestamp;
                if sample.timestamp <= previous {
                    return Err(DetectionError::NonIncreasingTimestamp {
                        index,
                        previous,
                        current: sample.timestamp,
                    });
                }
            }
        }
        Ok(Self { samples })
    }

    /// Build from `(timestamp, value)` pairs
    pub fn from_pairs<I>(pairs: I) -> DetectionResult<Self>
    where
        I: IntoIterator<Item = (Timestamp, f64)>,
    {
        Self::new(pairs.into_iter().map(|(t, v)| Sample::new(t, v)).collect())
    }

    /// Build from timestamps alone; values are recorded as missing
    ///
    /// Gap and density detection only look at timestamps.
    pub fn from_timestamps<I>(timestamps: I) -> DetectionResult<Self>
    where
        I: IntoIterator<Item = Timestamp>,
    {
        Self::new(timestamps.into_iter().map(Sample::missing).collect())
    }

    /// Number of samples
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    /// True when there are no samples
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Borrow the samples
    pub fn samples(&self) -> &[Sample] {
        &self.samples
    }

    /// Iterate over timestamps in order
    pub fn timestamps(&self) -> impl Iterator<Item = Timestamp> + '_ {
        self.samples.iter().map(|s| s.timestamp)
    }

    /// First timestamp, if any
    pub fn first_timestamp(&self) -> Option<Timestamp> {
        self.samples.first().map(|s| s.timestamp)
    }

    /// Last timestamp, if any
    pub fn last_timestamp(&self) -> Option<Timestamp> {
        self.samples.last().map(|s| s.timestamp)
    }

    /// Fail with `InsufficientData` unless at least `required` samples exist
    pub fn require_len(&self, required: usize) -> DetectionResult<()> {
        if self.samples.len() < required {
            return Err(DetectionError::InsufficientData {
                required,
                available: self.samples.len(),
            });
        }
        Ok(())
    }

    /// Inter-sample steps, each attributed to the later sample
    pub fn time_steps(&self) -> TimeStepSeries {
        let points = self
            .samples
            .windows(2)
            .map(|pair| TimeStep {
                timestamp: pair[1].timestamp,
                delta_ms: time::delta_ms(pair[0].timestamp, pair[1].timestamp),
            })
            .collect();
        TimeStepSeries { points }
    }

    /// Sample counts over fixed windows anchored at the first timestamp
    ///
    /// Window `i` covers `[t0 + i*w, t0 + (i+1)*w)`. Empty windows inside
    /// the span are kept with a count of zero, and so is the trailing
    /// partial window.
    pub fn window_counts(&self, window_ms: DurationMs) -> DetectionResult<WindowCountSeries> {
        if window_ms == 0 {
            return Err(DetectionError::config("time_window", "must be greater than zero"));
        }
        let (origin, last) = match (self.first_timestamp(), self.last_timestamp()) {
            (Some(first), Some(last)) => (first, last),
            _ => {
                return Ok(WindowCountSeries { window_ms, points: Vec::new() });
            }
        };

        let window_total = time::delta_ms(origin, last) / window_ms + 1;
        if window_total > MAX_WINDOW_COUNT {
            return Err(DetectionError::config("time_window", "too small for the series span"));
        }
        let window_total = window_total as usize;
        let mut counts = Vec::new();
        if counts.try_reserve_exact(window_total).is_err() {
            return Err(DetectionError::config("time_window", "too small for the series span"));
        }
        counts.resize(window_total, 0u32);
        for timestamp in self.timestamps() {
            counts[time::window_index(origin, timestamp, window_ms)] += 1;
        }

        let points = counts
            .into_iter()
            .enumerate()
            .map(|(i, count)| WindowCount {
                start: origin + i as u64 * window_ms,
                count,
            })
            .collect();
        Ok(WindowCountSeries { window_ms, points })
    }
}

impl TryFrom<Vec<Sample>> for TimeSeries {
    type Error = DetectionError;

    fn try_from(samples: Vec<Sample>) -> DetectionResult<Self> {
        Self::new(samples)
    }
}

impl From<TimeSeries> for Vec<Sample> {
    fn from(series: TimeSeries) -> Self {
        series.samples
    }
}

/// Gap to the previous sample, attributed to the later one
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeStep {
    /// Timestamp of the later sample of the pair
    pub timestamp: Timestamp,
    /// Time since the previous sample
    pub delta_ms: DurationMs,
}

/// Derived series of inter-sample steps, `len = samples - 1`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimeStepSeries {
    points: Vec<TimeStep>,
}

impl TimeStepSeries {
    /// Borrow the steps
    pub fn points(&self) -> &[TimeStep] {
        &self.points
    }

    /// Number of steps
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// True for a series with fewer than two samples
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Step sizes as floats, ready for the statistics
    pub fn deltas(&self) -> Vec<f64> {
        self.points.iter().map(|p| p.delta_ms as f64).collect()
    }
}

/// Count of samples in one window
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WindowCount {
    /// Inclusive window start
    pub start: Timestamp,
    /// Samples with `start <= t < start + window`
    pub count: u32,
}

/// Derived series of per-window sample counts
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WindowCountSeries {
    window_ms: DurationMs,
    points: Vec<WindowCount>,
}

impl WindowCountSeries {
    /// Window width
    pub fn window_ms(&self) -> DurationMs {
        self.window_ms
    }

    /// Borrow the windows
    pub fn points(&self) -> &[WindowCount] {
        &self.points
    }

    /// Number of windows
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// True for an empty input series
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Counts as floats, ready for the statistics
    pub fn counts(&self) -> Vec<f64> {
        self.points.iter().map(|p| f64::from(p.count)).collect()
    }
}

/// One classified point of a detector's output
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FlagPoint {
    /// Timestamp the flag is attributed to
    pub timestamp: Timestamp,
    /// True where the detector classified the point as anomalous (or, for
    /// shut-in detection, as shut in)
    pub flagged: bool,
}

/// Detector output: one boolean per timestamp of the derived series
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FlagSeries {
    points: Vec<FlagPoint>,
}

impl FlagSeries {
    /// Wrap already-aligned points
    pub fn new(points: Vec<FlagPoint>) -> Self {
        Self { points }
    }

    /// Zip timestamps with flags
    pub fn from_parts<T, F>(timestamps: T, flags: F) -> Self
    where
        T: IntoIterator<Item = Timestamp>,
        F: IntoIterator<Item = bool>,
    {
        let points = timestamps
            .into_iter()
            .zip(flags)
            .map(|(timestamp, flagged)| FlagPoint { timestamp, flagged })
            .collect();
        Self { points }
    }

    /// Borrow the points
    pub fn points(&self) -> &[FlagPoint] {
        &self.points
    }

    /// Iterate over the points
    pub fn iter(&self) -> core::slice::Iter<'_, FlagPoint> {
        self.points.iter()
    }

    /// Number of points
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// True when the detector produced no points
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Flags without timestamps
    pub fn flags(&self) -> Vec<bool> {
        self.points.iter().map(|p| p.flagged).collect()
    }

    /// Timestamps of flagged points
    pub fn flagged_timestamps(&self) -> Vec<Timestamp> {
        self.points
            .iter()
            .filter(|p| p.flagged)
            .map(|p| p.timestamp)
            .collect()
    }

    /// How many points are flagged
    pub fn flagged_count(&self) -> usize {
        self.points.iter().filter(|p| p.flagged).count()
    }

    /// True when at least one point is flagged
    pub fn any_flagged(&self) -> bool {
        self.points.iter().any(|p| p.flagged)
    }

    /// Contiguous flagged runs as inclusive `(first, last)` timestamps
    pub fn intervals(&self) -> Vec<(Timestamp, Timestamp)> {
        let mut intervals = Vec::new();
        let mut open: Option<(Timestamp, Timestamp)> = None;
        for point in &self.points {
            open = match (open, point.flagged) {
                (Some((start, _)), true) => Some((start, point.timestamp)),
                (None, true) => Some((point.timestamp, point.timestamp)),
                (Some(run), false) => {
                    intervals.push(run);
                    None
                }
                (None, false) => None,
            };
        }
        if let Some(run) = open {
            intervals.push(run);
        }
        intervals
    }

    /// 0/1 step values per timestamp
    pub fn to_step_values(&self) -> Vec<(Timestamp, u8)> {
        self.points
            .iter()
            .map(|p| (p.timestamp, u8::from(p.flagged)))
            .collect()
    }
}

impl<'a> IntoIterator for &'a FlagSeries {
    type Item = &'a FlagPoint;
    type IntoIter = core::slice::Iter<'a, FlagPoint>;

    fn into_iter(self) -> Self::IntoIter {
        self.points.iter()
    }
}
