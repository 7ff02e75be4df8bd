//! Shut-in detection with duration debouncing
//!
//! ## Overview
//!
//! A shut-in is a sustained period where a monitored signal (typically a
//! valve position) sits on one side of a threshold. Short excursions are
//! noise and must not flip the reported state.
//!
//! ## State Machine
//!
//! ```text
//!                  same side, duration < min          same side
//!                 ┌──────────────┐                  ┌─────────┐
//!                 ▼              │                  ▼         │
//!   sample ──► CANDIDATE_{side} ─┴─ duration >= min ──► CONFIRMED_{side}
//!                 ▲                                       │
//!                 └────────────── other side ─────────────┘
//! ```
//!
//! - Every sample is classified into a raw side, open or shut.
//! - Consecutive samples on the same side form a run. Its duration is
//!   measured timestamp to timestamp, from the run's first sample to its
//!   latest one, because sampling is irregular.
//! - A run is confirmed once its duration reaches the minimum length. From
//!   then on the reported state is the run's side.
//! - Samples seen while the run was still a candidate are buffered. On
//!   confirmation the buffer is committed with the run's side (back-fill);
//!   if the run ends first it is noise and the buffer is committed with the
//!   previously confirmed state.
//!
//! Before any run is confirmed the reported state is open.
//!
//! A missing value continues the current run (sample-and-hold). Leading
//! missing samples, before any run exists, report the initial open state.
//!
//! ## Output
//!
//! One flag per input sample: `true` = shut in, `false` = open.
//!
//! ```rust
//! use tsguard_core::{Detector, ShutInDetector, TimeSeries};
//! use tsguard_core::time::minutes;
//!
//! // Valve above 0.5 for 8 hours, then below for 10 hours
//! let series = TimeSeries::from_pairs(
//!     (0..216).map(|i| (minutes(5 * i), if i < 96 { 1.0 } else { 0.0 })),
//! )?;
//!
//! let detector = ShutInDetector::default()
//!     .with_threshold(0.5)
//!     .with_shutin_below_threshold(false);
//! let state = detector.detect(&series)?;
//!
//! assert_eq!(state.intervals(), vec![(0, minutes(5 * 95))]);
//! # Ok::<(), tsguard_core::DetectionError>(())
//! ```

use alloc::vec::Vec;

use crate::{
    constants::detection::DEFAULT_MIN_SHUTIN_LEN_MS,
    errors::{DetectionError, DetectionResult},
    series::{FlagPoint, FlagSeries, TimeSeries},
    time::{self, DurationMs, Timestamp},
    traits::Detector,
};

/// Operating state of the hysteresis machine
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ShutInState {
    /// Open-side run shorter than the minimum
    CandidateOpen,
    /// Shut-side run shorter than the minimum
    CandidateShut,
    /// Open state accepted
    ConfirmedOpen,
    /// Shut-in accepted
    ConfirmedShut,
}

/// Shut-in detector settings
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize), serde(default))]
pub struct ShutInConfig {
    /// Signal level separating the two sides; `None` uses the mid-range of
    /// the present values
    pub threshold: Option<f64>,

    /// Minimum duration of a shut-side run (milliseconds)
    pub min_shutin_len_ms: DurationMs,

    /// Minimum duration of an open-side run; `None` uses
    /// `min_shutin_len_ms`
    pub min_open_len_ms: Option<DurationMs>,

    /// Shut in means below the threshold (otherwise above)
    pub shutin_state_below_threshold: bool,
}

impl Default for ShutInConfig {
    fn default() -> Self {
        Self {
            threshold: None,
            min_shutin_len_ms: DEFAULT_MIN_SHUTIN_LEN_MS,
            min_open_len_ms: None,
            shutin_state_below_threshold: true,
        }
    }
}

/// Debounced shut-in detector
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize), serde(transparent))]
pub struct ShutInDetector {
    config: ShutInConfig,
}

impl ShutInDetector {
    /// Detector from explicit settings
    pub fn new(config: ShutInConfig) -> Self {
        Self { config }
    }

    /// Fixed threshold between the open and shut sides
    pub fn with_threshold(mut self, threshold: f64) -> Self {
        self.config.threshold = Some(threshold);
        self
    }

    /// Minimum shut-in duration
    pub fn with_min_shutin_len(mut self, min_ms: DurationMs) -> Self {
        self.config.min_shutin_len_ms = min_ms;
        self
    }

    /// Minimum open duration between shut-ins
    pub fn with_min_open_len(mut self, min_ms: DurationMs) -> Self {
        self.config.min_open_len_ms = Some(min_ms);
        self
    }

    /// Whether shut in means below (`true`) or above (`false`) the threshold
    pub fn with_shutin_below_threshold(mut self, below: bool) -> Self {
        self.config.shutin_state_below_threshold = below;
        self
    }

    /// Current settings
    pub fn config(&self) -> &ShutInConfig {
        &self.config
    }

    /// Run the state machine over pre-binarized states
    ///
    /// `true` = raw shut side, `false` = raw open side, `None` = unknown
    /// (holds the current run). Timestamps must be strictly increasing.
    pub fn detect_states(&self, states: &[(Timestamp, Option<bool>)]) -> DetectionResult<FlagSeries> {
        self.validate()?;
        if states.is_empty() {
            return Err(DetectionError::InsufficientData { required: 1, available: 0 });
        }
        for (index, pair) in states.windows(2).enumerate() {
            if pair[1].0 <= pair[0].0 {
                return Err(DetectionError::NonIncreasingTimestamp {
                    index: index + 1,
                    previous: pair[0].0,
                    current: pair[1].0,
                });
            }
        }
        Ok(self.run(states.iter().copied()))
    }

    fn run<I>(&self, states: I) -> FlagSeries
    where
        I: IntoIterator<Item = (Timestamp, Option<bool>)>,
    {
        let mut machine = Hysteresis::new(
            self.config.min_shutin_len_ms,
            self.config.min_open_len_ms.unwrap_or(self.config.min_shutin_len_ms),
        );
        for (timestamp, shut) in states {
            machine.push(timestamp, shut);
        }
        machine.finish()
    }

    fn resolve_threshold(&self, series: &TimeSeries) -> Option<f64> {
        if let Some(threshold) = self.config.threshold {
            return Some(threshold);
        }
        let mut values = series.samples().iter().filter_map(|s| s.value);
        let first = match values.next() {
            Some(first) => first,
            None => {
                log_warn!("no values to derive a shut-in threshold from, reporting open");
                return None;
            }
        };
        let (lo, hi) = values.fold((first, first), |(lo, hi), v| (lo.min(v), hi.max(v)));
        Some(lo + (hi - lo) / 2.0)
    }
}

impl Detector for ShutInDetector {
    fn validate(&self) -> DetectionResult<()> {
        if let Some(threshold) = self.config.threshold {
            if !threshold.is_finite() {
                return Err(DetectionError::config("threshold", "must be a finite number"));
            }
        }
        if self.config.min_shutin_len_ms == 0 {
            return Err(DetectionError::config("min_shutin_len", "must be greater than zero"));
        }
        if self.config.min_open_len_ms == Some(0) {
            return Err(DetectionError::config("min_open_len", "must be greater than zero"));
        }
        Ok(())
    }

    fn detect(&self, series: &TimeSeries) -> DetectionResult<FlagSeries> {
        self.validate()?;
        series.require_len(1)?;

        let threshold = self.resolve_threshold(series);
        let below = self.config.shutin_state_below_threshold;
        let states = series.samples().iter().map(|sample| {
            let shut = match (sample.value, threshold) {
                (Some(value), Some(threshold)) if below => Some(value < threshold),
                (Some(value), Some(threshold)) => Some(value > threshold),
                _ => None,
            };
            (sample.timestamp, shut)
        });
        Ok(self.run(states))
    }
}

/// Run of consecutive samples on one raw side
#[derive(Debug, Clone, Copy)]
struct Run {
    shut: bool,
    start: Timestamp,
    latest: Timestamp,
    confirmed: bool,
}

impl Run {
    fn begin(shut: bool, timestamp: Timestamp) -> Self {
        Self { shut, start: timestamp, latest: timestamp, confirmed: false }
    }

    fn duration(&self) -> DurationMs {
        time::delta_ms(self.start, self.latest)
    }
}

/// Hysteresis machine for one detection pass
///
/// Candidate samples wait in `pending` until their run is decided; nothing
/// already in `output` is ever rewritten.
struct Hysteresis {
    min_shut_ms: DurationMs,
    min_open_ms: DurationMs,
    /// Last confirmed side, `false` (open) until the first confirmation
    confirmed_shut: bool,
    run: Option<Run>,
    pending: Vec<Timestamp>,
    output: Vec<FlagPoint>,
}

impl Hysteresis {
    fn new(min_shut_ms: DurationMs, min_open_ms: DurationMs) -> Self {
        Self {
            min_shut_ms,
            min_open_ms,
            confirmed_shut: false,
            run: None,
            pending: Vec::new(),
            output: Vec::new(),
        }
    }

    fn state(&self) -> ShutInState {
        match self.run {
            Some(Run { shut: true, confirmed: true, .. }) => ShutInState::ConfirmedShut,
            Some(Run { shut: false, confirmed: true, .. }) => ShutInState::ConfirmedOpen,
            Some(Run { shut: true, confirmed: false, .. }) => ShutInState::CandidateShut,
            Some(Run { shut: false, confirmed: false, .. }) => ShutInState::CandidateOpen,
            None if self.confirmed_shut => ShutInState::ConfirmedShut,
            None => ShutInState::ConfirmedOpen,
        }
    }

    fn push(&mut self, timestamp: Timestamp, shut: Option<bool>) {
        let side = match shut.or(self.run.map(|run| run.shut)) {
            Some(side) => side,
            None => {
                // No run to hold yet
                self.emit(timestamp, self.confirmed_shut);
                return;
            }
        };

        let current = self.run;
        let run = match current {
            Some(mut run) if run.shut == side => {
                run.latest = timestamp;
                run
            }
            Some(_) => {
                self.close_run();
                Run::begin(side, timestamp)
            }
            None => Run::begin(side, timestamp),
        };
        self.run = Some(run);

        if run.confirmed {
            self.emit(timestamp, side);
            return;
        }

        self.pending.push(timestamp);
        let min_ms = if side { self.min_shut_ms } else { self.min_open_ms };
        if run.duration() >= min_ms {
            self.confirm();
        }
    }

    fn confirm(&mut self) {
        if let Some(run) = self.run.as_mut() {
            run.confirmed = true;
            self.confirmed_shut = run.shut;
            log_debug!(
                "{} run confirmed after {} ms ({} samples back-filled)",
                if run.shut { "shut-in" } else { "open" },
                run.duration(),
                self.pending.len()
            );
        }
        debug_assert!(matches!(self.state(), ShutInState::ConfirmedOpen | ShutInState::ConfirmedShut));
        self.flush(self.confirmed_shut);
    }

    /// Decide the fate of the current run's buffered samples
    fn close_run(&mut self) {
        if let Some(run) = self.run.take() {
            if !run.confirmed {
                // Noise: keep reporting the last confirmed state
                self.flush(self.confirmed_shut);
            }
        }
    }

    fn flush(&mut self, shut: bool) {
        let pending = core::mem::take(&mut self.pending);
        for timestamp in pending {
            self.emit(timestamp, shut);
        }
    }

    fn emit(&mut self, timestamp: Timestamp, shut: bool) {
        self.output.push(FlagPoint { timestamp, flagged: shut });
    }

    fn finish(mut self) -> FlagSeries {
        self.close_run();
        FlagSeries::new(self.output)
    }
}
