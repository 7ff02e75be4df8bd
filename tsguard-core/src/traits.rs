//! Core traits for detectors
//!
//! Every detector turns a validated [`TimeSeries`] into a [`FlagSeries`].
//! Keep the seam small - detectors are pure functions of their
//! configuration and input.

use crate::errors::DetectionResult;
use crate::series::{FlagSeries, TimeSeries};

/// Core detector trait - implemented by gap, density and shut-in detection
///
/// Implementations must not keep state between calls: running `detect`
/// twice on the same input yields identical output.
///
/// ```rust
/// use tsguard_core::{Detector, GapIdentifier, TimeSeries};
/// use tsguard_core::time::minutes;
///
/// let series = TimeSeries::from_timestamps([0, minutes(5), minutes(10), minutes(50)])?;
/// let gaps = GapIdentifier::threshold(minutes(35)).detect(&series)?;
/// assert_eq!(gaps.flagged_timestamps(), vec![minutes(50)]);
/// # Ok::<(), tsguard_core::DetectionError>(())
/// ```
pub trait Detector {
    /// Validate configuration, then classify the series
    fn detect(&self, series: &TimeSeries) -> DetectionResult<FlagSeries>;

    /// Check configuration without touching any data
    fn validate(&self) -> DetectionResult<()>;
}

impl<D: Detector + ?Sized> Detector for &D {
    fn detect(&self, series: &TimeSeries) -> DetectionResult<FlagSeries> {
        (**self).detect(series)
    }

    fn validate(&self) -> DetectionResult<()> {
        (**self).validate()
    }
}
