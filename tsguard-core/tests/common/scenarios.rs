//! Pre-built scenarios for integration testing
//!
//! Calendar dates are expressed with `chrono` and converted to the
//! millisecond timestamps the detectors work with.

use chrono::NaiveDate;
use tsguard_core::time::{hours, minutes, Timestamp};
use tsguard_core::TimeSeries;

use super::generators::{series, SeriesGenerator};

/// Milliseconds since the Unix epoch for a UTC wall-clock time
pub fn utc_ms(year: i32, month: u32, day: u32, hour: u32, minute: u32) -> Timestamp {
    let datetime = NaiveDate::from_ymd_opt(year, month, day)
        .and_then(|date| date.and_hms_opt(hour, minute, 0))
        .expect("valid calendar time");
    datetime.and_utc().timestamp_millis() as Timestamp
}

/// Start of every scenario day
pub fn day_start() -> Timestamp {
    utc_ms(2022, 1, 1, 0, 0)
}

/// 5 minute cadence over 2022-01-01, both midnights included, with the
/// samples strictly between 10:00 and 10:40 removed
pub struct GapScenario {
    pub series: TimeSeries,
    /// Sample right after the 40 minute step
    pub gap_end: Timestamp,
}

pub fn single_gap_day() -> GapScenario {
    let start = day_start();
    let gap_start = utc_ms(2022, 1, 1, 10, 0);
    let gap_end = utc_ms(2022, 1, 1, 10, 40);
    let data = SeriesGenerator::line(start, utc_ms(2022, 1, 2, 0, 0), minutes(5), 0.0, 0.0)
        .into_iter()
        .filter(|(t, _)| *t <= gap_start || *t >= gap_end)
        .collect();
    GapScenario { series: series(data), gap_end }
}

/// 5 minute cadence from 00:00 to 23:55 where the 10:00 hour window only
/// keeps its first 3 samples
pub struct DensityScenario {
    pub series: TimeSeries,
    /// Start of the sparse 60 minute window
    pub sparse_window: Timestamp,
}

pub fn sparse_hour_day() -> DensityScenario {
    let start = day_start();
    let sparse_window = start + hours(10);
    let data = SeriesGenerator::line(start, start + hours(24) - minutes(5), minutes(5), 0.0, 0.0)
        .into_iter()
        .filter(|(t, _)| *t < sparse_window + minutes(15) || *t >= sparse_window + hours(1))
        .collect();
    DensityScenario { series: series(data), sparse_window }
}

/// Valve signal at 1.0 for 8 hours, then 0.0 for the rest of the day
pub struct ShutInScenario {
    pub series: TimeSeries,
    /// Number of samples above the threshold
    pub high_samples: usize,
}

pub fn eight_hour_high_valve() -> ShutInScenario {
    let high_samples = 96;
    let data = SeriesGenerator::steps(day_start(), minutes(5), &[(1.0, high_samples), (0.0, 192)]);
    ShutInScenario { series: series(data), high_samples }
}
