//! Error Handling Example
//!
//! Shows how detectors reject malformed input and unusable settings
//! before computing anything.
//!
//! ## Error Categories
//!
//! 1. **Input shape** - too few samples, non-increasing timestamps, NaN values
//! 2. **Configuration** - negative cutoffs, zero windows, unknown method names
//!
//! Zero spread (all steps identical) is not an error: nothing is flagged.
//!
//! ## Running the Example
//!
//! ```bash
//! cargo run --example 04_error_handling
//! ```

use tsguard_core::{
    detectors::{GapIdentifier, LowDensityIdentifier, ShutInDetector},
    time::minutes,
    DetectionError, Detector, ErrorKind, MethodKind, TimeSeries,
};

fn report(label: &str, result: Result<impl core::fmt::Debug, DetectionError>) {
    match result {
        Ok(value) => println!("  {:<32} ok: {:?}", label, value),
        Err(e) => {
            let action = match e.kind() {
                ErrorKind::InputShape => "fix the data",
                ErrorKind::Configuration => "fix the settings",
            };
            println!("  {:<32} error: {} ({})", label, e, action);
        }
    }
}

fn main() -> Result<(), DetectionError> {
    println!("TSGuard Error Handling Example");
    println!("==============================\n");

    println!("Input shape:");
    report("duplicate timestamp", TimeSeries::from_timestamps(vec![0, minutes(5), minutes(5)]));
    report("NaN value", TimeSeries::from_pairs(vec![(0, 1.0), (minutes(5), f64::NAN)]));

    let single = TimeSeries::from_timestamps(vec![0])?;
    report("gaps on one sample", GapIdentifier::default().detect(&single).map(|f| f.len()));

    println!("\nConfiguration:");
    let series = TimeSeries::from_timestamps((0..12).map(|i| minutes(5 * i)))?;
    report("negative cutoff", GapIdentifier::z_scores(-3.0).detect(&series).map(|f| f.len()));
    report("zero density window", LowDensityIdentifier::threshold(0, 1).detect(&series).map(|f| f.len()));
    report("zero minimum shut-in", ShutInDetector::default().with_min_shutin_len(0).validate());
    report("method name 'median'", "median".parse::<MethodKind>());

    println!("\nDegenerate statistics:");
    report(
        "constant cadence, z-scores",
        GapIdentifier::default().detect(&series).map(|f| f.flagged_count()),
    );

    Ok(())
}
