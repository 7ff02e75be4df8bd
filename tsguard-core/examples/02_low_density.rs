//! Low-Density Identification Example
//!
//! Counts samples per window and flags the windows that received too
//! few of them.
//!
//! ## What You'll Learn
//!
//! - Window counts anchored at the first sample
//! - A fixed minimum count versus statistical methods
//! - Empty windows count as zero
//!
//! ## Running the Example
//!
//! ```bash
//! cargo run --example 02_low_density
//! ```

use tsguard_core::{
    detectors::LowDensityIdentifier,
    time::{hours, minutes, Timestamp},
    DetectionError, Detector, OutlierMethod, TimeSeries,
};

fn main() -> Result<(), DetectionError> {
    println!("TSGuard Low-Density Identification Example");
    println!("==========================================\n");

    // One day at 5 minutes; the 10:00 hour keeps only 3 samples and
    // 15:00 to 17:00 is missing entirely
    let timestamps: Vec<Timestamp> = (0..288u64)
        .map(|i| minutes(5 * i))
        .filter(|t| !(hours(10) + minutes(15)..hours(11)).contains(t))
        .filter(|t| !(hours(15)..hours(17)).contains(t))
        .collect();
    let series = TimeSeries::from_timestamps(timestamps)?;

    let windows = series.window_counts(hours(1))?;
    println!("Samples per hour:");
    for window in windows.points() {
        println!("  {:02}:00  {:>2} {}", window.start / hours(1), window.count, "#".repeat(window.count as usize));
    }
    println!();

    let identifiers = [
        ("threshold (< 10 per hour)", LowDensityIdentifier::threshold(hours(1), 10)),
        ("z-scores", LowDensityIdentifier::z_scores_default(hours(1))),
        ("IQR", LowDensityIdentifier::iqr_default(hours(1))),
        (
            "modified z-scores (cutoff 1)",
            LowDensityIdentifier::new(hours(1), OutlierMethod::ModifiedZScores { cutoff: 1.0 }),
        ),
    ];

    for (name, identifier) in &identifiers {
        let flags = identifier.detect(&series)?;
        let hours_flagged: Vec<u64> = flags.flagged_timestamps().iter().map(|t| t / hours(1)).collect();
        println!("{:<30} low-density hours: {:?}", name, hours_flagged);
    }

    Ok(())
}
