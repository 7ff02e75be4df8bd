//! Shut-In Detection Example
//!
//! Detects sustained valve closures and ignores brief movements.
//!
//! ## What You'll Learn
//!
//! - Configuring threshold, side and minimum durations
//! - How candidate runs are back-filled once confirmed
//! - Missing readings continue the current run
//!
//! ## Running the Example
//!
//! ```bash
//! cargo run --example 03_shut_in
//! ```

use tsguard_core::{
    detectors::ShutInDetector,
    time::{hours, minutes},
    DetectionError, Detector, Sample, TimeSeries,
};

fn main() -> Result<(), DetectionError> {
    println!("TSGuard Shut-In Detection Example");
    println!("=================================\n");

    // Valve opening (0 = closed, 1 = open) every 10 minutes for two days
    let samples: Vec<Sample> = (0..288u64)
        .map(|i| {
            let t = minutes(10 * i);
            let closed = (hours(6)..hours(20)).contains(&t)
                || (hours(30)..hours(31)).contains(&t)
                || t >= hours(40);
            match i {
                // Telemetry dropout
                100..=104 => Sample::missing(t),
                _ => Sample::new(t, if closed { 0.02 } else { 0.97 }),
            }
        })
        .collect();
    let series = TimeSeries::new(samples)?;

    let detector = ShutInDetector::default()
        .with_threshold(0.1)
        .with_min_shutin_len(hours(6))
        .with_min_open_len(hours(2));
    let state = detector.detect(&series)?;

    println!("Configuration: {:?}\n", detector.config());
    println!("Shut-in periods:");
    for (start, end) in state.intervals() {
        println!("  from {:>5.1} h to {:>5.1} h", start as f64 / hours(1) as f64, end as f64 / hours(1) as f64);
    }

    println!("\nThe one hour closure at 30 h is shorter than six hours and is");
    println!("reported as open. The last closure lasts eight hours and is");
    println!("back-filled from its first sample.");

    Ok(())
}
