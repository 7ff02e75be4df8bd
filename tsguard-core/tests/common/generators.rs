//! Synthetic series generators for integration tests
//!
//! Every random choice comes from an explicitly seeded generator, so a
//! failing test reproduces exactly from its seed.

use tsguard_core::time::{DurationMs, Timestamp};
use tsguard_core::TimeSeries;

/// How [`SeriesGenerator::insert_data_gaps`] removes samples
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GapMethod {
    /// Remove individual samples at random positions
    Random,
    /// Remove `num_gaps` contiguous blocks at random positions
    Multiple { num_gaps: usize },
}

/// Seeded generator for sample sets with injected gaps
pub struct SeriesGenerator {
    seed: u32,
}

impl SeriesGenerator {
    pub fn new(seed: u32) -> Self {
        Self { seed }
    }

    /// Straight line `intercept + slope * hours` sampled at constant cadence,
    /// both ends included
    pub fn line(
        start: Timestamp,
        end: Timestamp,
        step: DurationMs,
        slope: f64,
        intercept: f64,
    ) -> Vec<(Timestamp, f64)> {
        assert!(step > 0, "cadence must be positive");
        let mut out = Vec::new();
        let mut t = start;
        while t <= end {
            let elapsed_hours = (t - start) as f64 / 3_600_000.0;
            out.push((t, intercept + slope * elapsed_hours));
            t += step;
        }
        out
    }

    /// Piecewise constant signal: each `(level, count)` segment contributes
    /// `count` samples at `level`
    pub fn steps(start: Timestamp, step: DurationMs, segments: &[(f64, usize)]) -> Vec<(Timestamp, f64)> {
        let mut out = Vec::new();
        let mut t = start;
        for &(level, count) in segments {
            for _ in 0..count {
                out.push((t, level));
                t += step;
            }
        }
        out
    }

    /// Remove `fraction` of the samples
    ///
    /// The first and last samples are always kept so the time span of the
    /// data is unchanged.
    pub fn insert_data_gaps(
        &mut self,
        data: &[(Timestamp, f64)],
        fraction: f64,
        method: GapMethod,
    ) -> Vec<(Timestamp, f64)> {
        assert!((0.0..1.0).contains(&fraction), "fraction must be in [0, 1)");
        if data.len() < 3 {
            return data.to_vec();
        }

        let interior = data.len() - 2;
        let to_remove = ((interior as f64) * fraction).round() as usize;
        let mut removed = vec![false; data.len()];

        match method {
            GapMethod::Random => {
                let mut remaining = to_remove;
                while remaining > 0 {
                    let index = 1 + self.random_index(interior);
                    if !removed[index] {
                        removed[index] = true;
                        remaining -= 1;
                    }
                }
            }
            GapMethod::Multiple { num_gaps } => {
                let num_gaps = num_gaps.clamp(1, interior);
                let gap_len = to_remove / num_gaps;
                let segment = interior / num_gaps;
                // One gap per segment; the segment's last sample survives
                // so neighbouring gaps never merge
                for gap in 0..num_gaps {
                    if gap_len == 0 || gap_len >= segment {
                        continue;
                    }
                    let slack = segment - gap_len;
                    let start = 1 + gap * segment + self.random_index(slack);
                    for flag in &mut removed[start..start + gap_len] {
                        *flag = true;
                    }
                }
            }
        }

        data.iter()
            .zip(removed)
            .filter(|(_, gone)| !gone)
            .map(|(sample, _)| *sample)
            .collect()
    }

    fn random_float(&mut self) -> f64 {
        // Linear congruential generator
        self.seed = self.seed.wrapping_mul(1664525).wrapping_add(1013904223);
        (self.seed >> 8) as f64 / 16_777_216.0
    }

    fn random_index(&mut self, len: usize) -> usize {
        ((self.random_float() * len as f64) as usize).min(len.saturating_sub(1))
    }
}

/// Build a validated series, panicking on malformed test data
pub fn series(pairs: Vec<(Timestamp, f64)>) -> TimeSeries {
    TimeSeries::from_pairs(pairs).expect("generated series is ordered and finite")
}
