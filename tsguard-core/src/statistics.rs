//! Robust Statistics for Outlier Classification
//!
//! ## Overview
//!
//! Gap and density detection reduce a time series to a plain sample of
//! numbers (step sizes or window counts). This module turns such a sample
//! into one boolean per value: "is this value an outlier on the side we
//! care about?".
//!
//! The statistic is always computed over the whole slice it is given.
//! Windowing, when a caller asks for it, happens upstream by slicing the
//! sample before calling [`OutlierMethod::classify`] on each slice.
//!
//! ## Methods
//!
//! | Method               | Reference        | Flag on `Upper` side           |
//! |----------------------|------------------|--------------------------------|
//! | `ZScores`            | mean, std (pop.) | `(x - mean) / std > cutoff`    |
//! | `ModifiedZScores`    | median, MAD      | `0.6745 (x - med) / MAD > cut` |
//! | `Iqr`                | Q1, Q3           | `x > Q3 + k * (Q3 - Q1)`       |
//! | `Threshold`          | none             | `x > value`                    |
//!
//! The `Lower` side mirrors each test: `z < -cutoff`, `x < Q1 - k * IQR`,
//! `x < value`.
//!
//! ### Degenerate spread
//!
//! A constant sample has `std == 0` and `MAD == 0`. Both z-score variants
//! then flag nothing. This is not an error: median-based methods are
//! insensitive to a few large outliers, and a sample dominated by one value
//! has a zero MAD even when a handful of points sit far away.
//!
//! Quartiles use linear interpolation between closest ranks, the same
//! convention as numpy's default percentile.
//!
//! ```rust
//! use tsguard_core::statistics::{OutlierMethod, Side};
//!
//! let steps = [5.0, 5.0, 5.0, 5.0, 5.0, 5.0, 40.0];
//! let flags = OutlierMethod::iqr().classify(&steps, Side::Upper);
//! assert_eq!(flags, vec![false, false, false, false, false, false, true]);
//!
//! // All steps but one are identical, so the MAD is zero
//! let flags = OutlierMethod::modified_z_scores().classify(&steps, Side::Upper);
//! assert!(flags.iter().all(|f| !f));
//! ```

use alloc::vec::Vec;
use core::fmt;
use core::str::FromStr;

use crate::{
    constants::detection::{
        DEFAULT_IQR_MULTIPLIER, DEFAULT_MODIFIED_Z_CUTOFF, DEFAULT_Z_SCORE_CUTOFF,
        MODIFIED_Z_SCALE,
    },
    errors::{DetectionError, DetectionResult},
};

/// Which tail of the distribution counts as anomalous
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    /// Too large (gaps: a step much longer than usual)
    Upper,
    /// Too small (density: a window with too few samples)
    Lower,
    /// Either tail (gaps scored by modified z-score: `|z'| > cutoff`)
    Both,
}

/// Outlier criterion with its tuning parameter
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(tag = "method", rename_all = "snake_case")
)]
pub enum OutlierMethod {
    /// Standard score against mean and population standard deviation
    ZScores {
        /// Number of standard deviations
        cutoff: f64,
    },
    /// Iglewicz-Hoaglin modified z-score against median and MAD
    ModifiedZScores {
        /// Modified z-score limit
        cutoff: f64,
    },
    /// Tukey fences around the interquartile range
    Iqr {
        /// Fence multiplier
        k: f64,
    },
    /// Fixed limit, no statistic
    Threshold {
        /// Values strictly beyond this are flagged
        value: f64,
    },
}

/// Method selector without parameters, parsed from configuration names
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "snake_case")
)]
pub enum MethodKind {
    /// `z_scores`
    ZScores,
    /// `modified_z_scores`
    ModifiedZScores,
    /// `iqr`
    Iqr,
    /// `threshold`
    Threshold,
}

impl MethodKind {
    /// Configuration name of the method
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ZScores => "z_scores",
            Self::ModifiedZScores => "modified_z_scores",
            Self::Iqr => "iqr",
            Self::Threshold => "threshold",
        }
    }
}

impl FromStr for MethodKind {
    type Err = DetectionError;

    fn from_str(name: &str) -> DetectionResult<Self> {
        match name {
            "z_scores" => Ok(Self::ZScores),
            "modified_z_scores" => Ok(Self::ModifiedZScores),
            "iqr" => Ok(Self::Iqr),
            "threshold" => Ok(Self::Threshold),
            _ => Err(DetectionError::UnknownMethod),
        }
    }
}

impl fmt::Display for MethodKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Scalar reference computed from a sample
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Reference {
    /// Mean and population standard deviation
    MeanStd {
        /// Arithmetic mean
        mean: f64,
        /// Population standard deviation
        std: f64,
    },
    /// Median and median absolute deviation
    MedianMad {
        /// Sample median
        median: f64,
        /// `median(|x - median|)`
        mad: f64,
    },
    /// First and third quartile
    Quartiles {
        /// 25th percentile
        q1: f64,
        /// 75th percentile
        q3: f64,
    },
    /// Caller-supplied limit
    Fixed(f64),
}

impl Reference {
    /// True when the reference carries no spread to score against
    pub fn is_degenerate(&self) -> bool {
        match *self {
            Self::MeanStd { std, .. } => std <= 0.0,
            Self::MedianMad { mad, .. } => mad <= 0.0,
            Self::Quartiles { .. } | Self::Fixed(_) => false,
        }
    }
}

impl Default for OutlierMethod {
    fn default() -> Self {
        Self::z_scores()
    }
}

impl OutlierMethod {
    /// Z-scores with the default cutoff of 3
    pub fn z_scores() -> Self {
        Self::ZScores { cutoff: DEFAULT_Z_SCORE_CUTOFF }
    }

    /// Modified z-scores with the default cutoff of 3.5
    pub fn modified_z_scores() -> Self {
        Self::ModifiedZScores { cutoff: DEFAULT_MODIFIED_Z_CUTOFF }
    }

    /// IQR fences with the default multiplier of 1.5
    pub fn iqr() -> Self {
        Self::Iqr { k: DEFAULT_IQR_MULTIPLIER }
    }

    /// Fixed threshold
    pub fn threshold(value: f64) -> Self {
        Self::Threshold { value }
    }

    /// Parameterless selector
    pub fn kind(&self) -> MethodKind {
        match self {
            Self::ZScores { .. } => MethodKind::ZScores,
            Self::ModifiedZScores { .. } => MethodKind::ModifiedZScores,
            Self::Iqr { .. } => MethodKind::Iqr,
            Self::Threshold { .. } => MethodKind::Threshold,
        }
    }

    /// True for methods that compute a statistic from the sample
    pub fn is_statistical(&self) -> bool {
        !matches!(self, Self::Threshold { .. })
    }

    /// Reject parameters that cannot produce a meaningful test
    pub fn validate(&self) -> DetectionResult<()> {
        match *self {
            Self::ZScores { cutoff } | Self::ModifiedZScores { cutoff } => {
                if !cutoff.is_finite() {
                    return Err(DetectionError::config("cutoff", "must be a finite number"));
                }
                if cutoff < 0.0 {
                    return Err(DetectionError::config("cutoff", "must be non-negative"));
                }
            }
            Self::Iqr { k } => {
                if !k.is_finite() {
                    return Err(DetectionError::config("k", "must be a finite number"));
                }
                if k < 0.0 {
                    return Err(DetectionError::config("k", "must be non-negative"));
                }
            }
            Self::Threshold { value } => {
                if !value.is_finite() {
                    return Err(DetectionError::config("threshold", "must be a finite number"));
                }
            }
        }
        Ok(())
    }

    /// Compute the reference for `values`, `None` for an empty sample
    pub fn reference(&self, values: &[f64]) -> Option<Reference> {
        if values.is_empty() {
            return None;
        }
        let reference = match *self {
            Self::ZScores { .. } => {
                let mean = mean(values);
                Reference::MeanStd { mean, std: population_std(values, mean) }
            }
            Self::ModifiedZScores { .. } => {
                let (median, mad) = median_and_mad(values);
                Reference::MedianMad { median, mad }
            }
            Self::Iqr { .. } => {
                let sorted = sorted_copy(values);
                Reference::Quartiles {
                    q1: quantile_sorted(&sorted, 0.25),
                    q3: quantile_sorted(&sorted, 0.75),
                }
            }
            Self::Threshold { value } => Reference::Fixed(value),
        };
        Some(reference)
    }

    /// Classify every value of the sample against a reference computed
    /// from the same sample
    pub fn classify(&self, values: &[f64], side: Side) -> Vec<bool> {
        let reference = match self.reference(values) {
            Some(reference) => reference,
            None => return Vec::new(),
        };
        if reference.is_degenerate() {
            log_debug!(
                "{} over {} values has zero spread, nothing flagged",
                self.kind(),
                values.len()
            );
            return alloc::vec![false; values.len()];
        }
        values
            .iter()
            .map(|&x| self.is_outlier(x, &reference, side))
            .collect()
    }

    /// Test one value against a precomputed reference
    ///
    /// A degenerate reference never flags.
    pub fn is_outlier(&self, x: f64, reference: &Reference, side: Side) -> bool {
        match (*self, *reference) {
            (Self::ZScores { cutoff }, Reference::MeanStd { mean, std }) => {
                if std <= 0.0 {
                    return false;
                }
                beyond((x - mean) / std, cutoff, side)
            }
            (Self::ModifiedZScores { cutoff }, Reference::MedianMad { median, mad }) => {
                if mad <= 0.0 {
                    return false;
                }
                beyond(MODIFIED_Z_SCALE * (x - median) / mad, cutoff, side)
            }
            (Self::Iqr { k }, Reference::Quartiles { q1, q3 }) => {
                let iqr = q3 - q1;
                match side {
                    Side::Upper => x > q3 + k * iqr,
                    Side::Lower => x < q1 - k * iqr,
                    Side::Both => x > q3 + k * iqr || x < q1 - k * iqr,
                }
            }
            (Self::Threshold { value }, Reference::Fixed(_)) => match side {
                Side::Upper => x > value,
                Side::Lower => x < value,
                Side::Both => x != value,
            },
            // Reference computed by a different method
            _ => false,
        }
    }
}

fn beyond(score: f64, cutoff: f64, side: Side) -> bool {
    match side {
        Side::Upper => score > cutoff,
        Side::Lower => score < -cutoff,
        Side::Both => libm::fabs(score) > cutoff,
    }
}

/// Arithmetic mean, zero for an empty sample
pub fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

/// Population standard deviation around a known mean
pub fn population_std(values: &[f64], mean: f64) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    let variance = values
        .iter()
        .map(|x| (x - mean) * (x - mean))
        .sum::<f64>()
        / values.len() as f64;
    libm::sqrt(variance)
}

/// Median by linear interpolation, zero for an empty sample
pub fn median(values: &[f64]) -> f64 {
    quantile_sorted(&sorted_copy(values), 0.5)
}

/// Median and median absolute deviation
pub fn median_and_mad(values: &[f64]) -> (f64, f64) {
    let median = median(values);
    let deviations: Vec<f64> = values.iter().map(|x| (x - median).abs()).collect();
    (median, self::median(&deviations))
}

/// Quantile of an ascending slice with linear interpolation between ranks
pub fn quantile_sorted(sorted: &[f64], q: f64) -> f64 {
    match sorted.len() {
        0 => return 0.0,
        1 => return sorted[0],
        _ => {}
    }
    let q = q.clamp(0.0, 1.0);
    let pos = q * (sorted.len() - 1) as f64;
    let lo = libm::floor(pos) as usize;
    let hi = libm::ceil(pos) as usize;
    if lo == hi {
        sorted[lo]
    } else {
        let frac = pos - lo as f64;
        sorted[lo] + (sorted[hi] - sorted[lo]) * frac
    }
}

fn sorted_copy(values: &[f64]) -> Vec<f64> {
    let mut sorted = values.to_vec();
    sorted.sort_by(|a, b| a.total_cmp(b));
    sorted
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;

    const EPS: f64 = 1e-12;

    #[test]
    fn mean_and_population_std() {
        let values = [2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0];
        let m = mean(&values);
        assert!((m - 5.0).abs() < EPS);
        assert!((population_std(&values, m) - 2.0).abs() < EPS);
    }

    #[test]
    fn quantiles_interpolate() {
        let sorted = [1.0, 2.0, 3.0, 4.0];
        assert!((quantile_sorted(&sorted, 0.25) - 1.75).abs() < EPS);
        assert!((quantile_sorted(&sorted, 0.5) - 2.5).abs() < EPS);
        assert!((quantile_sorted(&sorted, 0.75) - 3.25).abs() < EPS);
        assert_eq!(quantile_sorted(&[7.0], 0.3), 7.0);
        assert_eq!(quantile_sorted(&[], 0.5), 0.0);
    }

    #[test]
    fn median_and_mad_values() {
        let (med, mad) = median_and_mad(&[1.0, 1.0, 2.0, 2.0, 4.0, 6.0, 9.0]);
        assert_eq!(med, 2.0);
        // deviations: 1 1 0 0 2 4 7 -> median 1
        assert_eq!(mad, 1.0);
    }

    #[test]
    fn z_scores_flag_upper_tail_only() {
        let mut values = vec![10.0; 20];
        values.push(100.0);
        values.push(0.0);
        let flags = OutlierMethod::z_scores().classify(&values, Side::Upper);
        assert!(flags[20]);
        assert_eq!(flags.iter().filter(|f| **f).count(), 1);
    }

    #[test]
    fn z_scores_flag_lower_tail_only() {
        let mut values = vec![12.0; 30];
        values.push(0.0);
        values.push(14.0);
        let flags = OutlierMethod::z_scores().classify(&values, Side::Lower);
        assert!(flags[30]);
        assert_eq!(flags.iter().filter(|f| **f).count(), 1);
    }

    #[test]
    fn zero_std_flags_nothing() {
        let values = [5.0; 10];
        for method in [OutlierMethod::z_scores(), OutlierMethod::modified_z_scores(), OutlierMethod::iqr()] {
            assert!(method.classify(&values, Side::Upper).iter().all(|f| !f));
            assert!(method.classify(&values, Side::Lower).iter().all(|f| !f));
        }
    }

    #[test]
    fn modified_z_scores_with_spread() {
        // median 3.5, deviations 2.5 1.5 0.5 0.5 1.5 26.5 -> MAD 1.5
        let values = [1.0, 2.0, 3.0, 4.0, 5.0, 30.0];
        let (med, mad) = median_and_mad(&values);
        assert_eq!(med, 3.5);
        assert_eq!(mad, 1.5);
        let flags = OutlierMethod::modified_z_scores().classify(&values, Side::Upper);
        assert_eq!(flags, vec![false, false, false, false, false, true]);
    }

    #[test]
    fn modified_z_cutoff_is_caller_overridable() {
        let values = [1.0, 2.0, 3.0, 4.0, 5.0, 8.0];
        // median 3.5, MAD 1.5, z'(8) = 0.6745 * 4.5 / 1.5 = 2.0235
        let default = OutlierMethod::modified_z_scores().classify(&values, Side::Upper);
        assert!(default.iter().all(|f| !f));
        let loose = OutlierMethod::ModifiedZScores { cutoff: 1.0 }.classify(&values, Side::Upper);
        assert!(loose[5]);
    }

    #[test]
    fn modified_z_scores_both_tails() {
        // median 60, deviations 5 0 5 2 2 0 3 3 59 -> MAD 3
        let values = [55.0, 60.0, 65.0, 58.0, 62.0, 60.0, 57.0, 63.0, 1.0];
        let method = OutlierMethod::modified_z_scores();
        let both = method.classify(&values, Side::Both);
        assert_eq!(both.iter().filter(|f| **f).count(), 1);
        assert!(both[8]);
        assert!(method.classify(&values, Side::Upper).iter().all(|f| !f));
        assert_eq!(method.classify(&values, Side::Lower), both);
    }

    #[test]
    fn iqr_fences() {
        let values = [1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0, 50.0];
        // q1 = 3, q3 = 7, fences [-3, 13]
        let flags = OutlierMethod::iqr().classify(&values, Side::Upper);
        assert_eq!(flags.iter().filter(|f| **f).count(), 1);
        assert!(flags[8]);
        let lower = OutlierMethod::iqr().classify(&values, Side::Lower);
        assert!(lower.iter().all(|f| !f));
    }

    #[test]
    fn threshold_is_strict() {
        let values = [1.0, 2.0, 3.0];
        assert_eq!(
            OutlierMethod::threshold(2.0).classify(&values, Side::Upper),
            vec![false, false, true]
        );
        assert_eq!(
            OutlierMethod::threshold(2.0).classify(&values, Side::Lower),
            vec![true, false, false]
        );
    }

    #[test]
    fn empty_sample_classifies_to_nothing() {
        assert!(OutlierMethod::iqr().classify(&[], Side::Upper).is_empty());
    }

    #[test]
    fn validation_rejects_bad_parameters() {
        assert!(OutlierMethod::ZScores { cutoff: -1.0 }.validate().is_err());
        assert!(OutlierMethod::ModifiedZScores { cutoff: f64::NAN }.validate().is_err());
        assert!(OutlierMethod::Iqr { k: -0.5 }.validate().is_err());
        assert!(OutlierMethod::Threshold { value: f64::INFINITY }.validate().is_err());
        assert!(OutlierMethod::Iqr { k: 0.0 }.validate().is_ok());
        assert!(OutlierMethod::threshold(-3.0).validate().is_ok());
    }

    #[test]
    fn method_names_parse() {
        for kind in [MethodKind::ZScores, MethodKind::ModifiedZScores, MethodKind::Iqr, MethodKind::Threshold] {
            assert_eq!(kind.as_str().parse::<MethodKind>(), Ok(kind));
        }
        assert_eq!("median".parse::<MethodKind>(), Err(DetectionError::UnknownMethod));
    }

    #[test]
    fn mismatched_reference_never_flags() {
        let reference = Reference::Fixed(0.0);
        assert!(!OutlierMethod::z_scores().is_outlier(100.0, &reference, Side::Upper));
    }
}
