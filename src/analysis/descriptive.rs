use serde::{Deserialize, Serialize};

/// Summary statistics over one sample vector.
///
/// Variance and standard deviation use the population divisor (N); the
/// separate [`sample_variance`] helper (N-1) exists for the ANOVA and
/// correlation paths, which expect the unbiased estimator. The two divisors
/// are deliberate per-call choices, not interchangeable.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct BasicStats {
    pub count: usize,
    pub mean: f64,
    pub median: f64,
    pub variance: f64,
    pub std_dev: f64,
    pub min: f64,
    pub max: f64,
    /// 25th percentile, linear interpolation between order statistics.
    pub q1: f64,
    /// 75th percentile, linear interpolation between order statistics.
    pub q3: f64,
    /// Third standardized moment.
    pub skewness: f64,
    /// Fourth standardized moment minus 3 (excess kurtosis).
    pub kurtosis: f64,
}

/// Normal-approximation confidence interval around a sample mean.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ConfidenceInterval {
    pub mean: f64,
    pub lower: f64,
    pub upper: f64,
    /// The confidence level actually applied (after any fallback).
    pub level: f64,
}

pub fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

/// Variance with divisor N.
pub fn population_variance(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    let m = mean(values);
    values.iter().map(|v| (v - m).powi(2)).sum::<f64>() / values.len() as f64
}

/// Unbiased variance with divisor N-1. Returns 0.0 for fewer than two values.
pub fn sample_variance(values: &[f64]) -> f64 {
    if values.len() < 2 {
        return 0.0;
    }
    let m = mean(values);
    values.iter().map(|v| (v - m).powi(2)).sum::<f64>() / (values.len() - 1) as f64
}

/// Percentile over an already-sorted slice, with linear interpolation
/// between the two neighbouring order statistics.
fn percentile_sorted(sorted: &[f64], p: f64) -> f64 {
    if sorted.is_empty() {
        return 0.0;
    }
    if sorted.len() == 1 {
        return sorted[0];
    }
    let rank = p.clamp(0.0, 1.0) * (sorted.len() - 1) as f64;
    let lower = rank.floor() as usize;
    let upper = rank.ceil() as usize;
    let weight = rank - lower as f64;
    sorted[lower] + weight * (sorted[upper] - sorted[lower])
}

/// Computes the full descriptive summary for one sample vector.
///
/// Empty input yields an all-zero record rather than an error; this is the
/// documented fallback policy for the whole analysis module.
pub fn calculate_basic_stats(values: &[f64]) -> BasicStats {
    if values.is_empty() {
        return BasicStats::default();
    }

    let mut sorted = values.to_vec();
    sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));

    let n = values.len() as f64;
    let m = mean(values);
    let variance = population_variance(values);
    let std_dev = variance.sqrt();

    let (skewness, kurtosis) = if std_dev > 0.0 {
        let m3 = values.iter().map(|v| ((v - m) / std_dev).powi(3)).sum::<f64>() / n;
        let m4 = values.iter().map(|v| ((v - m) / std_dev).powi(4)).sum::<f64>() / n;
        (m3, m4 - 3.0)
    } else {
        (0.0, 0.0)
    };

    BasicStats {
        count: values.len(),
        mean: m,
        median: percentile_sorted(&sorted, 0.5),
        variance,
        std_dev,
        min: sorted[0],
        max: sorted[sorted.len() - 1],
        q1: percentile_sorted(&sorted, 0.25),
        q3: percentile_sorted(&sorted, 0.75),
        skewness,
        kurtosis,
    }
}

/// z-score lookup for the supported confidence levels. Anything else falls
/// back to the 95% critical value. Returns (z, applied level).
fn z_score(level: f64) -> (f64, f64) {
    if (level - 0.90).abs() < 1e-9 {
        (1.645, 0.90)
    } else if (level - 0.95).abs() < 1e-9 {
        (1.96, 0.95)
    } else if (level - 0.99).abs() < 1e-9 {
        (2.576, 0.99)
    } else {
        log::warn!(
            "unsupported confidence level {:.3}, falling back to 0.95 (z = 1.96)",
            level
        );
        (1.96, 0.95)
    }
}

/// Normal-approximation interval `mean +/- z * (std_dev / sqrt(n))`.
///
/// This is not exact for small n (no t-distribution correction); the
/// approximation is a documented simplification. Empty input yields the
/// zero interval.
pub fn confidence_interval(values: &[f64], level: f64) -> ConfidenceInterval {
    if values.is_empty() {
        return ConfidenceInterval::default();
    }
    let m = mean(values);
    let sd = population_variance(values).sqrt();
    let (z, applied_level) = z_score(level);
    let margin = z * sd / (values.len() as f64).sqrt();
    ConfidenceInterval {
        mean: m,
        lower: m - margin,
        upper: m + margin,
        level: applied_level,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_input_yields_all_zero_stats() {
        let stats = calculate_basic_stats(&[]);
        assert_eq!(stats, BasicStats::default());
    }

    #[test]
    fn mean_lies_between_min_and_max() {
        let values = [3.0, 9.5, 1.2, 7.7, 4.4];
        let stats = calculate_basic_stats(&values);
        assert!(stats.mean >= stats.min && stats.mean <= stats.max);
    }

    #[test]
    fn known_values() {
        let stats = calculate_basic_stats(&[2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0]);
        assert!((stats.mean - 5.0).abs() < 1e-12);
        // Population variance of the classic example is exactly 4.
        assert!((stats.variance - 4.0).abs() < 1e-12);
        assert!((stats.std_dev - 2.0).abs() < 1e-12);
    }

    #[test]
    fn median_interpolates_for_even_counts() {
        let stats = calculate_basic_stats(&[1.0, 2.0, 3.0, 4.0]);
        assert!((stats.median - 2.5).abs() < 1e-12);
    }

    #[test]
    fn symmetric_data_has_near_zero_skewness() {
        let values = [-3.0, -2.0, -1.0, 0.0, 1.0, 2.0, 3.0];
        let stats = calculate_basic_stats(&values);
        assert!(stats.skewness.abs() < 1e-12);
    }

    #[test]
    fn constant_data_has_zero_moments() {
        let stats = calculate_basic_stats(&[4.2; 10]);
        assert_eq!(stats.std_dev, 0.0);
        assert_eq!(stats.skewness, 0.0);
        assert_eq!(stats.kurtosis, 0.0);
    }

    #[test]
    fn quartiles_bracket_median() {
        let values: Vec<f64> = (1..=101).map(|v| v as f64).collect();
        let stats = calculate_basic_stats(&values);
        assert!((stats.q1 - 26.0).abs() < 1e-12);
        assert!((stats.median - 51.0).abs() < 1e-12);
        assert!((stats.q3 - 76.0).abs() < 1e-12);
    }

    #[test]
    fn sample_variance_uses_n_minus_one() {
        let values = [1.0, 2.0, 3.0];
        assert!((sample_variance(&values) - 1.0).abs() < 1e-12);
        assert!((population_variance(&values) - 2.0 / 3.0).abs() < 1e-12);
    }

    #[test]
    fn interval_brackets_the_mean() {
        let values = [10.0, 12.0, 9.0, 11.0, 10.5, 9.5];
        let ci = confidence_interval(&values, 0.95);
        assert!(ci.lower <= ci.mean && ci.mean <= ci.upper);
    }

    #[test]
    fn wider_level_gives_wider_interval() {
        let values = [10.0, 12.0, 9.0, 11.0, 10.5, 9.5];
        let ci90 = confidence_interval(&values, 0.90);
        let ci99 = confidence_interval(&values, 0.99);
        assert!(ci99.upper - ci99.lower > ci90.upper - ci90.lower);
    }

    #[test]
    fn unsupported_level_falls_back_to_95() {
        let values = [10.0, 12.0, 9.0, 11.0];
        let fallback = confidence_interval(&values, 0.42);
        let standard = confidence_interval(&values, 0.95);
        assert!(((fallback.upper - fallback.lower) - (standard.upper - standard.lower)).abs() < 1e-12);
        assert_eq!(fallback.level, 0.95);
    }

    #[test]
    fn empty_input_yields_zero_interval() {
        assert_eq!(confidence_interval(&[], 0.95), ConfidenceInterval::default());
    }
}
