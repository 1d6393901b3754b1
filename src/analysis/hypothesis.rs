use serde::{Deserialize, Serialize};

use crate::analysis::descriptive::{mean, population_variance, sample_variance};
use crate::analysis::distributions::{chi_square_cdf, f_cdf, student_t_cdf};

/// Significance threshold shared by every test in the module.
pub const SIGNIFICANCE_LEVEL: f64 = 0.05;

/// Result of a Welch two-sample t-test.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct TTestResult {
    pub t_statistic: f64,
    pub degrees_of_freedom: f64,
    /// Two-tailed p-value.
    pub p_value: f64,
    /// Cohen's d with pooled standard deviation.
    pub effect_size: f64,
    pub significant: bool,
}

/// Result of a one-way ANOVA over k groups.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct AnovaResult {
    pub f_statistic: f64,
    pub df_between: f64,
    pub df_within: f64,
    pub p_value: f64,
    pub significant: bool,
}

/// Result of a chi-square independence test over a contingency table.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ChiSquareResult {
    pub chi_square: f64,
    pub degrees_of_freedom: f64,
    pub p_value: f64,
    pub significant: bool,
}

/// Null result used when a test's preconditions are not met (too few
/// observations, zero variance). Statistic 0, p-value 1, not significant.
fn null_result_p() -> f64 {
    1.0
}

/// Welch's t-test for two independent samples with unequal variances.
///
/// Group variances use the population (N) divisor; degrees of freedom come
/// from the Welch-Satterthwaite approximation and the two-tailed p-value
/// from the incomplete-beta Student-t CDF.
pub fn welch_t_test(sample1: &[f64], sample2: &[f64]) -> TTestResult {
    let n1 = sample1.len() as f64;
    let n2 = sample2.len() as f64;
    if sample1.len() < 2 || sample2.len() < 2 {
        return TTestResult {
            p_value: null_result_p(),
            ..TTestResult::default()
        };
    }

    let mean1 = mean(sample1);
    let mean2 = mean(sample2);
    let var1 = population_variance(sample1);
    let var2 = population_variance(sample2);

    let standard_error_sq = var1 / n1 + var2 / n2;
    if standard_error_sq <= 0.0 {
        // Both samples constant; identical means -> textbook null outcome.
        return TTestResult {
            p_value: null_result_p(),
            ..TTestResult::default()
        };
    }

    let t = (mean1 - mean2) / standard_error_sq.sqrt();

    // Welch-Satterthwaite degrees of freedom.
    let df = standard_error_sq.powi(2)
        / ((var1 / n1).powi(2) / (n1 - 1.0) + (var2 / n2).powi(2) / (n2 - 1.0));

    let p_value = 2.0 * (1.0 - student_t_cdf(t.abs(), df));
    let p_value = p_value.clamp(0.0, 1.0);

    let pooled_sd = (((n1 - 1.0) * var1 + (n2 - 1.0) * var2) / (n1 + n2 - 2.0)).sqrt();
    let effect_size = if pooled_sd > 0.0 {
        (mean1 - mean2) / pooled_sd
    } else {
        0.0
    };

    TTestResult {
        t_statistic: t,
        degrees_of_freedom: df,
        p_value,
        effect_size,
        significant: p_value < SIGNIFICANCE_LEVEL,
    }
}

/// One-way ANOVA across `groups`, each a sample vector for one strategy.
pub fn one_way_anova(groups: &[&[f64]]) -> AnovaResult {
    let k = groups.len();
    let total_n: usize = groups.iter().map(|g| g.len()).sum();
    if k < 2 || total_n <= k || groups.iter().any(|g| g.is_empty()) {
        return AnovaResult {
            p_value: null_result_p(),
            ..AnovaResult::default()
        };
    }

    let grand_mean =
        groups.iter().flat_map(|g| g.iter()).sum::<f64>() / total_n as f64;

    let ss_between: f64 = groups
        .iter()
        .map(|g| g.len() as f64 * (mean(g) - grand_mean).powi(2))
        .sum();
    // Within-group sum of squares via the unbiased per-group variances.
    let ss_within: f64 = groups
        .iter()
        .map(|g| sample_variance(g) * (g.len() - 1) as f64)
        .sum();

    let df_between = (k - 1) as f64;
    let df_within = (total_n - k) as f64;

    let ms_between = ss_between / df_between;
    let ms_within = ss_within / df_within;
    if ms_within <= 0.0 {
        // All groups constant: identical groups mean no effect.
        return AnovaResult {
            df_between,
            df_within,
            p_value: null_result_p(),
            ..AnovaResult::default()
        };
    }

    let f = ms_between / ms_within;
    let p_value = (1.0 - f_cdf(f, df_between, df_within)).clamp(0.0, 1.0);

    AnovaResult {
        f_statistic: f,
        df_between,
        df_within,
        p_value,
        significant: p_value < SIGNIFICANCE_LEVEL,
    }
}

/// Chi-square test of independence over a rectangular contingency table of
/// observed counts (rows x columns).
pub fn chi_square_test(observed: &[Vec<f64>]) -> ChiSquareResult {
    let rows = observed.len();
    let cols = observed.first().map(|r| r.len()).unwrap_or(0);
    if rows < 2 || cols < 2 || observed.iter().any(|r| r.len() != cols) {
        return ChiSquareResult {
            p_value: null_result_p(),
            ..ChiSquareResult::default()
        };
    }

    let row_totals: Vec<f64> = observed.iter().map(|r| r.iter().sum()).collect();
    let col_totals: Vec<f64> = (0..cols)
        .map(|j| observed.iter().map(|r| r[j]).sum())
        .collect();
    let grand_total: f64 = row_totals.iter().sum();
    if grand_total <= 0.0 {
        return ChiSquareResult {
            p_value: null_result_p(),
            ..ChiSquareResult::default()
        };
    }

    let mut chi_square = 0.0;
    for i in 0..rows {
        for j in 0..cols {
            let expected = row_totals[i] * col_totals[j] / grand_total;
            if expected > 0.0 {
                chi_square += (observed[i][j] - expected).powi(2) / expected;
            }
        }
    }

    let df = ((rows - 1) * (cols - 1)) as f64;
    let p_value = (1.0 - chi_square_cdf(chi_square, df)).clamp(0.0, 1.0);

    ChiSquareResult {
        chi_square,
        degrees_of_freedom: df,
        p_value,
        significant: p_value < SIGNIFICANCE_LEVEL,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identical_samples_give_null_t_test() {
        let sample = [4.0, 5.0, 6.0, 5.5, 4.5, 5.2, 4.8];
        let result = welch_t_test(&sample, &sample);
        assert!(result.t_statistic.abs() < 1e-12);
        assert!((result.p_value - 1.0).abs() < 1e-9);
        assert!(!result.significant);
    }

    #[test]
    fn separated_samples_are_significant() {
        let low: Vec<f64> = (0..30).map(|i| 10.0 + (i % 5) as f64 * 0.1).collect();
        let high: Vec<f64> = (0..30).map(|i| 20.0 + (i % 5) as f64 * 0.1).collect();
        let result = welch_t_test(&low, &high);
        assert!(result.p_value < 0.001);
        assert!(result.significant);
        assert!(result.t_statistic < 0.0);
        assert!(result.effect_size < -2.0);
    }

    #[test]
    fn tiny_samples_give_null_result() {
        let result = welch_t_test(&[1.0], &[2.0, 3.0]);
        assert_eq!(result.p_value, 1.0);
        assert!(!result.significant);
    }

    #[test]
    fn welch_df_between_min_and_sum() {
        let a = [12.0, 14.0, 11.0, 13.0, 12.5, 13.5];
        let b = [9.0, 20.0, 4.0, 17.0, 12.0, 15.0, 8.0];
        let result = welch_t_test(&a, &b);
        let df = result.degrees_of_freedom;
        assert!(df > 1.0 && df < (a.len() + b.len() - 2) as f64 + 1e-9);
    }

    #[test]
    fn identical_groups_give_zero_f() {
        let group = [3.0, 4.0, 5.0, 4.5, 3.5];
        let result = one_way_anova(&[&group, &group, &group]);
        assert!(result.f_statistic.abs() < 1e-12);
        assert!((result.p_value - 1.0).abs() < 1e-9);
        assert!(!result.significant);
    }

    #[test]
    fn separated_groups_are_significant() {
        let a: Vec<f64> = (0..20).map(|i| 10.0 + (i % 4) as f64 * 0.2).collect();
        let b: Vec<f64> = (0..20).map(|i| 15.0 + (i % 4) as f64 * 0.2).collect();
        let c: Vec<f64> = (0..20).map(|i| 20.0 + (i % 4) as f64 * 0.2).collect();
        let result = one_way_anova(&[&a, &b, &c]);
        assert!(result.f_statistic > 10.0);
        assert!(result.significant);
        assert_eq!(result.df_between, 2.0);
        assert_eq!(result.df_within, 57.0);
    }

    #[test]
    fn anova_rejects_degenerate_input() {
        let a = [1.0, 2.0];
        let result = one_way_anova(&[&a]);
        assert_eq!(result.p_value, 1.0);
        let empty: &[f64] = &[];
        let result = one_way_anova(&[&a, empty]);
        assert_eq!(result.p_value, 1.0);
    }

    #[test]
    fn independent_table_is_not_significant() {
        // Perfectly proportional rows: expected equals observed.
        let observed = vec![vec![10.0, 20.0, 30.0], vec![20.0, 40.0, 60.0]];
        let result = chi_square_test(&observed);
        assert!(result.chi_square.abs() < 1e-9);
        assert!((result.p_value - 1.0).abs() < 1e-9);
        assert_eq!(result.degrees_of_freedom, 2.0);
    }

    #[test]
    fn dependent_table_is_significant() {
        let observed = vec![vec![50.0, 5.0], vec![5.0, 50.0]];
        let result = chi_square_test(&observed);
        assert!(result.chi_square > 30.0);
        assert!(result.significant);
    }

    #[test]
    fn ragged_table_gives_null_result() {
        let observed = vec![vec![1.0, 2.0], vec![3.0]];
        let result = chi_square_test(&observed);
        assert_eq!(result.p_value, 1.0);
        assert!(!result.significant);
    }
}
