//! End-to-end strategy comparison: samples in, report out.
//!
//! The report is a derived, read-only record; nothing here holds state
//! between runs, so a caller re-runs the whole pipeline whenever the
//! scenario changes.

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::analysis::correlation::{correlation_matrix, CorrelationMatrix};
use crate::analysis::descriptive::{
    calculate_basic_stats, confidence_interval, BasicStats, ConfidenceInterval,
};
use crate::analysis::hypothesis::{
    chi_square_test, one_way_anova, welch_t_test, AnovaResult, ChiSquareResult, TTestResult,
};
use crate::sampling::generate_samples;
use crate::scenario::Scenario;
use crate::strategy::{ControlStrategy, MetricKind};

/// Descriptive summary for one strategy/metric cell.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MetricSummary {
    pub strategy: ControlStrategy,
    pub metric: MetricKind,
    pub stats: BasicStats,
    pub confidence: ConfidenceInterval,
}

/// Welch test between two strategies on one metric.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PairwiseTest {
    pub metric: MetricKind,
    pub first: ControlStrategy,
    pub second: ControlStrategy,
    pub result: TTestResult,
}

/// ANOVA across all three strategies on one metric.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MetricAnova {
    pub metric: MetricKind,
    pub result: AnovaResult,
}

/// Full comparison output for one scenario.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComparisonReport {
    pub scenario: Scenario,
    pub summaries: Vec<MetricSummary>,
    pub pairwise: Vec<PairwiseTest>,
    pub anova: Vec<MetricAnova>,
    /// Independence test between strategy and waiting-time performance band.
    pub chi_square: ChiSquareResult,
    /// Correlation between metrics, pooled over all strategies.
    pub correlations: CorrelationMatrix,
}

impl ComparisonReport {
    /// The strategy with the best mean on a metric, honouring its
    /// direction (lower waiting time is better, higher throughput is).
    pub fn best_strategy(&self, metric: MetricKind) -> Option<ControlStrategy> {
        self.summaries
            .iter()
            .filter(|s| s.metric == metric)
            .min_by(|a, b| {
                let (x, y) = if metric.lower_is_better() {
                    (a.stats.mean, b.stats.mean)
                } else {
                    (b.stats.mean, a.stats.mean)
                };
                x.partial_cmp(&y).unwrap_or(std::cmp::Ordering::Equal)
            })
            .map(|s| s.strategy)
    }
}

/// Looks up the sample vector for one strategy/metric cell.
fn cell<'a>(
    samples: &'a [(ControlStrategy, MetricKind, Vec<f64>)],
    strategy: ControlStrategy,
    metric: MetricKind,
) -> &'a [f64] {
    samples
        .iter()
        .find(|(s, m, _)| *s == strategy && *m == metric)
        .map(|(_, _, v)| v.as_slice())
        .unwrap_or(&[])
}

/// Waiting-time performance bands for the contingency table.
fn waiting_time_band(value: f64) -> usize {
    if value < 30.0 {
        0 // smooth
    } else if value < 50.0 {
        1 // acceptable
    } else {
        2 // congested
    }
}

/// Runs the full comparison for one scenario.
///
/// Samples are drawn from the caller's random source, so a seeded generator
/// makes the whole report reproducible.
pub fn run_comparison<R: Rng + ?Sized>(
    scenario: &Scenario,
    sample_count: usize,
    rng: &mut R,
) -> ComparisonReport {
    // One sample vector per strategy/metric cell.
    let mut samples: Vec<(ControlStrategy, MetricKind, Vec<f64>)> = Vec::new();
    for strategy in ControlStrategy::ALL {
        for metric in MetricKind::ALL {
            let drawn = generate_samples(strategy, metric, scenario, sample_count, rng);
            samples.push((strategy, metric, drawn));
        }
    }
    let mut summaries = Vec::new();
    for &(strategy, metric, ref values) in &samples {
        summaries.push(MetricSummary {
            strategy,
            metric,
            stats: calculate_basic_stats(values),
            confidence: confidence_interval(values, 0.95),
        });
    }

    let mut pairwise = Vec::new();
    for metric in MetricKind::ALL {
        for (i, &first) in ControlStrategy::ALL.iter().enumerate() {
            for &second in &ControlStrategy::ALL[i + 1..] {
                let result = welch_t_test(cell(&samples, first, metric), cell(&samples, second, metric));
                pairwise.push(PairwiseTest {
                    metric,
                    first,
                    second,
                    result,
                });
            }
        }
    }

    let mut anova = Vec::new();
    for metric in MetricKind::ALL {
        let groups: Vec<&[f64]> = ControlStrategy::ALL
            .iter()
            .map(|&s| cell(&samples, s, metric))
            .collect();
        anova.push(MetricAnova {
            metric,
            result: one_way_anova(&groups),
        });
    }

    // Strategy-by-band contingency table over waiting-time samples.
    let mut observed = vec![vec![0.0; 3]; ControlStrategy::ALL.len()];
    for (row, &strategy) in ControlStrategy::ALL.iter().enumerate() {
        for &value in cell(&samples, strategy, MetricKind::WaitingTime) {
            observed[row][waiting_time_band(value)] += 1.0;
        }
    }
    let chi_square = chi_square_test(&observed);

    // Metric-by-metric correlation, pooling the three strategies so the
    // between-strategy spread drives the relationship.
    let pooled: Vec<(MetricKind, Vec<f64>)> = MetricKind::ALL
        .iter()
        .map(|&metric| {
            let mut pooled_values = Vec::new();
            for &strategy in &ControlStrategy::ALL {
                pooled_values.extend_from_slice(cell(&samples, strategy, metric));
            }
            (metric, pooled_values)
        })
        .collect();
    let labelled: Vec<(&str, &[f64])> = pooled
        .iter()
        .map(|(metric, values)| (metric.label(), values.as_slice()))
        .collect();
    let correlations = correlation_matrix(&labelled);

    log::info!(
        "comparison complete: {} summaries, {} pairwise tests, chi-square p = {:.4}",
        summaries.len(),
        pairwise.len(),
        chi_square.p_value
    );

    ComparisonReport {
        scenario: scenario.clone(),
        summaries,
        pairwise,
        anova,
        chi_square,
        correlations,
    }
}
