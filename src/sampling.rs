//! Synthetic performance-sample generation.
//!
//! Samples are normal draws (Box-Muller) around per-strategy baselines,
//! stretched by the scenario stress multiplier. The random source is passed
//! in by the caller so tests can use a seeded generator.

use rand::Rng;

use crate::scenario::Scenario;
use crate::strategy::{ControlStrategy, MetricKind};

/// Default number of draws per sample vector.
pub const DEFAULT_SAMPLE_COUNT: usize = 100;

/// One standard normal variate via the Box-Muller transform.
///
/// Two uniform draws produce a single variate; the companion variate is
/// discarded. Wasteful but simple, and not a correctness issue.
pub fn box_muller<R: Rng + ?Sized>(rng: &mut R) -> f64 {
    // 1 - u keeps the argument of ln strictly positive.
    let u1: f64 = 1.0 - rng.random::<f64>();
    let u2: f64 = rng.random::<f64>();
    (-2.0 * u1.ln()).sqrt() * (2.0 * std::f64::consts::PI * u2).cos()
}

/// Derived (mean, std_dev) for one strategy/metric pair under a scenario.
///
/// With the default scenario the stress multiplier is 1.0 and the mean is
/// exactly the strategy baseline. Stress moves waiting time and queue
/// length up, and throughput and efficiency down, attenuated by the
/// strategy's scenario sensitivity.
pub fn sample_parameters(
    strategy: ControlStrategy,
    metric: MetricKind,
    scenario: &Scenario,
) -> (f64, f64) {
    let baseline = strategy.baseline(metric);
    let stress = scenario.stress_multiplier();
    let sensitivity = strategy.scenario_sensitivity();

    let shift = sensitivity * (stress - 1.0);
    let mean = if metric.lower_is_better() {
        baseline * (1.0 + shift)
    } else {
        // Degradation shrinks the good-direction metrics, floored at 10%
        // of baseline so a pathological scenario cannot flip the sign.
        baseline * (1.0 - shift).max(0.1)
    };
    let std_dev = mean * strategy.variance_multiplier();
    (mean, std_dev)
}

/// Generates `count` non-negative draws for one strategy/metric pair.
pub fn generate_samples<R: Rng + ?Sized>(
    strategy: ControlStrategy,
    metric: MetricKind,
    scenario: &Scenario,
    count: usize,
    rng: &mut R,
) -> Vec<f64> {
    let (mean, std_dev) = sample_parameters(strategy, metric, scenario);
    (0..count)
        // Traffic metrics cannot be negative.
        .map(|_| (mean + std_dev * box_muller(rng)).max(0.0))
        .collect()
}
