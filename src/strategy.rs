use serde::{Deserialize, Serialize};

/// The three signal control strategies under comparison.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ControlStrategy {
    /// Fixed signal timing plan, no feedback.
    FixedTime,
    /// Hand-written rules reacting to queue lengths.
    RuleBased,
    /// Learned policy (modelled here by its published performance profile).
    ReinforcementLearning,
}

impl ControlStrategy {
    pub const ALL: [ControlStrategy; 3] = [
        ControlStrategy::FixedTime,
        ControlStrategy::RuleBased,
        ControlStrategy::ReinforcementLearning,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            ControlStrategy::FixedTime => "fixed-time",
            ControlStrategy::RuleBased => "rule-based",
            ControlStrategy::ReinforcementLearning => "rl-based",
        }
    }

    /// Baseline value for a metric under calm traffic (default scenario).
    pub fn baseline(&self, metric: MetricKind) -> f64 {
        match (self, metric) {
            (ControlStrategy::FixedTime, MetricKind::WaitingTime) => 45.0,
            (ControlStrategy::FixedTime, MetricKind::QueueLength) => 12.0,
            (ControlStrategy::FixedTime, MetricKind::Throughput) => 850.0,
            (ControlStrategy::FixedTime, MetricKind::Efficiency) => 0.62,
            (ControlStrategy::RuleBased, MetricKind::WaitingTime) => 35.0,
            (ControlStrategy::RuleBased, MetricKind::QueueLength) => 9.0,
            (ControlStrategy::RuleBased, MetricKind::Throughput) => 950.0,
            (ControlStrategy::RuleBased, MetricKind::Efficiency) => 0.74,
            (ControlStrategy::ReinforcementLearning, MetricKind::WaitingTime) => 25.0,
            (ControlStrategy::ReinforcementLearning, MetricKind::QueueLength) => 6.0,
            (ControlStrategy::ReinforcementLearning, MetricKind::Throughput) => 1100.0,
            (ControlStrategy::ReinforcementLearning, MetricKind::Efficiency) => 0.86,
        }
    }

    /// Relative spread of samples around the baseline.
    pub fn variance_multiplier(&self) -> f64 {
        match self {
            ControlStrategy::FixedTime => 0.15,
            ControlStrategy::RuleBased => 0.12,
            ControlStrategy::ReinforcementLearning => 0.08,
        }
    }

    /// How strongly the strategy degrades under scenario stress. Adaptive
    /// strategies absorb more of the stress than the fixed plan.
    pub fn scenario_sensitivity(&self) -> f64 {
        match self {
            ControlStrategy::FixedTime => 1.0,
            ControlStrategy::RuleBased => 0.7,
            ControlStrategy::ReinforcementLearning => 0.45,
        }
    }
}

/// Performance metrics tracked for every strategy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MetricKind {
    WaitingTime,
    QueueLength,
    Throughput,
    Efficiency,
}

impl MetricKind {
    pub const ALL: [MetricKind; 4] = [
        MetricKind::WaitingTime,
        MetricKind::QueueLength,
        MetricKind::Throughput,
        MetricKind::Efficiency,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            MetricKind::WaitingTime => "waiting_time",
            MetricKind::QueueLength => "queue_length",
            MetricKind::Throughput => "throughput",
            MetricKind::Efficiency => "efficiency",
        }
    }

    /// Whether a smaller value means better performance.
    pub fn lower_is_better(&self) -> bool {
        matches!(self, MetricKind::WaitingTime | MetricKind::QueueLength)
    }
}
