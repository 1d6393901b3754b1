use rand::rngs::StdRng;
use rand::SeedableRng;

use traffic_strategy_bench::comparison::run_comparison;
use traffic_strategy_bench::network::{GridNetwork, NetworkSimulation, SignalPolicy};
use traffic_strategy_bench::report::{
    log_comparison_csv, log_network_csv, render_efficiency_lines, render_metric_bars,
};
use traffic_strategy_bench::sampling::DEFAULT_SAMPLE_COUNT;
use traffic_strategy_bench::scenario::{Incident, PeakHour, Scenario};
use traffic_strategy_bench::strategy::{ControlStrategy, MetricKind};

fn main() {
    env_logger::init();

    let scenario = Scenario {
        flow_north: 70.0,
        flow_east: 55.0,
        flow_south: 65.0,
        flow_west: 40.0,
        incident: Some(Incident {
            severity: 0.6,
            location: "Intersection 11".to_string(),
        }),
        peak_hour: Some(PeakHour { intensity: 1.5 }),
        congestion_threshold: 0.8,
    };
    println!(
        "Scenario stress multiplier: {:.3}",
        scenario.stress_multiplier()
    );

    let mut rng = StdRng::seed_from_u64(2024);
    let report = run_comparison(&scenario, DEFAULT_SAMPLE_COUNT, &mut rng);

    println!("--- Strategy Comparison ---");
    for summary in &report.summaries {
        println!(
            "{:<12} {:<14} mean {:>9.2}  ci [{:>8.2}, {:>8.2}]",
            summary.strategy.label(),
            summary.metric.label(),
            summary.stats.mean,
            summary.confidence.lower,
            summary.confidence.upper
        );
    }
    for anova in &report.anova {
        println!(
            "ANOVA {:<14} F = {:>8.2}, p = {:.4}{}",
            anova.metric.label(),
            anova.result.f_statistic,
            anova.result.p_value,
            if anova.result.significant {
                " (significant)"
            } else {
                ""
            }
        );
    }
    println!(
        "Chi-square (strategy vs waiting band): {:.2}, p = {:.4}",
        report.chi_square.chi_square, report.chi_square.p_value
    );
    if let Some(best) = report.best_strategy(MetricKind::WaitingTime) {
        println!("Best strategy on waiting time: {}", best.label());
    }

    if let Err(e) = log_comparison_csv("strategy_comparison.csv", &report) {
        eprintln!("Error writing comparison CSV: {}", e);
    }
    match serde_json::to_string_pretty(&report) {
        Ok(json) => {
            if let Err(e) = std::fs::write("comparison_report.json", json) {
                eprintln!("Error writing report JSON: {}", e);
            }
        }
        Err(e) => eprintln!("Error serializing report: {}", e),
    }
    if let Err(e) = render_metric_bars("waiting_time_bars.png", &report, MetricKind::WaitingTime) {
        eprintln!("Error rendering metric chart: {}", e);
    }

    // One grid simulation per policy over the same horizon.
    let mut traces = Vec::new();
    for strategy in ControlStrategy::ALL {
        let policy = SignalPolicy::for_strategy(strategy);
        let mut sim_rng = StdRng::seed_from_u64(99);
        let network = GridNetwork::new(4, &mut sim_rng);
        let mut sim = NetworkSimulation::new(network, policy, 0.8);
        let trace = sim.run(300, &mut sim_rng);
        let last = trace.last().copied().unwrap_or_default();
        println!(
            "{:<12} after {} ticks: {:>7.1} queued, efficiency {:.3}",
            strategy.label(),
            last.tick,
            last.total_vehicles,
            last.network_efficiency
        );
        if let Err(e) = log_network_csv("network_metrics.csv", strategy.label(), &trace) {
            eprintln!("Error writing network CSV: {}", e);
        }
        traces.push((strategy.label(), trace));
    }
    if let Err(e) = render_efficiency_lines("network_efficiency.png", &traces) {
        eprintln!("Error rendering efficiency chart: {}", e);
    }
}
