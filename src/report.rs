//! CSV and chart export for comparison reports and network traces.

use std::error::Error;
use std::fs::OpenOptions;
use std::path::Path;

use plotters::prelude::*;
use serde::{Deserialize, Serialize};

use crate::comparison::ComparisonReport;
use crate::network::NetworkMetrics;
use crate::strategy::{ControlStrategy, MetricKind};

/// One flattened CSV row per strategy/metric cell.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComparisonRow {
    pub strategy: String,
    pub metric: String,
    pub mean: f64,
    pub std_dev: f64,
    pub ci_lower: f64,
    pub ci_upper: f64,
}

/// One flattened CSV row per simulation tick.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NetworkRow {
    pub policy: String,
    pub tick: u64,
    pub total_vehicles: f64,
    pub average_waiting_time: f64,
    pub network_efficiency: f64,
}

/// Appends one record to a CSV file, writing headers only when the file is
/// first created.
fn log_to_csv<T: Serialize>(filename: &str, record: &T) -> Result<(), Box<dyn Error>> {
    let file_exists = Path::new(filename).exists();
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(filename)?;
    let mut wtr = csv::WriterBuilder::new()
        .has_headers(!file_exists)
        .from_writer(file);
    wtr.serialize(record)?;
    wtr.flush()?;
    Ok(())
}

/// Writes every summary cell of a comparison report to `filename`.
pub fn log_comparison_csv(filename: &str, report: &ComparisonReport) -> Result<(), Box<dyn Error>> {
    for summary in &report.summaries {
        let row = ComparisonRow {
            strategy: summary.strategy.label().to_string(),
            metric: summary.metric.label().to_string(),
            mean: summary.stats.mean,
            std_dev: summary.stats.std_dev,
            ci_lower: summary.confidence.lower,
            ci_upper: summary.confidence.upper,
        };
        log_to_csv(filename, &row)?;
    }
    Ok(())
}

/// Writes a per-tick network metric trace to `filename`.
pub fn log_network_csv(
    filename: &str,
    policy_label: &str,
    trace: &[NetworkMetrics],
) -> Result<(), Box<dyn Error>> {
    for metrics in trace {
        let row = NetworkRow {
            policy: policy_label.to_string(),
            tick: metrics.tick,
            total_vehicles: metrics.total_vehicles,
            average_waiting_time: metrics.average_waiting_time,
            network_efficiency: metrics.network_efficiency,
        };
        log_to_csv(filename, &row)?;
    }
    Ok(())
}

fn strategy_color(strategy: ControlStrategy) -> RGBColor {
    match strategy {
        ControlStrategy::FixedTime => RGBColor(203, 67, 53),
        ControlStrategy::RuleBased => RGBColor(40, 116, 166),
        ControlStrategy::ReinforcementLearning => RGBColor(30, 132, 73),
    }
}

/// Renders a grouped bar chart of per-strategy means for one metric.
pub fn render_metric_bars(
    filename: &str,
    report: &ComparisonReport,
    metric: MetricKind,
) -> Result<(), Box<dyn Error>> {
    let cells: Vec<_> = report
        .summaries
        .iter()
        .filter(|s| s.metric == metric)
        .collect();
    if cells.is_empty() {
        return Ok(());
    }
    let max_value = cells
        .iter()
        .map(|s| s.confidence.upper)
        .fold(0.0_f64, f64::max)
        * 1.15;

    let backend = BitMapBackend::new(filename, (640, 480));
    let root = backend.into_drawing_area();
    root.fill(&WHITE)?;

    let mut chart = ChartBuilder::on(&root)
        .caption(
            format!("Strategy comparison: {}", metric.label()),
            ("sans-serif", 20),
        )
        .margin(40)
        .x_label_area_size(40)
        .y_label_area_size(50)
        .build_cartesian_2d(0.0..cells.len() as f64, 0.0..max_value)?;

    chart
        .configure_mesh()
        .disable_x_mesh()
        .x_labels(cells.len())
        .x_label_formatter(&|x| {
            cells
                .get(x.floor() as usize)
                .map(|s| s.strategy.label().to_string())
                .unwrap_or_default()
        })
        .draw()?;

    chart.draw_series(cells.iter().enumerate().map(|(i, summary)| {
        let x0 = i as f64 + 0.2;
        let x1 = i as f64 + 0.8;
        Rectangle::new(
            [(x0, 0.0), (x1, summary.stats.mean)],
            strategy_color(summary.strategy).filled(),
        )
    }))?;

    // Confidence interval whiskers on top of each bar.
    chart.draw_series(cells.iter().enumerate().map(|(i, summary)| {
        let x = i as f64 + 0.5;
        PathElement::new(
            vec![(x, summary.confidence.lower), (x, summary.confidence.upper)],
            BLACK.stroke_width(2),
        )
    }))?;

    root.present()?;
    log::info!("metric chart saved to {filename}");
    Ok(())
}

/// Renders network efficiency over time for several policy traces.
pub fn render_efficiency_lines(
    filename: &str,
    traces: &[(&str, Vec<NetworkMetrics>)],
) -> Result<(), Box<dyn Error>> {
    let max_tick = traces
        .iter()
        .flat_map(|(_, t)| t.iter().map(|m| m.tick))
        .max()
        .unwrap_or(0);
    let max_eff = traces
        .iter()
        .flat_map(|(_, t)| t.iter().map(|m| m.network_efficiency))
        .fold(0.0_f64, f64::max)
        * 1.1;
    if max_tick == 0 {
        return Ok(());
    }

    let backend = BitMapBackend::new(filename, (800, 600));
    let root = backend.into_drawing_area();
    root.fill(&WHITE)?;

    let mut chart = ChartBuilder::on(&root)
        .caption("Network efficiency per policy", ("sans-serif", 20))
        .margin(40)
        .x_label_area_size(40)
        .y_label_area_size(50)
        .build_cartesian_2d(0..max_tick, 0.0..max_eff)?;

    chart.configure_mesh().draw()?;

    let palette = [RED, BLUE, GREEN, MAGENTA];
    for (i, (label, trace)) in traces.iter().enumerate() {
        let color = palette[i % palette.len()];
        chart
            .draw_series(LineSeries::new(
                trace.iter().map(|m| (m.tick, m.network_efficiency)),
                &color,
            ))?
            .label(*label)
            .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 16, y)], color));
    }

    chart
        .configure_series_labels()
        .background_style(WHITE.mix(0.8))
        .border_style(BLACK)
        .draw()?;

    root.present()?;
    log::info!("efficiency chart saved to {filename}");
    Ok(())
}
