use criterion::{
    black_box, criterion_group, criterion_main, AxisScale, BenchmarkId, Criterion,
    PlotConfiguration,
};
use rand::rngs::StdRng;
use rand::SeedableRng;

use traffic_strategy_bench::analysis::descriptive::calculate_basic_stats;
use traffic_strategy_bench::analysis::hypothesis::{one_way_anova, welch_t_test};
use traffic_strategy_bench::sampling::generate_samples;
use traffic_strategy_bench::scenario::Scenario;
use traffic_strategy_bench::strategy::{ControlStrategy, MetricKind};

/// Generates one deterministic sample vector per strategy for a batch size.
fn sample_vectors(batch: usize) -> Vec<Vec<f64>> {
    let scenario = Scenario::default();
    let mut rng = StdRng::seed_from_u64(batch as u64);
    ControlStrategy::ALL
        .iter()
        .map(|&strategy| {
            generate_samples(strategy, MetricKind::WaitingTime, &scenario, batch, &mut rng)
        })
        .collect()
}

fn bench_statistics(c: &mut Criterion) {
    let batch_sizes = [100, 500, 2000];

    let mut group = c.benchmark_group("Statistics_Batch_Benchmarks");
    group.plot_config(PlotConfiguration::default().summary_scale(AxisScale::Linear));

    for &batch in batch_sizes.iter() {
        let vectors = sample_vectors(batch);

        group.bench_with_input(
            BenchmarkId::new("calculate_basic_stats", batch),
            &batch,
            |b, &_batch| {
                b.iter(|| {
                    let stats = calculate_basic_stats(black_box(&vectors[0]));
                    black_box(stats);
                });
            },
        );

        group.bench_with_input(
            BenchmarkId::new("welch_t_test", batch),
            &batch,
            |b, &_batch| {
                b.iter(|| {
                    let result = welch_t_test(black_box(&vectors[0]), black_box(&vectors[1]));
                    black_box(result);
                });
            },
        );

        group.bench_with_input(
            BenchmarkId::new("one_way_anova", batch),
            &batch,
            |b, &_batch| {
                b.iter(|| {
                    let groups: Vec<&[f64]> = vectors.iter().map(|v| v.as_slice()).collect();
                    let result = one_way_anova(black_box(&groups));
                    black_box(result);
                });
            },
        );
    }
    group.finish();
}

criterion_group!(benches, bench_statistics);
criterion_main!(benches);
