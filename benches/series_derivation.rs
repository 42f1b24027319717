//! Benchmarks for chart derivation
//!
//! Run with: cargo bench

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use passdown_vis::chart::{derive_series, ChartThresholds, SelectionState, SeriesStatistics};
use passdown_vis::types::{ParameterMeta, RepeatabilityDataset, TimeSeriesRow};

fn make_dataset(days: usize) -> RepeatabilityDataset {
    let parameters: Vec<_> = ParameterMeta::known_ids().collect();
    let rows = (0..days)
        .map(|day| {
            parameters.iter().enumerate().fold(
                TimeSeriesRow::new(format!("2024-{:02}-{:02}", day / 28 + 1, day % 28 + 1)),
                |row, (i, id)| {
                    let value = 11.5 + ((day * 7 + i * 3) % 20) as f64 * 0.1 - 1.0;
                    row.with_value(id.avg_key(), value)
                },
            )
        })
        .collect();
    RepeatabilityDataset::new(rows, parameters)
}

fn bench_derive_series(c: &mut Criterion) {
    let mut group = c.benchmark_group("derive_series");
    let thresholds = ChartThresholds::default();

    for days in [7, 30, 365] {
        let dataset = make_dataset(days);
        let mut selection = SelectionState::default();
        selection.select_all(&dataset);

        group.throughput(Throughput::Elements((days * selection.len()) as u64));
        group.bench_with_input(BenchmarkId::from_parameter(days), &dataset, |b, dataset| {
            b.iter(|| derive_series(black_box(&selection), black_box(dataset), &thresholds))
        });
    }

    group.finish();
}

fn bench_statistics(c: &mut Criterion) {
    let dataset = make_dataset(365);
    let mut selection = SelectionState::default();
    selection.select_all(&dataset);
    let series = derive_series(&selection, &dataset, &ChartThresholds::default());

    c.bench_function("series_statistics_365_days", |b| {
        b.iter(|| {
            series
                .iter()
                .map(|s| SeriesStatistics::from_series(black_box(s), &dataset))
                .count()
        })
    });
}

fn bench_selection_toggle(c: &mut Criterion) {
    let ids: Vec<_> = ParameterMeta::known_ids().collect();

    c.bench_function("selection_toggle_cycle", |b| {
        b.iter(|| {
            let mut selection = SelectionState::default();
            for id in &ids {
                selection.toggle(black_box(id));
            }
            for id in ids.iter().rev() {
                selection.toggle(black_box(id));
            }
            selection.len()
        })
    });
}

criterion_group!(benches, bench_derive_series, bench_statistics, bench_selection_toggle);
criterion_main!(benches);
