//! Benchmarks for column classification and conversion over generated datasets.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};

use rust_type_inference::inference::{infer_types, InferenceOptions, InferredDataSet};
use rust_type_inference::types::{Column, DataSet};

/// Five columns covering the numeric, date, duration, categorical and free-text paths.
fn generated(rows: usize) -> DataSet {
    let ids: Vec<String> = (0..rows).map(|i| i.to_string()).collect();
    let scores: Vec<String> = (0..rows).map(|i| format!("{}.5", i % 97)).collect();
    let dates: Vec<String> = (0..rows)
        .map(|i| format!("2024-{:02}-{:02}", i % 12 + 1, i % 28 + 1))
        .collect();
    let elapsed: Vec<String> = (0..rows).map(|i| format!("{}m", i % 60)).collect();
    let plans = ["free", "pro", "team"];
    let plan: Vec<&str> = (0..rows).map(|i| plans[i % 3]).collect();
    let notes: Vec<String> = (0..rows).map(|i| format!("note {i}")).collect();

    let text = |name: &str, cells: &[String]| {
        Column::from_text(name, cells.iter().map(|s| Some(s.as_str())))
    };
    DataSet::new(vec![
        text("id", &ids),
        text("score", &scores),
        text("signup_date", &dates),
        text("elapsed", &elapsed),
        Column::from_text("plan", plan.iter().map(|s| Some(*s))),
        text("notes", &notes),
    ])
    .expect("generated columns have equal lengths")
}

fn bench_infer_types(c: &mut Criterion) {
    let mut group = c.benchmark_group("infer_types");

    for rows in [1_000, 10_000, 100_000] {
        let ds = generated(rows);
        group.throughput(Throughput::Elements(rows as u64));

        for parallel in [false, true] {
            let opts = InferenceOptions {
                parallel,
                ..Default::default()
            };
            let label = if parallel { "parallel" } else { "sequential" };
            group.bench_with_input(BenchmarkId::new(label, rows), &ds, |b, ds| {
                b.iter(|| infer_types(black_box(ds), &opts))
            });
        }
    }

    group.finish();
}

fn bench_infer_and_convert(c: &mut Criterion) {
    let mut group = c.benchmark_group("infer_and_convert");
    let opts = InferenceOptions::default();

    for rows in [1_000, 10_000] {
        let ds = generated(rows);
        group.throughput(Throughput::Elements(rows as u64));
        group.bench_with_input(BenchmarkId::from_parameter(rows), &ds, |b, ds| {
            b.iter(|| InferredDataSet::new(black_box(ds.clone()), &opts))
        });
    }

    group.finish();
}

criterion_group!(benches, bench_infer_types, bench_infer_and_convert);
criterion_main!(benches);
