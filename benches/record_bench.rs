use chart_options::{EncodeConfig, Plot, Record, ToMappingOptions, Value, to_js_literal};
use criterion::{Criterion, criterion_group, criterion_main};
use serde_json::json;
use std::hint::black_box;

fn scatter_plot(points: usize) -> Plot {
    let mut plot = Plot::new().expect("plot init");
    let source: Vec<Value> = (0..points)
        .map(|i| {
            let x = i as f64;
            Value::from(vec![Value::Float(x), Value::Float((x * 0.01).sin() * 500.0)])
        })
        .collect();
    let mut dataset = Record::new();
    dataset.set("source", source).expect("source");
    plot.add_dataset(dataset).expect("dataset");
    plot.add_series(json!({"type": "scatter", "datasetIndex": 0}))
        .expect("series");
    plot.option_mut()
        .child("xAxis")
        .and_then(|axis| axis.set("type", "value"))
        .expect("x axis");
    plot.option_mut()
        .child("yAxis")
        .and_then(|axis| axis.set("type", "value"))
        .expect("y axis");
    plot
}

fn bench_deep_path_materialization(c: &mut Criterion) {
    c.bench_function("record_set_path_depth_8", |b| {
        b.iter(|| {
            let mut root = Record::new();
            root.set_path(
                black_box(&["a", "b", "c", "d", "e", "f", "g", "h"]),
                black_box(5),
            )
            .expect("set path");
        })
    });
}

fn bench_to_mapping_2k(c: &mut Criterion) {
    let plot = scatter_plot(2_000);
    c.bench_function("record_to_mapping_2k", |b| {
        b.iter(|| {
            let _ = black_box(plot.option()).to_mapping(ToMappingOptions::for_output());
        })
    });
}

fn bench_plot_to_json_2k(c: &mut Criterion) {
    let plot = scatter_plot(2_000);
    c.bench_function("plot_to_json_2k", |b| {
        b.iter(|| {
            let mut plot = plot.clone();
            let _ = plot
                .to_json(black_box(EncodeConfig::default()))
                .expect("encode should succeed");
        })
    });
}

fn bench_literal_encoding_2k(c: &mut Criterion) {
    let mut plot = scatter_plot(2_000);
    plot.finalise().expect("finalise");
    c.bench_function("js_literal_encoding_2k", |b| {
        b.iter(|| {
            let _ = to_js_literal(black_box(plot.option()), EncodeConfig::default())
                .expect("encode should succeed");
        })
    });
}

criterion_group!(
    benches,
    bench_deep_path_materialization,
    bench_to_mapping_2k,
    bench_plot_to_json_2k,
    bench_literal_encoding_2k
);
criterion_main!(benches);
