//! Criterion microbenches for labelpad encoders and decoders.
//!
//! Run with: `cargo bench`
//!
//! Every mutation in the playground re-encodes the whole set, so encode
//! latency for a realistic set size is the number that matters.

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use std::hint::black_box;

use labelpad::config::PlaygroundConfig;
use labelpad::export::ExportFormat;
use labelpad::ir::io_coco_json::{from_coco_slice, from_coco_str};
use labelpad::ir::io_yolo::from_yolo_str;
use labelpad::ir::{AnnotationSet, FrameSize};
use labelpad::sample::{sample_set, SampleOptions};

// Include test fixtures at compile time (no file I/O during benchmark)
const COCO_FIXTURE: &str = include_str!("../tests/fixtures/sample.coco.json");
const YOLO_FIXTURE: &str = include_str!("../tests/fixtures/sample.yolo.txt");

fn busy_set(config: &PlaygroundConfig) -> AnnotationSet {
    let opts = SampleOptions {
        min_boxes: 50,
        max_boxes: 50,
        seed: Some(42),
        ..Default::default()
    };
    sample_set(&config.classes, &opts).unwrap()
}

/// Benchmark encoding a 50-box set in each format.
fn bench_encode(c: &mut Criterion) {
    let config = PlaygroundConfig::default();
    let set = busy_set(&config);
    let mut group = c.benchmark_group("encode");
    group.throughput(Throughput::Elements(set.len() as u64));

    for format in ExportFormat::ALL {
        group.bench_with_input(BenchmarkId::from_parameter(format), &set, |b, set| {
            b.iter(|| black_box(format.encode(black_box(set), &config)))
        });
    }

    group.finish();
}

/// Benchmark decoding the encoder's own output for each format.
fn bench_decode(c: &mut Criterion) {
    let config = PlaygroundConfig::default();
    let set = busy_set(&config);
    let mut group = c.benchmark_group("decode");

    for format in ExportFormat::ALL {
        let text = format.encode(&set, &config);
        group.throughput(Throughput::Bytes(text.len() as u64));
        group.bench_with_input(BenchmarkId::from_parameter(format), &text, |b, text| {
            b.iter(|| black_box(format.decode(black_box(text), &config).unwrap()))
        });
    }

    group.finish();
}

/// Benchmark COCO parsing from string vs. byte slice.
fn bench_coco_parse(c: &mut Criterion) {
    let bytes = COCO_FIXTURE.as_bytes();
    let mut group = c.benchmark_group("coco_parse");
    group.throughput(Throughput::Bytes(bytes.len() as u64));

    group.bench_function("from_coco_str", |b| {
        b.iter(|| black_box(from_coco_str(black_box(COCO_FIXTURE), FrameSize::REFERENCE).unwrap()))
    });
    group.bench_function("from_coco_slice", |b| {
        b.iter(|| black_box(from_coco_slice(black_box(bytes), FrameSize::REFERENCE).unwrap()))
    });

    group.finish();
}

/// Benchmark YOLO parsing of a small hand-written file.
fn bench_yolo_parse(c: &mut Criterion) {
    let mut group = c.benchmark_group("yolo_parse");
    group.throughput(Throughput::Bytes(YOLO_FIXTURE.len() as u64));

    group.bench_function("from_yolo_str", |b| {
        b.iter(|| black_box(from_yolo_str(black_box(YOLO_FIXTURE)).unwrap()))
    });

    group.finish();
}

criterion_group!(
    benches,
    bench_encode,
    bench_decode,
    bench_coco_parse,
    bench_yolo_parse
);
criterion_main!(benches);
