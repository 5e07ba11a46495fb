//! Criterion benchmarks for the equalizer processor
//!
//! Run with: cargo bench -p tono-eq
#![allow(missing_docs)]

use std::sync::Arc;

use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use tono_eq::{EqParams, EqProcessor, params};

const SAMPLE_RATE: f32 = 48000.0;
const BLOCK_SIZES: &[usize] = &[64, 128, 256, 512, 1024];

fn generate_test_signal(size: usize) -> Vec<f32> {
    (0..size)
        .map(|i| (2.0 * std::f32::consts::PI * 440.0 * i as f32 / SAMPLE_RATE).sin() * 0.5)
        .collect()
}

fn configured_processor(max_block: usize) -> EqProcessor {
    let shared = Arc::new(EqParams::new());
    shared.set(params::LOW_GAIN, 4.0);
    shared.set(params::MID_GAIN, -3.0);
    shared.set(params::HIGH_GAIN, 2.0);
    let mut proc = EqProcessor::new(shared);
    proc.prepare(SAMPLE_RATE, max_block);
    proc
}

fn bench_process_stereo(c: &mut Criterion) {
    let mut group = c.benchmark_group("EQ_Process_Stereo");
    for &size in BLOCK_SIZES {
        group.throughput(criterion::Throughput::Elements(size as u64 * 2));
        group.bench_with_input(BenchmarkId::from_parameter(size), &size, |b, &size| {
            let mut proc = configured_processor(size);
            let mut left = generate_test_signal(size);
            let mut right = generate_test_signal(size);
            b.iter(|| {
                proc.process(
                    black_box(&mut [left.as_mut_slice(), right.as_mut_slice()]),
                    2,
                );
            });
        });
    }
    group.finish();
}

fn bench_coefficient_update(c: &mut Criterion) {
    c.bench_function("EQ_Coefficient_Update", |b| {
        let mut proc = configured_processor(64);
        let mut buf = generate_test_signal(64);
        let mut gain = 0.0_f32;
        b.iter(|| {
            // Alternate a band gain so every block takes the recompute path.
            gain = if gain == 0.0 { 1.0 } else { 0.0 };
            proc.params().set(params::MID_GAIN, gain);
            proc.process(black_box(&mut [buf.as_mut_slice()]), 1);
        });
    });
}

fn bench_process_interleaved(c: &mut Criterion) {
    c.bench_function("EQ_Process_Interleaved_512", |b| {
        let mut proc = configured_processor(512);
        let mut frames = generate_test_signal(1024);
        b.iter(|| {
            proc.process_interleaved(black_box(&mut frames), 2);
        });
    });
}

criterion_group!(
    benches,
    bench_process_stereo,
    bench_coefficient_update,
    bench_process_interleaved
);
criterion_main!(benches);
