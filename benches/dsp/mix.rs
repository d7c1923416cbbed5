//! Benchmarks for dry/wet blending.

use std::hint::black_box;

use criterion::{BenchmarkId, Criterion};
use oxide_dsp::dsp::mix;

use crate::BLOCK_SIZES;

pub fn bench_mix(c: &mut Criterion) {
    let mut group = c.benchmark_group("dsp/mix");

    for &size in BLOCK_SIZES {
        let dry: Vec<f32> = (0..size).map(|i| (i as f32 * 0.1).sin()).collect();
        let processed: Vec<f32> = (0..size).map(|i| (i as f32 * 0.15).cos()).collect();

        let mut wet = processed.clone();
        group.bench_with_input(BenchmarkId::new("dry_wet", size), &size, |b, _| {
            b.iter(|| {
                wet.copy_from_slice(&processed);
                mix::apply_dry_wet(black_box(&dry), black_box(&mut wet), black_box(0.3));
            })
        });
    }

    group.finish();
}
