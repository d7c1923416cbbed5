//! Benchmarks for the waveshaping curves.

use std::hint::black_box;

use criterion::{BenchmarkId, Criterion};
use oxide_dsp::fx::{DistortionAlgorithm, ParamEnum};

use crate::BLOCK_SIZES;

pub fn bench_distortion(c: &mut Criterion) {
    let mut group = c.benchmark_group("dsp/distortion");

    for &size in BLOCK_SIZES {
        let input: Vec<f32> = (0..size).map(|i| (i as f32 * 0.1).sin()).collect();

        for &(algorithm, name) in DistortionAlgorithm::TABLE {
            let shaper = algorithm.shaper();
            let mut buffer = input.clone();
            group.bench_with_input(BenchmarkId::new(name, size), &size, |b, _| {
                b.iter(|| {
                    buffer.copy_from_slice(&input);
                    shaper(black_box(&mut buffer), black_box(0.8));
                })
            });
        }
    }

    group.finish();
}
