//! Each effect on its own, stereo, with settings from the factory bank.

use std::hint::black_box;

use criterion::{BenchmarkId, Criterion};
use oxide_dsp::fx::{DelayProcessor, DistortionProcessor, FilterProcessor, Processor, PulseProcessor};
use oxide_dsp::preset::factory_preset;

use crate::{BLOCK_SIZES, SAMPLE_RATE};

fn stereo_input(size: usize) -> (Vec<f32>, Vec<f32>) {
    let left = (0..size).map(|i| (i as f32 * 0.05).sin() * 0.8).collect();
    let right = (0..size).map(|i| (i as f32 * 0.07).sin() * 0.8).collect();
    (left, right)
}

fn bench_one<P: Processor>(
    group: &mut criterion::BenchmarkGroup<'_, criterion::measurement::WallTime>,
    name: &str,
    size: usize,
    mut processor: P,
) {
    processor.prepare(SAMPLE_RATE, size);
    let (left_in, right_in) = stereo_input(size);
    let mut left = left_in.clone();
    let mut right = right_in.clone();

    group.bench_with_input(BenchmarkId::new(name, size), &size, |b, _| {
        b.iter(|| {
            left.copy_from_slice(&left_in);
            right.copy_from_slice(&right_in);
            processor.process_block(black_box(&mut [&mut left[..], &mut right[..]]));
        })
    });
}

pub fn bench_processors(c: &mut Criterion) {
    let mut group = c.benchmark_group("scenarios/processors");
    let Some(preset) = factory_preset("Synth Destroyer") else {
        return;
    };
    let state = preset.state;

    for &size in BLOCK_SIZES {
        bench_one(&mut group, "distortion", size, DistortionProcessor::with_params(state.distortion));
        bench_one(&mut group, "delay", size, DelayProcessor::with_params(state.delay));
        bench_one(&mut group, "filter", size, FilterProcessor::with_params(state.filter));

        let mut pulse = PulseProcessor::with_params(state.pulse);
        pulse.set_bpm(128.0);
        bench_one(&mut group, "pulse", size, pulse);
    }

    group.finish();
}
