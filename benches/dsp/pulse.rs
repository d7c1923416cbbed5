//! Benchmarks for the tempo-synced envelope primitives.

use std::hint::black_box;

use criterion::{BenchmarkId, Criterion};
use oxide_dsp::dsp::pulse::{advance_phase, phase_increment, pulse_envelope};
use oxide_dsp::dsp::NoteRate;

use crate::{BLOCK_SIZES, SAMPLE_RATE};

pub fn bench_pulse(c: &mut Criterion) {
    let mut group = c.benchmark_group("dsp/pulse");
    let increment = phase_increment(128.0, NoteRate::Eighth, SAMPLE_RATE as f64);

    for &size in BLOCK_SIZES {
        let mut buffer = vec![0.0f32; size];
        let mut phase = 0.0f64;

        group.bench_with_input(BenchmarkId::new("envelope", size), &size, |b, _| {
            b.iter(|| {
                for sample in buffer.iter_mut() {
                    *sample = pulse_envelope(phase);
                    phase = advance_phase(phase, black_box(increment));
                }
            })
        });
    }

    group.finish();
}
