//! Benchmarks for the biquad and its coefficient design.

use std::hint::black_box;

use criterion::{BenchmarkId, Criterion};
use oxide_dsp::dsp::filter::{Biquad, BiquadCoefficients, OnePole};
use oxide_dsp::dsp::FilterType;

use crate::{BLOCK_SIZES, SAMPLE_RATE};

pub fn bench_filter(c: &mut Criterion) {
    let mut group = c.benchmark_group("dsp/filter");

    for &size in BLOCK_SIZES {
        // Sawtooth-like ramp
        let input: Vec<f32> = (0..size)
            .map(|i| (i as f32 / size as f32) * 2.0 - 1.0)
            .collect();

        for (name, filter_type) in [
            ("lowpass", FilterType::LowPass),
            ("highpass", FilterType::HighPass),
            ("bandpass", FilterType::BandPass),
        ] {
            let coefficients = BiquadCoefficients::design(filter_type, SAMPLE_RATE, 1000.0, 2.0);
            let mut biquad = Biquad::new();
            let mut buffer = input.clone();
            group.bench_with_input(BenchmarkId::new(name, size), &size, |b, _| {
                b.iter(|| {
                    buffer.copy_from_slice(&input);
                    biquad.render(black_box(&mut buffer), black_box(&coefficients));
                })
            });
        }

        // Delay feedback damping
        let mut one_pole = OnePole::lowpass(SAMPLE_RATE, 8000.0);
        let mut buffer = input.clone();
        group.bench_with_input(BenchmarkId::new("one_pole", size), &size, |b, _| {
            b.iter(|| {
                buffer.copy_from_slice(&input);
                for sample in buffer.iter_mut() {
                    *sample = one_pole.next_sample(black_box(*sample));
                }
            })
        });
    }

    // Redesign cost, paid once per parameter change
    group.bench_function("design", |b| {
        b.iter(|| {
            BiquadCoefficients::design(
                black_box(FilterType::BandPass),
                black_box(SAMPLE_RATE),
                black_box(1200.0),
                black_box(3.0),
            )
        })
    });

    group.finish();
}
