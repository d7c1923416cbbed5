//! Benchmarks for delay line operations.

use std::hint::black_box;

use criterion::{BenchmarkId, Criterion};
use oxide_dsp::dsp::delay::DelayLine;

use crate::{BLOCK_SIZES, SAMPLE_RATE};

pub fn bench_delay(c: &mut Criterion) {
    let mut group = c.benchmark_group("dsp/delay");

    // Delay times in samples at 48kHz
    let delay_times: &[f64] = &[
        480.0,   // 10ms
        4800.5,  // ~100ms, fractional
        48000.0, // 1 second
    ];

    for &size in BLOCK_SIZES {
        let input: Vec<f32> = (0..size).map(|i| (i as f32 * 0.1).sin()).collect();

        for &delay_samples in delay_times {
            let delay_ms = delay_samples / 48.0;

            let mut delay = DelayLine::with_len((SAMPLE_RATE * 2.0) as usize + 1);
            let mut buffer = input.clone();
            group.bench_with_input(
                BenchmarkId::new(format!("render_{}ms", delay_ms as u32), size),
                &size,
                |b, _| {
                    b.iter(|| {
                        buffer.copy_from_slice(&input);
                        delay.render(black_box(&mut buffer), black_box(delay_samples));
                    })
                },
            );
        }

        // Modulated read position
        let mut delay = DelayLine::with_len((SAMPLE_RATE * 2.0) as usize + 1);
        for &sample in &input {
            delay.write(sample);
            delay.advance();
        }
        group.bench_with_input(BenchmarkId::new("read_interpolated", size), &size, |b, _| {
            b.iter(|| {
                let mut sum = 0.0f32;
                for i in 0..size {
                    let delay_time = 480.0 + (i as f64 * 0.1).sin() * 48.0;
                    sum += delay.read_interpolated(black_box(delay_time));
                }
                sum
            })
        });
    }

    group.finish();
}
