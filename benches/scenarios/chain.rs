//! The whole chain at factory settings, including meters and the scope copy.

use std::hint::black_box;

use criterion::{BenchmarkId, Criterion};
use oxide_dsp::preset::factory_presets;
use oxide_dsp::{ChainConfig, SignalChain};

use crate::{BLOCK_SIZES, SAMPLE_RATE};

pub fn bench_chain(c: &mut Criterion) {
    let mut group = c.benchmark_group("scenarios/chain");

    for &size in BLOCK_SIZES {
        let left_in: Vec<f32> = (0..size).map(|i| (i as f32 * 0.05).sin() * 0.8).collect();
        let right_in = left_in.clone();
        let mut left = left_in.clone();
        let mut right = right_in.clone();

        for preset in factory_presets()
            .into_iter()
            .filter(|p| matches!(p.name.as_str(), "Default" | "Heavy Metal" | "Ambient Wash"))
        {
            let (mut chain, _handle) = SignalChain::with_state(ChainConfig::new(SAMPLE_RATE, size), preset.state);
            let id = preset.name.to_lowercase().replace(' ', "_");

            group.bench_with_input(BenchmarkId::new(id, size), &size, |b, _| {
                b.iter(|| {
                    left.copy_from_slice(&left_in);
                    right.copy_from_slice(&right_in);
                    chain.process_block(black_box(&mut [&mut left[..], &mut right[..]]), Some(128.0));
                })
            });
        }

        // Parameter snapshot arriving every block
        let (mut chain, mut handle) = SignalChain::new(ChainConfig::new(SAMPLE_RATE, size));
        let mut drive = 0.0f32;
        group.bench_with_input(BenchmarkId::new("automated", size), &size, |b, _| {
            b.iter(|| {
                drive = (drive + 0.01) % 1.0;
                handle.set_drive(drive);
                left.copy_from_slice(&left_in);
                right.copy_from_slice(&right_in);
                chain.process_block(black_box(&mut [&mut left[..], &mut right[..]]), None);
            })
        });
    }

    group.finish();
}
