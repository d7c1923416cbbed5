//! oxide - play a test riff through the effect chain
//!
//! Run with: cargo run -- [preset name] [--bpm N] [--seconds N] [--cycle]
//!
//! `--cycle` steps through the factory presets every four bars.

mod signal;

use std::io::Write;
use std::time::{Duration, Instant};

use color_eyre::eyre::{eyre, Result as EyreResult, WrapErr};
use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};

use oxide_dsp::preset::{factory_preset, factory_presets, Preset, PresetStore};
use oxide_dsp::{ChainConfig, SignalChain, MAX_CHANNELS};
use signal::TestSignal;

const BLOCK_SIZE: usize = 1024;

struct Args {
    preset: String,
    bpm: f64,
    seconds: Option<f64>,
    cycle: bool,
}

fn parse_args() -> EyreResult<Args> {
    let mut args = Args {
        preset: "Heavy Metal".to_string(),
        bpm: 120.0,
        seconds: None,
        cycle: false,
    };

    let mut iter = std::env::args().skip(1);
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--bpm" => {
                let value = iter.next().ok_or_else(|| eyre!("--bpm needs a value"))?;
                args.bpm = value.parse().wrap_err("invalid --bpm")?;
            }
            "--seconds" => {
                let value = iter.next().ok_or_else(|| eyre!("--seconds needs a value"))?;
                args.seconds = Some(value.parse().wrap_err("invalid --seconds")?);
            }
            "--cycle" => args.cycle = true,
            name => args.preset = name.to_string(),
        }
    }

    Ok(args)
}

/// User preset directory first, factory bank second.
fn find_preset(name: &str) -> EyreResult<Preset> {
    match PresetStore::open_default().and_then(|store| store.load(name)) {
        Ok(preset) => Ok(preset),
        Err(err) => {
            tracing::warn!(%err, "preset store unavailable, using factory bank");
            factory_preset(name).ok_or_else(|| eyre!("unknown preset {name:?}"))
        }
    }
}

fn main() -> EyreResult<()> {
    color_eyre::install()?;
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::INFO)
        .init();

    let args = parse_args()?;
    let preset = find_preset(&args.preset)?;

    // Set up audio
    let host = cpal::default_host();
    let device = host
        .default_output_device()
        .ok_or_else(|| eyre!("no default output device available"))?;
    let config = device
        .default_output_config()
        .wrap_err("failed to fetch default output config")?;

    let sample_rate = config.sample_rate().0 as f32;
    let channels = config.channels() as usize;

    println!("=== Oxide ===");
    println!("Preset: {}", preset.name);
    println!("BPM: {}", args.bpm);
    println!("Sample rate: {} Hz", sample_rate);
    println!("Channels: {}", channels);
    println!();

    let chain_config = ChainConfig::new(sample_rate, BLOCK_SIZE).with_channels(channels.min(MAX_CHANNELS));
    let (mut chain, mut handle) = SignalChain::with_state(chain_config, preset.state);
    let monitor = handle.monitor().clone();

    let mut source = TestSignal::new(sample_rate, args.bpm);
    let bpm = args.bpm;
    let mut left = vec![0.0f32; BLOCK_SIZE];
    let mut right = vec![0.0f32; BLOCK_SIZE];

    let stream = device.build_output_stream(
        &config.into(),
        move |data: &mut [f32], _| {
            let total_frames = data.len() / channels;
            let mut frames_written = 0;

            while frames_written < total_frames {
                let frames = (total_frames - frames_written).min(BLOCK_SIZE);
                let l = &mut left[..frames];
                let r = &mut right[..frames];

                source.render(l);
                r.copy_from_slice(l);
                chain.process_block(&mut [&mut *l, &mut *r], Some(bpm));

                // Interleave; devices with more than two channels get silence on the rest
                let out = &mut data[frames_written * channels..(frames_written + frames) * channels];
                for (i, frame) in out.chunks_mut(channels).enumerate() {
                    for (ch, sample) in frame.iter_mut().enumerate() {
                        *sample = match ch {
                            0 => l[i],
                            1 => r[i],
                            _ => 0.0,
                        };
                    }
                }

                frames_written += frames;
            }
        },
        |err| eprintln!("Audio error: {}", err),
        None,
    )?;

    stream.play()?;
    println!("Playing... Press Ctrl+C to stop");

    let bank = factory_presets();
    let bar = Duration::from_secs_f64(4.0 * 60.0 / args.bpm);
    let started = Instant::now();
    let mut next_switch = started + bar * 4;
    let mut bank_index = bank.iter().position(|p| p.name == preset.name).unwrap_or(0);

    loop {
        std::thread::sleep(Duration::from_millis(250));

        if args.seconds.is_some_and(|limit| started.elapsed().as_secs_f64() >= limit) {
            break;
        }

        if args.cycle && Instant::now() >= next_switch && !bank.is_empty() {
            bank_index = (bank_index + 1) % bank.len();
            handle.set_state(bank[bank_index].state);
            println!("\n-> {}", bank[bank_index].name);
            next_switch += bar * 4;
        }
        handle.flush();

        print!(
            "\rin {:>6.3} {:>6.3}   out {:>6.3} {:>6.3}",
            monitor.input_level(0),
            monitor.input_level(1),
            monitor.output_level(0),
            monitor.output_level(1),
        );
        std::io::stdout().flush()?;
    }

    println!();
    Ok(())
}
