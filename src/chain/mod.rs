//! The signal chain: the four effects in series plus metering.

/*
Signal Chain
============

Per block, on the audio thread:

    drain parameter queue (keep newest snapshot)
            │
            ▼
    input meters (RMS of the untouched input)
            │
            ▼
    delay ──► distortion ──► filter ──► pulse
                                          ▲
                             host BPM ────┘
            │
            ▼
    output meters, scope copy (skipped if a reader holds it)

The control thread never touches the processors. It edits a `ChainHandle`,
which ships whole `ChainState` snapshots through a wait-free SPSC ring, so
one block always runs with one consistent parameter set.
*/

mod handle;
mod monitor;

pub use handle::ChainHandle;
pub use monitor::ChainMonitor;

use std::sync::Arc;

use rtrb::{Consumer, RingBuffer};

use crate::config::ChainConfig;
use crate::dsp::amplify::rms;
use crate::dsp::smooth::SmoothedValue;
use crate::fx::processor::{block_len, AudioBlock, Processor};
use crate::fx::pulse::sanitize_host_bpm;
use crate::fx::{DelayProcessor, DistortionProcessor, FilterProcessor, PulseProcessor};
use crate::state::ChainState;
use crate::MAX_CHANNELS;

pub struct SignalChain {
    config: ChainConfig,
    delay: DelayProcessor,
    distortion: DistortionProcessor,
    filter: FilterProcessor,
    pulse: PulseProcessor,
    rx: Consumer<ChainState>,
    monitor: Arc<ChainMonitor>,
    input_meters: [SmoothedValue; MAX_CHANNELS],
    output_meters: [SmoothedValue; MAX_CHANNELS],
}

impl SignalChain {
    /// Build a prepared chain with default parameters and the handle that controls it.
    pub fn new(config: ChainConfig) -> (Self, ChainHandle) {
        Self::with_state(config, ChainState::default())
    }

    pub fn with_state(config: ChainConfig, state: ChainState) -> (Self, ChainHandle) {
        let config = config.sanitized();
        let (tx, rx) = RingBuffer::new(config.param_queue_capacity);
        let monitor = Arc::new(ChainMonitor::new(config.channels, config.max_block_size));
        let meter = || SmoothedValue::new(0.0, config.meter_smoothing_secs, config.sample_rate);

        let mut pulse = PulseProcessor::with_params(state.pulse);
        pulse.set_declick_time(config.declick_secs);

        let mut chain = Self {
            config,
            delay: DelayProcessor::with_params(state.delay),
            distortion: DistortionProcessor::with_params(state.distortion),
            filter: FilterProcessor::with_params(state.filter),
            pulse,
            rx,
            monitor: Arc::clone(&monitor),
            input_meters: std::array::from_fn(|_| meter()),
            output_meters: std::array::from_fn(|_| meter()),
        };
        chain.prepare(config.sample_rate, config.max_block_size);

        (chain, ChainHandle::new(tx, state, monitor))
    }

    /// (Re)size every processor and the scope for a new stream format.
    ///
    /// Allocates. Call from the host's setup path, never from the callback.
    pub fn prepare(&mut self, sample_rate: f32, max_block_size: usize) {
        let config = ChainConfig {
            sample_rate,
            max_block_size,
            ..self.config
        }
        .sanitized();
        self.config = config;

        self.delay.prepare(config.sample_rate, config.max_block_size);
        self.distortion.prepare(config.sample_rate, config.max_block_size);
        self.filter.prepare(config.sample_rate, config.max_block_size);
        self.pulse.prepare(config.sample_rate, config.max_block_size);

        for meter in self.input_meters.iter_mut().chain(self.output_meters.iter_mut()) {
            meter.reset(0.0, config.meter_smoothing_secs, config.sample_rate);
        }
        self.monitor.resize_scope(config.channels, config.max_block_size);

        tracing::info!(
            sample_rate = config.sample_rate,
            max_block_size = config.max_block_size,
            channels = config.channels,
            "signal chain prepared"
        );
    }

    /// Clear delay tails, filter history, pulse phase and meters.
    pub fn reset(&mut self) {
        self.delay.reset();
        self.distortion.reset();
        self.filter.reset();
        self.pulse.reset();

        for meter in self.input_meters.iter_mut().chain(self.output_meters.iter_mut()) {
            meter.set_immediate(0.0);
        }
        self.monitor.store_input_levels(&[0.0; MAX_CHANNELS]);
        self.monitor.store_output_levels(&[0.0; MAX_CHANNELS]);

        tracing::debug!("signal chain reset");
    }

    /// Run one block through delay, distortion, filter and pulse in place.
    ///
    /// `host_bpm` is the transport tempo for this block; `None` runs the pulse at 120 BPM.
    pub fn process_block(&mut self, block: &mut AudioBlock<'_>, host_bpm: Option<f64>) {
        self.apply_pending_state();

        let num_samples = block_len(block);
        let levels = Self::measure(block, &mut self.input_meters, num_samples);
        self.monitor.store_input_levels(&levels);

        self.delay.process_block(block);
        self.distortion.process_block(block);
        self.filter.process_block(block);
        self.pulse.set_bpm(sanitize_host_bpm(host_bpm));
        self.pulse.process_block(block);

        let levels = Self::measure(block, &mut self.output_meters, num_samples);
        self.monitor.store_output_levels(&levels);
        self.monitor.capture_scope(block);
    }

    fn apply_pending_state(&mut self) {
        let mut latest = None;
        while let Ok(state) = self.rx.pop() {
            latest = Some(state);
        }

        if let Some(state) = latest {
            self.distortion.set_params(state.distortion);
            self.delay.set_params(state.delay);
            self.filter.set_params(state.filter);

            // Tempo comes from the host, not from the control thread.
            let mut pulse = state.pulse;
            pulse.set_bpm(self.pulse.params().bpm());
            self.pulse.set_params(pulse);
        }
    }

    fn measure(
        block: &AudioBlock<'_>,
        meters: &mut [SmoothedValue; MAX_CHANNELS],
        num_samples: usize,
    ) -> [f32; MAX_CHANNELS] {
        let mut levels = [0.0; MAX_CHANNELS];
        for (c, meter) in meters.iter_mut().enumerate() {
            let target = block.get(c).map_or(0.0, |channel| rms(channel));
            meter.set_target(target);
            levels[c] = meter.skip(num_samples);
        }
        levels
    }

    /// Parameters currently applied on the audio side, including the host tempo.
    pub fn state(&self) -> ChainState {
        ChainState {
            distortion: *self.distortion.params(),
            delay: *self.delay.params(),
            filter: *self.filter.params(),
            pulse: *self.pulse.params(),
        }
    }

    pub fn config(&self) -> &ChainConfig {
        &self.config
    }

    pub fn monitor(&self) -> &Arc<ChainMonitor> {
        &self.monitor
    }

    pub fn delay(&self) -> &DelayProcessor {
        &self.delay
    }

    pub fn distortion(&self) -> &DistortionProcessor {
        &self.distortion
    }

    pub fn filter(&self) -> &FilterProcessor {
        &self.filter
    }

    pub fn pulse(&self) -> &PulseProcessor {
        &self.pulse
    }
}
