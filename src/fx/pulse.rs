use crate::dsp::mix::blend_dry_wet;
use crate::dsp::pulse::{advance_phase, phase_increment, pulse_envelope, NoteRate};
use crate::dsp::smooth::SmoothedValue;
use crate::fx::param::{clamp_param, clamp_param_f64, ParamEnum};
use crate::fx::processor::{AudioBlock, Processor};
use crate::{DEFAULT_BPM, MAX_CHANNELS};

pub const BPM_RANGE: (f64, f64) = (20.0, 300.0);

/// Mix at or below this leaves the block untouched and freezes the phase.
pub const BYPASS_MIX: f32 = 0.001;

/// Ramp time of the envelope declicker.
pub const DEFAULT_DECLICK_SECS: f32 = 0.01;

/// Tempo to use for a host transport reading.
///
/// Missing, non-finite or non-positive tempos fall back to [`DEFAULT_BPM`];
/// the result always lies in [`BPM_RANGE`].
pub fn sanitize_host_bpm(bpm: Option<f64>) -> f64 {
    let bpm = match bpm {
        Some(bpm) if bpm.is_finite() && bpm > 0.0 => bpm,
        _ => DEFAULT_BPM,
    };
    bpm.clamp(BPM_RANGE.0, BPM_RANGE.1)
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PulseParams {
    mix: f32,
    rate: NoteRate,
    bpm: f64,
}

impl Default for PulseParams {
    fn default() -> Self {
        Self {
            mix: 0.0,
            rate: NoteRate::Quarter,
            bpm: DEFAULT_BPM,
        }
    }
}

impl PulseParams {
    pub fn set_mix(&mut self, mix: f32) {
        self.mix = clamp_param(mix, 0.0, 1.0);
    }

    pub fn set_rate(&mut self, rate: NoteRate) {
        self.rate = rate;
    }

    /// Unknown names select `Quarter`.
    pub fn set_rate_name(&mut self, name: &str) {
        self.rate = NoteRate::from_token(name);
    }

    pub fn set_bpm(&mut self, bpm: f64) {
        self.bpm = clamp_param_f64(bpm, BPM_RANGE.0, BPM_RANGE.1);
    }

    pub fn mix(&self) -> f32 {
        self.mix
    }

    pub fn rate(&self) -> NoteRate {
        self.rate
    }

    pub fn rate_name(&self) -> &'static str {
        self.rate.token()
    }

    pub fn bpm(&self) -> f64 {
        self.bpm
    }
}

/// Tempo-synced volume pump. See `dsp/pulse.rs` for the envelope shape.
pub struct PulseProcessor {
    params: PulseParams,
    phase: f64,
    phase_increment: f64,
    envelope: SmoothedValue,
    declick_secs: f32,
    sample_rate: f64,
    prepared: bool,
}

impl PulseProcessor {
    pub fn new() -> Self {
        Self::with_params(PulseParams::default())
    }

    pub fn with_params(params: PulseParams) -> Self {
        let sample_rate = 44_100.0;
        let mut pulse = Self {
            params,
            phase: 0.0,
            phase_increment: 0.0,
            envelope: SmoothedValue::new(1.0, DEFAULT_DECLICK_SECS, sample_rate as f32),
            declick_secs: DEFAULT_DECLICK_SECS,
            sample_rate,
            prepared: false,
        };
        pulse.update_phase_increment();
        pulse
    }

    /// Change the declick ramp. Takes effect on the next `prepare` or `reset`.
    pub fn set_declick_time(&mut self, seconds: f32) {
        self.declick_secs = seconds.max(0.0);
    }

    pub fn params(&self) -> &PulseParams {
        &self.params
    }

    pub fn set_params(&mut self, params: PulseParams) {
        let retime = params.rate != self.params.rate || params.bpm != self.params.bpm;
        self.params = params;
        if retime {
            self.update_phase_increment();
        }
    }

    pub fn set_mix(&mut self, mix: f32) {
        self.params.set_mix(mix);
    }

    pub fn set_rate(&mut self, rate: NoteRate) {
        self.params.set_rate(rate);
        self.update_phase_increment();
    }

    pub fn set_rate_name(&mut self, name: &str) {
        self.params.set_rate_name(name);
        self.update_phase_increment();
    }

    pub fn set_bpm(&mut self, bpm: f64) {
        self.params.set_bpm(bpm);
        self.update_phase_increment();
    }

    /// Position inside the current pump period, in `[0, 1)`.
    pub fn phase(&self) -> f64 {
        self.phase
    }

    pub fn phase_increment(&self) -> f64 {
        self.phase_increment
    }

    /// Envelope gain that was applied to the most recent sample.
    pub fn envelope(&self) -> f32 {
        self.envelope.current()
    }

    fn update_phase_increment(&mut self) {
        self.phase_increment = phase_increment(self.params.bpm, self.params.rate, self.sample_rate);
    }
}

impl Default for PulseProcessor {
    fn default() -> Self {
        Self::new()
    }
}

impl Processor for PulseProcessor {
    fn prepare(&mut self, sample_rate: f32, _max_block_size: usize) {
        self.sample_rate = sample_rate as f64;
        self.phase = 0.0;
        // Start at full volume so enabling the effect never opens on a hard cut.
        self.envelope.reset(1.0, self.declick_secs, sample_rate);
        self.update_phase_increment();
        self.prepared = true;
    }

    fn reset(&mut self) {
        self.phase = 0.0;
        self.envelope
            .reset(1.0, self.declick_secs, self.sample_rate as f32);
    }

    fn process_block(&mut self, block: &mut AudioBlock<'_>) {
        let mix = self.params.mix;
        if !self.prepared || mix <= BYPASS_MIX {
            return;
        }

        let channels = block.len().min(MAX_CHANNELS);
        let num_samples = block
            .iter()
            .take(channels)
            .map(|channel| channel.len())
            .min()
            .unwrap_or(0);

        for i in 0..num_samples {
            self.envelope.set_target(pulse_envelope(self.phase));
            let gain = self.envelope.next_sample();

            for channel in block.iter_mut().take(channels) {
                let dry = channel[i];
                channel[i] = blend_dry_wet(dry, dry * gain, mix);
            }

            self.phase = advance_phase(self.phase, self.phase_increment);
        }
    }

    fn is_prepared(&self) -> bool {
        self.prepared
    }
}
