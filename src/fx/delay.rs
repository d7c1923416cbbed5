use crate::dsp::delay::DelayLine;
use crate::dsp::filter::OnePole;
use crate::dsp::mix::blend_dry_wet;
use crate::fx::param::clamp_param;
use crate::fx::processor::{AudioBlock, Processor};
use crate::MAX_CHANNELS;

/*
Feedback Delay
==============

One circular line per channel, one shared write cursor:

    in ──┬──────────────────────────────────────► (1 - mix) ──┐
         │                                                    ├──► out
         └──► [+] ──► line ──► delayed ──────────► mix ───────┘
               ▲                  │
               │                  ▼
               └── × feedback ◄── one-pole LP

Ping-pong swaps the feedback sources: the left line is fed from the
filtered right output and vice versa, so each repeat bounces across the
stereo field.

    L line ◄── LP(R delayed) × feedback
    R line ◄── LP(L delayed) × feedback

The delay in samples is read from the live parameter every sample. Large
jumps in delay time can click; there is no smoothing on the read position.
*/

/// Longest supported delay in seconds.
pub const MAX_DELAY_SECS: f32 = 2.0;
pub const DELAY_TIME_RANGE: (f32, f32) = (0.01, MAX_DELAY_SECS);
pub const FEEDBACK_FILTER_RANGE: (f32, f32) = (20.0, 20_000.0);

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DelayParams {
    time: f32,
    feedback: f32,
    mix: f32,
    filter_freq: f32,
    ping_pong: bool,
}

impl Default for DelayParams {
    fn default() -> Self {
        Self {
            time: 0.5,
            feedback: 0.4,
            mix: 0.3,
            filter_freq: 5_000.0,
            ping_pong: false,
        }
    }
}

impl DelayParams {
    /// Delay time in seconds.
    pub fn set_time(&mut self, seconds: f32) {
        self.time = clamp_param(seconds, DELAY_TIME_RANGE.0, DELAY_TIME_RANGE.1);
    }

    pub fn set_feedback(&mut self, feedback: f32) {
        self.feedback = clamp_param(feedback, 0.0, 1.0);
    }

    pub fn set_mix(&mut self, mix: f32) {
        self.mix = clamp_param(mix, 0.0, 1.0);
    }

    /// Cutoff of the low-pass in the feedback path, in Hz.
    pub fn set_filter_freq(&mut self, hz: f32) {
        self.filter_freq = clamp_param(hz, FEEDBACK_FILTER_RANGE.0, FEEDBACK_FILTER_RANGE.1);
    }

    pub fn set_ping_pong(&mut self, enabled: bool) {
        self.ping_pong = enabled;
    }

    pub fn time(&self) -> f32 {
        self.time
    }

    pub fn feedback(&self) -> f32 {
        self.feedback
    }

    pub fn mix(&self) -> f32 {
        self.mix
    }

    pub fn filter_freq(&self) -> f32 {
        self.filter_freq
    }

    pub fn ping_pong(&self) -> bool {
        self.ping_pong
    }
}

pub struct DelayProcessor {
    params: DelayParams,
    lines: [DelayLine; MAX_CHANNELS],
    feedback_filters: [OnePole; MAX_CHANNELS],
    sample_rate: f32,
    prepared: bool,
}

impl DelayProcessor {
    pub fn new() -> Self {
        Self::with_params(DelayParams::default())
    }

    pub fn with_params(params: DelayParams) -> Self {
        Self {
            params,
            lines: std::array::from_fn(|_| DelayLine::new()),
            feedback_filters: [OnePole::default(); MAX_CHANNELS],
            sample_rate: 44_100.0,
            prepared: false,
        }
    }

    pub fn params(&self) -> &DelayParams {
        &self.params
    }

    pub fn set_params(&mut self, params: DelayParams) {
        let cutoff_changed = params.filter_freq != self.params.filter_freq;
        self.params = params;
        if cutoff_changed {
            self.update_feedback_filters();
        }
    }

    pub fn set_time(&mut self, seconds: f32) {
        self.params.set_time(seconds);
    }

    pub fn set_feedback(&mut self, feedback: f32) {
        self.params.set_feedback(feedback);
    }

    pub fn set_mix(&mut self, mix: f32) {
        self.params.set_mix(mix);
    }

    pub fn set_filter_freq(&mut self, hz: f32) {
        self.params.set_filter_freq(hz);
        self.update_feedback_filters();
    }

    pub fn set_ping_pong(&mut self, enabled: bool) {
        self.params.set_ping_pong(enabled);
    }

    /// Length of each channel's circular buffer (0 until prepared).
    pub fn buffer_len(&self) -> usize {
        self.lines[0].len()
    }

    fn update_feedback_filters(&mut self) {
        for filter in &mut self.feedback_filters {
            filter.set_cutoff(self.sample_rate, self.params.filter_freq);
        }
    }
}

impl Default for DelayProcessor {
    fn default() -> Self {
        Self::new()
    }
}

impl Processor for DelayProcessor {
    fn prepare(&mut self, sample_rate: f32, _max_block_size: usize) {
        self.sample_rate = sample_rate;

        // One extra slot so the full maximum delay can still be interpolated.
        let len = (sample_rate as f64 * MAX_DELAY_SECS as f64).ceil() as usize + 1;
        for line in &mut self.lines {
            line.allocate(len);
        }
        for filter in &mut self.feedback_filters {
            filter.reset();
        }
        self.update_feedback_filters();
        self.prepared = true;

        tracing::debug!(sample_rate, buffer_len = len, "delay prepared");
    }

    fn reset(&mut self) {
        for line in &mut self.lines {
            line.reset();
        }
        for filter in &mut self.feedback_filters {
            filter.reset();
        }
    }

    fn process_block(&mut self, block: &mut AudioBlock<'_>) {
        if !self.prepared || self.lines[0].is_empty() {
            return;
        }

        let channels = block.len().min(MAX_CHANNELS);
        let num_samples = block
            .iter()
            .take(channels)
            .map(|channel| channel.len())
            .min()
            .unwrap_or(0);

        let DelayParams {
            feedback,
            mix,
            ping_pong,
            ..
        } = self.params;
        let cross_feed = ping_pong && channels == MAX_CHANNELS;

        for i in 0..num_samples {
            let delay_samples = self.params.time as f64 * self.sample_rate as f64;

            let mut delayed = [0.0f32; MAX_CHANNELS];
            let mut filtered = [0.0f32; MAX_CHANNELS];
            for c in 0..channels {
                delayed[c] = self.lines[c].read_interpolated(delay_samples);
                filtered[c] = self.feedback_filters[c].next_sample(delayed[c]);
            }

            for c in 0..channels {
                let source = if cross_feed { 1 - c } else { c };
                let input = block[c][i];
                self.lines[c].write(input + filtered[source] * feedback);
                block[c][i] = blend_dry_wet(input, delayed[c], mix);
            }

            // Shared cursor: every line advances, even on mono blocks.
            for line in &mut self.lines {
                line.advance();
            }
        }
    }

    fn is_prepared(&self) -> bool {
        self.prepared
    }
}
