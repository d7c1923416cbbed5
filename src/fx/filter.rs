use crate::dsp::filter::{Biquad, BiquadCoefficients, FilterType};
use crate::fx::param::{clamp_param, ParamEnum};
use crate::fx::processor::{AudioBlock, Processor};
use crate::MAX_CHANNELS;

/*
Tone Filter
===========

A second-order IIR (biquad) per channel. All channels run the same
coefficients with their own history, so a stereo image passes through
without smearing:

    coefficients  (shared, rebuilt on every parameter change)
         │
    L ──►[Biquad state L]──► L
    R ──►[Biquad state R]──► R

Parameters
----------

Frequency (20 Hz - 20 kHz):  cutoff or centre frequency
Resonance (0.1 - 10):        Q of the design; 0.707 is flat
Type:                        lowpass | bandpass | highpass

Response plot
-------------

`magnitude_response` fills a log-spaced 20 Hz - 20 kHz curve for display.
It is a cheap closed-form sketch of the response shape, not the exact
transfer function; `coefficients().magnitude_at(..)` gives the exact value.
*/

pub const FREQUENCY_RANGE: (f32, f32) = (20.0, 20_000.0);
pub const RESONANCE_RANGE: (f32, f32) = (0.1, 10.0);

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FilterParams {
    frequency: f32,
    resonance: f32,
    filter_type: FilterType,
}

impl Default for FilterParams {
    fn default() -> Self {
        Self {
            frequency: 1_000.0,
            resonance: 0.7,
            filter_type: FilterType::LowPass,
        }
    }
}

impl FilterParams {
    pub fn set_frequency(&mut self, hz: f32) {
        self.frequency = clamp_param(hz, FREQUENCY_RANGE.0, FREQUENCY_RANGE.1);
    }

    pub fn set_resonance(&mut self, q: f32) {
        self.resonance = clamp_param(q, RESONANCE_RANGE.0, RESONANCE_RANGE.1);
    }

    pub fn set_filter_type(&mut self, filter_type: FilterType) {
        self.filter_type = filter_type;
    }

    /// Unknown names select `LowPass`.
    pub fn set_filter_type_name(&mut self, name: &str) {
        self.filter_type = FilterType::from_token(name);
    }

    pub fn frequency(&self) -> f32 {
        self.frequency
    }

    pub fn resonance(&self) -> f32 {
        self.resonance
    }

    pub fn filter_type(&self) -> FilterType {
        self.filter_type
    }

    pub fn filter_type_name(&self) -> &'static str {
        self.filter_type.token()
    }
}

pub struct FilterProcessor {
    params: FilterParams,
    coefficients: BiquadCoefficients,
    states: [Biquad; MAX_CHANNELS],
    sample_rate: f32,
    prepared: bool,
}

impl FilterProcessor {
    pub fn new() -> Self {
        Self::with_params(FilterParams::default())
    }

    pub fn with_params(params: FilterParams) -> Self {
        let mut filter = Self {
            params,
            coefficients: BiquadCoefficients::IDENTITY,
            states: [Biquad::new(); MAX_CHANNELS],
            sample_rate: 44_100.0,
            prepared: false,
        };
        filter.update_coefficients();
        filter
    }

    pub fn params(&self) -> &FilterParams {
        &self.params
    }

    pub fn set_params(&mut self, params: FilterParams) {
        if params != self.params {
            self.params = params;
            self.update_coefficients();
        }
    }

    pub fn set_frequency(&mut self, hz: f32) {
        self.params.set_frequency(hz);
        self.update_coefficients();
    }

    pub fn set_resonance(&mut self, q: f32) {
        self.params.set_resonance(q);
        self.update_coefficients();
    }

    pub fn set_filter_type(&mut self, filter_type: FilterType) {
        self.params.set_filter_type(filter_type);
        self.update_coefficients();
    }

    pub fn set_filter_type_name(&mut self, name: &str) {
        self.params.set_filter_type_name(name);
        self.update_coefficients();
    }

    /// Coefficients currently applied to every channel.
    pub fn coefficients(&self) -> &BiquadCoefficients {
        &self.coefficients
    }

    fn update_coefficients(&mut self) {
        self.coefficients = BiquadCoefficients::design(
            self.params.filter_type,
            self.sample_rate,
            self.params.frequency,
            self.params.resonance,
        );
    }

    /// Fill `frequencies` with log-spaced points from 20 Hz to 20 kHz and
    /// `magnitudes` with the approximate linear gain at each one.
    ///
    /// Uses the shorter of the two slices. Leaves both untouched until prepared.
    pub fn magnitude_response(&self, frequencies: &mut [f64], magnitudes: &mut [f64]) {
        if !self.prepared {
            return;
        }

        let points = frequencies.len().min(magnitudes.len());
        let sample_rate = self.sample_rate as f64;
        let cutoff = 2.0 * std::f64::consts::PI * self.params.frequency as f64 / sample_rate;
        let q = self.params.resonance as f64;

        for (i, (freq_out, mag_out)) in frequencies
            .iter_mut()
            .zip(magnitudes.iter_mut())
            .take(points)
            .enumerate()
        {
            let position = if points > 1 {
                i as f64 / (points - 1) as f64
            } else {
                0.0
            };
            let hz = 20.0 * 1000f64.powf(position);
            let omega = 2.0 * std::f64::consts::PI * hz / sample_rate;

            *freq_out = hz;
            *mag_out = match self.params.filter_type {
                FilterType::LowPass => 1.0 / (1.0 + (omega / cutoff).powf(2.0 * q)).sqrt(),
                FilterType::HighPass => 1.0 / (1.0 + (cutoff / omega).powf(2.0 * q)).sqrt(),
                FilterType::BandPass => {
                    let bandwidth = 1.0 / q;
                    let detune = (omega / cutoff - cutoff / omega) / bandwidth;
                    1.0 / (1.0 + detune * detune)
                }
            };
        }
    }
}

impl Default for FilterProcessor {
    fn default() -> Self {
        Self::new()
    }
}

impl Processor for FilterProcessor {
    fn prepare(&mut self, sample_rate: f32, _max_block_size: usize) {
        self.sample_rate = sample_rate;
        for state in &mut self.states {
            state.reset();
        }
        self.update_coefficients();
        self.prepared = true;
    }

    fn reset(&mut self) {
        for state in &mut self.states {
            state.reset();
        }
    }

    fn process_block(&mut self, block: &mut AudioBlock<'_>) {
        if !self.prepared {
            return;
        }

        for (channel, state) in block.iter_mut().zip(self.states.iter_mut()) {
            state.render(channel, &self.coefficients);
        }
    }

    fn is_prepared(&self) -> bool {
        self.prepared
    }
}
