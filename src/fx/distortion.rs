use crate::dsp::amplify::{apply_gain, db_to_gain};
use crate::dsp::distortion::{
    bitcrusher_buffer, foldback_buffer, hard_clip_buffer, soft_clip_buffer, waveshaper_buffer,
};
use crate::dsp::mix::apply_dry_wet;
use crate::fx::param::{clamp_param, ParamEnum};
use crate::fx::processor::{AudioBlock, Processor};
use crate::MAX_CHANNELS;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/*
Distortion Processor
====================

Signal flow, fixed order for every sample:

    input ──► × input trim ──► waveshaper ──► wet/dry mix ──► × output trim ──► out
      │                                          ▲
      └──────────────── dry copy ────────────────┘

The dry copy is taken before the input trim, so at mix = 0.0 the effect
only applies the output trim.

Algorithms
----------

SoftClip:    tanh saturation, warm and bounded
HardClip:    clamp against a ceiling that drops with drive
Foldback:    folds peaks back into range, metallic
Waveshaper:  exponential curve, asymptotic to ±1
Bitcrusher:  2-16 bit quantization, gritty and digital

See `dsp/distortion.rs` for the transfer functions.

Parameters
----------

Drive (0.0 - 1.0):     how hard the signal hits the curve
Mix (0.0 - 1.0):       0.0 = dry, 1.0 = wet
Input gain (±12 dB):   trim before the curve
Output gain (±12 dB):  trim after the mix
*/

/// Type of distortion/waveshaping
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum DistortionAlgorithm {
    /// tanh saturation - smooth, tape-like
    #[default]
    SoftClip,
    /// Clipping against a drive-dependent ceiling - pedal-like
    HardClip,
    /// Signal folding for dense harmonics
    Foldback,
    /// Exponential saturation curve
    Waveshaper,
    /// Bit-depth reduction
    Bitcrusher,
}

impl ParamEnum for DistortionAlgorithm {
    const TABLE: &'static [(Self, &'static str)] = &[
        (DistortionAlgorithm::SoftClip, "soft_clip"),
        (DistortionAlgorithm::HardClip, "hard_clip"),
        (DistortionAlgorithm::Foldback, "foldback"),
        (DistortionAlgorithm::Waveshaper, "waveshaper"),
        (DistortionAlgorithm::Bitcrusher, "bitcrusher"),
    ];
}

impl DistortionAlgorithm {
    /// Whole-buffer transfer function, resolved once per block instead of per sample.
    pub fn shaper(self) -> fn(&mut [f32], f32) {
        match self {
            DistortionAlgorithm::SoftClip => soft_clip_buffer,
            DistortionAlgorithm::HardClip => hard_clip_buffer,
            DistortionAlgorithm::Foldback => foldback_buffer,
            DistortionAlgorithm::Waveshaper => waveshaper_buffer,
            DistortionAlgorithm::Bitcrusher => bitcrusher_buffer,
        }
    }
}

pub const GAIN_RANGE_DB: (f32, f32) = (-12.0, 12.0);

/// Distortion parameter set. Trims keep their dB value and a linear multiplier
/// that every setter recomputes on the spot.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DistortionParams {
    drive: f32,
    mix: f32,
    input_gain_db: f32,
    output_gain_db: f32,
    input_gain: f32,
    output_gain: f32,
    algorithm: DistortionAlgorithm,
}

impl Default for DistortionParams {
    fn default() -> Self {
        Self {
            drive: 0.5,
            mix: 0.5,
            input_gain_db: 0.0,
            output_gain_db: 0.0,
            input_gain: 1.0,
            output_gain: 1.0,
            algorithm: DistortionAlgorithm::SoftClip,
        }
    }
}

impl DistortionParams {
    pub fn set_drive(&mut self, drive: f32) {
        self.drive = clamp_param(drive, 0.0, 1.0);
    }

    pub fn set_mix(&mut self, mix: f32) {
        self.mix = clamp_param(mix, 0.0, 1.0);
    }

    pub fn set_input_gain(&mut self, gain_db: f32) {
        self.input_gain_db = clamp_param(gain_db, GAIN_RANGE_DB.0, GAIN_RANGE_DB.1);
        self.input_gain = db_to_gain(self.input_gain_db);
    }

    pub fn set_output_gain(&mut self, gain_db: f32) {
        self.output_gain_db = clamp_param(gain_db, GAIN_RANGE_DB.0, GAIN_RANGE_DB.1);
        self.output_gain = db_to_gain(self.output_gain_db);
    }

    pub fn set_algorithm(&mut self, algorithm: DistortionAlgorithm) {
        self.algorithm = algorithm;
    }

    /// Set the algorithm from its token; unknown names select `SoftClip`.
    pub fn set_algorithm_name(&mut self, name: &str) {
        self.algorithm = DistortionAlgorithm::from_token(name);
    }

    pub fn drive(&self) -> f32 {
        self.drive
    }

    pub fn mix(&self) -> f32 {
        self.mix
    }

    /// Input trim in dB.
    pub fn input_gain(&self) -> f32 {
        self.input_gain_db
    }

    /// Output trim in dB.
    pub fn output_gain(&self) -> f32 {
        self.output_gain_db
    }

    pub fn input_gain_linear(&self) -> f32 {
        self.input_gain
    }

    pub fn output_gain_linear(&self) -> f32 {
        self.output_gain
    }

    pub fn algorithm(&self) -> DistortionAlgorithm {
        self.algorithm
    }

    pub fn algorithm_name(&self) -> &'static str {
        self.algorithm.token()
    }
}

/// Waveshaping distortion effect with input/output trim and wet/dry mix.
pub struct DistortionProcessor {
    params: DistortionParams,
    dry_buffer: Vec<f32>, // Sized in prepare, reused every block
    prepared: bool,
}

impl DistortionProcessor {
    pub fn new() -> Self {
        Self::with_params(DistortionParams::default())
    }

    pub fn with_params(params: DistortionParams) -> Self {
        Self {
            params,
            dry_buffer: Vec::new(),
            prepared: false,
        }
    }

    pub fn params(&self) -> &DistortionParams {
        &self.params
    }

    pub fn set_params(&mut self, params: DistortionParams) {
        self.params = params;
    }

    pub fn set_drive(&mut self, drive: f32) {
        self.params.set_drive(drive);
    }

    pub fn set_mix(&mut self, mix: f32) {
        self.params.set_mix(mix);
    }

    pub fn set_input_gain(&mut self, gain_db: f32) {
        self.params.set_input_gain(gain_db);
    }

    pub fn set_output_gain(&mut self, gain_db: f32) {
        self.params.set_output_gain(gain_db);
    }

    pub fn set_algorithm(&mut self, algorithm: DistortionAlgorithm) {
        self.params.set_algorithm(algorithm);
    }

    pub fn set_algorithm_name(&mut self, name: &str) {
        self.params.set_algorithm_name(name);
    }
}

impl Default for DistortionProcessor {
    fn default() -> Self {
        Self::new()
    }
}

impl Processor for DistortionProcessor {
    fn prepare(&mut self, _sample_rate: f32, max_block_size: usize) {
        // The curves are rate independent; only the dry scratch depends on the block size.
        self.dry_buffer.clear();
        self.dry_buffer.resize(max_block_size.max(1), 0.0);
        self.prepared = true;
    }

    fn reset(&mut self) {
        self.dry_buffer.fill(0.0);
    }

    fn process_block(&mut self, block: &mut AudioBlock<'_>) {
        if !self.prepared {
            return;
        }

        let params = self.params;
        let shape = params.algorithm.shaper();
        let scratch_len = self.dry_buffer.len();

        for channel in block.iter_mut().take(MAX_CHANNELS) {
            for chunk in channel.chunks_mut(scratch_len) {
                let dry = &mut self.dry_buffer[..chunk.len()];
                dry.copy_from_slice(chunk);

                if params.input_gain != 1.0 {
                    apply_gain(chunk, params.input_gain);
                }
                shape(chunk, params.drive);
                apply_dry_wet(dry, chunk, params.mix);
                if params.output_gain != 1.0 {
                    apply_gain(chunk, params.output_gain);
                }
            }
        }
    }

    fn is_prepared(&self) -> bool {
        self.prepared
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn prepared(params: DistortionParams) -> DistortionProcessor {
        let mut node = DistortionProcessor::with_params(params);
        node.prepare(48_000.0, 64);
        node
    }

    fn ramp(len: usize) -> Vec<f32> {
        (0..len).map(|i| (i as f32 / len as f32) * 2.0 - 1.0).collect()
    }

    #[test]
    fn test_setters_clamp() {
        let mut params = DistortionParams::default();

        params.set_drive(5.0);
        assert_eq!(params.drive(), 1.0);
        params.set_drive(-1.0);
        assert_eq!(params.drive(), 0.0);

        params.set_mix(1.5);
        assert_eq!(params.mix(), 1.0);

        params.set_input_gain(40.0);
        assert_eq!(params.input_gain(), 12.0);
        params.set_output_gain(-40.0);
        assert_eq!(params.output_gain(), -12.0);
    }

    #[test]
    fn test_gain_cache_tracks_db() {
        let mut params = DistortionParams::default();

        params.set_input_gain(0.0);
        assert_relative_eq!(params.input_gain_linear(), 1.0);

        params.set_input_gain(6.0206);
        assert_relative_eq!(params.input_gain_linear(), 2.0, epsilon = 1e-4);

        for db in [-12.0f32, -3.5, 0.25, 9.0, 12.0] {
            params.set_output_gain(db);
            assert_relative_eq!(params.output_gain_linear(), 10f32.powf(db / 20.0), epsilon = 1e-6);
        }
    }

    #[test]
    fn test_algorithm_names() {
        let mut params = DistortionParams::default();

        params.set_algorithm_name("bitcrusher");
        assert_eq!(params.algorithm(), DistortionAlgorithm::Bitcrusher);
        assert_eq!(params.algorithm_name(), "bitcrusher");

        params.set_algorithm_name("fuzz");
        assert_eq!(params.algorithm(), DistortionAlgorithm::SoftClip);

        for (algorithm, token) in DistortionAlgorithm::TABLE {
            assert_eq!(DistortionAlgorithm::from_token(token), *algorithm);
        }
    }

    #[test]
    fn test_soft_distortion_modifies_signal() {
        let mut params = DistortionParams::default();
        params.set_drive(0.8);
        params.set_mix(1.0);
        let mut node = prepared(params);

        let original = vec![0.5, -0.5, 0.8, -0.8];
        let mut channel = original.clone();
        node.process_block(&mut [channel.as_mut_slice()]);

        assert!(channel.iter().zip(original.iter()).any(|(a, b)| (a - b).abs() > 0.01));
    }

    #[test]
    fn test_dry_mix_preserves_signal() {
        let mut params = DistortionParams::default();
        params.set_mix(0.0);
        params.set_algorithm(DistortionAlgorithm::Foldback);
        let mut node = prepared(params);

        let original = ramp(48);
        let mut left = original.clone();
        let mut right = original.clone();
        node.process_block(&mut [left.as_mut_slice(), right.as_mut_slice()]);

        for ((l, r), o) in left.iter().zip(&right).zip(&original) {
            assert!((l - o).abs() < 1e-6);
            assert!((r - o).abs() < 1e-6);
        }
    }

    #[test]
    fn test_full_wet_matches_curve() {
        let mut params = DistortionParams::default();
        params.set_mix(1.0);
        params.set_drive(0.3);
        params.set_algorithm(DistortionAlgorithm::Waveshaper);
        let mut node = prepared(params);

        let original = ramp(32);
        let mut channel = original.clone();
        node.process_block(&mut [channel.as_mut_slice()]);

        for (y, x) in channel.iter().zip(&original) {
            assert_eq!(*y, crate::dsp::distortion::waveshaper(*x, 0.3));
        }
    }

    #[test]
    fn test_trims_surround_the_curve() {
        let mut params = DistortionParams::default();
        params.set_mix(1.0);
        params.set_drive(1.0);
        params.set_algorithm(DistortionAlgorithm::HardClip);
        params.set_output_gain(6.0206);
        let mut node = prepared(params);

        let mut channel = vec![0.9; 8];
        node.process_block(&mut [channel.as_mut_slice()]);

        // Ceiling 0.1, doubled by the output trim
        for sample in &channel {
            assert_relative_eq!(*sample, 0.2, epsilon = 1e-4);
        }
    }

    #[test]
    fn test_blocks_longer_than_scratch() {
        let mut params = DistortionParams::default();
        params.set_mix(0.5);
        let mut node = prepared(params);

        let original = ramp(200); // scratch holds 64
        let mut channel = original.clone();
        node.process_block(&mut [channel.as_mut_slice()]);

        for (y, x) in channel.iter().zip(&original) {
            let wet = crate::dsp::distortion::soft_clip(*x, 0.5);
            assert_relative_eq!(*y, x * 0.5 + wet * 0.5, epsilon = 1e-6);
        }
    }

    #[test]
    fn test_unprepared_is_passthrough() {
        let mut node = DistortionProcessor::new();
        let original = ramp(16);
        let mut channel = original.clone();

        node.process_block(&mut [channel.as_mut_slice()]);

        assert!(!node.is_prepared());
        assert_eq!(channel, original);
    }
}
