//! Binary snapshot of every processor's parameters.
//!
//! Layout (little-endian, 4 bytes per field):
//!
//! | offset | field              | type |
//! | ------ | ------------------ | ---- |
//! | 0      | distortion drive   | f32  |
//! | 4      | distortion mix     | f32  |
//! | 8      | input gain (dB)    | f32  |
//! | 12     | output gain (dB)   | f32  |
//! | 16     | algorithm          | i32  |
//! | 20     | delay time (s)     | f32  |
//! | 24     | delay feedback     | f32  |
//! | 28     | delay mix          | f32  |
//! | 32     | ping-pong (0/1)    | i32  |
//! | 36     | filter frequency   | f32  |
//! | 40     | filter resonance   | f32  |
//! | 44     | filter type        | i32  |
//! | 48     | pulse mix          | f32  |
//! | 52     | pulse rate         | i32  |
//!
//! Older hosts saved shorter prefixes of this layout. Decoding picks the
//! longest known prefix that fits and leaves everything after it at defaults.
//! The delay's feedback cutoff and the host tempo are not stored.

use crate::dsp::{FilterType, NoteRate};
use crate::fx::distortion::DistortionAlgorithm;
use crate::fx::param::ParamEnum;
use crate::fx::{DelayParams, DistortionParams, FilterParams, PulseParams};

/// Size of the current layout.
pub const STATE_SIZE: usize = 56;
/// Distortion, delay and filter, without pulse.
pub const LEGACY_NO_PULSE_SIZE: usize = 48;
/// Distortion only.
pub const LEGACY_DISTORTION_SIZE: usize = 20;
/// Distortion without the algorithm field.
pub const LEGACY_NO_ALGORITHM_SIZE: usize = 16;
/// Drive and mix only.
pub const LEGACY_DRIVE_MIX_SIZE: usize = 8;

/// Full parameter set of the chain.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ChainState {
    pub distortion: DistortionParams,
    pub delay: DelayParams,
    pub filter: FilterParams,
    pub pulse: PulseParams,
}

impl ChainState {
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(STATE_SIZE);
        put_f32(&mut out, self.distortion.drive());
        put_f32(&mut out, self.distortion.mix());
        put_f32(&mut out, self.distortion.input_gain());
        put_f32(&mut out, self.distortion.output_gain());
        out.extend_from_slice(&self.distortion.algorithm().index().to_le_bytes());

        put_f32(&mut out, self.delay.time());
        put_f32(&mut out, self.delay.feedback());
        put_f32(&mut out, self.delay.mix());
        out.extend_from_slice(&i32::from(self.delay.ping_pong()).to_le_bytes());

        put_f32(&mut out, self.filter.frequency());
        put_f32(&mut out, self.filter.resonance());
        out.extend_from_slice(&self.filter.filter_type().index().to_le_bytes());

        put_f32(&mut out, self.pulse.mix());
        out.extend_from_slice(&self.pulse.rate().index().to_le_bytes());

        out
    }

    /// Decode a blob of any length. Never fails: unknown enum indices and
    /// missing fields fall back to defaults, trailing bytes are ignored.
    pub fn from_bytes(bytes: &[u8]) -> Self {
        let mut state = Self::default();
        let mut reader = BlobReader::new(bytes);
        let len = bytes.len();

        if len < LEGACY_DRIVE_MIX_SIZE {
            return state;
        }

        state.distortion.set_drive(reader.f32());
        state.distortion.set_mix(reader.f32());
        if len < LEGACY_NO_ALGORITHM_SIZE {
            return state;
        }

        state.distortion.set_input_gain(reader.f32());
        state.distortion.set_output_gain(reader.f32());
        if len < LEGACY_DISTORTION_SIZE {
            return state;
        }

        state
            .distortion
            .set_algorithm(DistortionAlgorithm::from_index(reader.i32()));
        if len < LEGACY_NO_PULSE_SIZE {
            return state;
        }

        state.delay.set_time(reader.f32());
        state.delay.set_feedback(reader.f32());
        state.delay.set_mix(reader.f32());
        state.delay.set_ping_pong(reader.i32() > 0);

        state.filter.set_frequency(reader.f32());
        state.filter.set_resonance(reader.f32());
        state
            .filter
            .set_filter_type(FilterType::from_index(reader.i32()));
        if len < STATE_SIZE {
            return state;
        }

        state.pulse.set_mix(reader.f32());
        state.pulse.set_rate(NoteRate::from_index(reader.i32()));

        state
    }
}

fn put_f32(out: &mut Vec<u8>, value: f32) {
    out.extend_from_slice(&value.to_le_bytes());
}

struct BlobReader<'a> {
    bytes: &'a [u8],
    pos: usize,
}

impl<'a> BlobReader<'a> {
    fn new(bytes: &'a [u8]) -> Self {
        Self { bytes, pos: 0 }
    }

    fn word(&mut self) -> [u8; 4] {
        let mut word = [0u8; 4];
        if let Some(src) = self.bytes.get(self.pos..self.pos + 4) {
            word.copy_from_slice(src);
        }
        self.pos += 4;
        word
    }

    fn f32(&mut self) -> f32 {
        f32::from_le_bytes(self.word())
    }

    fn i32(&mut self) -> i32 {
        i32::from_le_bytes(self.word())
    }
}
