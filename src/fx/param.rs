//! Parameter plumbing shared by the processors.
//!
//! Every setter clamps into its documented range, so getters never have to.
//! Closed enums map to fixed lowercase tokens (presets) and to integer indices
//! (binary state) through one table per enum; unknown tokens and indices fall
//! back to the enum's default instead of failing.

use crate::dsp::{FilterType, NoteRate};

/// Clamp a setter input into `[min, max]`. NaN lands on `min`.
#[inline]
pub fn clamp_param(value: f32, min: f32, max: f32) -> f32 {
    if value.is_nan() {
        min
    } else {
        value.clamp(min, max)
    }
}

/// `f64` flavour of [`clamp_param`].
#[inline]
pub fn clamp_param_f64(value: f64, min: f64, max: f64) -> f64 {
    if value.is_nan() {
        min
    } else {
        value.clamp(min, max)
    }
}

/// Closed parameter enum with canonical tokens.
///
/// `TABLE` order is the integer encoding used by the binary state blob.
pub trait ParamEnum: Copy + PartialEq + Default + 'static {
    const TABLE: &'static [(Self, &'static str)];

    /// Canonical lowercase token, e.g. `"soft_clip"`.
    fn token(self) -> &'static str {
        Self::TABLE
            .iter()
            .find(|(variant, _)| *variant == self)
            .map(|(_, token)| *token)
            .unwrap_or(Self::TABLE[0].1)
    }

    /// Parse a canonical token; anything else yields the default variant.
    fn from_token(token: &str) -> Self {
        Self::TABLE
            .iter()
            .find(|(_, name)| *name == token)
            .map(|(variant, _)| *variant)
            .unwrap_or_default()
    }

    fn index(self) -> i32 {
        Self::TABLE
            .iter()
            .position(|(variant, _)| *variant == self)
            .unwrap_or(0) as i32
    }

    /// Decode an integer index; out-of-range values yield the default variant.
    fn from_index(index: i32) -> Self {
        usize::try_from(index)
            .ok()
            .and_then(|i| Self::TABLE.get(i))
            .map(|(variant, _)| *variant)
            .unwrap_or_default()
    }
}

impl ParamEnum for FilterType {
    const TABLE: &'static [(Self, &'static str)] = &[
        (FilterType::LowPass, "lowpass"),
        (FilterType::BandPass, "bandpass"),
        (FilterType::HighPass, "highpass"),
    ];
}

impl ParamEnum for NoteRate {
    const TABLE: &'static [(Self, &'static str)] = &[
        (NoteRate::Half, "1/2"),
        (NoteRate::Quarter, "1/4"),
        (NoteRate::Eighth, "1/8"),
    ];
}
