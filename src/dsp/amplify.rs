//! Gain staging and level measurement.

/*
Decibels
========

Trim controls are expressed in decibels because hearing is logarithmic:

    gain = 10^(dB / 20)

    -12 dB  →  ×0.251
     -6 dB  →  ×0.501
      0 dB  →  ×1.0   (unity)
     +6 dB  →  ×1.995
    +12 dB  →  ×3.981

RMS (root mean square) is the level a meter shows: the square root of the
mean of the squared samples over a block. A full-scale sine reads 0.707.
*/

/// Convert a level in decibels to a linear multiplier.
#[inline]
pub fn db_to_gain(db: f32) -> f32 {
    10.0f32.powf(db / 20.0)
}

/// Multiply a signal by a constant gain factor (in-place).
#[inline]
pub fn apply_gain(signal: &mut [f32], gain: f32) {
    for sample in signal.iter_mut() {
        *sample *= gain;
    }
}

/// Root-mean-square level of a block. Empty blocks read as silence.
#[inline]
pub fn rms(signal: &[f32]) -> f32 {
    if signal.is_empty() {
        return 0.0;
    }

    let sum: f32 = signal.iter().map(|s| s * s).sum();
    (sum / signal.len() as f32).sqrt()
}
