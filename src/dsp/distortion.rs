//! Distortion / Waveshaping
//!
//! Distortion adds harmonics by reshaping the waveform. The "drive" parameter
//! (0.0 - 1.0) controls how aggressively the signal is pushed into the
//! nonlinear region, and every algorithm scales its pre-gain from it.
//!
//! # How Waveshaping Works
//!
//! A waveshaper applies a transfer function to each sample:
//!   output = f(input * pre_gain(drive))
//!
//! When drive is 0.0 the pre-gain is 1.0 and small signals stay in the
//! linear region of f(). As drive increases, the signal hits the nonlinear
//! parts of f(), creating harmonic distortion.
//!
//! # The Five Algorithms
//!
//! Soft Clip:
//!   f(x) = tanh(x * (1 + 3d))
//!   - Smooth, tape-like saturation
//!   - Never exceeds ±1.0
//!
//! Hard Clip:
//!   f(x) = clamp(x * (1 + 5d), -t, t)   with t = 1 - 0.9d
//!   - Harsh, pedal-like clipping
//!   - The ceiling drops as drive rises
//!
//! Foldback:
//!   x * (1 + 3d) is folded back into [-t, t] with t = 1 / (1 + 3d)
//!   - Complex, metallic harmonics
//!   - Fold count decides whether the segment is shifted or mirrored
//!
//! Waveshaper:
//!   f(x) = sign(x') * (1 - exp(-|x'| * (3d + 1)))   with x' = x * (1 + 5d)
//!   - Exponential saturation, asymptotic to ±1.0
//!
//! Bitcrusher:
//!   f(x) = floor(x' * 2^b) / 2^b   with x' = x * (1 + 3d), b = round(16 - 14d)
//!   - Quantization noise, no dithering
//!   - 16 bits at drive 0.0, 2 bits at drive 1.0

/// Soft clipping using a tanh transfer function.
///
/// Produces warm saturation that gradually compresses peaks and is bounded
/// by ±1.0 for any finite input.
#[inline]
pub fn soft_clip(sample: f32, drive: f32) -> f32 {
    (sample * (1.0 + drive * 3.0)).tanh()
}

/// Hard clipping against a drive-dependent ceiling.
///
/// Higher drive both boosts the signal harder and lowers the threshold.
#[inline]
pub fn hard_clip(sample: f32, drive: f32) -> f32 {
    let threshold = 1.0 - drive * 0.9;
    let driven = sample * (1.0 + drive * 5.0);
    driven.clamp(-threshold, threshold)
}

/// Foldback distortion - the signal folds back when exceeding the threshold.
///
/// An even number of crossings shifts the signal back by whole thresholds,
/// an odd number mirrors it. The result never leaves [-t, t].
#[inline]
pub fn foldback(sample: f32, drive: f32) -> f32 {
    let threshold = 1.0 / (1.0 + drive * 3.0);
    let driven = sample * (1.0 + drive * 3.0);

    if driven.abs() <= threshold {
        return driven;
    }

    let sign = if driven > 0.0 { 1.0 } else { -1.0 };
    let fold_count = (driven.abs() / threshold).floor();

    if (fold_count as u64) % 2 == 0 {
        driven - threshold * fold_count * sign
    } else {
        threshold * (fold_count + 1.0) - driven * sign
    }
}

/// Exponential waveshaper, asymptotic to ±1.0.
#[inline]
pub fn waveshaper(sample: f32, drive: f32) -> f32 {
    let driven = sample * (1.0 + drive * 5.0);
    let sign = if driven > 0.0 { 1.0 } else { -1.0 };

    sign * (1.0 - (-driven.abs() * (drive * 3.0 + 1.0)).exp())
}

/// Bit depth used by the bitcrusher for a given drive: 16 bits clean, 2 bits at full drive.
#[inline]
pub fn crush_bits(drive: f32) -> u32 {
    (16.0 - drive * 14.0).round().clamp(2.0, 16.0) as u32
}

/// Quantize a sample onto a grid of `2^bits` steps per unit (floor, no dither).
///
/// Quantizing an already-quantized value at the same depth returns it unchanged.
#[inline]
pub fn quantize(sample: f32, bits: u32) -> f32 {
    let steps = (1u32 << bits) as f32;
    (sample * steps).floor() / steps
}

/// Bitcrusher - boosts the signal, then reduces its resolution.
#[inline]
pub fn bitcrusher(sample: f32, drive: f32) -> f32 {
    let driven = sample * (1.0 + drive * 3.0);
    quantize(driven, crush_bits(drive))
}

/// Apply soft clipping to an entire buffer in place.
pub fn soft_clip_buffer(buffer: &mut [f32], drive: f32) {
    for sample in buffer.iter_mut() {
        *sample = soft_clip(*sample, drive);
    }
}

/// Apply hard clipping to an entire buffer in place.
pub fn hard_clip_buffer(buffer: &mut [f32], drive: f32) {
    for sample in buffer.iter_mut() {
        *sample = hard_clip(*sample, drive);
    }
}

/// Apply foldback distortion to an entire buffer in place.
pub fn foldback_buffer(buffer: &mut [f32], drive: f32) {
    for sample in buffer.iter_mut() {
        *sample = foldback(*sample, drive);
    }
}

/// Apply the exponential waveshaper to an entire buffer in place.
pub fn waveshaper_buffer(buffer: &mut [f32], drive: f32) {
    for sample in buffer.iter_mut() {
        *sample = waveshaper(*sample, drive);
    }
}

/// Apply the bitcrusher to an entire buffer in place.
pub fn bitcrusher_buffer(buffer: &mut [f32], drive: f32) {
    let bits = crush_bits(drive);
    let gain = 1.0 + drive * 3.0;
    for sample in buffer.iter_mut() {
        *sample = quantize(*sample * gain, bits);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DRIVES: [f32; 5] = [0.0, 0.25, 0.5, 0.75, 1.0];

    fn sweep() -> impl Iterator<Item = f32> {
        (-400..=400).map(|i| i as f32 * 0.025)
    }

    #[test]
    fn test_soft_clip_zero_drive_is_tanh() {
        let output = soft_clip(0.5, 0.0);
        assert!((output - 0.5f32.tanh()).abs() < 1e-6);
    }

    #[test]
    fn test_soft_clip_bounded() {
        for drive in DRIVES {
            for x in sweep() {
                assert!(soft_clip(x, drive).abs() <= 1.0);
            }
        }
    }

    #[test]
    fn test_hard_clip_below_threshold() {
        // drive 0: unity gain, threshold 1.0
        let output = hard_clip(0.3, 0.0);
        assert!((output - 0.3).abs() < 1e-6);
    }

    #[test]
    fn test_hard_clip_full_drive_ceiling() {
        // drive 1: threshold 0.1, 0.5 * 6 = 3.0 clamps to 0.1
        let output = hard_clip(0.5, 1.0);
        assert!((output - 0.1).abs() < 1e-6);
        assert!((hard_clip(-0.5, 1.0) + 0.1).abs() < 1e-6);
    }

    #[test]
    fn test_hard_clip_bounded() {
        for drive in DRIVES {
            for x in sweep() {
                assert!(hard_clip(x, drive).abs() <= 1.0);
            }
        }
    }

    #[test]
    fn test_foldback_below_threshold() {
        let output = foldback(0.3, 0.0);
        assert!((output - 0.3).abs() < 1e-6);
    }

    #[test]
    fn test_foldback_odd_fold_mirrors() {
        // drive 0: threshold 1.0, 1.4 crosses once -> 1.0 * 2 - 1.4 = 0.6
        let output = foldback(1.4, 0.0);
        assert!((output - 0.6).abs() < 1e-6);
    }

    #[test]
    fn test_foldback_even_fold_shifts() {
        // 2.3 crosses twice -> 2.3 - 2.0 = 0.3
        let output = foldback(2.3, 0.0);
        assert!((output - 0.3).abs() < 1e-5);
        let output = foldback(-2.3, 0.0);
        assert!((output + 0.3).abs() < 1e-5);
    }

    #[test]
    fn test_foldback_stays_within_threshold() {
        for drive in DRIVES {
            let threshold = 1.0 / (1.0 + drive * 3.0);
            for x in sweep() {
                let y = foldback(x, drive);
                assert!(y.is_finite());
                assert!(y.abs() <= threshold + 1e-5, "x={x} drive={drive} y={y}");
            }
        }
    }

    #[test]
    fn test_waveshaper_asymptotic() {
        for drive in DRIVES {
            for x in sweep() {
                assert!(waveshaper(x, drive).abs() <= 1.0);
            }
        }
        assert!(waveshaper(10.0, 1.0) > 0.99);
        assert!(waveshaper(-10.0, 1.0) < -0.99);
        assert_eq!(waveshaper(0.0, 0.5).abs(), 0.0);
    }

    #[test]
    fn test_crush_bits_range() {
        assert_eq!(crush_bits(0.0), 16);
        assert_eq!(crush_bits(1.0), 2);
        assert_eq!(crush_bits(0.5), 9);
    }

    #[test]
    fn test_quantize_idempotent() {
        for bits in [2, 4, 8, 16] {
            for x in sweep() {
                let once = quantize(x, bits);
                assert_eq!(quantize(once, bits), once);
            }
        }
    }

    #[test]
    fn test_bitcrusher_clean_drive_idempotent() {
        for x in sweep() {
            let once = bitcrusher(x, 0.0);
            assert_eq!(bitcrusher(once, 0.0), once);
        }
    }

    #[test]
    fn test_bitcrusher_two_bits() {
        // drive 1: gain 4, 2 bits -> steps of 0.25
        let output = bitcrusher(0.1, 1.0);
        assert!((output - 0.25).abs() < 1e-6);
    }

    #[test]
    fn test_buffer_forms_match_sample_forms() {
        let input: Vec<f32> = sweep().collect();
        let drive = 0.6;

        let mut buffer = input.clone();
        bitcrusher_buffer(&mut buffer, drive);
        for (x, y) in input.iter().zip(&buffer) {
            assert_eq!(*y, bitcrusher(*x, drive));
        }

        let mut buffer = input.clone();
        foldback_buffer(&mut buffer, drive);
        for (x, y) in input.iter().zip(&buffer) {
            assert_eq!(*y, foldback(*x, drive));
        }
    }
}
