use std::f64::consts::PI;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/*
| type       | passes          | rejects                 |
| ---------- | --------------- | ----------------------- |
| low-pass   | below cutoff    | above cutoff, 12 dB/oct |
| band-pass  | around cutoff   | both sides, 6 dB/oct    |
| high-pass  | above cutoff    | below cutoff, 12 dB/oct |

Q (resonance) sets the height of the peak at the cutoff. Q = 0.707 is the
flat Butterworth response; larger values ring.
*/

#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FilterType {
    #[default]
    LowPass,
    BandPass,
    HighPass,
}

/// Q of a maximally flat second-order response.
pub const BUTTERWORTH_Q: f32 = std::f32::consts::FRAC_1_SQRT_2;

/// Normalized second-order IIR coefficients (a0 = 1).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BiquadCoefficients {
    pub b0: f32,
    pub b1: f32,
    pub b2: f32,
    pub a1: f32,
    pub a2: f32,
}

impl BiquadCoefficients {
    /// Pass-through coefficients.
    pub const IDENTITY: Self = Self {
        b0: 1.0,
        b1: 0.0,
        b2: 0.0,
        a1: 0.0,
        a2: 0.0,
    };

    /// Bilinear-transform design of the given response.
    ///
    /// The design frequency is limited to just below Nyquist so high cutoffs at
    /// low sample rates stay stable.
    pub fn design(filter_type: FilterType, sample_rate: f32, frequency: f32, q: f32) -> Self {
        let sample_rate = sample_rate as f64;
        let frequency = (frequency as f64).clamp(1.0, sample_rate * 0.49);
        let q = (q as f64).max(1e-3);
        let w = (PI * frequency / sample_rate).tan();

        match filter_type {
            FilterType::LowPass => {
                let n = 1.0 / w;
                let n2 = n * n;
                let c1 = 1.0 / (1.0 + n / q + n2);
                Self::from_f64(c1, 2.0 * c1, c1, c1 * 2.0 * (1.0 - n2), c1 * (1.0 - n / q + n2))
            }
            FilterType::HighPass => {
                let n = w;
                let n2 = n * n;
                let c1 = 1.0 / (1.0 + n / q + n2);
                Self::from_f64(c1, -2.0 * c1, c1, c1 * 2.0 * (n2 - 1.0), c1 * (1.0 - n / q + n2))
            }
            FilterType::BandPass => {
                let n = 1.0 / w;
                let n2 = n * n;
                let c1 = 1.0 / (1.0 + n / q + n2);
                Self::from_f64(
                    c1 * n / q,
                    0.0,
                    -c1 * n / q,
                    c1 * 2.0 * (1.0 - n2),
                    c1 * (1.0 - n / q + n2),
                )
            }
        }
    }

    fn from_f64(b0: f64, b1: f64, b2: f64, a1: f64, a2: f64) -> Self {
        Self {
            b0: b0 as f32,
            b1: b1 as f32,
            b2: b2 as f32,
            a1: a1 as f32,
            a2: a2 as f32,
        }
    }

    /// Exact magnitude |H(e^jw)| of these coefficients at `frequency`.
    pub fn magnitude_at(&self, frequency: f64, sample_rate: f64) -> f64 {
        let w = 2.0 * PI * frequency / sample_rate;
        let (s1, c1) = w.sin_cos();
        let (s2, c2) = (2.0 * w).sin_cos();

        let (b0, b1, b2) = (self.b0 as f64, self.b1 as f64, self.b2 as f64);
        let (a1, a2) = (self.a1 as f64, self.a2 as f64);

        let num_re = b0 + b1 * c1 + b2 * c2;
        let num_im = -(b1 * s1 + b2 * s2);
        let den_re = 1.0 + a1 * c1 + a2 * c2;
        let den_im = -(a1 * s1 + a2 * s2);

        ((num_re * num_re + num_im * num_im) / (den_re * den_re + den_im * den_im)).sqrt()
    }
}

impl Default for BiquadCoefficients {
    fn default() -> Self {
        Self::IDENTITY
    }
}

/// Running state of one biquad (transposed direct form II).
#[derive(Debug, Clone, Copy, Default)]
pub struct Biquad {
    s1: f32,
    s2: f32,
}

impl Biquad {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn next_sample(&mut self, sample: f32, c: &BiquadCoefficients) -> f32 {
        let out = c.b0 * sample + self.s1;
        self.s1 = c.b1 * sample - c.a1 * out + self.s2;
        self.s2 = c.b2 * sample - c.a2 * out;
        out
    }

    pub fn render(&mut self, buffer: &mut [f32], c: &BiquadCoefficients) {
        for sample in buffer.iter_mut() {
            *sample = self.next_sample(*sample, c);
        }
    }

    pub fn reset(&mut self) {
        self.s1 = 0.0;
        self.s2 = 0.0;
    }
}

/// Single-pole low-pass: `y += (1 - a) * (x - y)` with `a = exp(-2π fc / sr)`.
///
/// Used to darken the feedback path of the delay.
#[derive(Debug, Clone, Copy)]
pub struct OnePole {
    a: f32,
    z: f32,
}

impl OnePole {
    pub fn lowpass(sample_rate: f32, cutoff_hz: f32) -> Self {
        let mut filter = Self { a: 0.0, z: 0.0 };
        filter.set_cutoff(sample_rate, cutoff_hz);
        filter
    }

    pub fn set_cutoff(&mut self, sample_rate: f32, cutoff_hz: f32) {
        let cutoff = cutoff_hz.clamp(1.0, sample_rate * 0.49);
        self.a = (-std::f32::consts::TAU * cutoff / sample_rate).exp();
    }

    #[inline]
    pub fn next_sample(&mut self, sample: f32) -> f32 {
        self.z = sample * (1.0 - self.a) + self.z * self.a;
        self.z
    }

    pub fn reset(&mut self) {
        self.z = 0.0;
    }
}

impl Default for OnePole {
    fn default() -> Self {
        Self::lowpass(44_100.0, 5_000.0)
    }
}
