//! Tempo-synced pump envelope.

/*
Tempo-Synced Pulse
==================

The pulse effect is a tremolo whose period is locked to the host tempo
instead of a free-running frequency in Hz. A phase accumulator tracks the
position inside one period:

    phase ∈ [0, 1)        0.0 = start of the period, wraps at 1.0

Each sample advances the phase by

    increment = (bpm / 60 × rate_multiplier) / sample_rate

    rate     multiplier   periods per beat
    1/2      0.5          one every two beats
    1/4      1.0          one per beat
    1/8      2.0          two per beat

At 120 BPM, 1/4 rate and 48 kHz: increment = 2 / 48000, so the phase wraps
every 24000 samples (half a second).


The Envelope Shape
------------------

The gain follows a "duck and recover" shape, like a side-chained compressor
pumping against a kick drum:

    gain
     1.0 ┤    ╭──────────────────────────────
         │   ╱
         │  ╱
         │ ╱
     0.0 ┼╯──────────┬───────────────────────→ phase
         0.0       0.25                    1.0

    phase < 0.25:  gain = sin(phase × 4 × π/2)   (quarter sine, 0 → 1)
    phase ≥ 0.25:  gain = 1.0

The raw shape jumps from 1.0 back to 0.0 when the phase wraps. That step
would click, so the applied gain runs through a short linear smoother
(see `dsp/smooth.rs`).
*/

use std::f64::consts::FRAC_PI_2;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Note division the pulse period is locked to.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum NoteRate {
    Half,
    #[default]
    Quarter,
    Eighth,
}

impl NoteRate {
    /// Periods per beat.
    pub fn multiplier(self) -> f64 {
        match self {
            NoteRate::Half => 0.5,
            NoteRate::Quarter => 1.0,
            NoteRate::Eighth => 2.0,
        }
    }
}

/// Raw pump gain for a phase position in `[0, 1)`.
#[inline]
pub fn pulse_envelope(phase: f64) -> f32 {
    if phase < 0.25 {
        (phase * 4.0 * FRAC_PI_2).sin() as f32
    } else {
        1.0
    }
}

/// Phase advance per sample for a tempo, note rate and sample rate.
#[inline]
pub fn phase_increment(bpm: f64, rate: NoteRate, sample_rate: f64) -> f64 {
    (bpm / 60.0 * rate.multiplier()) / sample_rate
}

/// Advance a phase accumulator and wrap it into `[0, 1)`.
#[inline]
pub fn advance_phase(phase: f64, increment: f64) -> f64 {
    let next = phase + increment;
    if next >= 1.0 {
        next - 1.0
    } else {
        next
    }
}
