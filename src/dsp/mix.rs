//! Wet/dry crossfading.

/*
Wet/Dry Mixing
==============

Every effect in the chain blends its processed ("wet") signal with the
untouched input ("dry") using a linear crossfade:

    output = dry × (1 - mix) + wet × mix

      mix = 0.0  →  input passes unchanged
      mix = 0.5  →  equal blend
      mix = 1.0  →  effect only

The weights always sum to 1.0, so blending two full-scale signals never
boosts the level. Linear crossfades dip slightly in perceived loudness at
the midpoint when the signals are uncorrelated; for effect returns that is
the expected behaviour of a "mix" knob.
*/

/// Blend dry and wet samples using linear crossfade (single sample version).
#[inline]
pub fn blend_dry_wet(dry: f32, wet: f32, mix: f32) -> f32 {
    dry * (1.0 - mix) + wet * mix
}

/// Apply dry/wet mixing to a buffer, blending original (dry) with processed (wet).
///
/// Modifies `wet` in-place, using `dry` as the unprocessed reference.
#[inline]
pub fn apply_dry_wet(dry: &[f32], wet: &mut [f32], mix: f32) {
    debug_assert_eq!(dry.len(), wet.len());

    if mix >= 1.0 {
        return;
    }

    for (wet_sample, &dry_sample) in wet.iter_mut().zip(dry.iter()) {
        *wet_sample = blend_dry_wet(dry_sample, *wet_sample, mix);
    }
}
