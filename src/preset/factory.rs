//! Presets shipped with the plugin, written to an empty preset directory.

use crate::dsp::{FilterType, NoteRate};
use crate::fx::distortion::DistortionAlgorithm;
use crate::fx::param::ParamEnum;
use crate::preset::Preset;
use crate::state::ChainState;

struct FactoryPreset {
    name: &'static str,
    drive: f32,
    mix: f32,
    input_gain: f32,
    output_gain: f32,
    algorithm: &'static str,
    delay_time: f32,
    feedback: f32,
    delay_mix: f32,
    ping_pong: bool,
    filter_type: &'static str,
    frequency: f32,
    resonance: f32,
    pulse_mix: f32,
    pulse_rate: &'static str,
}

macro_rules! factory {
    ($($name:literal: $drive:literal $mix:literal $ig:literal $og:literal $algo:literal
       | $time:literal $fb:literal $dmix:literal $pp:literal
       | $ftype:literal $freq:literal $res:literal
       | $pmix:literal $rate:literal;)*) => {
        &[$(FactoryPreset {
            name: $name,
            drive: $drive,
            mix: $mix,
            input_gain: $ig,
            output_gain: $og,
            algorithm: $algo,
            delay_time: $time,
            feedback: $fb,
            delay_mix: $dmix,
            ping_pong: $pp,
            filter_type: $ftype,
            frequency: $freq,
            resonance: $res,
            pulse_mix: $pmix,
            pulse_rate: $rate,
        }),*]
    };
}

#[rustfmt::skip]
const FACTORY: &[FactoryPreset] = factory! {
    //                  drive mix   in    out   algorithm     | time  fb    mix   pp    | type       freq    res  | pulse rate
    "Default":          0.5   0.5   0.0   0.0   "soft_clip"   | 0.5   0.4   0.3   false | "lowpass"  1000.0  0.7  | 0.0   "1/4";
    "Light Drive":      0.3   0.5   0.2   0.5   "soft_clip"   | 0.5   0.4   0.3   false | "lowpass"  1200.0  0.5  | 0.2   "1/4";
    "Heavy Metal":      0.8   0.7   3.0   2.0   "hard_clip"   | 0.5   0.5   0.5   true  | "lowpass"  2000.0  1.2  | 0.4   "1/4";
    "Fuzz":             1.0   1.0   6.0   -3.0  "foldback"    | 0.7   0.7   0.6   false | "highpass" 500.0   0.8  | 1.0   "1/4";
    "Warm Tape":        0.5   0.4   1.5   0.0   "waveshaper"  | 0.3   0.6   0.4   true  | "bandpass" 1500.0  2.0  | 0.6   "1/4";
    "Subtle Texture":   0.25  0.35  1.0   0.0   "waveshaper"  | 0.2   0.25  0.2   true  | "highpass" 400.0   0.5  | 0.15  "1/8";
    "Rhythmic Grind":   0.7   0.8   2.5   -1.5  "hard_clip"   | 0.25  0.6   0.5   true  | "bandpass" 1200.0  3.0  | 0.8   "1/8";
    "Analog Crush":     0.9   0.65  4.0   -2.0  "bitcrusher"  | 0.15  0.3   0.25  false | "lowpass"  1800.0  1.0  | 0.3   "1/4";
    "Ambient Wash":     0.4   0.6   1.0   0.5   "soft_clip"   | 0.9   0.75  0.8   true  | "lowpass"  3000.0  0.3  | 0.2   "1/2";
    "Bass Thickener":   0.35  0.55  3.0   -1.0  "foldback"    | 0.1   0.2   0.15  false | "lowpass"  500.0   1.7  | 0.4   "1/4";
    "Lo-Fi Charm":      0.6   0.75  2.0   -1.0  "bitcrusher"  | 0.35  0.45  0.4   true  | "lowpass"  2400.0  0.4  | 0.3   "1/8";
    "Synth Destroyer":  0.85  0.9   5.0   -2.5  "foldback"    | 0.18  0.65  0.55  true  | "bandpass" 900.0   4.0  | 0.7   "1/4";
    "Vocal Enhancer":   0.2   0.3   1.5   0.0   "soft_clip"   | 0.22  0.3   0.25  true  | "highpass" 300.0   0.3  | 0.0   "1/4";
    "Guitar Sizzle":    0.55  0.7   3.0   -1.0  "waveshaper"  | 0.4   0.5   0.35  false | "bandpass" 1600.0  1.8  | 0.2   "1/4";
    "Drum Cruncher":    0.45  0.6   2.5   -0.5  "hard_clip"   | 0.12  0.2   0.15  false | "lowpass"  4000.0  0.9  | 0.5   "1/8";
};

impl FactoryPreset {
    fn state(&self) -> ChainState {
        let mut state = ChainState::default();

        let distortion = &mut state.distortion;
        distortion.set_algorithm(DistortionAlgorithm::from_token(self.algorithm));
        distortion.set_drive(self.drive);
        distortion.set_mix(self.mix);
        distortion.set_input_gain(self.input_gain);
        distortion.set_output_gain(self.output_gain);

        state.delay.set_time(self.delay_time);
        state.delay.set_feedback(self.feedback);
        state.delay.set_mix(self.delay_mix);
        state.delay.set_ping_pong(self.ping_pong);

        state.filter.set_filter_type(FilterType::from_token(self.filter_type));
        state.filter.set_frequency(self.frequency);
        state.filter.set_resonance(self.resonance);

        state.pulse.set_mix(self.pulse_mix);
        state.pulse.set_rate(NoteRate::from_token(self.pulse_rate));

        state
    }
}

/// Every factory preset, in display order.
pub fn factory_presets() -> Vec<Preset> {
    FACTORY
        .iter()
        .map(|preset| Preset::new(preset.name, preset.state()))
        .collect()
}

/// Look up one factory preset by exact name.
pub fn factory_preset(name: &str) -> Option<Preset> {
    FACTORY
        .iter()
        .find(|preset| preset.name == name)
        .map(|preset| Preset::new(preset.name, preset.state()))
}
