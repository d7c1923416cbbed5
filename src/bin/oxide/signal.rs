//! Test material for the demo: a plucked sawtooth riff locked to the tempo.

use std::f32::consts::TAU;

/// Notes of the riff in Hz, one per beat.
const RIFF: [f32; 8] = [82.41, 82.41, 98.0, 110.0, 82.41, 123.47, 110.0, 98.0];

pub struct TestSignal {
    sample_rate: f32,
    samples_per_beat: usize,
    position: usize,
    phase: f32,
}

impl TestSignal {
    pub fn new(sample_rate: f32, bpm: f64) -> Self {
        Self {
            sample_rate,
            samples_per_beat: ((60.0 / bpm) * sample_rate as f64).max(1.0) as usize,
            position: 0,
            phase: 0.0,
        }
    }

    #[inline]
    pub fn next_sample(&mut self) -> f32 {
        let beat = self.position / self.samples_per_beat;
        let in_beat = (self.position % self.samples_per_beat) as f32 / self.sample_rate;
        let freq = RIFF[beat % RIFF.len()];

        self.phase += freq / self.sample_rate;
        if self.phase >= 1.0 {
            self.phase -= 1.0;
        }
        self.position = self.position.wrapping_add(1);

        // Saw thickened with a sine, decaying over each beat
        let saw = 2.0 * self.phase - 1.0;
        let body = (TAU * self.phase).sin();
        let env = (-in_beat * 6.0).exp();
        0.35 * env * (0.7 * saw + 0.3 * body)
    }

    pub fn render(&mut self, buffer: &mut [f32]) {
        for sample in buffer.iter_mut() {
            *sample = self.next_sample();
        }
    }
}
