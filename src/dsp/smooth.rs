//! Linear value smoothing for declicking and meter ballistics.
//!
//! A `SmoothedValue` ramps from its current value to a target over a fixed
//! number of samples. Retargeting restarts the ramp from wherever the value
//! currently is, so a target that moves every sample is followed with a lag
//! instead of stepping.

#[derive(Debug, Clone)]
pub struct SmoothedValue {
    current: f32,
    target: f32,
    step: f32,
    samples_remaining: u32,
    ramp_samples: u32,
}

impl SmoothedValue {
    pub fn new(initial: f32, ramp_secs: f32, sample_rate: f32) -> Self {
        Self {
            current: initial,
            target: initial,
            step: 0.0,
            samples_remaining: 0,
            ramp_samples: Self::samples_for(ramp_secs, sample_rate),
        }
    }

    fn samples_for(ramp_secs: f32, sample_rate: f32) -> u32 {
        (ramp_secs * sample_rate).max(1.0) as u32
    }

    /// Change the ramp length and jump straight to `value`.
    pub fn reset(&mut self, value: f32, ramp_secs: f32, sample_rate: f32) {
        self.ramp_samples = Self::samples_for(ramp_secs, sample_rate);
        self.set_immediate(value);
    }

    #[inline]
    pub fn set_target(&mut self, target: f32) {
        if (target - self.target).abs() < f32::EPSILON {
            return;
        }

        self.target = target;
        self.samples_remaining = self.ramp_samples;
        self.step = (self.target - self.current) / self.ramp_samples as f32;
    }

    #[inline]
    pub fn set_immediate(&mut self, value: f32) {
        self.current = value;
        self.target = value;
        self.step = 0.0;
        self.samples_remaining = 0;
    }

    /// Call once per sample in the audio callback.
    #[inline]
    pub fn next_sample(&mut self) -> f32 {
        if self.samples_remaining > 0 {
            self.current += self.step;
            self.samples_remaining -= 1;

            // Snap to avoid drift
            if self.samples_remaining == 0 {
                self.current = self.target;
            }
        }

        self.current
    }

    /// Advance the ramp by `samples` at once (block-rate consumers such as meters).
    pub fn skip(&mut self, samples: usize) -> f32 {
        let samples = samples.min(u32::MAX as usize) as u32;
        if samples >= self.samples_remaining {
            self.current = self.target;
            self.samples_remaining = 0;
        } else {
            self.current += self.step * samples as f32;
            self.samples_remaining -= samples;
        }

        self.current
    }

    #[inline]
    pub fn current(&self) -> f32 {
        self.current
    }

    #[inline]
    pub fn target(&self) -> f32 {
        self.target
    }

    #[inline]
    pub fn is_smoothing(&self) -> bool {
        self.samples_remaining > 0
    }
}
