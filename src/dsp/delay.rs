//! Circular delay line with fractional (linearly interpolated) reads.
//!
//! The buffer is sized once and never reallocated while processing. Reads are
//! taken relative to the write cursor, so a delay of `d` samples returns what
//! was written `d` writes ago.

pub struct DelayLine {
    buffer: Vec<f32>,
    write_pos: usize,
}

impl DelayLine {
    /// Create an empty delay line. It holds no samples until [`allocate`](Self::allocate) runs.
    pub fn new() -> Self {
        Self {
            buffer: Vec::new(),
            write_pos: 0,
        }
    }

    /// Create a delay line holding `len` samples of silence.
    pub fn with_len(len: usize) -> Self {
        Self {
            buffer: vec![0.0; len],
            write_pos: 0,
        }
    }

    /// Resize to `len` samples, clear the contents and rewind the write cursor.
    ///
    /// Allocates; call from `prepare`, never from the audio callback.
    pub fn allocate(&mut self, len: usize) {
        self.buffer.clear();
        self.buffer.resize(len, 0.0);
        self.write_pos = 0;
    }

    pub fn len(&self) -> usize {
        self.buffer.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }

    pub fn write_pos(&self) -> usize {
        self.write_pos
    }

    /// Largest delay (in samples) that can be read with interpolation.
    pub fn max_delay(&self) -> f64 {
        self.buffer.len().saturating_sub(1) as f64
    }

    /// Read `delay_samples` behind the write cursor, interpolating between the
    /// two bracketing samples. Delays are clamped to `[0, len - 1]`.
    #[inline]
    pub fn read_interpolated(&self, delay_samples: f64) -> f32 {
        let len = self.buffer.len();
        if len == 0 {
            return 0.0;
        }

        let delay = delay_samples.clamp(0.0, self.max_delay());
        let mut read_pos = self.write_pos as f64 - delay;
        if read_pos < 0.0 {
            read_pos += len as f64;
        }

        let mut pos1 = read_pos as usize;
        if pos1 >= len {
            pos1 -= len;
        }
        let pos2 = (pos1 + 1) % len;
        let frac = (read_pos - read_pos.floor()) as f32;

        self.buffer[pos1] * (1.0 - frac) + self.buffer[pos2] * frac
    }

    /// Store a sample at the write cursor without advancing it.
    #[inline]
    pub fn write(&mut self, sample: f32) {
        if let Some(slot) = self.buffer.get_mut(self.write_pos) {
            *slot = sample;
        }
    }

    /// Advance and wrap the write cursor.
    #[inline]
    pub fn advance(&mut self) {
        if !self.buffer.is_empty() {
            self.write_pos = (self.write_pos + 1) % self.buffer.len();
        }
    }

    /// Write-then-read convenience for a plain (feedback-free) delay.
    #[inline]
    pub fn next_sample(&mut self, sample: f32, delay_samples: f64) -> f32 {
        let delayed = self.read_interpolated(delay_samples);
        self.write(sample);
        self.advance();
        delayed
    }

    pub fn render(&mut self, buffer: &mut [f32], delay_samples: f64) {
        for sample in buffer.iter_mut() {
            *sample = self.next_sample(*sample, delay_samples);
        }
    }

    /// Clear contents and rewind without reallocating.
    pub fn reset(&mut self) {
        self.buffer.fill(0.0);
        self.write_pos = 0;
    }
}

impl Default for DelayLine {
    fn default() -> Self {
        Self::new()
    }
}
