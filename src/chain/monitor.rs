use std::sync::atomic::Ordering;

use atomic_float::AtomicF32;
use parking_lot::Mutex;

use crate::fx::processor::AudioBlock;
use crate::MAX_CHANNELS;

/// Read side of the chain's metering, shared between the audio thread and
/// any number of display readers.
///
/// Levels are smoothed RMS values published through atomics. The scope holds
/// a copy of the most recent processed block; the audio thread only ever
/// `try_lock`s it and skips the copy while a reader holds the lock.
pub struct ChainMonitor {
    input_levels: [AtomicF32; MAX_CHANNELS],
    output_levels: [AtomicF32; MAX_CHANNELS],
    scope: Mutex<Scope>,
}

struct Scope {
    channels: Vec<Vec<f32>>,
    len: usize,
    active_channels: usize,
}

impl ChainMonitor {
    pub fn new(channels: usize, capacity: usize) -> Self {
        Self {
            input_levels: std::array::from_fn(|_| AtomicF32::new(0.0)),
            output_levels: std::array::from_fn(|_| AtomicF32::new(0.0)),
            scope: Mutex::new(Scope::new(channels, capacity)),
        }
    }

    /// Smoothed RMS of the unprocessed input. Channels past the second read as 0.
    pub fn input_level(&self, channel: usize) -> f32 {
        self.input_levels
            .get(channel)
            .map_or(0.0, |level| level.load(Ordering::Relaxed))
    }

    /// Smoothed RMS of the processed output.
    pub fn output_level(&self, channel: usize) -> f32 {
        self.output_levels
            .get(channel)
            .map_or(0.0, |level| level.load(Ordering::Relaxed))
    }

    /// Copy of the last captured block, one `Vec` per captured channel.
    pub fn scope_snapshot(&self) -> Vec<Vec<f32>> {
        let scope = self.scope.lock();
        scope
            .channels
            .iter()
            .take(scope.active_channels)
            .map(|channel| channel[..scope.len].to_vec())
            .collect()
    }

    /// Samples per channel held by the scope.
    pub fn scope_capacity(&self) -> usize {
        self.scope.lock().channels.first().map_or(0, Vec::len)
    }

    pub(crate) fn store_input_levels(&self, levels: &[f32; MAX_CHANNELS]) {
        for (slot, level) in self.input_levels.iter().zip(levels) {
            slot.store(*level, Ordering::Relaxed);
        }
    }

    pub(crate) fn store_output_levels(&self, levels: &[f32; MAX_CHANNELS]) {
        for (slot, level) in self.output_levels.iter().zip(levels) {
            slot.store(*level, Ordering::Relaxed);
        }
    }

    /// Copy `block` into the scope unless a reader holds it. Returns whether it was copied.
    pub(crate) fn capture_scope(&self, block: &AudioBlock<'_>) -> bool {
        let Some(mut scope) = self.scope.try_lock() else {
            return false;
        };

        let mut len = 0;
        let mut active = 0;
        for (dest, src) in scope.channels.iter_mut().zip(block.iter()) {
            let n = src.len().min(dest.len());
            dest[..n].copy_from_slice(&src[..n]);
            len = n;
            active += 1;
        }
        scope.len = len;
        scope.active_channels = active;
        true
    }

    /// Resize the scope storage. Allocates; only called while preparing.
    pub(crate) fn resize_scope(&self, channels: usize, capacity: usize) {
        *self.scope.lock() = Scope::new(channels, capacity);
    }
}

impl Scope {
    fn new(channels: usize, capacity: usize) -> Self {
        Self {
            channels: vec![vec![0.0; capacity]; channels.clamp(1, MAX_CHANNELS)],
            len: 0,
            active_channels: 0,
        }
    }
}
