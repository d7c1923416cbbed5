#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Settings fixed for the lifetime of a [`SignalChain`](crate::chain::SignalChain).
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChainConfig {
    pub sample_rate: f32,
    /// Largest block the host will pass to `process_block`.
    pub max_block_size: usize,
    /// Channels captured by meters and the scope (at most 2).
    pub channels: usize,
    /// Ballistics of the level meters.
    pub meter_smoothing_secs: f32,
    /// Ramp time of the pulse envelope declicker.
    pub declick_secs: f32,
    /// Parameter snapshots that can wait between two audio blocks.
    pub param_queue_capacity: usize,
}

impl Default for ChainConfig {
    fn default() -> Self {
        Self {
            sample_rate: 44_100.0,
            max_block_size: 512,
            channels: 2,
            meter_smoothing_secs: 0.1,
            declick_secs: 0.01,
            param_queue_capacity: 64,
        }
    }
}

impl ChainConfig {
    pub fn new(sample_rate: f32, max_block_size: usize) -> Self {
        Self {
            sample_rate,
            max_block_size,
            ..Self::default()
        }
    }

    pub fn with_channels(mut self, channels: usize) -> Self {
        self.channels = channels;
        self
    }

    /// Copy with every field forced into a usable range.
    pub fn sanitized(self) -> Self {
        let defaults = Self::default();
        let positive_or = |value: f32, fallback: f32| {
            if value.is_finite() && value > 0.0 {
                value
            } else {
                fallback
            }
        };

        Self {
            sample_rate: positive_or(self.sample_rate, defaults.sample_rate),
            max_block_size: self.max_block_size.clamp(1, crate::MAX_BLOCK_SIZE),
            channels: self.channels.clamp(1, crate::MAX_CHANNELS),
            meter_smoothing_secs: positive_or(self.meter_smoothing_secs, defaults.meter_smoothing_secs),
            declick_secs: positive_or(self.declick_secs, defaults.declick_secs),
            param_queue_capacity: self.param_queue_capacity.max(1),
        }
    }
}
