pub mod chain; // Signal chain, control handle, meters
pub mod config;
pub mod dsp;
pub mod error;
pub mod fx; // Stateful effect processors
pub mod preset; // XML presets and the preset directory
pub mod state; // Binary parameter blob

pub use chain::{ChainHandle, ChainMonitor, SignalChain};
pub use config::ChainConfig;
pub use error::{Error, Result};
pub use state::ChainState;

/// Channels processed per block; further channels pass through untouched.
pub const MAX_CHANNELS: usize = 2;
pub const MAX_BLOCK_SIZE: usize = 8192;
/// Tempo used when the host transport reports none.
pub const DEFAULT_BPM: f64 = 120.0;
