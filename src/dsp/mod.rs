//! Low-level DSP primitives used by the effect processors.
//!
//! These components are allocation-free once sized and realtime-safe, making
//! them safe to embed directly inside processor structs. They intentionally
//! stay focused on the signal-processing math so the processors in `fx` can
//! layer on parameters, channel handling and block orchestration.

/// Gain, decibel conversion and RMS metering.
pub mod amplify;
/// Circular delay line with interpolated reads.
pub mod delay;
/// Waveshaping transfer functions.
pub mod distortion;
/// Biquad and one-pole filters.
pub mod filter;
/// Linear wet/dry crossfading.
pub mod mix;
/// Tempo-synced pump envelope and phase accumulator math.
pub mod pulse;
/// Linear parameter smoothing.
pub mod smooth;

pub use filter::FilterType;
pub use pulse::NoteRate;
pub use smooth::SmoothedValue;
