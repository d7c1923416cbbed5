//! Stateful effect processors.
//!
//! Each processor owns its parameter set, sizes its buffers in `prepare`, and
//! mutates blocks in place afterwards. They build on the primitives in `dsp`
//! and are composed in a fixed order by [`SignalChain`](crate::chain::SignalChain).

pub mod delay;
pub mod distortion;
pub mod filter;
pub mod param;
pub mod processor;
pub mod pulse;

pub use delay::{DelayParams, DelayProcessor};
pub use distortion::{DistortionAlgorithm, DistortionParams, DistortionProcessor};
pub use filter::{FilterParams, FilterProcessor};
pub use param::ParamEnum;
pub use processor::{block_len, AudioBlock, Processor};
pub use pulse::{PulseParams, PulseProcessor};
