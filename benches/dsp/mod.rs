//! Benchmarks for low-level DSP primitives.

mod amplify;
mod delay;
mod distortion;
mod filter;
mod mix;
mod pulse;

pub use amplify::bench_amplify;
pub use delay::bench_delay;
pub use distortion::bench_distortion;
pub use filter::bench_filter;
pub use mix::bench_mix;
pub use pulse::bench_pulse;
