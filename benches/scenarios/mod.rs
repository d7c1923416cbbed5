//! Benchmarks for the stereo processors and the complete chain.

mod chain;
mod processors;

pub use chain::bench_chain;
pub use processors::bench_processors;
