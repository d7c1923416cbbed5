/// One callback's worth of audio: a mutable slice per channel, all the same length.
///
/// Blocks are owned by the caller. Processors mutate samples in place and never
/// resize or reallocate them.
pub type AudioBlock<'a> = [&'a mut [f32]];

/// Number of samples in a block (length of the first channel, 0 when empty).
#[inline]
pub fn block_len(block: &AudioBlock<'_>) -> usize {
    block.first().map_or(0, |channel| channel.len())
}

/// Core trait for the stateful effects in the chain.
///
/// `prepare` is the only place that may allocate. Until it has run,
/// `process_block` must leave the block untouched.
pub trait Processor: Send {
    /// Size internal buffers and derive rate-dependent state.
    fn prepare(&mut self, sample_rate: f32, max_block_size: usize);

    /// Clear running state (delay contents, filter history, phase) without reallocating.
    fn reset(&mut self);

    /// Process up to [`MAX_CHANNELS`](crate::MAX_CHANNELS) channels in place.
    fn process_block(&mut self, block: &mut AudioBlock<'_>);

    fn is_prepared(&self) -> bool;
}

/// Allow boxed processors to be used as processors (for dynamic dispatch)
impl Processor for Box<dyn Processor> {
    fn prepare(&mut self, sample_rate: f32, max_block_size: usize) {
        (**self).prepare(sample_rate, max_block_size)
    }

    fn reset(&mut self) {
        (**self).reset()
    }

    fn process_block(&mut self, block: &mut AudioBlock<'_>) {
        (**self).process_block(block)
    }

    fn is_prepared(&self) -> bool {
        (**self).is_prepared()
    }
}
