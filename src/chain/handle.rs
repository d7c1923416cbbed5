use std::sync::Arc;

use rtrb::Producer;

use crate::chain::monitor::ChainMonitor;
use crate::dsp::{FilterType, NoteRate};
use crate::fx::distortion::DistortionAlgorithm;
use crate::state::ChainState;

/// Control-thread side of a [`SignalChain`](crate::chain::SignalChain).
///
/// Every edit lands in a local mirror first, so getters answer immediately,
/// then the whole mirror is pushed to the audio thread as one snapshot. If
/// the queue is full the handle stays dirty and the next edit or
/// [`flush`](Self::flush) publishes the latest state.
pub struct ChainHandle {
    tx: Producer<ChainState>,
    state: ChainState,
    dirty: bool,
    monitor: Arc<ChainMonitor>,
}

impl ChainHandle {
    pub(crate) fn new(tx: Producer<ChainState>, state: ChainState, monitor: Arc<ChainMonitor>) -> Self {
        Self {
            tx,
            state,
            dirty: false,
            monitor,
        }
    }

    pub fn state(&self) -> &ChainState {
        &self.state
    }

    pub fn monitor(&self) -> &Arc<ChainMonitor> {
        &self.monitor
    }

    /// True while an edit is waiting for room in the queue.
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Replace every parameter at once (preset recall, host state restore).
    pub fn set_state(&mut self, state: ChainState) {
        self.edit(|current| *current = state);
    }

    /// Apply an arbitrary edit to the mirror and publish it.
    pub fn edit(&mut self, f: impl FnOnce(&mut ChainState)) {
        f(&mut self.state);
        self.dirty = true;
        self.flush();
    }

    /// Try to publish a pending edit. Returns `true` when nothing is pending afterwards.
    pub fn flush(&mut self) -> bool {
        if !self.dirty {
            return true;
        }

        match self.tx.push(self.state) {
            Ok(()) => {
                self.dirty = false;
                true
            }
            Err(_) => {
                tracing::debug!("parameter queue full, snapshot deferred");
                false
            }
        }
    }

    /// Serialize the current parameters into the binary state layout.
    pub fn to_bytes(&self) -> Vec<u8> {
        self.state.to_bytes()
    }

    /// Restore parameters from a (possibly legacy) binary blob.
    pub fn load_bytes(&mut self, bytes: &[u8]) {
        self.set_state(ChainState::from_bytes(bytes));
    }

    // Distortion

    pub fn set_drive(&mut self, drive: f32) {
        self.edit(|s| s.distortion.set_drive(drive));
    }

    pub fn set_distortion_mix(&mut self, mix: f32) {
        self.edit(|s| s.distortion.set_mix(mix));
    }

    pub fn set_input_gain(&mut self, gain_db: f32) {
        self.edit(|s| s.distortion.set_input_gain(gain_db));
    }

    pub fn set_output_gain(&mut self, gain_db: f32) {
        self.edit(|s| s.distortion.set_output_gain(gain_db));
    }

    pub fn set_algorithm(&mut self, algorithm: DistortionAlgorithm) {
        self.edit(|s| s.distortion.set_algorithm(algorithm));
    }

    pub fn set_algorithm_name(&mut self, name: &str) {
        self.edit(|s| s.distortion.set_algorithm_name(name));
    }

    pub fn drive(&self) -> f32 {
        self.state.distortion.drive()
    }

    pub fn distortion_mix(&self) -> f32 {
        self.state.distortion.mix()
    }

    pub fn input_gain(&self) -> f32 {
        self.state.distortion.input_gain()
    }

    pub fn output_gain(&self) -> f32 {
        self.state.distortion.output_gain()
    }

    pub fn algorithm(&self) -> DistortionAlgorithm {
        self.state.distortion.algorithm()
    }

    // Delay

    pub fn set_delay_time(&mut self, seconds: f32) {
        self.edit(|s| s.delay.set_time(seconds));
    }

    pub fn set_feedback(&mut self, feedback: f32) {
        self.edit(|s| s.delay.set_feedback(feedback));
    }

    pub fn set_delay_mix(&mut self, mix: f32) {
        self.edit(|s| s.delay.set_mix(mix));
    }

    pub fn set_delay_filter_freq(&mut self, hz: f32) {
        self.edit(|s| s.delay.set_filter_freq(hz));
    }

    pub fn set_ping_pong(&mut self, enabled: bool) {
        self.edit(|s| s.delay.set_ping_pong(enabled));
    }

    pub fn delay_time(&self) -> f32 {
        self.state.delay.time()
    }

    pub fn feedback(&self) -> f32 {
        self.state.delay.feedback()
    }

    pub fn delay_mix(&self) -> f32 {
        self.state.delay.mix()
    }

    pub fn delay_filter_freq(&self) -> f32 {
        self.state.delay.filter_freq()
    }

    pub fn ping_pong(&self) -> bool {
        self.state.delay.ping_pong()
    }

    // Filter

    pub fn set_filter_frequency(&mut self, hz: f32) {
        self.edit(|s| s.filter.set_frequency(hz));
    }

    pub fn set_resonance(&mut self, q: f32) {
        self.edit(|s| s.filter.set_resonance(q));
    }

    pub fn set_filter_type(&mut self, filter_type: FilterType) {
        self.edit(|s| s.filter.set_filter_type(filter_type));
    }

    pub fn set_filter_type_name(&mut self, name: &str) {
        self.edit(|s| s.filter.set_filter_type_name(name));
    }

    pub fn filter_frequency(&self) -> f32 {
        self.state.filter.frequency()
    }

    pub fn resonance(&self) -> f32 {
        self.state.filter.resonance()
    }

    pub fn filter_type(&self) -> FilterType {
        self.state.filter.filter_type()
    }

    // Pulse

    pub fn set_pulse_mix(&mut self, mix: f32) {
        self.edit(|s| s.pulse.set_mix(mix));
    }

    pub fn set_pulse_rate(&mut self, rate: NoteRate) {
        self.edit(|s| s.pulse.set_rate(rate));
    }

    pub fn set_pulse_rate_name(&mut self, name: &str) {
        self.edit(|s| s.pulse.set_rate_name(name));
    }

    pub fn pulse_mix(&self) -> f32 {
        self.state.pulse.mix()
    }

    pub fn pulse_rate(&self) -> NoteRate {
        self.state.pulse.rate()
    }
}
