//! Contract of the hardware binding delivering controller state.

use crate::sample::Snapshot;

/// How often is the controller polled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PollRate {
    /// About 2 polls per frame, as a game would do.
    Normal,
    /// About 35 polls per frame, used while recording gestures.
    High,
}

/// Source of raw controller samples.
///
/// Implemented by the hardware binding. `poll_once` is called exactly once
/// per driver tick, the binding is responsible for calling the tick on the
/// configured poll rate.
pub trait SampleSource {
    fn poll_once(&mut self) -> Snapshot;
    fn set_poll_rate(&mut self, rate: PollRate);
}
