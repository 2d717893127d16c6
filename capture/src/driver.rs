//! Entry point of the capture, invoked on every poll tick.

use crate::clock::Stopwatch;
use crate::config::Config;
use crate::double_buffer::DoubleBuffer;
use crate::latch::Latch;
use crate::log;
use crate::mode::{Gate, Mode, ModeContext, Phase};
use crate::recording::Recording;
use crate::sample::{Buttons, Sample};
use crate::source::{PollRate, SampleSource};

/// The capture session.
///
/// It owns both recordings and the state of the active mode. Since `tick`
/// takes an exclusive reference, only one producer can ever write into the
/// write recording, and a reader holding a reference from `active` keeps
/// the driver borrowed, so a flip can never happen underneath it.
#[derive(Debug)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Driver {
    buffers: DoubleBuffer,
    stopwatch: Stopwatch,
    latch: Latch,
    context: Option<ModeContext>,
    connected: bool,
}

impl Default for Driver {
    fn default() -> Self {
        Self::new()
    }
}

impl Driver {
    #[must_use]
    pub fn new() -> Self {
        Self {
            buffers: DoubleBuffer::new(),
            stopwatch: Stopwatch::default(),
            latch: Latch::default(),
            context: None,
            connected: true,
        }
    }

    /// Enter the given mode, replacing any previous one.
    ///
    /// The active recording is left intact, so the last capture stays
    /// available until a new one completes.
    pub fn setup<S: SampleSource>(&mut self, mode: Mode, config: &Config, source: &mut S) {
        log::info!("Setting up mode {}", mode);
        self.drop_unfinished();
        self.stopwatch.reset();
        self.latch.reset();
        self.connected = true;
        self.context = Some(ModeContext::new(mode, config));
        source.set_poll_rate(mode.poll_rate());
    }

    /// Leave the current mode, cancelling any capture in progress.
    pub fn teardown<S: SampleSource>(&mut self, source: &mut S) {
        log::info!("Tearing down mode");
        self.drop_unfinished();
        self.context = None;
        source.set_poll_rate(PollRate::Normal);
    }

    /// Poll the source once and pass the sample to the active mode.
    ///
    /// `now_us` is a monotonic timestamp of the tick. It does not need to
    /// start from zero, only differences between ticks are used.
    pub fn tick<S: SampleSource>(&mut self, source: &mut S, now_us: u64) -> Phase {
        let elapsed_us = self.stopwatch.lap(now_us);
        let snapshot = source.poll_once();
        self.latch.update(snapshot.buttons, elapsed_us);

        let Some(context) = self.context.as_mut() else {
            return Phase::Idle;
        };

        if !snapshot.connected {
            if self.connected {
                log::warning!("Controller disconnected");
                context.abort(&mut self.buffers);
                self.connected = false;
            }
            return context.phase();
        }
        if !self.connected {
            log::info!("Controller reconnected");
            self.connected = true;
        }

        context.feed(Sample::new(snapshot, elapsed_us), &mut self.buffers)
    }

    fn drop_unfinished(&mut self) {
        let write = self.buffers.write_mut();
        if !write.is_ready() {
            let limit = write.limit();
            write.clear(limit);
        }
    }

    #[must_use]
    pub fn phase(&self) -> Phase {
        self.context.as_ref().map_or(Phase::Idle, ModeContext::phase)
    }

    #[must_use]
    pub fn mode(&self) -> Option<Mode> {
        self.context.as_ref().map(ModeContext::mode)
    }

    /// Whether leaving the mode now would throw away a capture.
    #[must_use]
    pub fn is_capture_in_progress(&self) -> bool {
        self.context
            .as_ref()
            .map_or(false, ModeContext::is_capture_in_progress)
    }

    /// The recording consumers may read.
    #[must_use]
    pub fn active(&self) -> &Recording {
        self.buffers.active()
    }

    /// Buttons held or recently pressed.
    #[must_use]
    pub fn pressed(&self) -> Buttons {
        self.latch.pressed()
    }

    pub fn mark_exported(&mut self) {
        self.buffers.mark_active_exported();
    }

    pub fn set_frozen(&mut self, frozen: bool) {
        if let Some(context) = self.context.as_mut() {
            context.set_frozen(frozen);
        }
    }

    #[must_use]
    pub fn gate(&self) -> Option<&Gate> {
        self.context.as_ref().and_then(ModeContext::gate)
    }

    pub fn reset_gate(&mut self) {
        if let Some(context) = self.context.as_mut() {
            context.reset_gate();
        }
    }

    #[must_use]
    pub fn is_connected(&self) -> bool {
        self.connected
    }
}
