//! State machines deciding when a recording starts and ends.
//!
//! Every capture mode goes through the same phases:
//!
//! ```text
//!   [ Arming ] --(trigger)--> [ Capturing ] --(complete)--> [ Locked ]
//!       A                         |                             |
//!       +-------(restart)---------+                             |
//!       +------------(cooldown elapsed, input neutral)----------+
//! ```
//!
//! While arming, the mode only watches samples and keeps a short history of
//! them. When capturing, each sample is appended to the write recording.
//! On completion the recording is finished and the double buffer flipped.
//! The lock then keeps the tail of the gesture from starting another
//! capture right away.

mod button_timing;
mod gate;
mod plot;
mod snapback;
mod trigger;
mod turn;

pub use gate::Gate;

use self::button_timing::ButtonTiming;
use self::plot::Plot;
use self::snapback::Snapback;
use self::trigger::Trigger;
use self::turn::Turn;
use crate::config::Config;
use crate::double_buffer::DoubleBuffer;
use crate::log;
use crate::recording::{Full, Recording, Test};
use crate::sample::Sample;
use crate::source::PollRate;

/// Number of ticks a mode stays locked after a completed capture.
pub const LOCK_COOLDOWN_TICKS: u32 = 5;

/// For how long must the stick rest in the deadzone to end stick captures.
pub const ORIGIN_DWELL_US: u32 = 25_000;

/// Capture modes offered by the menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Mode {
    Snapback,
    Pivot,
    Dashback,
    Plot,
    Trigger,
    ButtonTiming,
    GateSweep,
}

impl Mode {
    #[must_use]
    pub fn poll_rate(self) -> PollRate {
        match self {
            Self::GateSweep => PollRate::Normal,
            _ => PollRate::High,
        }
    }
}

/// Where the capture state machine currently stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Phase {
    /// No mode is set up.
    Idle,
    Arming,
    Capturing,
    Locked,
}

/// Reaction of a mode to a sample received while capturing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub(crate) enum Progress {
    Continue,
    Complete,
    /// The recording cannot take more samples.
    Full,
    /// The gesture turned out not to be finished, drop what was recorded
    /// and go back to arming.
    Restart,
}

impl From<Result<(), Full>> for Progress {
    fn from(result: Result<(), Full>) -> Self {
        match result {
            Ok(()) => Self::Continue,
            Err(Full) => Self::Full,
        }
    }
}

/// Behavior specific to a mode that produces recordings.
pub(crate) trait Machine {
    /// Watch a sample while arming. Returns true when capture should start.
    fn observe(&mut self, sample: &Sample) -> bool;

    /// Write the context preceding the trigger, including the triggering
    /// sample itself, into a freshly cleared recording.
    fn start(&mut self, recording: &mut Recording) -> Result<(), Full>;

    fn capture(&mut self, sample: &Sample, recording: &mut Recording) -> Progress;

    /// Apply truncation policy if any and mark the recording as ready.
    fn finish(&mut self, recording: &mut Recording);

    /// Whether the input is in a state that allows the lock to be released.
    fn neutral(&self, sample: &Sample) -> bool;

    fn limit(&self) -> usize;

    /// Whether a completed capture is followed by a lock.
    fn locks(&self) -> bool {
        true
    }

    /// Forget all scratch state and start arming from scratch.
    fn reset(&mut self);
}

#[allow(clippy::large_enum_variant)]
#[derive(Debug)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
enum State {
    Snapback(Snapback),
    Turn(Turn),
    Plot(Plot),
    Trigger(Trigger),
    ButtonTiming(ButtonTiming),
    GateSweep(Gate),
}

impl State {
    fn machine(&self) -> Option<&dyn Machine> {
        match self {
            Self::Snapback(m) => Some(m),
            Self::Turn(m) => Some(m),
            Self::Plot(m) => Some(m),
            Self::Trigger(m) => Some(m),
            Self::ButtonTiming(m) => Some(m),
            Self::GateSweep(_) => None,
        }
    }

    fn machine_mut(&mut self) -> Option<&mut dyn Machine> {
        match self {
            Self::Snapback(m) => Some(m),
            Self::Turn(m) => Some(m),
            Self::Plot(m) => Some(m),
            Self::Trigger(m) => Some(m),
            Self::ButtonTiming(m) => Some(m),
            Self::GateSweep(_) => None,
        }
    }
}

/// State of the active capture mode.
///
/// It is created when the mode's menu is entered and dropped when it is
/// left. All scratch state of the mode lives here, so two contexts never
/// share anything.
#[derive(Debug)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ModeContext {
    mode: Mode,
    phase: Phase,
    cooldown: u32,
    frozen: bool,
    state: State,
}

impl ModeContext {
    #[must_use]
    pub fn new(mode: Mode, config: &Config) -> Self {
        let state = match mode {
            Mode::Snapback => State::Snapback(Snapback::new()),
            Mode::Pivot => State::Turn(Turn::new(Test::Pivot)),
            Mode::Dashback => State::Turn(Turn::new(Test::Dashback)),
            Mode::Plot => State::Plot(Plot::new(config.plot_arming, config.plot_stick)),
            Mode::Trigger => State::Trigger(Trigger::new()),
            Mode::ButtonTiming => State::ButtonTiming(ButtonTiming::new(config.thresholds)),
            Mode::GateSweep => State::GateSweep(Gate::new(config.gate_stick)),
        };
        Self {
            mode,
            phase: Phase::Arming,
            cooldown: 0,
            frozen: false,
            state,
        }
    }

    #[must_use]
    pub fn mode(&self) -> Mode {
        self.mode
    }

    #[must_use]
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Keep the current recording on display, no matter the input.
    ///
    /// Freezing takes effect once the mode gets locked. Unfreezing lets the
    /// lock release under the usual conditions.
    pub fn set_frozen(&mut self, frozen: bool) {
        self.frozen = frozen;
    }

    #[must_use]
    pub fn is_frozen(&self) -> bool {
        self.frozen
    }

    #[must_use]
    pub fn gate(&self) -> Option<&Gate> {
        match &self.state {
            State::GateSweep(gate) => Some(gate),
            _ => None,
        }
    }

    pub fn reset_gate(&mut self) {
        if let State::GateSweep(gate) = &mut self.state {
            gate.clear();
        }
    }

    /// Process one sample, writing into and flipping the given buffers.
    pub fn feed(&mut self, sample: Sample, buffers: &mut DoubleBuffer) -> Phase {
        if let State::GateSweep(gate) = &mut self.state {
            gate.update(&sample);
            return self.phase;
        }
        let Some(machine) = self.state.machine_mut() else {
            return self.phase;
        };

        if self.phase == Phase::Locked {
            self.cooldown = self.cooldown.saturating_sub(1);
            if self.cooldown == 0 && !self.frozen && machine.neutral(&sample) {
                machine.reset();
                self.phase = Phase::Arming;
            }
        }

        match self.phase {
            Phase::Arming => {
                if machine.observe(&sample) {
                    log::info!("Capture armed");
                    let write = buffers.write_mut();
                    write.clear(machine.limit());
                    let progress = Progress::from(machine.start(write));
                    self.phase = Phase::Capturing;
                    self.react(progress, buffers);
                }
            }
            Phase::Capturing => {
                let progress = machine.capture(&sample, buffers.write_mut());
                self.react(progress, buffers);
            }
            Phase::Locked | Phase::Idle => (),
        }

        self.phase
    }

    fn react(&mut self, progress: Progress, buffers: &mut DoubleBuffer) {
        match progress {
            Progress::Continue if !buffers.write().is_full() => (),
            Progress::Continue | Progress::Full => {
                log::warning!("Recording exhausted, forcing completion");
                self.complete(buffers);
            }
            Progress::Complete => self.complete(buffers),
            Progress::Restart => {
                if let Some(machine) = self.state.machine() {
                    buffers.write_mut().clear(machine.limit());
                }
                self.phase = Phase::Arming;
            }
        }
    }

    fn complete(&mut self, buffers: &mut DoubleBuffer) {
        let Some(machine) = self.state.machine_mut() else {
            return;
        };

        let write = buffers.write_mut();
        machine.finish(write);
        log::info!(
            "Capture complete: kind={} len={}",
            write.kind(),
            write.len()
        );
        buffers.flip();

        if machine.locks() {
            self.phase = Phase::Locked;
            self.cooldown = LOCK_COOLDOWN_TICKS;
        } else {
            machine.reset();
            self.phase = Phase::Arming;
        }
    }

    /// Drop an unfinished capture, for example when the controller got
    /// disconnected. A ready active recording is not affected.
    pub fn abort(&mut self, buffers: &mut DoubleBuffer) {
        let Some(machine) = self.state.machine_mut() else {
            return;
        };

        match self.phase {
            Phase::Capturing => {
                log::warning!("Capture aborted");
                buffers.write_mut().clear(machine.limit());
                machine.reset();
                self.phase = Phase::Arming;
            }
            Phase::Arming => machine.reset(),
            Phase::Locked | Phase::Idle => (),
        }
    }

    #[must_use]
    pub fn is_capture_in_progress(&self) -> bool {
        self.phase == Phase::Capturing
    }
}
