//! Real-time capture of analog controller gestures.
//!
//! The driver is meant to be ticked from the poll interrupt of the
//! controller, while a slower loop renders and analyzes the recordings:
//!
//! ```text
//!   [ SampleSource ]
//!          |
//!          | (Snapshot)
//!          V
//!     [ Driver ] --(Sample)--> [ ModeContext ]
//!          |                         |
//!          | (pressed)               | writes, flips
//!          V                         V
//!      [ Menu ] <---(active)--- [ DoubleBuffer ]
//! ```
//!
//! Only the active recording is visible from outside. Once it is ready, it
//! stays untouched until the next capture completes.

#![cfg_attr(not(test), no_std)]
#![allow(clippy::items_after_statements)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_lossless)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::cast_possible_wrap)]
#![allow(clippy::new_without_default)]

mod log;

pub mod clock;
pub mod config;
pub mod double_buffer;
pub mod driver;
pub mod history;
pub mod input;
pub mod latch;
pub mod mode;
pub mod recording;
pub mod reversal;
pub mod sample;
pub mod source;

pub use config::{Config, PlotArming};
pub use driver::Driver;
pub use input::{Input, Thresholds};
pub use mode::{Gate, Mode, Phase};
pub use recording::{Kind, Recording, Test};
pub use sample::{Buttons, Sample, Snapshot, Stick};
pub use source::{PollRate, SampleSource};
