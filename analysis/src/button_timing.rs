//! Timing of all inputs relative to the one that started the capture.

use stickscope_capture::input::{Input, Thresholds, INPUTS};
use stickscope_capture::recording::{Kind, Recording};

use crate::{frames, held_us, timestamp_us, NoData};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ButtonTiming {
    /// The input that started the capture.
    pub trigger: Input,
    /// For how long was the triggering input held without interruption.
    pub hold_us: u32,
    /// When did each of the inputs first get asserted, indexed by
    /// `Input::index`. `None` for inputs that were never asserted.
    pub first_assertion_us: [Option<u32>; INPUTS.len()],
}

impl ButtonTiming {
    /// Time relevant for the given input, in frames.
    ///
    /// That is the hold time for the triggering input and the time of the
    /// first assertion for the rest. Inputs never asserted report 0.
    #[must_use]
    pub fn frames(&self, input: Input) -> f32 {
        if input == self.trigger {
            frames(self.hold_us)
        } else {
            frames(self.first_assertion_us[input.index()].unwrap_or(0))
        }
    }
}

/// Measure when each input got asserted within the recorded window.
///
/// `thresholds` must match those used during the capture, otherwise the
/// triggering input may not be recognized as asserted.
///
/// # Errors
///
/// Fails when the recording is not a ready, non-empty button timing
/// recording.
pub fn analyze(recording: &Recording, thresholds: &Thresholds) -> Result<ButtonTiming, NoData> {
    let samples = crate::samples(recording, |kind| matches!(kind, Kind::ButtonTiming(_)))?;
    let Kind::ButtonTiming(trigger) = recording.kind() else {
        return Err(NoData::WrongKind);
    };

    let hold_us = samples
        .iter()
        .enumerate()
        .take_while(|(_, s)| trigger.asserted(s, thresholds))
        .fold(0u32, |sum, (i, _)| sum.saturating_add(held_us(samples, i)));

    let first_assertion_us = INPUTS.map(|input| {
        samples
            .iter()
            .position(|s| input.asserted(s, thresholds))
            .map(|i| timestamp_us(samples, i))
    });

    Ok(ButtonTiming {
        trigger,
        hold_us,
        first_assertion_us,
    })
}
