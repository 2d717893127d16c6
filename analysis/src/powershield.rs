//! Judge how a trigger press would register for a powershield.

use stickscope_capture::recording::{Kind, Recording};
use stickscope_capture::sample::Side;

use crate::{held_us, percent, NoData, FRAME_US};

/// Analog value over which the game registers a light shield.
pub const ANALOG_SHIELD: u8 = 42;

/// Chances of the press registering as each of the outcomes, in percents.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Powershield {
    /// The digital press lands first.
    pub digital: f32,
    /// Analog shield precedes the digital press.
    pub adt: f32,
    /// Analog shield lasts too long for a powershield.
    pub none: f32,
    /// Time the analog shield was up before the digital press.
    pub analog_us: u32,
}

impl Powershield {
    #[must_use]
    pub fn percentages(&self) -> [f32; 3] {
        [self.digital, self.adt, self.none]
    }
}

/// Measure for how long was the analog shield up before the digital press.
///
/// # Errors
///
/// Fails when the recording is not a ready, non-empty trigger recording.
pub fn analyze(recording: &Recording) -> Result<Powershield, NoData> {
    let samples = crate::samples(recording, |kind| {
        matches!(kind, Kind::TriggerL | Kind::TriggerR)
    })?;
    let side = if recording.kind() == Kind::TriggerL {
        Side::L
    } else {
        Side::R
    };

    let Some(press) = samples.iter().position(|s| s.trigger_digital(side)) else {
        return Ok(Powershield {
            digital: 0.0,
            adt: 0.0,
            none: 0.0,
            analog_us: 0,
        });
    };

    let analog_us = (0..press)
        .filter(|i| samples[*i].trigger(side) > ANALOG_SHIELD)
        .fold(0u32, |sum, i| sum.saturating_add(held_us(samples, i)));

    let fraction = analog_us as f32 / FRAME_US as f32;
    let (digital, adt, none) = if fraction <= 1.0 {
        let adt = percent(fraction);
        (100.0 - adt, adt, 0.0)
    } else {
        let adt = percent(2.0 - fraction);
        (0.0, adt, 100.0 - adt)
    };

    Ok(Powershield {
        digital,
        adt,
        none,
        analog_us,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use stickscope_capture::sample::{Buttons, Sample};

    use crate::tests::recording;

    fn trigger(analog: u8, digital: bool) -> Sample {
        Sample {
            trigger_r: analog,
            buttons: if digital { Buttons::R } else { Buttons::NONE },
            delta_us: 1_000,
            ..Sample::default()
        }
    }

    fn press(analog_samples: usize) -> Recording {
        let samples = core::iter::repeat(trigger(0, false))
            .take(5)
            .chain(core::iter::repeat(trigger(100, false)).take(analog_samples))
            .chain(core::iter::repeat(trigger(255, true)).take(20));
        recording(Kind::TriggerR, samples)
    }

    #[test]
    fn when_digital_is_never_pressed_all_outcomes_are_zero() {
        let samples = core::iter::repeat(trigger(200, false)).take(50);
        let recording = recording(Kind::TriggerR, samples);
        let powershield = analyze(&recording).unwrap();
        assert_eq!(powershield.percentages(), [0.0, 0.0, 0.0]);
    }

    #[test]
    fn when_analog_precedes_digital_briefly_it_is_split() {
        let powershield = analyze(&press(4)).unwrap();
        assert_eq!(powershield.analog_us, 4_000);
        let adt = 100.0 * 4_000.0 / 16_666.0;
        assert_relative_eq!(powershield.adt, adt, epsilon = 0.01);
        assert_relative_eq!(powershield.digital, 100.0 - adt, epsilon = 0.01);
        assert_relative_eq!(powershield.none, 0.0);
    }

    #[test]
    fn when_analog_precedes_digital_for_over_a_frame_it_may_not_shield() {
        let powershield = analyze(&press(25)).unwrap();
        assert_eq!(powershield.analog_us, 25_000);
        let adt = 100.0 * (2.0 - 25_000.0 / 16_666.0);
        assert_relative_eq!(powershield.digital, 0.0);
        assert_relative_eq!(powershield.adt, adt, epsilon = 0.01);
        assert_relative_eq!(powershield.none, 100.0 - adt, epsilon = 0.01);
    }

    #[test]
    fn when_analog_precedes_digital_for_over_two_frames_it_never_shields() {
        let powershield = analyze(&press(40)).unwrap();
        assert_eq!(powershield.percentages(), [0.0, 0.0, 100.0]);
    }

    #[test]
    fn when_digital_lands_together_with_analog_it_is_digital() {
        let powershield = analyze(&press(0)).unwrap();
        assert_eq!(powershield.percentages(), [100.0, 0.0, 0.0]);
    }

    #[test]
    fn when_other_trigger_was_recorded_its_flag_is_used() {
        let samples = core::iter::repeat(trigger(255, true)).take(10);
        let recording = recording(Kind::TriggerL, samples);
        let powershield = analyze(&recording).unwrap();
        assert_eq!(powershield.percentages(), [0.0, 0.0, 0.0]);
    }
}
