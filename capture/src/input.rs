//! Individual inputs tracked by the button timing test.

use crate::sample::{abs, Buttons, Sample};

/// All inputs the button timing test watches, in the priority in which
/// they are scanned when deciding which of them started the capture.
pub const INPUTS: [Input; 13] = [
    Input::A,
    Input::B,
    Input::X,
    Input::Y,
    Input::Z,
    Input::L,
    Input::R,
    Input::AnalogL,
    Input::AnalogR,
    Input::StickX,
    Input::StickY,
    Input::CStickX,
    Input::CStickY,
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Input {
    A,
    B,
    X,
    Y,
    Z,
    L,
    R,
    AnalogL,
    AnalogR,
    StickX,
    StickY,
    CStickX,
    CStickY,
}

/// Levels at which analog inputs count as asserted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Thresholds {
    /// Analog trigger value, 0 to 255.
    pub analog: u8,
    /// Magnitude on a stick axis, 0 to 128.
    pub stick: i16,
}

impl Default for Thresholds {
    fn default() -> Self {
        Self {
            analog: 43,
            stick: 64,
        }
    }
}

impl Input {
    #[must_use]
    pub fn index(self) -> usize {
        INPUTS
            .iter()
            .position(|i| *i == self)
            .unwrap_or(INPUTS.len() - 1)
    }

    #[must_use]
    pub fn asserted(self, sample: &Sample, thresholds: &Thresholds) -> bool {
        match self {
            Self::A => sample.buttons.contains(Buttons::A),
            Self::B => sample.buttons.contains(Buttons::B),
            Self::X => sample.buttons.contains(Buttons::X),
            Self::Y => sample.buttons.contains(Buttons::Y),
            Self::Z => sample.buttons.contains(Buttons::Z),
            Self::L => sample.buttons.contains(Buttons::L),
            Self::R => sample.buttons.contains(Buttons::R),
            Self::AnalogL => sample.trigger_l >= thresholds.analog,
            Self::AnalogR => sample.trigger_r >= thresholds.analog,
            Self::StickX => abs(sample.stick_x) >= thresholds.stick,
            Self::StickY => abs(sample.stick_y) >= thresholds.stick,
            Self::CStickX => abs(sample.c_stick_x) >= thresholds.stick,
            Self::CStickY => abs(sample.c_stick_y) >= thresholds.stick,
        }
    }
}

/// First asserted input in the priority order, if any.
#[must_use]
pub fn first_asserted(sample: &Sample, thresholds: &Thresholds) -> Option<Input> {
    INPUTS
        .iter()
        .copied()
        .find(|input| input.asserted(sample, thresholds))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn when_inputs_are_indexed_they_follow_priority_order() {
        for (i, input) in INPUTS.iter().enumerate() {
            assert_eq!(input.index(), i);
        }
    }

    #[test]
    fn when_multiple_inputs_are_asserted_the_one_with_priority_wins() {
        let sample = Sample {
            buttons: Buttons::Z,
            stick_x: 100,
            trigger_r: 200,
            ..Sample::default()
        };
        assert_eq!(
            first_asserted(&sample, &Thresholds::default()),
            Some(Input::Z)
        );
    }

    #[test]
    fn when_thresholds_are_raised_weaker_inputs_are_ignored() {
        let sample = Sample {
            stick_y: -70,
            trigger_l: 60,
            ..Sample::default()
        };
        let thresholds = Thresholds {
            analog: 100,
            stick: 80,
        };
        assert_eq!(first_asserted(&sample, &thresholds), None);
        assert_eq!(
            first_asserted(&sample, &Thresholds::default()),
            Some(Input::AnalogL)
        );
    }
}
