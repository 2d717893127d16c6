//! Record the travel of an analog trigger after it gets pressed.

use super::{Machine, Progress};
use crate::history::History;
use crate::recording::{Full, Kind, Recording, SHORT_CAPACITY};
use crate::sample::{Sample, Side};

/// Shortest context recorded before the press.
pub const LEAD_IN_MIN_US: u32 = 20_000;

/// Longest context recorded before the press.
pub const LEAD_IN_MAX_US: u32 = 50_000;

const HISTORY: usize = 128;

#[derive(Debug)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub(crate) struct Trigger {
    history: History<HISTORY>,
    side: Side,
}

impl Trigger {
    pub fn new() -> Self {
        Self {
            history: History::new(),
            side: Side::L,
        }
    }
}

impl Machine for Trigger {
    fn observe(&mut self, sample: &Sample) -> bool {
        self.history.write(*sample);

        // Left trigger wins when both get pressed within the same tick.
        let pressed = [Side::L, Side::R]
            .into_iter()
            .find(|side| sample.trigger_pressed(*side));
        match pressed {
            Some(side) => {
                self.side = side;
                true
            }
            None => false,
        }
    }

    fn start(&mut self, recording: &mut Recording) -> Result<(), Full> {
        let count = self.history.lead_in(LEAD_IN_MIN_US, LEAD_IN_MAX_US);
        self.history.prepend_to(count, recording)
    }

    fn capture(&mut self, sample: &Sample, recording: &mut Recording) -> Progress {
        // The recording is over once the buffer fills up.
        recording.push(*sample).into()
    }

    fn finish(&mut self, recording: &mut Recording) {
        let kind = match self.side {
            Side::L => Kind::TriggerL,
            Side::R => Kind::TriggerR,
        };
        recording.finish(kind);
    }

    fn neutral(&self, sample: &Sample) -> bool {
        !sample.trigger_pressed(Side::L) && !sample.trigger_pressed(Side::R)
    }

    fn limit(&self) -> usize {
        SHORT_CAPACITY
    }

    fn reset(&mut self) {
        self.history.reset();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sample::Buttons;

    fn trigger(l: u8, r: u8, delta_us: u32) -> Sample {
        Sample {
            trigger_l: l,
            trigger_r: r,
            delta_us,
            ..Sample::default()
        }
    }

    #[test]
    fn when_analog_crosses_threshold_it_triggers() {
        let mut machine = Trigger::new();
        assert!(!machine.observe(&trigger(0, 42, 1_000)));
        assert!(machine.observe(&trigger(0, 43, 1_000)));
        assert_eq!(machine.side, Side::R);
    }

    #[test]
    fn when_digital_flag_is_set_it_triggers_without_analog() {
        let mut machine = Trigger::new();
        let sample = Sample {
            buttons: Buttons::L,
            ..trigger(0, 0, 1_000)
        };
        assert!(machine.observe(&sample));
        assert_eq!(machine.side, Side::L);
    }

    #[test]
    fn when_both_are_pressed_left_one_is_recorded() {
        let mut machine = Trigger::new();
        assert!(machine.observe(&trigger(100, 100, 1_000)));
        let mut recording = Recording::new();
        machine.start(&mut recording).unwrap();
        machine.finish(&mut recording);
        assert_eq!(recording.kind(), Kind::TriggerL);
    }

    #[test]
    fn when_started_it_prepends_lead_in_history() {
        let mut machine = Trigger::new();
        for _ in 0..30 {
            machine.observe(&trigger(0, 0, 4_000));
        }
        assert!(machine.observe(&trigger(80, 0, 4_000)));

        let mut recording = Recording::new();
        recording.clear(machine.limit());
        machine.start(&mut recording).unwrap();

        assert_eq!(recording.len(), 6);
        assert_eq!(recording.total_us(), 20_000);
        assert_eq!(recording.samples().last().unwrap().trigger_l, 80);
    }

    #[test]
    fn when_triggers_are_released_it_is_neutral() {
        let machine = Trigger::new();
        assert!(machine.neutral(&trigger(42, 10, 0)));
        assert!(!machine.neutral(&trigger(0, 43, 0)));
    }
}
