//! Record a fixed window of all inputs after any of them gets asserted.

use super::{Machine, Progress};
use crate::input::{first_asserted, Input, Thresholds};
use crate::recording::{Full, Kind, Recording, CAPACITY};
use crate::sample::Sample;

/// Length of the recorded window.
pub const WINDOW_US: u32 = 200_000;

#[derive(Debug)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub(crate) struct ButtonTiming {
    thresholds: Thresholds,
    primed: bool,
    input: Input,
    last: Sample,
}

impl ButtonTiming {
    pub fn new(thresholds: Thresholds) -> Self {
        Self {
            thresholds,
            primed: false,
            input: Input::A,
            last: Sample::default(),
        }
    }
}

impl Machine for ButtonTiming {
    fn observe(&mut self, sample: &Sample) -> bool {
        self.last = *sample;

        // All inputs must be released before a capture may be armed, so a
        // button held through the end of the previous one does not restart.
        match first_asserted(sample, &self.thresholds) {
            None => {
                self.primed = true;
                false
            }
            Some(input) if self.primed => {
                self.input = input;
                true
            }
            Some(_) => false,
        }
    }

    fn start(&mut self, recording: &mut Recording) -> Result<(), Full> {
        recording.push(self.last)
    }

    fn capture(&mut self, sample: &Sample, recording: &mut Recording) -> Progress {
        if recording.push(*sample).is_err() {
            return Progress::Full;
        }
        if recording.total_us() >= WINDOW_US {
            Progress::Complete
        } else {
            Progress::Continue
        }
    }

    fn finish(&mut self, recording: &mut Recording) {
        recording.finish(Kind::ButtonTiming(self.input));
    }

    fn neutral(&self, sample: &Sample) -> bool {
        first_asserted(sample, &self.thresholds).is_none()
    }

    fn limit(&self) -> usize {
        CAPACITY
    }

    fn locks(&self) -> bool {
        false
    }

    fn reset(&mut self) {
        self.primed = false;
    }
}
