//! Record a dash turnaround, either a pivot or a dashback.

use super::{Machine, Progress, ORIGIN_DWELL_US};
use crate::history::History;
use crate::recording::{Full, Kind, Recording, Test, CAPACITY, SHORT_CAPACITY};
use crate::reversal;
use crate::sample::Sample;

/// Longest gap between two opposite dashes that still makes a pivot.
pub const PIVOT_WINDOW_US: u32 = 50_000;

const HISTORY: usize = 20;

#[derive(Debug)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub(crate) struct Turn {
    test: Test,
    history: History<HISTORY>,
    dwell_us: u32,
}

impl Turn {
    pub fn new(test: Test) -> Self {
        Self {
            test,
            history: History::new(),
            dwell_us: 0,
        }
    }
}

impl Machine for Turn {
    fn observe(&mut self, sample: &Sample) -> bool {
        self.history.write(*sample);
        !sample.stick_in_deadzone()
    }

    fn start(&mut self, recording: &mut Recording) -> Result<(), Full> {
        self.dwell_us = 0;
        self.history.prepend_to(self.history.len(), recording)
    }

    fn capture(&mut self, sample: &Sample, recording: &mut Recording) -> Progress {
        if recording.push(*sample).is_err() {
            return Progress::Full;
        }

        if sample.stick_in_deadzone() {
            self.dwell_us = self.dwell_us.saturating_add(sample.delta_us);
            if self.dwell_us >= ORIGIN_DWELL_US {
                return Progress::Complete;
            }
        } else {
            self.dwell_us = 0;
        }

        Progress::Continue
    }

    fn finish(&mut self, recording: &mut Recording) {
        if self.test == Test::Pivot {
            let found = reversal::find_reversal(recording.samples(), |samples, reversal| {
                reversal.gap_us(samples) <= PIVOT_WINDOW_US
            });
            if let Some(found) = found {
                recording.retain(found.first.start..recording.len());
            }
        }
        recording.finish(Kind::Oscilloscope(self.test));
    }

    fn neutral(&self, sample: &Sample) -> bool {
        sample.stick_in_deadzone()
    }

    fn limit(&self) -> usize {
        match self.test {
            Test::Dashback => SHORT_CAPACITY,
            _ => CAPACITY,
        }
    }

    fn reset(&mut self) {
        self.history.reset();
        self.dwell_us = 0;
    }
}
