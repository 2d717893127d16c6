//! Record the stick springing back to its origin after being released.

use super::{Machine, Progress, ORIGIN_DWELL_US};
use crate::history::History;
use crate::recording::{Full, Kind, Recording, Test, CAPACITY};
use crate::sample::{abs, Axis, Sample, DASH_THRESHOLD};

/// How far under the dash threshold the held axis must drop to count as
/// released.
const RELEASE_MARGIN: i16 = 10;

const HISTORY: usize = 200;

#[derive(Debug)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub(crate) struct Snapback {
    history: History<HISTORY>,
    held: Option<(Axis, bool)>,
    dwell_us: u32,
}

impl Snapback {
    pub fn new() -> Self {
        Self {
            history: History::new(),
            held: None,
            dwell_us: 0,
        }
    }

    /// Axis pushed past the dash threshold and its direction, if any.
    fn beyond_threshold(sample: &Sample) -> Option<(Axis, bool)> {
        let axis = if abs(sample.stick_y) > abs(sample.stick_x) {
            Axis::Y
        } else {
            Axis::X
        };
        let value = sample.axis(axis);
        (abs(value) >= DASH_THRESHOLD).then_some((axis, value > 0))
    }
}

impl Machine for Snapback {
    fn observe(&mut self, sample: &Sample) -> bool {
        self.history.write(*sample);

        if let Some(held) = Self::beyond_threshold(sample) {
            self.held = Some(held);
            return false;
        }

        match self.held {
            Some((axis, _)) => abs(sample.axis(axis)) <= DASH_THRESHOLD - RELEASE_MARGIN,
            None => false,
        }
    }

    fn start(&mut self, recording: &mut Recording) -> Result<(), Full> {
        self.dwell_us = 0;
        self.history.prepend_to(self.history.len(), recording)
    }

    fn capture(&mut self, sample: &Sample, recording: &mut Recording) -> Progress {
        self.history.write(*sample);

        if let Some(pushed) = Self::beyond_threshold(sample) {
            if Some(pushed) == self.held {
                return Progress::Restart;
            }
        }

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
        recording.finish(Kind::Oscilloscope(Test::Snapback));
    }

    fn neutral(&self, sample: &Sample) -> bool {
        sample.stick_in_deadzone()
    }

    fn limit(&self) -> usize {
        CAPACITY
    }

    fn reset(&mut self) {
        self.history.reset();
        self.held = None;
        self.dwell_us = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mode::tests::stick;

    fn arm(snapback: &mut Snapback, samples: &[Sample]) -> Option<usize> {
        samples.iter().position(|s| snapback.observe(s))
    }

    #[test]
    fn when_held_stick_is_released_it_triggers() {
        let mut snapback = Snapback::new();
        let samples = [
            stick(0, 0, 1_000),
            stick(90, 0, 1_000),
            stick(60, 0, 1_000),
            stick(50, 0, 1_000),
        ];
        assert_eq!(arm(&mut snapback, &samples), Some(3));
    }

    #[test]
    fn when_stick_was_never_past_threshold_it_does_not_trigger() {
        let mut snapback = Snapback::new();
        let samples = [stick(0, 0, 1_000), stick(60, 0, 1_000), stick(0, 0, 1_000)];
        assert_eq!(arm(&mut snapback, &samples), None);
    }

    #[test]
    fn when_started_it_prepends_whole_history() {
        let mut snapback = Snapback::new();
        let samples = [stick(0, 0, 1_000), stick(-100, 0, 1_000), stick(0, 0, 1_000)];
        assert_eq!(arm(&mut snapback, &samples), Some(2));

        let mut recording = Recording::new();
        snapback.start(&mut recording).unwrap();
        assert_eq!(recording.len(), 3);
        assert_eq!(recording.samples()[1].stick_x, -100);
    }

    #[test]
    fn when_stick_rests_long_enough_capture_completes() {
        let mut snapback = Snapback::new();
        arm(&mut snapback, &[stick(90, 0, 0), stick(0, 0, 5_000)]);
        let mut recording = Recording::new();
        snapback.start(&mut recording).unwrap();

        for _ in 0..4 {
            assert_eq!(
                snapback.capture(&stick(0, 0, 5_000), &mut recording),
                Progress::Continue
            );
        }
        assert_eq!(
            snapback.capture(&stick(0, 0, 5_000), &mut recording),
            Progress::Complete
        );
    }

    #[test]
    fn when_stick_overshoots_dwell_starts_over() {
        let mut snapback = Snapback::new();
        arm(&mut snapback, &[stick(90, 0, 0), stick(0, 0, 5_000)]);
        let mut recording = Recording::new();
        snapback.start(&mut recording).unwrap();

        for _ in 0..4 {
            snapback.capture(&stick(0, 0, 5_000), &mut recording);
        }
        assert_eq!(
            snapback.capture(&stick(-30, 0, 5_000), &mut recording),
            Progress::Continue
        );
        assert_eq!(
            snapback.capture(&stick(0, 0, 5_000), &mut recording),
            Progress::Continue
        );
    }

    #[test]
    fn when_stick_is_pushed_again_capture_restarts() {
        let mut snapback = Snapback::new();
        arm(&mut snapback, &[stick(0, 80, 0), stick(0, 10, 1_000)]);
        let mut recording = Recording::new();
        snapback.start(&mut recording).unwrap();

        assert_eq!(
            snapback.capture(&stick(0, -70, 1_000), &mut recording),
            Progress::Continue
        );
        assert_eq!(
            snapback.capture(&stick(0, 75, 1_000), &mut recording),
            Progress::Restart
        );
    }
}
