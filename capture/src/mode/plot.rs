//! Record a free-form 2D path of a stick until it comes to rest.

use super::{Machine, Progress};
use crate::config::PlotArming;
use crate::history::History;
use crate::recording::{Full, Kind, Recording, CAPACITY};
use crate::sample::{abs, Buttons, Sample, Stick, STICK_DEADZONE};

/// How far from its resting position must the stick move to start a plot.
pub const NEIGHBOURHOOD: i16 = 10;

/// Movement on either axis smaller than this counts as standing still.
pub const STILLNESS: i16 = 2;

/// For how long must the input stand still to end the plot.
pub const STILL_US: u32 = 250_000;

const HISTORY: usize = 10;

/// Last sample where the input moved.
#[derive(Debug, Default, Clone, Copy)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
struct Anchor {
    index: usize,
    x: i8,
    y: i8,
    buttons: Buttons,
}

#[derive(Debug)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub(crate) struct Plot {
    arming: PlotArming,
    stick: Stick,
    history: History<HISTORY>,
    rest: Option<(i8, i8)>,
    anchor: Anchor,
    still_us: u32,
}

impl Plot {
    pub fn new(arming: PlotArming, stick: Stick) -> Self {
        Self {
            arming,
            stick,
            history: History::new(),
            rest: None,
            anchor: Anchor::default(),
            still_us: 0,
        }
    }

    fn move_anchor(&mut self, sample: &Sample, index: usize) {
        let (x, y) = sample.stick(self.stick);
        self.anchor = Anchor {
            index,
            x,
            y,
            buttons: sample.buttons,
        };
        self.still_us = 0;
    }
}

fn distance(a: i8, b: i8) -> i16 {
    (i16::from(a) - i16::from(b)).abs()
}

impl Machine for Plot {
    fn observe(&mut self, sample: &Sample) -> bool {
        self.history.write(*sample);

        match self.arming {
            PlotArming::Button => sample.buttons.any(),
            PlotArming::Movement => {
                let (x, y) = sample.stick(self.stick);
                match self.rest {
                    None => {
                        self.rest = Some((x, y));
                        false
                    }
                    Some((rest_x, rest_y)) => {
                        distance(x, rest_x) > NEIGHBOURHOOD || distance(y, rest_y) > NEIGHBOURHOOD
                    }
                }
            }
        }
    }

    fn start(&mut self, recording: &mut Recording) -> Result<(), Full> {
        self.history.prepend_to(self.history.len(), recording)?;
        if let Some(last) = recording.samples().last().copied() {
            self.move_anchor(&last, recording.len() - 1);
        }
        Ok(())
    }

    fn capture(&mut self, sample: &Sample, recording: &mut Recording) -> Progress {
        if recording.push(*sample).is_err() {
            return Progress::Full;
        }

        let (x, y) = sample.stick(self.stick);
        let moved = distance(x, self.anchor.x) >= STILLNESS
            || distance(y, self.anchor.y) >= STILLNESS
            || sample.buttons != self.anchor.buttons;

        if moved {
            self.move_anchor(sample, recording.len() - 1);
            return Progress::Continue;
        }

        self.still_us = self.still_us.saturating_add(sample.delta_us);
        if self.still_us >= STILL_US {
            Progress::Complete
        } else {
            Progress::Continue
        }
    }

    fn finish(&mut self, recording: &mut Recording) {
        if self.still_us >= STILL_US {
            recording.retain(0..self.anchor.index + 1);
        }
        recording.finish(Kind::Plot);
    }

    fn neutral(&self, sample: &Sample) -> bool {
        match self.arming {
            PlotArming::Button => !sample.buttons.any(),
            PlotArming::Movement => {
                let (x, y) = sample.stick(self.stick);
                abs(x) < STICK_DEADZONE && abs(y) < STICK_DEADZONE
            }
        }
    }

    fn limit(&self) -> usize {
        CAPACITY
    }

    fn reset(&mut self) {
        self.history.reset();
        self.rest = None;
        self.anchor = Anchor::default();
        self.still_us = 0;
    }
}
