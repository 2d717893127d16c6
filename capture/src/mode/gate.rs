//! Trace the outline of a stick's gate by sweeping it around.

use core::fmt;

use crate::sample::{Sample, Stick};

const BUCKETS: usize = 256;

/// Extremes of the Y axis seen for each X position.
///
/// Gate sweep never produces a recording. It keeps updating the outline for
/// as long as the mode is active, until it gets explicitly cleared.
pub struct Gate {
    stick: Stick,
    min_y: [i8; BUCKETS],
    max_y: [i8; BUCKETS],
    seen: [bool; BUCKETS],
}

impl fmt::Debug for Gate {
    fn fmt(&self, fmt: &mut fmt::Formatter) -> fmt::Result {
        write!(
            fmt,
            "Gate {{ stick: {:?}, coverage: {} }}",
            self.stick,
            self.coverage()
        )
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for Gate {
    fn format(&self, fmt: defmt::Formatter) {
        defmt::write!(
            fmt,
            "Gate {{ stick: {}, coverage: {} }}",
            self.stick,
            self.coverage()
        );
    }
}

fn bucket(x: i8) -> usize {
    usize::from((x as u8) ^ 0x80)
}

impl Gate {
    #[must_use]
    pub fn new(stick: Stick) -> Self {
        Self {
            stick,
            min_y: [0; BUCKETS],
            max_y: [0; BUCKETS],
            seen: [false; BUCKETS],
        }
    }

    pub fn update(&mut self, sample: &Sample) {
        let (x, y) = sample.stick(self.stick);
        let i = bucket(x);
        if self.seen[i] {
            self.min_y[i] = self.min_y[i].min(y);
            self.max_y[i] = self.max_y[i].max(y);
        } else {
            self.min_y[i] = y;
            self.max_y[i] = y;
            self.seen[i] = true;
        }
    }

    /// Lowest and highest Y observed at the given X, if any.
    #[must_use]
    pub fn bucket(&self, x: i8) -> Option<(i8, i8)> {
        let i = bucket(x);
        self.seen[i].then(|| (self.min_y[i], self.max_y[i]))
    }

    /// Number of X positions observed so far.
    #[must_use]
    pub fn coverage(&self) -> usize {
        self.seen.iter().filter(|seen| **seen).count()
    }

    pub fn clear(&mut self) {
        self.seen = [false; BUCKETS];
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(x: i8, y: i8) -> Sample {
        Sample {
            stick_x: x,
            stick_y: y,
            c_stick_x: x.saturating_neg(),
            c_stick_y: y.saturating_neg(),
            ..Sample::default()
        }
    }

    #[test]
    fn when_swept_each_column_keeps_its_extremes() {
        let mut gate = Gate::new(Stick::Main);
        for y in [10, 80, -75, 0] {
            gate.update(&at(-128, y));
            gate.update(&at(127, y));
        }
        assert_eq!(gate.bucket(-128), Some((-75, 80)));
        assert_eq!(gate.bucket(127), Some((-75, 80)));
        assert_eq!(gate.bucket(0), None);
        assert_eq!(gate.coverage(), 2);
    }

    #[test]
    fn when_c_stick_is_selected_main_stick_is_ignored() {
        let mut gate = Gate::new(Stick::C);
        gate.update(&at(40, 50));
        assert_eq!(gate.bucket(40), None);
        assert_eq!(gate.bucket(-40), Some((-50, -50)));
    }

    #[test]
    fn when_cleared_nothing_is_covered() {
        let mut gate = Gate::new(Stick::Main);
        gate.update(&at(1, 1));
        gate.clear();
        assert_eq!(gate.coverage(), 0);
        assert_eq!(gate.bucket(1), None);

        gate.update(&at(1, -3));
        assert_eq!(gate.bucket(1), Some((-3, -3)));
    }
}
