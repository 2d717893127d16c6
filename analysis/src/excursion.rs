//! Extremes reached by the stick, used to judge snapback.

use stickscope_capture::recording::{Kind, Recording};
use stickscope_capture::sample::{abs, Axis};

use crate::NoData;

/// The lowest and highest value observed on an axis.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Extremes {
    pub min: i8,
    pub max: i8,
}

impl Extremes {
    /// The larger of the two magnitudes.
    #[must_use]
    pub fn peak(&self) -> i16 {
        abs(self.min).max(abs(self.max))
    }

    fn peak_positive(&self) -> bool {
        abs(self.max) >= abs(self.min)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Excursion {
    pub x: Extremes,
    pub y: Extremes,
    /// The axis with the larger peak, X on a tie.
    pub axis: Axis,
    /// How far the triggering axis went past the origin, opposite to its
    /// peak.
    pub snapback: i16,
}

impl Excursion {
    #[must_use]
    pub fn extremes(&self, axis: Axis) -> Extremes {
        match axis {
            Axis::X => self.x,
            Axis::Y => self.y,
        }
    }
}

/// Scan an oscilloscope recording for extremes of both main stick axes.
///
/// # Errors
///
/// Fails when the recording is not ready, is empty, or is not an
/// oscilloscope recording.
pub fn analyze(recording: &Recording) -> Result<Excursion, NoData> {
    let samples = crate::samples(recording, |kind| matches!(kind, Kind::Oscilloscope(_)))?;

    let first = samples[0];
    let mut x = Extremes {
        min: first.stick_x,
        max: first.stick_x,
    };
    let mut y = Extremes {
        min: first.stick_y,
        max: first.stick_y,
    };
    for sample in samples {
        x.min = x.min.min(sample.stick_x);
        x.max = x.max.max(sample.stick_x);
        y.min = y.min.min(sample.stick_y);
        y.max = y.max.max(sample.stick_y);
    }

    let (axis, extremes) = if y.peak() > x.peak() {
        (Axis::Y, y)
    } else {
        (Axis::X, x)
    };
    let snapback = if extremes.peak_positive() {
        -i16::from(extremes.min)
    } else {
        i16::from(extremes.max)
    }
    .max(0);

    Ok(Excursion {
        x,
        y,
        axis,
        snapback,
    })
}
