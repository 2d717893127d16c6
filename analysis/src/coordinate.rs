//! Conversion of raw stick positions to the game's coordinate units.

use stickscope_capture::sample::{Sample, Stick};

/// Raw magnitude at which the game considers the stick fully tilted.
pub const MAX_MAGNITUDE: f32 = 80.0;

/// Size of one raw step in converted units. 10000 stands for 1.0.
pub const UNIT: u16 = 125;

/// A stick position as the game sees it.
///
/// Each axis is kept as an unsigned magnitude in units of 0.0001, always a
/// multiple of `UNIT`, with the sign stored separately.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Coordinate {
    pub x: u16,
    pub y: u16,
    pub x_negative: bool,
    pub y_negative: bool,
}

impl Coordinate {
    /// Convert raw axes, scaling the vector down if it reaches past the
    /// rim.
    #[must_use]
    pub fn from_raw(x: i8, y: i8) -> Self {
        let mut x = f32::from(x);
        let mut y = f32::from(y);

        let magnitude = libm::sqrtf(x * x + y * y);
        if magnitude > MAX_MAGNITUDE {
            let scale = MAX_MAGNITUDE / magnitude;
            x *= scale;
            y *= scale;
        }

        // Casting truncates toward zero.
        let x = x as i16;
        let y = y as i16;

        Self {
            x: x.unsigned_abs() * UNIT,
            y: y.unsigned_abs() * UNIT,
            x_negative: x < 0,
            y_negative: y < 0,
        }
    }

    #[must_use]
    pub fn from_sample(sample: &Sample, stick: Stick) -> Self {
        let (x, y) = sample.stick(stick);
        Self::from_raw(x, y)
    }

    /// Signed values of both axes.
    #[must_use]
    pub fn signed(&self) -> (i16, i16) {
        let sign = |value: u16, negative: bool| {
            let value = value as i16;
            if negative {
                -value
            } else {
                value
            }
        };
        (sign(self.x, self.x_negative), sign(self.y, self.y_negative))
    }

    /// Signed values of both axes, 1.0 being the rim.
    #[must_use]
    pub fn to_f32(&self) -> (f32, f32) {
        let (x, y) = self.signed();
        (f32::from(x) / 10_000.0, f32::from(y) / 10_000.0)
    }
}
