//! Structures used to pass the state of the controller around.

/// Magnitude on any stick axis that counts as a dash.
pub const DASH_THRESHOLD: i16 = 64;

/// Magnitude on both stick axes under which the stick is considered resting.
pub const STICK_DEADZONE: i16 = 15;

/// Analog trigger value at which a trigger press is recognized.
pub const TRIGGER_THRESHOLD: u8 = 43;

/// The current state of all controller inputs.
///
/// `Snapshot` is meant to be passed from the hardware binding to the capture
/// driver. It should pass pretty raw data, with the only exception that stick
/// axes are already centered on their origin.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Snapshot {
    pub stick_x: i8,
    pub stick_y: i8,
    pub c_stick_x: i8,
    pub c_stick_y: i8,
    pub trigger_l: u8,
    pub trigger_r: u8,
    pub buttons: Buttons,
    pub connected: bool,
}

/// One poll worth of device state, as stored in a recording.
///
/// `delta_us` is the time elapsed since the previous sample of the same
/// recording. It is always 0 for the first sample.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Sample {
    pub stick_x: i8,
    pub stick_y: i8,
    pub c_stick_x: i8,
    pub c_stick_y: i8,
    pub trigger_l: u8,
    pub trigger_r: u8,
    pub buttons: Buttons,
    pub delta_us: u32,
}

/// Digital buttons bitmask.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Buttons(pub u16);

impl Buttons {
    pub const NONE: Self = Self(0);
    pub const A: Self = Self(1 << 0);
    pub const B: Self = Self(1 << 1);
    pub const X: Self = Self(1 << 2);
    pub const Y: Self = Self(1 << 3);
    pub const Z: Self = Self(1 << 4);
    pub const L: Self = Self(1 << 5);
    pub const R: Self = Self(1 << 6);
    pub const START: Self = Self(1 << 7);
    pub const DPAD_UP: Self = Self(1 << 8);
    pub const DPAD_DOWN: Self = Self(1 << 9);
    pub const DPAD_LEFT: Self = Self(1 << 10);
    pub const DPAD_RIGHT: Self = Self(1 << 11);

    #[must_use]
    pub fn contains(self, other: Self) -> bool {
        self.0 & other.0 == other.0 && other.0 != 0
    }

    #[must_use]
    pub fn any(self) -> bool {
        self.0 != 0
    }

    #[must_use]
    pub fn union(self, other: Self) -> Self {
        Self(self.0 | other.0)
    }
}

/// Selection of one of the two analog sticks.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Stick {
    #[default]
    Main,
    C,
}

/// One of the two axes of a stick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Axis {
    X,
    Y,
}

/// Selection of one of the two analog triggers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Side {
    L,
    R,
}

impl Sample {
    #[must_use]
    pub fn new(snapshot: Snapshot, delta_us: u32) -> Self {
        Self {
            stick_x: snapshot.stick_x,
            stick_y: snapshot.stick_y,
            c_stick_x: snapshot.c_stick_x,
            c_stick_y: snapshot.c_stick_y,
            trigger_l: snapshot.trigger_l,
            trigger_r: snapshot.trigger_r,
            buttons: snapshot.buttons,
            delta_us,
        }
    }

    #[must_use]
    pub fn stick(&self, stick: Stick) -> (i8, i8) {
        match stick {
            Stick::Main => (self.stick_x, self.stick_y),
            Stick::C => (self.c_stick_x, self.c_stick_y),
        }
    }

    /// Value of the main stick on the given axis.
    #[must_use]
    pub fn axis(&self, axis: Axis) -> i8 {
        match axis {
            Axis::X => self.stick_x,
            Axis::Y => self.stick_y,
        }
    }

    /// Absolute value of the main stick's larger axis.
    #[must_use]
    pub fn stick_magnitude(&self) -> i16 {
        abs(self.stick_x).max(abs(self.stick_y))
    }

    #[must_use]
    pub fn stick_in_deadzone(&self) -> bool {
        abs(self.stick_x) < STICK_DEADZONE && abs(self.stick_y) < STICK_DEADZONE
    }

    #[must_use]
    pub fn trigger(&self, side: Side) -> u8 {
        match side {
            Side::L => self.trigger_l,
            Side::R => self.trigger_r,
        }
    }

    #[must_use]
    pub fn trigger_digital(&self, side: Side) -> bool {
        match side {
            Side::L => self.buttons.contains(Buttons::L),
            Side::R => self.buttons.contains(Buttons::R),
        }
    }

    #[must_use]
    pub fn trigger_pressed(&self, side: Side) -> bool {
        self.trigger(side) >= TRIGGER_THRESHOLD || self.trigger_digital(side)
    }
}

/// Absolute value of an axis, widened so that `i8::MIN` does not overflow.
#[must_use]
pub fn abs(value: i8) -> i16 {
    i16::from(value).abs()
}
