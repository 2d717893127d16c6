//! Regions of the stick range the game treats specially.

use crate::coordinate::{Coordinate, UNIT};
use stickscope_capture::sample::{DASH_THRESHOLD, STICK_DEADZONE};

/// Lowest converted X that leaves the deadzone of a turn.
pub const SLOW_TURN_START: u16 = 23 * UNIT;

/// Lowest converted X that makes a dash.
pub const DASH_START: u16 = DASH_THRESHOLD as u16 * UNIT;

/// How the game interprets a horizontal position of the stick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Zone {
    Deadzone,
    /// Turns the character around without dashing.
    SlowTurn,
    Dash,
}

impl Zone {
    #[must_use]
    pub fn of(coordinate: &Coordinate) -> Self {
        if coordinate.x >= DASH_START {
            Self::Dash
        } else if coordinate.x >= SLOW_TURN_START {
            Self::SlowTurn
        } else {
            Self::Deadzone
        }
    }
}

/// Whether the coordinate lies within the resting zone used by captures.
#[must_use]
pub fn in_capture_deadzone(coordinate: &Coordinate) -> bool {
    let limit = STICK_DEADZONE as u16 * UNIT;
    coordinate.x < limit && coordinate.y < limit
}

/// A set of exact coordinates to aim the stick at.
///
/// Targets are stored for the first quadrant only, membership ignores
/// signs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Stickmap {
    name: &'static str,
    targets: &'static [(u16, u16)],
}

impl Stickmap {
    #[must_use]
    pub const fn new(name: &'static str, targets: &'static [(u16, u16)]) -> Self {
        Self { name, targets }
    }

    #[must_use]
    pub fn name(&self) -> &'static str {
        self.name
    }

    #[must_use]
    pub fn targets(&self) -> &'static [(u16, u16)] {
        self.targets
    }

    #[must_use]
    pub fn contains(&self, coordinate: &Coordinate) -> bool {
        self.targets
            .iter()
            .any(|(x, y)| *x == coordinate.x && *y == coordinate.y)
    }
}

/// Notable angles of recovery moves, from shallow to steep.
pub const UP_B_ANGLES: Stickmap = Stickmap::new(
    "Up-B angles",
    &[
        (9375, 3125),
        (8875, 4500),
        (8500, 5250),
        (7375, 6750),
        (6750, 7375),
        (5250, 8500),
        (4500, 8875),
        (3125, 9375),
    ],
);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn when_stick_crosses_turn_thresholds_zone_changes() {
        assert_eq!(Zone::of(&Coordinate::from_raw(22, 0)), Zone::Deadzone);
        assert_eq!(Zone::of(&Coordinate::from_raw(-23, 0)), Zone::SlowTurn);
        assert_eq!(Zone::of(&Coordinate::from_raw(63, 0)), Zone::SlowTurn);
        assert_eq!(Zone::of(&Coordinate::from_raw(-64, 0)), Zone::Dash);
    }

    #[test]
    fn when_coordinate_is_on_target_it_is_contained_regardless_of_sign() {
        assert!(UP_B_ANGLES.contains(&Coordinate::from_raw(75, 25)));
        assert!(UP_B_ANGLES.contains(&Coordinate::from_raw(-75, -25)));
        assert!(UP_B_ANGLES.contains(&Coordinate::from_raw(-25, 75)));
        assert!(!UP_B_ANGLES.contains(&Coordinate::from_raw(75, 26)));
    }

    #[test]
    fn when_targets_are_listed_each_of_them_is_reachable() {
        for (x, y) in UP_B_ANGLES.targets() {
            let raw_x = (x / UNIT) as i8;
            let raw_y = (y / UNIT) as i8;
            assert!(UP_B_ANGLES.contains(&Coordinate::from_raw(raw_x, raw_y)));
        }
    }

    #[test]
    fn when_stick_rests_it_is_in_capture_deadzone() {
        assert!(in_capture_deadzone(&Coordinate::from_raw(14, -14)));
        assert!(!in_capture_deadzone(&Coordinate::from_raw(0, 15)));
    }
}
