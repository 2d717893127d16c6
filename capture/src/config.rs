//! User-selected tweaks of capture modes.

use crate::input::Thresholds;
use crate::sample::Stick;

/// Adjustments of the default mode behavior.
///
/// These are picked by the user in the menu before a mode is set up. They
/// stay constant for the whole time the mode is active.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Config {
    pub plot_arming: PlotArming,
    pub plot_stick: Stick,
    pub gate_stick: Stick,
    pub thresholds: Thresholds,
}

/// What starts a 2D plot recording.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PlotArming {
    /// The stick leaves the neighbourhood of where it rested.
    #[default]
    Movement,
    /// Any digital button gets pressed.
    Button,
}
