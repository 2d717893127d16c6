//! Hold digital presses long enough for a slower consumer to see them.

use crate::sample::Buttons;

/// For how long a press stays asserted after it was first observed.
pub const PRESS_DWELL_US: u32 = 32_000;

/// Latch of digital buttons.
///
/// The capture driver polls the controller much faster than the menu reads
/// it. A press observed only during a single tick would get lost, so every
/// newly pressed button is kept asserted for `PRESS_DWELL_US`.
#[derive(Debug, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Latch {
    previous: Buttons,
    remaining_us: [u32; 16],
}

impl Latch {
    pub fn update(&mut self, buttons: Buttons, elapsed_us: u32) {
        for (bit, remaining) in self.remaining_us.iter_mut().enumerate() {
            let mask = 1 << bit;
            let down = buttons.0 & mask != 0;
            let was_down = self.previous.0 & mask != 0;
            *remaining = if down && !was_down {
                PRESS_DWELL_US
            } else {
                remaining.saturating_sub(elapsed_us)
            };
        }
        self.previous = buttons;
    }

    /// Buttons currently down or pressed within the dwell window.
    #[must_use]
    pub fn pressed(&self) -> Buttons {
        let mut latched = self.previous.0;
        for (bit, remaining) in self.remaining_us.iter().enumerate() {
            if *remaining > 0 {
                latched |= 1 << bit;
            }
        }
        Buttons(latched)
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}
