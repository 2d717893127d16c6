//! Measure time elapsed between driver ticks.

/// Longest gap between two ticks that is still taken as real.
///
/// Polling happens at least twice per frame. Anything longer than a few
/// frames means the driver was paused or the clock jumped.
pub const MAX_TICK_US: u64 = 100_000;

/// Keeps the timestamp of the previous tick.
#[derive(Debug, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Stopwatch {
    previous_us: Option<u64>,
}

impl Stopwatch {
    /// Microseconds since the previous call.
    ///
    /// The first call after a reset returns 0. So does a clock going
    /// backwards or a gap longer than `MAX_TICK_US`.
    pub fn lap(&mut self, now_us: u64) -> u32 {
        let elapsed = match self.previous_us {
            Some(previous_us) => match now_us.checked_sub(previous_us) {
                Some(delta) if delta <= MAX_TICK_US => delta as u32,
                _ => {
                    crate::log::warning!("Discarding implausible tick delta");
                    0
                }
            },
            None => 0,
        };
        self.previous_us = Some(now_us);
        elapsed
    }

    pub fn reset(&mut self) {
        self.previous_us = None;
    }
}
