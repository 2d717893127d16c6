//! Pair of recordings, one shown to the consumer while the other is written.

use core::fmt;

use crate::recording::Recording;

/// Two recordings referenced through a swappable index.
///
/// The active recording is read-only to the consumer, the write recording
/// belongs to the capture driver. `flip` exchanges only the index, no sample
/// is ever copied or altered by it.
///
/// Since reading the active recording borrows the whole structure, a
/// consumer holding that reference can never observe the driver writing or
/// flipping. In firmware, the structure is expected to live in a resource
/// shared between the poll interrupt and the render loop, guarded by a
/// critical section.
pub struct DoubleBuffer {
    slots: [Recording; 2],
    active: usize,
}

impl fmt::Debug for DoubleBuffer {
    fn fmt(&self, fmt: &mut fmt::Formatter) -> fmt::Result {
        write!(
            fmt,
            "DoubleBuffer(active: {}, {:?}, write: {:?})",
            self.active,
            self.active(),
            self.write(),
        )
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for DoubleBuffer {
    fn format(&self, fmt: defmt::Formatter) {
        defmt::write!(
            fmt,
            "DoubleBuffer(active: {}, {}, write: {})",
            self.active,
            self.active(),
            self.write(),
        );
    }
}

impl Default for DoubleBuffer {
    fn default() -> Self {
        Self::new()
    }
}

impl DoubleBuffer {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            slots: [Recording::new(), Recording::new()],
            active: 0,
        }
    }

    #[must_use]
    pub fn active(&self) -> &Recording {
        &self.slots[self.active]
    }

    /// Mutable access to the active recording is limited to its export flag.
    pub fn mark_active_exported(&mut self) {
        self.slots[self.active].mark_exported();
    }

    #[must_use]
    pub fn write(&self) -> &Recording {
        &self.slots[1 - self.active]
    }

    pub fn write_mut(&mut self) -> &mut Recording {
        &mut self.slots[1 - self.active]
    }

    pub fn flip(&mut self) {
        self.active = 1 - self.active;
    }
}
