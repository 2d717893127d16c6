//! Averages over repeated attempts of the same test.

/// Running sums of `N` percentages over a series of attempts.
///
/// Use `Tally<3>` for pivot and powershield results and `Tally<2>` for
/// dashback.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Tally<const N: usize> {
    sums: [f32; N],
    attempts: u32,
}

impl<const N: usize> Default for Tally<N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const N: usize> Tally<N> {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            sums: [0.0; N],
            attempts: 0,
        }
    }

    pub fn add(&mut self, percentages: [f32; N]) {
        for (sum, value) in self.sums.iter_mut().zip(percentages) {
            *sum += value;
        }
        self.attempts = self.attempts.saturating_add(1);
    }

    #[must_use]
    pub fn attempts(&self) -> u32 {
        self.attempts
    }

    /// Mean of each percentage, `None` before the first attempt.
    #[must_use]
    pub fn mean(&self) -> Option<[f32; N]> {
        if self.attempts == 0 {
            return None;
        }
        let attempts = self.attempts as f32;
        Some(self.sums.map(|sum| sum / attempts))
    }

    pub fn reset(&mut self) {
        *self = Self::new();
    }
}
