//! Short rolling history of samples observed while a capture is armed.

use crate::recording::{Full, Recording};
use crate::sample::Sample;

/// Ring buffer keeping the last `N` samples.
///
/// Once a capture gets triggered, part of the history is prepended to the
/// recording so it shows what happened right before the trigger.
#[derive(Debug)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct History<const N: usize> {
    buffer: [Sample; N],
    pointer: usize,
    len: usize,
}

impl<const N: usize> Default for History<N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const N: usize> History<N> {
    #[must_use]
    pub fn new() -> Self {
        Self {
            buffer: [Sample::default(); N],
            pointer: 0,
            len: 0,
        }
    }

    pub fn write(&mut self, sample: Sample) {
        self.buffer[self.pointer] = sample;
        self.pointer = (self.pointer + 1) % N;
        self.len = (self.len + 1).min(N);
    }

    pub fn reset(&mut self) {
        self.pointer = 0;
        self.len = 0;
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.len
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Sample written `age` writes ago, 0 being the newest.
    #[must_use]
    pub fn peek(&self, age: usize) -> Option<&Sample> {
        if age >= self.len {
            return None;
        }
        let index = (self.pointer + N - 1 - age) % N;
        Some(&self.buffer[index])
    }

    /// Number of newest samples spanning at least `min_us` before the newest
    /// one, without reaching further than `max_us`.
    ///
    /// The newest sample itself is always included. If the history is too
    /// short to cover `min_us`, all of it is used.
    #[must_use]
    pub fn lead_in(&self, min_us: u32, max_us: u32) -> usize {
        let mut count = 1;
        let mut span_us: u32 = 0;
        while count < self.len && span_us < min_us {
            // Delta of the sample after the candidate is the time between them.
            let Some(after) = self.peek(count - 1) else {
                break;
            };
            let span_with_candidate = span_us.saturating_add(after.delta_us);
            if span_with_candidate > max_us {
                break;
            }
            span_us = span_with_candidate;
            count += 1;
        }
        count.min(self.len)
    }

    /// Copy the `count` newest samples into the recording, oldest first.
    ///
    /// # Errors
    ///
    /// Fails with `Full` if the recording cannot take all of them.
    pub fn prepend_to(&self, count: usize, recording: &mut Recording) -> Result<(), Full> {
        let count = count.min(self.len);
        for age in (0..count).rev() {
            if let Some(sample) = self.peek(age) {
                recording.push(*sample)?;
            }
        }
        Ok(())
    }
}
