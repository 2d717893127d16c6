//! Append-only store of samples captured during a single gesture.

use core::fmt;
use core::ops::Range;

use heapless::Vec;

use crate::input::Input;
use crate::sample::Sample;

/// Capacity of stick, plot and button recordings.
pub const CAPACITY: usize = 3000;

/// Capacity of trigger and dashback recordings.
pub const SHORT_CAPACITY: usize = 500;

/// Which capture produced the recording.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Kind {
    #[default]
    Cleared,
    Oscilloscope(Test),
    TriggerL,
    TriggerR,
    Plot,
    ButtonTiming(Input),
}

/// The gesture an oscilloscope recording was made for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Test {
    Snapback,
    Pivot,
    Dashback,
}

/// Returned when a sample does not fit into the recording anymore.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Full;

/// Timestamped samples of one capture with its metadata.
///
/// While `ready` is false, only the capture driver may write into it. Once
/// it is finished, the recording stays untouched until it gets cleared for
/// the next capture.
pub struct Recording {
    samples: Vec<Sample, CAPACITY>,
    limit: usize,
    total_us: u32,
    kind: Kind,
    ready: bool,
    exported: bool,
}

impl fmt::Debug for Recording {
    fn fmt(&self, fmt: &mut fmt::Formatter) -> fmt::Result {
        write!(
            fmt,
            "Recording(kind: {:?}, len: {}, total_us: {}, ready: {})",
            self.kind,
            self.samples.len(),
            self.total_us,
            self.ready,
        )
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for Recording {
    fn format(&self, fmt: defmt::Formatter) {
        defmt::write!(
            fmt,
            "Recording(kind: {}, len: {}, total_us: {}, ready: {})",
            self.kind,
            self.samples.len(),
            self.total_us,
            self.ready,
        );
    }
}

impl Default for Recording {
    fn default() -> Self {
        Self::new()
    }
}

impl Recording {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            samples: Vec::new(),
            limit: CAPACITY,
            total_us: 0,
            kind: Kind::Cleared,
            ready: false,
            exported: false,
        }
    }

    /// Reset the recording for a new capture holding up to `limit` samples.
    ///
    /// Samples are dropped, not zeroed. The limit is capped by `CAPACITY`.
    pub fn clear(&mut self, limit: usize) {
        self.samples.clear();
        self.limit = limit.min(CAPACITY);
        self.total_us = 0;
        self.kind = Kind::Cleared;
        self.ready = false;
        self.exported = false;
    }

    /// Append a sample.
    ///
    /// The first sample of a recording gets its delta reset to 0.
    ///
    /// # Errors
    ///
    /// Fails with `Full` when the recording reached its limit, or when it was
    /// already finished.
    pub fn push(&mut self, mut sample: Sample) -> Result<(), Full> {
        if self.ready || self.is_full() {
            return Err(Full);
        }
        if self.samples.is_empty() {
            sample.delta_us = 0;
        }
        self.samples.push(sample).map_err(|_| Full)?;
        self.total_us = self.total_us.saturating_add(sample.delta_us);
        Ok(())
    }

    /// Mark the capture as complete and valid.
    pub fn finish(&mut self, kind: Kind) {
        self.kind = kind;
        self.ready = true;
    }

    /// Keep only samples within the given range.
    ///
    /// A new sample vector is built from the range rather than shifting the
    /// samples in place. Totals are recalculated and the first kept sample
    /// gets its delta reset. Ranges reaching outside of the recording are
    /// clipped. Finished recordings are left untouched.
    pub fn retain(&mut self, range: Range<usize>) {
        if self.ready {
            return;
        }

        let end = range.end.min(self.samples.len());
        let start = range.start.min(end);

        let mut trimmed: Vec<Sample, CAPACITY> = Vec::new();
        let mut total_us: u32 = 0;
        for (i, sample) in self.samples[start..end].iter().enumerate() {
            let mut sample = *sample;
            if i == 0 {
                sample.delta_us = 0;
            }
            total_us = total_us.saturating_add(sample.delta_us);
            // NOTE: This cannot fail, the source has the same capacity.
            let _ = trimmed.push(sample);
        }

        self.samples = trimmed;
        self.total_us = total_us;
    }

    #[must_use]
    pub fn samples(&self) -> &[Sample] {
        &self.samples
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    #[must_use]
    pub fn is_full(&self) -> bool {
        self.samples.len() >= self.limit
    }

    #[must_use]
    pub fn limit(&self) -> usize {
        self.limit
    }

    #[must_use]
    pub fn total_us(&self) -> u32 {
        self.total_us
    }

    #[must_use]
    pub fn kind(&self) -> Kind {
        self.kind
    }

    #[must_use]
    pub fn is_ready(&self) -> bool {
        self.ready
    }

    #[must_use]
    pub fn is_exported(&self) -> bool {
        self.exported
    }

    /// Note that the recording was handed over to an external serializer.
    ///
    /// This is the only metadata that may change on a ready recording.
    pub fn mark_exported(&mut self) {
        if self.ready {
            self.exported = true;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn sample(x: i8, delta_us: u32) -> Sample {
        Sample {
            stick_x: x,
            delta_us,
            ..Sample::default()
        }
    }

    #[test]
    fn when_first_sample_is_pushed_its_delta_is_reset() {
        let mut recording = Recording::new();
        recording.push(sample(1, 500)).unwrap();
        recording.push(sample(2, 500)).unwrap();
        assert_eq!(recording.samples()[0].delta_us, 0);
        assert_eq!(recording.total_us(), 500);
    }

    #[test]
    fn when_limit_is_reached_push_fails() {
        let mut recording = Recording::new();
        recording.clear(3);
        for _ in 0..3 {
            recording.push(sample(0, 100)).unwrap();
        }
        assert!(recording.is_full());
        assert_eq!(recording.push(sample(0, 100)), Err(Full));
        assert_eq!(recording.len(), 3);
    }

    #[test]
    fn when_limit_exceeds_capacity_it_gets_capped() {
        let mut recording = Recording::new();
        recording.clear(CAPACITY * 2);
        assert_eq!(recording.limit(), CAPACITY);
    }

    #[test]
    fn when_recording_is_finished_it_rejects_further_samples() {
        let mut recording = Recording::new();
        recording.push(sample(0, 0)).unwrap();
        recording.finish(Kind::Plot);
        assert_eq!(recording.push(sample(1, 100)), Err(Full));
        recording.retain(0..0);
        assert_eq!(recording.len(), 1);
        assert!(recording.is_ready());
        assert_eq!(recording.kind(), Kind::Plot);
    }

    #[test]
    fn when_cleared_it_drops_samples_and_metadata() {
        let mut recording = Recording::new();
        recording.push(sample(0, 0)).unwrap();
        recording.push(sample(0, 100)).unwrap();
        recording.finish(Kind::TriggerL);
        recording.mark_exported();
        assert!(recording.is_exported());

        recording.clear(SHORT_CAPACITY);
        assert!(recording.is_empty());
        assert_eq!(recording.total_us(), 0);
        assert_eq!(recording.kind(), Kind::Cleared);
        assert!(!recording.is_ready());
        assert!(!recording.is_exported());
        assert_eq!(recording.limit(), SHORT_CAPACITY);
    }

    #[test]
    fn when_not_ready_it_cannot_be_marked_exported() {
        let mut recording = Recording::new();
        recording.mark_exported();
        assert!(!recording.is_exported());
    }

    #[test]
    fn when_retained_it_keeps_range_and_recalculates_total() {
        let mut recording = Recording::new();
        for i in 0..10 {
            recording.push(sample(i, 100 + i as u32)).unwrap();
        }

        recording.retain(4..8);

        assert_eq!(recording.len(), 4);
        let xs: [i8; 4] = core::array::from_fn(|i| recording.samples()[i].stick_x);
        assert_eq!(xs, [4, 5, 6, 7]);
        assert_eq!(recording.samples()[0].delta_us, 0);
        assert_eq!(recording.total_us(), 105 + 106 + 107);
    }

    #[test]
    fn when_retained_range_is_out_of_bounds_it_gets_clipped() {
        let mut recording = Recording::new();
        for i in 0..5 {
            recording.push(sample(i, 100)).unwrap();
        }
        recording.retain(3..50);
        assert_eq!(recording.len(), 2);
        recording.retain(10..20);
        assert!(recording.is_empty());
    }

    proptest! {
        #[test]
        fn length_never_exceeds_limit(limit in 0..600usize, pushes in 0..700usize) {
            let mut recording = Recording::new();
            recording.clear(limit);
            for _ in 0..pushes {
                let _ = recording.push(sample(0, 10));
            }
            prop_assert!(recording.len() <= limit);
            prop_assert_eq!(recording.len(), pushes.min(limit));
        }
    }
}
