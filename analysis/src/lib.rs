//! Derived statistics of finished recordings.
//!
//! All functions here are pure. They take a ready recording from the
//! capture and refuse to look at anything else, so a consumer can call
//! them every frame without caring whether a capture is in progress.

#![cfg_attr(not(test), no_std)]
#![allow(clippy::items_after_statements)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_lossless)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::cast_possible_wrap)]
#![allow(clippy::cast_precision_loss)]

#[cfg(test)]
#[macro_use]
extern crate approx;

pub mod button_timing;
pub mod coordinate;
pub mod dashback;
pub mod excursion;
pub mod pivot;
pub mod plot;
pub mod powershield;
pub mod stickmap;
pub mod tally;

use stickscope_capture::recording::{Kind, Recording};
use stickscope_capture::sample::Sample;

/// Duration of one frame of the game, the unit of all timing results.
pub const FRAME_US: u32 = 16_666;

/// Reason why a recording cannot be analyzed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum NoData {
    /// The capture has not completed yet.
    NotReady,
    /// The recording was made for a different test.
    WrongKind,
    Empty,
    /// The recording does not contain the gesture the test looks for.
    NoGesture,
}

/// Samples of a ready, non-empty recording of an accepted kind.
pub(crate) fn samples<F>(recording: &Recording, accept: F) -> Result<&[Sample], NoData>
where
    F: Fn(Kind) -> bool,
{
    if !recording.is_ready() {
        return Err(NoData::NotReady);
    }
    if !accept(recording.kind()) {
        return Err(NoData::WrongKind);
    }
    if recording.is_empty() {
        return Err(NoData::Empty);
    }
    Ok(recording.samples())
}

/// For how long was the input in the state of the sample at `index`.
///
/// That is the time until the next sample arrived. The last sample has no
/// known duration.
pub(crate) fn held_us(samples: &[Sample], index: usize) -> u32 {
    samples.get(index + 1).map_or(0, |s| s.delta_us)
}

/// Time from the start of the recording until the sample at `index`.
pub(crate) fn timestamp_us(samples: &[Sample], index: usize) -> u32 {
    samples
        .iter()
        .take(index + 1)
        .fold(0u32, |sum, s| sum.saturating_add(s.delta_us))
}

pub(crate) fn frames(us: u32) -> f32 {
    us as f32 / FRAME_US as f32
}

/// Fraction scaled to percents, kept within 0 to 100.
pub(crate) fn percent(fraction: f32) -> f32 {
    (fraction * 100.0).clamp(0.0, 100.0)
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    /// Build a finished recording out of the given samples.
    pub fn recording(kind: Kind, samples: impl IntoIterator<Item = Sample>) -> Recording {
        let mut recording = Recording::new();
        for sample in samples {
            recording.push(sample).unwrap();
        }
        recording.finish(kind);
        recording
    }

    pub fn x(x: i8, delta_us: u32) -> Sample {
        Sample {
            stick_x: x,
            delta_us,
            ..Sample::default()
        }
    }

    #[test]
    fn when_recording_is_not_finished_it_is_refused() {
        let mut recording = Recording::new();
        recording.push(x(0, 0)).unwrap();
        assert_eq!(samples(&recording, |_| true), Err(NoData::NotReady));
    }

    #[test]
    fn when_recording_is_of_other_kind_it_is_refused() {
        let recording = recording(Kind::Plot, [x(0, 0)]);
        assert_eq!(
            samples(&recording, |k| k == Kind::TriggerL),
            Err(NoData::WrongKind)
        );
    }

    #[test]
    fn when_recording_is_empty_it_is_refused() {
        let recording = recording(Kind::Plot, []);
        assert_eq!(samples(&recording, |_| true), Err(NoData::Empty));
    }

    #[test]
    fn when_sample_is_last_it_has_no_duration() {
        let samples = [x(0, 0), x(1, 500), x(2, 700)];
        assert_eq!(held_us(&samples, 0), 500);
        assert_eq!(held_us(&samples, 2), 0);
        assert_eq!(timestamp_us(&samples, 2), 1_200);
    }

    #[test]
    fn when_fraction_overflows_percent_is_clamped() {
        assert_relative_eq!(percent(1.5), 100.0);
        assert_relative_eq!(percent(-0.2), 0.0);
        assert_relative_eq!(percent(0.25), 25.0);
        assert_relative_eq!(frames(FRAME_US * 2), 2.0);
    }
}
