//! Judge whether a turnaround would come out as an unwanted dashback.

use core::ops::Range;

use stickscope_capture::recording::{Kind, Recording, Test};
use stickscope_capture::sample::{abs, Sample};

use crate::{held_us, percent, timestamp_us, NoData, FRAME_US};

/// Magnitudes of X where the stick turns around without dashing.
pub const SLOW_TURN: Range<i16> = 23..64;

/// Magnitude proving the stick reached a dash without stopping in between.
pub const DASH_REACHED: i16 = 65;

/// Change of X across two frames that the compensation takes as an
/// intended dash.
pub const UCF_INTENTION: i16 = 75;

/// Chances of avoiding a dashback, in percents.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Dashback {
    pub vanilla: f32,
    /// With the compensation of the popular controller firmware mod.
    pub ucf: f32,
    pub time_in_band_us: u32,
}

impl Dashback {
    #[must_use]
    pub fn percentages(&self) -> [f32; 2] {
        [self.vanilla, self.ucf]
    }
}

/// Measure the first stay of the stick in the slow-turn band.
///
/// # Errors
///
/// Fails when the recording is not a ready, non-empty dashback recording,
/// or when the stick neither entered the band nor reached a dash.
pub fn analyze(recording: &Recording) -> Result<Dashback, NoData> {
    let samples = crate::samples(recording, |kind| {
        kind == Kind::Oscilloscope(Test::Dashback)
    })?;

    let in_band = |s: &Sample| SLOW_TURN.contains(&abs(s.stick_x));

    let Some(start) = samples.iter().position(in_band) else {
        return if samples.iter().any(|s| abs(s.stick_x) >= DASH_REACHED) {
            Ok(Dashback {
                vanilla: 100.0,
                ucf: 100.0,
                time_in_band_us: 0,
            })
        } else {
            Err(NoData::NoGesture)
        };
    };
    let end = samples[start..]
        .iter()
        .position(|s| !in_band(s))
        .map_or(samples.len(), |i| start + i);

    let mut in_band_us: u32 = 0;
    let mut compensated_us: u32 = 0;
    for i in start..end {
        let held = held_us(samples, i);
        in_band_us = in_band_us.saturating_add(held);
        if !intended(samples, i) {
            compensated_us = compensated_us.saturating_add(held);
        }
    }

    let frame = FRAME_US as f32;
    Ok(Dashback {
        vanilla: percent(1.0 - in_band_us as f32 / frame),
        ucf: percent(1.0 - compensated_us as f32 / frame),
        time_in_band_us: in_band_us,
    })
}

/// Whether X changed enough between a frame before and a frame after the
/// sample to be taken as an intended dash.
fn intended(samples: &[Sample], index: usize) -> bool {
    let now = timestamp_us(samples, index);
    let before = nearest(samples, now.saturating_sub(FRAME_US));
    let after = nearest(samples, now.saturating_add(FRAME_US));
    (i16::from(after.stick_x) - i16::from(before.stick_x)).abs() > UCF_INTENTION
}

/// The sample closest in time to `target_us`, clamped to the recording.
fn nearest(samples: &[Sample], target_us: u32) -> &Sample {
    let mut best = &samples[0];
    let mut best_distance = u32::MAX;
    let mut now_us: u32 = 0;
    for sample in samples {
        now_us = now_us.saturating_add(sample.delta_us);
        let distance = now_us.abs_diff(target_us);
        if distance < best_distance {
            best = sample;
            best_distance = distance;
        } else if now_us > target_us {
            break;
        }
    }
    best
}
