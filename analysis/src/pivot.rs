//! Judge whether a dash reversal would come out as a pivot.

#[allow(unused_imports)]
use micromath::F32Ext;

use stickscope_capture::recording::{Kind, Recording, Test};
use stickscope_capture::reversal::{find_reversal, span_us};

use crate::{percent, NoData, FRAME_US};

/// Magnitude both dashes of a pivot must reach.
pub const PIVOT_PEAK: i16 = 80;

/// Chances of the reversal coming out as each of the outcomes, in percents.
///
/// The three shares always sum up to 100.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Pivot {
    pub no_turn: f32,
    pub pivot: f32,
    pub dashback: f32,
    /// Time spent between the two dashes, if a reversal was found.
    pub time_in_band_us: Option<u32>,
}

impl Pivot {
    #[must_use]
    pub fn percentages(&self) -> [f32; 3] {
        [self.no_turn, self.pivot, self.dashback]
    }
}

/// Find the last reversal with both dashes hitting `PIVOT_PEAK` and split
/// the outcome based on how long the stick stayed between them.
///
/// Staying between the dashes for less than a frame leaves a chance of a
/// pivot, the rest of the frame not turning at all. Staying longer gives a
/// chance of a dashback instead. If no such reversal is found, the result
/// is a certain dashback.
///
/// # Errors
///
/// Fails when the recording is not a ready, non-empty pivot recording.
pub fn analyze(recording: &Recording) -> Result<Pivot, NoData> {
    let samples = crate::samples(recording, |kind| {
        kind == Kind::Oscilloscope(Test::Pivot)
    })?;

    let reversal = find_reversal(samples, |samples, reversal| {
        reversal.first.peak(samples) >= PIVOT_PEAK && reversal.second.peak(samples) >= PIVOT_PEAK
    });
    let Some(reversal) = reversal else {
        return Ok(Pivot {
            no_turn: 0.0,
            pivot: 0.0,
            dashback: 100.0,
            time_in_band_us: None,
        });
    };

    // Samples strictly between the runs, each held until the next one.
    let in_band_us = span_us(samples, reversal.first.end, reversal.second.start);

    let frame = FRAME_US as f32;
    let difference = frame - in_band_us as f32;
    let share = percent(difference.abs() / frame);

    let (pivot, dashback) = if difference > 0.0 {
        (share, 0.0)
    } else {
        (0.0, share)
    };

    Ok(Pivot {
        no_turn: 100.0 - share,
        pivot,
        dashback,
        time_in_band_us: Some(in_band_us),
    })
}
