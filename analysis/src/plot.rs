//! Summary of a free-form 2D plot.

use stickscope_capture::recording::{Kind, Recording};
use stickscope_capture::sample::Stick;

use crate::coordinate::Coordinate;
use crate::{frames, NoData};

#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Summary {
    pub duration_us: u32,
    pub frames: f32,
    pub samples: usize,
    pub first: Coordinate,
    pub last: Coordinate,
}

/// Summarize a plot of the given stick.
///
/// # Errors
///
/// Fails when the recording is not a ready, non-empty plot recording.
pub fn summarize(recording: &Recording, stick: Stick) -> Result<Summary, NoData> {
    let samples = crate::samples(recording, |kind| kind == Kind::Plot)?;
    let (Some(first), Some(last)) = (samples.first(), samples.last()) else {
        return Err(NoData::Empty);
    };

    Ok(Summary {
        duration_us: recording.total_us(),
        frames: frames(recording.total_us()),
        samples: samples.len(),
        first: Coordinate::from_sample(first, stick),
        last: Coordinate::from_sample(last, stick),
    })
}
