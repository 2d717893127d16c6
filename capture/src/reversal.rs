//! Locate a quick left-right reversal of the main stick's X axis.

use crate::sample::{abs, Sample, DASH_THRESHOLD};

/// Contiguous samples holding the X axis past the dash threshold on one side.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Run {
    /// Index of the first sample of the run.
    pub start: usize,
    /// Index after the last sample of the run.
    pub end: usize,
    pub positive: bool,
}

/// Two runs on opposite sides of the X axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Reversal {
    pub first: Run,
    pub second: Run,
}

impl Run {
    /// The largest magnitude reached during the run.
    #[must_use]
    pub fn peak(&self, samples: &[Sample]) -> i16 {
        samples[self.start..self.end]
            .iter()
            .map(|s| abs(s.stick_x))
            .max()
            .unwrap_or(0)
    }
}

impl Reversal {
    /// Time between leaving the first run and entering the second one.
    #[must_use]
    pub fn gap_us(&self, samples: &[Sample]) -> u32 {
        span_us(samples, self.first.end - 1, self.second.start)
    }
}

/// Scan backward from the end for the latest pair of runs on opposite sides
/// of the X axis that satisfies `accept`.
///
/// Runs are paired only with their direct predecessor. When a pair gets
/// rejected, the earlier run becomes the candidate for the second one.
pub fn find_reversal<F>(samples: &[Sample], accept: F) -> Option<Reversal>
where
    F: Fn(&[Sample], &Reversal) -> bool,
{
    let mut second = previous_run(samples, samples.len())?;
    loop {
        let first = previous_run(samples, second.start)?;
        let reversal = Reversal { first, second };
        if first.positive != second.positive && accept(samples, &reversal) {
            return Some(reversal);
        }
        second = first;
    }
}

/// The last run ending before the given index.
fn previous_run(samples: &[Sample], before: usize) -> Option<Run> {
    let beyond = |s: &Sample| abs(s.stick_x) >= DASH_THRESHOLD;

    let end = samples[..before].iter().rposition(beyond)? + 1;
    let positive = samples[end - 1].stick_x > 0;
    let start = samples[..end]
        .iter()
        .rposition(|s| !beyond(s) || (s.stick_x > 0) != positive)
        .map_or(0, |i| i + 1);

    Some(Run {
        start,
        end,
        positive,
    })
}

/// Time elapsed between samples `from` and `to`.
#[must_use]
pub fn span_us(samples: &[Sample], from: usize, to: usize) -> u32 {
    if to <= from || from + 1 >= samples.len() {
        return 0;
    }
    samples[from + 1..=to.min(samples.len() - 1)]
        .iter()
        .fold(0u32, |sum, s| sum.saturating_add(s.delta_us))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn samples(xs: &[i8], delta_us: u32) -> [Sample; 16] {
        let mut samples = [Sample::default(); 16];
        for (i, x) in xs.iter().enumerate() {
            samples[i] = Sample {
                stick_x: *x,
                delta_us: if i == 0 { 0 } else { delta_us },
                ..Sample::default()
            };
        }
        samples
    }

    #[test]
    fn when_stick_reverses_it_finds_both_runs() {
        let samples = samples(&[0, 70, 90, 90, 30, -80, -90, 0, 0], 1_000);
        let reversal = find_reversal(&samples[..9], |_, _| true).unwrap();
        assert_eq!(
            reversal.first,
            Run {
                start: 1,
                end: 4,
                positive: true
            }
        );
        assert_eq!(
            reversal.second,
            Run {
                start: 5,
                end: 7,
                positive: false
            }
        );
        assert_eq!(reversal.first.peak(&samples), 90);
        assert_eq!(reversal.gap_us(&samples), 2_000);
    }

    #[test]
    fn when_runs_touch_directly_gap_is_single_interval() {
        let samples = samples(&[0, 90, -90, 0], 500);
        let reversal = find_reversal(&samples[..4], |_, _| true).unwrap();
        assert_eq!(reversal.gap_us(&samples), 500);
    }

    #[test]
    fn when_runs_are_on_same_side_it_finds_nothing() {
        let samples = samples(&[0, 90, 30, 90, 0], 1_000);
        assert!(find_reversal(&samples[..5], |_, _| true).is_none());
    }

    #[test]
    fn when_latest_pair_is_rejected_it_tries_earlier_one() {
        let samples = samples(&[0, -90, 90, 0, 0, 0, -90, 0], 1_000);
        let reversal = find_reversal(&samples[..8], |samples, reversal| {
            reversal.gap_us(samples) <= 1_000
        })
        .unwrap();
        assert_eq!(reversal.first.start, 1);
        assert_eq!(reversal.second.start, 2);
    }

    #[test]
    fn when_stick_never_crosses_threshold_it_finds_nothing() {
        let samples = samples(&[0, 40, -40, 0], 1_000);
        assert!(find_reversal(&samples[..4], |_, _| true).is_none());
    }

    #[test]
    fn when_span_is_inverted_it_is_zero() {
        let samples = samples(&[0, 1, 2], 1_000);
        assert_eq!(span_us(&samples[..3], 2, 1), 0);
        assert_eq!(span_us(&samples[..3], 0, 2), 2_000);
    }
}
