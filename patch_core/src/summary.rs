//! Statistics over a generated series.

use crate::Sample;
use serde::Serialize;

/// Peak, trough and mean of a series
#[derive(Clone, Debug, Serialize, PartialEq)]
pub struct SeriesSummary {
    pub peak_value: f64,
    pub peak_time: u32,
    pub trough_value: f64,
    pub trough_time: u32,
    pub mean_value: f64,
    pub max_patches: f64,
    pub hours: usize,
}

/// Summarize the whole series; None if it is empty
pub fn summarize(samples: &[Sample]) -> Option<SeriesSummary> {
    summarize_from(samples, 0)
}

/// Summarize only the samples at or after `start_hour`
///
/// Skipping the first application cycle gives steady-state figures.
pub fn summarize_from(samples: &[Sample], start_hour: u32) -> Option<SeriesSummary> {
    let mut window = samples.iter().filter(|s| s.time >= start_hour);
    let first = window.next()?;

    let mut summary = SeriesSummary {
        peak_value: first.value,
        peak_time: first.time,
        trough_value: first.value,
        trough_time: first.time,
        mean_value: 0.0,
        max_patches: first.patches,
        hours: 1,
    };
    let mut total = first.value;

    for sample in window {
        if sample.value > summary.peak_value {
            summary.peak_value = sample.value;
            summary.peak_time = sample.time;
        }
        if sample.value < summary.trough_value {
            summary.trough_value = sample.value;
            summary.trough_time = sample.time;
        }
        summary.max_patches = summary.max_patches.max(sample.patches);
        total += sample.value;
        summary.hours += 1;
    }

    summary.mean_value = total / summary.hours as f64;
    Some(summary)
}
