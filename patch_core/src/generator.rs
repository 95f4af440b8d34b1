//! Series generator: superposition of periodic patch applications.
//!
//! Every application follows the reference curve from the hour it is applied.
//! Once an application has been worn for longer than the wear duration it no
//! longer counts as a patch, and its contribution tapers as
//! `curve.last() / hours_past_wear`.

use crate::{Error, ReferenceCurve, Result, Sample, SimulationParameters};

/// Contribution of one application, `elapsed` hours after it was applied
///
/// Returns the raw (unscaled) concentration and whether the patch counts as worn.
fn application_contribution(elapsed: i64, wear_duration: u32, curve: &ReferenceCurve) -> (f64, bool) {
    let wear_duration = i64::from(wear_duration);

    if elapsed > wear_duration {
        let hours_past_wear = (elapsed - wear_duration) as f64;
        (curve.last() / hours_past_wear, false)
    } else {
        // Not yet applied, or past the tabulated range while still worn
        let value = curve.get(elapsed).unwrap_or(0.0);
        (value, value > 0.0)
    }
}

/// Generate one sample per hour of `params.horizon`
///
/// # Errors
/// `Error::InvalidParameter` if `application_spacing` is zero.
pub fn generate(params: &SimulationParameters, curve: &ReferenceCurve) -> Result<Vec<Sample>> {
    if params.application_spacing == 0 {
        return Err(Error::InvalidParameter(
            "application spacing must be at least 1 hour".into(),
        ));
    }

    let spacing = u64::from(params.application_spacing);
    let horizon = u64::from(params.horizon);
    let events = horizon.div_ceil(spacing);

    tracing::debug!(
        "Generating {} hours with {} applications every {}h (wear {}h, strength {})",
        params.horizon,
        events,
        spacing,
        params.wear_duration,
        params.patch_strength
    );

    let series = (0..params.horizon)
        .map(|time| {
            let mut sample = Sample::zero(time);

            // Applications after `time` contribute exactly 0, so stop at the latest one applied
            let applied = (u64::from(time) / spacing + 1).min(events);
            for event in 0..applied {
                let offset = event * spacing;
                let elapsed = i64::from(time) - offset as i64;
                let (contribution, worn) =
                    application_contribution(elapsed, params.wear_duration, curve);

                sample.value += params.patch_strength * contribution;
                if worn {
                    sample.patches += params.patch_strength;
                }
            }

            sample
        })
        .collect();

    Ok(series)
}
