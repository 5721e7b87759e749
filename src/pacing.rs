use crate::error::{PlanError, Result};
use time::{Duration, OffsetDateTime};

/// Elapsed hours when reaching `distance`, assuming an even pace over the
/// whole profile. A zero-length profile yields 0.
pub fn estimate_elapsed(distance: f64, profile_max_distance: f64, total_hours: f64) -> f64 {
    if profile_max_distance == 0.0 {
        return 0.0;
    }
    (distance / profile_max_distance) * total_hours
}

/// Splits fractional hours into whole hours, minutes and seconds.
///
/// Every unit is truncated, never rounded: 59m59.9s stays 00:59:59.
pub fn split_elapsed(hours: f64) -> (u64, u64, u64) {
    if !hours.is_finite() || hours <= 0.0 {
        return (0, 0, 0);
    }
    let whole_hours = hours.floor();
    let minutes_f = (hours - whole_hours) * 60.0;
    let minutes = minutes_f.floor();
    let seconds = ((minutes_f - minutes) * 60.0).floor();
    (whole_hours as u64, minutes as u64, seconds as u64)
}

/// `HH:MM:SS` rendering of fractional hours.
pub fn format_elapsed(hours: f64) -> String {
    let (h, m, s) = split_elapsed(hours);
    format!("{h:02}:{m:02}:{s:02}")
}

/// Wall-clock arrival for a start time and an elapsed estimate, using the
/// same truncation as [`format_elapsed`].
///
/// Fails with `InvalidDuration` when the arrival falls outside the range of
/// representable dates.
pub fn arrival_time(start: OffsetDateTime, elapsed_hours: f64) -> Result<OffsetDateTime> {
    let out_of_range = || {
        PlanError::InvalidDuration(format!(
            "arrival {elapsed_hours} h after {start} is out of range"
        ))
    };
    let (h, m, s) = split_elapsed(elapsed_hours);
    let seconds = h
        .checked_mul(3600)
        .and_then(|total| total.checked_add(m * 60 + s))
        .and_then(|total| i64::try_from(total).ok())
        .ok_or_else(out_of_range)?;

    start
        .checked_add(Duration::seconds(seconds))
        .ok_or_else(out_of_range)
}
