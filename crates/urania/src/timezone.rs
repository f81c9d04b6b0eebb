//! IANA timezone → numeric UTC offset, as the chart provider expects it.

use chrono::{DateTime, LocalResult, NaiveDateTime, Offset, TimeZone, Utc};
use chrono_tz::Tz;

/// Used for unknown identifiers: Indian Standard Time, the service's home locale.
pub const DEFAULT_OFFSET_HOURS: f64 = 5.5;

fn parse_tz(timezone: &str) -> Option<Tz> {
    match timezone.trim().parse::<Tz>() {
        Ok(tz) => Some(tz),
        Err(_) => {
            log::debug!("timezone: unknown identifier '{}', using +{}", timezone, DEFAULT_OFFSET_HOURS);
            None
        }
    }
}

fn seconds_to_hours(seconds: i32) -> f64 {
    seconds as f64 / 3600.0
}

/// Offset in hours (fractional for zones like +5:30 or +5:45) at a UTC instant.
pub fn offset_hours(timezone: &str, instant: DateTime<Utc>) -> f64 {
    match parse_tz(timezone) {
        Some(tz) => seconds_to_hours(
            tz.offset_from_utc_datetime(&instant.naive_utc())
                .fix()
                .local_minus_utc(),
        ),
        None => DEFAULT_OFFSET_HOURS,
    }
}

/// Offset in force at a wall-clock time in `timezone`.
///
/// Ambiguous times (clocks falling back) take the earlier offset. Times that
/// do not exist (clocks springing forward) take the offset in force at that
/// instant read as UTC, which is the pre-transition offset for any real gap.
pub fn offset_hours_at_local(timezone: &str, local: NaiveDateTime) -> f64 {
    let Some(tz) = parse_tz(timezone) else {
        return DEFAULT_OFFSET_HOURS;
    };
    let offset = match tz.offset_from_local_datetime(&local) {
        LocalResult::Single(offset) => offset.fix(),
        LocalResult::Ambiguous(earliest, _) => earliest.fix(),
        LocalResult::None => tz.offset_from_utc_datetime(&local).fix(),
    };
    seconds_to_hours(offset.local_minus_utc())
}
