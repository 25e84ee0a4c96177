//! Pairwise conversion between two zones.

use super::resolver::{ZoneId, offset_minutes};
use crate::{Instant, Result};
use crate::format::clock_12h;
use chrono::{DateTime, LocalResult, NaiveDateTime, Offset, TimeDelta, TimeZone};
use chrono_tz::Tz;

/// Representative times of day, in the "from" zone, for the example table.
pub const EXAMPLE_TIMES: [(u32, &str); 6] = [
    (6, "Early morning"),
    (9, "Start of work day"),
    (12, "Midday"),
    (15, "Afternoon"),
    (18, "End of work day"),
    (21, "Evening"),
];

/// One row of an example conversion table.
///
/// `from_time`/`to_time` carry the time of day only. Renderers that show a
/// full date must use `from`/`to`, which keep the real calendar day.
#[derive(Debug, Clone, PartialEq)]
pub struct ConversionExample {
    pub label: String,
    pub from_time: String,
    pub to_time: String,
    pub from: DateTime<Tz>,
    pub to: DateTime<Tz>,
}

impl ConversionExample {
    /// Calendar days between the two local dates: `1` when the "to" side is
    /// already on the next day, `-1` when it is still on the previous one.
    pub fn day_shift(&self) -> i64 {
        (self.to.date_naive() - self.from.date_naive()).num_days()
    }
}

/// Exact difference `to - from` in minutes.
pub fn offset_diff_minutes(instant: Instant, from: ZoneId, to: ZoneId) -> Result<i32> {
    Ok(offset_minutes(instant, to)? - offset_minutes(instant, from)?)
}

/// Headline difference `to - from` in whole hours.
///
/// Half-hour differences round away from zero, which keeps
/// `diff(a, b) == -diff(b, a)` for every pair.
pub fn offset_diff_hours(instant: Instant, from: ZoneId, to: ZoneId) -> Result<i32> {
    Ok((f64::from(offset_diff_minutes(instant, from, to)?) / 60.0).round() as i32)
}

/// Example table for the local date of `instant` in `from`.
pub fn generate_example_conversions(instant: Instant, from: ZoneId, to: ZoneId) -> Vec<ConversionExample> {
    let date = from.at(instant).date_naive();

    EXAMPLE_TIMES
        .iter()
        .filter_map(|&(hour, label)| {
            let from_dt = localize(from, date.and_hms_opt(hour, 0, 0)?);
            let to_dt = from_dt.with_timezone(&to.tz());
            Some(ConversionExample {
                label: label.to_string(),
                from_time: clock_12h(&from_dt),
                to_time: clock_12h(&to_dt),
                from: from_dt,
                to: to_dt,
            })
        })
        .collect()
}

/// Attach `zone` to a wall-clock time.
///
/// A time repeated by a backward transition takes its earlier occurrence. A
/// time skipped by a forward transition is read with the offset in effect
/// before the gap, which lands it just past the gap (02:30 on a
/// spring-forward night becomes 03:30).
pub fn localize(zone: ZoneId, naive: NaiveDateTime) -> DateTime<Tz> {
    let tz = zone.tz();
    match tz.from_local_datetime(&naive) {
        LocalResult::Single(dt) => dt,
        LocalResult::Ambiguous(earliest, _) => earliest,
        LocalResult::None => {
            let before = tz.from_utc_datetime(&(naive - TimeDelta::days(1)));
            let shift = TimeDelta::seconds(i64::from(before.offset().fix().local_minus_utc()));
            tz.from_utc_datetime(&(naive - shift))
        }
    }
}
