//! Offset strings and DST classification.
//!
//! Two separate questions are answered here:
//!
//! - *Does the zone observe DST?* A date-independent classification, answered
//!   by sampling mid-January and mid-July of one year and comparing offsets.
//! - *Is the zone in DST right now?* Answered by comparing the offset at the
//!   instant against the zone's standard offset for that year, which is the
//!   smaller of the two samples. This holds for both hemispheres: Sydney's
//!   January sample is the DST one, New York's is July's.

use super::resolver::{ZoneId, offset_minutes, raw_offset_minutes};
use crate::{Instant, Result};
use chrono::{Datelike, TimeZone, Utc};
use chrono_tz::OffsetComponents;

/// Format a signed minute offset as `UTC±HH:MM`.
///
/// The sign is always present; zero is `UTC+00:00`.
pub fn format_offset_minutes(minutes: i32) -> String {
    let sign = if minutes < 0 { '-' } else { '+' };
    let abs = minutes.unsigned_abs();
    format!("UTC{sign}{:02}:{:02}", abs / 60, abs % 60)
}

pub fn utc_offset_string(instant: Instant, zone: ZoneId) -> Result<String> {
    Ok(format_offset_minutes(offset_minutes(instant, zone)?))
}

/// Abbreviation the database reports for `zone` at `instant` (`"PST"`, `"PDT"`, ...).
pub fn zone_abbreviation(instant: Instant, zone: ZoneId) -> String {
    zone.at(instant).format("%Z").to_string()
}

/// Whether `zone` shifts its clocks during the current year.
pub fn observes_dst(zone: ZoneId) -> bool {
    observes_dst_in(zone, Utc::now().year())
}

/// Whether `zone` shifts its clocks during `year`.
///
/// When neither sample carries a DST component the zone is classified as
/// non-DST without comparing offsets, so a permanent offset change made
/// within the year is not mistaken for daylight saving.
pub fn observes_dst_in(zone: ZoneId, year: i32) -> bool {
    let Some((winter, summer)) = reference_samples(year) else {
        return false;
    };

    let dst_component = |instant: Instant| zone.at(instant).offset().dst_offset().num_seconds() != 0;
    if !dst_component(winter) && !dst_component(summer) {
        return false;
    }

    raw_offset_minutes(winter, zone) != raw_offset_minutes(summer, zone)
}

/// The zone's standard (non-DST) offset during `year`, in minutes.
pub fn standard_offset_minutes(zone: ZoneId, year: i32) -> Option<i32> {
    let (winter, summer) = reference_samples(year)?;
    Some(raw_offset_minutes(winter, zone).min(raw_offset_minutes(summer, zone)))
}

/// Whether `zone` is observing daylight saving at `instant`.
pub fn is_in_dst(instant: Instant, zone: ZoneId) -> bool {
    let year = instant.year();
    if !observes_dst_in(zone, year) {
        return false;
    }
    match standard_offset_minutes(zone, year) {
        Some(standard) => raw_offset_minutes(instant, zone) > standard,
        None => false,
    }
}

// Mid-month noon avoids every transition instant in the database.
fn reference_samples(year: i32) -> Option<(Instant, Instant)> {
    let winter = Utc.with_ymd_and_hms(year, 1, 15, 12, 0, 0).single()?;
    let summer = Utc.with_ymd_and_hms(year, 7, 15, 12, 0, 0).single()?;
    Some((winter, summer))
}
