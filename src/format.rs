//! Presentation helpers for page renderers.
//!
//! These only format; all offset math lives in [`crate::engine`].

use crate::Instant;
use crate::engine::ZoneId;
use chrono::{DateTime, TimeZone, Utc};
use chrono_tz::Tz;
use std::fmt::Display;

/// `"9:05 AM"`
pub fn clock_12h<T: TimeZone>(dt: &DateTime<T>) -> String
where
    T::Offset: Display,
{
    dt.format("%-I:%M %p").to_string()
}

/// `"09:05"`
pub fn clock_24h<T: TimeZone>(dt: &DateTime<T>) -> String
where
    T::Offset: Display,
{
    dt.format("%H:%M").to_string()
}

/// `"Monday, January 15, 2024"`
pub fn long_date<T: TimeZone>(dt: &DateTime<T>) -> String
where
    T::Offset: Display,
{
    dt.format("%A, %B %-d, %Y").to_string()
}

/// Format `instant` in `zone` with a `strftime` pattern.
pub fn format_in_zone(instant: Instant, zone: ZoneId, pattern: &str) -> String {
    zone.at(instant).format(pattern).to_string()
}

pub fn now_in_zone(zone: ZoneId) -> DateTime<Tz> {
    zone.at(Utc::now())
}

/// Label for an overlap hour, e.g. `"14:00 UTC"`.
pub fn utc_hour_label(hour: u32) -> String {
    format!("{hour:02}:00 UTC")
}

/// One city's line on a shared meeting page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MeetingLine {
    pub zone: ZoneId,
    /// `"Tue, Jan 16, 09:30 AM"`
    pub local: String,
}

/// Local time of a shared meeting in each of `zones`, in input order.
pub fn meeting_times(instant: Instant, zones: &[ZoneId]) -> Vec<MeetingLine> {
    zones
        .iter()
        .map(|&zone| MeetingLine { zone, local: format_in_zone(instant, zone, "%a, %b %-d, %I:%M %p") })
        .collect()
}
