use crate::engine::{
    self, ConversionExample, HourScore, OverlapWindow, WorkHours, ZoneId, ZoneOffset, check_zone_count,
};
use crate::format::{clock_12h, clock_24h, long_date};
use crate::{Instant, Result};
use chrono::{Datelike, TimeZone, Utc};
use std::time::Duration;

/// Computation context.
///
/// Holds the reference instant every page computation is made against.
#[derive(Debug, Clone)]
pub struct Context {
    pub reference: Instant,
}

impl Default for Context {
    fn default() -> Self {
        if cfg!(test) {
            Self { reference: Utc.with_ymd_and_hms(2024, 1, 15, 12, 0, 0).single().unwrap_or_else(Utc::now) }
        } else {
            Self { reference: Utc::now() }
        }
    }
}

/// Options that affect overlap scoring and ranking.
#[derive(Debug, Clone, Default)]
pub struct Options {
    /// Local working-hours band used for every zone.
    pub work_hours: WorkHours,
}

/// Everything a city page shows for one zone.
#[derive(Debug, Clone)]
pub struct ZoneSummary {
    pub zone: ZoneId,
    /// `"9:05 AM"`
    pub local_time: String,
    /// `"09:05"`
    pub local_time_24h: String,
    /// `"Monday, January 15, 2024"`
    pub local_date: String,
    /// `"UTC-05:00"`
    pub offset: String,
    pub abbreviation: String,
    pub observes_dst: bool,
    pub in_dst: bool,
}

/// The pair-page extras, present when exactly two zones are requested.
#[derive(Debug, Clone)]
pub struct PairSummary {
    /// Hours the second zone is ahead of the first.
    pub offset_diff_hours: i32,
    pub examples: Vec<ConversionExample>,
}

/// Result from [`zone_report`] and [`zone_report_with`].
#[derive(Debug, Clone)]
pub struct ZoneReport {
    pub reference: Instant,
    pub work_hours: WorkHours,
    /// One summary per requested zone, in input order.
    pub zones: Vec<ZoneSummary>,
    pub pair: Option<PairSummary>,
    /// `None` for a single zone.
    pub overlap: Option<OverlapWindow>,
    /// Every UTC hour of the reference day, best first; empty for a single zone.
    pub ranking: Vec<HourScore>,
    /// Time spent computing the report.
    pub elapsed: Duration,
}

// --- Function contract -------------------------------------------------------
//
// Thin wrappers over `engine` that accept raw identifiers, for callers that
// hold zone names read from storage.

pub fn resolve_offset(instant: Instant, zone: &str) -> Result<ZoneOffset> {
    engine::resolve_offset(instant, ZoneId::parse(zone)?)
}

/// `UTC±HH:MM` for `zone` at `instant`.
///
/// # Example
/// ```
/// use chrono::{TimeZone, Utc};
///
/// let instant = Utc.with_ymd_and_hms(2024, 1, 15, 12, 0, 0).unwrap();
/// assert_eq!(meetzone::utc_offset_string(instant, "Asia/Kolkata").unwrap(), "UTC+05:30");
/// assert!(meetzone::utc_offset_string(instant, "Nowhere/City").is_err());
/// ```
pub fn utc_offset_string(instant: Instant, zone: &str) -> Result<String> {
    engine::utc_offset_string(instant, ZoneId::parse(zone)?)
}

pub fn zone_abbreviation(instant: Instant, zone: &str) -> Result<String> {
    Ok(engine::zone_abbreviation(instant, ZoneId::parse(zone)?))
}

pub fn observes_dst(zone: &str) -> Result<bool> {
    Ok(engine::observes_dst(ZoneId::parse(zone)?))
}

pub fn is_in_dst(instant: Instant, zone: &str) -> Result<bool> {
    Ok(engine::is_in_dst(instant, ZoneId::parse(zone)?))
}

pub fn offset_diff_hours(instant: Instant, from: &str, to: &str) -> Result<i32> {
    engine::offset_diff_hours(instant, ZoneId::parse(from)?, ZoneId::parse(to)?)
}

pub fn generate_example_conversions(instant: Instant, from: &str, to: &str) -> Result<Vec<ConversionExample>> {
    Ok(engine::generate_example_conversions(instant, ZoneId::parse(from)?, ZoneId::parse(to)?))
}

/// UTC hours where every zone is inside `[work_start, work_end)` local time.
///
/// The zone count is checked before any identifier is resolved.
///
/// # Example
/// ```
/// use chrono::{TimeZone, Utc};
///
/// let instant = Utc.with_ymd_and_hms(2024, 1, 15, 0, 0, 0).unwrap();
/// let window = meetzone::overlap_window(instant, &["America/New_York", "Europe/London"], 9, 17).unwrap();
/// assert_eq!(window.hours(), &[14, 15, 16]);
/// ```
pub fn overlap_window<S: AsRef<str>>(
    instant: Instant,
    zones: &[S],
    work_start: u32,
    work_end: u32,
) -> Result<OverlapWindow> {
    check_zone_count(zones.len())?;
    let work = WorkHours::new(work_start, work_end)?;
    engine::overlap_window(instant, &parse_zones(zones)?, work)
}

// --- Reports -----------------------------------------------------------------

/// Build a report for `zones` against a default [`Context`].
pub fn zone_report<S: AsRef<str>>(zones: &[S]) -> Result<ZoneReport> {
    zone_report_with(zones, &Context::default(), &Options::default())
}

/// Build everything a city page (one zone), pair page (two zones) or the
/// meeting planner (up to eight) needs.
pub fn zone_report_with<S: AsRef<str>>(zones: &[S], context: &Context, options: &Options) -> Result<ZoneReport> {
    let start = std::time::Instant::now();

    if zones.len() != 1 {
        check_zone_count(zones.len())?;
    }
    let ids = parse_zones(zones)?;
    let reference = context.reference;
    let work = options.work_hours;

    let summaries = ids.iter().map(|&zone| summarize(reference, zone)).collect::<Result<Vec<_>>>()?;

    let pair = match ids.as_slice() {
        [from, to] => Some(PairSummary {
            offset_diff_hours: engine::offset_diff_hours(reference, *from, *to)?,
            examples: engine::generate_example_conversions(reference, *from, *to),
        }),
        _ => None,
    };

    let (overlap, ranking) = if ids.len() > 1 {
        (Some(engine::overlap_window(reference, &ids, work)?), engine::rank_meeting_hours(reference, &ids, work)?)
    } else {
        (None, Vec::new())
    };

    Ok(ZoneReport {
        reference,
        work_hours: work,
        zones: summaries,
        pair,
        overlap,
        ranking,
        elapsed: start.elapsed(),
    })
}

fn summarize(reference: Instant, zone: ZoneId) -> Result<ZoneSummary> {
    let local = zone.at(reference);
    Ok(ZoneSummary {
        zone,
        local_time: clock_12h(&local),
        local_time_24h: clock_24h(&local),
        local_date: long_date(&local),
        offset: engine::utc_offset_string(reference, zone)?,
        abbreviation: engine::zone_abbreviation(reference, zone),
        observes_dst: engine::observes_dst_in(zone, reference.year()),
        in_dst: engine::is_in_dst(reference, zone),
    })
}

fn parse_zones<S: AsRef<str>>(zones: &[S]) -> Result<Vec<ZoneId>> {
    zones.iter().map(|name| ZoneId::parse(name.as_ref())).collect()
}
