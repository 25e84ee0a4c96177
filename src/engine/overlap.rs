//! Working-hours overlap.
//!
//! The reference day is the UTC calendar day of the instant. Each of its 24
//! whole UTC hours is projected into every zone using that zone's offset at
//! that exact hour, and kept only if every projection lands inside the
//! working band:
//!
//! ```text
//! UTC hour      00 .. 13 14 15 16 17 .. 23
//! New York       19 .. 08 09 10 11 12 .. 18   (EST)
//! London         00 .. 13 14 15 16 17 .. 23   (GMT)
//! both in 9-17                ^  ^  ^
//! ```
//!
//! Resolving the offset per hour (instead of once per zone) keeps the result
//! right on transition days and for fractional-offset zones.

use super::resolver::{ZoneId, local_hour};
use crate::{Error, Instant, MAX_ZONES, MIN_ZONES, Result};
use std::ops::Range;

/// A local working-hours band `[start, end)`, in whole hours.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WorkHours {
    start: u32,
    end: u32,
}

impl WorkHours {
    /// 09:00 to 17:00.
    pub const STANDARD: WorkHours = WorkHours { start: 9, end: 17 };

    pub fn new(start: u32, end: u32) -> Result<Self> {
        if start < end && end <= 24 {
            Ok(WorkHours { start, end })
        } else {
            Err(Error::InvalidWorkHours { start, end })
        }
    }

    pub fn start(&self) -> u32 {
        self.start
    }

    pub fn end(&self) -> u32 {
        self.end
    }

    /// Whether a local hour-of-day falls inside the band.
    pub fn contains(&self, hour: u32) -> bool {
        (self.start..self.end).contains(&hour)
    }
}

impl Default for WorkHours {
    fn default() -> Self {
        WorkHours::STANDARD
    }
}

/// Ascending, unique UTC hours (0-23) where every zone is inside its band.
///
/// An empty window is a normal outcome, not an error.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OverlapWindow {
    hours: Vec<u32>,
}

impl OverlapWindow {
    pub fn hours(&self) -> &[u32] {
        &self.hours
    }

    pub fn is_empty(&self) -> bool {
        self.hours.is_empty()
    }

    pub fn len(&self) -> usize {
        self.hours.len()
    }

    pub fn contains(&self, hour: u32) -> bool {
        self.hours.binary_search(&hour).is_ok()
    }

    /// Consecutive hours collapsed into half-open ranges, e.g. `[14..17]`.
    pub fn ranges(&self) -> Vec<Range<u32>> {
        let mut out: Vec<Range<u32>> = Vec::new();
        for &hour in &self.hours {
            match out.last_mut() {
                Some(last) if last.end == hour => last.end = hour + 1,
                _ => out.push(hour..hour + 1),
            }
        }
        out
    }

    pub fn into_hours(self) -> Vec<u32> {
        self.hours
    }
}

/// Reject zone lists outside `2..=8`.
pub fn check_zone_count(count: usize) -> Result<()> {
    if (MIN_ZONES..=MAX_ZONES).contains(&count) { Ok(()) } else { Err(Error::InvalidZoneCount { count }) }
}

/// UTC hours of the reference day during which all `zones` are inside `work`.
pub fn overlap_window(instant: Instant, zones: &[ZoneId], work: WorkHours) -> Result<OverlapWindow> {
    check_zone_count(zones.len())?;

    let mut hours = Vec::new();
    for (hour, at) in utc_hours(instant) {
        let mut inside = true;
        for &zone in zones {
            inside &= work.contains(local_hour(at, zone)?);
        }
        if inside {
            hours.push(hour);
        }
    }

    Ok(OverlapWindow { hours })
}

/// The 24 whole hours of the UTC day containing `instant`.
pub(crate) fn utc_hours(instant: Instant) -> impl Iterator<Item = (u32, Instant)> {
    let day = instant.date_naive();
    (0..24).filter_map(move |hour| day.and_hms_opt(hour, 0, 0).map(|naive| (hour, naive.and_utc())))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn zones(names: &[&str]) -> Vec<ZoneId> {
        names.iter().map(|n| ZoneId::parse(n).unwrap()).collect()
    }

    #[test]
    fn work_hours_validation() {
        assert_eq!(WorkHours::default(), WorkHours::new(9, 17).unwrap());
        assert!(WorkHours::new(0, 24).is_ok());
        assert!(matches!(WorkHours::new(17, 9), Err(Error::InvalidWorkHours { start: 17, end: 9 })));
        assert!(WorkHours::new(9, 9).is_err());
        assert!(WorkHours::new(9, 25).is_err());
        assert!(WorkHours::STANDARD.contains(9));
        assert!(!WorkHours::STANDARD.contains(17));
    }

    #[test]
    fn zone_count_bounds() {
        let instant = Utc.with_ymd_and_hms(2024, 1, 15, 0, 0, 0).unwrap();
        let one = zones(&["UTC"]);
        let nine = zones(&["UTC"; 9]);
        assert!(matches!(overlap_window(instant, &one, WorkHours::STANDARD), Err(Error::InvalidZoneCount { count: 1 })));
        assert!(matches!(overlap_window(instant, &nine, WorkHours::STANDARD), Err(Error::InvalidZoneCount { count: 9 })));
        assert!(overlap_window(instant, &zones(&["UTC"; 8]), WorkHours::STANDARD).is_ok());
    }

    #[test]
    fn new_york_and_london_in_winter() {
        let instant = Utc.with_ymd_and_hms(2024, 1, 15, 8, 0, 0).unwrap();
        let window =
            overlap_window(instant, &zones(&["America/New_York", "Europe/London"]), WorkHours::STANDARD).unwrap();
        assert_eq!(window.hours(), &[14, 15, 16]);
        assert_eq!(window.ranges(), vec![14..17]);
        assert!(window.contains(15));
        assert!(!window.contains(17));
    }

    #[test]
    fn custom_band_widens_window() {
        let instant = Utc.with_ymd_and_hms(2024, 1, 15, 8, 0, 0).unwrap();
        let work = WorkHours::new(8, 20).unwrap();
        let window = overlap_window(instant, &zones(&["America/New_York", "Europe/London"]), work).unwrap();
        assert_eq!(window.hours(), &[13, 14, 15, 16, 17, 18, 19]);
    }

    #[test]
    fn ranges_split_on_gaps() {
        let window = OverlapWindow { hours: vec![0, 1, 5, 22, 23] };
        assert_eq!(window.ranges(), vec![0..2, 5..6, 22..24]);
        assert!(OverlapWindow::default().ranges().is_empty());
    }

    #[test]
    fn out_of_range_offset_fails_the_window() {
        let instant = Utc.with_ymd_and_hms(1840, 6, 1, 0, 0, 0).unwrap();
        let err = overlap_window(instant, &zones(&["UTC", "Asia/Manila"]), WorkHours::STANDARD).unwrap_err();
        assert!(matches!(err, Error::OffsetOutOfRange { .. }));
    }
}
