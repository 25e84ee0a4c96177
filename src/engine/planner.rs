//! Meeting-planner ranking.
//!
//! Uses the same per-UTC-hour projection as [`overlap_window`], but instead of
//! a yes/no filter every hour gets a score, so the planner can still suggest
//! something when the overlap window is empty.
//!
//! Per zone, a local hour is:
//!
//! ```text
//! Working   inside the work band                     2 points
//! Shoulder  up to SHOULDER_HOURS before or after it  1 point
//! Asleep    anything else                            0 points
//! ```
//!
//! Hours are ordered by the number of zones working, then by total points,
//! then by UTC hour.
//!
//! [`overlap_window`]: super::overlap::overlap_window

use super::overlap::{WorkHours, check_zone_count, utc_hours};
use super::resolver::{ZoneId, local_hour};
use crate::{Instant, Result};

/// Hours on either side of the work band that still count as reasonable.
pub const SHOULDER_HOURS: u32 = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Availability {
    Asleep,
    Shoulder,
    Working,
}

impl Availability {
    pub fn of(local_hour: u32, work: WorkHours) -> Self {
        if work.contains(local_hour) {
            Availability::Working
        } else if (local_hour < work.start() && local_hour + SHOULDER_HOURS >= work.start())
            || (local_hour >= work.end() && local_hour < work.end() + SHOULDER_HOURS)
        {
            Availability::Shoulder
        } else {
            Availability::Asleep
        }
    }

    fn points(self) -> u32 {
        match self {
            Availability::Asleep => 0,
            Availability::Shoulder => 1,
            Availability::Working => 2,
        }
    }
}

/// Score of one UTC hour across all zones.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HourScore {
    pub utc_hour: u32,
    /// Local hour-of-day per zone, in input order.
    pub local_hours: Vec<u32>,
    /// Number of zones inside their work band.
    pub working: usize,
    pub score: u32,
}

impl HourScore {
    /// Every zone is inside its work band.
    pub fn is_full_overlap(&self) -> bool {
        self.working == self.local_hours.len()
    }
}

/// Every UTC hour of the reference day, best first.
pub fn rank_meeting_hours(instant: Instant, zones: &[ZoneId], work: WorkHours) -> Result<Vec<HourScore>> {
    check_zone_count(zones.len())?;

    let mut ranked: Vec<HourScore> = utc_hours(instant)
        .map(|(utc_hour, at)| {
            let local_hours = zones.iter().map(|&zone| local_hour(at, zone)).collect::<Result<Vec<u32>>>()?;
            let availability: Vec<Availability> = local_hours.iter().map(|&h| Availability::of(h, work)).collect();
            Ok(HourScore {
                utc_hour,
                working: availability.iter().filter(|a| **a == Availability::Working).count(),
                score: availability.iter().map(|a| a.points()).sum(),
                local_hours,
            })
        })
        .collect::<Result<_>>()?;

    ranked.sort_by(|a, b| {
        b.working.cmp(&a.working).then_with(|| b.score.cmp(&a.score)).then_with(|| a.utc_hour.cmp(&b.utc_hour))
    });
    Ok(ranked)
}

/// Up to `limit` top-ranked hours.
pub fn best_meeting_hours(instant: Instant, zones: &[ZoneId], work: WorkHours, limit: usize) -> Result<Vec<HourScore>> {
    let mut ranked = rank_meeting_hours(instant, zones, work)?;
    ranked.truncate(limit);
    Ok(ranked)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Error;
    use chrono::{TimeZone, Utc};

    fn zones(names: &[&str]) -> Vec<ZoneId> {
        names.iter().map(|n| ZoneId::parse(n).unwrap()).collect()
    }

    #[test]
    fn availability_bands() {
        let work = WorkHours::STANDARD;
        assert_eq!(Availability::of(6, work), Availability::Asleep);
        assert_eq!(Availability::of(7, work), Availability::Shoulder);
        assert_eq!(Availability::of(8, work), Availability::Shoulder);
        assert_eq!(Availability::of(9, work), Availability::Working);
        assert_eq!(Availability::of(16, work), Availability::Working);
        assert_eq!(Availability::of(17, work), Availability::Shoulder);
        assert_eq!(Availability::of(18, work), Availability::Shoulder);
        assert_eq!(Availability::of(19, work), Availability::Asleep);
        assert_eq!(Availability::of(0, WorkHours::new(0, 8).unwrap()), Availability::Working);
    }

    #[test]
    fn ranking_puts_full_overlap_first() {
        let instant = Utc.with_ymd_and_hms(2024, 1, 15, 0, 0, 0).unwrap();
        let ranked = rank_meeting_hours(instant, &zones(&["America/New_York", "Europe/London"]), WorkHours::STANDARD)
            .unwrap();

        assert_eq!(ranked.len(), 24);
        let top: Vec<u32> = ranked.iter().take(3).map(|s| s.utc_hour).collect();
        assert_eq!(top, vec![14, 15, 16]);
        assert!(ranked[0].is_full_overlap());
        assert_eq!(ranked[0].local_hours, vec![9, 14]);
        assert!(!ranked[3].is_full_overlap());
    }

    #[test]
    fn ranking_still_suggests_hours_without_overlap() {
        let instant = Utc.with_ymd_and_hms(2024, 1, 15, 0, 0, 0).unwrap();
        let best = best_meeting_hours(instant, &zones(&["America/Los_Angeles", "Asia/Kolkata"]), WorkHours::STANDARD, 1)
            .unwrap();

        // The work bands never meet, so the best hour has one zone working
        // and the other asleep; ties go to the earliest UTC hour.
        assert_eq!(best.len(), 1);
        assert_eq!(best[0].working, 1);
        assert_eq!(best[0].score, 2);
        assert_eq!(best[0].utc_hour, 0);
        assert!(!best[0].is_full_overlap());
    }

    #[test]
    fn ranking_validates_zone_count() {
        let instant = Utc.with_ymd_and_hms(2024, 1, 15, 0, 0, 0).unwrap();
        let err = rank_meeting_hours(instant, &[], WorkHours::STANDARD).unwrap_err();
        assert!(matches!(err, Error::InvalidZoneCount { count: 0 }));
    }

    #[test]
    fn ranking_surfaces_out_of_range_offsets() {
        let instant = Utc.with_ymd_and_hms(1840, 6, 1, 0, 0, 0).unwrap();
        let err = rank_meeting_hours(instant, &zones(&["UTC", "Asia/Manila"]), WorkHours::STANDARD).unwrap_err();
        assert!(matches!(err, Error::OffsetOutOfRange { .. }));
    }
}
