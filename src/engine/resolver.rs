//! Zone resolution.
//!
//! [`ZoneId`] is the only way into the rest of the engine: an identifier that
//! does not exist in the IANA database is rejected here with
//! [`Error::UnknownZone`] and never reaches the offset math. There is no
//! fallback zone and no retry; resolution is local and deterministic.

use super::offset::is_in_dst;
use crate::{Error, Instant, Result};
use chrono::{DateTime, Offset, Timelike};
use chrono_tz::Tz;
use std::fmt;
use std::str::FromStr;

/// Lowest real-world UTC offset, in minutes (UTC-12:00).
pub const MIN_OFFSET_MINUTES: i32 = -720;

/// Highest real-world UTC offset, in minutes (UTC+14:00).
pub const MAX_OFFSET_MINUTES: i32 = 840;

/// A validated IANA time-zone identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ZoneId(Tz);

impl ZoneId {
    /// Resolve `name` against the bundled IANA database.
    ///
    /// Surrounding whitespace is ignored; the identifier itself is matched
    /// exactly (`"america/new_york"` is unknown).
    pub fn parse(name: &str) -> Result<Self> {
        let name = name.trim();
        name.parse::<Tz>().map(ZoneId).map_err(|_| Error::UnknownZone(name.to_string()))
    }

    /// Canonical identifier, e.g. `"Europe/London"`.
    pub fn name(&self) -> &'static str {
        self.0.name()
    }

    pub fn tz(&self) -> Tz {
        self.0
    }

    /// Project `instant` into this zone's wall clock.
    pub fn at(&self, instant: Instant) -> DateTime<Tz> {
        instant.with_timezone(&self.0)
    }
}

impl From<Tz> for ZoneId {
    fn from(tz: Tz) -> Self {
        ZoneId(tz)
    }
}

impl FromStr for ZoneId {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        ZoneId::parse(s)
    }
}

impl fmt::Display for ZoneId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Offset of a zone at one instant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ZoneOffset {
    /// Signed minutes east of UTC.
    pub minutes: i32,
    /// Whether the zone is on daylight-saving time at this instant.
    pub dst: bool,
    /// Short name such as `"EDT"`; zones without one report a numeric form like `"-03"`.
    pub abbreviation: String,
}

/// Database offset in minutes, before the range check.
///
/// Sub-minute historical offsets (local mean time) are truncated.
pub(crate) fn raw_offset_minutes(instant: Instant, zone: ZoneId) -> i32 {
    zone.at(instant).offset().fix().local_minus_utc() / 60
}

/// Signed minutes east of UTC for `zone` at `instant`.
///
/// Fails with [`Error::OffsetOutOfRange`] if the database produces an offset
/// outside `[-720, +840]` minutes, as it does for some local-mean-time eras.
pub fn offset_minutes(instant: Instant, zone: ZoneId) -> Result<i32> {
    let minutes = raw_offset_minutes(instant, zone);
    if !(MIN_OFFSET_MINUTES..=MAX_OFFSET_MINUTES).contains(&minutes) {
        return Err(Error::OffsetOutOfRange { zone: zone.name().to_string(), minutes });
    }
    Ok(minutes)
}

/// Local hour-of-day of `instant` in `zone`, under the same range check as
/// [`offset_minutes`].
pub fn local_hour(instant: Instant, zone: ZoneId) -> Result<u32> {
    offset_minutes(instant, zone)?;
    Ok(zone.at(instant).hour())
}

/// Resolve the full [`ZoneOffset`] for `zone` at `instant`.
///
/// `dst` follows [`is_in_dst`], not the database's save component, which is
/// negative for zones such as `Europe/Dublin`.
pub fn resolve_offset(instant: Instant, zone: ZoneId) -> Result<ZoneOffset> {
    let minutes = offset_minutes(instant, zone)?;
    Ok(ZoneOffset {
        minutes,
        dst: is_in_dst(instant, zone),
        abbreviation: zone.at(instant).format("%Z").to_string(),
    })
}
