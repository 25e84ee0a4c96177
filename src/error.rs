//! Error taxonomy.
//!
//! Everything the zone engine can fail with is listed here. Callers decide
//! the user-facing outcome; [`Error::is_not_found`] marks the variants that
//! page routes render as "not found".

/// Crate-wide result alias.
pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The identifier is not in the IANA database.
    #[error("unknown time zone '{0}'")]
    UnknownZone(String),

    /// Overlap and planner computations accept between 2 and 8 zones.
    #[error("expected between 2 and 8 zones, got {count}")]
    InvalidZoneCount { count: usize },

    #[error("zone '{zone}' resolved to offset {minutes} minutes, outside [-720, +840]")]
    OffsetOutOfRange { zone: String, minutes: i32 },

    #[error("invalid working hours {start}..{end} (expected start < end <= 24)")]
    InvalidWorkHours { start: u32, end: u32 },

    #[error("'{0}' is neither a city nor a city-pair slug")]
    InvalidSlug(String),

    #[error("invalid ad provider '{0}'")]
    InvalidProvider(String),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    /// True when a page route should answer with "not found".
    pub fn is_not_found(&self) -> bool {
        matches!(self, Error::UnknownZone(_) | Error::InvalidSlug(_))
    }
}
