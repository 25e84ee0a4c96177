#[macro_use]
mod macros;
mod api;
pub mod engine;
mod error;
pub mod format;
pub mod site;

pub use api::{
    Context, Options, PairSummary, ZoneReport, ZoneSummary, generate_example_conversions, is_in_dst, observes_dst,
    offset_diff_hours, overlap_window, resolve_offset, utc_offset_string, zone_abbreviation, zone_report,
    zone_report_with,
};
pub use engine::{
    ConversionExample, HourScore, OverlapWindow, WorkHours, ZoneId, ZoneOffset, best_meeting_hours, rank_meeting_hours,
};
pub use error::{Error, Result};

// --- Shared value types -----------------------------------------------------

/// A point in time with no zone attached.
///
/// Every computation in the engine is a function of `(Instant, ZoneId)`;
/// offsets are never cached beyond a single call.
pub type Instant = chrono::DateTime<chrono::Utc>;

/// Fewest zones accepted by overlap scoring and the meeting planner.
pub const MIN_ZONES: usize = 2;

/// Most zones accepted by overlap scoring and the meeting planner.
pub const MAX_ZONES: usize = 8;
