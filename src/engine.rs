//! Time-zone computation engine.
//!
//! Everything in here is a pure function of a reference [`Instant`] and one or
//! more resolved [`ZoneId`]s. Nothing is cached between calls: an offset is a
//! function of `(instant, zone)` and changes at DST transition boundaries, so
//! every query goes back to the zone database.
//!
//! ## How the parts work together
//!
//! ```text
//! "America/New_York" ── ZoneId::parse ──┐          (resolver.rs)
//!                                       │
//!           instant ────────────────────┼── resolve_offset / offset_minutes
//!                                       │
//!            ┌──────────────────────────┼──────────────────────────┐
//!            v                          v                          v
//!   offset.rs                    pairwise.rs                 overlap.rs
//!   - UTC±HH:MM                  - diff in hours             - 24 UTC hours of the day
//!   - abbreviation               - example table             - every zone inside work band
//!   - observes / in DST          - day rollover                        │
//!                                                                      v
//!                                                              planner.rs
//!                                                              - rank every hour
//! ```
//!
//! Every offset the other modules read goes through the resolver's range
//! check, so an out-of-range offset fails each operation the same way. The
//! resolver in turn takes its DST flag from `offset.rs`, so `resolve_offset`
//! and `is_in_dst` never disagree.
//!
//! ## Responsibilities by module
//!
//! - `resolver.rs`: wraps `chrono_tz`, validates identifiers and the offset
//!   range invariant.
//! - `offset.rs`: offset strings, abbreviations and DST classification.
//! - `pairwise.rs`: headline hour difference and example conversion tables.
//! - `overlap.rs`: working-hours band and the overlap window.
//! - `planner.rs`: meeting-planner ranking over the same per-hour projection.
//!
//! [`Instant`]: crate::Instant

#[path = "engine/offset.rs"]
pub mod offset;
#[path = "engine/overlap.rs"]
pub mod overlap;
#[path = "engine/pairwise.rs"]
pub mod pairwise;
#[path = "engine/planner.rs"]
pub mod planner;
#[path = "engine/resolver.rs"]
pub mod resolver;


pub use offset::{
    format_offset_minutes, is_in_dst, observes_dst, observes_dst_in, standard_offset_minutes, utc_offset_string,
    zone_abbreviation,
};
pub use overlap::{OverlapWindow, WorkHours, check_zone_count, overlap_window};
pub use pairwise::{
    ConversionExample, EXAMPLE_TIMES, generate_example_conversions, localize, offset_diff_hours, offset_diff_minutes,
};
pub use planner::{Availability, HourScore, best_meeting_hours, rank_meeting_hours};
pub use resolver::{
    MAX_OFFSET_MINUTES, MIN_OFFSET_MINUTES, ZoneId, ZoneOffset, local_hour, offset_minutes, resolve_offset,
};
