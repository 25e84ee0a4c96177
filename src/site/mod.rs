//! Helpers for the SEO page layer around the engine.
//!
//! - `slug`: `/time/<slug>` routing for city and city-pair pages.
//! - `template`: `{var}` substitution for SEO templates and FAQ merging.
//! - `ads`: ad provider settings and their time-boxed cache.

pub mod ads;
pub mod slug;
pub mod template;

pub use ads::{AdProvider, AdsSettings, AdsUpdate, DEFAULT_ADS_TTL, SlotConfig, SlotPosition, TtlCache, parse_slots};
pub use slug::{TimeSlug, city_page_slug, pair_slug, parse_city_slug, parse_pair_slug, slugify};
pub use template::{Faq, PairVars, TemplateVars, apply_template, merge_faqs};
