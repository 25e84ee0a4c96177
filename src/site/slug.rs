//! `/time/<slug>` routing.
//!
//! Two shapes share the route:
//!
//! ```text
//! new-york-to-london   pair  (from = "new-york", to = "london")
//! tokyo-time-now       city  ("tokyo")
//! ```
//!
//! A slug can look like both (`"rio-to-lisbon-time-now"`); the pair reading is
//! tried first and the city reading is the fallback when the pair lookup finds
//! nothing.

use crate::{Error, Result};

pub const PAIR_SEPARATOR: &str = "-to-";
pub const CITY_SUFFIX: &str = "-time-now";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TimeSlug {
    Pair { from: String, to: String },
    City(String),
}

impl TimeSlug {
    /// Every reading of `slug`, pair first.
    pub fn candidates(slug: &str) -> Vec<TimeSlug> {
        let mut out = Vec::with_capacity(2);
        if let Some((from, to)) = parse_pair_slug(slug) {
            out.push(TimeSlug::Pair { from: from.to_string(), to: to.to_string() });
        }
        if let Some(city) = parse_city_slug(slug) {
            out.push(TimeSlug::City(city.to_string()));
        }
        out
    }

    /// The preferred reading of `slug`.
    pub fn parse(slug: &str) -> Result<TimeSlug> {
        TimeSlug::candidates(slug).into_iter().next().ok_or_else(|| Error::InvalidSlug(slug.to_string()))
    }

    pub fn to_slug(&self) -> String {
        match self {
            TimeSlug::Pair { from, to } => pair_slug(from, to),
            TimeSlug::City(city) => city_page_slug(city),
        }
    }
}

/// Split `"<from>-to-<to>"` at the first separator. Both halves must be non-empty.
pub fn parse_pair_slug(slug: &str) -> Option<(&str, &str)> {
    let idx = slug.find(PAIR_SEPARATOR)?;
    let (from, to) = (&slug[..idx], &slug[idx + PAIR_SEPARATOR.len()..]);
    if from.is_empty() || to.is_empty() { None } else { Some((from, to)) }
}

/// City slug of a `"<city>-time-now"` page.
pub fn parse_city_slug(slug: &str) -> Option<&str> {
    slug.strip_suffix(CITY_SUFFIX).filter(|city| !city.is_empty())
}

pub fn pair_slug(from: &str, to: &str) -> String {
    format!("{from}{PAIR_SEPARATOR}{to}")
}

pub fn city_page_slug(city: &str) -> String {
    format!("{city}{CITY_SUFFIX}")
}

/// Lowercase, ASCII-alphanumeric runs joined by single hyphens.
///
/// `"St. John's"` becomes `"st-john-s"`.
pub fn slugify(name: &str) -> String {
    let lowered = name.to_lowercase();
    regex!(r"[^a-z0-9]+").replace_all(&lowered, "-").trim_matches('-').to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pair_and_city_slugs() {
        assert_eq!(parse_pair_slug("new-york-to-london"), Some(("new-york", "london")));
        assert_eq!(parse_pair_slug("-to-london"), None);
        assert_eq!(parse_pair_slug("london-to-"), None);
        assert_eq!(parse_pair_slug("toronto-time-now"), None);
        assert_eq!(parse_city_slug("toronto-time-now"), Some("toronto"));
        assert_eq!(parse_city_slug("-time-now"), None);
        assert_eq!(parse_city_slug("toronto"), None);
    }

    #[test]
    fn pair_reading_comes_first() {
        let candidates = TimeSlug::candidates("rio-to-lisbon-time-now");
        assert_eq!(
            candidates,
            vec![
                TimeSlug::Pair { from: "rio".into(), to: "lisbon-time-now".into() },
                TimeSlug::City("rio-to-lisbon".into()),
            ]
        );
        assert_eq!(TimeSlug::parse("tokyo-time-now").unwrap(), TimeSlug::City("tokyo".into()));
    }

    #[test]
    fn unknown_shape_is_not_found() {
        let err = TimeSlug::parse("about-us").unwrap_err();
        assert!(err.is_not_found());
    }

    #[test]
    fn slugs_round_trip_through_builders() {
        for slug in ["new-york-to-london", "tokyo-time-now"] {
            assert_eq!(TimeSlug::parse(slug).unwrap().to_slug(), slug);
        }
    }

    #[test]
    fn slugify_names() {
        assert_eq!(slugify("New York"), "new-york");
        assert_eq!(slugify("St. John's"), "st-john-s");
        assert_eq!(slugify("  Ho Chi Minh City "), "ho-chi-minh-city");
    }
}
