//! Ad provider settings and their cache.
//!
//! Settings live in storage and are read on nearly every page render, so the
//! component serving them keeps a [`TtlCache`]: one value plus an expiry
//! timestamp, invalidated explicitly whenever the admin layer writes.

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;
use std::time::{Duration, Instant};
use tracing::{debug, warn};

/// How long loaded settings are served before storage is read again.
pub const DEFAULT_ADS_TTL: Duration = Duration::from_secs(60);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AdProvider {
    Adsense,
    Adsterra,
    Monetag,
    Hilltopads,
    Custom,
}

impl AdProvider {
    pub const ALL: [AdProvider; 5] =
        [AdProvider::Adsense, AdProvider::Adsterra, AdProvider::Monetag, AdProvider::Hilltopads, AdProvider::Custom];

    pub fn as_str(&self) -> &'static str {
        match self {
            AdProvider::Adsense => "adsense",
            AdProvider::Adsterra => "adsterra",
            AdProvider::Monetag => "monetag",
            AdProvider::Hilltopads => "hilltopads",
            AdProvider::Custom => "custom",
        }
    }
}

impl FromStr for AdProvider {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        AdProvider::ALL.into_iter().find(|p| p.as_str() == s).ok_or_else(|| Error::InvalidProvider(s.to_string()))
    }
}

impl fmt::Display for AdProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SlotPosition {
    Header,
    Sidebar,
    InContent,
    Footer,
}

impl SlotPosition {
    pub fn key(&self) -> &'static str {
        match self {
            SlotPosition::Header => "header",
            SlotPosition::Sidebar => "sidebar",
            SlotPosition::InContent => "inContent",
            SlotPosition::Footer => "footer",
        }
    }
}

/// HTML snippets per ad slot, stored as a JSON object.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SlotConfig {
    pub header: Option<String>,
    pub sidebar: Option<String>,
    pub in_content: Option<String>,
    pub footer: Option<String>,
    /// Anything else stored alongside the four standard positions.
    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

impl SlotConfig {
    /// Snippet for `position`; empty snippets count as absent.
    pub fn get(&self, position: SlotPosition) -> Option<&str> {
        let html = match position {
            SlotPosition::Header => &self.header,
            SlotPosition::Sidebar => &self.sidebar,
            SlotPosition::InContent => &self.in_content,
            SlotPosition::Footer => &self.footer,
        };
        html.as_deref().filter(|s| !s.trim().is_empty())
    }

    pub fn validate(json: &str) -> Result<SlotConfig> {
        Ok(serde_json::from_str(json)?)
    }
}

/// Lenient parse used on the render path: malformed JSON means no slots.
pub fn parse_slots(json: &str) -> SlotConfig {
    SlotConfig::validate(json).unwrap_or_default()
}

/// The stored ads settings record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdsSettings {
    pub provider: AdProvider,
    pub adsense_client_id: Option<String>,
    pub ads_txt_lines: String,
    pub head_html: String,
    pub body_html: String,
    pub slots_json: String,
    pub verification_meta: String,
}

impl Default for AdsSettings {
    fn default() -> Self {
        AdsSettings {
            provider: AdProvider::Adsense,
            adsense_client_id: None,
            ads_txt_lines: String::new(),
            head_html: String::new(),
            body_html: String::new(),
            slots_json: "{}".to_string(),
            verification_meta: String::new(),
        }
    }
}

impl AdsSettings {
    /// Body served at `/ads.txt`.
    pub fn ads_txt(&self) -> &str {
        self.ads_txt_lines.trim()
    }

    pub fn slots(&self) -> SlotConfig {
        parse_slots(&self.slots_json)
    }

    /// Apply a partial update from the admin form.
    ///
    /// The update is validated as a whole before any field changes. Slot
    /// JSON only has to be well-formed; its shape is checked on render.
    pub fn apply(&mut self, update: AdsUpdate) -> Result<()> {
        let provider = update.provider.as_deref().map(AdProvider::from_str).transpose()?;
        if let Some(json) = update.slots_json.as_deref() {
            serde_json::from_str::<Value>(json)?;
        }

        if let Some(provider) = provider {
            self.provider = provider;
        }
        if let Some(id) = update.adsense_client_id {
            self.adsense_client_id = Some(id);
        }
        if let Some(lines) = update.ads_txt_lines {
            self.ads_txt_lines = lines;
        }
        if let Some(html) = update.head_html {
            self.head_html = html;
        }
        if let Some(html) = update.body_html {
            self.body_html = html;
        }
        if let Some(json) = update.slots_json {
            self.slots_json = json;
        }
        if let Some(meta) = update.verification_meta {
            self.verification_meta = meta;
        }
        Ok(())
    }
}

/// Partial update; `None` leaves a field unchanged.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdsUpdate {
    pub provider: Option<String>,
    pub adsense_client_id: Option<String>,
    pub ads_txt_lines: Option<String>,
    pub head_html: Option<String>,
    pub body_html: Option<String>,
    pub slots_json: Option<String>,
    pub verification_meta: Option<String>,
}

// --- Cache -------------------------------------------------------------------

#[derive(Debug, Clone)]
struct CacheEntry<T> {
    value: Option<T>,
    expires_at: Instant,
}

/// A single cached value with a time-to-live.
///
/// A loaded `None` (nothing stored yet) is cached like any other value. A
/// failed load is not cached, so the next call retries.
#[derive(Debug, Clone)]
pub struct TtlCache<T> {
    ttl: Duration,
    entry: Option<CacheEntry<T>>,
}

impl<T: Clone> TtlCache<T> {
    pub fn new(ttl: Duration) -> Self {
        TtlCache { ttl, entry: None }
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    pub fn get_or_load<E, F>(&mut self, loader: F) -> Option<T>
    where
        E: fmt::Display,
        F: FnOnce() -> std::result::Result<Option<T>, E>,
    {
        self.get_or_load_at(Instant::now(), loader)
    }

    /// [`get_or_load`](Self::get_or_load) against an explicit clock reading.
    pub fn get_or_load_at<E, F>(&mut self, now: Instant, loader: F) -> Option<T>
    where
        E: fmt::Display,
        F: FnOnce() -> std::result::Result<Option<T>, E>,
    {
        if let Some(entry) = self.fresh_entry(now) {
            debug!("ads cache hit");
            return entry.value.clone();
        }

        debug!("ads cache miss, loading");
        match loader() {
            Ok(value) => {
                self.entry = Some(CacheEntry { value: value.clone(), expires_at: now + self.ttl });
                value
            }
            Err(err) => {
                warn!(error = %err, "failed to load ads settings");
                None
            }
        }
    }

    pub fn is_fresh_at(&self, now: Instant) -> bool {
        self.fresh_entry(now).is_some()
    }

    /// Drop the cached value; the next read goes to storage.
    pub fn invalidate(&mut self) {
        debug!("ads cache invalidated");
        self.entry = None;
    }

    fn fresh_entry(&self, now: Instant) -> Option<&CacheEntry<T>> {
        self.entry.as_ref().filter(|entry| now < entry.expires_at)
    }
}

impl<T: Clone> Default for TtlCache<T> {
    fn default() -> Self {
        TtlCache::new(DEFAULT_ADS_TTL)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    #[test]
    fn provider_names() {
        assert_eq!("monetag".parse::<AdProvider>().unwrap(), AdProvider::Monetag);
        assert_eq!(AdProvider::Hilltopads.to_string(), "hilltopads");
        assert!(matches!("AdSense".parse::<AdProvider>(), Err(Error::InvalidProvider(_))));
    }

    #[test]
    fn slots_parse_leniently() {
        let slots = parse_slots(r#"{"header": "<div>h</div>", "inContent": "  ", "popunder": "<script></script>"}"#);
        assert_eq!(slots.get(SlotPosition::Header), Some("<div>h</div>"));
        assert_eq!(slots.get(SlotPosition::InContent), None);
        assert_eq!(slots.get(SlotPosition::Footer), None);
        assert_eq!(slots.extra.get("popunder").and_then(Value::as_str), Some("<script></script>"));

        assert_eq!(parse_slots("not json"), SlotConfig::default());
        assert!(matches!(SlotConfig::validate("not json"), Err(Error::Json(_))));
    }

    #[test]
    fn apply_validates_before_writing() {
        let mut settings = AdsSettings::default();

        let bad = AdsUpdate {
            provider: Some("custom".into()),
            slots_json: Some("{".into()),
            ..Default::default()
        };
        assert!(settings.apply(bad).is_err());
        assert_eq!(settings.provider, AdProvider::Adsense);

        let update: AdsUpdate =
            serde_json::from_str(r#"{"provider": "adsterra", "adsTxtLines": "  google.com, pub-1, DIRECT \n"}"#)
                .unwrap();
        settings.apply(update).unwrap();
        assert_eq!(settings.provider, AdProvider::Adsterra);
        assert_eq!(settings.ads_txt(), "google.com, pub-1, DIRECT");
        assert_eq!(settings.slots_json, "{}");
    }

    #[test]
    fn non_string_slot_values_keep_the_standard_slots() {
        let slots = parse_slots(r#"{"header": "<div>h</div>", "rotate": true, "weights": [1, 2]}"#);
        assert_eq!(slots.get(SlotPosition::Header), Some("<div>h</div>"));
        assert_eq!(slots.extra.get("rotate"), Some(&Value::Bool(true)));
        assert!(SlotConfig::validate(r#"{"rotate": 30}"#).is_ok());
    }

    #[test]
    fn apply_accepts_any_well_formed_slot_json() {
        let mut settings = AdsSettings::default();
        let update = AdsUpdate { slots_json: Some("[]".into()), ..Default::default() };
        settings.apply(update).unwrap();
        assert_eq!(settings.slots_json, "[]");
        assert_eq!(settings.slots(), SlotConfig::default());

        let update = AdsUpdate { slots_json: Some(r#"{"header": 1}"#.into()), ..Default::default() };
        settings.apply(update).unwrap();
        assert!(matches!(
            settings.apply(AdsUpdate { slots_json: Some("{".into()), ..Default::default() }),
            Err(Error::Json(_))
        ));
    }

    #[test]
    fn client_id_is_stored_as_given() {
        let mut settings = AdsSettings::default();
        settings.apply(AdsUpdate { adsense_client_id: Some(String::new()), ..Default::default() }).unwrap();
        assert_eq!(settings.adsense_client_id.as_deref(), Some(""));
    }

    #[test]
    fn cache_serves_until_expiry() {
        let mut cache: TtlCache<AdsSettings> = TtlCache::new(Duration::from_secs(60));
        let loads = Cell::new(0);
        let load = || {
            loads.set(loads.get() + 1);
            Ok::<_, String>(Some(AdsSettings::default()))
        };

        let t0 = Instant::now();
        assert!(cache.get_or_load_at(t0, load).is_some());
        assert!(cache.get_or_load_at(t0 + Duration::from_secs(59), load).is_some());
        assert_eq!(loads.get(), 1);

        assert!(!cache.is_fresh_at(t0 + Duration::from_secs(60)));
        cache.get_or_load_at(t0 + Duration::from_secs(60), load);
        assert_eq!(loads.get(), 2);
    }

    #[test]
    fn invalidate_forces_reload() {
        let mut cache: TtlCache<u32> = TtlCache::default();
        let t0 = Instant::now();
        assert_eq!(cache.get_or_load_at(t0, || Ok::<_, String>(Some(1))), Some(1));
        assert_eq!(cache.get_or_load_at(t0, || Ok::<_, String>(Some(2))), Some(1));

        cache.invalidate();
        assert_eq!(cache.get_or_load_at(t0, || Ok::<_, String>(Some(2))), Some(2));
    }

    #[test]
    fn empty_result_is_cached_but_failures_are_not() {
        let mut cache: TtlCache<u32> = TtlCache::default();
        let t0 = Instant::now();

        assert_eq!(cache.get_or_load_at(t0, || Err::<Option<u32>, _>("db down")), None);
        assert!(!cache.is_fresh_at(t0));

        assert_eq!(cache.get_or_load_at(t0, || Ok::<_, String>(None)), None);
        assert!(cache.is_fresh_at(t0));
        assert_eq!(cache.get_or_load_at(t0, || Ok::<_, String>(Some(7))), None);
    }
}
