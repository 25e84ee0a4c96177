//! SEO template substitution.
//!
//! Templates use `{name}` placeholders. Known names are replaced everywhere
//! they occur; unknown names are left untouched so a typo in an admin-edited
//! template shows up on the page instead of silently vanishing.

use regex::Captures;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};

/// Sort order of the first FAQ generated from a template.
pub const TEMPLATE_FAQ_SORT_BASE: i32 = 100;

/// Placeholder lookup.
pub trait TemplateVars {
    fn lookup(&self, name: &str) -> Option<&str>;
}

impl TemplateVars for HashMap<String, String> {
    fn lookup(&self, name: &str) -> Option<&str> {
        self.get(name).map(String::as_str)
    }
}

impl TemplateVars for HashMap<&str, &str> {
    fn lookup(&self, name: &str) -> Option<&str> {
        self.get(name).copied()
    }
}

/// Variables available to city-pair templates.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PairVars {
    pub from_city: String,
    pub to_city: String,
    pub from_country: String,
    pub to_country: String,
    pub from_zone: String,
    pub to_zone: String,
}

impl TemplateVars for PairVars {
    fn lookup(&self, name: &str) -> Option<&str> {
        let value = match name {
            "fromCity" => &self.from_city,
            "toCity" => &self.to_city,
            "fromCountry" => &self.from_country,
            "toCountry" => &self.to_country,
            "fromZone" => &self.from_zone,
            "toZone" => &self.to_zone,
            _ => return None,
        };
        Some(value.as_str())
    }
}

pub fn apply_template(template: &str, vars: &impl TemplateVars) -> String {
    regex!(r"\{(\w+)\}")
        .replace_all(template, |caps: &Captures| match vars.lookup(&caps[1]) {
            Some(value) => value.to_string(),
            None => caps[0].to_string(),
        })
        .into_owned()
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Faq {
    pub id: String,
    pub question: String,
    pub answer: String,
    pub sort_order: i32,
}

#[derive(Debug, Deserialize)]
struct FaqTemplate {
    q: String,
    a: String,
}

/// Stored FAQs followed by the FAQs rendered from `template_json`.
///
/// `template_json` is a JSON array of `{"q": .., "a": ..}`. Rendered questions
/// that already exist among the stored ones (case-insensitively) are dropped.
/// A template that does not parse contributes nothing.
pub fn merge_faqs(stored: Vec<Faq>, template_json: Option<&str>, vars: &impl TemplateVars) -> Vec<Faq> {
    let Some(json) = template_json else {
        return stored;
    };
    let Ok(templates) = serde_json::from_str::<Vec<FaqTemplate>>(json) else {
        return stored;
    };

    let known: HashSet<String> = stored.iter().map(|f| f.question.to_lowercase()).collect();
    let generated: Vec<Faq> = templates
        .iter()
        .enumerate()
        .map(|(i, tpl)| Faq {
            id: format!("tpl-{i}"),
            question: apply_template(&tpl.q, vars),
            answer: apply_template(&tpl.a, vars),
            sort_order: TEMPLATE_FAQ_SORT_BASE + i as i32,
        })
        .filter(|faq| !known.contains(&faq.question.to_lowercase()))
        .collect();

    let mut merged = stored;
    merged.extend(generated);
    merged
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vars() -> PairVars {
        PairVars {
            from_city: "New York".into(),
            to_city: "London".into(),
            from_country: "United States".into(),
            to_country: "United Kingdom".into(),
            from_zone: "America/New_York".into(),
            to_zone: "Europe/London".into(),
        }
    }

    #[test]
    fn replaces_every_known_placeholder() {
        let out = apply_template("{fromCity} to {toCity} | {fromCity} ({fromZone})", &vars());
        assert_eq!(out, "New York to London | New York (America/New_York)");
    }

    #[test]
    fn leaves_unknown_placeholders() {
        assert_eq!(apply_template("{fromCity} {nope} {}", &vars()), "New York {nope} {}");
    }

    #[test]
    fn map_vars() {
        let map: HashMap<&str, &str> = HashMap::from([("city", "Tokyo")]);
        assert_eq!(apply_template("Time in {city}", &map), "Time in Tokyo");
    }

    #[test]
    fn merges_template_faqs_after_stored() {
        let stored = vec![Faq {
            id: "db-1".into(),
            question: "What time is it in london?".into(),
            answer: "Depends.".into(),
            sort_order: 1,
        }];
        let json = r#"[
            {"q": "What time is it in {toCity}?", "a": "See above."},
            {"q": "Does {fromCity} observe DST?", "a": "Yes, {fromZone} does."}
        ]"#;

        let merged = merge_faqs(stored, Some(json), &vars());
        assert_eq!(merged.len(), 2);
        assert_eq!(merged[0].id, "db-1");
        assert_eq!(merged[1].id, "tpl-1");
        assert_eq!(merged[1].question, "Does New York observe DST?");
        assert_eq!(merged[1].answer, "Yes, America/New_York does.");
        assert_eq!(merged[1].sort_order, 101);
    }

    #[test]
    fn broken_template_is_ignored() {
        let merged = merge_faqs(Vec::new(), Some("{not json"), &vars());
        assert!(merged.is_empty());
        assert!(merge_faqs(Vec::new(), None, &vars()).is_empty());
    }
}
