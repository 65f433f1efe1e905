//! Defensive extraction of structured values from untrusted upstream text.
//!
//! The analysis service is a free-text generator with no enforced schema,
//! so every response is treated as possibly malformed. Extraction never
//! hard-fails: structured shapes degrade to a tagged [`Extraction::Fallback`]
//! carrying the raw text, and identification degrades to an empty
//! suggestion list plus the raw response.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

/// Result of extracting a structured value from free text: either the
/// value parsed confidently, or the raw text kept as a usable fallback.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Extraction<T> {
    Parsed(T),
    Fallback(String),
}

impl Extraction<String> {
    /// The usable value regardless of how confidently it was extracted.
    pub fn value(&self) -> &str {
        match self {
            Extraction::Parsed(v) => v,
            Extraction::Fallback(raw) => raw,
        }
    }

    pub fn into_value(self) -> String {
        match self {
            Extraction::Parsed(v) => v,
            Extraction::Fallback(raw) => raw,
        }
    }

    pub fn is_parsed(&self) -> bool {
        matches!(self, Extraction::Parsed(_))
    }
}

static HEX_COLOR: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"#[0-9A-Fa-f]{6}").expect("hex color regex"));

// Greedy, dot-matches-newline: grabs the outermost brace span in prose.
static JSON_OBJECT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?s)\{.*\}").expect("json object regex"));

/// Split a weather response into today's line and, when present,
/// tomorrow's. A response with no usable lines degrades to the whole raw
/// text as today's entry; extra lines beyond the second are ignored.
pub fn weather_lines(raw: &str) -> (String, Option<String>) {
    let mut lines = raw.lines().map(str::trim).filter(|l| !l.is_empty());
    match lines.next() {
        Some(today) => (today.to_string(), lines.next().map(str::to_string)),
        None => (raw.trim().to_string(), None),
    }
}

/// Locate a `#RRGGBB` code anywhere in the response.
pub fn hex_color(raw: &str) -> Extraction<String> {
    match HEX_COLOR.find(raw) {
        Some(m) => Extraction::Parsed(m.as_str().to_string()),
        None => Extraction::Fallback(raw.trim().to_string()),
    }
}

/// Locate a JSON object in the response and read its `stage` field.
/// Anything that doesn't parse degrades to the trimmed raw text.
pub fn stage_json(raw: &str) -> Extraction<String> {
    let fallback = || Extraction::Fallback(raw.trim().to_string());
    let Some(m) = JSON_OBJECT.find(raw) else {
        return fallback();
    };
    match serde_json::from_str::<serde_json::Value>(m.as_str()) {
        Ok(value) => match value.get("stage").and_then(|s| s.as_str()) {
            Some(stage) => Extraction::Parsed(stage.to_string()),
            None => fallback(),
        },
        Err(_) => fallback(),
    }
}

/// One ranked species guess, reduced from the identification response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpeciesSuggestion {
    pub rank: u32,
    pub name: String,
    /// Integer percentage, 0-100.
    pub probability: u32,
    /// At most two reference images, passed through untrusted.
    pub similar_images: Vec<serde_json::Value>,
}

/// Reduce an identification response to the top 5 suggestions. A malformed
/// response yields an empty list plus the raw text rather than an error.
pub fn species_suggestions(raw: &str) -> (Vec<SpeciesSuggestion>, Option<String>) {
    let malformed = || (Vec::new(), Some(raw.to_string()));
    let Ok(value) = serde_json::from_str::<serde_json::Value>(raw) else {
        return malformed();
    };
    let Some(suggestions) = value
        .pointer("/result/classification/suggestions")
        .and_then(|s| s.as_array())
    else {
        return malformed();
    };

    let reduced = suggestions
        .iter()
        .take(5)
        .enumerate()
        .map(|(i, s)| SpeciesSuggestion {
            rank: i as u32 + 1,
            name: s.get("name").and_then(|n| n.as_str()).unwrap_or_default().to_string(),
            probability: (s.get("probability").and_then(|p| p.as_f64()).unwrap_or(0.0)
                * 100.0)
                .round() as u32,
            similar_images: s
                .get("similar_images")
                .and_then(|a| a.as_array())
                .map(|a| a.iter().take(2).cloned().collect())
                .unwrap_or_default(),
        })
        .collect();
    (reduced, None)
}
