//! Free-text to structured filter translation
//!
//! Maps an utterance like "I want a red hybrid RAV4 under 30000" onto the
//! sparse predicates of a `StructuredFilter`. Matching is keyword and regex
//! based, case-insensitive, and deterministic: single-valued fields scan a
//! fixed priority table and the last matching keyword wins, while colors
//! union every palette match.

use carvoice_core::StructuredFilter;
use once_cell::sync::Lazy;
use regex::Regex;

/// Model keyword table, in priority order (last match wins)
const MODEL_KEYWORDS: &[(&str, &str)] = &[
    ("toyota", "Toyota"),
    ("corolla", "Corolla"),
    ("camry", "Camry"),
    ("rav4", "RAV4"),
    ("supra", "Supra"),
];

/// Fuel-type keyword table, in priority order
const FUEL_KEYWORDS: &[(&str, &str)] = &[
    ("hybrid", "Hybrid"),
    ("gas", "Gasoline"),
    ("gasoline", "Gasoline"),
    ("electric", "Electric"),
];

/// Body-type keyword table, in priority order
const BODY_KEYWORDS: &[(&str, &str)] = &[
    ("sedan", "Sedan"),
    ("suv", "SUV"),
    ("truck", "Truck"),
    ("sports", "Sports"),
    ("hatchback", "Hatchback"),
];

/// Color palette; every match is collected (any-of semantics)
const COLOR_PALETTE: &[&str] = &[
    "white", "black", "blue", "red", "silver", "gray", "green", "yellow",
];

static SEATS_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(\d+)\s*(?:seater|seats?)").unwrap());

static YEAR_PATTERN: Lazy<Regex> = Lazy::new(|| Regex::new(r"\b((?:19|20)\d{2})\b").unwrap());

static PRICE_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?:under|below|less\s+than)\s*\$?(\d[\d,]*)").unwrap());

/// Translates free-form utterances into structured inventory filters
#[derive(Debug, Clone, Copy, Default)]
pub struct QueryTranslator;

impl QueryTranslator {
    pub fn new() -> Self {
        Self
    }

    /// Translate one utterance into a filter
    ///
    /// Pure and order-independent except for the single-valued fields,
    /// where the fixed table order decides which keyword wins when several
    /// appear in one utterance.
    pub fn translate(&self, text: &str) -> StructuredFilter {
        let lower = text.to_lowercase();
        let mut filter = StructuredFilter::default();

        for (keyword, value) in MODEL_KEYWORDS {
            if lower.contains(keyword) {
                filter.model = Some((*value).to_string());
            }
        }

        for (keyword, value) in FUEL_KEYWORDS {
            if lower.contains(keyword) {
                filter.fuel_type = Some((*value).to_string());
            }
        }

        for (keyword, value) in BODY_KEYWORDS {
            if lower.contains(keyword) {
                filter.body_type = Some((*value).to_string());
            }
        }

        for color in COLOR_PALETTE {
            if lower.contains(color) {
                filter.colors.push((*color).to_string());
            }
        }

        if let Some(caps) = SEATS_PATTERN.captures(&lower) {
            filter.seats = caps[1].parse().ok();
        }

        if let Some(caps) = YEAR_PATTERN.captures(&lower) {
            filter.year = caps[1].parse().ok();
        }

        if let Some(caps) = PRICE_PATTERN.captures(&lower) {
            filter.max_price = caps[1].replace(',', "").parse().ok();
        }

        filter
    }
}
