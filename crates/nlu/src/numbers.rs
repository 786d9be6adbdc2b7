//! Utterance-to-number parsing
//!
//! Speech transcripts carry numbers in several shapes: digit runs with
//! thousands separators ("12,345"), percentages ("6%" / "six percent"), and
//! spelled-out words ("twelve thousand five hundred", "six point five").
//! `parse_number` tries those in order and returns a bare numeric value.

use once_cell::sync::Lazy;
use regex::Regex;

/// Digit value adjacent to a percent sign
static PERCENT_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(-?\d[\d,]*(?:\.\d+)?)\s*%").unwrap());

/// A digit run, preferring properly comma-grouped runs so "12,345" is read
/// as one number rather than stopping at the separator
static DIGIT_RUN_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"-?\d{1,3}(?:,\d{3})+(?:\.\d+)?|-?\d+(?:\.\d+)?").unwrap());

const UNIT_WORDS: &[(&str, u64)] = &[
    ("zero", 0),
    ("one", 1),
    ("two", 2),
    ("three", 3),
    ("four", 4),
    ("five", 5),
    ("six", 6),
    ("seven", 7),
    ("eight", 8),
    ("nine", 9),
    ("ten", 10),
    ("eleven", 11),
    ("twelve", 12),
    ("thirteen", 13),
    ("fourteen", 14),
    ("fifteen", 15),
    ("sixteen", 16),
    ("seventeen", 17),
    ("eighteen", 18),
    ("nineteen", 19),
];

const TEN_WORDS: &[(&str, u64)] = &[
    ("twenty", 20),
    ("thirty", 30),
    ("forty", 40),
    ("fifty", 50),
    ("sixty", 60),
    ("seventy", 70),
    ("eighty", 80),
    ("ninety", 90),
];

fn word_value(token: &str) -> Option<u64> {
    UNIT_WORDS
        .iter()
        .chain(TEN_WORDS.iter())
        .find(|(name, _)| *name == token)
        .map(|(_, v)| *v)
}

/// Parse a raw utterance into a numeric value
///
/// Strings containing a colon are rejected outright: a transcript like
/// "7:20" is a time of day, not a number. Percent values come back as bare
/// percentages ("6 percent" → 6, not 0.06).
pub fn parse_number(text: &str) -> Option<f64> {
    let s = text.trim().to_lowercase();
    if s.is_empty() || s.contains(':') {
        return None;
    }

    if let Some(caps) = PERCENT_PATTERN.captures(&s) {
        return caps[1].replace(',', "").parse().ok();
    }

    if s.contains("percent") {
        if let Some(m) = DIGIT_RUN_PATTERN.find(&s) {
            return m.as_str().replace(',', "").parse().ok();
        }
        return words_to_number(&s);
    }

    if let Some(m) = DIGIT_RUN_PATTERN.find(&s) {
        return m.as_str().replace(',', "").parse().ok();
    }

    words_to_number(&s)
}

/// Convert spelled-out English number words into a value
///
/// Supports the running-total/current-group algorithm up to millions:
/// unit and ten words add into the current group, "hundred" multiplies the
/// group, and "thousand"/"million" finalize the group into the total. A
/// "point" marker switches to digit-by-digit fraction parsing. Unknown
/// tokens terminate parsing; a partial result is kept if any word matched.
pub fn words_to_number(text: &str) -> Option<f64> {
    let cleaned = text.trim().to_lowercase().replace('-', " ");

    if let Some((int_part, frac_part)) = cleaned.split_once("point") {
        let int_val = words_to_number(int_part)?;
        let mut digits = String::new();
        for token in frac_part.split_whitespace() {
            if let Some(v) = word_value(token) {
                // Only single-digit words make sense after "point".
                digits.push_str(&(v % 10).to_string());
            } else if token.len() == 1 && token.chars().all(|c| c.is_ascii_digit()) {
                digits.push_str(token);
            } else {
                break;
            }
        }
        let frac_val = if digits.is_empty() {
            0.0
        } else {
            format!("0.{}", digits).parse().unwrap_or(0.0)
        };
        return Some(int_val + frac_val);
    }

    let mut total: u64 = 0;
    let mut current: u64 = 0;
    let mut matched = false;

    for token in cleaned
        .split(|c: char| !c.is_ascii_alphanumeric())
        .filter(|t| !t.is_empty())
    {
        if token == "and" {
            continue;
        }
        if let Some(v) = word_value(token) {
            current += v;
            matched = true;
        } else if token == "hundred" {
            current = if current == 0 { 100 } else { current * 100 };
            matched = true;
        } else if token == "thousand" {
            current = if current == 0 { 1_000 } else { current * 1_000 };
            total += current;
            current = 0;
            matched = true;
        } else if token == "million" {
            current = if current == 0 { 1_000_000 } else { current * 1_000_000 };
            total += current;
            current = 0;
            matched = true;
        } else {
            // Unknown token: keep whatever was parsed so far.
            break;
        }
    }

    if !matched {
        return None;
    }
    Some((total + current) as f64)
}
