//! Small helpers shared by the entry parser and importer.

use chrono::{Datelike, NaiveDate};
use regex::Regex;
use std::sync::OnceLock;

use crate::error::{JournalError, Result};

pub fn sanitize_symbol(sym: &str) -> String {
    sym.trim().to_uppercase()
}

/// "$1,234.50" -> 1234.5; anything unparseable is 0.
pub fn money_to_num(s: &str) -> f64 {
    let digits: String = s
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '.' || *c == '-')
        .collect();
    digits.parse().unwrap_or(0.0)
}

pub fn mmdd_digits(s: &str) -> Option<String> {
    // Convert "08/16" or "08-16" to "0816"
    let d: String = s.chars().filter(|c| c.is_ascii_digit()).collect();
    if d.len() == 4 {
        Some(d)
    } else {
        None
    }
}

fn date_patterns() -> &'static (Regex, Regex, Regex) {
    static PATTERNS: OnceLock<(Regex, Regex, Regex)> = OnceLock::new();
    PATTERNS.get_or_init(|| {
        (
            Regex::new(r"^(\d{4})-(\d{2})-(\d{2})$").expect("iso date pattern"),
            Regex::new(r"^(\d{1,2})/(\d{1,2})$").expect("mm/dd pattern"),
            Regex::new(r"^(\d{1,2})/(\d{1,2})/(\d{4})$").expect("mm/dd/yyyy pattern"),
        )
    })
}

/// Accepts `YYYY-MM-DD`, `MM/DD` (in `reference_year`) and `MM/DD/YYYY`.
pub fn to_iso(s: &str, reference_year: i32) -> Result<NaiveDate> {
    let t = s.trim();
    let (iso, short, long) = date_patterns();
    let ymd: (Option<i32>, Option<u32>, Option<u32>) = if let Some(c) = iso.captures(t) {
        (c[1].parse().ok(), c[2].parse().ok(), c[3].parse().ok())
    } else if let Some(c) = short.captures(t) {
        (Some(reference_year), c[1].parse().ok(), c[2].parse().ok())
    } else if let Some(c) = long.captures(t) {
        (c[3].parse().ok(), c[1].parse().ok(), c[2].parse().ok())
    } else {
        (None, None, None)
    };
    match ymd {
        (Some(y), Some(m), Some(d)) => NaiveDate::from_ymd_opt(y, m, d),
        _ => None,
    }
    .ok_or_else(|| JournalError::Import(format!("unrecognized date {t:?}")))
}

/// Resolve an "MM/DD" expiry to the first such date on or after `from`.
pub fn expiry_from_mmdd(mmdd: &str, from: NaiveDate) -> Option<NaiveDate> {
    let d = mmdd_digits(mmdd)?;
    let month: u32 = d[..2].parse().ok()?;
    let day: u32 = d[2..].parse().ok()?;
    let this_year = NaiveDate::from_ymd_opt(from.year(), month, day);
    match this_year {
        Some(date) if date >= from => Some(date),
        _ => NaiveDate::from_ymd_opt(from.year() + 1, month, day),
    }
}
