//! Date expression parsing
//!
//! Finds the first recognisable date expression in a snippet of contract
//! text. Supported shapes:
//!
//! - ISO `2025-01-31`
//! - `31 January 2025`, `1st Jan. 2025`, `17 Agustus 2025`
//! - `January 31, 2025`
//! - US-ordered `1/31/2025` or `1/31/25` (two-digit years map to 20YY)

use chrono::NaiveDate;
use once_cell::sync::Lazy;
use regex::{Captures, Regex};

/// English and Indonesian month names and abbreviations
const MONTHS: &[(&str, u32)] = &[
    ("january", 1),
    ("januari", 1),
    ("jan", 1),
    ("february", 2),
    ("februari", 2),
    ("feb", 2),
    ("peb", 2),
    ("march", 3),
    ("maret", 3),
    ("mar", 3),
    ("april", 4),
    ("apr", 4),
    ("may", 5),
    ("mei", 5),
    ("june", 6),
    ("juni", 6),
    ("jun", 6),
    ("july", 7),
    ("juli", 7),
    ("jul", 7),
    ("august", 8),
    ("agustus", 8),
    ("aug", 8),
    ("agu", 8),
    ("agt", 8),
    ("september", 9),
    ("sept", 9),
    ("sep", 9),
    ("october", 10),
    ("oktober", 10),
    ("oct", 10),
    ("okt", 10),
    ("november", 11),
    ("nopember", 11),
    ("nov", 11),
    ("december", 12),
    ("desember", 12),
    ("dec", 12),
    ("des", 12),
];

static ISO: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\b(\d{4})-(\d{1,2})-(\d{1,2})\b").expect("valid ISO date regex"));

static DAY_MONTH_YEAR: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\b(\d{1,2})(?:st|nd|rd|th)?\s+([a-z]{3,9})\.?,?\s+(\d{4})\b")
        .expect("valid day-month-year regex")
});

static MONTH_DAY_YEAR: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\b([a-z]{3,9})\.?\s+(\d{1,2})(?:st|nd|rd|th)?,?\s+(\d{4})\b")
        .expect("valid month-day-year regex")
});

static SLASHED: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\b(\d{1,2})/(\d{1,2})/(\d{2}|\d{4})\b").expect("valid slashed date regex")
});

/// Look up a month by name or abbreviation (case-insensitive)
fn month_number(name: &str) -> Option<u32> {
    let lower = name.to_lowercase();
    MONTHS
        .iter()
        .find(|(candidate, _)| *candidate == lower)
        .map(|(_, month)| *month)
}

fn number(s: &str) -> Option<u32> {
    s.parse().ok()
}

fn from_iso(caps: &Captures) -> Option<NaiveDate> {
    NaiveDate::from_ymd_opt(caps[1].parse().ok()?, number(&caps[2])?, number(&caps[3])?)
}

fn from_day_month_year(caps: &Captures) -> Option<NaiveDate> {
    NaiveDate::from_ymd_opt(caps[3].parse().ok()?, month_number(&caps[2])?, number(&caps[1])?)
}

fn from_month_day_year(caps: &Captures) -> Option<NaiveDate> {
    NaiveDate::from_ymd_opt(caps[3].parse().ok()?, month_number(&caps[1])?, number(&caps[2])?)
}

fn from_slashed(caps: &Captures) -> Option<NaiveDate> {
    let year: i32 = caps[3].parse().ok()?;
    let year = if caps[3].len() == 2 { 2000 + year } else { year };
    NaiveDate::from_ymd_opt(year, number(&caps[1])?, number(&caps[2])?)
}

/// Parse the first date expression found in `snippet`.
///
/// Every shape is tried and the valid match starting earliest wins, so a
/// label like `effective as of 1 March 2025, or 2025-04-01` yields March.
pub fn parse_date(snippet: &str) -> Option<NaiveDate> {
    let shapes: [(&Regex, fn(&Captures) -> Option<NaiveDate>); 4] = [
        (&*ISO, from_iso),
        (&*DAY_MONTH_YEAR, from_day_month_year),
        (&*MONTH_DAY_YEAR, from_month_day_year),
        (&*SLASHED, from_slashed),
    ];

    let mut best: Option<(usize, NaiveDate)> = None;
    for (regex, build) in shapes {
        for caps in regex.captures_iter(snippet) {
            let start = caps.get(0).map_or(0, |m| m.start());
            if let Some(date) = build(&caps) {
                if best.map_or(true, |(s, _)| start < s) {
                    best = Some((start, date));
                }
            }
        }
    }

    best.map(|(_, date)| date)
}
