//! Statement date resolution across regional formats
//!
//! Patterns are tried in a fixed order and the first one that yields a real
//! calendar date wins:
//!   31/12/2024  31-12-2024  31.12.2024   day-first, 4-digit year
//!   2024-12-31                           ISO
//!   12/31/2024  12-31-2024               month-first, once day-first fails
//!   31/12/24    31-12-24                 day-first, 2-digit year
//!   Dec 31, 2024  2024-12-31T08:00:00Z   generic fallback
//!
//! A trailing time of day (`1/15/2024 10:30`, `15/01/2024 10:30:00 PM`) is
//! dropped and the date part goes through the same patterns.

use anyhow::{Context, Result};
use chrono::{DateTime, Datelike, NaiveDate, NaiveDateTime};
use regex::Regex;

const MIN_YEAR: i32 = 1900;
const MAX_YEAR: i32 = 2100;

/// How the three numeric groups of a pattern map onto a date
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FieldOrder {
    DayFirst,
    YearFirst,
    /// Only tried after the day-first reading of the same shape was rejected,
    /// so 03/04/2024 stays 3 April and 03/13/2024 becomes 13 March
    MonthFirst,
    DayFirstShortYear,
}

impl FieldOrder {
    fn resolve(self, a: u32, b: u32, c: u32) -> Option<NaiveDate> {
        match self {
            FieldOrder::DayFirst => checked_date(c as i32, b, a),
            FieldOrder::YearFirst => checked_date(a as i32, b, c),
            FieldOrder::MonthFirst => checked_date(c as i32, a, b),
            FieldOrder::DayFirstShortYear => {
                let year = if c < 50 { 2000 + c } else { 1900 + c };
                checked_date(year as i32, b, a)
            }
        }
    }
}

/// Range check, then let chrono reject impossible days such as 31 Feb
fn checked_date(year: i32, month: u32, day: u32) -> Option<NaiveDate> {
    if !(MIN_YEAR..=MAX_YEAR).contains(&year) || !(1..=12).contains(&month) || !(1..=31).contains(&day) {
        return None;
    }
    NaiveDate::from_ymd_opt(year, month, day)
}

struct DatePattern {
    regex: Regex,
    order: FieldOrder,
}

/// Resolves raw statement date strings to calendar dates.
///
/// Build once and reuse; the patterns are compiled up front.
pub struct DateParser {
    patterns: Vec<DatePattern>,
    time_suffix: Regex,
}

impl DateParser {
    pub fn new() -> Result<Self> {
        let table = [
            (r"^(\d{1,2})/(\d{1,2})/(\d{4})$", FieldOrder::DayFirst),
            (r"^(\d{1,2})-(\d{1,2})-(\d{4})$", FieldOrder::DayFirst),
            (r"^(\d{1,2})\.(\d{1,2})\.(\d{4})$", FieldOrder::DayFirst),
            (r"^(\d{4})-(\d{1,2})-(\d{1,2})$", FieldOrder::YearFirst),
            (r"^(\d{1,2})/(\d{1,2})/(\d{4})$", FieldOrder::MonthFirst),
            (r"^(\d{1,2})-(\d{1,2})-(\d{4})$", FieldOrder::MonthFirst),
            (r"^(\d{1,2})/(\d{1,2})/(\d{2})$", FieldOrder::DayFirstShortYear),
            (r"^(\d{1,2})-(\d{1,2})-(\d{2})$", FieldOrder::DayFirstShortYear),
        ];

        let patterns = table
            .into_iter()
            .map(|(re, order)| {
                let regex = Regex::new(re).with_context(|| format!("compiling date pattern {re}"))?;
                Ok(DatePattern { regex, order })
            })
            .collect::<Result<Vec<_>>>()?;

        let time_suffix = Regex::new(r"^(\S+)[ T]+\d{1,2}:\d{2}(?::\d{2})?(?:\s*[AaPp][Mm])?$")
            .context("compiling time suffix pattern")?;

        Ok(Self { patterns, time_suffix })
    }

    /// Parse a raw date; `None` when no pattern yields a valid calendar date.
    pub fn parse(&self, raw: &str) -> Option<NaiveDate> {
        let s = raw.trim();
        if s.is_empty() {
            return None;
        }

        self.match_patterns(s)
            .or_else(|| {
                let caps = self.time_suffix.captures(s)?;
                self.match_patterns(&caps[1])
            })
            .or_else(|| parse_fallback(s))
    }

    fn match_patterns(&self, s: &str) -> Option<NaiveDate> {
        for pattern in &self.patterns {
            let Some(caps) = pattern.regex.captures(s) else {
                continue;
            };
            let (Ok(a), Ok(b), Ok(c)) = (
                caps[1].parse::<u32>(),
                caps[2].parse::<u32>(),
                caps[3].parse::<u32>(),
            ) else {
                continue;
            };
            if let Some(date) = pattern.order.resolve(a, b, c) {
                return Some(date);
            }
        }
        None
    }

    /// Parse to the canonical `YYYY-MM-DD` form
    pub fn parse_iso(&self, raw: &str) -> Option<String> {
        self.parse(raw).map(|d| d.format("%Y-%m-%d").to_string())
    }
}

/// Generic formats seen in bank exports that carry month names or timestamps
fn parse_fallback(s: &str) -> Option<NaiveDate> {
    let date = DateTime::parse_from_rfc3339(s)
        .or_else(|_| DateTime::parse_from_rfc2822(s))
        .map(|dt| dt.date_naive())
        .ok()
        .or_else(|| {
            ["%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M:%S", "%Y-%m-%d %H:%M"]
                .iter()
                .find_map(|fmt| NaiveDateTime::parse_from_str(s, fmt).ok())
                .map(|dt| dt.date())
        })
        .or_else(|| {
            [
                "%Y/%m/%d",
                "%B %d, %Y",
                "%b %d, %Y",
                "%B %d %Y",
                "%b %d %Y",
                "%d %B %Y",
                "%d %b %Y",
                "%a, %d %b %Y",
            ]
            .iter()
            .find_map(|fmt| NaiveDate::parse_from_str(s, fmt).ok())
        })?;

    (MIN_YEAR..=MAX_YEAR).contains(&date.year()).then_some(date)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parser() -> DateParser {
        DateParser::new().unwrap()
    }

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_day_first_four_digit_year() {
        let p = parser();
        assert_eq!(p.parse_iso("31/12/2024").as_deref(), Some("2024-12-31"));
        assert_eq!(p.parse("5-1-2024"), Some(ymd(2024, 1, 5)));
        assert_eq!(p.parse("05.01.2024"), Some(ymd(2024, 1, 5)));
    }

    #[test]
    fn test_iso() {
        let p = parser();
        assert_eq!(p.parse_iso("2024-12-31").as_deref(), Some("2024-12-31"));
        assert_eq!(p.parse("2024-1-5"), Some(ymd(2024, 1, 5)));
    }

    #[test]
    fn test_month_first_when_second_group_exceeds_twelve() {
        let p = parser();
        assert_eq!(p.parse("03/13/2024"), Some(ymd(2024, 3, 13)));
        assert_eq!(p.parse("12-31-2024"), Some(ymd(2024, 12, 31)));
    }

    #[test]
    fn test_both_groups_small_defaults_to_day_first() {
        assert_eq!(parser().parse("03/04/2024"), Some(ymd(2024, 4, 3)));
    }

    #[test]
    fn test_two_digit_year() {
        let p = parser();
        assert_eq!(p.parse_iso("13/02/24").as_deref(), Some("2024-02-13"));
        assert_eq!(p.parse("01-02-99"), Some(ymd(1999, 2, 1)));
        assert_eq!(p.parse("01/02/49"), Some(ymd(2049, 2, 1)));
        assert_eq!(p.parse("01/02/50"), Some(ymd(1950, 2, 1)));
    }

    #[test]
    fn test_impossible_dates_fail() {
        let p = parser();
        assert_eq!(p.parse("31/02/2024"), None);
        assert_eq!(p.parse("2023-02-29"), None);
        assert_eq!(p.parse("32/01/2024"), None);
        assert_eq!(p.parse("13/13/2024"), None);
    }

    #[test]
    fn test_year_range_enforced() {
        let p = parser();
        assert_eq!(p.parse("01/01/1899"), None);
        assert_eq!(p.parse("2101-01-01"), None);
        assert_eq!(p.parse("29/02/2000"), Some(ymd(2000, 2, 29)));
    }

    #[test]
    fn test_fallback_formats() {
        let p = parser();
        assert_eq!(p.parse("Jan 15, 2024"), Some(ymd(2024, 1, 15)));
        assert_eq!(p.parse("15 January 2024"), Some(ymd(2024, 1, 15)));
        assert_eq!(p.parse("2024-01-15T10:30:00Z"), Some(ymd(2024, 1, 15)));
        assert_eq!(p.parse("2024/01/15"), Some(ymd(2024, 1, 15)));
    }

    #[test]
    fn test_trailing_time_is_ignored() {
        let p = parser();
        assert_eq!(p.parse("1/15/2024 10:30"), Some(ymd(2024, 1, 15)));
        assert_eq!(p.parse("15/01/2024 10:30:00"), Some(ymd(2024, 1, 15)));
        assert_eq!(p.parse("03/04/2024 9:05 PM"), Some(ymd(2024, 4, 3)));
        assert_eq!(p.parse("31.12.2024 23:59"), Some(ymd(2024, 12, 31)));
        assert_eq!(p.parse("2024-01-15 10:30"), Some(ymd(2024, 1, 15)));
        assert_eq!(p.parse("31/02/2024 10:30"), None);
        assert_eq!(p.parse("1/15/2024 noon"), None);
    }

    #[test]
    fn test_garbage_fails() {
        let p = parser();
        assert_eq!(p.parse(""), None);
        assert_eq!(p.parse("   "), None);
        assert_eq!(p.parse("yesterday"), None);
        assert_eq!(p.parse("2024"), None);
    }
}
