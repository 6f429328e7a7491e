//! Best-effort date extraction from mix titles and headings.

use chrono::NaiveDate;
use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    static ref ISO_DATE: Regex = Regex::new(r"\b(\d{4}-\d{2}-\d{2})\b").expect("iso date pattern");
    static ref YEAR_MONTH: Regex =
        Regex::new(r"\b(\d{4})-(\d{2})\b").expect("year-month pattern");
    static ref PARENTHESIZED: Regex =
        Regex::new(r"\(([^()]*\d{4}[^()]*)\)").expect("parenthesized date pattern");
}

/// First full `YYYY-MM-DD` date that is a real calendar day, else the first
/// `YYYY-MM` with a valid month.
pub fn date_from_title(title: &str) -> Option<String> {
    let full = ISO_DATE
        .captures_iter(title)
        .map(|caps| caps[1].to_string())
        .find(|date| NaiveDate::parse_from_str(date, "%Y-%m-%d").is_ok());
    if full.is_some() {
        return full;
    }

    YEAR_MONTH
        .captures_iter(title)
        .find(|caps| matches!(caps[2].parse::<u32>(), Ok(1..=12)))
        .map(|caps| caps[0].to_string())
}

/// Text inside the first parenthesized group that mentions a year,
/// e.g. `Rinse FM (2019-03-01)` or `Live (Summer 2008)`.
pub fn parenthesized_date(text: &str) -> Option<String> {
    PARENTHESIZED
        .captures(text)
        .map(|caps| caps[1].trim().to_string())
        .filter(|date| !date.is_empty())
}
