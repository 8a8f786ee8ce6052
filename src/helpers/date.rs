//! Build date helpers

use chrono::{Datelike, NaiveDate, Utc};
use chrono_tz::Tz;

/// The calendar date a build runs on
///
/// Computed once and handed to every component that stamps "today", so a
/// single build never straddles midnight.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildDate {
    /// `YYYY-MM-DD`
    pub today: String,
    /// Four-digit year for footers
    pub year: String,
}

impl BuildDate {
    /// Today in the given IANA timezone, or UTC when none is configured
    pub fn now(timezone: Option<&Tz>) -> Self {
        let now = Utc::now();
        let date = match timezone {
            Some(tz) => now.with_timezone(tz).date_naive(),
            None => now.date_naive(),
        };
        Self::from_date(date)
    }

    pub fn from_date(date: NaiveDate) -> Self {
        Self {
            today: date.format("%Y-%m-%d").to_string(),
            year: date.year().to_string(),
        }
    }
}

/// Year and month URL segments of a `YYYY-MM-DD` date string
///
/// Characters are taken positionally and only letters and digits are kept,
/// so a short or unusual date yields short or empty segments rather than an
/// error, and never a path separator.
///
/// # Examples
/// ```ignore
/// date_segments("2024-05-01") // -> ("2024", "05")
/// ```
pub fn date_segments(date: &str) -> (String, String) {
    let year = date.chars().take(4).filter(|c| c.is_alphanumeric()).collect();
    let month = date
        .chars()
        .skip(5)
        .take(2)
        .filter(|c| c.is_alphanumeric())
        .collect();
    (year, month)
}
