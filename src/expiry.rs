//! Card expiry dates and free-text expiry validation.
//!
//! All comparisons are made against a reference instant in UTC. Callers pass
//! the instant explicitly; [`ExpiryDate::current`] reads the system clock.
//!
//! # Accepted Text
//!
//! | Shape | Example |
//! |-------|---------|
//! | `MM/YYYY` | `06/2020` |
//! | `MM/YY` | `06/20` |
//! | `MM-YYYY`, `MM-YY` | `06-2020` |
//! | `MMYYYY`, `MMYY` | `062020`, `0620` |
//!
//! Two-digit years are read as 20YY.
//!
//! # Example
//!
//! ```
//! use cardform::expiry::{is_valid_expiry, parse_expiry};
//! use chrono::{TimeZone, Utc};
//!
//! let reference = Utc.with_ymd_and_hms(2018, 5, 15, 12, 0, 0).unwrap();
//!
//! let expiry = parse_expiry("06/2020").unwrap();
//! assert_eq!(expiry.month(), 6);
//! assert_eq!(expiry.year(), 2020);
//!
//! assert!(is_valid_expiry(6, 2020, reference));
//! assert!(!is_valid_expiry(6, 2017, reference));
//! ```

use chrono::{DateTime, Datelike, Utc};
use std::fmt;

/// A card expiry month.
///
/// Ordering is chronological: year first, then month.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ExpiryDate {
    /// Full year, e.g. 2020.
    year: u16,
    /// Month (1-12)
    month: u8,
}

impl ExpiryDate {
    /// Builds a date from a 1-based month and a full year, `None` for a
    /// month outside 1..=12.
    pub fn new(month: u8, year: u16) -> Option<Self> {
        if !(1..=12).contains(&month) {
            return None;
        }
        Some(Self { year, month })
    }

    /// The month containing `instant`, in UTC.
    pub fn from_instant(instant: DateTime<Utc>) -> Self {
        // chrono guarantees month() in 1..=12; years past u16 are clamped.
        let year = u16::try_from(instant.year().max(0)).unwrap_or(u16::MAX);
        Self {
            year,
            month: instant.month() as u8,
        }
    }

    /// The current month in UTC.
    pub fn current() -> Self {
        Self::from_instant(Utc::now())
    }

    /// Month, 1-based.
    #[inline]
    pub const fn month(&self) -> u8 {
        self.month
    }

    /// Full year.
    #[inline]
    pub const fn year(&self) -> u16 {
        self.year
    }

    /// Returns true if the card has expired before the month of `reference`.
    ///
    /// A card stays valid through the end of its expiry month.
    pub fn is_expired_at(&self, reference: DateTime<Utc>) -> bool {
        *self < Self::from_instant(reference)
    }

    /// Returns the same month `years` years later, saturating at `u16::MAX`.
    pub const fn plus_years(&self, years: u16) -> Self {
        Self {
            year: self.year.saturating_add(years),
            month: self.month,
        }
    }

    /// Number of months from the month of `reference` to this one, 0 if past.
    pub fn months_after(&self, reference: DateTime<Utc>) -> u32 {
        let now = Self::from_instant(reference);
        self.month_index().saturating_sub(now.month_index())
    }

    fn month_index(&self) -> u32 {
        u32::from(self.year) * 12 + u32::from(self.month)
    }

    /// Formats the month as two digits, e.g. `"06"`.
    pub fn month_label(&self) -> String {
        format!("{:02}", self.month)
    }

    /// Formats the year as its last two digits, e.g. `"20"` for 2020.
    pub fn short_year_label(&self) -> String {
        format!("{:02}", self.year % 100)
    }

    /// Formats as MM/YY.
    pub fn format_short(&self) -> String {
        format!("{:02}/{:02}", self.month, self.year % 100)
    }

    /// Formats as MM/YYYY.
    pub fn format_long(&self) -> String {
        format!("{:02}/{:04}", self.month, self.year)
    }
}

impl fmt::Display for ExpiryDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}/{:04}", self.month, self.year)
    }
}

/// Why an expiry string was refused.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExpiryError {
    /// Nothing but whitespace was entered.
    Empty,
    /// Not one of the accepted shapes.
    InvalidFormat,
    /// Month outside 1..=12.
    InvalidMonth(u8),
    /// The expiry month is before the reference month.
    Expired {
        /// The expiry month.
        month: u8,
        /// The expiry year.
        year: u16,
    },
    /// Year past the caller's horizon.
    TooFarFuture {
        /// The expiry year.
        year: u16,
        /// Maximum allowed year.
        max_year: u16,
    },
}

impl fmt::Display for ExpiryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => write!(f, "no expiry date entered"),
            Self::InvalidFormat => {
                write!(f, "expiry date must look like MM/YYYY or MM/YY")
            }
            Self::InvalidMonth(month) => {
                write!(f, "{month} is not a month (01-12)")
            }
            Self::Expired { month, year } => {
                write!(f, "card expired in {month:02}/{year}")
            }
            Self::TooFarFuture { year, max_year } => {
                write!(f, "expiry year {year} is later than {max_year}")
            }
        }
    }
}

impl std::error::Error for ExpiryError {}

/// Returns true if `month`/`year` is the month of `reference` or later.
///
/// Months outside 1..=12 are never valid.
pub fn is_valid_expiry(month: u8, year: u16, reference: DateTime<Utc>) -> bool {
    ExpiryDate::new(month, year).is_some_and(|date| !date.is_expired_at(reference))
}

/// Parses an expiry date string without checking it against a date.
///
/// # Errors
///
/// Returns [`ExpiryError::Empty`] for blank input,
/// [`ExpiryError::InvalidMonth`] for a month outside 1..=12 and
/// [`ExpiryError::InvalidFormat`] for anything else that does not parse.
///
/// # Example
///
/// ```
/// use cardform::expiry::parse_expiry;
///
/// let picked = parse_expiry("0620").unwrap();
/// assert_eq!((picked.month(), picked.year()), (6, 2020));
/// assert!(parse_expiry("13/2020").is_err());
/// ```
pub fn parse_expiry(input: &str) -> Result<ExpiryDate, ExpiryError> {
    let input = input.trim();

    if input.is_empty() {
        return Err(ExpiryError::Empty);
    }

    if let Some((month_str, year_str)) = input.split_once('/').or_else(|| input.split_once('-')) {
        return parse_month_year(month_str.trim(), year_str.trim());
    }

    if !input.bytes().all(|b| b.is_ascii_digit()) {
        return Err(ExpiryError::InvalidFormat);
    }

    match input.len() {
        4 => parse_month_year(&input[0..2], &input[2..4]),
        6 => parse_month_year(&input[0..2], &input[2..6]),
        _ => Err(ExpiryError::InvalidFormat),
    }
}

fn parse_month_year(month_str: &str, year_str: &str) -> Result<ExpiryDate, ExpiryError> {
    let month = parse_digits(month_str, 1..=2)?;
    let month = u8::try_from(month).map_err(|_| ExpiryError::InvalidFormat)?;

    if !(1..=12).contains(&month) {
        return Err(ExpiryError::InvalidMonth(month));
    }

    let year = match year_str.len() {
        2 => 2000 + parse_digits(year_str, 2..=2)?,
        4 => parse_digits(year_str, 4..=4)?,
        _ => return Err(ExpiryError::InvalidFormat),
    };

    Ok(ExpiryDate { year, month })
}

/// Parses an all-digit string of an allowed length. Rejects signs and spaces
/// that `str::parse` would otherwise accept or report differently.
fn parse_digits(s: &str, lengths: std::ops::RangeInclusive<usize>) -> Result<u16, ExpiryError> {
    if !lengths.contains(&s.len()) || !s.bytes().all(|b| b.is_ascii_digit()) {
        return Err(ExpiryError::InvalidFormat);
    }
    s.parse().map_err(|_| ExpiryError::InvalidFormat)
}

/// Parses and validates an expiry string against `reference`.
///
/// With `max_years_future` set, years beyond `reference year + max_years_future`
/// are refused as well.
///
/// # Errors
///
/// Any [`parse_expiry`] error, [`ExpiryError::Expired`] for a month before the
/// reference month, or [`ExpiryError::TooFarFuture`].
pub fn validate_expiry_at(
    input: &str,
    reference: DateTime<Utc>,
    max_years_future: Option<u16>,
) -> Result<ExpiryDate, ExpiryError> {
    let expiry = parse_expiry(input)?;

    if expiry.is_expired_at(reference) {
        return Err(ExpiryError::Expired {
            month: expiry.month,
            year: expiry.year,
        });
    }

    if let Some(max_years) = max_years_future {
        let max_year = ExpiryDate::from_instant(reference).year.saturating_add(max_years);
        if expiry.year > max_year {
            return Err(ExpiryError::TooFarFuture {
                year: expiry.year,
                max_year,
            });
        }
    }

    Ok(expiry)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at(year: i32, month: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(year, month, 15, 8, 30, 0).unwrap()
    }

    #[test]
    fn test_parse_mm_yy() {
        let expiry = parse_expiry("12/25").unwrap();
        assert_eq!(expiry.month(), 12);
        assert_eq!(expiry.year(), 2025);
    }

    #[test]
    fn test_parse_mm_yyyy() {
        let expiry = parse_expiry("06/2020").unwrap();
        assert_eq!(expiry.month(), 6);
        assert_eq!(expiry.year(), 2020);
    }

    #[test]
    fn test_parse_with_dash() {
        let expiry = parse_expiry("06-28").unwrap();
        assert_eq!(expiry.month(), 6);
        assert_eq!(expiry.year(), 2028);
    }

    #[test]
    fn test_parse_without_separator() {
        assert_eq!(parse_expiry("1225"), Ok(ExpiryDate { year: 2025, month: 12 }));
        assert_eq!(parse_expiry("122025"), Ok(ExpiryDate { year: 2025, month: 12 }));
    }

    #[test]
    fn test_parse_with_spaces() {
        let expiry = parse_expiry("  6 / 2025  ").unwrap();
        assert_eq!(expiry.month(), 6);
        assert_eq!(expiry.year(), 2025);
    }

    #[test]
    fn test_invalid_month() {
        assert_eq!(parse_expiry("00/25"), Err(ExpiryError::InvalidMonth(0)));
        assert_eq!(parse_expiry("13/25"), Err(ExpiryError::InvalidMonth(13)));
    }

    #[test]
    fn test_invalid_format() {
        assert_eq!(parse_expiry(""), Err(ExpiryError::Empty));
        assert_eq!(parse_expiry("abc"), Err(ExpiryError::InvalidFormat));
        assert_eq!(parse_expiry("1/2/3"), Err(ExpiryError::InvalidFormat));
        assert_eq!(parse_expiry("+6/2020"), Err(ExpiryError::InvalidFormat));
        assert_eq!(parse_expiry("06/202"), Err(ExpiryError::InvalidFormat));
        assert_eq!(parse_expiry("12a5"), Err(ExpiryError::InvalidFormat));
    }

    #[test]
    fn test_is_valid_expiry() {
        assert!(!is_valid_expiry(6, 2017, at(2018, 3)));
        assert!(is_valid_expiry(6, 2020, at(2020, 5)));
        assert!(is_valid_expiry(6, 2020, at(2020, 6)));
        assert!(!is_valid_expiry(6, 2020, at(2020, 7)));
        assert!(is_valid_expiry(1, 2021, at(2020, 12)));
        assert!(!is_valid_expiry(0, 2030, at(2020, 1)));
        assert!(!is_valid_expiry(13, 2030, at(2020, 1)));
    }

    #[test]
    fn test_from_instant_uses_utc_month() {
        let late = Utc.with_ymd_and_hms(2024, 1, 31, 23, 59, 59).unwrap();
        assert_eq!(ExpiryDate::from_instant(late), ExpiryDate { year: 2024, month: 1 });
    }

    #[test]
    fn test_ordering_is_chronological() {
        let a = ExpiryDate::new(12, 2024).unwrap();
        let b = ExpiryDate::new(1, 2025).unwrap();
        assert!(a < b);
        assert_eq!(a.plus_years(1), ExpiryDate::new(12, 2025).unwrap());
    }

    #[test]
    fn test_format() {
        let expiry = ExpiryDate::new(6, 2020).unwrap();
        assert_eq!(expiry.format_short(), "06/20");
        assert_eq!(expiry.format_long(), "06/2020");
        assert_eq!(expiry.month_label(), "06");
        assert_eq!(expiry.short_year_label(), "20");
        assert_eq!(expiry.to_string(), "06/2020");
    }

    #[test]
    fn test_validate_expiry_at() {
        let reference = at(2018, 5);
        assert_eq!(
            validate_expiry_at("06/2017", reference, None),
            Err(ExpiryError::Expired { month: 6, year: 2017 })
        );
        assert_eq!(
            validate_expiry_at("06/2039", reference, Some(20)),
            Err(ExpiryError::TooFarFuture { year: 2039, max_year: 2038 })
        );
        assert!(validate_expiry_at("06/2038", reference, Some(20)).is_ok());
        assert!(validate_expiry_at("06/2039", reference, None).is_ok());
    }

    #[test]
    fn test_current_is_this_utc_month() {
        let before = ExpiryDate::from_instant(Utc::now());
        let current = ExpiryDate::current();
        let after = ExpiryDate::from_instant(Utc::now());
        assert!(current == before || current == after);
    }

    #[test]
    fn test_months_after() {
        let expiry = ExpiryDate::new(6, 2020).unwrap();
        assert_eq!(expiry.months_after(at(2020, 1)), 5);
        assert_eq!(expiry.months_after(at(2021, 1)), 0);
    }
}
