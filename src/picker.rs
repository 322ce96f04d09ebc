//! Expiry picker window: two wheels (month, year) bounded to the months a
//! card can still expire in.
//!
//! The month wheel always lists all twelve months, whatever year is picked.
//! A pick below the window snaps to the window's first month and a pick above
//! it snaps to the last. Because the month list is the same at every year,
//! choosing the bottom row of both wheels reports the current month, and the
//! top row of both wheels reports the current month `years` years ahead.
//!
//! # Example
//!
//! ```
//! use cardform::picker::{ExpiryRange, MONTH_COMPONENT, YEAR_COMPONENT};
//! use chrono::{TimeZone, Utc};
//!
//! let now = Utc.with_ymd_and_hms(2024, 10, 14, 9, 0, 0).unwrap();
//! let range = ExpiryRange::new(now, 20);
//!
//! assert_eq!(range.row_count_for(MONTH_COMPONENT), 12);
//! assert_eq!(range.row_count_for(YEAR_COMPONENT), 21);
//! assert_eq!(range.title_for(YEAR_COMPONENT, 0).as_deref(), Some("2024"));
//!
//! let picked = range.resolve_selection(0, 0);
//! assert_eq!((picked.month(), picked.year()), (10, 2024));
//! ```

use crate::expiry::ExpiryDate;
use chrono::{DateTime, Utc};

/// Component index of the month wheel.
pub const MONTH_COMPONENT: usize = 0;
/// Component index of the year wheel.
pub const YEAR_COMPONENT: usize = 1;
/// Years offered after the current one unless configured otherwise.
pub const DEFAULT_FUTURE_YEARS: u16 = 20;

const MONTHS_PER_YEAR: usize = 12;

/// The selectable window of expiry months, computed from a reference instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExpiryRange {
    minimum: ExpiryDate,
    maximum: ExpiryDate,
    future_years: u16,
}

impl ExpiryRange {
    /// Window starting at the month of `reference` (UTC) and ending the same
    /// month `future_years` years later.
    ///
    /// The horizon is cut short so the last year still fits in a `u16`;
    /// every year row then has its own year.
    pub fn new(reference: DateTime<Utc>, future_years: u16) -> Self {
        let minimum = ExpiryDate::from_instant(reference);
        let future_years = future_years.min(u16::MAX - minimum.year());
        Self {
            minimum,
            maximum: minimum.plus_years(future_years),
            future_years,
        }
    }

    /// Window built from the current time with [`DEFAULT_FUTURE_YEARS`].
    pub fn current() -> Self {
        Self::new(Utc::now(), DEFAULT_FUTURE_YEARS)
    }

    /// First selectable month.
    #[inline]
    pub const fn minimum(&self) -> ExpiryDate {
        self.minimum
    }

    /// Last selectable month.
    #[inline]
    pub const fn maximum(&self) -> ExpiryDate {
        self.maximum
    }

    /// Month numbers shown on the month wheel, always 1 through 12.
    pub fn months(&self) -> impl Iterator<Item = u8> {
        1..=12u8
    }

    /// Years shown on the year wheel, from the minimum year to the maximum.
    pub fn years(&self) -> impl Iterator<Item = u16> {
        self.minimum.year()..=self.maximum.year()
    }

    /// Number of rows on a wheel; 0 for a component that does not exist.
    pub fn row_count_for(&self, component: usize) -> usize {
        match component {
            MONTH_COMPONENT => MONTHS_PER_YEAR,
            YEAR_COMPONENT => usize::from(self.future_years) + 1,
            _ => 0,
        }
    }

    /// Label for a row: a two-digit month (`"06"`) or a four-digit year.
    ///
    /// Returns `None` for an unknown component or a row past the end.
    pub fn title_for(&self, component: usize, row: usize) -> Option<String> {
        if row >= self.row_count_for(component) {
            return None;
        }
        match component {
            MONTH_COMPONENT => Some(format!("{:02}", row + 1)),
            YEAR_COMPONENT => Some(format!("{:04}", self.year_at(row))),
            _ => None,
        }
    }

    /// Resolves the selected rows of both wheels into a month inside the window.
    ///
    /// Rows past the end of a wheel count as its last row.
    pub fn resolve_selection(&self, month_row: usize, year_row: usize) -> ExpiryDate {
        let month = month_row.min(MONTHS_PER_YEAR - 1) as u8 + 1;
        let year = self.year_at(year_row.min(usize::from(self.future_years)));
        let picked = ExpiryDate::new(month, year).unwrap_or(self.minimum);

        if picked < self.minimum {
            tracing::trace!(%picked, minimum = %self.minimum, "expiry pick below window");
            self.minimum
        } else if picked > self.maximum {
            tracing::trace!(%picked, maximum = %self.maximum, "expiry pick above window");
            self.maximum
        } else {
            picked
        }
    }

    /// Rows that display `date`, or `None` when it lies outside the window.
    ///
    /// Hosts use this to move the wheels after [`resolve_selection`](Self::resolve_selection)
    /// has clamped a pick.
    pub fn rows_for(&self, date: ExpiryDate) -> Option<(usize, usize)> {
        if !self.contains(date) {
            return None;
        }
        let month_row = usize::from(date.month()) - 1;
        let year_row = usize::from(date.year() - self.minimum.year());
        Some((month_row, year_row))
    }

    /// Returns true if `date` is inside the window, bounds included.
    pub fn contains(&self, date: ExpiryDate) -> bool {
        self.minimum <= date && date <= self.maximum
    }

    fn year_at(&self, row: usize) -> u16 {
        // Callers clamp row to future_years, and minimum + future_years fits.
        self.minimum
            .year()
            .saturating_add(u16::try_from(row).unwrap_or(u16::MAX))
    }
}

impl Default for ExpiryRange {
    fn default() -> Self {
        Self::current()
    }
}
