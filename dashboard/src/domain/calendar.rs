//! Calendar helpers shared by the summary views.

use std::fmt;

use chrono::{Datelike, NaiveDate};

/// Errors raised when a date range cannot be built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CalendarError {
    /// `start` falls after `end`.
    Inverted {
        /// Requested first day.
        start: NaiveDate,
        /// Requested last day.
        end: NaiveDate,
    },
    /// The month boundary lies outside the representable calendar.
    OutOfRange,
}

impl fmt::Display for CalendarError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Inverted { start, end } => {
                write!(f, "date range starts on {start} after it ends on {end}")
            }
            Self::OutOfRange => write!(f, "month boundary is outside the supported calendar"),
        }
    }
}

impl std::error::Error for CalendarError {}

/// First calendar day of the month containing `date`.
pub fn month_start(date: NaiveDate) -> NaiveDate {
    date.with_day(1).unwrap_or(date)
}

/// Last calendar day of the month containing `date`.
///
/// Takes "day zero" of the following month, i.e. the day before its first
/// day, so month lengths, leap years and the December rollover need no
/// special cases.
pub fn month_end(date: NaiveDate) -> Result<NaiveDate, CalendarError> {
    let (year, month) = if date.month() == 12 {
        (date.year() + 1, 1)
    } else {
        (date.year(), date.month() + 1)
    };
    NaiveDate::from_ymd_opt(year, month, 1)
        .and_then(|next_month| next_month.pred_opt())
        .ok_or(CalendarError::OutOfRange)
}

/// Inclusive range of calendar days.
///
/// ## Invariants
/// - `start <= end`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    start: NaiveDate,
    end: NaiveDate,
}

impl DateRange {
    /// Build a range, rejecting inverted bounds.
    pub fn new(start: NaiveDate, end: NaiveDate) -> Result<Self, CalendarError> {
        if start > end {
            return Err(CalendarError::Inverted { start, end });
        }
        Ok(Self { start, end })
    }

    /// The whole month containing `date`.
    ///
    /// # Examples
    /// ```
    /// use chrono::NaiveDate;
    /// use dashboard::domain::DateRange;
    ///
    /// let day = NaiveDate::from_ymd_opt(2024, 2, 10).unwrap();
    /// let month = DateRange::month_of(day).unwrap();
    /// assert_eq!(month.end(), NaiveDate::from_ymd_opt(2024, 2, 29).unwrap());
    /// ```
    pub fn month_of(date: NaiveDate) -> Result<Self, CalendarError> {
        Self::new(month_start(date), month_end(date)?)
    }

    /// First day, inclusive.
    pub fn start(&self) -> NaiveDate {
        self.start
    }

    /// Last day, inclusive.
    pub fn end(&self) -> NaiveDate {
        self.end
    }

    /// Whether `day` falls inside the range.
    pub fn contains(&self, day: NaiveDate) -> bool {
        self.start <= day && day <= self.end
    }
}
