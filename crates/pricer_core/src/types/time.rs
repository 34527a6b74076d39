//! Dates, day count conventions and observation schedules.
//!
//! This module provides:
//! - `Date`: Type-safe date wrapper around chrono::NaiveDate
//! - `DayCountConvention`: Year fraction conventions, including ACT/365.25
//! - `ObservationSchedule`: Equally spaced observation dates of a note
//!
//! # Examples
//!
//! ```
//! use pricer_core::types::time::{Date, DayCountConvention};
//!
//! let start = Date::from_ymd(2023, 6, 17).unwrap();
//! let end = Date::from_ymd(2025, 6, 17).unwrap();
//!
//! // 731 days / 365.25
//! let yf = DayCountConvention::Actual36525.year_fraction_dates(start, end);
//! assert!((yf - 2.0014).abs() < 1e-4);
//! ```

use chrono::{Datelike, Duration, NaiveDate};
use std::fmt;
use std::ops::Sub;
use std::str::FromStr;

use super::error::DateError;

/// Type-safe date wrapper around chrono::NaiveDate.
///
/// Serialises as ISO 8601 (`YYYY-MM-DD`).
///
/// # Examples
///
/// ```
/// use pricer_core::types::time::Date;
///
/// let date = Date::from_ymd(2024, 6, 15).unwrap();
/// let parsed: Date = "2024-06-15".parse().unwrap();
/// assert_eq!(date, parsed);
///
/// let start = Date::from_ymd(2024, 1, 1).unwrap();
/// let end = Date::from_ymd(2024, 1, 11).unwrap();
/// assert_eq!(end - start, 10);
/// ```
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct Date(NaiveDate);

impl Date {
    /// Creates a Date from year, month, and day components.
    ///
    /// # Errors
    /// Returns `DateError::InvalidDate` for impossible dates such as February 30th.
    ///
    /// # Examples
    ///
    /// ```
    /// use pricer_core::types::time::Date;
    ///
    /// assert!(Date::from_ymd(2024, 2, 29).is_ok());
    /// assert!(Date::from_ymd(2023, 2, 29).is_err());
    /// ```
    pub fn from_ymd(year: i32, month: u32, day: u32) -> Result<Self, DateError> {
        NaiveDate::from_ymd_opt(year, month, day)
            .map(Date)
            .ok_or(DateError::InvalidDate { year, month, day })
    }

    /// Parses a date from ISO 8601 format string (YYYY-MM-DD).
    ///
    /// # Errors
    /// Returns `DateError::ParseError` if the string is not a valid date.
    pub fn parse(s: &str) -> Result<Self, DateError> {
        NaiveDate::parse_from_str(s, "%Y-%m-%d")
            .map(Date)
            .map_err(|e| DateError::ParseError(format!("'{}': {}", s, e)))
    }

    /// Returns the year component.
    pub fn year(&self) -> i32 {
        self.0.year()
    }

    /// Returns the month component (1-12).
    pub fn month(&self) -> u32 {
        self.0.month()
    }

    /// Returns the day component (1-31).
    pub fn day(&self) -> u32 {
        self.0.day()
    }

    /// Returns the date `days` calendar days later (earlier if negative).
    pub fn add_days(self, days: i64) -> Self {
        Date(self.0 + Duration::days(days))
    }
}

impl Sub for Date {
    type Output = i64;

    /// Returns the number of days between two dates.
    fn sub(self, other: Self) -> i64 {
        (self.0 - other.0).num_days()
    }
}

impl FromStr for Date {
    type Err = DateError;

    fn from_str(s: &str) -> Result<Self, DateError> {
        Date::parse(s)
    }
}

impl fmt::Display for Date {
    /// Formats the date as ISO 8601 (YYYY-MM-DD).
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format("%Y-%m-%d"))
    }
}

/// Day Count Convention (year fraction convention).
///
/// # Variants
/// - `Actual36525`: Actual days / 365.25 (note maturity convention)
/// - `ActualActual365`: Actual days / 365
/// - `ActualActual360`: Actual days / 360
/// - `Thirty360`: 30/360 US bond basis
#[non_exhaustive]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum DayCountConvention {
    /// Actual/365.25: actual_days / 365.25
    ///
    /// Averages leap years into the denominator; used to convert the note's
    /// start and end dates into a maturity in years.
    #[default]
    Actual36525,

    /// Actual/365 Fixed: actual_days / 365.0
    ActualActual365,

    /// Actual/360: actual_days / 360.0
    ActualActual360,

    /// 30/360 US Bond Basis
    ///
    /// Each month is treated as having 30 days, and the year as 360 days.
    Thirty360,
}

impl DayCountConvention {
    /// Returns the standard convention name.
    ///
    /// # Examples
    ///
    /// ```
    /// use pricer_core::types::time::DayCountConvention;
    ///
    /// assert_eq!(DayCountConvention::Actual36525.name(), "ACT/365.25");
    /// assert_eq!(DayCountConvention::Thirty360.name(), "30/360");
    /// ```
    pub fn name(&self) -> &'static str {
        match self {
            DayCountConvention::Actual36525 => "ACT/365.25",
            DayCountConvention::ActualActual365 => "ACT/365",
            DayCountConvention::ActualActual360 => "ACT/360",
            DayCountConvention::Thirty360 => "30/360",
        }
    }

    /// Calculates the year fraction between two dates.
    ///
    /// Negative when `start > end`.
    pub fn year_fraction_dates(&self, start: Date, end: Date) -> f64 {
        let days = end - start;

        match self {
            DayCountConvention::Actual36525 => days as f64 / 365.25,
            DayCountConvention::ActualActual365 => days as f64 / 365.0,
            DayCountConvention::ActualActual360 => days as f64 / 360.0,
            DayCountConvention::Thirty360 => {
                let (a, b, sign) = if start <= end {
                    (start, end, 1.0)
                } else {
                    (end, start, -1.0)
                };

                let d1 = if a.day() == 31 { 30 } else { a.day() };
                let d2 = if b.day() == 31 && d1 == 30 { 30 } else { b.day() };

                let days_30_360 = 360 * (b.year() - a.year())
                    + 30 * (b.month() as i32 - a.month() as i32)
                    + (d2 as i32 - d1 as i32);
                sign * days_30_360 as f64 / 360.0
            }
        }
    }
}

impl FromStr for DayCountConvention {
    type Err = String;

    /// Parses day count convention from string (case-insensitive).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().replace(['/', ' '], "").as_str() {
            "ACT365.25" | "ACTUAL365.25" | "A365.25" => Ok(DayCountConvention::Actual36525),
            "ACT365" | "ACTUAL365" | "A365" => Ok(DayCountConvention::ActualActual365),
            "ACT360" | "ACTUAL360" | "A360" => Ok(DayCountConvention::ActualActual360),
            "30360" | "THIRTY360" => Ok(DayCountConvention::Thirty360),
            _ => Err(format!("Unknown day count convention: {}", s)),
        }
    }
}

impl fmt::Display for DayCountConvention {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

#[cfg(feature = "serde")]
mod serde_impl {
    use super::DayCountConvention;
    use serde::{de, Deserialize, Deserializer, Serialize, Serializer};
    use std::str::FromStr;

    impl Serialize for DayCountConvention {
        fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
        where
            S: Serializer,
        {
            serializer.serialize_str(self.name())
        }
    }

    impl<'de> Deserialize<'de> for DayCountConvention {
        fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
        where
            D: Deserializer<'de>,
        {
            let s = String::deserialize(deserializer)?;
            DayCountConvention::from_str(&s).map_err(de::Error::custom)
        }
    }
}

/// Equally spaced observation dates between a start and an end date.
///
/// Observation k (1-based) falls at `k · T / m` years, where `T` is the
/// year fraction from `start` to `end`. The last observation is the end date.
///
/// # Examples
///
/// ```
/// use pricer_core::types::time::{Date, ObservationSchedule};
///
/// let schedule = ObservationSchedule::new(
///     Date::from_ymd(2023, 6, 17).unwrap(),
///     Date::from_ymd(2025, 6, 17).unwrap(),
///     5,
/// )
/// .unwrap();
///
/// assert!((schedule.maturity_years() - 731.0 / 365.25).abs() < 1e-15);
/// assert_eq!(schedule.observation_dates().last(), Some(&schedule.end()));
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ObservationSchedule {
    start: Date,
    end: Date,
    count: usize,
    #[cfg_attr(feature = "serde", serde(default))]
    day_count: DayCountConvention,
}

impl ObservationSchedule {
    /// Creates a schedule with the ACT/365.25 convention.
    ///
    /// # Errors
    /// Returns `DateError::InvalidSchedule` unless `end` is after `start`.
    pub fn new(start: Date, end: Date, count: usize) -> Result<Self, DateError> {
        Self::with_day_count(start, end, count, DayCountConvention::Actual36525)
    }

    /// Creates a schedule with an explicit day count convention.
    ///
    /// # Errors
    /// Returns `DateError::InvalidSchedule` unless `end` is after `start`.
    pub fn with_day_count(
        start: Date,
        end: Date,
        count: usize,
        day_count: DayCountConvention,
    ) -> Result<Self, DateError> {
        if end <= start {
            return Err(DateError::InvalidSchedule {
                start: start.to_string(),
                end: end.to_string(),
            });
        }
        Ok(Self {
            start,
            end,
            count,
            day_count,
        })
    }

    /// Schedule start (valuation) date.
    pub fn start(&self) -> Date {
        self.start
    }

    /// Final observation date.
    pub fn end(&self) -> Date {
        self.end
    }

    /// Number of observation dates.
    pub fn count(&self) -> usize {
        self.count
    }

    /// Time from start to end in years.
    pub fn maturity_years(&self) -> f64 {
        self.day_count.year_fraction_dates(self.start, self.end)
    }

    /// Observation dates, rounded to the nearest calendar day.
    pub fn observation_dates(&self) -> Vec<Date> {
        let total_days = (self.end - self.start) as f64;
        let m = self.count as f64;
        (1..=self.count)
            .map(|k| {
                let offset = (k as f64 * total_days / m).round() as i64;
                self.start.add_days(offset)
            })
            .collect()
    }
}
