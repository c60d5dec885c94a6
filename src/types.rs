use chrono::Datelike;
use lazy_static::lazy_static;
use std::str::FromStr;
use thiserror::Error;

use crate::views::map_data::LocalizableName;

/// Earliest year the date range filter accepts.
pub const MIN_YEAR: i32 = -4000;

lazy_static! {
    /// Latest year the date range filter accepts.
    /// Evaluated once from the wall clock and kept for the whole session.
    pub static ref MAX_YEAR: i32 = chrono::Local::now().year();
}

/// Separator between the two years in `"min,max"`.
pub const RANGE_SEPARATOR: char = ',';

/// Inclusive year domain used for validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct YearBounds {
    pub min: i32,
    pub max: i32,
}

impl YearBounds {
    pub const fn new(min: i32, max: i32) -> Self {
        Self { min, max }
    }

    /// `[MIN_YEAR, MAX_YEAR]`
    pub fn current() -> Self {
        Self::new(MIN_YEAR, *MAX_YEAR)
    }

    pub fn contains(&self, year: i32) -> bool {
        (self.min..=self.max).contains(&year)
    }

    pub fn default_for(&self, bound: Bound) -> i32 {
        match bound {
            Bound::Start => self.min,
            Bound::End => self.max,
        }
    }
}

impl Default for YearBounds {
    fn default() -> Self {
        Self::current()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RangeError {
    #[error("invalid date range: start ({min}) is after end ({max})")]
    Reversed { min: i32, max: i32 },

    #[error("invalid date range format: {0:?}")]
    InvalidFormat(String),
}

/// Inclusive `(min_year, max_year)` pair with `min_year <= max_year`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DateRange {
    min_year: i32,
    max_year: i32,
}

impl DateRange {
    pub fn new(min_year: i32, max_year: i32) -> Result<Self, RangeError> {
        if min_year > max_year {
            return Err(RangeError::Reversed {
                min: min_year,
                max: max_year,
            });
        }
        Ok(Self { min_year, max_year })
    }

    /// Range from `min_year` up to `max_year`, or just `min_year` when the
    /// end lies before it. The start wins a conflict.
    pub fn spanning(min_year: i32, max_year: i32) -> Self {
        Self {
            min_year,
            max_year: max_year.max(min_year),
        }
    }

    pub const fn min_year(&self) -> i32 {
        self.min_year
    }

    pub const fn max_year(&self) -> i32 {
        self.max_year
    }
}

impl std::fmt::Display for DateRange {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}{}{}", self.min_year, RANGE_SEPARATOR, self.max_year)
    }
}

/// Splits `"min,max"` into two integers without checking their order.
pub fn parse_year_pair(s: &str) -> Option<(i32, i32)> {
    let (min, max) = s.split_once(RANGE_SEPARATOR)?;
    let min = min.trim().parse::<i32>().ok()?;
    let max = max.trim().parse::<i32>().ok()?;
    Some((min, max))
}

impl FromStr for DateRange {
    type Err = RangeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (min, max) =
            parse_year_pair(s).ok_or_else(|| RangeError::InvalidFormat(s.to_string()))?;
        Self::new(min, max)
    }
}

/// Side of the range a control pair edits.
#[derive(strum::EnumIter, strum::Display, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Bound {
    #[strum(serialize = "start")]
    Start,
    #[strum(serialize = "end")]
    End,
}

impl LocalizableName for Bound {
    fn loc_key(&self) -> &'static str {
        match self {
            Bound::Start => "date_ranges.start_date",
            Bound::End => "date_ranges.end_date",
        }
    }
}
