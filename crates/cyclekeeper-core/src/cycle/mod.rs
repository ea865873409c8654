//! Cycle data model.
//!
//! A [`Cycle`] is one recorded period: the first and last day of flow plus
//! a [`Flow`] intensity label. Cycles are immutable once created and are
//! collected, in the order they were entered, by a [`CycleStore`].

mod store;

pub use store::CycleStore;

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::calendar::CalendarSurface;
use crate::error::ValidationError;

/// Text format for every date crossing the input/output boundary.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Label attached to each highlighted calendar day.
pub const PERIOD_LABEL: &str = "Period";

/// Parse a `YYYY-MM-DD` string. `field` names the input in the error.
///
/// The year must be exactly four digits. Month and day may drop their
/// leading zero (`2024-1-5`). Signs and surrounding whitespace are rejected.
pub fn parse_date(field: &str, value: &str) -> Result<NaiveDate, ValidationError> {
    let invalid = || ValidationError::DateFormat {
        field: field.to_string(),
        value: value.to_string(),
    };
    if !has_date_shape(value) {
        return Err(invalid());
    }
    NaiveDate::parse_from_str(value, DATE_FORMAT).map_err(|_| invalid())
}

/// Four year digits, one or two month digits, one or two day digits.
fn has_date_shape(value: &str) -> bool {
    let digits = |part: &str, min: usize, max: usize| {
        (min..=max).contains(&part.len()) && part.bytes().all(|b| b.is_ascii_digit())
    };
    let mut parts = value.split('-');
    match (parts.next(), parts.next(), parts.next(), parts.next()) {
        (Some(year), Some(month), Some(day), None) => {
            digits(year, 4, 4) && digits(month, 1, 2) && digits(day, 1, 2)
        }
        _ => false,
    }
}

/// Format a date as `YYYY-MM-DD`.
pub fn format_date(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

/// Flow intensity. Ordinal only; carries no weight in prediction.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Flow {
    #[default]
    Light,
    Medium,
    Heavy,
}

impl Flow {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Light => "light",
            Self::Medium => "medium",
            Self::Heavy => "heavy",
        }
    }

    /// Single-character marker used by text calendars.
    pub fn glyph(&self) -> char {
        match self {
            Self::Light => '.',
            Self::Medium => '+',
            Self::Heavy => '#',
        }
    }
}

impl fmt::Display for Flow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Flow {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "light" => Ok(Self::Light),
            "medium" => Ok(Self::Medium),
            "heavy" => Ok(Self::Heavy),
            _ => Err(ValidationError::UnknownFlow(s.to_string())),
        }
    }
}

/// One recorded period.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cycle {
    start: NaiveDate,
    end: NaiveDate,
    flow: Flow,
}

impl Cycle {
    /// Build a cycle, rejecting an end date before the start date.
    pub fn new(start: NaiveDate, end: NaiveDate, flow: Flow) -> Result<Self, ValidationError> {
        if end < start {
            return Err(ValidationError::InvalidRange { start, end });
        }
        Ok(Self { start, end, flow })
    }

    /// Parse raw form input into a cycle.
    pub fn parse(start: &str, end: &str, flow: Flow) -> Result<Self, ValidationError> {
        let start = parse_date("start", start)?;
        let end = parse_date("end", end)?;
        Self::new(start, end, flow)
    }

    pub fn start(&self) -> NaiveDate {
        self.start
    }

    pub fn end(&self) -> NaiveDate {
        self.end
    }

    pub fn flow(&self) -> Flow {
        self.flow
    }

    /// Every day of flow, `start..=end`, ascending.
    pub fn days(&self) -> impl Iterator<Item = NaiveDate> {
        let end = self.end;
        self.start.iter_days().take_while(move |d| *d <= end)
    }

    /// Number of days of flow, both ends included.
    pub fn duration_days(&self) -> i64 {
        (self.end - self.start).num_days() + 1
    }

    /// Ask `surface` to mark every day of this cycle as [`PERIOD_LABEL`].
    pub fn highlight_on<S>(&self, surface: &mut S)
    where
        S: CalendarSurface + ?Sized,
    {
        self.highlight_as(surface, PERIOD_LABEL);
    }

    /// Mark every day of this cycle on `surface` under `label`.
    pub fn highlight_as<S>(&self, surface: &mut S, label: &str)
    where
        S: CalendarSurface + ?Sized,
    {
        for day in self.days() {
            surface.highlight(day, label, self.flow);
        }
    }

    /// Days from this cycle's end to `next`'s start. Negative when they overlap.
    pub fn gap_to(&self, next: &Cycle) -> i64 {
        (next.start - self.end).num_days()
    }
}
