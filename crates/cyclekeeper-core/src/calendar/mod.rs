//! Calendar display surface.
//!
//! The cycle store asks a [`CalendarSurface`] to highlight every day of a
//! recorded cycle. Any front end can implement the trait; [`MonthView`]
//! is the in-memory one the CLI renders as a text month grid.

use std::collections::BTreeMap;

use chrono::{Datelike, Duration, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};

use crate::cycle::Flow;

/// Anything that can mark a calendar day.
pub trait CalendarSurface {
    /// Mark one day with a label, tagged by flow intensity.
    fn highlight(&mut self, date: NaiveDate, label: &str, tag: Flow);
}

/// Surface that ignores every highlight.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopSurface;

impl CalendarSurface for NoopSurface {
    fn highlight(&mut self, _date: NaiveDate, _label: &str, _tag: Flow) {}
}

/// One highlight on one day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Mark {
    pub label: String,
    pub tag: Flow,
}

/// In-memory calendar collecting marks per day.
#[derive(Debug, Clone, Default)]
pub struct MonthView {
    marks: BTreeMap<NaiveDate, Vec<Mark>>,
}

impl CalendarSurface for MonthView {
    fn highlight(&mut self, date: NaiveDate, label: &str, tag: Flow) {
        self.marks.entry(date).or_default().push(Mark {
            label: label.to_string(),
            tag,
        });
    }
}

impl MonthView {
    pub fn new() -> Self {
        Self::default()
    }

    /// Marks recorded for `date`, in the order they arrived.
    pub fn marks_on(&self, date: NaiveDate) -> &[Mark] {
        self.marks.get(&date).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Total number of marks across all days.
    pub fn len(&self) -> usize {
        self.marks.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.marks.is_empty()
    }

    /// First day of every month that carries at least one mark, ascending.
    pub fn marked_months(&self) -> Vec<NaiveDate> {
        let mut months: Vec<NaiveDate> = self.marks.keys().map(|d| first_of_month(*d)).collect();
        months.dedup();
        months
    }

    /// Heaviest flow marked on `date`, if any.
    fn strongest(&self, date: NaiveDate) -> Option<Flow> {
        self.marks_on(date).iter().map(|m| m.tag).max()
    }

    /// Render the month containing `day` as a text grid.
    ///
    /// Each cell is the day number followed by the flow glyph of the
    /// heaviest mark on that day (blank when unmarked).
    pub fn render_month(&self, day: NaiveDate, week_start: Weekday) -> String {
        let first = first_of_month(day);
        let mut out = String::new();

        let title = first.format("%B %Y").to_string();
        out.push_str(format!("{title:^28}").trim_end());
        out.push('\n');

        let mut header = String::new();
        let mut wd = week_start;
        for _ in 0..7 {
            header.push_str(&format!("{:<4}", short_name(wd)));
            wd = wd.succ();
        }
        out.push_str(header.trim_end());
        out.push('\n');

        let offset = (first.weekday().num_days_from_monday() + 7
            - week_start.num_days_from_monday())
            % 7;
        let mut line = "    ".repeat(offset as usize);
        let mut column = offset;
        for date in first.iter_days().take_while(|d| d.month() == first.month()) {
            let glyph = self.strongest(date).map(|f| f.glyph()).unwrap_or(' ');
            line.push_str(&format!("{:>2}{glyph} ", date.day()));
            column += 1;
            if column == 7 {
                out.push_str(line.trim_end());
                out.push('\n');
                line.clear();
                column = 0;
            }
        }
        if !line.is_empty() {
            out.push_str(line.trim_end());
            out.push('\n');
        }
        out
    }
}

fn first_of_month(day: NaiveDate) -> NaiveDate {
    day - Duration::days(i64::from(day.day0()))
}

fn short_name(wd: Weekday) -> &'static str {
    match wd {
        Weekday::Mon => "Mo",
        Weekday::Tue => "Tu",
        Weekday::Wed => "We",
        Weekday::Thu => "Th",
        Weekday::Fri => "Fr",
        Weekday::Sat => "Sa",
        Weekday::Sun => "Su",
    }
}
