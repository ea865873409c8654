use chrono::{Datelike, Local, NaiveDate};
use cyclekeeper_core::{parse_date, MonthView};

use super::Session;

/// Parse `YYYY-MM` into the first day of that month.
fn parse_month(value: &str) -> Result<NaiveDate, Box<dyn std::error::Error>> {
    parse_date("month", &format!("{value}-01"))
        .map_err(|_| format!("invalid month '{value}': expected YYYY-MM").into())
}

pub fn run(month: Option<&str>) -> Result<(), Box<dyn std::error::Error>> {
    let session = Session::open()?;

    let shown = match month {
        Some(m) => parse_month(m)?,
        None => session
            .tracker
            .store()
            .last()
            .map(|c| c.start())
            .unwrap_or_else(|| Local::now().date_naive()),
    };

    let mut view = MonthView::new();
    session.tracker.paint(&mut view);
    print!(
        "{}",
        view.render_month(shown, session.config.calendar.week_start.weekday())
    );

    let marked = shown
        .iter_days()
        .take_while(|d| d.month() == shown.month())
        .filter(|d| !view.marks_on(*d).is_empty())
        .count();
    if marked > 0 {
        println!();
        println!("legend: . light  + medium  # heavy");
    }
    Ok(())
}
