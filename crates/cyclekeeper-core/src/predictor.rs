//! Next-cycle prediction.
//!
//! The forecast is the mean end-to-next-start gap of the recorded history
//! added to the end of the most recent cycle:
//!
//! ```text
//! gap[i]    = history[i].start - history[i-1].end      (whole days)
//! avg_gap   = mean(gap)                                (not rounded)
//! predicted = history[last].end + avg_gap days         (fraction carried)
//! ```
//!
//! The fractional part of `avg_gap` is carried as a time of day and only
//! dropped when the instant is reduced to a calendar date, so a mean of
//! 24.5 days lands on day 24 and a mean of -0.5 lands on the day before.
//!
//! # Example
//!
//! ```rust
//! use cyclekeeper_core::cycle::{Cycle, Flow};
//! use cyclekeeper_core::predictor::predict_next;
//!
//! let history = vec![
//!     Cycle::parse("2024-01-01", "2024-01-05", Flow::Light).unwrap(),
//!     Cycle::parse("2024-01-29", "2024-02-02", Flow::Medium).unwrap(),
//! ];
//! let next = predict_next(&history).unwrap();
//! assert_eq!(next.to_string(), "2024-02-26");
//! ```

use chrono::{Duration, NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};

use crate::cycle::Cycle;

/// Minimum number of recorded cycles needed for a forecast.
pub const MIN_CYCLES: usize = 2;

const MICROS_PER_DAY: f64 = 86_400_000_000.0;

/// Order in which history is walked when computing gaps.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HistoryOrder {
    /// Entry order, exactly as recorded.
    #[default]
    Insertion,
    /// Stable-sorted by start date first.
    Chronological,
}

/// A computed forecast with the figures behind it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Forecast {
    pub next_start: NaiveDate,
    pub average_gap_days: f64,
    pub gaps: Vec<i64>,
    /// Number of cycles the forecast was computed from.
    pub based_on: usize,
}

/// Gaps between consecutive cycles in the given order.
pub fn gaps(history: &[Cycle]) -> Vec<i64> {
    history.windows(2).map(|w| w[0].gap_to(&w[1])).collect()
}

/// Predict the next start date from history in insertion order.
///
/// Returns `None` when fewer than [`MIN_CYCLES`] cycles are recorded.
pub fn predict_next(history: &[Cycle]) -> Option<NaiveDate> {
    forecast(history, HistoryOrder::Insertion).map(|f| f.next_start)
}

/// Compute a full [`Forecast`].
///
/// Returns `None` when fewer than [`MIN_CYCLES`] cycles are recorded, or
/// when the predicted instant falls outside the representable date range.
pub fn forecast(history: &[Cycle], order: HistoryOrder) -> Option<Forecast> {
    if history.len() < MIN_CYCLES {
        return None;
    }

    let sorted;
    let ordered: &[Cycle] = match order {
        HistoryOrder::Insertion => history,
        HistoryOrder::Chronological => {
            let mut v = history.to_vec();
            v.sort_by_key(Cycle::start);
            sorted = v;
            &sorted
        }
    };

    let gaps = gaps(ordered);
    let average_gap_days = gaps.iter().sum::<i64>() as f64 / gaps.len() as f64;
    let last = ordered.last()?;
    let next_start = shift_by_days(last.end(), average_gap_days)?;

    Some(Forecast {
        next_start,
        average_gap_days,
        gaps,
        based_on: ordered.len(),
    })
}

/// `date` at midnight plus a fractional number of days, reduced to a date.
fn shift_by_days(date: NaiveDate, days: f64) -> Option<NaiveDate> {
    let micros = (days * MICROS_PER_DAY).round();
    if !micros.is_finite() || micros.abs() >= i64::MAX as f64 {
        return None;
    }
    date.and_time(NaiveTime::MIN)
        .checked_add_signed(Duration::microseconds(micros as i64))
        .map(|instant| instant.date())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cycle::{parse_date, Flow};

    fn c(start: &str, end: &str) -> Cycle {
        Cycle::parse(start, end, Flow::Light).unwrap()
    }

    fn d(s: &str) -> NaiveDate {
        parse_date("test", s).unwrap()
    }

    #[test]
    fn two_cycles_scenario() {
        let history = [c("2024-01-01", "2024-01-05"), c("2024-01-29", "2024-02-02")];
        assert_eq!(gaps(&history), vec![24]);
        assert_eq!(predict_next(&history), Some(d("2024-02-26")));
    }

    #[test]
    fn insufficient_history_yields_none() {
        assert_eq!(predict_next(&[]), None);
        assert_eq!(predict_next(&[c("2024-01-01", "2024-01-05")]), None);
        assert!(forecast(&[], HistoryOrder::Chronological).is_none());
    }

    #[test]
    fn three_cycles_average_whole_gap() {
        // gaps 28 and 30
        let history = [
            c("2024-01-01", "2024-01-05"),
            c("2024-02-02", "2024-02-06"),
            c("2024-03-07", "2024-03-11"),
        ];
        let f = forecast(&history, HistoryOrder::Insertion).unwrap();
        assert_eq!(f.gaps, vec![28, 30]);
        assert_eq!(f.average_gap_days, 29.0);
        assert_eq!(f.based_on, 3);
        assert_eq!(f.next_start, d("2024-03-11") + Duration::days(29));
    }

    #[test]
    fn fractional_average_is_floored_at_the_end() {
        // gaps 24 and 25 -> 24.5
        let history = [
            c("2024-01-01", "2024-01-05"),
            c("2024-01-29", "2024-02-02"),
            c("2024-02-27", "2024-03-01"),
        ];
        let f = forecast(&history, HistoryOrder::Insertion).unwrap();
        assert_eq!(f.average_gap_days, 24.5);
        assert_eq!(f.next_start, d("2024-03-25"));
    }

    #[test]
    fn negative_fraction_moves_to_previous_day() {
        // gaps 0 and -1 -> -0.5
        let history = [
            c("2024-01-01", "2024-01-05"),
            c("2024-01-05", "2024-01-09"),
            c("2024-01-08", "2024-01-10"),
        ];
        assert_eq!(predict_next(&history), Some(d("2024-01-09")));
    }

    #[test]
    fn unsorted_history_uses_insertion_order_by_default() {
        let history = [c("2024-03-01", "2024-03-05"), c("2024-01-01", "2024-01-05")];
        let f = forecast(&history, HistoryOrder::Insertion).unwrap();
        assert_eq!(f.gaps, vec![-64]);
        assert_eq!(f.next_start, d("2024-01-05") - Duration::days(64));
    }

    #[test]
    fn chronological_order_sorts_before_averaging() {
        let history = [c("2024-03-01", "2024-03-05"), c("2024-01-01", "2024-01-05")];
        let f = forecast(&history, HistoryOrder::Chronological).unwrap();
        assert_eq!(f.gaps, vec![56]);
        assert_eq!(f.next_start, d("2024-03-05") + Duration::days(56));
    }

    #[test]
    fn out_of_range_instant_yields_none() {
        let far = |y| NaiveDate::from_ymd_opt(y, 1, 1).unwrap();
        let history = [
            Cycle::new(far(-200_000), far(-200_000), Flow::Light).unwrap(),
            Cycle::new(far(200_000), far(200_000), Flow::Light).unwrap(),
        ];
        assert_eq!(gaps(&history).len(), 1);
        assert_eq!(predict_next(&history), None);
    }

    #[test]
    fn prediction_is_deterministic() {
        let history = [c("2024-01-01", "2024-01-05"), c("2024-01-29", "2024-02-02")];
        assert_eq!(predict_next(&history), predict_next(&history));
    }
}
