//! End-to-end history scenarios: record, persist, reload, predict.

use chrono::Duration;
use cyclekeeper_core::{
    parse_date, Config, CoreError, Database, Flow, HistoryOrder, MonthView, NoopSurface, Tracker,
    ValidationError,
};

fn d(s: &str) -> chrono::NaiveDate {
    parse_date("test", s).unwrap()
}

fn open(dir: &std::path::Path) -> Tracker {
    Tracker::open(dir, &Config::default()).unwrap()
}

#[test]
fn two_cycles_predict_february_26() {
    let dir = tempfile::tempdir().unwrap();
    let mut t = open(dir.path());
    t.add_cycle("2024-01-01", "2024-01-05", Flow::Light, &mut NoopSurface)
        .unwrap();
    t.add_cycle("2024-01-29", "2024-02-02", Flow::Heavy, &mut NoopSurface)
        .unwrap();

    let f = t.forecast().unwrap();
    assert_eq!(f.gaps, vec![24]);
    assert_eq!(f.next_start, d("2024-02-26"));
}

#[test]
fn empty_and_single_histories_have_no_prediction() {
    let dir = tempfile::tempdir().unwrap();
    let mut t = open(dir.path());
    assert!(t.forecast().is_none());
    t.add_cycle("2024-01-01", "2024-01-05", Flow::Light, &mut NoopSurface)
        .unwrap();
    assert!(t.forecast().is_none());
}

#[test]
fn malformed_date_is_rejected_and_history_unchanged() {
    let dir = tempfile::tempdir().unwrap();
    let mut t = open(dir.path());
    t.add_cycle("2024-01-01", "2024-01-05", Flow::Light, &mut NoopSurface)
        .unwrap();

    let mut view = MonthView::new();
    let err = t
        .add_cycle("2024-13-40", "2024-01-05", Flow::Light, &mut view)
        .unwrap_err();
    assert!(matches!(
        err,
        CoreError::Validation(ValidationError::DateFormat { .. })
    ));
    assert_eq!(t.store().len(), 1);
    assert!(view.is_empty());

    let reopened = open(dir.path());
    assert_eq!(reopened.store().len(), 1);
}

#[test]
fn three_cycles_average_twenty_nine_days() {
    let dir = tempfile::tempdir().unwrap();
    let mut t = open(dir.path());
    for (s, e) in [
        ("2024-01-01", "2024-01-05"),
        ("2024-02-02", "2024-02-06"),
        ("2024-03-07", "2024-03-11"),
    ] {
        t.add_cycle(s, e, Flow::Medium, &mut NoopSurface).unwrap();
    }
    let f = t.forecast().unwrap();
    assert_eq!(f.average_gap_days, 29.0);
    assert_eq!(f.next_start, d("2024-03-11") + Duration::days(29));
}

#[test]
fn reloaded_history_predicts_the_same_date() {
    let dir = tempfile::tempdir().unwrap();
    let first = {
        let mut t = open(dir.path());
        t.add_cycle("2024-01-01", "2024-01-05", Flow::Light, &mut NoopSurface)
            .unwrap();
        t.add_cycle("2024-01-29", "2024-02-02", Flow::Light, &mut NoopSurface)
            .unwrap();
        t.add_cycle("2024-02-27", "2024-03-01", Flow::Light, &mut NoopSurface)
            .unwrap();
        t.forecast().unwrap()
    };
    let again = open(dir.path()).forecast().unwrap();
    assert_eq!(first, again);
    assert_eq!(again.next_start, d("2024-03-25"));
}

#[test]
fn chronological_order_is_opt_in() {
    let db = Database::open_memory().unwrap();
    let mut t = Tracker::with_database(db, HistoryOrder::Chronological).unwrap();
    t.add_cycle("2024-03-01", "2024-03-05", Flow::Light, &mut NoopSurface)
        .unwrap();
    t.add_cycle("2024-01-01", "2024-01-05", Flow::Light, &mut NoopSurface)
        .unwrap();
    let f = t.forecast().unwrap();
    assert_eq!(f.gaps, vec![56]);
    assert_eq!(t.store().history()[0].start(), d("2024-03-01"));
}
