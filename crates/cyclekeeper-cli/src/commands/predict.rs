use cyclekeeper_core::format_date;
use cyclekeeper_core::predictor::MIN_CYCLES;
use serde::Serialize;

use super::Session;

const NOT_ENOUGH_DATA: &str = "Please add at least two cycles to predict the next period.";
const OUT_OF_RANGE: &str = "The predicted date falls outside the supported calendar range.";

#[derive(Serialize)]
struct PredictionOutput {
    next_start: Option<String>,
    average_gap_days: Option<f64>,
    gaps: Vec<i64>,
    based_on: usize,
}

pub fn run(json: bool) -> Result<(), Box<dyn std::error::Error>> {
    let session = Session::open()?;
    let forecast = session.tracker.forecast();

    if json {
        let out = match &forecast {
            Some(f) => PredictionOutput {
                next_start: Some(format_date(f.next_start)),
                average_gap_days: Some(f.average_gap_days),
                gaps: f.gaps.clone(),
                based_on: f.based_on,
            },
            None => PredictionOutput {
                next_start: None,
                average_gap_days: None,
                gaps: Vec::new(),
                based_on: session.tracker.store().len(),
            },
        };
        println!("{}", serde_json::to_string_pretty(&out)?);
        return Ok(());
    }

    match forecast {
        Some(f) => println!(
            "Predicted next period start date: {}",
            format_date(f.next_start)
        ),
        None if session.tracker.store().len() < MIN_CYCLES => println!("{NOT_ENOUGH_DATA}"),
        None => println!("{OUT_OF_RANGE}"),
    }
    Ok(())
}
