use clap::{Subcommand, ValueEnum};
use cyclekeeper_core::{format_date, Flow, MonthView};

use super::Session;

#[derive(Clone, Copy, ValueEnum)]
pub enum FlowArg {
    Light,
    Medium,
    Heavy,
}

impl From<FlowArg> for Flow {
    fn from(arg: FlowArg) -> Self {
        match arg {
            FlowArg::Light => Flow::Light,
            FlowArg::Medium => Flow::Medium,
            FlowArg::Heavy => Flow::Heavy,
        }
    }
}

#[derive(Subcommand)]
pub enum CycleAction {
    /// Record a cycle
    Add {
        /// First day of flow (YYYY-MM-DD)
        #[arg(long)]
        start: String,
        /// Last day of flow (YYYY-MM-DD)
        #[arg(long)]
        end: String,
        /// Flow intensity
        #[arg(long, value_enum, default_value_t = FlowArg::Light)]
        flow: FlowArg,
    },
    /// List recorded cycles in entry order
    List {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}

pub fn run(action: CycleAction) -> Result<(), Box<dyn std::error::Error>> {
    let mut session = Session::open()?;

    match action {
        CycleAction::Add { start, end, flow } => {
            let mut view = MonthView::new();
            let cycle = session
                .tracker
                .add_cycle(&start, &end, flow.into(), &mut view)?;
            println!(
                "Cycle added. Start Date: {}, End Date: {}, Flow: {}",
                format_date(cycle.start()),
                format_date(cycle.end()),
                cycle.flow()
            );
            let week_start = session.config.calendar.week_start.weekday();
            for month in view.marked_months() {
                println!();
                print!("{}", view.render_month(month, week_start));
            }
        }
        CycleAction::List { json } => {
            let rows = session.tracker.rows()?;
            if json {
                println!("{}", serde_json::to_string_pretty(&rows)?);
            } else if rows.is_empty() {
                println!("No cycles recorded.");
            } else {
                for row in rows {
                    println!(
                        "{}  {} -> {}  {}",
                        row.id,
                        format_date(row.cycle.start()),
                        format_date(row.cycle.end()),
                        row.cycle.flow()
                    );
                }
            }
        }
    }
    Ok(())
}
