//! Session facade over the cycle store and the history database.
//!
//! A [`Tracker`] loads the persisted history into a [`CycleStore`] when it
//! opens, writes each new cycle to the database before appending it in
//! memory, and answers prediction requests from the in-memory history.

use std::path::Path;

use tracing::info;

use crate::calendar::CalendarSurface;
use crate::cycle::{Cycle, CycleStore, Flow, PERIOD_LABEL};
use crate::error::Result;
use crate::predictor::{self, Forecast, HistoryOrder};
use crate::storage::{Config, CycleRow, Database};

pub struct Tracker {
    store: CycleStore,
    db: Database,
    order: HistoryOrder,
    label: String,
}

impl Tracker {
    /// Open the history database configured for `dir`.
    pub fn open(dir: &Path, config: &Config) -> Result<Self> {
        let db = Database::open(&config.database_path(dir))?;
        Ok(Self::with_database(db, config.prediction.order)?.with_label(&config.calendar.label))
    }

    /// Wrap an already-open database. Days are highlighted as [`PERIOD_LABEL`].
    pub fn with_database(db: Database, order: HistoryOrder) -> Result<Self> {
        let store = db.load_store()?;
        Ok(Self {
            store,
            db,
            order,
            label: PERIOD_LABEL.to_string(),
        })
    }

    /// Use `label` for every highlighted day.
    pub fn with_label(mut self, label: &str) -> Self {
        self.label = label.to_string();
        self
    }

    /// Validate, persist and append a cycle, highlighting its days.
    ///
    /// Nothing is written or highlighted when validation fails.
    pub fn add_cycle<S>(&mut self, start: &str, end: &str, flow: Flow, surface: &mut S) -> Result<Cycle>
    where
        S: CalendarSurface + ?Sized,
    {
        let cycle = Cycle::parse(start, end, flow)?;
        let id = self.db.record_cycle(&cycle)?;
        self.store.push(cycle);
        cycle.highlight_as(surface, &self.label);
        info!(id, start, end, %flow, "cycle recorded");
        Ok(cycle)
    }

    /// Highlight every recorded cycle on `surface`.
    pub fn paint<S>(&self, surface: &mut S)
    where
        S: CalendarSurface + ?Sized,
    {
        for cycle in self.store.history() {
            cycle.highlight_as(surface, &self.label);
        }
    }

    pub fn store(&self) -> &CycleStore {
        &self.store
    }

    pub fn rows(&self) -> Result<Vec<CycleRow>> {
        Ok(self.db.cycles()?)
    }

    /// Forecast using the configured history order.
    pub fn forecast(&self) -> Option<Forecast> {
        predictor::forecast(self.store.history(), self.order)
    }
}
