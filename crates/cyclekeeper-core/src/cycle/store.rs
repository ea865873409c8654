//! Append-only, in-memory cycle history.

use tracing::{debug, warn};

use super::{format_date, Cycle, Flow};
use crate::calendar::CalendarSurface;
use crate::error::ValidationError;

/// Ordered cycle history for one session.
///
/// Insertion order is preserved exactly; entries are never sorted,
/// deduplicated, edited or removed. The store is a plain owned value:
/// presentation code borrows it and never becomes the source of truth.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CycleStore {
    cycles: Vec<Cycle>,
}

impl CycleStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Wrap an existing history, keeping its order.
    pub fn from_cycles(cycles: Vec<Cycle>) -> Self {
        Self { cycles }
    }

    /// Validate raw form input, append the cycle and highlight its days.
    ///
    /// On a validation error the history is untouched and `surface` is
    /// never called.
    pub fn add_cycle<S>(
        &mut self,
        start: &str,
        end: &str,
        flow: Flow,
        surface: &mut S,
    ) -> Result<Cycle, ValidationError>
    where
        S: CalendarSurface + ?Sized,
    {
        let cycle = Cycle::parse(start, end, flow)?;
        self.append(cycle, surface);
        Ok(cycle)
    }

    /// Append a validated cycle and highlight each of its days on `surface`.
    pub fn append<S>(&mut self, cycle: Cycle, surface: &mut S)
    where
        S: CalendarSurface + ?Sized,
    {
        self.push(cycle);
        cycle.highlight_on(surface);
    }

    /// Append an already-validated cycle without touching any display.
    pub fn push(&mut self, cycle: Cycle) {
        if let Some(prev) = self.cycles.last() {
            if cycle.start() <= prev.end() {
                warn!(
                    previous_end = %format_date(prev.end()),
                    start = %format_date(cycle.start()),
                    "cycle entered out of chronological order"
                );
            }
        }
        self.cycles.push(cycle);
        debug!(
            start = %format_date(cycle.start()),
            end = %format_date(cycle.end()),
            flow = %cycle.flow(),
            len = self.cycles.len(),
            "cycle appended"
        );
    }

    /// Read-only view of the history in insertion order.
    pub fn history(&self) -> &[Cycle] {
        &self.cycles
    }

    pub fn last(&self) -> Option<&Cycle> {
        self.cycles.last()
    }

    pub fn len(&self) -> usize {
        self.cycles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cycles.is_empty()
    }
}
