//! # Cyclekeeper Core Library
//!
//! This library records menstrual cycles and forecasts the start of the next
//! one. It follows a CLI-first layout: every operation lives here, and the
//! `cyclekeeper` binary is a thin front end over the same types.
//!
//! ## Architecture
//!
//! - **Cycle Store**: an append-only, insertion-ordered history owned by the
//!   caller; adding a cycle highlights its days on a [`CalendarSurface`]
//! - **Predictor**: a pure function of the history; the mean end-to-next-start
//!   gap added to the last cycle's end
//! - **Storage**: SQLite history between sessions and TOML configuration
//! - **Credentials**: a plaintext username/password JSON file (not a security
//!   boundary)
//!
//! ## Key Components
//!
//! - [`CycleStore`]: session history
//! - [`predict_next`] / [`forecast`]: next start date
//! - [`MonthView`]: in-memory calendar surface with a text renderer
//! - [`Database`]: persisted history
//! - [`Tracker`]: session facade tying the store to the database
//! - [`Config`]: application configuration

pub mod calendar;
pub mod credentials;
pub mod cycle;
pub mod error;
pub mod predictor;
pub mod storage;
pub mod tracker;

pub use calendar::{CalendarSurface, Mark, MonthView, NoopSurface};
pub use credentials::CredentialStore;
pub use cycle::{format_date, parse_date, Cycle, CycleStore, Flow, DATE_FORMAT};
pub use error::{ConfigError, CoreError, CredentialError, DatabaseError, ValidationError};
pub use predictor::{forecast, predict_next, Forecast, HistoryOrder};
pub use storage::{data_dir, Config, CycleRow, Database};
pub use tracker::Tracker;
