pub mod calendar;
pub mod config;
pub mod cycle;
pub mod predict;
pub mod user;

use cyclekeeper_core::{data_dir, Config, Tracker};

/// Everything a command needs to work on the stored history.
pub struct Session {
    pub config: Config,
    pub tracker: Tracker,
}

impl Session {
    /// Load config from the data directory and open the history database.
    pub fn open() -> Result<Self, Box<dyn std::error::Error>> {
        let dir = data_dir()?;
        let config = Config::load()?;
        let tracker = Tracker::open(&dir, &config)?;
        Ok(Self { config, tracker })
    }
}
