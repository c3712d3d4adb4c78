use chrono::{Local, NaiveDateTime};

#[derive(Debug, Clone)]
pub struct Config {
    /// When true, the one-year lookback filter is disabled and full
    /// historical listings are emitted.
    pub archive_mode: bool,
}

/// Everything an extractor call needs beyond the page itself. Passed
/// explicitly so tests can freeze the clock and flip archive mode per call.
#[derive(Debug, Clone, Copy)]
pub struct ScrapeContext {
    pub archive_mode: bool,
    pub now: NaiveDateTime,
}

impl ScrapeContext {
    pub fn new(config: &Config) -> Self {
        Self {
            archive_mode: config.archive_mode,
            now: Local::now().naive_local(),
        }
    }

    pub fn frozen(archive_mode: bool, now: NaiveDateTime) -> Self {
        Self { archive_mode, now }
    }
}
