pub mod completions;
pub mod config;
pub mod import;
pub mod plan;
pub mod stats;
pub mod study;
pub mod task;
pub mod timer;

use chrono::{Local, NaiveDate};
use studyhouse_core::{strategy_for, Config, Database, TaskStore};

/// Open the store with the strategy the configuration composes.
pub(crate) fn open_store() -> Result<TaskStore, Box<dyn std::error::Error>> {
    let config = Config::load_or_default();
    let db = Database::open()?;
    let plan = db.load_plan_config();
    let strategy = strategy_for(config.scheduling.philosophy, plan);
    Ok(TaskStore::open(db, strategy))
}

/// The local calendar day scheduling decisions are made against.
pub(crate) fn today() -> NaiveDate {
    Local::now().date_naive()
}

/// Parse a YYYY-MM-DD day string.
pub(crate) fn parse_day(s: &str) -> Result<NaiveDate, Box<dyn std::error::Error>> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .map_err(|e| format!("invalid date '{s}' (expected YYYY-MM-DD): {e}").into())
}
