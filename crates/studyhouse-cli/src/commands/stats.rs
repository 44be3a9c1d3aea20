//! Progress statistics commands.

use chrono::{Datelike, Local};
use clap::Subcommand;
use studyhouse_core::stats;

#[derive(Subcommand)]
pub enum StatsAction {
    /// Headline progress numbers
    Summary,
    /// Monthly completion activity calendar
    Calendar {
        /// Year (defaults to the current year)
        #[arg(long)]
        year: Option<i32>,
        /// Month 1-12 (defaults to the current month)
        #[arg(long)]
        month: Option<u32>,
    },
}

pub fn run(action: StatsAction) -> Result<(), Box<dyn std::error::Error>> {
    let store = super::open_store()?;

    match action {
        StatsAction::Summary => {
            let summary = stats::summary(store.tasks(), store.strategy(), super::today());
            println!("{}", serde_json::to_string_pretty(&summary)?);
        }
        StatsAction::Calendar { year, month } => {
            let now = Local::now();
            let year = year.unwrap_or_else(|| now.year());
            let month = month.unwrap_or_else(|| now.month());

            let activity = stats::monthly_activity(store.tasks(), year, month)
                .ok_or_else(|| format!("invalid month: {year}-{month:02}"))?;
            println!("{}", serde_json::to_string_pretty(&activity)?);
        }
    }
    Ok(())
}
