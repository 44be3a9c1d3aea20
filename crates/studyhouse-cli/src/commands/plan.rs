//! Study-plan range and distribution commands.

use clap::Subcommand;
use serde_json::json;
use studyhouse_core::scheduling::plan::days_in_range;
use studyhouse_core::{Database, PlanDistributor, StudyPlanConfig};

#[derive(Subcommand)]
pub enum PlanAction {
    /// Set the plan date range (inclusive on both ends)
    SetRange {
        /// Start day in YYYY-MM-DD form
        start: String,
        /// End day in YYYY-MM-DD form
        end: String,
    },
    /// Show the distribution of materials across the configured range
    Show,
    /// Clear the plan range
    Clear,
}

pub fn run(action: PlanAction) -> Result<(), Box<dyn std::error::Error>> {
    match action {
        PlanAction::SetRange { start, end } => {
            let config = StudyPlanConfig::new(super::parse_day(&start)?, super::parse_day(&end)?);
            let db = Database::open()?;
            db.save_plan_config(&config)?;
            println!("{} day(s) in plan", days_in_range(&config).len());
        }
        PlanAction::Show => {
            let store = super::open_store()?;
            let plan = store.db().load_plan_config();
            let distributor = PlanDistributor::new(plan);
            let distribution = distributor.distribution(store.tasks());

            if distribution.is_empty() {
                println!("No plan yet: set a start and end date first.");
                return Ok(());
            }

            let days: Vec<serde_json::Value> = distribution
                .days()
                .iter()
                .map(|day| {
                    json!({
                        "date": day,
                        "tasks": distribution.tasks_for(*day),
                    })
                })
                .collect();
            println!("{}", serde_json::to_string_pretty(&days)?);
        }
        PlanAction::Clear => {
            let db = Database::open()?;
            db.save_plan_config(&StudyPlanConfig::default())?;
            println!("Plan range cleared.");
        }
    }
    Ok(())
}
