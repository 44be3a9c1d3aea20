//! Today's study queue.

use clap::Subcommand;
use studyhouse_core::{SchedulingStrategy, ToggleField};

#[derive(Subcommand)]
pub enum StudyAction {
    /// Show the tasks due today under the active strategy
    Due,
    /// Mark a due task as mastered
    Complete {
        /// Task ID
        id: String,
    },
}

pub fn run(action: StudyAction) -> Result<(), Box<dyn std::error::Error>> {
    let mut store = super::open_store()?;
    let today = super::today();

    match action {
        StudyAction::Due => {
            let due = store.strategy().due_today(store.tasks(), today);
            println!("{}", serde_json::to_string_pretty(&due)?);
        }
        StudyAction::Complete { id } => {
            if store.get(&id).is_some_and(|t| t.completed) {
                return Err(format!("task {id} is already completed").into());
            }
            let task = store.toggle(&id, ToggleField::Completed, today)?;
            println!("{}", serde_json::to_string_pretty(task)?);
        }
    }
    Ok(())
}
