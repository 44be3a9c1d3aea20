//! Task management commands.

use clap::Subcommand;
use studyhouse_core::{TaskSource, ToggleField};

#[derive(Subcommand)]
pub enum TaskAction {
    /// Capture a new material
    Add {
        /// Material title
        title: String,
        /// Optional category
        #[arg(long)]
        category: Option<String>,
    },
    /// List all materials, newest first
    List,
    /// Flip a boolean field on a task
    Toggle {
        /// Task ID
        id: String,
        /// Field to flip: completed, urgent, or question
        #[arg(long, default_value = "completed")]
        field: String,
    },
    /// Delete a task
    Remove {
        /// Task ID
        id: String,
    },
    /// Move a task to a new position in the collection
    Move {
        /// Task ID
        id: String,
        /// Target position (0 = first)
        index: usize,
    },
    /// Pin a task to a plan day
    Pin {
        /// Task ID
        id: String,
        /// Day in YYYY-MM-DD form
        date: String,
    },
    /// Clear a task's pinned day, reverting to automatic placement
    Unpin {
        /// Task ID
        id: String,
    },
}

pub fn run(action: TaskAction) -> Result<(), Box<dyn std::error::Error>> {
    let mut store = super::open_store()?;
    let today = super::today();

    match action {
        TaskAction::Add { title, category } => {
            let task = store.add(&title, TaskSource::Manual, category, today)?;
            println!("Task created: {}", task.id);
            println!("{}", serde_json::to_string_pretty(task)?);
        }
        TaskAction::List => {
            println!("{}", serde_json::to_string_pretty(store.tasks())?);
        }
        TaskAction::Toggle { id, field } => {
            let field = match field.as_str() {
                "completed" => ToggleField::Completed,
                "urgent" => ToggleField::Urgent,
                "question" => ToggleField::Question,
                other => return Err(format!("unknown field: {other}").into()),
            };
            let task = store.toggle(&id, field, today)?;
            println!("{}", serde_json::to_string_pretty(task)?);
        }
        TaskAction::Remove { id } => {
            let task = store.remove(&id)?;
            println!("Removed: {}", task.title);
        }
        TaskAction::Move { id, index } => {
            store.move_task(&id, index)?;
            println!("{}", serde_json::to_string_pretty(store.tasks())?);
        }
        TaskAction::Pin { id, date } => {
            let day = super::parse_day(&date)?;
            let task = store.set_manual_date(&id, Some(day))?;
            println!("{}", serde_json::to_string_pretty(task)?);
        }
        TaskAction::Unpin { id } => {
            let task = store.set_manual_date(&id, None)?;
            println!("{}", serde_json::to_string_pretty(task)?);
        }
    }
    Ok(())
}
