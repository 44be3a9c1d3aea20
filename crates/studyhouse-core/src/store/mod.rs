//! The authoritative task collection.
//!
//! Every mutation -- add, toggle, remove, pin, move -- flows through
//! [`TaskStore`], which owns the in-memory collection, the persistence
//! handle, and the composed scheduling strategy. The whole collection is
//! serialized back to the key/value store after each mutation and read once
//! at startup; scheduling reads never mutate anything.

use chrono::{NaiveDate, Utc};

use crate::error::{CoreError, Result};
use crate::scheduling::SchedulingStrategy;
use crate::storage::database::{Database, TASKS_KEY};
use crate::task::{Task, TaskSource, ToggleField};

pub struct TaskStore {
    db: Database,
    strategy: Box<dyn SchedulingStrategy>,
    tasks: Vec<Task>,
}

impl TaskStore {
    /// Open the store, loading the persisted collection.
    ///
    /// A missing or corrupt task blob starts the store empty; it is never a
    /// startup error.
    pub fn open(db: Database, strategy: Box<dyn SchedulingStrategy>) -> Self {
        let tasks = match db.kv_get(TASKS_KEY) {
            Ok(Some(raw)) => serde_json::from_str(&raw).unwrap_or_else(|err| {
                tracing::warn!(error = %err, "discarding corrupt task blob");
                Vec::new()
            }),
            Ok(None) => Vec::new(),
            Err(err) => {
                tracing::warn!(error = %err, "failed to read saved tasks");
                Vec::new()
            }
        };
        Self {
            db,
            strategy,
            tasks,
        }
    }

    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn strategy(&self) -> &dyn SchedulingStrategy {
        self.strategy.as_ref()
    }

    pub fn db(&self) -> &Database {
        &self.db
    }

    pub fn get(&self, id: &str) -> Option<&Task> {
        self.tasks.iter().find(|t| t.id == id)
    }

    /// Create a task and prepend it so the newest material surfaces first.
    pub fn add(
        &mut self,
        title: &str,
        source: TaskSource,
        category: Option<String>,
        today: NaiveDate,
    ) -> Result<&Task> {
        let title = title.trim();
        if title.is_empty() {
            return Err(CoreError::EmptyTitle);
        }

        let mut task = Task::new(title, source);
        if let Some(category) = category {
            task = task.with_category(category);
        }
        self.strategy.on_add(&mut task, today);

        self.tasks.insert(0, task);
        self.persist()?;
        Ok(&self.tasks[0])
    }

    /// Flip a boolean field.
    ///
    /// Completing a task stamps `completed_at` and runs the strategy's
    /// completion transition; un-completing only clears the stamp, leaving
    /// the repetition level and review date where they are.
    pub fn toggle(&mut self, id: &str, field: ToggleField, today: NaiveDate) -> Result<&Task> {
        let index = self.index_of(id)?;
        let task = &mut self.tasks[index];
        match field {
            ToggleField::Completed => {
                if task.completed {
                    task.completed = false;
                    task.completed_at = None;
                } else {
                    task.completed = true;
                    task.completed_at = Some(Utc::now());
                    self.strategy.on_complete(task, today);
                }
            }
            ToggleField::Urgent => task.is_urgent = !task.is_urgent,
            ToggleField::Question => task.is_question = !task.is_question,
        }
        self.persist()?;
        Ok(&self.tasks[index])
    }

    /// Hard-delete a task. No tombstoning; it simply disappears from
    /// subsequent distribution and statistics computations.
    pub fn remove(&mut self, id: &str) -> Result<Task> {
        let index = self.index_of(id)?;
        let task = self.tasks.remove(index);
        self.persist()?;
        Ok(task)
    }

    /// Pin a task to a plan day, or clear the pin to fall back to automatic
    /// placement. A day outside the current range is stored as-is and only
    /// takes effect once the range covers it.
    pub fn set_manual_date(&mut self, id: &str, date: Option<NaiveDate>) -> Result<&Task> {
        let index = self.index_of(id)?;
        self.tasks[index].manual_date = date;
        self.persist()?;
        Ok(&self.tasks[index])
    }

    /// Move a task to a new position in the collection, as one atomic
    /// command. Shifts the round-robin placement of everything after it.
    pub fn move_task(&mut self, id: &str, to_index: usize) -> Result<()> {
        let from = self.index_of(id)?;
        let to = to_index.min(self.tasks.len().saturating_sub(1));
        let task = self.tasks.remove(from);
        self.tasks.insert(to, task);
        self.persist()
    }

    /// Prepend an already-built batch of imported tasks, preserving the
    /// batch's internal order ahead of the existing collection.
    pub fn insert_imported(&mut self, batch: Vec<Task>) -> Result<usize> {
        let added = batch.len();
        if added > 0 {
            self.tasks.splice(0..0, batch);
            self.persist()?;
        }
        Ok(added)
    }

    fn index_of(&self, id: &str) -> Result<usize> {
        self.tasks
            .iter()
            .position(|t| t.id == id)
            .ok_or_else(|| CoreError::TaskNotFound(id.to_string()))
    }

    fn persist(&self) -> Result<()> {
        let json = serde_json::to_string(&self.tasks)?;
        self.db.kv_set(TASKS_KEY, &json)?;
        Ok(())
    }
}
