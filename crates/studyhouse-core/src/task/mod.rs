//! Task model shared by both scheduling strategies.
//!
//! A task is a study material captured manually, extracted from an uploaded
//! document, or imported from a cloud-folder crawl. The spaced-repetition
//! fields (`repetition_level`, `next_review_at`) and the plan pin
//! (`manual_date`) coexist on the same record; which ones are interpreted
//! depends on the active [`SchedulingStrategy`](crate::SchedulingStrategy).
//!
//! Serialized field names are camelCase to stay compatible with previously
//! persisted task blobs.

use chrono::{DateTime, Local, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Where a task came from. Set at creation, immutable afterwards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TaskSource {
    /// Typed in by the user.
    #[serde(rename = "manual")]
    Manual,
    /// Extracted from an uploaded document by the AI collaborator.
    #[serde(rename = "ai")]
    AiImported,
    /// Imported from the cloud-folder crawl.
    #[serde(rename = "drive")]
    CloudImported,
}

/// Boolean fields a toggle operation may flip.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToggleField {
    /// Completion state; drives the completion-transition rules.
    Completed,
    /// Informational urgency flag, no scheduling effect.
    Urgent,
    /// Informational "open question" flag, no scheduling effect.
    Question,
}

/// A study material tracked by the store.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    /// Unique identifier, assigned at creation.
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub completed: bool,
    /// Present iff `completed` is true as of the last toggle.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub completed_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub is_urgent: bool,
    #[serde(default)]
    pub is_question: bool,
    pub source: TaskSource,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    pub created_at: DateTime<Utc>,
    /// Times the task has been mastered. Only ever increases.
    #[serde(default)]
    pub repetition_level: u32,
    /// Earliest calendar day the task becomes due again; `None` means due
    /// immediately.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub next_review_at: Option<NaiveDate>,
    /// User-pinned plan day, overriding automatic placement while it falls
    /// inside the active range.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub manual_date: Option<NaiveDate>,
}

impl Task {
    /// Create a task with a fresh id, stamped now, at repetition level 0.
    ///
    /// Scheduling fields are left unset; the active strategy initializes
    /// them via `on_add`.
    pub fn new(title: impl Into<String>, source: TaskSource) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            title: title.into(),
            completed: false,
            completed_at: None,
            is_urgent: false,
            is_question: false,
            source,
            category: None,
            created_at: Utc::now(),
            repetition_level: 0,
            next_review_at: None,
            manual_date: None,
        }
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    /// Whether the task was completed on the given local calendar day.
    pub fn completed_on(&self, day: NaiveDate) -> bool {
        self.completed_at
            .map(|at| at.with_timezone(&Local).date_naive() == day)
            .unwrap_or(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn task_serialization_round_trip() {
        let task = Task::new("Physics 101", TaskSource::Manual).with_category("Core");
        let json = serde_json::to_string(&task).unwrap();
        let decoded: Task = serde_json::from_str(&json).unwrap();
        assert_eq!(decoded.id, task.id);
        assert_eq!(decoded.title, "Physics 101");
        assert_eq!(decoded.category.as_deref(), Some("Core"));
        assert_eq!(decoded.repetition_level, 0);
        assert!(!decoded.completed);
    }

    #[test]
    fn source_uses_wire_names() {
        let json = serde_json::to_string(&TaskSource::CloudImported).unwrap();
        assert_eq!(json, "\"drive\"");
        let json = serde_json::to_string(&TaskSource::AiImported).unwrap();
        assert_eq!(json, "\"ai\"");
    }

    #[test]
    fn unset_optionals_are_omitted() {
        let task = Task::new("Linear Algebra", TaskSource::Manual);
        let json = serde_json::to_string(&task).unwrap();
        assert!(!json.contains("completedAt"));
        assert!(!json.contains("manualDate"));
        assert!(!json.contains("nextReviewAt"));
    }

    #[test]
    fn completed_on_matches_local_day() {
        let mut task = Task::new("Thermodynamics", TaskSource::Manual);
        assert!(!task.completed_on(Local::now().date_naive()));

        task.completed = true;
        task.completed_at = Some(Utc::now());
        let today = Local::now().date_naive();
        assert!(task.completed_on(today));
        assert!(!task.completed_on(today.succ_opt().unwrap()));
    }
}
