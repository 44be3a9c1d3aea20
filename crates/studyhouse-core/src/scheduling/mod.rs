//! Scheduling strategies.
//!
//! Two philosophies decide which tasks are due on a given day: spaced
//! repetition ([`ReviewScheduler`]) reschedules a mastered task further into
//! the future each time it is completed, while plan distribution
//! ([`PlanDistributor`]) spreads the whole collection across a user-chosen
//! date range. Both sit behind [`SchedulingStrategy`], selected once at
//! composition time -- nothing else in the crate branches on the variant.

pub mod plan;
pub mod review;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::task::Task;

pub use plan::{PlanDistribution, PlanDistributor, StudyPlanConfig, MAX_PLAN_DAYS};
pub use review::{ReviewScheduler, REVIEW_INTERVALS};

/// A scheduling philosophy, chosen at composition time.
///
/// Strategies are stateless views over the task collection: every call
/// recomputes from the tasks and the supplied day, so there is no cached
/// scheduling state to invalidate.
pub trait SchedulingStrategy {
    /// Initialize scheduling fields on a freshly created task.
    fn on_add(&self, task: &mut Task, today: NaiveDate);

    /// Apply the completion-transition rules after a false-to-true toggle.
    ///
    /// Un-completion does not go through here: rolling a task back only
    /// clears its completion stamp, never its scheduling progress.
    fn on_complete(&self, task: &mut Task, today: NaiveDate);

    /// Tasks the user should work on today, in collection order.
    fn due_today<'a>(&self, tasks: &'a [Task], today: NaiveDate) -> Vec<&'a Task>;

    /// `(done, total)` counts backing the daily-progress percentage.
    fn daily_counts(&self, tasks: &[Task], today: NaiveDate) -> (usize, usize);

    /// Whether imports drop records whose normalized title already exists.
    fn dedup_imports(&self) -> bool;
}

/// Which strategy the application composes at startup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Philosophy {
    /// Spaced repetition: completing a task pushes its next review out.
    Review,
    /// Fixed-interval distribution across a date range.
    Plan,
}

impl Default for Philosophy {
    fn default() -> Self {
        Philosophy::Review
    }
}

/// Build the strategy for a philosophy.
///
/// The plan strategy needs the active date range; the review strategy
/// ignores it.
pub fn strategy_for(philosophy: Philosophy, plan: StudyPlanConfig) -> Box<dyn SchedulingStrategy> {
    match philosophy {
        Philosophy::Review => Box::new(ReviewScheduler::new()),
        Philosophy::Plan => Box::new(PlanDistributor::new(plan)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn philosophy_serde_names() {
        assert_eq!(serde_json::to_string(&Philosophy::Review).unwrap(), "\"review\"");
        assert_eq!(serde_json::to_string(&Philosophy::Plan).unwrap(), "\"plan\"");
    }

    #[test]
    fn strategies_disagree_on_dedup() {
        let review = strategy_for(Philosophy::Review, StudyPlanConfig::default());
        let plan = strategy_for(Philosophy::Plan, StudyPlanConfig::default());
        assert!(review.dedup_imports());
        assert!(!plan.dedup_imports());
    }
}
