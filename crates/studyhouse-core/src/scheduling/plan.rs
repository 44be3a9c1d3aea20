//! Fixed-interval plan distribution.
//!
//! Given a closed date range, every task is assigned to exactly one day:
//! pinned tasks land on their pinned day while it is inside the range,
//! everything else falls back to positional round-robin over the range.
//! Placement is a pure function of (tasks, range) recomputed on every read.

use std::collections::HashMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::SchedulingStrategy;
use crate::task::Task;

/// Upper bound on the walked range, guarding against reversed or absurd
/// inputs. Hitting the cap truncates silently; it is not a user-facing error.
pub const MAX_PLAN_DAYS: usize = 366;

/// The user-chosen date range materials are distributed across.
///
/// `None` bounds mean the range is not configured yet and no plan exists.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StudyPlanConfig {
    #[serde(default)]
    pub start_date: Option<NaiveDate>,
    #[serde(default)]
    pub target_end_date: Option<NaiveDate>,
}

impl StudyPlanConfig {
    pub fn new(start_date: NaiveDate, target_end_date: NaiveDate) -> Self {
        Self {
            start_date: Some(start_date),
            target_end_date: Some(target_end_date),
        }
    }

    pub fn is_configured(&self) -> bool {
        self.start_date.is_some() && self.target_end_date.is_some()
    }
}

/// Ordered days of the configured range, inclusive on both ends.
///
/// Empty when either bound is missing or the range is reversed; truncated at
/// [`MAX_PLAN_DAYS`].
pub fn days_in_range(config: &StudyPlanConfig) -> Vec<NaiveDate> {
    let (Some(start), Some(end)) = (config.start_date, config.target_end_date) else {
        return Vec::new();
    };

    let mut days = Vec::new();
    let mut day = start;
    while day <= end && days.len() < MAX_PLAN_DAYS {
        days.push(day);
        match day.succ_opt() {
            Some(next) => day = next,
            None => break,
        }
    }
    days
}

/// The computed assignment of tasks to days.
#[derive(Debug)]
pub struct PlanDistribution<'a> {
    days: Vec<NaiveDate>,
    buckets: HashMap<NaiveDate, Vec<&'a Task>>,
}

impl<'a> PlanDistribution<'a> {
    /// The ordered day sequence the distribution was computed over.
    pub fn days(&self) -> &[NaiveDate] {
        &self.days
    }

    /// Tasks assigned to `day`, in collection order.
    pub fn tasks_for(&self, day: NaiveDate) -> &[&'a Task] {
        self.buckets.get(&day).map(Vec::as_slice).unwrap_or(&[])
    }

    /// True when no range is configured ("no plan yet").
    pub fn is_empty(&self) -> bool {
        self.days.is_empty()
    }
}

/// Assign every task to exactly one day of `days`.
///
/// A pin that is a member of `days` wins; otherwise the task's index in the
/// collection modulo the day count selects the slot, so inserting or
/// reordering tasks shifts later automatic placements.
pub fn distribute<'a>(tasks: &'a [Task], days: &[NaiveDate]) -> PlanDistribution<'a> {
    let mut buckets: HashMap<NaiveDate, Vec<&Task>> = HashMap::new();
    if !days.is_empty() {
        for (index, task) in tasks.iter().enumerate() {
            let day = match task.manual_date {
                Some(pinned) if days.contains(&pinned) => pinned,
                _ => days[index % days.len()],
            };
            buckets.entry(day).or_default().push(task);
        }
    }
    PlanDistribution {
        days: days.to_vec(),
        buckets,
    }
}

/// The fixed-interval distribution strategy.
#[derive(Debug, Clone, Default)]
pub struct PlanDistributor {
    config: StudyPlanConfig,
}

impl PlanDistributor {
    pub fn new(config: StudyPlanConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &StudyPlanConfig {
        &self.config
    }

    pub fn days(&self) -> Vec<NaiveDate> {
        days_in_range(&self.config)
    }

    /// Recompute the full assignment for the current range.
    pub fn distribution<'a>(&self, tasks: &'a [Task]) -> PlanDistribution<'a> {
        distribute(tasks, &self.days())
    }
}

impl SchedulingStrategy for PlanDistributor {
    /// New materials land on the last day of the configured range, if any.
    fn on_add(&self, task: &mut Task, _today: NaiveDate) {
        task.manual_date = self.days().last().copied();
    }

    /// Completion has no level or date effect under plan distribution.
    fn on_complete(&self, _task: &mut Task, _today: NaiveDate) {}

    fn due_today<'a>(&self, tasks: &'a [Task], today: NaiveDate) -> Vec<&'a Task> {
        self.distribution(tasks)
            .tasks_for(today)
            .iter()
            .copied()
            .filter(|t| !t.completed)
            .collect()
    }

    fn daily_counts(&self, tasks: &[Task], today: NaiveDate) -> (usize, usize) {
        let distribution = self.distribution(tasks);
        let placed = distribution.tasks_for(today);
        let done = placed.iter().filter(|t| t.completed).count();
        (done, placed.len())
    }

    fn dedup_imports(&self) -> bool {
        false
    }
}
