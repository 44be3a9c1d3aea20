//! Spaced-repetition scheduling.
//!
//! Each completion pushes a task's next review further out according to a
//! fixed interval table indexed by mastery level. The table saturates: any
//! level at or beyond the last entry reuses the 90-day interval.

use chrono::{Days, NaiveDate};

use super::SchedulingStrategy;
use crate::task::Task;

/// Review intervals in days, indexed by mastery level.
pub const REVIEW_INTERVALS: [u64; 7] = [0, 1, 3, 7, 14, 30, 90];

/// Interval for a mastery level, saturating at the last table entry.
pub fn interval_days(level: u32) -> u64 {
    REVIEW_INTERVALS[(level as usize).min(REVIEW_INTERVALS.len() - 1)]
}

/// Day a task at `level` becomes due again, counted from `today`.
pub fn next_review_date(level: u32, today: NaiveDate) -> NaiveDate {
    today
        .checked_add_days(Days::new(interval_days(level)))
        .unwrap_or(NaiveDate::MAX)
}

/// The spaced-repetition strategy.
#[derive(Debug, Clone, Copy, Default)]
pub struct ReviewScheduler;

impl ReviewScheduler {
    pub fn new() -> Self {
        Self
    }

    /// A task is due iff it is not completed and its review day has arrived
    /// or was never set. Brand-new tasks are due immediately.
    pub fn is_due(&self, task: &Task, today: NaiveDate) -> bool {
        !task.completed && task.next_review_at.map_or(true, |day| day <= today)
    }
}

impl SchedulingStrategy for ReviewScheduler {
    fn on_add(&self, task: &mut Task, today: NaiveDate) {
        task.next_review_at = Some(today);
    }

    fn on_complete(&self, task: &mut Task, today: NaiveDate) {
        task.repetition_level += 1;
        task.next_review_at = Some(next_review_date(task.repetition_level, today));
    }

    fn due_today<'a>(&self, tasks: &'a [Task], today: NaiveDate) -> Vec<&'a Task> {
        tasks.iter().filter(|t| self.is_due(t, today)).collect()
    }

    /// Mixes tasks still outstanding with tasks already done today so the
    /// percentage stays meaningful mid-day.
    fn daily_counts(&self, tasks: &[Task], today: NaiveDate) -> (usize, usize) {
        let due = tasks.iter().filter(|t| self.is_due(t, today)).count();
        let completed_today = tasks.iter().filter(|t| t.completed_on(today)).count();
        (completed_today, due + completed_today)
    }

    fn dedup_imports(&self) -> bool {
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::task::TaskSource;

    fn day(s: &str) -> NaiveDate {
        s.parse().unwrap()
    }

    #[test]
    fn interval_lookup_saturates() {
        assert_eq!(interval_days(0), 0);
        assert_eq!(interval_days(1), 1);
        assert_eq!(interval_days(5), 30);
        assert_eq!(interval_days(6), 90);
        assert_eq!(interval_days(50), 90);
    }

    #[test]
    fn next_review_offsets() {
        let today = day("2026-03-01");
        assert_eq!(next_review_date(0, today), day("2026-03-01"));
        assert_eq!(next_review_date(1, today), day("2026-03-02"));
        assert_eq!(next_review_date(2, today), day("2026-03-04"));
        assert_eq!(next_review_date(6, today), day("2026-05-30"));
        assert_eq!(next_review_date(50, today), next_review_date(6, today));
    }

    #[test]
    fn due_rules() {
        let scheduler = ReviewScheduler::new();
        let today = day("2026-03-10");

        let mut task = Task::new("Calculus", TaskSource::Manual);
        assert!(scheduler.is_due(&task, today), "no review date means due now");

        task.next_review_at = Some(day("2026-03-11"));
        assert!(!scheduler.is_due(&task, today), "tomorrow is not due yet");

        task.next_review_at = Some(day("2026-03-09"));
        assert!(scheduler.is_due(&task, today), "yesterday is overdue");

        task.completed = true;
        assert!(!scheduler.is_due(&task, today), "completed tasks are never due");
    }

    #[test]
    fn completion_advances_level_and_review_date() {
        let scheduler = ReviewScheduler::new();
        let today = day("2026-03-10");

        let mut task = Task::new("Calculus", TaskSource::Manual);
        scheduler.on_add(&mut task, today);
        assert_eq!(task.next_review_at, Some(today));

        scheduler.on_complete(&mut task, today);
        assert_eq!(task.repetition_level, 1);
        assert_eq!(task.next_review_at, Some(day("2026-03-11")));

        scheduler.on_complete(&mut task, day("2026-03-11"));
        assert_eq!(task.repetition_level, 2);
        assert_eq!(task.next_review_at, Some(day("2026-03-14")));
    }

    #[test]
    fn daily_counts_empty_collection() {
        let scheduler = ReviewScheduler::new();
        assert_eq!(scheduler.daily_counts(&[], day("2026-03-10")), (0, 0));
    }
}
