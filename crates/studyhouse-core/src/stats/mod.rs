//! Progress statistics derived from the task collection.
//!
//! All numbers are recomputed from scratch on every read -- there is no
//! cached state. The daily denominator is strategy-specific and comes from
//! [`SchedulingStrategy::daily_counts`].

use std::collections::HashMap;

use chrono::{Datelike, Local, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::scheduling::SchedulingStrategy;
use crate::task::Task;

/// Headline progress numbers.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Summary {
    pub total: usize,
    pub completed: usize,
    /// Completed share of the whole collection, rounded. 0 when empty.
    pub total_percentage: u32,
    /// Today's progress under the active strategy, rounded. 0 when the
    /// denominator is empty.
    pub daily_percentage: u32,
    pub due_today: usize,
}

/// Compute the headline numbers for a collection under a strategy.
pub fn summary(tasks: &[Task], strategy: &dyn SchedulingStrategy, today: NaiveDate) -> Summary {
    let total = tasks.len();
    let completed = tasks.iter().filter(|t| t.completed).count();
    let (daily_done, daily_total) = strategy.daily_counts(tasks, today);

    Summary {
        total,
        completed,
        total_percentage: percentage(completed, total),
        daily_percentage: percentage(daily_done, daily_total),
        due_today: strategy.due_today(tasks, today).len(),
    }
}

fn percentage(part: usize, whole: usize) -> u32 {
    if whole == 0 {
        0
    } else {
        ((part as f64 / whole as f64) * 100.0).round() as u32
    }
}

/// Completions bucketed by the local calendar day of `completed_at`.
pub fn completion_histogram(tasks: &[Task]) -> HashMap<NaiveDate, u32> {
    let mut buckets = HashMap::new();
    for task in tasks {
        if !task.completed {
            continue;
        }
        if let Some(at) = task.completed_at {
            let day = at.with_timezone(&Local).date_naive();
            *buckets.entry(day).or_insert(0) += 1;
        }
    }
    buckets
}

/// Coloring level for a calendar cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Intensity {
    None,
    Light,
    Medium,
    Heavy,
}

impl Intensity {
    pub fn from_count(count: u32) -> Self {
        match count {
            0 => Intensity::None,
            1 => Intensity::Light,
            2 => Intensity::Medium,
            _ => Intensity::Heavy,
        }
    }
}

/// One calendar cell of the monthly activity view.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DayActivity {
    pub date: NaiveDate,
    pub count: u32,
    pub intensity: Intensity,
}

/// Per-day completion activity for one calendar month.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MonthlyActivity {
    pub year: i32,
    pub month: u32,
    pub days: Vec<DayActivity>,
    /// All-time completed count, shown under the calendar.
    pub total_completed: usize,
}

/// Build the activity calendar for a month. `None` if the month is invalid.
pub fn monthly_activity(tasks: &[Task], year: i32, month: u32) -> Option<MonthlyActivity> {
    let first = NaiveDate::from_ymd_opt(year, month, 1)?;
    let histogram = completion_histogram(tasks);

    let mut days = Vec::new();
    let mut day = first;
    while day.month() == month && day.year() == year {
        let count = histogram.get(&day).copied().unwrap_or(0);
        days.push(DayActivity {
            date: day,
            count,
            intensity: Intensity::from_count(count),
        });
        match day.succ_opt() {
            Some(next) => day = next,
            None => break,
        }
    }

    Some(MonthlyActivity {
        year,
        month,
        days,
        total_completed: tasks.iter().filter(|t| t.completed).count(),
    })
}
