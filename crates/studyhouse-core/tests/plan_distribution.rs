//! Distribution totality and pin-precedence properties.

use chrono::NaiveDate;
use proptest::prelude::*;
use studyhouse_core::scheduling::plan::{days_in_range, distribute, MAX_PLAN_DAYS};
use studyhouse_core::{StudyPlanConfig, Task, TaskSource};

fn day(s: &str) -> NaiveDate {
    s.parse().unwrap()
}

fn material(i: usize) -> Task {
    Task::new(format!("Material {i}"), TaskSource::Manual)
}

#[test]
fn ten_year_range_truncates_to_the_cap() {
    let config = StudyPlanConfig::new(day("2020-01-01"), day("2030-01-01"));
    assert_eq!(days_in_range(&config).len(), MAX_PLAN_DAYS);
}

#[test]
fn removing_a_pin_reverts_to_the_round_robin_slot() {
    let mut tasks: Vec<Task> = (0..6).map(material).collect();
    let days = days_in_range(&StudyPlanConfig::new(day("2026-03-01"), day("2026-03-03")));

    // Index 4 round-robins onto days[1]; pin it to days[2] instead.
    tasks[4].manual_date = Some(days[2]);
    let pinned = distribute(&tasks, &days);
    assert!(pinned.tasks_for(days[2]).iter().any(|t| t.id == tasks[4].id));

    tasks[4].manual_date = None;
    let reverted = distribute(&tasks, &days);
    assert!(reverted.tasks_for(days[1]).iter().any(|t| t.id == tasks[4].id));
}

proptest! {
    /// Every task appears in exactly one bucket and nothing is lost or
    /// duplicated, for any collection size, range length, and pin pattern.
    #[test]
    fn distribution_is_total(
        task_count in 0usize..60,
        range_len in 1u64..40,
        pin_offsets in proptest::collection::vec(proptest::option::of(0i64..80), 0..60),
    ) {
        let start = day("2026-01-01");
        let end = start + chrono::Days::new(range_len - 1);
        let days = days_in_range(&StudyPlanConfig::new(start, end));

        let mut tasks: Vec<Task> = (0..task_count).map(material).collect();
        for (task, offset) in tasks.iter_mut().zip(pin_offsets) {
            // Some pins land inside the range, some outside it.
            if let Some(offset) = offset {
                task.manual_date = start.checked_add_days(chrono::Days::new(offset as u64));
            }
        }

        let distribution = distribute(&tasks, &days);

        let mut seen: Vec<&str> = Vec::new();
        for d in distribution.days() {
            for t in distribution.tasks_for(*d) {
                seen.push(t.id.as_str());
            }
        }
        prop_assert_eq!(seen.len(), tasks.len());

        seen.sort_unstable();
        seen.dedup();
        prop_assert_eq!(seen.len(), tasks.len(), "no task may appear twice");
    }

    /// A pin inside the range always wins, regardless of collection index.
    #[test]
    fn pins_inside_the_range_take_precedence(
        task_count in 1usize..40,
        pinned_index in 0usize..40,
        range_len in 2u64..30,
    ) {
        let pinned_index = pinned_index % task_count;
        let start = day("2026-01-01");
        let end = start + chrono::Days::new(range_len - 1);
        let days = days_in_range(&StudyPlanConfig::new(start, end));
        let pin_day = days[days.len() - 1];

        let mut tasks: Vec<Task> = (0..task_count).map(material).collect();
        tasks[pinned_index].manual_date = Some(pin_day);

        let distribution = distribute(&tasks, &days);
        let landed = distribution
            .tasks_for(pin_day)
            .iter()
            .any(|t| t.id == tasks[pinned_index].id);
        prop_assert!(landed);
    }
}
