use crate::task::Task;
use crate::types::TaskStatus;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// TaskSummary
// ---------------------------------------------------------------------------

/// Task counts derived from an implementation-step list.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskSummary {
    pub total: usize,
    pub completed: usize,
    pub in_progress: usize,
    pub overdue: usize,
}

/// Count tasks by status and overdue state as of `today`.
///
/// The reference date is injected by the caller; this function never reads
/// a clock. A task is overdue when it is not done and its due date is
/// strictly before `today`; a task due exactly today is not overdue.
pub fn aggregate(tasks: &[Task], today: NaiveDate) -> TaskSummary {
    TaskSummary {
        total: tasks.len(),
        completed: tasks
            .iter()
            .filter(|t| t.status == TaskStatus::Done)
            .count(),
        in_progress: tasks
            .iter()
            .filter(|t| t.status == TaskStatus::InProgress)
            .count(),
        overdue: tasks
            .iter()
            .filter(|t| t.status != TaskStatus::Done && t.due_date < today)
            .count(),
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn day(s: &str) -> NaiveDate {
        s.parse().unwrap()
    }

    fn task(status: TaskStatus, due: &str) -> Task {
        let mut t = Task::new("t", "r", day(due));
        t.status = status;
        t
    }

    #[test]
    fn empty_list_is_all_zero() {
        assert_eq!(aggregate(&[], day("2024-07-15")), TaskSummary::default());
    }

    #[test]
    fn counts_by_status_and_overdue() {
        let tasks = vec![
            task(TaskStatus::Done, "2024-07-01"),
            task(TaskStatus::Open, "2020-01-01"),
            task(TaskStatus::InProgress, "2099-01-01"),
        ];
        let summary = aggregate(&tasks, day("2024-07-15"));
        assert_eq!(
            summary,
            TaskSummary {
                total: 3,
                completed: 1,
                in_progress: 1,
                overdue: 1,
            }
        );
    }

    #[test]
    fn done_tasks_are_never_overdue() {
        let tasks = vec![task(TaskStatus::Done, "1999-01-01")];
        assert_eq!(aggregate(&tasks, day("2024-07-15")).overdue, 0);
    }

    #[test]
    fn due_today_is_not_overdue() {
        let tasks = vec![task(TaskStatus::Open, "2024-07-15")];
        assert_eq!(aggregate(&tasks, day("2024-07-15")).overdue, 0);
        // One day earlier and it counts.
        let tasks = vec![task(TaskStatus::Open, "2024-07-14")];
        assert_eq!(aggregate(&tasks, day("2024-07-15")).overdue, 1);
    }

    #[test]
    fn in_progress_past_due_counts_as_overdue() {
        let tasks = vec![task(TaskStatus::InProgress, "2024-07-01")];
        let summary = aggregate(&tasks, day("2024-07-15"));
        assert_eq!(summary.in_progress, 1);
        assert_eq!(summary.overdue, 1);
    }

    #[test]
    fn sample_project_summary_at_reference_date() {
        let project = crate::project::Project::sample();
        let summary = aggregate(
            &project.do_phase.implementation_steps,
            day("2024-07-22"),
        );
        assert_eq!(summary.total, 3);
        assert_eq!(summary.completed, 1);
        assert_eq!(summary.in_progress, 1);
        // The in-progress step from 2024-07-20 is past due; the open step
        // from 2024-07-30 is not yet.
        assert_eq!(summary.overdue, 1);
    }
}
