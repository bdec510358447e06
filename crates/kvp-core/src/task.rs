use crate::error::{KvpError, Result};
use crate::types::{Priority, TaskStatus};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One implementation step of the Do phase.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Task {
    pub description: String,
    pub responsible: String,
    pub due_date: NaiveDate,
    pub status: TaskStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub priority: Option<Priority>,
}

impl Task {
    pub fn new(
        description: impl Into<String>,
        responsible: impl Into<String>,
        due_date: NaiveDate,
    ) -> Self {
        Self {
            description: description.into(),
            responsible: responsible.into(),
            due_date,
            status: TaskStatus::Open,
            priority: None,
        }
    }

    pub fn with_priority(mut self, priority: Priority) -> Self {
        self.priority = Some(priority);
        self
    }
}

// ---------------------------------------------------------------------------
// Task list operations (operate on a mutable Vec<Task>)
// ---------------------------------------------------------------------------

/// Append a task and return its 0-based index.
pub fn add_task(tasks: &mut Vec<Task>, task: Task) -> usize {
    tasks.push(task);
    tasks.len() - 1
}

/// Set a task's status. Transitions are unrestricted: any status may be
/// replaced by any other.
pub fn set_status(tasks: &mut [Task], index: usize, status: TaskStatus) -> Result<()> {
    let task = find_mut(tasks, index)?;
    task.status = status;
    Ok(())
}

pub fn remove_task(tasks: &mut Vec<Task>, index: usize) -> Result<Task> {
    if index >= tasks.len() {
        return Err(KvpError::TaskNotFound(index));
    }
    Ok(tasks.remove(index))
}

fn find_mut(tasks: &mut [Task], index: usize) -> Result<&mut Task> {
    tasks.get_mut(index).ok_or(KvpError::TaskNotFound(index))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
