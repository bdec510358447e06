use crate::cmd::{require_delete, require_edit};
use crate::output::{print_json, print_table};
use anyhow::Context;
use chrono::{NaiveDate, Utc};
use clap::Subcommand;
use kvp_core::error::KvpError;
use kvp_core::store::ProjectStore;
use kvp_core::task::{self, Task};
use kvp_core::summary;
use kvp_core::types::{Priority, TaskStatus};
use std::path::Path;

#[derive(Subcommand)]
pub enum TaskSubcommand {
    /// Add an implementation step to the active project
    Add {
        #[arg(required = true)]
        description: Vec<String>,
        /// Responsible party
        #[arg(long, default_value = "")]
        responsible: String,
        /// Due date, YYYY-MM-DD (default: today)
        #[arg(long)]
        due: Option<String>,
        /// Priority: low, medium, or high
        #[arg(long)]
        priority: Option<String>,
    },
    /// Set a task's status: open, in_progress, or done
    Status { number: usize, status: String },
    /// Remove a task
    Remove { number: usize },
    /// List tasks with a summary line
    List,
}

pub fn run(file: &Path, subcmd: TaskSubcommand, json: bool) -> anyhow::Result<()> {
    match subcmd {
        TaskSubcommand::Add {
            description,
            responsible,
            due,
            priority,
        } => add(
            file,
            &description.join(" "),
            &responsible,
            due.as_deref(),
            priority.as_deref(),
            json,
        ),
        TaskSubcommand::Status { number, status } => self::status(file, number, &status, json),
        TaskSubcommand::Remove { number } => remove(file, number, json),
        TaskSubcommand::List => list(file, json),
    }
}

/// Date text is validated here, at the input boundary. The aggregator and
/// the model only ever see parsed calendar dates.
fn parse_due(s: &str) -> Result<NaiveDate, KvpError> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").map_err(|_| KvpError::InvalidDate(s.to_string()))
}

fn add(
    file: &Path,
    description: &str,
    responsible: &str,
    due: Option<&str>,
    priority: Option<&str>,
    json: bool,
) -> anyhow::Result<()> {
    let due_date = match due {
        Some(s) => parse_due(s)?,
        None => Utc::now().date_naive(),
    };
    let priority: Option<Priority> = priority.map(str::parse).transpose()?;

    let mut store = ProjectStore::load(file)?;
    require_edit(&store)?;

    let mut new_task = Task::new(description, responsible, due_date);
    new_task.priority = priority;
    let steps = &mut store.active_mut()?.do_phase.implementation_steps;
    let index = task::add_task(steps, new_task);
    store.save(file)?;

    if json {
        print_json(&serde_json::json!({
            "number": index + 1,
            "description": description,
            "due_date": due_date,
        }))?;
    } else {
        println!("Added task #{}: {description}", index + 1);
    }
    Ok(())
}

fn status(file: &Path, number: usize, status: &str, json: bool) -> anyhow::Result<()> {
    let status: TaskStatus = status.parse()?;
    let index = number.checked_sub(1).context("task numbers start at 1")?;

    let mut store = ProjectStore::load(file)?;
    require_edit(&store)?;

    let steps = &mut store.active_mut()?.do_phase.implementation_steps;
    task::set_status(steps, index, status).with_context(|| format!("task #{number}"))?;
    store.save(file)?;

    if json {
        print_json(&serde_json::json!({ "number": number, "status": status }))?;
    } else {
        println!("Task #{number} set to {status}");
    }
    Ok(())
}

fn remove(file: &Path, number: usize, json: bool) -> anyhow::Result<()> {
    let index = number.checked_sub(1).context("task numbers start at 1")?;

    let mut store = ProjectStore::load(file)?;
    require_delete(&store)?;

    let steps = &mut store.active_mut()?.do_phase.implementation_steps;
    let removed = task::remove_task(steps, index).with_context(|| format!("task #{number}"))?;
    store.save(file)?;

    if json {
        print_json(&serde_json::json!({
            "number": number,
            "description": removed.description,
        }))?;
    } else {
        println!("Removed task #{number}: {}", removed.description);
    }
    Ok(())
}

fn list(file: &Path, json: bool) -> anyhow::Result<()> {
    let store = ProjectStore::load(file)?;
    let steps = &store.active()?.do_phase.implementation_steps;

    if json {
        return print_json(steps);
    }

    if steps.is_empty() {
        println!("No tasks yet.");
        return Ok(());
    }

    let counts = summary::aggregate(steps, Utc::now().date_naive());
    println!(
        "{}/{} completed, {} in progress, {} overdue",
        counts.completed, counts.total, counts.in_progress, counts.overdue
    );
    println!();

    let rows: Vec<Vec<String>> = steps
        .iter()
        .enumerate()
        .map(|(i, t)| {
            vec![
                format!("{}", i + 1),
                t.status.to_string(),
                t.due_date.to_string(),
                t.responsible.clone(),
                t.priority.map(|p| p.to_string()).unwrap_or_default(),
                t.description.clone(),
            ]
        })
        .collect();
    print_table(&["#", "STATUS", "DUE", "RESPONSIBLE", "PRIORITY", "DESCRIPTION"], rows);
    Ok(())
}
