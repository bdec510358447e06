use crate::output::print_json;
use chrono::Utc;
use kvp_core::store::ProjectStore;
use kvp_core::types::Phase;
use kvp_core::{progress, summary};
use std::path::Path;

pub fn run(file: &Path, json: bool) -> anyhow::Result<()> {
    let store = ProjectStore::load(file)?;
    let project = store.active()?;
    let today = Utc::now().date_naive();

    let percent = progress::progress(project);
    let counts = summary::aggregate(&project.do_phase.implementation_steps, today);
    let improvement = project
        .check
        .metrics
        .as_ref()
        .map(|m| m.improvement_percentage);

    if json {
        let phases: serde_json::Map<String, serde_json::Value> = Phase::all()
            .iter()
            .map(|&phase| {
                (
                    phase.as_str().to_string(),
                    progress::phase_complete(project, phase).into(),
                )
            })
            .collect();
        return print_json(&serde_json::json!({
            "project": project.name,
            "status": project.status,
            "progress": percent,
            "phases": phases,
            "tasks": counts,
            "improvement": improvement,
        }));
    }

    println!("{} ({})", project.name, project.status);
    println!();

    let strip: Vec<String> = Phase::all()
        .iter()
        .map(|&phase| {
            let mark = if progress::phase_complete(project, phase) {
                "x"
            } else {
                " "
            };
            format!("[{mark}] {phase}")
        })
        .collect();
    println!("{}", strip.join("  "));
    println!("Progress: {percent}%");
    println!();

    println!(
        "Tasks: {} total, {} completed, {} in progress, {} overdue",
        counts.total, counts.completed, counts.in_progress, counts.overdue
    );

    if let Some(value) = improvement {
        let tag = if value < 0.0 { " (regression)" } else { "" };
        println!("Improvement: {value:.1}%{tag}");
    }
    Ok(())
}
