use crate::cmd::{require_delete, require_edit, resolve_project_id};
use crate::output::{print_json, print_table};
use anyhow::Context;
use clap::Subcommand;
use kvp_core::progress;
use kvp_core::project::Project;
use kvp_core::store::ProjectStore;
use std::path::Path;

#[derive(Subcommand)]
pub enum ProjectSubcommand {
    /// Create an empty project and make it active
    New {
        #[arg(required = true)]
        name: Vec<String>,
        /// Project description
        #[arg(long)]
        description: Option<String>,
    },
    /// Load the pre-populated example project
    Sample,
    /// List all projects
    List,
    /// Show the active project
    Show,
    /// Make a project active (full id or unique prefix)
    Select { id: String },
    /// Rename the active project
    Rename {
        #[arg(required = true)]
        name: Vec<String>,
    },
    /// Set the active project's status: draft, in_progress, done, or on_hold
    Status { status: String },
    /// Delete a project (defaults to the active one)
    Delete { id: Option<String> },
}

pub fn run(file: &Path, subcmd: ProjectSubcommand, json: bool) -> anyhow::Result<()> {
    match subcmd {
        ProjectSubcommand::New { name, description } => {
            new(file, &name.join(" "), description, json)
        }
        ProjectSubcommand::Sample => sample(file, json),
        ProjectSubcommand::List => list(file, json),
        ProjectSubcommand::Show => show(file, json),
        ProjectSubcommand::Select { id } => select(file, &id, json),
        ProjectSubcommand::Rename { name } => rename(file, &name.join(" "), json),
        ProjectSubcommand::Status { status } => self::status(file, &status, json),
        ProjectSubcommand::Delete { id } => delete(file, id.as_deref(), json),
    }
}

fn new(file: &Path, name: &str, description: Option<String>, json: bool) -> anyhow::Result<()> {
    let mut store = ProjectStore::load(file)?;
    require_edit(&store)?;

    let project = match description {
        Some(d) => Project::with_description(name, d),
        None => Project::new(name),
    };
    let id = project.id;
    store.add(project)?;
    store.save(file)?;

    if json {
        print_json(&serde_json::json!({ "id": id, "name": name }))?;
    } else {
        println!("Created project {id}: {name}");
    }
    Ok(())
}

fn sample(file: &Path, json: bool) -> anyhow::Result<()> {
    let mut store = ProjectStore::load(file)?;
    require_edit(&store)?;

    let project = Project::sample();
    let id = project.id;
    let name = project.name.clone();
    store.add(project)?;
    store.save(file)?;

    if json {
        print_json(&serde_json::json!({ "id": id, "name": name }))?;
    } else {
        println!("Created sample project {id}: {name}");
    }
    Ok(())
}

fn list(file: &Path, json: bool) -> anyhow::Result<()> {
    let store = ProjectStore::load(file)?;

    if json {
        print_json(&store.projects)?;
        return Ok(());
    }

    if store.is_empty() {
        println!("No projects. Create one with 'kvp project new'.");
        return Ok(());
    }

    let rows: Vec<Vec<String>> = store
        .iter()
        .map(|p| {
            let marker = if store.active == Some(p.id) { "*" } else { "" };
            vec![
                marker.to_string(),
                short_id(p),
                p.status.to_string(),
                format!("{}%", progress::progress(p)),
                p.name.clone(),
            ]
        })
        .collect();
    print_table(&["", "ID", "STATUS", "PROGRESS", "NAME"], rows);
    Ok(())
}

fn show(file: &Path, json: bool) -> anyhow::Result<()> {
    let store = ProjectStore::load(file)?;
    let project = store.active()?;

    if json {
        print_json(project)?;
        return Ok(());
    }

    println!("Project: {}", project.name);
    println!("Id:          {}", project.id);
    println!("Status:      {}", project.status);
    println!("Created:     {}", project.created_date);
    if !project.description.is_empty() {
        println!("Description: {}", project.description);
    }
    println!("Progress:    {}%", progress::progress(project));
    Ok(())
}

fn select(file: &Path, id: &str, json: bool) -> anyhow::Result<()> {
    let mut store = ProjectStore::load(file)?;
    let id = resolve_project_id(&store, id)?;
    store.select(id)?;
    store.save(file)?;

    let name = store.active()?.name.clone();
    if json {
        print_json(&serde_json::json!({ "id": id, "name": name }))?;
    } else {
        println!("Selected project {id}: {name}");
    }
    Ok(())
}

fn rename(file: &Path, name: &str, json: bool) -> anyhow::Result<()> {
    let mut store = ProjectStore::load(file)?;
    require_edit(&store)?;

    let project = store.active_mut()?;
    project.rename(name);
    let id = project.id;
    store.save(file)?;

    if json {
        print_json(&serde_json::json!({ "id": id, "name": name }))?;
    } else {
        println!("Renamed project to '{name}'");
    }
    Ok(())
}

fn status(file: &Path, status: &str, json: bool) -> anyhow::Result<()> {
    let mut store = ProjectStore::load(file)?;
    require_edit(&store)?;

    let status = status.parse()?;
    let project = store.active_mut()?;
    project.set_status(status);
    let id = project.id;
    store.save(file)?;

    if json {
        print_json(&serde_json::json!({ "id": id, "status": status }))?;
    } else {
        println!("Project status set to {status}");
    }
    Ok(())
}

fn delete(file: &Path, id: Option<&str>, json: bool) -> anyhow::Result<()> {
    let mut store = ProjectStore::load(file)?;
    require_delete(&store)?;

    let id = match id {
        Some(s) => resolve_project_id(&store, s)?,
        None => store.active()?.id,
    };
    let removed = store
        .remove(id)
        .context("cannot delete project")?;
    store.save(file)?;

    if json {
        print_json(&serde_json::json!({ "id": id, "name": removed.name }))?;
    } else {
        println!("Deleted project {id}: {}", removed.name);
    }
    Ok(())
}

fn short_id(project: &Project) -> String {
    project.id.to_string().chars().take(8).collect()
}
