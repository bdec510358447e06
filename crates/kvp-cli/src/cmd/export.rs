use crate::cmd::require_edit;
use crate::output::print_json;
use anyhow::Context;
use kvp_core::export;
use kvp_core::store::ProjectStore;
use std::path::{Path, PathBuf};

pub fn export(file: &Path, path: Option<&Path>, json: bool) -> anyhow::Result<()> {
    let store = ProjectStore::load(file)?;
    let project = store.active()?;

    let path: PathBuf = match path {
        Some(p) => p.to_path_buf(),
        None => PathBuf::from(export::snapshot_filename(&project.name)),
    };
    export::write_snapshot(&path, project)
        .with_context(|| format!("failed to write snapshot {}", path.display()))?;
    tracing::debug!("snapshot written to {}", path.display());

    if json {
        print_json(&serde_json::json!({ "id": project.id, "path": path }))?;
    } else {
        println!("Exported '{}' to {}", project.name, path.display());
    }
    Ok(())
}

pub fn import(file: &Path, path: &Path, json: bool) -> anyhow::Result<()> {
    let mut store = ProjectStore::load(file)?;
    require_edit(&store)?;

    let project = export::read_snapshot(path)
        .with_context(|| format!("failed to read snapshot {}", path.display()))?;
    let id = project.id;
    let name = project.name.clone();
    store
        .add(project)
        .context("snapshot project is already in the store")?;
    store.save(file)?;

    if json {
        print_json(&serde_json::json!({ "id": id, "name": name }))?;
    } else {
        println!("Imported project {id}: {name}");
    }
    Ok(())
}
