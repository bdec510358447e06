use crate::error::Result;
use crate::io;
use crate::project::Project;
use std::path::Path;

// ---------------------------------------------------------------------------
// Single-project snapshot (the manual JSON export)
// ---------------------------------------------------------------------------

/// Serialize a project to the export document: pretty-printed JSON, field
/// names matching the model attributes, one nesting level per phase.
pub fn to_json(project: &Project) -> Result<String> {
    Ok(serde_json::to_string_pretty(project)?)
}

/// Parse a project back from an export document. The derived improvement
/// percentage is recomputed from before/after rather than trusted from the
/// file.
pub fn from_json(data: &str) -> Result<Project> {
    let mut project: Project = serde_json::from_str(data)?;
    if let Some(metrics) = project.check.metrics.as_mut() {
        metrics.recompute();
    }
    Ok(project)
}

pub fn write_snapshot(path: &Path, project: &Project) -> Result<()> {
    let data = to_json(project)?;
    io::atomic_write(path, data.as_bytes())
}

pub fn read_snapshot(path: &Path) -> Result<Project> {
    let data = std::fs::read_to_string(path)?;
    from_json(&data)
}

/// Default snapshot file name for a project: spaces become underscores.
pub fn snapshot_filename(name: &str) -> String {
    format!("kvp_project_{}.json", name.replace(' ', "_"))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
