pub mod dashboard;
pub mod export;
pub mod init;
pub mod phase;
pub mod project;
pub mod role;
pub mod task;

use anyhow::bail;
use kvp_core::store::ProjectStore;
use uuid::Uuid;

/// Field edits are gated on the session role. This mirrors the host form's
/// role handling and is a UX convenience, not an authorization boundary.
pub fn require_edit(store: &ProjectStore) -> anyhow::Result<()> {
    if !store.role.can_edit() {
        bail!("role '{}' cannot edit projects", store.role);
    }
    Ok(())
}

pub fn require_delete(store: &ProjectStore) -> anyhow::Result<()> {
    if !store.role.can_delete() {
        bail!("role '{}' cannot delete", store.role);
    }
    Ok(())
}

/// Resolve a project id from a full uuid or a unique prefix of one.
pub fn resolve_project_id(store: &ProjectStore, prefix: &str) -> anyhow::Result<Uuid> {
    let matches: Vec<Uuid> = store
        .iter()
        .filter(|p| p.id.to_string().starts_with(prefix))
        .map(|p| p.id)
        .collect();
    match matches.len() {
        0 => bail!("project not found: {prefix}"),
        1 => Ok(matches[0]),
        _ => bail!("ambiguous project id prefix: {prefix}"),
    }
}
