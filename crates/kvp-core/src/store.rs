use crate::error::{KvpError, Result};
use crate::io;
use crate::project::Project;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;
use uuid::Uuid;

// ---------------------------------------------------------------------------
// Role
// ---------------------------------------------------------------------------

/// Session role. Purely a display/UX convenience mirrored from the host,
/// not an authorization boundary. The core computations ignore it entirely.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    #[default]
    Admin,
    Editor,
    Viewer,
}

impl Role {
    pub fn can_edit(self) -> bool {
        matches!(self, Role::Admin | Role::Editor)
    }

    pub fn can_delete(self) -> bool {
        matches!(self, Role::Admin)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Role::Admin => "admin",
            Role::Editor => "editor",
            Role::Viewer => "viewer",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Role {
    type Err = KvpError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "admin" => Ok(Role::Admin),
            "editor" => Ok(Role::Editor),
            "viewer" => Ok(Role::Viewer),
            _ => Err(KvpError::InvalidRole(s.to_string())),
        }
    }
}

// ---------------------------------------------------------------------------
// ProjectStore
// ---------------------------------------------------------------------------

/// The caller-owned collection of projects plus the active selection.
///
/// Projects keep insertion order. The store is an explicit value passed
/// around by the host; nothing in this crate holds one globally.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProjectStore {
    #[serde(default)]
    pub role: Role,
    #[serde(default)]
    pub active: Option<Uuid>,
    #[serde(default)]
    pub projects: Vec<Project>,
}

impl ProjectStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.projects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.projects.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Project> {
        self.projects.iter()
    }

    pub fn get(&self, id: Uuid) -> Option<&Project> {
        self.projects.iter().find(|p| p.id == id)
    }

    /// Add a project and make it the active selection.
    pub fn add(&mut self, project: Project) -> Result<()> {
        if self.get(project.id).is_some() {
            return Err(KvpError::ProjectExists(project.id.to_string()));
        }
        self.active = Some(project.id);
        self.projects.push(project);
        Ok(())
    }

    pub fn select(&mut self, id: Uuid) -> Result<()> {
        if self.get(id).is_none() {
            return Err(KvpError::ProjectNotFound(id.to_string()));
        }
        self.active = Some(id);
        Ok(())
    }

    pub fn active(&self) -> Result<&Project> {
        self.active
            .and_then(|id| self.get(id))
            .ok_or(KvpError::NoActiveProject)
    }

    pub fn active_mut(&mut self) -> Result<&mut Project> {
        let id = self.active.ok_or(KvpError::NoActiveProject)?;
        self.projects
            .iter_mut()
            .find(|p| p.id == id)
            .ok_or(KvpError::NoActiveProject)
    }

    /// Remove a project. The last remaining project of a non-empty store
    /// cannot be deleted; the store is left unchanged in that case. When the
    /// removed project was active, the first remaining one becomes active.
    pub fn remove(&mut self, id: Uuid) -> Result<Project> {
        let pos = self
            .projects
            .iter()
            .position(|p| p.id == id)
            .ok_or_else(|| KvpError::ProjectNotFound(id.to_string()))?;
        if self.projects.len() == 1 {
            return Err(KvpError::LastProject);
        }
        let removed = self.projects.remove(pos);
        if self.active == Some(id) {
            self.active = self.projects.first().map(|p| p.id);
        }
        Ok(removed)
    }

    // ---------------------------------------------------------------------------
    // Working document persistence
    // ---------------------------------------------------------------------------

    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(KvpError::NotInitialized);
        }
        let data = std::fs::read_to_string(path)?;
        let store: ProjectStore = serde_json::from_str(&data)?;
        Ok(store)
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        let data = serde_json::to_string_pretty(self)?;
        io::atomic_write(path, data.as_bytes())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
