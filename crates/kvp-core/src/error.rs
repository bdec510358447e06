use thiserror::Error;

#[derive(Debug, Error)]
pub enum KvpError {
    #[error("not initialized: run 'kvp init'")]
    NotInitialized,

    #[error("project not found: {0}")]
    ProjectNotFound(String),

    #[error("project already exists: {0}")]
    ProjectExists(String),

    #[error("no active project: create or select one first")]
    NoActiveProject,

    #[error("the last project cannot be deleted")]
    LastProject,

    #[error("task not found: #{0}")]
    TaskNotFound(usize),

    #[error("invalid project status: {0}")]
    InvalidStatus(String),

    #[error("invalid task status: {0}")]
    InvalidTaskStatus(String),

    #[error("invalid priority: {0}")]
    InvalidPriority(String),

    #[error("invalid phase: {0}")]
    InvalidPhase(String),

    #[error("invalid role: {0}")]
    InvalidRole(String),

    #[error("invalid date '{0}': expected YYYY-MM-DD")]
    InvalidDate(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, KvpError>;
