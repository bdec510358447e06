use std::path::{Path, PathBuf};

pub const STORE_FILE: &str = "kvp.json";

/// Resolve the working document path.
///
/// Priority:
/// 1. `--file` flag / `KVP_FILE` env var (passed in as `explicit`)
/// 2. Walk upward from `cwd` looking for an existing `kvp.json`
/// 3. Fall back to `cwd/kvp.json`
pub fn resolve_store_file(explicit: Option<&Path>) -> PathBuf {
    if let Some(p) = explicit {
        return p.to_path_buf();
    }

    let cwd = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));

    let mut dir = cwd.clone();
    loop {
        let candidate = dir.join(STORE_FILE);
        if candidate.is_file() {
            return candidate;
        }
        match dir.parent() {
            Some(p) => dir = p.to_path_buf(),
            None => break,
        }
    }

    cwd.join(STORE_FILE)
}
