use kvp_core::{io, store::ProjectStore};
use std::path::Path;

pub fn run(file: &Path) -> anyhow::Result<()> {
    let empty = serde_json::to_string_pretty(&ProjectStore::new())?;
    let written = io::write_if_missing(file, empty.as_bytes())?;
    if written {
        println!("Initialized {}", file.display());
    } else {
        println!("{} already initialized", file.display());
    }
    Ok(())
}
