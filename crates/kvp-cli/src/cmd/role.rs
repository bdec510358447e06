use crate::output::print_json;
use kvp_core::store::ProjectStore;
use std::path::Path;

pub fn run(file: &Path, role: Option<&str>, json: bool) -> anyhow::Result<()> {
    let mut store = ProjectStore::load(file)?;

    match role {
        Some(s) => {
            store.role = s.parse()?;
            store.save(file)?;
            if json {
                print_json(&serde_json::json!({ "role": store.role }))?;
            } else {
                println!("Role set to {}", store.role);
            }
        }
        None => {
            if json {
                print_json(&serde_json::json!({ "role": store.role }))?;
            } else {
                println!("{}", store.role);
            }
        }
    }
    Ok(())
}
