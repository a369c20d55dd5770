use crate::output::{print_json, print_table};
use anyhow::Context;
use hunt_core::store::{HuntStore, JsonFileStore};
use serde::Serialize;
use std::path::Path;

#[derive(Serialize)]
struct UserSummary {
    user: String,
    entries: usize,
    completed: usize,
}

pub fn run(data_file: &Path, json: bool) -> anyhow::Result<()> {
    let hunts = JsonFileStore::new(data_file)
        .load()
        .with_context(|| format!("failed to read hunts from {}", data_file.display()))?;

    let summaries: Vec<UserSummary> = hunts
        .iter()
        .map(|(user, entries)| UserSummary {
            user: user.to_string(),
            entries: entries.len(),
            completed: entries.iter().filter(|e| e.completed).count(),
        })
        .collect();

    if json {
        return print_json(&summaries);
    }

    if summaries.is_empty() {
        println!("No hunt lists stored in {}", data_file.display());
        return Ok(());
    }

    let rows = summaries
        .into_iter()
        .map(|s| vec![s.user, s.entries.to_string(), s.completed.to_string()])
        .collect();
    print_table(&["USER", "ENTRIES", "COMPLETED"], rows);
    Ok(())
}
