use crate::output::print_json;
use anyhow::Context;
use hunt_core::store::{HuntStore, JsonFileStore};
use std::path::Path;

/// Print the stored registry in canonical form. Legacy files are converted
/// on the way out; the file itself is not touched.
pub fn run(data_file: &Path) -> anyhow::Result<()> {
    let store = JsonFileStore::new(data_file);
    let hunts = store
        .load()
        .with_context(|| format!("failed to read hunts from {}", data_file.display()))?;
    print_json(&hunts)
}
