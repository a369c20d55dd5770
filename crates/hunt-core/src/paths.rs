use std::path::{Path, PathBuf};

// ---------------------------------------------------------------------------
// Defaults
// ---------------------------------------------------------------------------

pub const DEFAULT_DATA_FILE: &str = "data/shiny_hunts.json";
pub const DEFAULT_CONFIG_FILE: &str = "shinybot.yaml";

// ---------------------------------------------------------------------------
// Path helpers
// ---------------------------------------------------------------------------

/// Resolve a configured path against `base` unless it is already absolute.
pub fn resolve(base: &Path, configured: &Path) -> PathBuf {
    if configured.is_absolute() {
        configured.to_path_buf()
    } else {
        base.join(configured)
    }
}

pub fn default_config_file(base: &Path) -> PathBuf {
    base.join(DEFAULT_CONFIG_FILE)
}
