use anyhow::Context;
use hunt_core::config::{BotConfig, WarnLevel};
use hunt_core::paths;
use std::path::{Path, PathBuf};

/// Config plus the resolved data file path.
#[derive(Debug, Clone)]
pub struct Settings {
    pub config: BotConfig,
    pub data_file: PathBuf,
}

/// Resolve settings.
///
/// Priority for the config file:
/// 1. `--config` flag / `SHINYBOT_CONFIG` env var (passed in as `explicit_config`)
/// 2. `shinybot.yaml` in the current directory, if present
/// 3. Built-in defaults
///
/// The data file comes from `--data-file` when given, otherwise from the
/// config's `data_file`, resolved against the config file's directory.
pub fn resolve(explicit_config: Option<&Path>, data_file: Option<&Path>) -> anyhow::Result<Settings> {
    let cwd = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
    let config_path = match explicit_config {
        Some(p) => paths::resolve(&cwd, p),
        None => paths::default_config_file(&cwd),
    };
    let config = BotConfig::load(&config_path)
        .with_context(|| format!("failed to load config from {}", config_path.display()))?;

    for warning in config.validate() {
        match warning.level {
            WarnLevel::Warning => tracing::warn!("config: {}", warning.message),
            WarnLevel::Error => tracing::error!("config: {}", warning.message),
        }
    }
    config.ensure_valid()?;

    let base = config_path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .map(Path::to_path_buf)
        .unwrap_or(cwd.clone());
    let data_file = match data_file {
        Some(p) => paths::resolve(&cwd, p),
        None => paths::resolve(&base, &config.data_file),
    };

    Ok(Settings { config, data_file })
}
