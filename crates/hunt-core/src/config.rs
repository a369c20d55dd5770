use crate::error::{HuntError, Result};
use crate::paths;
use crate::types::UserId;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

// ---------------------------------------------------------------------------
// ConfigWarning / WarnLevel
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConfigWarning {
    pub level: WarnLevel,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WarnLevel {
    Warning,
    Error,
}

// ---------------------------------------------------------------------------
// LookupConfig
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LookupConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_base_url() -> String {
    "https://pokeapi.co/api/v2".to_string()
}

fn default_timeout_secs() -> u64 {
    10
}

impl Default for LookupConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

// ---------------------------------------------------------------------------
// KeepAliveConfig
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KeepAliveConfig {
    #[serde(default = "default_enabled")]
    pub enabled: bool,
    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_enabled() -> bool {
    true
}

fn default_port() -> u16 {
    8080
}

impl Default for KeepAliveConfig {
    fn default() -> Self {
        Self {
            enabled: default_enabled(),
            port: default_port(),
        }
    }
}

// ---------------------------------------------------------------------------
// BotConfig
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BotConfig {
    #[serde(default = "default_data_file")]
    pub data_file: PathBuf,
    #[serde(default = "default_prefix")]
    pub prefix: String,
    /// User ids allowed to run administrator commands.
    #[serde(default)]
    pub admins: Vec<String>,
    #[serde(default)]
    pub lookup: LookupConfig,
    #[serde(default)]
    pub keepalive: KeepAliveConfig,
    /// Candidate names for the random-add command.
    #[serde(default = "default_random_pool")]
    pub random_pool: Vec<String>,
}

fn default_data_file() -> PathBuf {
    PathBuf::from(paths::DEFAULT_DATA_FILE)
}

fn default_prefix() -> String {
    "!".to_string()
}

fn default_random_pool() -> Vec<String> {
    [
        "Pikachu",
        "Charizard",
        "Bulbasaur",
        "Squirtle",
        "Jigglypuff",
        "Meowth",
        "Psyduck",
        "Snorlax",
        "Eevee",
        "Gengar",
        "Lucario",
        "Greninja",
        "Dragonite",
        "Gyarados",
        "Mewtwo",
        "Umbreon",
        "Sylveon",
        "Garchomp",
        "Togepi",
        "Magikarp",
    ]
    .into_iter()
    .map(String::from)
    .collect()
}

impl Default for BotConfig {
    fn default() -> Self {
        Self {
            data_file: default_data_file(),
            prefix: default_prefix(),
            admins: Vec::new(),
            lookup: LookupConfig::default(),
            keepalive: KeepAliveConfig::default(),
            random_pool: default_random_pool(),
        }
    }
}

impl BotConfig {
    /// Load from `path` if it exists, otherwise return defaults.
    pub fn load(path: &Path) -> Result<Self> {
        match crate::io::read_if_exists(path)? {
            Some(data) => Ok(serde_yaml::from_str(&data)?),
            None => {
                tracing::debug!(path = %path.display(), "no config file, using defaults");
                Ok(Self::default())
            }
        }
    }

    pub fn is_admin(&self, user: &UserId) -> bool {
        self.admins.iter().any(|a| a.trim() == user.as_str())
    }

    /// Check for settings that make the bot misbehave. Errors should stop
    /// startup; warnings are reported and ignored.
    pub fn validate(&self) -> Vec<ConfigWarning> {
        let mut warnings = Vec::new();

        if self.prefix.trim().is_empty() {
            warnings.push(ConfigWarning {
                level: WarnLevel::Error,
                message: "prefix must not be empty".to_string(),
            });
        }

        if self.random_pool.iter().all(|n| n.trim().is_empty()) {
            warnings.push(ConfigWarning {
                level: WarnLevel::Warning,
                message: "random_pool is empty; the random-add command will always refuse"
                    .to_string(),
            });
        }

        for admin in &self.admins {
            if UserId::parse(admin).is_err() {
                warnings.push(ConfigWarning {
                    level: WarnLevel::Warning,
                    message: format!("admin '{admin}' is not a numeric user id"),
                });
            }
        }

        if self.lookup.timeout_secs == 0 {
            warnings.push(ConfigWarning {
                level: WarnLevel::Error,
                message: "lookup.timeout_secs must be greater than zero".to_string(),
            });
        }

        warnings
    }

    /// Fail on the first error-level warning.
    pub fn ensure_valid(&self) -> Result<()> {
        match self
            .validate()
            .into_iter()
            .find(|w| w.level == WarnLevel::Error)
        {
            Some(w) => Err(HuntError::Config(w.message)),
            None => Ok(()),
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
