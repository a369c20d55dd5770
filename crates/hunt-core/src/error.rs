use thiserror::Error;

#[derive(Debug, Error)]
pub enum HuntError {
    #[error("invalid user id '{0}': expected a numeric id or a <@id> mention")]
    InvalidUserId(String),

    #[error("invalid config: {0}")]
    Config(String),

    #[error("unreadable hunt file: {0}")]
    CorruptStore(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Yaml(#[from] serde_yaml::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Http(#[from] reqwest::Error),
}

pub type Result<T> = std::result::Result<T, HuntError>;
