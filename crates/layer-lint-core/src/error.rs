use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum LayerLintError {
    #[error("Document not found: {path}")]
    DocumentNotFound { path: PathBuf },

    #[error("Failed to parse document {path}: {message}")]
    DocumentParse { path: PathBuf, message: String },

    #[error("Config key not found: {key}")]
    ConfigKeyNotFound { key: String },

    #[error("Invalid value for {key}: '{value}' - must be a non-empty string")]
    InvalidConfigValue { key: String, value: String },

    #[error("Metadata fetch failed for {id}: {reason}")]
    FetchFailed { id: String, reason: String },

    #[error("Rename rejected for {id}: {reason}")]
    RenameRejected { id: String, reason: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML serialization error: {0}")]
    TomlSer(#[from] toml::ser::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, LayerLintError>;

impl LayerLintError {
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::DocumentNotFound { .. } => 2,
            Self::DocumentParse { .. } => 3,
            Self::ConfigKeyNotFound { .. } => 4,
            Self::InvalidConfigValue { .. } => 5,
            _ => 1,
        }
    }
}
