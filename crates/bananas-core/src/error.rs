use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("Failed to read grade set from key {key}: {message}")]
    StorageRead { key: String, message: String },

    #[error("No grade records to export")]
    EmptyExportSet,

    #[error("Config parse error: {0}")]
    ConfigParseError(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, Error>;

impl From<toml::de::Error> for Error {
    fn from(e: toml::de::Error) -> Self {
        Error::ConfigParseError(e.to_string())
    }
}

impl Error {
    pub fn storage_read(key: &str, message: impl std::fmt::Display) -> Self {
        Error::StorageRead {
            key: key.to_string(),
            message: message.to_string(),
        }
    }
}
