use std::sync::Arc;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse config: {0}")]
    ConfigParse(#[from] toml::de::Error),

    #[error("Failed to serialize config: {0}")]
    ConfigSerialize(#[from] toml::ser::Error),

    #[error("Config directory not found")]
    NoConfigDir,

    #[error("{0} is not defined")]
    MissingAccessToken(String),

    #[error("Invalid access token: {0}")]
    InvalidAccessToken(String),

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),

    #[error("Unsupported language: {0}")]
    UnsupportedLanguage(String),

    #[error("Metadata error: {0}")]
    Metadata(String),

    #[error("No {kind} list for {media}")]
    UnsupportedList { kind: String, media: String },

    /// A failure observed by every waiter of a de-duplicated request.
    #[error("{0}")]
    Shared(Arc<Error>),
}

pub type Result<T> = std::result::Result<T, Error>;
