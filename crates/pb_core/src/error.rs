use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Failed to load {path} (status {status})")]
    Status { path: String, status: u16 },

    #[error("Invalid data format: {0}")]
    Format(String),

    #[error("Blog not found: {0}")]
    NotFound(String),

    #[error("Invalid blog URL")]
    InvalidSlug,

    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("External error: {0}")]
    External(#[from] anyhow::Error),
}

impl Error {
    /// Whether reloading the view could change the outcome.
    ///
    /// A missing slug stays missing, so not-found is the only condition
    /// presented without a retry action.
    pub fn is_retryable(&self) -> bool {
        !matches!(self, Error::NotFound(_))
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Error::NotFound(_))
    }
}

pub type Result<T> = std::result::Result<T, Error>;
