use thiserror::Error;

use crate::crypto::CipherError;

pub type Result<T> = std::result::Result<T, ConsoleError>;

#[derive(Debug, Error)]
pub enum ConsoleError {
    /// Local validation failed; nothing was sent.
    #[error("{0}")]
    Validation(String),
    /// The backend answered with a non-success status.
    #[error("{0}")]
    Rejected(String),
    #[error("config error: {0}")]
    Config(#[from] config::ConfigError),
    #[error("invalid base_url: {0}")]
    InvalidBaseUrl(String),
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("{path} answered with HTTP {status}")]
    Status { path: String, status: u16 },
    #[error("cipher error: {0}")]
    Cipher(#[from] CipherError),
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("form encoding error: {0}")]
    Form(#[from] serde_urlencoded::ser::Error),
    #[error("payload must be a JSON object")]
    PayloadShape,
}

impl ConsoleError {
    /// Whether the user was already shown this error through a dialog.
    pub fn is_surfaced(&self) -> bool {
        matches!(self, Self::Validation(_) | Self::Rejected(_))
    }
}
