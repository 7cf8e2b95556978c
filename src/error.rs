use thiserror::Error;

/// Shown for every transport failure and every non-2xx status.
pub const CONNECTIVITY_MESSAGE: &str = "❌ Ошибка подключения к API. Попробуйте позже.";

#[derive(Debug, Error)]
pub enum FluxError {
    #[error("Configuration error: {0}")]
    ConfigError(String),
    #[error("Invalid request: {0}")]
    InvalidRequest(String),
    #[error("Connection error: {0}")]
    ConnectionError(String),
    #[error("HTTP status {status}: {body}")]
    HttpStatus { status: u16, body: String },
    #[error("Response error: {0}")]
    ResponseError(String),
    #[error("Serialization error: {0}")]
    SerializationError(String),
    #[error("Image error: {0}")]
    ImageError(String),
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),
}

impl FluxError {
    /// True for failures the user can only wait out: transport errors and error statuses.
    pub fn is_connectivity(&self) -> bool {
        matches!(
            self,
            FluxError::ConnectionError(_) | FluxError::HttpStatus { .. }
        )
    }

    pub fn user_message(&self) -> String {
        if self.is_connectivity() {
            CONNECTIVITY_MESSAGE.to_string()
        } else {
            format!("❌ Произошла ошибка: {}", self)
        }
    }
}

impl From<reqwest::Error> for FluxError {
    fn from(err: reqwest::Error) -> Self {
        FluxError::ConnectionError(err.to_string())
    }
}

impl From<serde_json::Error> for FluxError {
    fn from(err: serde_json::Error) -> Self {
        FluxError::SerializationError(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, FluxError>;
