use std::env;
use std::fmt;
use std::path::PathBuf;
use std::time::Duration;

use crate::error::{FluxError, Result};
use crate::models::ResponseEncoding;

pub const DEFAULT_API_URL: &str =
    "https://api-inference.huggingface.co/models/black-forest-labs/FLUX.1-schnell";
pub const DEFAULT_TIMEOUT_SECS: u64 = 180;

#[derive(Clone)]
pub struct FluxConfig {
    pub api_url: String,
    pub token: Option<String>,
    pub timeout: Duration,
    pub response_encoding: ResponseEncoding,
    pub output_dir: PathBuf,
}

impl Default for FluxConfig {
    fn default() -> Self {
        FluxConfig {
            api_url: DEFAULT_API_URL.to_string(),
            token: None,
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            response_encoding: ResponseEncoding::Raw,
            output_dir: PathBuf::from("."),
        }
    }
}

// The token never goes into logs.
impl fmt::Debug for FluxConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FluxConfig")
            .field("api_url", &self.api_url)
            .field("token", &self.token.as_ref().map(|_| "<redacted>"))
            .field("timeout", &self.timeout)
            .field("response_encoding", &self.response_encoding)
            .field("output_dir", &self.output_dir)
            .finish()
    }
}

impl FluxConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the config from any key/value source, keys named as in the environment.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        config.token = lookup("HF_TOKEN")
            .map(|token| token.trim().to_string())
            .filter(|token| !token.is_empty());

        if let Some(url) = lookup("FLUX_API_URL") {
            config.api_url = url;
        }

        if let Some(encoding) = lookup("FLUX_RESPONSE_ENCODING") {
            config.response_encoding = encoding.parse()?;
        }

        if let Some(secs) = lookup("FLUX_TIMEOUT_SECS") {
            let secs: u64 = secs.trim().parse().map_err(|_| {
                FluxError::ConfigError(format!("FLUX_TIMEOUT_SECS is not a number: '{}'", secs))
            })?;
            if secs == 0 {
                return Err(FluxError::ConfigError(
                    "FLUX_TIMEOUT_SECS must be at least 1".into(),
                ));
            }
            config.timeout = Duration::from_secs(secs);
        }

        if let Some(dir) = lookup("FLUX_OUTPUT_DIR") {
            config.output_dir = PathBuf::from(dir);
        }

        Ok(config)
    }

    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    pub fn with_api_url(mut self, url: impl Into<String>) -> Self {
        self.api_url = url.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_response_encoding(mut self, encoding: ResponseEncoding) -> Self {
        self.response_encoding = encoding;
        self
    }

    pub fn with_output_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.output_dir = dir.into();
        self
    }

    pub fn require_token(&self) -> Result<&str> {
        self.token
            .as_deref()
            .ok_or_else(|| FluxError::ConfigError("HF_TOKEN is required".into()))
    }
}
