use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::FluxError;

/// How the inference endpoint hands the image back.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResponseEncoding {
    /// The body is the encoded image itself.
    #[default]
    Raw,
    /// The body is `[{"image_base64": "...", "seed": 123}]`.
    Base64Json,
}

impl ResponseEncoding {
    pub fn as_str(&self) -> &'static str {
        match self {
            ResponseEncoding::Raw => "raw",
            ResponseEncoding::Base64Json => "base64",
        }
    }
}

impl fmt::Display for ResponseEncoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ResponseEncoding {
    type Err = FluxError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "raw" | "binary" => Ok(ResponseEncoding::Raw),
            "base64" | "base64_json" | "json" => Ok(ResponseEncoding::Base64Json),
            other => Err(FluxError::ConfigError(format!(
                "unknown response encoding '{}', expected 'raw' or 'base64'",
                other
            ))),
        }
    }
}

/// One element of a base64-encoded response.
#[derive(Debug, Clone, Deserialize)]
pub struct EncodedImage {
    pub image_base64: String,
    #[serde(default)]
    pub seed: Option<u32>,
}
