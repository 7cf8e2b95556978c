use crate::{
    config::FluxConfig,
    error::{FluxError, Result},
    models::{EncodedImage, GenerationRequest, GenerationResult, ResponseEncoding},
};
use base64::{engine::general_purpose::STANDARD, Engine as _};
use reqwest::Client;
use std::time::Instant;
use uuid::Uuid;

#[derive(Clone)]
pub struct ImageClient {
    client: Client,
    api_url: String,
    token: String,
    encoding: ResponseEncoding,
}

/// Image bytes pulled out of a response body, before pixel decoding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedBody {
    pub bytes: Vec<u8>,
    pub seed: Option<u32>,
}

impl ImageClient {
    pub fn new(config: &FluxConfig) -> Result<Self> {
        let token = config.require_token()?.to_string();

        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| FluxError::ConfigError(format!("failed to build HTTP client: {}", e)))?;

        Ok(Self {
            client,
            api_url: config.api_url.clone(),
            token,
            encoding: config.response_encoding,
        })
    }

    pub fn encoding(&self) -> ResponseEncoding {
        self.encoding
    }

    pub async fn generate(&self, request: &GenerationRequest) -> Result<GenerationResult> {
        request.validate()?;

        let request_id = Uuid::new_v4().to_string();
        let payload = request.to_payload();

        log::info!(
            "Generating {}x{} image in {} steps [req:{}]",
            request.width,
            request.height,
            request.steps,
            request_id
        );
        log::debug!(
            "Image generation request payload: {}",
            serde_json::to_string(&payload)?
        );

        let started = Instant::now();

        let response = self
            .client
            .post(&self.api_url)
            .bearer_auth(&self.token)
            .json(&payload)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            log::error!(
                "Inference endpoint returned {} [req:{}]: {}",
                status,
                request_id,
                body
            );
            return Err(FluxError::HttpStatus {
                status: status.as_u16(),
                body,
            });
        }

        let body = response.bytes().await?;
        let decoded = decode_body(self.encoding, &body)?;

        let image = image::load_from_memory(&decoded.bytes)
            .map_err(|e| FluxError::ImageError(format!("could not decode image: {}", e)))?;

        let elapsed = started.elapsed();
        log::info!(
            "Received {}x{} image ({} bytes) in {}ms [req:{}]",
            image.width(),
            image.height(),
            decoded.bytes.len(),
            elapsed.as_millis(),
            request_id
        );

        Ok(GenerationResult {
            image,
            encoded: decoded.bytes,
            seed: decoded.seed.or(request.seed),
            request_id,
            elapsed,
        })
    }
}

/// Extracts the encoded image from a successful response body.
pub fn decode_body(encoding: ResponseEncoding, body: &[u8]) -> Result<DecodedBody> {
    match encoding {
        ResponseEncoding::Raw => {
            if body.is_empty() {
                return Err(FluxError::ResponseError("empty response body".into()));
            }
            Ok(DecodedBody {
                bytes: body.to_vec(),
                seed: None,
            })
        }
        ResponseEncoding::Base64Json => {
            let images: Vec<EncodedImage> = serde_json::from_slice(body)
                .map_err(|e| FluxError::ResponseError(format!("malformed JSON response: {}", e)))?;

            let first = images
                .into_iter()
                .next()
                .ok_or_else(|| FluxError::ResponseError("no images in response".into()))?;

            let bytes = STANDARD
                .decode(first.image_base64.trim())
                .map_err(|e| FluxError::ResponseError(format!("invalid base64 image: {}", e)))?;

            Ok(DecodedBody {
                bytes,
                seed: first.seed,
            })
        }
    }
}
