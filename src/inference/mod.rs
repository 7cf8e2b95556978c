pub mod image_client;

use crate::{
    config::FluxConfig,
    error::Result,
    models::{GenerationRequest, GenerationResult},
};
use async_trait::async_trait;

pub use image_client::{decode_body, DecodedBody, ImageClient};

/// Anything that can turn a request into an image.
#[async_trait]
pub trait ImageBackend: Send + Sync {
    async fn generate(&self, request: &GenerationRequest) -> Result<GenerationResult>;
}

#[async_trait]
impl ImageBackend for ImageClient {
    async fn generate(&self, request: &GenerationRequest) -> Result<GenerationResult> {
        ImageClient::generate(self, request).await
    }
}

#[derive(Clone)]
pub struct InferenceClient {
    config: FluxConfig,
    image_client: ImageClient,
}

impl InferenceClient {
    pub fn new(config: FluxConfig) -> Result<Self> {
        let image_client = ImageClient::new(&config)?;
        Ok(Self {
            config,
            image_client,
        })
    }

    pub fn image(&self) -> &ImageClient {
        &self.image_client
    }

    pub fn config(&self) -> &FluxConfig {
        &self.config
    }
}

#[async_trait]
impl ImageBackend for InferenceClient {
    async fn generate(&self, request: &GenerationRequest) -> Result<GenerationResult> {
        self.image_client.generate(request).await
    }
}
