use image::DynamicImage;
use serde::Serialize;
use std::time::Duration;

use crate::error::{FluxError, Result};
use crate::models::prompts::DEFAULT_PROMPT;

pub const MIN_DIMENSION: u32 = 512;
pub const MAX_DIMENSION: u32 = 1024;
pub const DIMENSION_STEP: u32 = 64;
pub const DEFAULT_DIMENSION: u32 = 768;

pub const MIN_STEPS: u32 = 1;
pub const MAX_STEPS: u32 = 4;
pub const DEFAULT_STEPS: u32 = 2;

/// schnell is guidance-distilled; anything but zero is ignored or rejected upstream.
pub const GUIDANCE_SCALE: f64 = 0.0;

const SUMMARY_CHARS: usize = 50;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationRequest {
    pub prompt: String,
    pub width: u32,
    pub height: u32,
    pub steps: u32,
    pub seed: Option<u32>,
}

impl Default for GenerationRequest {
    fn default() -> Self {
        GenerationRequest {
            prompt: DEFAULT_PROMPT.to_string(),
            width: DEFAULT_DIMENSION,
            height: DEFAULT_DIMENSION,
            steps: DEFAULT_STEPS,
            seed: None,
        }
    }
}

impl GenerationRequest {
    pub fn new(prompt: impl Into<String>) -> Self {
        Self {
            prompt: prompt.into(),
            ..Default::default()
        }
    }

    pub fn with_size(mut self, width: u32, height: u32) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    pub fn with_steps(mut self, steps: u32) -> Self {
        self.steps = steps;
        self
    }

    pub fn with_seed(mut self, seed: u32) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn validate(&self) -> Result<()> {
        if self.prompt.trim().is_empty() {
            return Err(FluxError::InvalidRequest("prompt must not be empty".into()));
        }
        check_dimension("width", self.width)?;
        check_dimension("height", self.height)?;
        if !(MIN_STEPS..=MAX_STEPS).contains(&self.steps) {
            return Err(FluxError::InvalidRequest(format!(
                "steps must be between {} and {}, got {}",
                MIN_STEPS, MAX_STEPS, self.steps
            )));
        }
        Ok(())
    }

    /// Prompt shortened for display, counted in characters.
    pub fn summary(&self) -> String {
        if self.prompt.chars().count() > SUMMARY_CHARS {
            let head: String = self.prompt.chars().take(SUMMARY_CHARS).collect();
            format!("{}...", head)
        } else {
            self.prompt.clone()
        }
    }

    pub fn to_payload(&self) -> InferencePayload<'_> {
        InferencePayload {
            inputs: &self.prompt,
            parameters: InferenceParameters {
                width: self.width,
                height: self.height,
                num_inference_steps: self.steps,
                guidance_scale: GUIDANCE_SCALE,
                seed: self.seed,
            },
        }
    }
}

fn check_dimension(name: &str, value: u32) -> Result<()> {
    if !(MIN_DIMENSION..=MAX_DIMENSION).contains(&value) {
        return Err(FluxError::InvalidRequest(format!(
            "{} must be between {} and {}, got {}",
            name, MIN_DIMENSION, MAX_DIMENSION, value
        )));
    }
    if (value - MIN_DIMENSION) % DIMENSION_STEP != 0 {
        return Err(FluxError::InvalidRequest(format!(
            "{} must be a multiple of {}, got {}",
            name, DIMENSION_STEP, value
        )));
    }
    Ok(())
}

/// Wire body for the inference endpoint.
#[derive(Debug, Serialize)]
pub struct InferencePayload<'a> {
    pub inputs: &'a str,
    pub parameters: InferenceParameters,
}

#[derive(Debug, Serialize)]
pub struct InferenceParameters {
    pub width: u32,
    pub height: u32,
    pub num_inference_steps: u32,
    pub guidance_scale: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seed: Option<u32>,
}

#[derive(Debug, Clone)]
pub struct GenerationResult {
    pub image: DynamicImage,
    /// Image bytes exactly as the service encoded them.
    pub encoded: Vec<u8>,
    /// Echoed by the service when available, otherwise the seed we asked for.
    pub seed: Option<u32>,
    pub request_id: String,
    pub elapsed: Duration,
}

impl GenerationResult {
    pub fn dimensions(&self) -> (u32, u32) {
        (self.image.width(), self.image.height())
    }
}
