//! Client and terminal front-end for the hosted FLUX.1-schnell text-to-image endpoint.
//!
//! The library half builds the `inputs`/`parameters` request body, posts it with a
//! bearer token and decodes the returned image. The `ui` module wraps that in a
//! small line-oriented form.

pub mod config;
pub mod error;
pub mod inference;
pub mod logger;
pub mod models;
pub mod ui;

pub use config::FluxConfig;
pub use error::{FluxError, Result};
pub use inference::{ImageBackend, ImageClient, InferenceClient};
pub use models::*;
