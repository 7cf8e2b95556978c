pub mod common;
pub mod generation;
pub mod prompts;

pub use common::*;
pub use generation::*;
pub use prompts::*;
