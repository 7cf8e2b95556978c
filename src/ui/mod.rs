pub mod form;
pub mod render;
pub mod session;

pub use form::{Command, FormState};
pub use session::{save_image, Session};
