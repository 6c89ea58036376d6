/// Outputs domain layer: collection, rendering, templates.
pub mod collect;
pub mod errors;
pub mod render;
pub mod template;

pub use collect::{OutputPair, collect};
pub use errors::OutputsError;
pub use render::{RenderMode, render};
pub use template::ParsedTemplate;
