//! Output formatting for CLI.

mod json;
mod text;

pub use json::{JsonFormatter, LoginOutput, RemoveOutput};
pub use text::TextFormatter;
