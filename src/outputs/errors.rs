/// Errors from the outputs pipeline and its orchestration.
use std::path::PathBuf;

use thiserror::Error;

use crate::stack::LookupError;

/// Every way a single invocation can fail. All variants are terminal.
#[derive(Debug, Error)]
pub enum OutputsError {
    /// Invalid combination of inputs, detected before any remote call.
    #[error("{0}")]
    Config(String),

    /// The template file could not be read or has a syntax error.
    #[error("template {name}: {message}")]
    TemplateParse {
        /// Template file path or name.
        name: String,
        /// Parser or I/O message.
        message: String,
    },

    /// The remote stack lookup failed.
    #[error(transparent)]
    Lookup(#[from] LookupError),

    /// Template execution failed, typically on an undefined key.
    #[error("{}", render_message(.key.as_deref(), .message))]
    Render {
        /// The missing output key, when it could be identified.
        key: Option<String>,
        /// Engine message.
        message: String,
    },

    /// Writing the rendered bytes to their destination failed.
    #[error("write {}: {source}", sink_name(.path.as_deref()))]
    Sink {
        /// Output file, or `None` for stdout.
        path: Option<PathBuf>,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// Interrupted before the stack lookup finished.
    #[error("interrupted")]
    Cancelled,
}

fn render_message(key: Option<&str>, message: &str) -> String {
    match key {
        Some(key) => format!("template references missing output '{key}': {message}"),
        None => format!("template render failed: {message}"),
    }
}

fn sink_name(path: Option<&std::path::Path>) -> String {
    path.map_or_else(|| "stdout".to_owned(), |p| p.display().to_string())
}

impl OutputsError {
    /// Shorthand for a `Config` error.
    #[must_use]
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Return the CLI exit code for this error.
    #[must_use]
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::Config(_) | Self::TemplateParse { .. } => 2,
            Self::Lookup(_) => 4,
            Self::Render { .. } => 5,
            Self::Sink { .. } => 1,
            Self::Cancelled => 130,
        }
    }
}
