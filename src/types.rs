/// Serializable error envelope written to stderr with `--json`.
use serde::{Deserialize, Serialize};

use crate::outputs::OutputsError;

/// A structured error envelope for JSON error output.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorOutput {
    /// Always `false`.
    pub ok: bool,
    /// Error details.
    pub error: ErrorDetail,
}

/// Error detail in the JSON error envelope.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorDetail {
    /// Machine-readable error code (snake_case).
    pub code: String,
    /// Human-readable error message.
    pub message: String,
    /// Missing output key, for render failures.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub key: Option<String>,
}

impl ErrorOutput {
    /// Construct from an `OutputsError`.
    #[must_use]
    pub fn from_outputs_error(err: &OutputsError) -> Self {
        let (code, key) = match err {
            OutputsError::Config(_) => ("config_error", None),
            OutputsError::TemplateParse { .. } => ("template_parse_error", None),
            OutputsError::Lookup(_) => ("lookup_error", None),
            OutputsError::Render { key, .. } => ("render_error", key.clone()),
            OutputsError::Sink { .. } => ("sink_error", None),
            OutputsError::Cancelled => ("cancelled", None),
        };
        Self {
            ok: false,
            error: ErrorDetail {
                code: code.to_owned(),
                message: err.to_string(),
                key,
            },
        }
    }
}
