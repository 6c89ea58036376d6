/// Render an `OutputMap` as tab-separated lines, JSON, or a template.
use super::collect::OutputMap;
use super::errors::OutputsError;
use super::template::ParsedTemplate;

/// Output mode. Exactly one is selected per invocation.
#[derive(Debug, Default)]
pub enum RenderMode {
    /// `key<TAB>value` lines sorted by key.
    #[default]
    Tabular,
    /// A single JSON object, two-space indented.
    Json,
    /// A user-supplied template.
    Template(ParsedTemplate),
}

impl RenderMode {
    /// Short name used in logs and the JSON error envelope.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Self::Tabular => "tabular",
            Self::Json => "json",
            Self::Template(_) => "template",
        }
    }
}

/// Render `outputs` in the selected mode.
///
/// # Errors
///
/// Returns `OutputsError::Render` if template execution fails. Tabular
/// rendering never fails.
pub fn render(outputs: &OutputMap, mode: &RenderMode) -> Result<Vec<u8>, OutputsError> {
    match mode {
        RenderMode::Tabular => Ok(render_tabular(outputs)),
        RenderMode::Json => render_json(outputs),
        RenderMode::Template(tpl) => tpl.render(outputs).map(String::into_bytes),
    }
}

fn render_tabular(outputs: &OutputMap) -> Vec<u8> {
    let mut buf = Vec::new();
    for (key, value) in outputs {
        buf.extend_from_slice(key.as_bytes());
        buf.push(b'\t');
        buf.extend_from_slice(value.as_bytes());
        buf.push(b'\n');
    }
    buf
}

fn render_json(outputs: &OutputMap) -> Result<Vec<u8>, OutputsError> {
    let mut buf = serde_json::to_vec_pretty(outputs).map_err(|e| OutputsError::Render {
        key: None,
        message: format!("JSON serialization error: {e}"),
    })?;
    buf.push(b'\n');
    Ok(buf)
}
