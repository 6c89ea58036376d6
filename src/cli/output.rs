/// Output plumbing: where rendered bytes go, logging, error reporting.
use std::io::Write;
use std::path::PathBuf;

use tracing::debug;
use tracing_subscriber::EnvFilter;

use crate::outputs::OutputsError;
use crate::types::ErrorOutput;

/// Destination for the rendered bytes.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Sink {
    /// Standard output.
    #[default]
    Stdout,
    /// A file, created or truncated.
    File(PathBuf),
}

impl Sink {
    /// Select a sink from the optional `--output` path.
    #[must_use]
    pub fn from_path(path: Option<PathBuf>) -> Self {
        path.map_or(Self::Stdout, Self::File)
    }

    /// Write the full buffer.
    ///
    /// # Errors
    ///
    /// Returns `OutputsError::Sink` on any I/O failure.
    pub fn write(&self, bytes: &[u8]) -> Result<(), OutputsError> {
        match self {
            Self::Stdout => {
                let stdout = std::io::stdout();
                let mut out = stdout.lock();
                out.write_all(bytes)
                    .and_then(|()| out.flush())
                    .map_err(|source| OutputsError::Sink { path: None, source })
            }
            Self::File(path) => {
                std::fs::write(path, bytes).map_err(|source| OutputsError::Sink {
                    path: Some(path.clone()),
                    source,
                })?;
                debug!(path = %path.display(), bytes = bytes.len(), "wrote output file");
                Ok(())
            }
        }
    }
}

// --- Logging ---

/// Install the stderr `tracing` subscriber.
///
/// `RUST_LOG` wins; otherwise `warn`, or `cfn_outputs=debug` with `verbose`.
pub fn init_logging(verbose: bool) {
    let default = if verbose { "warn,cfn_outputs=debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    // Ignore a second init (tests).
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

// --- Error output ---

/// Write a structured error to stderr.
pub fn write_error(err: &ErrorOutput, json: bool) {
    let stderr = std::io::stderr();
    let mut out = stderr.lock();
    if json {
        let s = serde_json::to_string_pretty(err).unwrap_or_default();
        let _ = writeln!(out, "{s}");
    } else {
        let _ = writeln!(out, "Error: {}", err.error.message);
    }
}

// --- Debug timer ---

/// A RAII timer that logs elapsed milliseconds at debug level on drop.
pub struct DebugTimer {
    label: &'static str,
    start: std::time::Instant,
}

/// Start a named phase timer.
#[must_use]
pub fn timer(label: &'static str) -> DebugTimer {
    DebugTimer {
        label,
        start: std::time::Instant::now(),
    }
}

impl Drop for DebugTimer {
    fn drop(&mut self) {
        let ms = self.start.elapsed().as_secs_f64() * 1000.0;
        debug!(phase = self.label, "{ms:.2}ms");
    }
}
