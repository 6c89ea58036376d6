/// Validated run configuration. Built before any remote call.
use std::io;
use std::path::Path;

use tracing::debug;

use crate::cli::output::timer;
use crate::cli::{Cli, Sink};
use crate::outputs::{OutputsError, ParsedTemplate, RenderMode};
use crate::stack::ClientOptions;

/// Everything one invocation needs, with the template already parsed.
#[derive(Debug)]
pub struct RunConfig {
    /// Stack name or ARN, non-empty.
    pub stack: String,
    /// Selected output mode.
    pub mode: RenderMode,
    /// Destination for the rendered bytes.
    pub sink: Sink,
    /// AWS client overrides.
    pub client: ClientOptions,
}

impl RunConfig {
    /// Validate CLI arguments, reading the template from disk.
    ///
    /// # Errors
    ///
    /// See [`RunConfig::from_cli_with`].
    pub fn from_cli(cli: Cli) -> Result<Self, OutputsError> {
        Self::from_cli_with(cli, |path| std::fs::read_to_string(path))
    }

    /// Validate CLI arguments with a custom template reader.
    ///
    /// # Errors
    ///
    /// Returns `OutputsError::Config` for an empty stack or `--json` combined
    /// with `--template`, and `OutputsError::TemplateParse` if the template
    /// cannot be read or parsed.
    pub fn from_cli_with<F>(cli: Cli, read_template: F) -> Result<Self, OutputsError>
    where
        F: FnOnce(&Path) -> io::Result<String>,
    {
        if cli.stack.trim().is_empty() {
            return Err(OutputsError::config("stack name must be set"));
        }

        let mode = match (&cli.template, cli.json) {
            (Some(_), true) => {
                return Err(OutputsError::config(
                    "--json and --template cannot be set at the same time",
                ));
            }
            (Some(path), false) => RenderMode::Template(load_template(path, read_template)?),
            (None, true) => RenderMode::Json,
            (None, false) => RenderMode::Tabular,
        };
        debug!(stack = %cli.stack, mode = mode.name(), "validated arguments");

        Ok(Self {
            stack: cli.stack,
            mode,
            sink: Sink::from_path(cli.output),
            client: ClientOptions {
                region: cli.region,
                profile: cli.profile,
            },
        })
    }
}

fn load_template<F>(path: &Path, read_template: F) -> Result<ParsedTemplate, OutputsError>
where
    F: FnOnce(&Path) -> io::Result<String>,
{
    let _t = timer("parse_template");
    let name = path.display().to_string();
    let source = read_template(path).map_err(|e| OutputsError::TemplateParse {
        name: name.clone(),
        message: e.to_string(),
    })?;
    let tpl = ParsedTemplate::parse(name, source)?;
    debug!(template = tpl.name(), "parsed template");
    Ok(tpl)
}
