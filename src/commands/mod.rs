/// Orchestration: describe the stack, collect, render, write.
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

use crate::cli::output::timer;
use crate::config::RunConfig;
use crate::outputs::{OutputsError, collect, render};
use crate::stack::StackLookup;

/// Run one invocation against an already validated config.
///
/// The lookup is raced against `cancel`; nothing is rendered or written
/// unless it completes.
///
/// # Errors
///
/// Returns `OutputsError` on lookup, render, or sink failure, or
/// `OutputsError::Cancelled` if `cancel` fires first.
pub async fn run<L>(
    config: &RunConfig,
    lookup: &L,
    cancel: &CancellationToken,
) -> Result<(), OutputsError>
where
    L: StackLookup + Sync + ?Sized,
{
    let t_describe = timer("describe_stacks");
    let pairs = tokio::select! {
        biased;
        () = cancel.cancelled() => return Err(OutputsError::Cancelled),
        res = lookup.describe(&config.stack) => res?,
    };
    drop(t_describe);

    let outputs = collect(pairs);
    info!(stack = %config.stack, outputs = outputs.len(), "collected stack outputs");

    let t_render = timer("render");
    let bytes = render(&outputs, &config.mode)?;
    drop(t_render);
    debug!(mode = config.mode.name(), bytes = bytes.len(), "rendered");

    let _t_write = timer("write_sink");
    config.sink.write(&bytes)
}
