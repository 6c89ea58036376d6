/// Errors from the CloudFormation lookup layer.
use thiserror::Error;

/// Typed errors from the stack lookup.
#[derive(Debug, Error)]
pub enum LookupError {
    /// The describe call did not return exactly one stack.
    #[error("got results for {count} stacks, want 1")]
    StackCount {
        /// Number of stacks in the response.
        count: usize,
    },

    /// The AWS SDK call failed (credentials, network, unknown stack, ...).
    #[error("{0}")]
    Sdk(String),
}
