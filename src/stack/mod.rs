/// Remote stack lookup: the CloudFormation client and the trait it sits behind.
pub mod client;
pub mod errors;

use async_trait::async_trait;

use crate::outputs::OutputPair;

pub use client::{ClientOptions, CloudFormationLookup};
pub use errors::LookupError;

/// Fetches the raw outputs of exactly one stack.
#[async_trait]
pub trait StackLookup {
    /// Describe `stack` (name or ARN) and return its outputs in provider order.
    ///
    /// # Errors
    ///
    /// Returns `LookupError` if the call fails or does not match exactly one stack.
    async fn describe(&self, stack: &str) -> Result<Vec<OutputPair>, LookupError>;
}

/// Take the only element of a describe response.
///
/// # Errors
///
/// Returns `LookupError::StackCount` for zero or several matches; the two
/// cases are reported the same way.
pub fn exactly_one<T>(stacks: Vec<T>) -> Result<T, LookupError> {
    let count = stacks.len();
    let mut iter = stacks.into_iter();
    match (iter.next(), iter.next()) {
        (Some(stack), None) => Ok(stack),
        _ => Err(LookupError::StackCount { count }),
    }
}
