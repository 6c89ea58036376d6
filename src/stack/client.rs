/// `StackLookup` backed by the AWS CloudFormation `DescribeStacks` API.
use async_trait::async_trait;
use aws_config::BehaviorVersion;
use aws_sdk_cloudformation::Client;
use aws_sdk_cloudformation::config::Region;
use aws_sdk_cloudformation::error::DisplayErrorContext;
use aws_sdk_cloudformation::types::Output;
use tracing::debug;

use super::errors::LookupError;
use super::{StackLookup, exactly_one};
use crate::outputs::OutputPair;

/// Overrides for the AWS shared config chain.
#[derive(Debug, Clone, Default)]
pub struct ClientOptions {
    /// Region; falls back to the environment/profile default.
    pub region: Option<String>,
    /// Named profile from the shared credentials files.
    pub profile: Option<String>,
}

/// CloudFormation client wrapper.
#[derive(Debug, Clone)]
pub struct CloudFormationLookup {
    client: Client,
}

impl CloudFormationLookup {
    /// Load AWS config (credentials, region) and build a client.
    ///
    /// Credentials are resolved lazily, so failures surface from
    /// [`StackLookup::describe`].
    pub async fn from_env(opts: &ClientOptions) -> Self {
        let mut loader = aws_config::defaults(BehaviorVersion::latest());
        if let Some(region) = &opts.region {
            loader = loader.region(Region::new(region.clone()));
        }
        if let Some(profile) = &opts.profile {
            loader = loader.profile_name(profile);
        }
        let sdk_config = loader.load().await;
        debug!(region = ?sdk_config.region(), "loaded AWS config");
        Self {
            client: Client::new(&sdk_config),
        }
    }
}

#[async_trait]
impl StackLookup for CloudFormationLookup {
    async fn describe(&self, stack: &str) -> Result<Vec<OutputPair>, LookupError> {
        let resp = self
            .client
            .describe_stacks()
            .stack_name(stack)
            .send()
            .await
            .map_err(|e| LookupError::Sdk(DisplayErrorContext(&e).to_string()))?;

        let found = exactly_one(resp.stacks().iter().collect::<Vec<_>>())?;
        debug!(
            stack = found.stack_name().unwrap_or_default(),
            outputs = found.outputs().len(),
            "described stack"
        );
        Ok(found.outputs().iter().map(to_pair).collect())
    }
}

fn to_pair(output: &Output) -> OutputPair {
    OutputPair {
        key: output.output_key().map(str::to_owned),
        value: output.output_value().map(str::to_owned),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_to_pair_complete() {
        let output = Output::builder()
            .output_key("BucketName")
            .output_value("my-bucket")
            .description("ignored")
            .build();
        assert_eq!(to_pair(&output), OutputPair::new("BucketName", "my-bucket"));
    }

    #[test]
    fn test_to_pair_missing_value() {
        let output = Output::builder().output_key("Orphan").build();
        let pair = to_pair(&output);
        assert_eq!(pair.key.as_deref(), Some("Orphan"));
        assert!(pair.value.is_none());
    }
}
