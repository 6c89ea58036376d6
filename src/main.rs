#![deny(clippy::all, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
//! cfn-outputs — print AWS CloudFormation stack outputs.

mod cli;
mod commands;
mod config;
mod outputs;
mod stack;
mod types;

use clap::Parser;
use tokio_util::sync::CancellationToken;
use tracing::debug;

use cli::{Cli, init_logging, write_error};
use config::RunConfig;
use outputs::OutputsError;
use stack::CloudFormationLookup;
use types::ErrorOutput;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);
    let json_errors = cli.json;

    if let Err(err) = execute(cli).await {
        let error_output = ErrorOutput::from_outputs_error(&err);
        write_error(&error_output, json_errors);
        std::process::exit(err.exit_code());
    }
}

async fn execute(cli: Cli) -> Result<(), OutputsError> {
    // Validation and template parsing happen before any AWS call.
    let config = RunConfig::from_cli(cli)?;

    let cancel = CancellationToken::new();
    let on_interrupt = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            debug!("interrupt received");
            on_interrupt.cancel();
        }
    });

    let lookup = CloudFormationLookup::from_env(&config.client).await;
    commands::run(&config, &lookup, &cancel).await
}
