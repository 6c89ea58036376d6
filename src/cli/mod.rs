/// CLI layer: argument parsing, logging setup, sinks, error output.
pub mod args;
pub mod output;

pub use args::Cli;
pub use output::{Sink, init_logging, write_error};
