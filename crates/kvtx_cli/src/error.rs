//! CLI error types.

use kvtx_core::CoreError;
use std::io;
use thiserror::Error;

/// Errors raised by the CLI commands.
#[derive(Debug, Error)]
pub enum CliError {
    /// Store rejected an operation.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// A REPL line could not be parsed.
    #[error("{message}")]
    Usage {
        /// What was wrong with the line.
        message: String,
    },

    /// A value argument was not an integer.
    #[error("invalid integer value '{value}'")]
    InvalidValue {
        /// The offending argument.
        value: String,
    },

    /// The demo observed outcomes that differ from the expected ones.
    #[error("{failed} demo step(s) did not match the expected outcome")]
    ScenarioFailed {
        /// Number of mismatching steps.
        failed: usize,
    },

    /// Reading input or writing output failed.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

impl CliError {
    /// Creates a usage error.
    pub fn usage(message: impl Into<String>) -> Self {
        Self::Usage {
            message: message.into(),
        }
    }
}
