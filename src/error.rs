//! Error handling for the Ymir application.
//! Defines the error type and result alias used throughout the crate.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

use crate::materializer::Step;

/// Custom error types for Ymir operations.
///
/// Argument and validation errors are raised before anything touches the
/// filesystem. Directory and file errors carry the step that failed and the
/// path that was attempted.
#[derive(Error, Debug)]
pub enum Error {
    /// Malformed or insufficient command-line input
    #[error("Argument error: {0}")]
    ArgumentError(String),

    /// The user asked for the usage text; carries the rendered help
    #[error("{0}")]
    HelpRequested(String),

    /// The project configuration is not usable
    #[error("Validation error: {0}.")]
    ValidationError(String),

    /// A required directory could not be created
    #[error("Failed to create the {step} at '{}': {source}.", path.display())]
    DirectoryCreationError { step: Step, path: PathBuf, source: io::Error },

    /// A generated file could not be opened or written
    #[error("Failed to write the {step} at '{}': {source}.", path.display())]
    FileWriteError { step: Step, path: PathBuf, source: io::Error },

    /// Content generation failed
    #[error("Render error: {0}.")]
    RenderError(#[from] minijinja::Error),

    /// The version-control repository could not be initialised
    #[error("Failed to initialise a git repository at '{}': {source}.", path.display())]
    RepositoryError { path: PathBuf, source: git2::Error },

    /// The configuration could not be turned into a render context
    #[error("Serialization error: {0}.")]
    SerializationError(#[from] serde_json::Error),

    /// Interactive input failed
    #[error("Prompt error: {0}.")]
    PromptError(String),

    /// Any other file system failure
    #[error("IO error: {0}.")]
    IoError(#[from] io::Error),
}

/// Where `default_error_handler` reports an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Channel {
    /// Usage text, printed as is
    Stdout,
    /// Printed as `[ERROR]: ...`, logging may not be set up yet
    Stderr,
    /// Logged at error level
    Log,
    /// The materializer already logged it
    Silent,
}

impl Error {
    /// Process exit code for this error. Every error exits with 1, help
    /// included, since help aborts the run without generating anything.
    pub fn exit_code(&self) -> i32 {
        1
    }

    /// Whether the materializer already emitted a diagnostic for this error.
    pub fn is_step_failure(&self) -> bool {
        matches!(
            self,
            Error::DirectoryCreationError { .. }
                | Error::FileWriteError { .. }
                | Error::RepositoryError { .. }
        )
    }

    pub fn channel(&self) -> Channel {
        match self {
            Error::HelpRequested(_) => Channel::Stdout,
            Error::ArgumentError(_) => Channel::Stderr,
            e if e.is_step_failure() => Channel::Silent,
            _ => Channel::Log,
        }
    }
}

/// Convenience type alias for Results with Error as the error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Default error handler that reports the error and exits the program.
///
/// Used for argument errors before the logger exists as well as for run
/// failures, see `Error::channel` for where each error goes.
pub fn default_error_handler(err: Error) -> ! {
    match err.channel() {
        Channel::Stdout => println!("{err}"),
        Channel::Stderr => eprintln!("[ERROR]: {err}"),
        Channel::Log => log::error!("{err}"),
        Channel::Silent => {}
    }
    std::process::exit(err.exit_code());
}
