//! Domain-specific error types for the link engine.
//!
//! Library code returns these typed errors; the command layer converts them
//! to [`anyhow::Error`] via `?`.
//!
//! Filesystem problems met while reconciling an individual link are *not*
//! errors: they are reported as warnings and fold into the boolean batch
//! result.  Only configuration problems and handler contract violations
//! surface here.

use thiserror::Error;

/// Errors that arise while loading a configuration file.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// The config file could not be read.
    #[error("IO error reading config file {path}: {source}")]
    Io {
        /// Path to the file that could not be read.
        path: String,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// The config file is not valid TOML / JSON.
    #[error("Invalid syntax in {file}: {message}")]
    InvalidSyntax {
        /// Path to the offending file.
        file: String,
        /// Parser diagnostic.
        message: String,
    },

    /// The document parsed but does not describe a list of directives.
    #[error("Invalid configuration structure: {0}")]
    InvalidStructure(String),
}

/// Errors raised by directive handlers.
#[derive(Error, Debug)]
pub enum DirectiveError {
    /// A handler was invoked with a directive it does not own.
    #[error("handler '{handler}' cannot handle directive '{directive}'")]
    Unsupported {
        /// Name of the handler that was invoked.
        handler: String,
        /// Directive the caller tried to route to it.
        directive: String,
    },

    /// The directive's data does not have the shape the handler expects.
    #[error("invalid data for directive '{directive}': {message}")]
    InvalidData {
        /// Directive whose data was rejected.
        directive: String,
        /// Human-readable explanation.
        message: String,
    },
}
