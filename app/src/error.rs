//! Application error types.

use std::io;
use std::path::PathBuf;
use thiserror::Error;
use ticket_pool_core::DocumentError;

/// Errors reading or writing a configuration file.
#[derive(Error, Debug)]
pub enum PersistenceError {
    /// The file could not be read or written
    #[error("{path}: {source}")]
    Io {
        /// File involved
        path: PathBuf,
        /// Underlying error
        #[source]
        source: io::Error,
    },

    /// The file contents are not a valid configuration document
    #[error(transparent)]
    Document(#[from] DocumentError),
}

/// Errors that end the console loop.
#[derive(Error, Debug)]
pub enum AppError {
    /// Reading operator input or writing to the console failed
    #[error("Console I/O failed: {0}")]
    Console(#[from] io::Error),
}
