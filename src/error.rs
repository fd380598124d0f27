use std::io;

use crate::config::ConfigError;
use crate::data::{LoadError, RepoError};
use crate::gate::GateError;

/// Error type for course operations.
#[derive(Debug, thiserror::Error)]
pub enum PracticumError {
    /// The submitted test did not pass the acceptance gate.
    #[error(transparent)]
    Gate(#[from] GateError),

    /// Storage failed or a referenced row does not exist.
    #[error(transparent)]
    Repo(#[from] RepoError),

    /// The configuration file could not be used.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// An input file could not be read.
    #[error(transparent)]
    Load(#[from] LoadError),

    /// A form field holds an unacceptable value.
    #[error("invalid input: {0}")]
    Validation(String),

    /// IO error during a terminal session.
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
}

pub type Result<T> = std::result::Result<T, PracticumError>;
