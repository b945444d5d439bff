//! Error types for agentstack-packaging

use thiserror::Error;

/// Result type alias using agentstack-packaging's Error type
pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    /// uv could not be located
    #[error("uv not found. Install it (https://docs.astral.sh/uv/) or set AGENTSTACK_UV_BIN")]
    UvNotFound,

    /// Command sequence was empty
    #[error("Cannot run an empty command")]
    EmptyCommand,

    /// Child process could not be started
    #[error("Failed to launch {program}: {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    /// Reading a child's output failed
    #[error("Error reading {stream} output: {source}")]
    OutputRead {
        stream: String,
        #[source]
        source: std::io::Error,
    },

    /// A uv operation reported failure
    #[error("{operation} failed")]
    CommandFailed { operation: String },

    /// Project dependencies could not be installed
    #[error("Installation failed: {message}")]
    InstallFailed { message: String },

    /// Package specifier is not a valid requirement
    #[error("Invalid requirement: {requirement}")]
    InvalidRequirement { requirement: String },

    /// Path is not valid UTF-8
    #[error("Invalid path: {path}")]
    InvalidPath { path: String },

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Create a spawn error
    pub fn spawn(program: impl Into<String>, source: std::io::Error) -> Self {
        Self::Spawn {
            program: program.into(),
            source,
        }
    }

    /// Create a command failed error
    pub fn command_failed(operation: impl Into<String>) -> Self {
        Self::CommandFailed {
            operation: operation.into(),
        }
    }

    /// Create an install failed error
    pub fn install_failed(message: impl Into<String>) -> Self {
        Self::InstallFailed {
            message: message.into(),
        }
    }

    /// Create an invalid requirement error
    pub fn invalid_requirement(requirement: impl Into<String>) -> Self {
        Self::InvalidRequirement {
            requirement: requirement.into(),
        }
    }

    /// Create an invalid path error
    pub fn invalid_path(path: impl Into<String>) -> Self {
        Self::InvalidPath { path: path.into() }
    }
}
