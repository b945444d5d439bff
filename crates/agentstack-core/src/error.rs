//! Error types for agentstack-core

use thiserror::Error;

/// Result type alias using agentstack-core's Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Core error types for AgentStack
#[derive(Error, Debug)]
pub enum Error {
    /// The directory does not contain an agentstack.json
    #[error("Not an AgentStack project: no agentstack.json found in {path}")]
    NotAProject { path: String },

    /// Invalid configuration contents
    #[error("Invalid configuration: {message}")]
    InvalidConfig { message: String },

    /// Framework is not one we can generate code for
    #[error("Unsupported framework: {framework}. Supported frameworks: {supported}")]
    UnsupportedFramework {
        framework: String,
        supported: String,
    },

    /// User input failed validation
    #[error("{message}")]
    Validation { message: String },

    /// Model catalog could not be loaded
    #[error("Model catalog error: {message}")]
    Catalog { message: String },

    /// JSON parsing error
    #[error("JSON parsing error: {0}")]
    JsonParse(#[from] serde_json::Error),

    /// YAML parsing error
    #[error("YAML parsing error: {0}")]
    YamlParse(#[from] serde_yaml_ng::Error),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Create a not-a-project error
    pub fn not_a_project(path: impl Into<String>) -> Self {
        Self::NotAProject { path: path.into() }
    }

    /// Create an invalid config error
    pub fn invalid_config(message: impl Into<String>) -> Self {
        Self::InvalidConfig {
            message: message.into(),
        }
    }

    /// Create an unsupported framework error
    pub fn unsupported_framework(
        framework: impl Into<String>,
        supported: impl Into<String>,
    ) -> Self {
        Self::UnsupportedFramework {
            framework: framework.into(),
            supported: supported.into(),
        }
    }

    /// Create a validation error
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    /// Create a catalog error
    pub fn catalog(message: impl Into<String>) -> Self {
        Self::Catalog {
            message: message.into(),
        }
    }
}
