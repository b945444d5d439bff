//! Error types for agentstack-projects

use thiserror::Error;

/// Result type alias using agentstack-projects's Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Scaffolding and repository error types
#[derive(Error, Debug)]
pub enum Error {
    /// Target directory is already taken
    #[error("Project already exists at: {path}")]
    ProjectExists { path: String },

    /// Template not found
    #[error("Template not found: {template}. Available templates: {available}")]
    TemplateNotFound { template: String, available: String },

    /// Template definition is unusable
    #[error("Invalid template '{template}': {message}")]
    InvalidTemplate { template: String, message: String },

    /// Template rendering error
    #[error("Template rendering failed for {file}: {message}")]
    TemplateRender { file: String, message: String },

    /// Git operation failed
    #[error("Git operation failed: {message}")]
    GitOperation { message: String },

    /// Git command not found
    #[error("Git command not found. Please ensure git is installed and in PATH")]
    GitNotFound,

    /// Repository not found
    #[error("Repository not found at: {path}")]
    RepoNotFound { path: String },

    /// YAML parsing error
    #[error("YAML parsing error: {0}")]
    YamlParse(#[from] serde_yaml_ng::Error),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Core library error
    #[error("Core error: {0}")]
    Core(#[from] agentstack_core::Error),
}

impl Error {
    /// Create a project exists error
    pub fn project_exists(path: impl Into<String>) -> Self {
        Self::ProjectExists { path: path.into() }
    }

    /// Create a template not found error
    pub fn template_not_found(template: impl Into<String>, available: impl Into<String>) -> Self {
        Self::TemplateNotFound {
            template: template.into(),
            available: available.into(),
        }
    }

    /// Create an invalid template error
    pub fn invalid_template(template: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidTemplate {
            template: template.into(),
            message: message.into(),
        }
    }

    /// Create a template render error
    ///
    /// Tera hides the useful part of its errors in the source chain, so the
    /// whole chain is flattened into the message.
    pub fn template_render(file: impl Into<String>, err: &tera::Error) -> Self {
        let mut message = err.to_string();
        let mut source = std::error::Error::source(err);
        while let Some(cause) = source {
            message.push_str(": ");
            message.push_str(&cause.to_string());
            source = cause.source();
        }
        Self::TemplateRender {
            file: file.into(),
            message,
        }
    }

    /// Create a git operation error
    pub fn git_operation(message: impl Into<String>) -> Self {
        Self::GitOperation {
            message: message.into(),
        }
    }

    /// Create a repo not found error
    pub fn repo_not_found(path: impl Into<String>) -> Self {
        Self::RepoNotFound { path: path.into() }
    }
}
