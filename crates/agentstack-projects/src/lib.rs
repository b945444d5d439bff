//! # agentstack-projects
//!
//! Project scaffolding library for the AgentStack CLI providing:
//! - Named project templates rendered with Tera
//! - Git helpers used by `init` and `undo`
//!
//! # Examples
//!
//! ```no_run
//! use agentstack_projects::templates::{TemplateRegistry, TemplateRenderer, TemplateVars};
//! use camino::Utf8Path;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let registry = TemplateRegistry::from_embedded()?;
//! let template = registry.get("research")?;
//! let vars = TemplateVars::new("my_agent", template.framework()?);
//!
//! let target = Utf8Path::new("my_agent");
//! TemplateRenderer::new().render_project(template, &vars, target)?;
//!
//! agentstack_projects::repo::init(target).await?;
//! agentstack_projects::repo::commit_all(target, "Initial commit").await?;
//! # Ok(())
//! # }
//! ```

pub mod error;
pub mod repo;
pub mod templates;

pub use error::{Error, Result};

// Re-export template types for convenience
pub use templates::{ProjectTemplate, TemplateRegistry, TemplateRenderer, TemplateVars};
