//! Project template system for the AgentStack CLI.
//!
//! - `parser`: YAML structure parsing into strongly-typed Rust
//! - `loader`: the [`TemplateRegistry`], from embedded or file sources
//! - `renderer`: render template files with Tera
//!
//! # Template Definition Format
//!
//! ```yaml
//! version: "1.0"
//! templates:
//!   research:
//!     description: "Research agent"
//!     framework: crewai
//!     template_version: 2
//!     default_model: "openai/gpt-4o"
//!     tools: ["perplexity"]
//!     files:
//!       "README.md": |
//!         # {{ project_name }}
//!       "src/{{ project_name }}/__init__.py": ""
//! ```

pub mod loader;
pub mod parser;
pub mod renderer;

pub use loader::TemplateRegistry;
pub use parser::{ProjectTemplate, TemplateConfig};
pub use renderer::{TemplateRenderer, TemplateVars};
