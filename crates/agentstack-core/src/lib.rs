//! # agentstack-core
//!
//! Core library for the AgentStack CLI providing:
//! - Project configuration file handling (agentstack.json)
//! - Supported agent frameworks and their aliases
//! - The model catalog offered by the interactive model picker
//! - Input validation helpers shared by the prompts

pub mod config;
pub mod error;
pub mod frameworks;
pub mod providers;
pub mod validation;

pub use config::{assert_project, ConfigFile, CONFIG_FILENAME};
pub use error::{Error, Result};
pub use frameworks::{resolve_framework, Framework};
pub use validation::{is_snake_case, parse_insertion_point, InsertionPoint};
