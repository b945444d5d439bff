//! YAML template parsing and structure definitions.
//!
//! Parses agent-templates.yaml into strongly-typed Rust structures.

use crate::error::{Error, Result};
use agentstack_core::{resolve_framework, Framework};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Complete template configuration from YAML
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TemplateConfig {
    pub version: String,
    pub templates: BTreeMap<String, ProjectTemplate>,
}

/// Individual project template definition
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectTemplate {
    pub description: String,
    /// Framework name or alias the template is written for
    pub framework: String,
    #[serde(default = "default_template_version")]
    pub template_version: u32,
    #[serde(default)]
    pub default_model: Option<String>,
    #[serde(default)]
    pub tools: Vec<String>,
    /// Relative path => Tera source; paths may contain Tera expressions too
    #[serde(default)]
    pub files: BTreeMap<String, String>,
}

fn default_template_version() -> u32 {
    1
}

impl ProjectTemplate {
    /// Resolve the declared framework to a supported one
    pub fn framework(&self) -> Result<Framework> {
        Ok(resolve_framework(&self.framework)?)
    }
}

impl TemplateConfig {
    /// Parse template configuration from YAML string
    ///
    /// Every template must name a supported framework.
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        let config: TemplateConfig = serde_yaml_ng::from_str(yaml)?;

        for (name, template) in &config.templates {
            template
                .framework()
                .map_err(|e| Error::invalid_template(name, e.to_string()))?;
        }

        Ok(config)
    }

    /// Get a template by name
    pub fn get_template(&self, name: &str) -> Option<&ProjectTemplate> {
        self.templates.get(name)
    }

    /// Template names in sorted order
    pub fn template_names(&self) -> Vec<&str> {
        self.templates.keys().map(String::as_str).collect()
    }
}
