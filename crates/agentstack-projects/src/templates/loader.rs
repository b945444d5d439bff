//! Template loading from embedded and runtime YAML files.
//!
//! Loads project templates from:
//! - Embedded agent-templates.yaml (compiled into binary)
//! - Runtime YAML files (for testing/development)

use super::parser::{ProjectTemplate, TemplateConfig};
use crate::error::{Error, Result};
use camino::Utf8Path;
use tracing::debug;

// Path is relative to this file
const EMBEDDED_YAML: &str = include_str!("../../templates/agent-templates.yaml");

/// Named project templates available to `init`
#[derive(Debug, Clone)]
pub struct TemplateRegistry {
    config: TemplateConfig,
}

impl TemplateRegistry {
    /// Load templates from embedded resources
    pub fn from_embedded() -> Result<Self> {
        Self::from_yaml(EMBEDDED_YAML)
    }

    /// Load templates from a file path (for testing/development)
    pub fn from_file(path: &Utf8Path) -> Result<Self> {
        debug!("Loading templates from {}", path);
        let yaml = std::fs::read_to_string(path)?;
        Self::from_yaml(&yaml)
    }

    /// Load templates from YAML string
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        let config = TemplateConfig::from_yaml(yaml)?;
        Ok(Self { config })
    }

    /// Get a template by name
    pub fn get(&self, name: &str) -> Result<&ProjectTemplate> {
        self.config
            .get_template(name)
            .ok_or_else(|| Error::template_not_found(name, self.names().join(", ")))
    }

    /// Template names in sorted order
    pub fn names(&self) -> Vec<&str> {
        self.config.template_names()
    }

    /// Every template with its name, sorted by name
    pub fn all(&self) -> impl Iterator<Item = (&str, &ProjectTemplate)> {
        self.config
            .templates
            .iter()
            .map(|(name, template)| (name.as_str(), template))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const YAML: &str = r#"
version: "1.0"
templates:
  research:
    description: "Research assistant"
    framework: crewai
    default_model: "openai/gpt-4o"
    tools: ["perplexity"]
  empty:
    description: "Empty project"
    framework: langgraph
"#;

    #[test]
    fn test_from_yaml() {
        let registry = TemplateRegistry::from_yaml(YAML).unwrap();
        assert_eq!(registry.names(), vec!["empty", "research"]);

        let research = registry.get("research").unwrap();
        assert_eq!(research.default_model.as_deref(), Some("openai/gpt-4o"));
        assert_eq!(research.tools, vec!["perplexity"]);
    }

    #[test]
    fn test_get_unknown_lists_available() {
        let registry = TemplateRegistry::from_yaml(YAML).unwrap();
        let err = registry.get("nope").unwrap_err();
        assert!(err.to_string().contains("empty, research"));
    }

    #[test]
    fn test_all_is_sorted() {
        let registry = TemplateRegistry::from_yaml(YAML).unwrap();
        let names: Vec<&str> = registry.all().map(|(name, _)| name).collect();
        assert_eq!(names, vec!["empty", "research"]);
    }

    #[test]
    fn test_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = Utf8Path::from_path(dir.path()).unwrap().join("templates.yaml");
        std::fs::write(&path, YAML).unwrap();

        let registry = TemplateRegistry::from_file(&path).unwrap();
        assert!(registry.get("empty").is_ok());
    }
}
