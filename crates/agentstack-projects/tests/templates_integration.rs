//! Integration tests for the template system
//!
//! These tests verify the complete template workflow from loading to rendering.

use agentstack_core::Framework;
use agentstack_projects::templates::{TemplateRegistry, TemplateRenderer, TemplateVars};
use agentstack_projects::Error;
use camino::Utf8PathBuf;
use tempfile::TempDir;

fn target_in(dir: &TempDir, name: &str) -> Utf8PathBuf {
    Utf8PathBuf::try_from(dir.path().join(name)).unwrap()
}

#[test]
fn test_load_embedded_templates() {
    let registry = TemplateRegistry::from_embedded().expect("Failed to load embedded templates");
    let names = registry.names();

    assert!(names.contains(&"empty"));
    assert!(names.contains(&"research"));
    assert!(names.contains(&"content_creator"));

    let mut sorted = names.clone();
    sorted.sort();
    assert_eq!(names, sorted);
}

#[test]
fn test_embedded_templates_are_complete() {
    let registry = TemplateRegistry::from_embedded().unwrap();

    for (name, template) in registry.all() {
        assert!(!template.description.is_empty(), "{} has no description", name);
        assert!(template.framework().is_ok(), "{} has a bad framework", name);
        assert!(
            template.files.contains_key("pyproject.toml"),
            "{} has no pyproject.toml",
            name
        );
    }
}

#[test]
fn test_every_embedded_template_renders() {
    let registry = TemplateRegistry::from_embedded().unwrap();
    let renderer = TemplateRenderer::new();
    let temp_dir = TempDir::new().unwrap();

    for (name, template) in registry.all() {
        let target = target_in(&temp_dir, name);
        let vars = TemplateVars::new("test_project", template.framework().unwrap());

        let created = renderer
            .render_project(template, &vars, &target)
            .unwrap_or_else(|e| panic!("{} failed to render: {}", name, e));

        assert_eq!(created.len(), template.files.len());
        assert!(target.join("src/main.py").exists());

        let pyproject = std::fs::read_to_string(target.join("pyproject.toml")).unwrap();
        assert!(pyproject.contains("name = \"test-project\""));
        assert!(pyproject.contains("agentstack[crewai]"));
    }
}

#[test]
fn test_research_template_metadata() {
    let registry = TemplateRegistry::from_embedded().unwrap();
    let research = registry.get("research").unwrap();

    assert_eq!(research.framework().unwrap(), Framework::Crewai);
    assert_eq!(research.default_model.as_deref(), Some("openai/gpt-4o"));
    assert!(research.tools.contains(&"perplexity".to_string()));
}

#[test]
fn test_single_brace_placeholders_survive_rendering() {
    let registry = TemplateRegistry::from_embedded().unwrap();
    let template = registry.get("research").unwrap();
    let temp_dir = TempDir::new().unwrap();
    let target = target_in(&temp_dir, "researcher");
    let vars = TemplateVars::new("researcher", Framework::Crewai);

    TemplateRenderer::new()
        .render_project(template, &vars, &target)
        .unwrap();

    let tasks = std::fs::read_to_string(target.join("src/config/tasks.yaml")).unwrap();
    assert!(tasks.contains("\"{query}\""));
}

#[test]
fn test_unknown_template() {
    let registry = TemplateRegistry::from_embedded().unwrap();
    let err = registry.get("does_not_exist").unwrap_err();

    assert!(matches!(err, Error::TemplateNotFound { .. }));
    assert!(err.to_string().contains("research"));
}
