//! Template rendering with Tera for variable substitution.
//!
//! Both file paths and file contents are Tera templates rendered against
//! [`TemplateVars`].

use super::parser::ProjectTemplate;
use crate::error::{Error, Result};
use agentstack_core::Framework;
use camino::{Utf8Component, Utf8Path, Utf8PathBuf};
use chrono::{Datelike, Local};
use serde::Serialize;
use tera::{Context, Tera};
use tracing::debug;

/// Template variables for rendering
#[derive(Debug, Clone, Serialize)]
pub struct TemplateVars {
    pub project_name: String,
    /// Distribution name for pyproject.toml (`my_agent` => `my-agent`)
    pub project_slug: String,
    pub framework: String,
    pub description: String,
    pub author: String,
    pub year: i32,
}

impl TemplateVars {
    /// Create template variables with defaults
    pub fn new(project_name: impl Into<String>, framework: Framework) -> Self {
        let project_name = project_name.into();
        Self {
            project_slug: project_name.replace('_', "-"),
            project_name,
            framework: framework.to_string(),
            description: "An AgentStack project".to_string(),
            author: "Name <Email>".to_string(),
            year: Local::now().year(),
        }
    }

    /// Set author
    pub fn with_author(mut self, author: impl Into<String>) -> Self {
        self.author = author.into();
        self
    }

    /// Set the description written into pyproject.toml and the README
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    fn to_context(&self) -> Result<Context> {
        Context::from_serialize(self).map_err(|e| Error::template_render("<context>", &e))
    }
}

/// Template renderer
#[derive(Debug, Default)]
pub struct TemplateRenderer;

impl TemplateRenderer {
    /// Create a new renderer
    pub fn new() -> Self {
        Self
    }

    /// Render a single template string
    pub fn render_string(&self, template: &str, vars: &TemplateVars) -> Result<String> {
        let context = vars.to_context()?;
        Tera::one_off(template, &context, false).map_err(|e| Error::template_render(template, &e))
    }

    /// Render every file of `template` into a new `target_dir`
    ///
    /// Refuses to touch a directory that already exists. Returns the paths
    /// written, in template order.
    pub fn render_project(
        &self,
        template: &ProjectTemplate,
        vars: &TemplateVars,
        target_dir: &Utf8Path,
    ) -> Result<Vec<Utf8PathBuf>> {
        if target_dir.exists() {
            return Err(Error::project_exists(target_dir.as_str()));
        }

        let context = vars.to_context()?;
        let mut tera = Tera::default();
        tera.autoescape_on(vec![]);
        for (name, source) in &template.files {
            tera.add_raw_template(name, source)
                .map_err(|e| Error::template_render(name, &e))?;
        }

        // Nothing touches the disk until every path and body has rendered
        let mut rendered = Vec::with_capacity(template.files.len());
        for name in template.files.keys() {
            let relative = self.render_string(name, vars)?;
            let full_path = target_dir.join(checked_relative_path(&relative)?);
            let content = tera
                .render(name, &context)
                .map_err(|e| Error::template_render(name, &e))?;
            rendered.push((full_path, content));
        }

        write_files(target_dir, &rendered).inspect_err(|_| {
            if let Err(e) = std::fs::remove_dir_all(target_dir) {
                debug!("Could not clean up {}: {}", target_dir, e);
            }
        })?;

        Ok(rendered.into_iter().map(|(path, _)| path).collect())
    }
}

fn write_files(target_dir: &Utf8Path, files: &[(Utf8PathBuf, String)]) -> Result<()> {
    std::fs::create_dir_all(target_dir)?;
    for (path, content) in files {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, content)?;
        debug!("Rendered {}", path);
    }
    Ok(())
}

/// Rendered paths must stay inside the project directory
fn checked_relative_path(path: &str) -> Result<&Utf8Path> {
    let path = Utf8Path::new(path);
    let escapes = path
        .components()
        .any(|c| !matches!(c, Utf8Component::Normal(_) | Utf8Component::CurDir));

    if path.as_str().is_empty() || escapes {
        return Err(Error::invalid_template(
            path.as_str(),
            "file paths must be relative to the project directory",
        ));
    }
    Ok(path)
}
