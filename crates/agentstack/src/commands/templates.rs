//! `agentstack templates` command handler

use anyhow::{Context, Result};

use agentstack_projects::TemplateRegistry;

use crate::output;

/// List the embedded project templates
pub fn run() -> Result<()> {
    let registry =
        TemplateRegistry::from_embedded().context("Failed to load embedded templates")?;

    output::header("Available templates");
    for (name, template) in registry.all() {
        output::kv(name, &format!("{} ({})", template.description, template.framework));
    }
    println!();
    output::info("Use one with: agentstack init <name> --template <template>");
    Ok(())
}
