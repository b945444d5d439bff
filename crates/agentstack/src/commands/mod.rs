//! CLI command implementations

pub mod deps;
pub mod init;
pub mod install;
pub mod model;
pub mod templates;
pub mod undo;

use agentstack_core::assert_project;
use agentstack_packaging::RuntimeContext;
use anyhow::Result;
use camino::Utf8Path;

/// Runtime context for an existing project at `path`
pub(crate) fn project_context(path: &Utf8Path) -> Result<RuntimeContext> {
    assert_project(path)?;
    Ok(RuntimeContext::discover(path)?)
}
