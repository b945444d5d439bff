//! `agentstack install` command handler

use anyhow::Result;
use camino::Utf8Path;

use agentstack_packaging::uv::{self, DEFAULT_PYTHON_VERSION};

use super::project_context;
use crate::output::{self, SpinnerReporter};

/// Create the virtual environment if needed and install the project
pub async fn run(path: &Utf8Path) -> Result<()> {
    let ctx = project_context(path)?;

    let reporter = SpinnerReporter::new("Installing dependencies...");
    uv::create_venv(&ctx, DEFAULT_PYTHON_VERSION, &reporter).await?;
    uv::install_project(&ctx, &reporter).await?;
    reporter.finish();

    output::success("Project dependencies are installed");
    Ok(())
}
