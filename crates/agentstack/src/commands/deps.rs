//! `agentstack add`, `remove` and `upgrade` command handlers

use anyhow::Result;
use camino::Utf8Path;

use agentstack_packaging::uv;

use super::project_context;
use crate::output::{self, SpinnerReporter};

/// Install a package and record it in pyproject.toml
pub async fn add(path: &Utf8Path, package: &str) -> Result<()> {
    let ctx = project_context(path)?;

    let reporter = SpinnerReporter::new(&format!("Installing {}...", package));
    uv::install(&ctx, package, &reporter).await?;
    reporter.finish();

    output::success(&format!("Added {}", package));
    Ok(())
}

/// Uninstall a package
pub async fn remove(path: &Utf8Path, package: &str) -> Result<()> {
    let ctx = project_context(path)?;

    let reporter = SpinnerReporter::new(&format!("Removing {}...", package));
    uv::remove(&ctx, package, &reporter).await?;
    reporter.finish();

    output::success(&format!("Removed {}", package));
    Ok(())
}

/// Upgrade a package to its latest allowed version
pub async fn upgrade(path: &Utf8Path, package: &str) -> Result<()> {
    let ctx = project_context(path)?;

    let reporter = SpinnerReporter::new(&format!("Upgrading {}...", package));
    uv::upgrade(&ctx, package, &reporter).await?;
    reporter.finish();

    output::success(&format!("Upgraded {}", package));
    Ok(())
}
