//! `agentstack undo` command handler

use anyhow::Result;
use camino::Utf8Path;
use dialoguer::Confirm;

use agentstack_core::assert_project;
use agentstack_projects::repo;

use crate::output;

/// Undo the last committed change to the project
///
/// Uncommitted changes are listed first and only discarded after the user
/// agrees.
pub async fn run(path: &Utf8Path) -> Result<()> {
    assert_project(path)?;

    let changed_files = repo::get_uncommitted_files(path).await?;
    if !changed_files.is_empty() {
        output::warning("There are uncommitted changes that may be overwritten.");
        for changed in &changed_files {
            println!(" - {}", changed);
        }

        let should_continue = Confirm::new()
            .with_prompt("Do you want to continue?")
            .default(false)
            .interact()?;

        if !should_continue {
            output::info("Cancelled");
            return Ok(());
        }
    }

    repo::revert_last_commit(path, true).await?;
    output::success("Reverted the last change");
    Ok(())
}
