//! Git repository helpers for generated projects
//!
//! Everything shells out to the `git` binary. A missing binary surfaces as
//! [`Error::GitNotFound`] so callers can treat version control as optional.

use crate::error::{Error, Result};
use camino::Utf8Path;
use std::io::ErrorKind;
use tokio::process::Command;
use tracing::{debug, info};

/// Identity used for commits when the user has not configured one
const FALLBACK_USER_NAME: &str = "AgentStack";
const FALLBACK_USER_EMAIL: &str = "noreply@agentstack.sh";

const DEFAULT_GITIGNORE: &str = include_str!("../templates/default.gitignore");

/// Initialize a git repository at `path`
///
/// Does nothing when `path` already has a `.git` directory. Writes a
/// default `.gitignore` unless the project brought its own.
pub async fn init(path: &Utf8Path) -> Result<()> {
    check_git_available().await?;

    if !path.is_dir() {
        return Err(Error::repo_not_found(path.as_str()));
    }

    if path.join(".git").exists() {
        debug!("Git repository already exists at: {}", path);
        return Ok(());
    }

    info!("Initializing git repository at: {}", path);
    git(path, &["init"]).await?;

    let gitignore_path = path.join(".gitignore");
    if !gitignore_path.exists() {
        tokio::fs::write(&gitignore_path, DEFAULT_GITIGNORE).await?;
    }

    Ok(())
}

/// Stage everything and commit it
///
/// Returns `false` without committing when the working tree is clean.
pub async fn commit_all(path: &Utf8Path, message: &str) -> Result<bool> {
    ensure_repo(path)?;

    if get_uncommitted_files(path).await?.is_empty() {
        debug!("Nothing to commit in {}", path);
        return Ok(false);
    }

    git(path, &["add", "--all"]).await?;

    let mut args = identity_overrides(path).await?;
    args.extend(["commit", "-m", message].map(String::from));
    git(path, &args).await?;

    info!("Committed: {}", message);
    Ok(true)
}

/// Paths with staged, unstaged or untracked changes
pub async fn get_uncommitted_files(path: &Utf8Path) -> Result<Vec<String>> {
    ensure_repo(path)?;
    let stdout = git(path, &["status", "--porcelain"]).await?;
    Ok(parse_porcelain(&stdout))
}

/// Undo the most recent commit
///
/// `hard` resets the branch and working tree to the previous commit and
/// discards uncommitted changes. Otherwise a new commit reverting the last
/// one is created and history is kept.
pub async fn revert_last_commit(path: &Utf8Path, hard: bool) -> Result<()> {
    ensure_repo(path)?;

    if hard {
        git(path, &["reset", "--hard", "HEAD~1"]).await?;
    } else {
        let mut args = identity_overrides(path).await?;
        args.extend(["revert", "--no-edit", "HEAD"].map(String::from));
        git(path, &args).await?;
    }

    info!("Reverted last commit");
    Ok(())
}

/// Whether a usable `git` binary is on PATH
pub async fn is_git_available() -> bool {
    check_git_available().await.is_ok()
}

async fn check_git_available() -> Result<()> {
    let output = Command::new("git")
        .arg("--version")
        .output()
        .await
        .map_err(|_| Error::GitNotFound)?;

    if !output.status.success() {
        return Err(Error::GitNotFound);
    }

    Ok(())
}

fn ensure_repo(path: &Utf8Path) -> Result<()> {
    if path.join(".git").exists() {
        Ok(())
    } else {
        Err(Error::repo_not_found(path.as_str()))
    }
}

/// `-c user.*` flags for whatever identity git does not already know
async fn identity_overrides(path: &Utf8Path) -> Result<Vec<String>> {
    let mut args = Vec::new();
    for (key, fallback) in [
        ("user.name", FALLBACK_USER_NAME),
        ("user.email", FALLBACK_USER_EMAIL),
    ] {
        if get_config_value(path, key).await?.is_none() {
            args.push("-c".to_string());
            args.push(format!("{}={}", key, fallback));
        }
    }
    Ok(args)
}

async fn get_config_value(path: &Utf8Path, key: &str) -> Result<Option<String>> {
    let output = Command::new("git")
        .current_dir(path)
        .args(["config", "--get", key])
        .output()
        .await
        .map_err(spawn_error)?;

    // exit code 1 means the key is unset
    if !output.status.success() {
        return Ok(None);
    }

    let value = String::from_utf8_lossy(&output.stdout).trim().to_string();
    Ok((!value.is_empty()).then_some(value))
}

/// Run git in `path`, returning stdout
async fn git<S: AsRef<str>>(path: &Utf8Path, args: &[S]) -> Result<String> {
    let args: Vec<&str> = args.iter().map(|a| a.as_ref()).collect();
    debug!("Running: git {}", args.join(" "));

    let output = Command::new("git")
        .current_dir(path)
        .args(&args)
        .output()
        .await
        .map_err(spawn_error)?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        return Err(Error::git_operation(format!(
            "git {} failed: {}",
            subcommand(&args),
            stderr.trim()
        )));
    }

    Ok(String::from_utf8_lossy(&output.stdout).into_owned())
}

/// First argument that is not a global option, skipping `-c` values
fn subcommand<'a>(args: &[&'a str]) -> &'a str {
    let mut iter = args.iter();
    while let Some(arg) = iter.next() {
        match *arg {
            "-c" | "-C" => {
                iter.next();
            }
            a if a.starts_with('-') => {}
            a => return a,
        }
    }
    ""
}

fn spawn_error(e: std::io::Error) -> Error {
    if e.kind() == ErrorKind::NotFound {
        Error::GitNotFound
    } else {
        Error::Io(e)
    }
}

/// Extract paths from `git status --porcelain` output
///
/// Renames report the new path. Quoted paths are returned as printed.
fn parse_porcelain(stdout: &str) -> Vec<String> {
    stdout
        .lines()
        .filter(|line| line.len() > 3)
        .map(|line| {
            let entry = &line[3..];
            match entry.split_once(" -> ") {
                Some((_, new)) => new.to_string(),
                None => entry.to_string(),
            }
        })
        .collect()
}
