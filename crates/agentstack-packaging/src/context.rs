//! Per-project runtime context
//!
//! Everything the runner needs to know about a project's isolated runtime is
//! computed once here and passed around explicitly.

use crate::error::{Error, Result};
use camino::{Utf8Path, Utf8PathBuf};
use std::collections::HashMap;
use std::ffi::OsString;
use std::path::PathBuf;
use tracing::debug;

/// Directory name of the project-local virtual environment
pub const VENV_DIR_NAME: &str = ".venv";

/// Environment variable that overrides uv discovery
pub const UV_BIN_ENV: &str = "AGENTSTACK_UV_BIN";

/// Marks the active virtual environment for uv
pub const VIRTUAL_ENV_KEY: &str = "VIRTUAL_ENV";

/// Records the interpreter that launched the tool
pub const PARENT_INTERPRETER_KEY: &str = "UV_INTERNAL__PARENT_INTERPRETER";

/// Paths and binaries for one project's isolated runtime
#[derive(Debug, Clone)]
pub struct RuntimeContext {
    project_root: Utf8PathBuf,
    uv_bin: PathBuf,
    parent_interpreter: PathBuf,
}

impl RuntimeContext {
    /// Create a context for `project_root` using an explicit uv binary
    ///
    /// Relative roots are made absolute against the current directory.
    pub fn new(project_root: impl AsRef<Utf8Path>, uv_bin: impl Into<PathBuf>) -> Result<Self> {
        let root = project_root.as_ref();
        let absolute = std::path::absolute(root.as_std_path())?;
        let project_root =
            Utf8PathBuf::try_from(absolute).map_err(|e| Error::invalid_path(e.to_string()))?;

        let parent_interpreter = which::which("python3")
            .or_else(|_| which::which("python"))
            .unwrap_or_else(|_| project_root.join(python_path()).into_std_path_buf());

        Ok(Self {
            project_root,
            uv_bin: uv_bin.into(),
            parent_interpreter,
        })
    }

    /// Create a context, locating uv via `AGENTSTACK_UV_BIN` or `PATH`
    pub fn discover(project_root: impl AsRef<Utf8Path>) -> Result<Self> {
        let uv_bin = find_uv_bin()?;
        debug!("Using uv at {}", uv_bin.display());
        Self::new(project_root, uv_bin)
    }

    /// Override the recorded parent interpreter
    pub fn with_parent_interpreter(mut self, interpreter: impl Into<PathBuf>) -> Self {
        self.parent_interpreter = interpreter.into();
        self
    }

    /// Absolute project root; working directory of every child process
    pub fn project_root(&self) -> &Utf8Path {
        &self.project_root
    }

    pub fn uv_bin(&self) -> &std::path::Path {
        &self.uv_bin
    }

    /// uv binary as a command argument
    pub fn uv_arg(&self) -> String {
        self.uv_bin.to_string_lossy().into_owned()
    }

    pub fn parent_interpreter(&self) -> &std::path::Path {
        &self.parent_interpreter
    }

    /// `<root>/.venv`
    pub fn venv_dir(&self) -> Utf8PathBuf {
        self.project_root.join(VENV_DIR_NAME)
    }

    /// `<root>/.venv/bin`, or `Scripts` on Windows
    pub fn venv_bin_dir(&self) -> Utf8PathBuf {
        let bin = if cfg!(windows) { "Scripts" } else { "bin" };
        self.venv_dir().join(bin)
    }

    /// Interpreter path handed to `uv --python`, relative to the project root
    pub fn python_path(&self) -> &'static str {
        python_path()
    }

    pub fn venv_exists(&self) -> bool {
        self.venv_dir().exists()
    }

    /// Ambient environment with the two runtime keys overridden
    pub fn command_env(&self) -> HashMap<OsString, OsString> {
        let mut env: HashMap<OsString, OsString> = std::env::vars_os().collect();
        env.insert(VIRTUAL_ENV_KEY.into(), self.venv_dir().into_string().into());
        env.insert(
            PARENT_INTERPRETER_KEY.into(),
            self.parent_interpreter.clone().into_os_string(),
        );
        env
    }
}

fn python_path() -> &'static str {
    if cfg!(windows) {
        ".venv/Scripts/python.exe"
    } else {
        ".venv/bin/python"
    }
}

/// Locate the uv binary
pub fn find_uv_bin() -> Result<PathBuf> {
    if let Some(explicit) = std::env::var_os(UV_BIN_ENV) {
        if !explicit.is_empty() {
            return Ok(PathBuf::from(explicit));
        }
    }
    which::which("uv").map_err(|_| Error::UvNotFound)
}
