//! Dependency management through the `uv` package manager
//!
//! Every operation is a single uv invocation through [`ProcessRunner`]. uv
//! output is split back into lines and only the useful progress lines are
//! passed to the [`ProgressReporter`].

use crate::context::RuntimeContext;
use crate::error::{Error, Result};
use crate::progress::{ProgressLevel, ProgressReporter};
use crate::runner::{Callbacks, OutputStream, ProcessRunner};
use regex::Regex;
use std::sync::OnceLock;
use tracing::{debug, error};

/// Python version used when creating a new virtual environment
pub const DEFAULT_PYTHON_VERSION: &str = "3.12";

type Classified = Option<(ProgressLevel, String)>;

fn uv_progress_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"^(Resolved|Prepared|Installed|Uninstalled|Audited)")
            .expect("valid uv progress regex")
    })
}

fn venv_progress_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^(Using|Creating)").expect("valid venv progress regex"))
}

fn requirement_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"^\s*([A-Za-z0-9](?:[A-Za-z0-9._-]*[A-Za-z0-9])?)\s*(?:$|[\[(<>=!~;@])")
            .expect("valid requirement regex")
    })
}

/// Keep only uv's summary lines (`Resolved`, `Installed`, ...)
pub fn classify_uv_line(line: &str) -> Classified {
    uv_progress_regex()
        .is_match(line)
        .then(|| (ProgressLevel::Info, line.trim().to_string()))
}

/// Keep venv creation lines (`Using CPython ...`, `Creating virtual environment ...`)
pub fn classify_venv_line(line: &str) -> Classified {
    venv_progress_regex()
        .is_match(line)
        .then(|| (ProgressLevel::Info, line.trim().to_string()))
}

/// Richer classification used while installing a whole project
pub fn classify_install_line(line: &str) -> Classified {
    let trimmed = line.trim();
    if classify_uv_line(line).is_some() {
        return Some((ProgressLevel::Info, trimmed.to_string()));
    }
    if line.contains("Installing") || line.contains("Collecting") {
        return Some((ProgressLevel::Info, format!("📦 {}", trimmed)));
    }
    if line.contains("Successfully") {
        return Some((ProgressLevel::Success, format!("✅ {}", trimmed)));
    }
    let upper = line.to_uppercase();
    if upper.contains("ERROR") || upper.contains("WARNING") {
        return Some((ProgressLevel::Warning, format!("⚠️  {}", trimmed)));
    }
    None
}

/// Extract the distribution name from a requirement specifier
///
/// `requests>=2.0`, `crewai[tools]==0.9` and `pkg ; python_version < "3.9"`
/// yield `requests`, `crewai` and `pkg`.
pub fn requirement_name(requirement: &str) -> Result<String> {
    requirement_regex()
        .captures(requirement)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
        .ok_or_else(|| Error::invalid_requirement(requirement))
}

/// Install a package and add it to pyproject.toml
pub async fn install(
    ctx: &RuntimeContext,
    package: &str,
    reporter: &dyn ProgressReporter,
) -> Result<()> {
    debug!("Installing {}", package);
    let ok = run_uv(
        ctx,
        &["add", "--python", ctx.python_path(), package],
        classify_uv_line,
        |output| report_uv_error(reporter, output),
        reporter,
    )
    .await;

    ok.then_some(())
        .ok_or_else(|| Error::command_failed(format!("Installing {}", package)))
}

/// Install every dependency of the project itself
///
/// A failed install is retried once with `--no-cache`.
pub async fn install_project(ctx: &RuntimeContext, reporter: &dyn ProgressReporter) -> Result<()> {
    let on_error = |output: &str| {
        reporter.report(
            ProgressLevel::Error,
            &format!("❌ Installation error: {}", output.trim()),
        );
    };

    reporter.report(ProgressLevel::Info, "🔍 Resolving dependencies...");
    let python = ctx.python_path();

    let mut ok = run_uv(
        ctx,
        &["pip", "install", "--python", python, "."],
        classify_install_line,
        on_error,
        reporter,
    )
    .await;

    if !ok {
        reporter.report(
            ProgressLevel::Warning,
            "⚠️  Initial installation failed, retrying with --no-cache flag...",
        );
        ok = run_uv(
            ctx,
            &["pip", "install", "--no-cache", "--python", python, "."],
            classify_install_line,
            on_error,
            reporter,
        )
        .await;
    }

    if !ok {
        let err = Error::install_failed("Installation failed even with --no-cache");
        error!("❌ {}", err);
        return Err(err);
    }

    reporter.report(
        ProgressLevel::Success,
        "✨ All dependencies installed successfully!",
    );
    Ok(())
}

/// Uninstall a package; any version constraint in `package` is ignored
pub async fn remove(
    ctx: &RuntimeContext,
    package: &str,
    reporter: &dyn ProgressReporter,
) -> Result<()> {
    let name = requirement_name(package)?;
    reporter.report(ProgressLevel::Info, &format!("Uninstalling {}", name));

    // TODO: also drop sub-dependencies nothing else requires
    let ok = run_uv(
        ctx,
        &["remove", "--python", ctx.python_path(), &name],
        classify_uv_line,
        |output| report_uv_error(reporter, output),
        reporter,
    )
    .await;

    ok.then_some(())
        .ok_or_else(|| Error::command_failed(format!("Uninstalling {}", name)))
}

/// Upgrade a package in the virtual environment
pub async fn upgrade(
    ctx: &RuntimeContext,
    package: &str,
    reporter: &dyn ProgressReporter,
) -> Result<()> {
    reporter.report(ProgressLevel::Info, &format!("Upgrading {}", package));

    let ok = run_uv(
        ctx,
        &["pip", "install", "-U", "--python", ctx.python_path(), package],
        classify_uv_line,
        |output| report_uv_error(reporter, output),
        reporter,
    )
    .await;

    ok.then_some(())
        .ok_or_else(|| Error::command_failed(format!("Upgrading {}", package)))
}

/// Create the project's virtual environment unless it already exists
pub async fn create_venv(
    ctx: &RuntimeContext,
    python_version: &str,
    reporter: &dyn ProgressReporter,
) -> Result<()> {
    if ctx.venv_exists() {
        debug!("Virtual environment already exists at {}", ctx.venv_dir());
        return Ok(());
    }

    let ok = run_uv(
        ctx,
        &["venv", "--python", python_version],
        classify_venv_line,
        |output| report_uv_error(reporter, output),
        reporter,
    )
    .await;

    ok.then_some(())
        .ok_or_else(|| Error::command_failed("Creating virtual environment"))
}

fn report_uv_error(reporter: &dyn ProgressReporter, output: &str) {
    reporter.report(
        ProgressLevel::Error,
        &format!("uv: [error]\n {}", output.trim()),
    );
}

/// Run uv with `args`, reporting classified output lines
async fn run_uv<C, E>(
    ctx: &RuntimeContext,
    args: &[&str],
    classify: C,
    on_error: E,
    reporter: &dyn ProgressReporter,
) -> bool
where
    C: Fn(&str) -> Classified,
    E: FnMut(&str),
{
    let mut command = vec![ctx.uv_arg()];
    command.extend(args.iter().map(|a| a.to_string()));

    let mut lines = LineBuffer::default();
    let report = |line: &str| {
        if let Some((level, message)) = classify(line) {
            reporter.report(level, &message);
        }
    };

    let callbacks = Callbacks::new()
        .on_progress(|chunk| {
            for line in lines.push(chunk.stream, &chunk.text) {
                report(&line);
            }
        })
        .on_error(on_error);

    let ok = ProcessRunner::new(ctx).run(&command, callbacks).await;

    for line in lines.finish() {
        report(&line);
    }
    ok
}

/// Reassembles lines from chunks, one buffer per stream
#[derive(Debug, Default)]
struct LineBuffer {
    stdout: String,
    stderr: String,
}

impl LineBuffer {
    fn push(&mut self, stream: OutputStream, text: &str) -> Vec<String> {
        let buf = match stream {
            OutputStream::Stdout => &mut self.stdout,
            OutputStream::Stderr => &mut self.stderr,
        };
        buf.push_str(text);

        let mut lines = Vec::new();
        while let Some(pos) = buf.find('\n') {
            let line: String = buf.drain(..=pos).collect();
            lines.push(line.trim_end_matches(['\r', '\n']).to_string());
        }
        lines
    }

    fn finish(&mut self) -> Vec<String> {
        [
            std::mem::take(&mut self.stdout),
            std::mem::take(&mut self.stderr),
        ]
        .into_iter()
        .filter(|rest| !rest.is_empty())
        .collect()
    }
}
