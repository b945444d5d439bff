//! `agentstack init` command handler

use anyhow::{bail, Context, Result};
use camino::Utf8Path;
use tracing::{debug, warn};

use agentstack_core::validation::validate_snake_case;
use agentstack_core::{resolve_framework, ConfigFile};
use agentstack_packaging::{uv, RuntimeContext};
use agentstack_projects::{repo, TemplateRegistry, TemplateRenderer, TemplateVars};

use crate::cli::InitArgs;
use crate::output::{self, SpinnerReporter};
use crate::prompt::{get_validated_input, TerminalPrompter};

/// Create a new project directory under `base`
pub async fn run(args: InitArgs, base: &Utf8Path) -> Result<()> {
    output::welcome();

    let name = match args.name {
        Some(name) => {
            validate_snake_case(&name)?;
            name
        }
        None => get_validated_input(
            &mut TerminalPrompter,
            "What's the name of your project (snake_case)",
            3,
            true,
        )?,
    };

    let project_dir = base.join(&name);
    if project_dir.exists() {
        bail!("Directory already exists: {}", project_dir);
    }

    let registry = TemplateRegistry::from_embedded()?;
    let template = registry.get(&args.template)?;
    let framework = match args.framework.as_deref() {
        Some(framework) => resolve_framework(framework)?,
        None => template.framework()?,
    };

    output::header("Create New Project");
    output::kv("Project name", &name);
    output::kv("Template", &args.template);
    output::kv("Framework", framework.as_str());
    output::kv("Location", project_dir.as_str());
    println!();

    let vars = TemplateVars::new(&name, framework).with_description(&template.description);
    let created = TemplateRenderer::new()
        .render_project(template, &vars, &project_dir)
        .context("Failed to render project files")?;
    debug!("Rendered {} files", created.len());

    let mut config = ConfigFile::new(&project_dir);
    config.framework = Some(framework.to_string());
    config.tools = template.tools.clone();
    config.default_model = template.default_model.clone();
    config.agentstack_version = Some(env!("CARGO_PKG_VERSION").to_string());
    config.template = Some(args.template.clone());
    config.template_version = Some(template.template_version.to_string());
    config
        .save()
        .with_context(|| format!("Failed to write {}", config.path()))?;

    if !args.no_git {
        init_repository(&project_dir).await?;
    }

    if !args.skip_install {
        let ctx = RuntimeContext::discover(&project_dir)?;
        let reporter = SpinnerReporter::new("Setting up the virtual environment...");
        uv::create_venv(&ctx, &args.python_version, &reporter).await?;
        uv::install_project(&ctx, &reporter).await?;
        reporter.finish();
    }

    println!();
    output::success(&format!("Project '{}' created successfully", name));
    println!();
    output::info("Next steps:");
    println!("   1. cd {}", project_dir);
    if args.skip_install {
        println!("   2. agentstack install");
    }
    println!("   {}. python -m src.main", if args.skip_install { 3 } else { 2 });

    Ok(())
}

/// Version control is optional; a missing git binary only warns
async fn init_repository(project_dir: &Utf8Path) -> Result<()> {
    if !repo::is_git_available().await {
        warn!("git not found, skipping repository setup");
        output::warning("git is not installed; the project was not put under version control");
        return Ok(());
    }

    repo::init(project_dir)
        .await
        .context("Failed to initialize git repository")?;
    repo::commit_all(project_dir, "Initial commit").await?;
    Ok(())
}
