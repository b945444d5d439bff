//! CLI argument parsing with clap

use agentstack_packaging::uv::DEFAULT_PYTHON_VERSION;
use camino::Utf8PathBuf;
use clap::{Args, Parser, Subcommand};

/// AgentStack - The easiest way to build a robust agent application
#[derive(Parser, Debug)]
#[command(name = "agentstack")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Project directory to operate on
    #[arg(long, global = true, env = "AGENTSTACK_PROJECT_PATH", default_value = ".")]
    pub path: Utf8PathBuf,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Create a new project from a template
    Init(InitArgs),

    /// Install the project's dependencies into its virtual environment
    Install,

    /// Add a Python package to the project
    Add(PackageArgs),

    /// Remove a Python package from the project
    Remove(PackageArgs),

    /// Upgrade a Python package in the project
    Upgrade(PackageArgs),

    /// Choose the project's default model
    Model(ModelArgs),

    /// Revert the last commit made to the project
    Undo,

    /// List available project templates
    Templates,
}

#[derive(Args, Debug)]
pub struct InitArgs {
    /// Project name (snake_case); prompted for when omitted
    pub name: Option<String>,

    /// Template to start from
    #[arg(short, long, default_value = "empty")]
    pub template: String,

    /// Framework to use instead of the template's
    #[arg(short, long)]
    pub framework: Option<String>,

    /// Python version for the virtual environment
    #[arg(long, default_value = DEFAULT_PYTHON_VERSION)]
    pub python_version: String,

    /// Do not create a git repository
    #[arg(long)]
    pub no_git: bool,

    /// Do not create the virtual environment or install dependencies
    #[arg(long)]
    pub skip_install: bool,
}

#[derive(Args, Debug)]
pub struct PackageArgs {
    /// Package requirement, e.g. `requests` or `requests>=2.31`
    pub package: String,
}

#[derive(Args, Debug)]
pub struct ModelArgs {
    /// Set the default model without prompting (`provider/model`)
    #[arg(long)]
    pub set: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_defaults() {
        let cli = Cli::try_parse_from(["agentstack", "init", "my_agent"]).unwrap();
        let Commands::Init(args) = cli.command else {
            panic!("expected init");
        };
        assert_eq!(args.name.as_deref(), Some("my_agent"));
        assert_eq!(args.template, "empty");
        assert_eq!(args.python_version, "3.12");
        assert!(args.framework.is_none());
        assert!(!args.no_git);
        assert!(!args.skip_install);
    }

    #[test]
    fn test_init_with_options() {
        let cli = Cli::try_parse_from([
            "agentstack",
            "init",
            "--template",
            "research",
            "--framework",
            "crew",
            "--skip-install",
            "--no-git",
        ])
        .unwrap();
        let Commands::Init(args) = cli.command else {
            panic!("expected init");
        };
        assert!(args.name.is_none());
        assert_eq!(args.template, "research");
        assert_eq!(args.framework.as_deref(), Some("crew"));
        assert!(args.no_git && args.skip_install);
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli =
            Cli::try_parse_from(["agentstack", "add", "requests", "-vv", "--path", "/tmp/p"])
                .unwrap();
        assert_eq!(cli.verbose, 2);
        assert_eq!(cli.path, Utf8PathBuf::from("/tmp/p"));
        assert!(matches!(cli.command, Commands::Add(ref a) if a.package == "requests"));
    }

    #[test]
    fn test_package_is_required() {
        assert!(Cli::try_parse_from(["agentstack", "remove"]).is_err());
    }

    #[test]
    fn test_model_set() {
        let cli = Cli::try_parse_from(["agentstack", "model", "--set", "openai/gpt-4o"]).unwrap();
        assert!(matches!(cli.command, Commands::Model(ref m) if m.set.as_deref() == Some("openai/gpt-4o")));
    }
}
