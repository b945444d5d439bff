//! `agentstack model` command handler

use anyhow::Result;
use camino::Utf8Path;
use tracing::debug;

use agentstack_core::providers::{get_all_available_models, get_available_models};
use agentstack_core::ConfigFile;

use crate::cli::ModelArgs;
use crate::output;
use crate::prompt::{Prompter, TerminalPrompter};

const OTHER_MSG: &str = "Other (enter a model name)";
const RETURN_MSG: &str = "↩ Return to preferred models";
const PROVIDERS_DOC_URL: &str = "https://docs.litellm.ai/docs/providers";

pub fn run(path: &Utf8Path, args: ModelArgs) -> Result<()> {
    match args.set {
        Some(model) => {
            agentstack_core::validation::validate_not_empty(&model, 1)?;
            ConfigFile::update(path, |config| config.default_model = Some(model.clone()))?;
            output::success(&format!("Default model set to {}", model));
            Ok(())
        }
        None => configure_default_model(path, &mut TerminalPrompter),
    }
}

/// Ask for a default model unless the project already has one
pub fn configure_default_model(path: &Utf8Path, prompter: &mut dyn Prompter) -> Result<()> {
    let config = ConfigFile::load(path)?;
    if let Some(model) = &config.default_model {
        debug!("Using default model from project config.");
        output::info(&format!("Default model: {}", model));
        return Ok(());
    }

    output::info("Project does not have a default model configured.");

    let preferred = get_available_models()?;
    let all = get_all_available_models()?;
    let model = choose_model(prompter, &preferred, &all)?;

    debug!("Writing default model to project config.");
    ConfigFile::update(path, |config| config.default_model = Some(model.clone()))?;
    output::success(&format!("Default model set to {}", model));
    Ok(())
}

/// Preferred list first; the full list and free text are one step away
fn choose_model(
    prompter: &mut dyn Prompter,
    preferred: &[String],
    all: &[String],
) -> Result<String> {
    let advanced_msg = format!("Select from {} models for advanced use cases", all.len());

    let mut choices = preferred.to_vec();
    choices.push(advanced_msg.clone());
    choices.push(OTHER_MSG.to_string());

    let mut advanced = vec![RETURN_MSG.to_string()];
    advanced.extend_from_slice(all);

    loop {
        let choice = &choices[prompter.select("Which model would you like to use?", &choices)?];

        if choice == OTHER_MSG {
            output::info(&format!(
                "A list of available models is available at: \"{}\"",
                PROVIDERS_DOC_URL
            ));
            return prompter.text("Enter the model name", 1);
        }

        if *choice == advanced_msg {
            let picked =
                &advanced[prompter.select("Select from all available models", &advanced)?];
            if picked == RETURN_MSG {
                continue;
            }
            return Ok(picked.clone());
        }

        return Ok(choice.clone());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::prompt::testing::{Answer, ScriptedPrompter};
    use camino::Utf8PathBuf;
    use tempfile::TempDir;

    fn models() -> (Vec<String>, Vec<String>) {
        let preferred = vec!["openai/gpt-4o".to_string(), "anthropic/claude".to_string()];
        let mut all = preferred.clone();
        all.push("groq/llama3".to_string());
        (preferred, all)
    }

    fn project() -> (TempDir, Utf8PathBuf) {
        let dir = TempDir::new().unwrap();
        let root = Utf8PathBuf::try_from(dir.path().to_path_buf()).unwrap();
        ConfigFile::new(&root).save().unwrap();
        (dir, root)
    }

    #[test]
    fn test_choose_preferred() {
        let (preferred, all) = models();
        let mut prompter = ScriptedPrompter::new([Answer::Pick("anthropic/claude")]);

        let model = choose_model(&mut prompter, &preferred, &all).unwrap();
        assert_eq!(model, "anthropic/claude");

        let menu = &prompter.menus[0];
        assert_eq!(menu.len(), 4);
        assert_eq!(menu[2], "Select from 3 models for advanced use cases");
        assert_eq!(menu[3], OTHER_MSG);
    }

    #[test]
    fn test_choose_other() {
        let (preferred, all) = models();
        let mut prompter =
            ScriptedPrompter::new([Answer::Pick(OTHER_MSG), Answer::Text("ollama/phi3")]);

        let model = choose_model(&mut prompter, &preferred, &all).unwrap();
        assert_eq!(model, "ollama/phi3");
    }

    #[test]
    fn test_return_from_advanced_list() {
        let (preferred, all) = models();
        let mut prompter = ScriptedPrompter::new([
            Answer::Pick("Select from 3 models for advanced use cases"),
            Answer::Pick(RETURN_MSG),
            Answer::Pick("Select from 3 models for advanced use cases"),
            Answer::Pick("groq/llama3"),
        ]);

        let model = choose_model(&mut prompter, &preferred, &all).unwrap();
        assert_eq!(model, "groq/llama3");
        assert_eq!(prompter.menus.len(), 4);
        assert_eq!(prompter.menus[1][0], RETURN_MSG);
        assert_eq!(prompter.menus[1].len(), all.len() + 1);
    }

    #[test]
    fn test_configure_writes_choice() {
        let (_dir, root) = project();
        let mut prompter = ScriptedPrompter::new([Answer::Pick("openai/gpt-4o")]);

        configure_default_model(&root, &mut prompter).unwrap();

        let config = ConfigFile::load(&root).unwrap();
        assert_eq!(config.default_model.as_deref(), Some("openai/gpt-4o"));
    }

    #[test]
    fn test_configure_keeps_existing_model() {
        let (_dir, root) = project();
        ConfigFile::update(&root, |c| c.default_model = Some("openai/gpt-4o".into())).unwrap();
        let mut prompter = ScriptedPrompter::default();

        configure_default_model(&root, &mut prompter).unwrap();

        assert!(prompter.menus.is_empty());
    }

    #[test]
    fn test_configure_outside_project() {
        let dir = TempDir::new().unwrap();
        let root = Utf8PathBuf::try_from(dir.path().to_path_buf()).unwrap();
        let mut prompter = ScriptedPrompter::default();

        assert!(configure_default_model(&root, &mut prompter).is_err());
    }
}
