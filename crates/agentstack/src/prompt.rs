//! Interactive prompts
//!
//! Commands talk to a [`Prompter`] instead of dialoguer directly so the
//! question flows can be driven by scripted answers in tests.

use agentstack_core::validation::{validate_not_empty, validate_snake_case};
use anyhow::Result;
use dialoguer::{Input, Select};

pub trait Prompter {
    /// Ask the user to pick one of `items`; returns its index
    fn select(&mut self, prompt: &str, items: &[String]) -> Result<usize>;

    /// Ask for free text at least `min_length` characters long
    fn text(&mut self, prompt: &str, min_length: usize) -> Result<String>;
}

/// Prompter backed by the terminal
#[derive(Debug, Default)]
pub struct TerminalPrompter;

impl Prompter for TerminalPrompter {
    fn select(&mut self, prompt: &str, items: &[String]) -> Result<usize> {
        let selection = Select::new()
            .with_prompt(prompt)
            .items(items)
            .default(0)
            .interact()?;
        Ok(selection)
    }

    fn text(&mut self, prompt: &str, min_length: usize) -> Result<String> {
        let input = Input::<String>::new().with_prompt(prompt);
        let value = if min_length > 0 {
            input
                .validate_with(move |value: &String| {
                    validate_not_empty(value, min_length).map_err(|e| e.to_string())
                })
                .interact_text()?
        } else {
            input.allow_empty(true).interact_text()?
        };
        Ok(value.trim().to_string())
    }
}

/// Ask for a value, optionally requiring snake_case
///
/// A value that is not snake_case is an error rather than a re-prompt.
pub fn get_validated_input(
    prompter: &mut dyn Prompter,
    message: &str,
    min_length: usize,
    snake_case: bool,
) -> Result<String> {
    let value = prompter.text(message, min_length)?;
    if snake_case {
        validate_snake_case(&value)?;
    }
    Ok(value)
}

#[cfg(test)]
pub(crate) mod testing {
    use super::*;
    use std::collections::VecDeque;

    pub(crate) enum Answer {
        Pick(&'static str),
        Text(&'static str),
    }

    /// Replays canned answers and records every menu it was shown
    #[derive(Default)]
    pub(crate) struct ScriptedPrompter {
        answers: VecDeque<Answer>,
        pub menus: Vec<Vec<String>>,
    }

    impl ScriptedPrompter {
        pub fn new(answers: impl IntoIterator<Item = Answer>) -> Self {
            Self {
                answers: answers.into_iter().collect(),
                menus: Vec::new(),
            }
        }
    }

    impl Prompter for ScriptedPrompter {
        fn select(&mut self, _prompt: &str, items: &[String]) -> Result<usize> {
            self.menus.push(items.to_vec());
            match self.answers.pop_front() {
                Some(Answer::Pick(choice)) => items
                    .iter()
                    .position(|item| item == choice)
                    .ok_or_else(|| anyhow::anyhow!("{} is not on the menu", choice)),
                _ => anyhow::bail!("unexpected menu"),
            }
        }

        fn text(&mut self, _prompt: &str, min_length: usize) -> Result<String> {
            match self.answers.pop_front() {
                Some(Answer::Text(value)) => {
                    if min_length > 0 {
                        validate_not_empty(value, min_length)?;
                    }
                    Ok(value.to_string())
                }
                _ => anyhow::bail!("unexpected text prompt"),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::testing::{Answer, ScriptedPrompter};
    use super::*;

    #[test]
    fn test_validated_input_accepts_snake_case() {
        let mut prompter = ScriptedPrompter::new([Answer::Text("my_agent")]);
        let value = get_validated_input(&mut prompter, "Name", 3, true).unwrap();
        assert_eq!(value, "my_agent");
    }

    #[test]
    fn test_validated_input_rejects_other_case() {
        let mut prompter = ScriptedPrompter::new([Answer::Text("MyAgent")]);
        let err = get_validated_input(&mut prompter, "Name", 3, true).unwrap_err();
        assert_eq!(err.to_string(), "Input must be in snake_case");
    }

    #[test]
    fn test_validated_input_without_case_rule() {
        let mut prompter = ScriptedPrompter::new([Answer::Text("Anything Goes")]);
        let value = get_validated_input(&mut prompter, "Name", 0, false).unwrap();
        assert_eq!(value, "Anything Goes");
    }
}
