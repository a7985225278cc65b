//! Interactive completion of an incomplete configuration.

use dialoguer::{Input, Select};

use crate::config::{ProjectConfig, ProjectType};
use crate::error::{Error, Result};

/// Source of answers for questions the command line left open.
pub trait Prompter {
    /// Asks for free-form text.
    fn input(&self, prompt: &str) -> Result<String>;

    /// Asks the user to pick one of `items`, returning its index.
    fn select(&self, prompt: &str, items: &[&str]) -> Result<usize>;
}

/// Terminal prompter backed by dialoguer.
pub struct DialoguerPrompter;

impl DialoguerPrompter {
    pub fn new() -> Self {
        Self
    }
}

impl Default for DialoguerPrompter {
    fn default() -> Self {
        DialoguerPrompter::new()
    }
}

impl Prompter for DialoguerPrompter {
    fn input(&self, prompt: &str) -> Result<String> {
        Input::<String>::new()
            .with_prompt(prompt)
            .interact_text()
            .map_err(|e| Error::PromptError(e.to_string()))
    }

    fn select(&self, prompt: &str, items: &[&str]) -> Result<usize> {
        Select::new()
            .with_prompt(prompt)
            .default(0)
            .items(items)
            .interact()
            .map_err(|e| Error::PromptError(e.to_string()))
    }
}

/// Asks for the project name when it is empty and for the project type when
/// it is `Invalid`. Everything else is left as the command line set it.
pub fn complete_config(prompter: &dyn Prompter, mut config: ProjectConfig) -> Result<ProjectConfig> {
    if config.name.trim().is_empty() {
        config.name = prompter.input("Project name")?.trim().to_string();
    }

    if !config.is_valid() {
        let items: Vec<&str> = ProjectType::CHOICES.iter().map(ProjectType::as_token).collect();
        let selection = prompter.select("Project type", &items)?;
        config.project_type = *ProjectType::CHOICES.get(selection).ok_or_else(|| {
            Error::PromptError(format!("no project type at position {selection}"))
        })?;
    }

    Ok(config)
}
