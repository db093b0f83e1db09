//! Yes/no questions asked during install and restore
//!
//! The operations only ever ask through [`Prompter`], so `--yes` and tests
//! can answer without a terminal.

use inquire::Confirm;

use crate::error::Result;

/// Asks the user a yes/no question
pub trait Prompter {
    fn confirm(&self, question: &str, help: &str, default: bool) -> Result<bool>;
}

/// Interactive prompter backed by `inquire`
#[derive(Debug, Default)]
pub struct InquirePrompter;

impl Prompter for InquirePrompter {
    fn confirm(&self, question: &str, help: &str, default: bool) -> Result<bool> {
        let answer = Confirm::new(question)
            .with_default(default)
            .with_help_message(help)
            .prompt()?;
        Ok(answer)
    }
}

/// Prompter that accepts every default without asking (`--yes`)
#[derive(Debug, Default)]
pub struct AcceptDefaults;

impl Prompter for AcceptDefaults {
    fn confirm(&self, _question: &str, _help: &str, default: bool) -> Result<bool> {
        Ok(default)
    }
}

/// Resolve a decision: an explicit flag wins, otherwise ask
pub fn decide(
    explicit: Option<bool>,
    prompter: &dyn Prompter,
    question: &str,
    help: &str,
    default: bool,
) -> Result<bool> {
    match explicit {
        Some(answer) => Ok(answer),
        None => prompter.confirm(question, help, default),
    }
}
