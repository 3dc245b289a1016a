//! Interactive questions: full-screen selection menus and free-text input.
//!
//! The [`Prompter`] trait is the seam between the dispatcher and the
//! terminal. [`TerminalPrompter`] is the real implementation. Its menu
//! supports:
//! - Arrow keys or vim-style (j/k) navigation
//! - Enter or a mouse click to choose
//! - `/` to fuzzy-filter the entries
//! - `q`, Escape or Ctrl-C to quit

use crossterm::style::Stylize;
use mh_qa_core::error::{Error, Result};

pub mod input;
pub mod menu;
pub mod types;

/// Asks the user questions.
pub trait Prompter {
    /// Asks the user to pick one of `choices`, returning its index.
    ///
    /// # Errors
    ///
    /// [`Error::NoChoices`] if `choices` is empty, [`Error::SelectionCancelled`]
    /// if the user quits instead of choosing.
    fn select(&self, message: &str, choices: &[String], default: Option<usize>) -> Result<usize>;

    /// Asks for a non-empty line of text.
    ///
    /// # Errors
    ///
    /// [`Error::SelectionCancelled`] if input ends before a value is given.
    fn input(&self, message: &str) -> Result<String>;
}

/// Where a value comes from: the command line, or a question.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValueSource<T> {
    Argument(T),
    Interactive,
}

impl<T> From<Option<T>> for ValueSource<T> {
    fn from(value: Option<T>) -> Self {
        match value {
            Some(value) => ValueSource::Argument(value),
            None => ValueSource::Interactive,
        }
    }
}

impl<T> ValueSource<T> {
    /// The argument, or whatever `ask` produces when there is none.
    ///
    /// # Errors
    ///
    /// Returns the error from `ask`.
    pub fn resolve(self, ask: impl FnOnce() -> Result<T>) -> Result<T> {
        match self {
            ValueSource::Argument(value) => Ok(value),
            ValueSource::Interactive => ask(),
        }
    }
}

/// Asks the user to pick one of `items`, shown through `label`.
///
/// # Errors
///
/// See [`Prompter::select`].
pub fn select_item<T: Clone>(
    prompter: &dyn Prompter,
    message: &str,
    items: &[T],
    label: impl Fn(&T) -> String,
    default: Option<usize>,
) -> Result<T> {
    let labels: Vec<String> = items.iter().map(label).collect();
    let index = prompter.select(message, &labels, default)?;
    items
        .get(index)
        .cloned()
        .ok_or_else(|| Error::NoChoices(message.to_string()))
}

#[derive(Debug, Default)]
pub struct TerminalPrompter;

impl Prompter for TerminalPrompter {
    fn select(&self, message: &str, choices: &[String], default: Option<usize>) -> Result<usize> {
        if choices.is_empty() {
            return Err(Error::NoChoices(message.to_string()));
        }

        let index = menu::select_from_list(message, choices, default)
            .map_err(Error::Stdio)?
            .ok_or(Error::SelectionCancelled)?;

        println!("{} {} {}", "?".green(), message.bold(), choices[index].as_str().cyan());
        Ok(index)
    }

    fn input(&self, message: &str) -> Result<String> {
        input::prompt_value(message)
            .map_err(Error::Stdio)?
            .ok_or(Error::SelectionCancelled)
    }
}
