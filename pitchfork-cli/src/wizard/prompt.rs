//! Prompt primitives used by the wizard
//!
//! Every prompt resolves exactly once: `Ok(Some(_))` when the user accepts a
//! value, `Ok(None)` when they dismiss it, or `Err(_)` when the terminal fails.

use dialoguer::theme::ColorfulTheme;
use dialoguer::{Input, MultiSelect, Select};
use std::io;
use thiserror::Error;

/// Terminal failure while prompting
#[derive(Debug, Error)]
#[error("Prompt failed: {0}")]
pub struct PromptError(#[from] pub io::Error);

/// Request for a single line of text
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextRequest {
    /// Short title, e.g. "Project Name"
    pub title: String,
    /// Longer explanation shown with the title
    pub prompt: String,
    /// Text pre-filled in the input
    pub initial: Option<String>,
}

/// One entry of a selection prompt
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Choice {
    /// Label shown in the list
    pub label: &'static str,
    /// Extra description
    pub detail: &'static str,
    /// Initially selected (multi-select only)
    pub picked: bool,
}

/// Request to choose among fixed entries
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChoiceRequest {
    /// Short title, e.g. "Build System"
    pub title: String,
    /// Entries in display order
    pub choices: Vec<Choice>,
}

/// Validation callback for text prompts
///
/// Returns the message to display for an unacceptable value.
pub type Validator<'v> = &'v dyn Fn(&str) -> Result<(), String>;

/// Source of user answers for the wizard
pub trait Prompter {
    /// Ask for a line of text, re-asking until `validate` accepts it
    ///
    /// # Errors
    ///
    /// Returns an error if the terminal cannot be read.
    fn text(&mut self, request: &TextRequest, validate: Validator<'_>)
        -> Result<Option<String>, PromptError>;

    /// Ask for exactly one of `request.choices`
    ///
    /// # Errors
    ///
    /// Returns an error if the terminal cannot be read.
    fn select(&mut self, request: &ChoiceRequest) -> Result<Option<usize>, PromptError>;

    /// Ask for any subset of `request.choices`
    ///
    /// # Errors
    ///
    /// Returns an error if the terminal cannot be read.
    fn multi_select(&mut self, request: &ChoiceRequest)
        -> Result<Option<Vec<usize>>, PromptError>;
}

/// Ticket handed out for each value submitted for validation
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct ValidationTicket(u64);

/// Tracks live validation so that the newest value always wins
///
/// For prompters that validate while the user keeps typing. Each value
/// change takes a ticket with [`begin`](Self::begin). When its validation
/// finishes, [`complete`](Self::complete) publishes the result only if no
/// newer value has been submitted since; stale results are dropped.
#[derive(Debug, Default)]
pub struct LatestValidation {
    issued: u64,
    message: Option<String>,
}

impl LatestValidation {
    /// Create a tracker with no message shown
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a new value awaiting validation
    pub fn begin(&mut self) -> ValidationTicket {
        self.issued += 1;
        ValidationTicket(self.issued)
    }

    /// Publish a validation result, returning `false` if it was stale
    pub fn complete(&mut self, ticket: ValidationTicket, result: Result<(), String>) -> bool {
        if ticket.0 != self.issued {
            return false;
        }
        self.message = result.err();
        true
    }

    /// Message currently displayed for the newest value
    #[must_use]
    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }
}

/// Interactive prompts on the controlling terminal
pub struct TerminalPrompter {
    theme: ColorfulTheme,
}

impl Default for TerminalPrompter {
    fn default() -> Self {
        Self::new()
    }
}

impl TerminalPrompter {
    /// Create a prompter using the colorful theme
    #[must_use]
    pub fn new() -> Self {
        Self {
            theme: ColorfulTheme::default(),
        }
    }

    fn labels(request: &ChoiceRequest) -> Vec<String> {
        request
            .choices
            .iter()
            .map(|choice| format!("{} - {}", choice.label, choice.detail))
            .collect()
    }
}

impl Prompter for TerminalPrompter {
    fn text(
        &mut self,
        request: &TextRequest,
        validate: Validator<'_>,
    ) -> Result<Option<String>, PromptError> {
        // dialoguer validates each submission synchronously, so results
        // cannot arrive out of order here
        let mut input = Input::<String>::with_theme(&self.theme)
            .with_prompt(format!("{} ({})", request.title, request.prompt))
            .allow_empty(true)
            .validate_with(|value: &String| validate(value.as_str()));
        if let Some(initial) = &request.initial {
            input = input.with_initial_text(initial.as_str());
        }

        dismissable(input.interact_text())
    }

    fn select(&mut self, request: &ChoiceRequest) -> Result<Option<usize>, PromptError> {
        Select::with_theme(&self.theme)
            .with_prompt(&request.title)
            .items(&Self::labels(request))
            .default(0)
            .interact_opt()
            .map_err(into_prompt_error)
    }

    fn multi_select(
        &mut self,
        request: &ChoiceRequest,
    ) -> Result<Option<Vec<usize>>, PromptError> {
        let defaults: Vec<bool> = request.choices.iter().map(|choice| choice.picked).collect();
        MultiSelect::with_theme(&self.theme)
            .with_prompt(&request.title)
            .items(&Self::labels(request))
            .defaults(&defaults)
            .interact_opt()
            .map_err(into_prompt_error)
    }
}

/// Treat end-of-input and interrupts on a text prompt as dismissal
fn dismissable(result: dialoguer::Result<String>) -> Result<Option<String>, PromptError> {
    match result.map_err(|dialoguer::Error::IO(err)| err) {
        Ok(value) => Ok(Some(value)),
        Err(err)
            if matches!(
                err.kind(),
                io::ErrorKind::UnexpectedEof | io::ErrorKind::Interrupted
            ) =>
        {
            Ok(None)
        }
        Err(err) => Err(PromptError(err)),
    }
}

fn into_prompt_error(err: dialoguer::Error) -> PromptError {
    let dialoguer::Error::IO(err) = err;
    PromptError(err)
}
