//! Test helpers
//!
//! [`ScriptedPrompter`] answers wizard prompts from a prepared script, which
//! lets the whole wizard run without a terminal.

use std::collections::VecDeque;

use crate::wizard::{ChoiceRequest, PromptError, Prompter, TextRequest, Validator};

/// One scripted user reaction
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Answer {
    /// Type this text and press enter
    Text(String),
    /// Pick the entry at this index
    Select(usize),
    /// Accept exactly these entries
    MultiSelect(Vec<usize>),
    /// Close the prompt without answering
    Dismiss,
}

impl Answer {
    /// Shorthand for [`Answer::Text`]
    #[must_use]
    pub fn text(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

/// Prompter that replays a fixed list of answers
///
/// A text answer rejected by the validator is recorded in
/// [`rejections`](Self::rejections) and the next answer is tried, just as a
/// user would retype. Running out of answers counts as dismissal.
#[derive(Debug, Default)]
pub struct ScriptedPrompter {
    answers: VecDeque<Answer>,
    /// Titles of every prompt shown, in order
    pub titles: Vec<String>,
    /// Initial text of every text prompt shown
    pub initial_texts: Vec<Option<String>>,
    /// Validation messages produced for rejected text answers
    pub rejections: Vec<String>,
    /// Pre-selected state of the last multi-select shown
    pub last_picked: Vec<bool>,
}

impl ScriptedPrompter {
    /// Create a prompter replaying `answers`
    pub fn new(answers: impl IntoIterator<Item = Answer>) -> Self {
        Self {
            answers: answers.into_iter().collect(),
            ..Self::default()
        }
    }

    /// Number of answers not consumed yet
    #[must_use]
    pub fn remaining(&self) -> usize {
        self.answers.len()
    }
}

impl Prompter for ScriptedPrompter {
    fn text(
        &mut self,
        request: &TextRequest,
        validate: Validator<'_>,
    ) -> Result<Option<String>, PromptError> {
        self.titles.push(request.title.clone());
        self.initial_texts.push(request.initial.clone());

        while let Some(answer) = self.answers.pop_front() {
            match answer {
                Answer::Text(value) => match validate(&value) {
                    Ok(()) => return Ok(Some(value)),
                    Err(message) => self.rejections.push(message),
                },
                _ => return Ok(None),
            }
        }
        Ok(None)
    }

    fn select(&mut self, request: &ChoiceRequest) -> Result<Option<usize>, PromptError> {
        self.titles.push(request.title.clone());
        match self.answers.pop_front() {
            Some(Answer::Select(index)) => Ok(Some(index)),
            _ => Ok(None),
        }
    }

    fn multi_select(
        &mut self,
        request: &ChoiceRequest,
    ) -> Result<Option<Vec<usize>>, PromptError> {
        self.titles.push(request.title.clone());
        self.last_picked = request.choices.iter().map(|choice| choice.picked).collect();
        match self.answers.pop_front() {
            Some(Answer::MultiSelect(indices)) => Ok(Some(indices)),
            _ => Ok(None),
        }
    }
}
