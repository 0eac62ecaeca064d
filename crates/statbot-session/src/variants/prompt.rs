//! Single-choice prompt

use crate::action::Action;
use crate::config::SessionConfig;
use crate::controls::{Button, ControlSet, Menu, MenuKind};
use crate::error::{Result, SessionError};
use crate::session::{Behavior, Pager, Session, SessionBuilder, Step, Teardown};
use serde::{Deserialize, Serialize};
use statbot_core::{ButtonStyle, SelectOption};
use std::collections::HashSet;
use std::time::Duration;

/// What the prompt offers
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Choices {
    /// Confirm and cancel buttons
    Confirm,
    /// A menu of options
    Options(Vec<SelectOption>),
}

/// The value a prompt resolves to
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Answer {
    Confirmed,
    Cancelled,
    /// Value of the picked option
    Picked(String),
}

/// Collects exactly one answer from the owner
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SingleChoice {
    choices: Choices,
    placeholder: String,
}

impl SingleChoice {
    pub fn confirm() -> Self {
        Self {
            choices: Choices::Confirm,
            placeholder: String::new(),
        }
    }

    /// Option values must be unique and non-empty
    pub fn options(options: Vec<SelectOption>) -> Result<Self> {
        if options.is_empty() {
            return Err(SessionError::InvalidLayout(
                "a prompt needs at least one option".to_string(),
            ));
        }
        let mut seen = HashSet::new();
        if let Some(dup) = options.iter().find(|o| !seen.insert(o.value.as_str())) {
            return Err(SessionError::InvalidLayout(format!(
                "duplicate option '{}'",
                dup.value
            )));
        }
        Ok(Self {
            choices: Choices::Options(options),
            placeholder: "Choose an option".to_string(),
        })
    }

    pub fn with_placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.placeholder = placeholder.into();
        self
    }

    pub fn choices(&self) -> &Choices {
        &self.choices
    }
}

impl Behavior for SingleChoice {
    type Output = Answer;

    fn controls(&self, _pager: &Pager) -> ControlSet {
        match &self.choices {
            Choices::Confirm => ControlSet::new()
                .with_button(Button::new(Action::Confirm, "Confirm", ButtonStyle::Success))
                .with_button(Button::new(Action::Cancel, "Cancel", ButtonStyle::Danger)),
            Choices::Options(options) => ControlSet::new().with_menu(Menu {
                kind: MenuKind::Option,
                placeholder: self.placeholder.clone(),
                options: options.clone(),
                disabled: false,
            }),
        }
    }

    fn transition(&self, _pager: &Pager, action: &Action) -> Step<Answer> {
        match action {
            Action::Confirm => Step::Resolve(Answer::Confirmed),
            Action::Cancel => Step::Resolve(Answer::Cancelled),
            Action::Choose(value) => Step::Resolve(Answer::Picked(value.clone())),
            _ => Step::Ignore,
        }
    }

    fn idle_timeout(&self, config: &SessionConfig) -> Duration {
        config.prompt_timeout
    }

    fn idle_teardown(&self) -> Teardown {
        Teardown::Delete
    }
}

pub type Prompt = Session<SingleChoice>;

impl SessionBuilder {
    /// Confirm/cancel prompt over exactly one page
    pub fn confirm(self) -> Result<Prompt> {
        self.prompt(SingleChoice::confirm())
    }

    /// Option prompt over exactly one page
    pub fn choice(self, options: Vec<SelectOption>) -> Result<Prompt> {
        self.prompt(SingleChoice::options(options)?)
    }

    /// Prompt with a prepared [`SingleChoice`]
    pub fn prompt(self, choice: SingleChoice) -> Result<Prompt> {
        if self.page_count() != 1 {
            return Err(SessionError::InvalidLayout(format!(
                "a prompt shows exactly one page, got {}",
                self.page_count()
            )));
        }
        self.build(choice)
    }
}
