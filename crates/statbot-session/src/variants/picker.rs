//! Action picker
//!
//! Used by the profile manager: every button names an action, and pressing
//! one ends the session with that name instead of navigating.

use crate::action::Action;
use crate::config::SessionConfig;
use crate::controls::{Button, ControlSet};
use crate::error::{Result, SessionError};
use crate::session::{Behavior, Pager, Session, SessionBuilder, Step, Teardown};
use statbot_core::ButtonStyle;
use std::collections::HashSet;
use std::time::Duration;

/// Most buttons the host lays out on one message
pub const MAX_ACTIONS: usize = 25;

/// A named button of an action picker
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PickerAction {
    pub name: String,
    pub label: String,
    pub style: ButtonStyle,
}

impl PickerAction {
    pub fn new(name: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            label: label.into(),
            style: ButtonStyle::Secondary,
        }
    }

    pub fn with_style(mut self, style: ButtonStyle) -> Self {
        self.style = style;
        self
    }
}

/// Resolves to the name of the pressed action
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PickAction {
    actions: Vec<PickerAction>,
}

impl PickAction {
    pub fn new(actions: Vec<PickerAction>) -> Result<Self> {
        if actions.is_empty() || actions.len() > MAX_ACTIONS {
            return Err(SessionError::InvalidLayout(format!(
                "an action picker needs 1 to {MAX_ACTIONS} actions, got {}",
                actions.len()
            )));
        }
        let mut seen = HashSet::new();
        for action in &actions {
            if action.name.is_empty() || action.name.contains(':') {
                return Err(SessionError::InvalidLayout(format!(
                    "invalid action name '{}'",
                    action.name
                )));
            }
            if !seen.insert(action.name.as_str()) {
                return Err(SessionError::InvalidLayout(format!(
                    "duplicate action '{}'",
                    action.name
                )));
            }
        }
        Ok(Self { actions })
    }

    pub fn actions(&self) -> &[PickerAction] {
        &self.actions
    }
}

impl Behavior for PickAction {
    type Output = String;

    fn controls(&self, _pager: &Pager) -> ControlSet {
        self.actions.iter().fold(ControlSet::new(), |set, action| {
            set.with_button(Button::new(
                Action::Choose(action.name.clone()),
                &action.label,
                action.style,
            ))
        })
    }

    fn transition(&self, _pager: &Pager, action: &Action) -> Step<String> {
        match action {
            Action::Choose(name) => Step::Resolve(name.clone()),
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

pub type ActionPicker = Session<PickAction>;

impl SessionBuilder {
    /// Build an action picker over exactly one page
    pub fn action_picker(self, actions: Vec<PickerAction>) -> Result<ActionPicker> {
        if self.page_count() > 1 {
            return Err(SessionError::InvalidLayout(
                "an action picker shows exactly one page".to_string(),
            ));
        }
        self.build(PickAction::new(actions)?)
    }
}
