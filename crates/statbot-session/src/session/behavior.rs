//! Variant behaviour plugged into the session state machine
//!
//! A [`Behavior`] decides which controls a session shows and what an accepted
//! action does. Both decisions are pure functions of the pager state, so
//! every variant can be tested without a transport.

use super::pager::Pager;
use crate::action::Action;
use crate::config::SessionConfig;
use crate::controls::ControlSet;
use statbot_core::Page;
use std::fmt;
use std::time::Duration;

/// The effect of an accepted action
#[derive(Debug, Clone, PartialEq)]
pub enum Step<T> {
    /// Nothing to do
    Ignore,
    /// Show the page at this index
    Move(usize),
    /// Swap the page list in place and show its first page
    Rebind(Vec<Page>),
    /// End the session and delete its message
    Stop,
    /// End the session with a value and delete its message
    Resolve(T),
}

/// How a session cleans up its message when it closes on idle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Teardown {
    /// Keep the content, remove every control
    StripControls,
    /// Remove the message entirely
    Delete,
}

/// Variant-specific part of a session
pub trait Behavior: Send + Sync {
    /// Value a session of this kind resolves to
    type Output: Send + fmt::Debug;

    /// Controls for the current state
    fn controls(&self, pager: &Pager) -> ControlSet;

    /// What an enabled action does
    fn transition(&self, pager: &Pager, action: &Action) -> Step<Self::Output>;

    /// Idle period after which the session closes
    fn idle_timeout(&self, config: &SessionConfig) -> Duration {
        config.idle_timeout
    }

    /// Cleanup performed when the idle timer fires
    fn idle_teardown(&self) -> Teardown {
        Teardown::StripControls
    }

    /// Whether the page list may be swapped from outside
    fn rebindable(&self) -> bool {
        false
    }
}

/// Transition shared by the browsing variants
pub fn navigate<T>(pager: &Pager, action: &Action) -> Step<T> {
    let cursor = pager.cursor();
    let total = pager.total();
    match action {
        Action::First => Step::Move(0),
        Action::Previous => Step::Move(cursor.saturating_sub(1)),
        Action::Next => Step::Move((cursor + 1).min(total)),
        Action::Last => Step::Move(total),
        Action::Stop => Step::Stop,
        _ => Step::Ignore,
    }
}
