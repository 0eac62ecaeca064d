//! Session identities and user-triggered actions
//!
//! Every control a session renders carries a custom id of the form
//! `<session-uuid>:<verb>[:<argument>]`. The host echoes that id back when the
//! control is used, which is how an inbound component interaction finds its
//! way to the right session.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// Identity of a live session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SessionId(Uuid);

impl SessionId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for SessionId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.simple())
    }
}

impl FromStr for SessionId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Uuid::parse_str(s).map(Self)
    }
}

/// A user-triggered action
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Action {
    First,
    Previous,
    Stop,
    Next,
    Last,
    /// Category chosen from a category menu
    Select(String),
    Confirm,
    Cancel,
    /// Named action or option chosen from a button or an option menu
    Choose(String),
}

const SELECT_VERB: &str = "select";
const PICK_VERB: &str = "pick";
const CHOOSE_VERB: &str = "choose";

impl Action {
    /// The custom id of a button carrying this action
    pub fn custom_id(&self, session: SessionId) -> String {
        match self {
            Action::First => format!("{session}:first"),
            Action::Previous => format!("{session}:prev"),
            Action::Stop => format!("{session}:stop"),
            Action::Next => format!("{session}:next"),
            Action::Last => format!("{session}:last"),
            Action::Confirm => format!("{session}:confirm"),
            Action::Cancel => format!("{session}:cancel"),
            Action::Choose(name) => format!("{session}:{CHOOSE_VERB}:{name}"),
            Action::Select(_) => Self::category_menu_id(session),
        }
    }

    /// Custom id of a session's category menu
    pub fn category_menu_id(session: SessionId) -> String {
        format!("{session}:{SELECT_VERB}")
    }

    /// Custom id of a session's option menu
    pub fn option_menu_id(session: SessionId) -> String {
        format!("{session}:{PICK_VERB}")
    }

    /// Decode a component interaction.
    ///
    /// `values` holds the entries picked in a select menu and is empty for
    /// buttons. Returns `None` for ids this crate did not produce.
    pub fn parse(custom_id: &str, values: &[String]) -> Option<(SessionId, Action)> {
        let (session, rest) = custom_id.split_once(':')?;
        let session = session.parse().ok()?;
        let (verb, argument) = match rest.split_once(':') {
            Some((verb, argument)) => (verb, Some(argument)),
            None => (rest, None),
        };

        let action = match (verb, argument) {
            ("first", None) => Action::First,
            ("prev", None) => Action::Previous,
            ("stop", None) => Action::Stop,
            ("next", None) => Action::Next,
            ("last", None) => Action::Last,
            ("confirm", None) => Action::Confirm,
            ("cancel", None) => Action::Cancel,
            (CHOOSE_VERB, Some(name)) if !name.is_empty() => Action::Choose(name.to_string()),
            (SELECT_VERB, None) => Action::Select(values.first()?.clone()),
            (PICK_VERB, None) => Action::Choose(values.first()?.clone()),
            _ => return None,
        };
        Some((session, action))
    }

    /// Whether this action moves the cursor
    pub fn is_navigation(&self) -> bool {
        matches!(
            self,
            Action::First | Action::Previous | Action::Next | Action::Last
        )
    }
}
