//! Error types for interactive sessions

use crate::responder::ResponderError;
use thiserror::Error;

/// Session specific errors
#[derive(Debug, Error, PartialEq)]
pub enum SessionError {
    /// A session was built without any pages
    #[error("A session needs at least one page")]
    EmptyPages,

    /// A help category has nothing to show
    #[error("Category '{0}' has no pages")]
    EmptyCategory(String),

    /// The variant's controls or pages do not fit together
    #[error("Invalid session layout: {0}")]
    InvalidLayout(String),

    /// Plain messages are allowed in the channel but rich content is not
    #[error("Missing permission to render rich content in this channel")]
    CannotRenderRichContent,

    /// The owner did not decide before the session went idle
    #[error("No choice was made")]
    NoChoice,

    /// `start` was called on a session that already left its initial state
    #[error("Session already started")]
    AlreadyStarted,

    /// The session is not on screen (not started yet, or closed)
    #[error("Session is not active")]
    NotActive,

    /// The initial render could not be delivered
    #[error("Responder error: {0}")]
    Responder(#[from] ResponderError),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}

impl SessionError {
    /// Whether this is the "user did not decide" condition rather than a fault
    pub fn is_no_choice(&self) -> bool {
        matches!(self, SessionError::NoChoice)
    }
}

/// Result type alias for session operations
pub type Result<T> = std::result::Result<T, SessionError>;

impl From<SessionError> for statbot_core::Error {
    fn from(err: SessionError) -> Self {
        statbot_core::Error::Session(err.to_string())
    }
}
