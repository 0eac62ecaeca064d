//! Error types for statbot-core

use crate::transport::TransportError;
use thiserror::Error;

/// Result type alias for statbot-core
pub type Result<T> = std::result::Result<T, Error>;

/// Error type shared across the bot
#[derive(Error, Debug)]
pub enum Error {
    /// Generic error message
    #[error("{0}")]
    Generic(String),

    /// The host transport failed
    #[error("Transport error: {0}")]
    Transport(#[from] TransportError),

    /// An interactive session failed
    #[error("Session error: {0}")]
    Session(String),

    /// A context value could not be converted
    #[error("Context error: {0}")]
    Context(String),
}
