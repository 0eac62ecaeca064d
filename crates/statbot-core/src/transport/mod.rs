//! Host transport abstraction
//!
//! The chat platform offers two ways to put a message on screen for an
//! interaction: an initial response, which is only accepted inside a short
//! acknowledgment window, and plain channel posts/edits, which have no such
//! deadline. [`Transport`] exposes both paths raw; the session engine decides
//! which one to use.

pub mod memory;

use crate::ids::{ChannelId, Interaction, MessageRef};
use crate::message::OutboundMessage;
use async_trait::async_trait;
use thiserror::Error;

pub use memory::{Call, MemoryTransport};

/// Result type alias for transport calls
pub type TransportResult<T> = std::result::Result<T, TransportError>;

/// Failures reported by the host transport
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransportError {
    /// The interaction's acknowledgment window already elapsed
    #[error("Interaction handshake expired")]
    HandshakeExpired,

    /// The target message or interaction no longer exists
    #[error("Target message or interaction no longer exists")]
    Gone,

    /// The bot lacks permission for the call
    #[error("Forbidden: {0}")]
    Forbidden(String),

    /// Any other host failure
    #[error("Transport failure: {0}")]
    Other(String),
}

/// Connection to the chat platform
#[async_trait]
pub trait Transport: Send + Sync {
    /// Answer an interaction with its initial response.
    ///
    /// Fails with [`TransportError::HandshakeExpired`] once the
    /// acknowledgment window has passed.
    async fn respond(
        &self,
        interaction: &Interaction,
        message: &OutboundMessage,
    ) -> TransportResult<MessageRef>;

    /// Post a new message to a channel
    async fn send(&self, channel: ChannelId, message: &OutboundMessage)
    -> TransportResult<MessageRef>;

    /// Replace the content and controls of an existing message
    async fn edit(&self, target: &MessageRef, message: &OutboundMessage) -> TransportResult<()>;

    /// Delete a message
    async fn delete(&self, target: &MessageRef) -> TransportResult<()>;

    /// Show a notice only the interaction's author can see
    async fn notify(&self, interaction: &Interaction, text: &str) -> TransportResult<()>;
}
