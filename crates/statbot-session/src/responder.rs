//! Two-phase responder
//!
//! The host accepts exactly one initial response per interaction, and only
//! inside a short acknowledgment window. Every later change goes through
//! message edits, which have no deadline but need a message to edit. The
//! [`Responder`] owns that protocol for one session: [`Responder::reply`] for
//! the first render, [`Responder::update`] for all the others.

use statbot_core::{ChannelId, Interaction, MessageRef, OutboundMessage, Transport, TransportError};
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;
use tracing::debug;

/// Whether the initial handshake has happened
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Unacknowledged,
    Acknowledged,
}

/// Responder failures
#[derive(Debug, Error, PartialEq)]
pub enum ResponderError {
    /// `reply` was already used for this session
    #[error("Session was already acknowledged")]
    AlreadyAcknowledged,

    /// `update` was called before `reply` completed
    #[error("Session has not been acknowledged yet")]
    NotAcknowledged,

    /// The message or interaction no longer exists
    #[error("Message no longer exists")]
    Gone,

    /// Any other transport failure
    #[error("Transport error: {0}")]
    Transport(TransportError),
}

impl From<TransportError> for ResponderError {
    fn from(err: TransportError) -> Self {
        match err {
            TransportError::Gone => ResponderError::Gone,
            other => ResponderError::Transport(other),
        }
    }
}

/// Reply protocol for one session
pub struct Responder {
    transport: Arc<dyn Transport>,
    origin: Interaction,
    ack_window: Duration,
    phase: Phase,
    handle: Option<MessageRef>,
    fallback_used: bool,
}

impl std::fmt::Debug for Responder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Responder")
            .field("origin", &self.origin.token)
            .field("phase", &self.phase)
            .field("handle", &self.handle)
            .field("fallback_used", &self.fallback_used)
            .finish_non_exhaustive()
    }
}

impl Responder {
    pub fn new(transport: Arc<dyn Transport>, origin: Interaction, ack_window: Duration) -> Self {
        Self {
            transport,
            origin,
            ack_window,
            phase: Phase::Unacknowledged,
            handle: None,
            fallback_used: false,
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// The message this session owns, once `reply` succeeded
    pub fn handle(&self) -> Option<MessageRef> {
        self.handle
    }

    /// The interaction that opened the session
    pub fn origin(&self) -> &Interaction {
        &self.origin
    }

    pub fn channel(&self) -> ChannelId {
        self.origin.channel
    }

    /// Whether the first render went out as a fresh channel post
    pub fn used_fallback(&self) -> bool {
        self.fallback_used
    }

    /// Put the first message of the session on screen.
    ///
    /// Answers the originating interaction while its window is open. Once the
    /// handshake has expired, whether noticed up front or reported by the
    /// host, the message is posted to the channel instead, exactly once.
    pub async fn reply(
        &mut self,
        message: &OutboundMessage,
    ) -> Result<MessageRef, ResponderError> {
        if self.phase == Phase::Acknowledged {
            return Err(ResponderError::AlreadyAcknowledged);
        }

        let target = if self.origin.is_expired(self.ack_window) {
            debug!(token = %self.origin.token, "Acknowledgment window elapsed, posting to channel");
            self.fallback(message).await?
        } else {
            match self.transport.respond(&self.origin, message).await {
                Ok(target) => target,
                Err(TransportError::HandshakeExpired) => {
                    debug!(token = %self.origin.token, "Host reported expired handshake, posting to channel");
                    self.fallback(message).await?
                }
                Err(err) => return Err(err.into()),
            }
        };

        self.phase = Phase::Acknowledged;
        self.handle = Some(target);
        Ok(target)
    }

    async fn fallback(&mut self, message: &OutboundMessage) -> Result<MessageRef, ResponderError> {
        self.fallback_used = true;
        Ok(self.transport.send(self.origin.channel, message).await?)
    }

    /// Re-render the session's message
    pub async fn update(&self, message: &OutboundMessage) -> Result<(), ResponderError> {
        let target = self.acknowledged_handle()?;
        Ok(self.transport.edit(&target, message).await?)
    }

    /// Delete the session's message
    pub async fn delete(&self) -> Result<(), ResponderError> {
        let target = self.acknowledged_handle()?;
        Ok(self.transport.delete(&target).await?)
    }

    /// Tell the author of `interaction`, and only them, something
    pub async fn notify(&self, interaction: &Interaction, text: &str) -> Result<(), ResponderError> {
        Ok(self.transport.notify(interaction, text).await?)
    }

    fn acknowledged_handle(&self) -> Result<MessageRef, ResponderError> {
        match (self.phase, self.handle) {
            (Phase::Acknowledged, Some(target)) => Ok(target),
            _ => Err(ResponderError::NotAcknowledged),
        }
    }
}
