//! In-memory transport
//!
//! Keeps every posted message in a map and records each call, so a session can
//! be driven end to end without a live host. Failures can be scripted per call
//! kind, and messages can be made to vanish as if a moderator deleted them.

use super::{Transport, TransportError, TransportResult};
use crate::ids::{ChannelId, Interaction, MessageId, MessageRef, UserId};
use crate::message::OutboundMessage;
use async_trait::async_trait;
use std::collections::{HashMap, VecDeque};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Mutex, MutexGuard, PoisonError};

/// One recorded transport call
#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    Respond {
        token: String,
        target: MessageRef,
        message: OutboundMessage,
    },
    Send {
        target: MessageRef,
        message: OutboundMessage,
    },
    Edit {
        target: MessageRef,
        message: OutboundMessage,
    },
    Delete {
        target: MessageRef,
    },
    Notify {
        user: UserId,
        text: String,
    },
}

#[derive(Debug, Default)]
struct State {
    calls: Vec<Call>,
    live: HashMap<MessageRef, OutboundMessage>,
    respond_failures: VecDeque<TransportError>,
    edit_failures: VecDeque<TransportError>,
}

/// Recording transport backed by a hash map
#[derive(Debug)]
pub struct MemoryTransport {
    next_id: AtomicU64,
    state: Mutex<State>,
}

impl Default for MemoryTransport {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryTransport {
    pub fn new() -> Self {
        Self {
            next_id: AtomicU64::new(1),
            state: Mutex::new(State::default()),
        }
    }

    fn state(&self) -> MutexGuard<'_, State> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn allocate(&self, channel: ChannelId) -> MessageRef {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        MessageRef::new(channel, MessageId(id))
    }

    /// Make the next `respond` call fail
    pub fn fail_next_respond(&self, error: TransportError) {
        self.state().respond_failures.push_back(error);
    }

    /// Make the next `edit` call fail
    pub fn fail_next_edit(&self, error: TransportError) {
        self.state().edit_failures.push_back(error);
    }

    /// Remove a message behind the bot's back
    pub fn vanish(&self, target: &MessageRef) {
        self.state().live.remove(target);
    }

    /// Every call recorded so far
    pub fn calls(&self) -> Vec<Call> {
        self.state().calls.clone()
    }

    /// Current content of a live message
    pub fn message(&self, target: &MessageRef) -> Option<OutboundMessage> {
        self.state().live.get(target).cloned()
    }

    /// Number of live messages
    pub fn live_count(&self) -> usize {
        self.state().live.len()
    }

    pub fn respond_count(&self) -> usize {
        self.count(|c| matches!(c, Call::Respond { .. }))
    }

    pub fn send_count(&self) -> usize {
        self.count(|c| matches!(c, Call::Send { .. }))
    }

    pub fn edit_count(&self) -> usize {
        self.count(|c| matches!(c, Call::Edit { .. }))
    }

    pub fn delete_count(&self) -> usize {
        self.count(|c| matches!(c, Call::Delete { .. }))
    }

    /// Actor-only notices, as `(user, text)` pairs
    pub fn notices(&self) -> Vec<(UserId, String)> {
        self.state()
            .calls
            .iter()
            .filter_map(|c| match c {
                Call::Notify { user, text } => Some((*user, text.clone())),
                _ => None,
            })
            .collect()
    }

    /// Last message content the bot put on screen through any path
    pub fn last_render(&self) -> Option<OutboundMessage> {
        self.state().calls.iter().rev().find_map(|c| match c {
            Call::Respond { message, .. }
            | Call::Send { message, .. }
            | Call::Edit { message, .. } => Some(message.clone()),
            _ => None,
        })
    }

    fn count(&self, predicate: impl Fn(&Call) -> bool) -> usize {
        self.state().calls.iter().filter(|c| predicate(c)).count()
    }
}

#[async_trait]
impl Transport for MemoryTransport {
    async fn respond(
        &self,
        interaction: &Interaction,
        message: &OutboundMessage,
    ) -> TransportResult<MessageRef> {
        let mut state = self.state();
        if let Some(error) = state.respond_failures.pop_front() {
            return Err(error);
        }

        let target = self.allocate(interaction.channel);
        state.live.insert(target, message.clone());
        state.calls.push(Call::Respond {
            token: interaction.token.clone(),
            target,
            message: message.clone(),
        });
        Ok(target)
    }

    async fn send(
        &self,
        channel: ChannelId,
        message: &OutboundMessage,
    ) -> TransportResult<MessageRef> {
        let target = self.allocate(channel);
        let mut state = self.state();
        state.live.insert(target, message.clone());
        state.calls.push(Call::Send {
            target,
            message: message.clone(),
        });
        Ok(target)
    }

    async fn edit(&self, target: &MessageRef, message: &OutboundMessage) -> TransportResult<()> {
        let mut state = self.state();
        if let Some(error) = state.edit_failures.pop_front() {
            return Err(error);
        }

        let Some(slot) = state.live.get_mut(target) else {
            return Err(TransportError::Gone);
        };
        *slot = message.clone();
        state.calls.push(Call::Edit {
            target: *target,
            message: message.clone(),
        });
        Ok(())
    }

    async fn delete(&self, target: &MessageRef) -> TransportResult<()> {
        let mut state = self.state();
        if state.live.remove(target).is_none() {
            return Err(TransportError::Gone);
        }
        state.calls.push(Call::Delete { target: *target });
        Ok(())
    }

    async fn notify(&self, interaction: &Interaction, text: &str) -> TransportResult<()> {
        self.state().calls.push(Call::Notify {
            user: interaction.user,
            text: text.to_string(),
        });
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::page::Page;
    use tokio_test::{assert_err, assert_ok};

    fn message(text: &str) -> OutboundMessage {
        OutboundMessage::new(Page::text(text))
    }

    #[tokio::test]
    async fn test_respond_then_edit() {
        let transport = MemoryTransport::new();
        let interaction = Interaction::new("tok", ChannelId(5), UserId(1));

        let target = transport.respond(&interaction, &message("one")).await.unwrap();
        assert_eq!(target.channel, ChannelId(5));

        assert_ok!(transport.edit(&target, &message("two")).await);
        assert_eq!(transport.message(&target).unwrap().page, Page::text("two"));
        assert_eq!(transport.respond_count(), 1);
        assert_eq!(transport.edit_count(), 1);
    }

    #[tokio::test]
    async fn test_scripted_respond_failure() {
        let transport = MemoryTransport::new();
        transport.fail_next_respond(TransportError::HandshakeExpired);
        let interaction = Interaction::new("tok", ChannelId(5), UserId(1));

        let err = transport.respond(&interaction, &message("x")).await.unwrap_err();
        assert_eq!(err, TransportError::HandshakeExpired);
        assert_eq!(transport.live_count(), 0);

        assert_ok!(transport.respond(&interaction, &message("x")).await);
    }

    #[tokio::test]
    async fn test_vanished_message_is_gone() {
        let transport = MemoryTransport::new();
        let target = transport.send(ChannelId(3), &message("x")).await.unwrap();

        transport.vanish(&target);
        assert_eq!(
            transport.edit(&target, &message("y")).await,
            Err(TransportError::Gone)
        );
        assert_err!(transport.delete(&target).await);
        assert_eq!(transport.delete_count(), 0);
    }

    #[tokio::test]
    async fn test_notices_are_recorded() {
        let transport = MemoryTransport::new();
        let interaction = Interaction::new("tok", ChannelId(5), UserId(77));
        transport.notify(&interaction, "not yours").await.unwrap();

        assert_eq!(transport.notices(), vec![(UserId(77), "not yours".to_string())]);
        assert!(transport.last_render().is_none());
    }
}
