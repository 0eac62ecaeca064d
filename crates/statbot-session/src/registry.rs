//! Routing of inbound component events to live sessions

use crate::action::{Action, SessionId};
use crate::config::SessionConfig;
use statbot_core::{Interaction, Page, UserId};
use std::collections::HashMap;
use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};
use tokio::sync::mpsc::{self, error::TrySendError};
use tracing::{debug, warn};

/// A control activation addressed to one session
#[derive(Debug, Clone, PartialEq)]
pub struct InboundEvent {
    pub session: SessionId,
    pub action: Action,
    pub interaction: Interaction,
}

impl InboundEvent {
    pub fn new(session: SessionId, action: Action, interaction: Interaction) -> Self {
        Self {
            session,
            action,
            interaction,
        }
    }

    /// Decode a raw component activation; `None` if it is not ours
    pub fn from_component(
        custom_id: &str,
        values: &[String],
        interaction: Interaction,
    ) -> Option<Self> {
        let (session, action) = Action::parse(custom_id, values)?;
        Some(Self::new(session, action, interaction))
    }

    /// The user who activated the control
    pub fn actor(&self) -> UserId {
        self.interaction.user
    }
}

/// What travels through a session inbox
#[derive(Debug)]
pub(crate) enum Envelope {
    Event(InboundEvent),
    Rebind(Vec<Page>),
}

/// Result of handing something to a session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dispatch {
    /// Queued for the session
    Delivered,
    /// No live session with that id
    Unknown,
    /// The session's queue is full; the event was dropped
    Dropped,
}

/// Live sessions by id.
///
/// Each running session owns the receiving end of a bounded queue; the
/// registry only holds senders, so events for one session are processed in
/// arrival order by that session alone.
pub struct SessionRegistry {
    capacity: usize,
    inboxes: RwLock<HashMap<SessionId, mpsc::Sender<Envelope>>>,
}

impl Default for SessionRegistry {
    fn default() -> Self {
        Self::with_capacity(SessionConfig::default().inbox_capacity)
    }
}

impl SessionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry whose session queues hold `capacity` pending events
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            capacity: capacity.max(1),
            inboxes: RwLock::new(HashMap::new()),
        }
    }

    pub fn from_config(config: &SessionConfig) -> Self {
        Self::with_capacity(config.inbox_capacity)
    }

    fn read(&self) -> RwLockReadGuard<'_, HashMap<SessionId, mpsc::Sender<Envelope>>> {
        self.inboxes.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, HashMap<SessionId, mpsc::Sender<Envelope>>> {
        self.inboxes.write().unwrap_or_else(PoisonError::into_inner)
    }

    pub(crate) fn attach(&self, id: SessionId) -> mpsc::Receiver<Envelope> {
        let (tx, rx) = mpsc::channel(self.capacity);
        self.write().insert(id, tx);
        debug!(session = %id, "Session attached");
        rx
    }

    pub(crate) fn detach(&self, id: SessionId) {
        if self.write().remove(&id).is_some() {
            debug!(session = %id, "Session detached");
        }
    }

    fn deliver(&self, id: SessionId, envelope: Envelope) -> Dispatch {
        let Some(inbox) = self.read().get(&id).cloned() else {
            return Dispatch::Unknown;
        };
        match inbox.try_send(envelope) {
            Ok(()) => Dispatch::Delivered,
            Err(TrySendError::Full(_)) => {
                warn!(session = %id, "Session inbox full, event dropped");
                Dispatch::Dropped
            }
            Err(TrySendError::Closed(_)) => Dispatch::Unknown,
        }
    }

    /// Route an event to its session
    pub fn dispatch(&self, event: InboundEvent) -> Dispatch {
        self.deliver(event.session, Envelope::Event(event))
    }

    /// Decode a raw component activation and route it
    pub fn dispatch_component(
        &self,
        custom_id: &str,
        values: &[String],
        interaction: Interaction,
    ) -> Dispatch {
        match InboundEvent::from_component(custom_id, values, interaction) {
            Some(event) => self.dispatch(event),
            None => Dispatch::Unknown,
        }
    }

    /// Ask a running session to swap its page list.
    ///
    /// Sessions whose variant does not support it log and ignore the request.
    pub fn rebind(&self, id: SessionId, pages: Vec<Page>) -> Dispatch {
        self.deliver(id, Envelope::Rebind(pages))
    }

    pub fn contains(&self, id: SessionId) -> bool {
        self.read().contains_key(&id)
    }

    pub fn len(&self) -> usize {
        self.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.read().is_empty()
    }

    /// Drop every inbox; running sessions wind down as if idle
    pub fn shutdown(&self) {
        let mut inboxes = self.write();
        debug!(sessions = inboxes.len(), "Shutting down session registry");
        inboxes.clear();
    }
}
