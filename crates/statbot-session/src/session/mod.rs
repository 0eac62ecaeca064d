//! The session state machine
//!
//! A session moves through three states: [`Lifecycle::Pending`] until its
//! first render, [`Lifecycle::Active`] while it waits for events, and
//! [`Lifecycle::Closed`] once stopped, resolved or expired. Only its own event
//! path mutates it, one event at a time.

mod behavior;
mod pager;

pub use behavior::{Behavior, Step, Teardown, navigate};
pub use pager::Pager;

use crate::action::SessionId;
use crate::capability::{Capabilities, CapabilityProbe};
use crate::config::{MAX_TIMEOUT, SessionConfig, check_timeout};
use crate::controls::{ControlSet, Enablement};
use crate::error::{Result, SessionError};
use crate::guard::AccessGuard;
use crate::registry::{Envelope, InboundEvent, SessionRegistry};
use crate::responder::{Phase, Responder, ResponderError};
use statbot_core::{Interaction, MessageRef, OutboundMessage, Page, Transport, UserId};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::time::{Instant, timeout_at};
use tracing::{debug, info, warn};

/// Where a session is in its life
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Lifecycle {
    /// Built but not rendered yet
    Pending,
    /// On screen and accepting events
    Active,
    /// Terminal
    Closed,
}

/// Result of [`Session::start`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Started {
    /// The first page is on screen
    Displayed,
    /// The bot may not post in the channel at all; nothing was sent
    Suppressed,
    /// The host refused the first render; the session is closed
    Dropped,
}

/// How a session ended
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome<T> {
    /// The owner picked a value
    Resolved(T),
    /// The owner pressed stop
    Stopped,
    /// The idle timer fired
    TimedOut,
    /// The session never showed because the channel forbids posting
    Suppressed,
    /// The first render failed at the host
    Dropped,
    /// The registry went away while the session was waiting
    Disconnected,
}

/// What handling one inbound event did
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EventOutcome<T> {
    /// Not the owner; a notice went to the actor
    Rejected,
    /// Missing or disabled control, or the session is not active
    Ignored,
    /// State changed and the message was re-rendered
    Updated,
    /// The session is over
    Finished(Outcome<T>),
}

/// An interactive UI bound to one host message
pub struct Session<B: Behavior> {
    id: SessionId,
    pager: Pager,
    behavior: B,
    guard: AccessGuard,
    responder: Responder,
    probe: Arc<dyn CapabilityProbe>,
    config: SessionConfig,
    lifecycle: Lifecycle,
    idle_timeout: Duration,
    deadline: Option<Instant>,
}

impl<B: Behavior> Session<B> {
    pub fn id(&self) -> SessionId {
        self.id
    }

    pub fn owner(&self) -> UserId {
        self.guard.owner()
    }

    pub fn cursor(&self) -> usize {
        self.pager.cursor()
    }

    pub fn page_count(&self) -> usize {
        self.pager.len()
    }

    pub fn current_page(&self) -> &Page {
        self.pager.current()
    }

    pub fn phase(&self) -> Phase {
        self.responder.phase()
    }

    pub fn lifecycle(&self) -> Lifecycle {
        self.lifecycle
    }

    pub fn is_closed(&self) -> bool {
        self.lifecycle == Lifecycle::Closed
    }

    /// The message this session renders into, once displayed
    pub fn handle(&self) -> Option<MessageRef> {
        self.responder.handle()
    }

    /// When the session closes if nothing happens
    pub fn idle_deadline(&self) -> Option<Instant> {
        self.deadline
    }

    pub fn behavior(&self) -> &B {
        &self.behavior
    }

    /// Controls for the current state
    pub fn controls(&self) -> ControlSet {
        self.behavior.controls(&self.pager)
    }

    fn render_message(&self) -> OutboundMessage {
        OutboundMessage::new(self.pager.current().clone())
            .with_components(self.controls().to_components(self.id))
    }

    fn rearm(&mut self) {
        self.deadline = Some(Instant::now() + self.idle_timeout.min(MAX_TIMEOUT));
    }

    /// Put the first page on screen.
    ///
    /// Checks channel capabilities first. Without permission to post at all
    /// the session closes silently and reports [`Started::Suppressed`];
    /// without rich content it fails with
    /// [`SessionError::CannotRenderRichContent`] so the caller can fall back
    /// to plain text. A host failure on the first render is logged and
    /// closes the session with [`Started::Dropped`].
    pub async fn start(&mut self) -> Result<Started> {
        if self.lifecycle != Lifecycle::Pending {
            return Err(SessionError::AlreadyStarted);
        }

        let channel = self.responder.channel();
        if !self.probe.can_send_messages(channel) {
            info!(session = %self.id, %channel, "Cannot post in channel, session suppressed");
            self.lifecycle = Lifecycle::Closed;
            return Ok(Started::Suppressed);
        }
        if !self.probe.can_render_rich_content(channel) {
            info!(session = %self.id, %channel, "Rich content not allowed in channel");
            self.lifecycle = Lifecycle::Closed;
            return Err(SessionError::CannotRenderRichContent);
        }

        let message = self.render_message();
        let target = match self.responder.reply(&message).await {
            Ok(target) => target,
            Err(err) => {
                warn!(
                    session = %self.id,
                    %channel,
                    error = %err,
                    "First render failed, session dropped"
                );
                self.lifecycle = Lifecycle::Closed;
                return Ok(Started::Dropped);
            }
        };

        self.lifecycle = Lifecycle::Active;
        self.rearm();
        info!(
            session = %self.id,
            owner = %self.owner(),
            pages = self.pager.len(),
            message = %target,
            "Session started"
        );
        Ok(Started::Displayed)
    }

    /// Handle one inbound event
    pub async fn handle_event(&mut self, event: InboundEvent) -> EventOutcome<B::Output> {
        if event.session != self.id || self.lifecycle != Lifecycle::Active {
            debug!(session = %self.id, action = ?event.action, "Event for inactive session ignored");
            return EventOutcome::Ignored;
        }

        let actor = event.actor();
        if !self.guard.permits(actor) {
            let notice = self.config.rejection_text(self.owner());
            if let Err(err) = self.responder.notify(&event.interaction, &notice).await {
                warn!(session = %self.id, %actor, error = %err, "Failed to send rejection notice");
            }
            debug!(session = %self.id, %actor, "Rejected event from non-owner");
            return EventOutcome::Rejected;
        }

        if self.controls().enablement(&event.action) != Enablement::Enabled {
            debug!(session = %self.id, action = ?event.action, "Action not available");
            return EventOutcome::Ignored;
        }

        match self.behavior.transition(&self.pager, &event.action) {
            Step::Ignore => EventOutcome::Ignored,
            Step::Move(cursor) => {
                self.pager.seek(cursor);
                self.rearm();
                self.render().await;
                EventOutcome::Updated
            }
            Step::Rebind(pages) => match self.apply_rebind(pages).await {
                Ok(()) => {
                    self.rearm();
                    EventOutcome::Updated
                }
                Err(err) => {
                    warn!(session = %self.id, error = %err, "Rebind rejected");
                    EventOutcome::Ignored
                }
            },
            Step::Stop => {
                self.close(Teardown::Delete).await;
                EventOutcome::Finished(Outcome::Stopped)
            }
            Step::Resolve(value) => {
                self.close(Teardown::Delete).await;
                EventOutcome::Finished(Outcome::Resolved(value))
            }
        }
    }

    /// Close the session after inactivity
    pub async fn on_idle_timeout(&mut self) {
        if self.lifecycle != Lifecycle::Active {
            return;
        }
        debug!(session = %self.id, "Idle timeout");
        self.close(self.behavior.idle_teardown()).await;
    }

    /// Swap the page list, rewind to the first page and re-render.
    ///
    /// Message, owner and idle policy stay as they are.
    pub(crate) async fn apply_rebind(&mut self, pages: Vec<Page>) -> Result<()> {
        if self.lifecycle != Lifecycle::Active {
            return Err(SessionError::NotActive);
        }
        self.pager.replace(pages)?;
        self.render().await;
        Ok(())
    }

    async fn render(&self) {
        let message = self.render_message();
        match self.responder.update(&message).await {
            Ok(()) => debug!(session = %self.id, cursor = self.pager.cursor(), "Rendered"),
            Err(ResponderError::Gone) => {
                warn!(session = %self.id, "Message is gone, render dropped");
            }
            Err(err) => warn!(session = %self.id, error = %err, "Render failed"),
        }
    }

    async fn close(&mut self, teardown: Teardown) {
        if self.lifecycle == Lifecycle::Closed {
            return;
        }
        self.lifecycle = Lifecycle::Closed;
        self.deadline = None;

        let result = match teardown {
            Teardown::Delete => self.responder.delete().await,
            Teardown::StripControls => {
                let bare = self.render_message().without_controls();
                self.responder.update(&bare).await
            }
        };
        if let Err(err) = result {
            warn!(session = %self.id, ?teardown, error = %err, "Teardown failed");
        }
        info!(session = %self.id, ?teardown, "Session closed");
    }

    /// Start the session and process its events until it ends.
    ///
    /// Events reach the session through `registry`; the wait for the next one
    /// races the idle timer and whichever comes first wins.
    pub async fn run(mut self, registry: &SessionRegistry) -> Result<Outcome<B::Output>> {
        let mut inbox = registry.attach(self.id);
        let outcome = match self.start().await {
            Ok(Started::Displayed) => Ok(self.drive(&mut inbox).await),
            Ok(Started::Suppressed) => Ok(Outcome::Suppressed),
            Ok(Started::Dropped) => Ok(Outcome::Dropped),
            Err(err) => Err(err),
        };
        registry.detach(self.id);
        outcome
    }

    /// Run the session and return the owner's choice.
    ///
    /// Anything but an explicit choice, including the idle timer firing,
    /// ends in [`SessionError::NoChoice`].
    pub async fn resolution(self, registry: &SessionRegistry) -> Result<B::Output> {
        let id = self.id;
        match self.run(registry).await? {
            Outcome::Resolved(value) => Ok(value),
            outcome => {
                debug!(session = %id, ?outcome, "Session ended without a choice");
                Err(SessionError::NoChoice)
            }
        }
    }

    async fn drive(&mut self, inbox: &mut mpsc::Receiver<Envelope>) -> Outcome<B::Output> {
        loop {
            let deadline = self.deadline.unwrap_or_else(Instant::now);
            let envelope = match timeout_at(deadline, inbox.recv()).await {
                Ok(Some(envelope)) => envelope,
                Ok(None) => {
                    self.on_idle_timeout().await;
                    return Outcome::Disconnected;
                }
                Err(_) => {
                    self.on_idle_timeout().await;
                    return Outcome::TimedOut;
                }
            };

            match envelope {
                Envelope::Event(event) => {
                    if let EventOutcome::Finished(outcome) = self.handle_event(event).await {
                        return outcome;
                    }
                }
                Envelope::Rebind(pages) if self.behavior.rebindable() => {
                    if let Err(err) = self.apply_rebind(pages).await {
                        warn!(session = %self.id, error = %err, "Rebind rejected");
                    }
                }
                Envelope::Rebind(_) => {
                    warn!(session = %self.id, "Session does not support rebinding");
                }
            }
        }
    }
}

/// Builder for sessions of any variant
pub struct SessionBuilder {
    transport: Arc<dyn Transport>,
    origin: Interaction,
    owner: Option<UserId>,
    pages: Vec<Page>,
    config: SessionConfig,
    probe: Arc<dyn CapabilityProbe>,
    idle_timeout: Option<Duration>,
}

impl SessionBuilder {
    /// Start building a session answering `origin`
    pub fn new(transport: Arc<dyn Transport>, origin: Interaction) -> Self {
        Self {
            transport,
            origin,
            owner: None,
            pages: Vec::new(),
            config: SessionConfig::default(),
            probe: Arc::new(Capabilities::ALL),
            idle_timeout: None,
        }
    }

    /// Owner of the session; defaults to the user who triggered `origin`
    pub fn owner(mut self, owner: UserId) -> Self {
        self.owner = Some(owner);
        self
    }

    pub fn page(mut self, page: impl Into<Page>) -> Self {
        self.pages.push(page.into());
        self
    }

    pub fn pages(mut self, pages: impl IntoIterator<Item = Page>) -> Self {
        self.pages.extend(pages);
        self
    }

    pub fn config(mut self, config: SessionConfig) -> Self {
        self.config = config;
        self
    }

    /// Capability probe consulted by `start`
    pub fn probe(mut self, probe: Arc<dyn CapabilityProbe>) -> Self {
        self.probe = probe;
        self
    }

    /// Fixed capabilities instead of a live probe
    pub fn capabilities(self, capabilities: Capabilities) -> Self {
        self.probe(Arc::new(capabilities))
    }

    /// Override the variant's idle timeout; checked by [`SessionBuilder::build`]
    pub fn idle_timeout(mut self, timeout: Duration) -> Self {
        self.idle_timeout = Some(timeout);
        self
    }

    pub(crate) fn page_count(&self) -> usize {
        self.pages.len()
    }

    pub(crate) fn has_pages(&self) -> bool {
        !self.pages.is_empty()
    }

    /// Build a session with the given behaviour
    pub fn build<B: Behavior>(self, behavior: B) -> Result<Session<B>> {
        let SessionBuilder {
            transport,
            origin,
            owner,
            pages,
            config,
            probe,
            idle_timeout,
        } = self;

        if let Some(timeout) = idle_timeout {
            check_timeout("idle_timeout", timeout)?;
        }
        let pager = Pager::new(pages)?;
        let owner = owner.unwrap_or(origin.user);
        let idle_timeout = idle_timeout.unwrap_or_else(|| behavior.idle_timeout(&config));
        let responder = Responder::new(transport, origin, config.ack_window);

        Ok(Session {
            id: SessionId::new(),
            pager,
            behavior,
            guard: AccessGuard::new(owner),
            responder,
            probe,
            config,
            lifecycle: Lifecycle::Pending,
            idle_timeout,
            deadline: None,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::action::Action;
    use crate::capability::MockCapabilityProbe;
    use crate::variants::{Paginate, Paginator};
    use statbot_core::transport::MemoryTransport;
    use statbot_core::{ChannelId, TransportError};
    use tokio_test::assert_ok;

    const OWNER: UserId = UserId(100);
    const STRANGER: UserId = UserId(200);

    fn pages(n: usize) -> Vec<Page> {
        (1..=n).map(|i| Page::text(format!("page {i}"))).collect()
    }

    fn interaction(user: UserId) -> Interaction {
        Interaction::new(format!("tok-{user}"), ChannelId(1), user)
    }

    fn paginator(transport: &Arc<MemoryTransport>, n: usize) -> Paginator {
        SessionBuilder::new(transport.clone(), interaction(OWNER))
            .pages(pages(n))
            .build(Paginate)
            .unwrap()
    }

    fn event(session: &Paginator, user: UserId, action: Action) -> InboundEvent {
        InboundEvent::new(session.id(), action, interaction(user))
    }

    #[test]
    fn test_zero_pages_rejected() {
        let transport = Arc::new(MemoryTransport::new());
        let result = SessionBuilder::new(transport, interaction(OWNER)).build(Paginate);
        assert!(matches!(result, Err(SessionError::EmptyPages)));
    }

    #[tokio::test]
    async fn test_start_renders_first_page() {
        for n in 1..=6 {
            let transport = Arc::new(MemoryTransport::new());
            let mut session = paginator(&transport, n);
            assert_eq!(session.phase(), Phase::Unacknowledged);
            assert_eq!(session.handle(), None);

            assert_eq!(session.start().await, Ok(Started::Displayed));
            assert_eq!(session.cursor(), 0);
            assert_eq!(session.phase(), Phase::Acknowledged);
            assert_eq!(session.lifecycle(), Lifecycle::Active);
            assert!(session.handle().is_some());
            assert!(session.idle_deadline().is_some());

            let shown = transport.last_render().unwrap();
            assert_eq!(shown.page, Page::text("page 1"));
            assert_eq!(shown.has_controls(), n > 1);
        }
    }

    #[tokio::test]
    async fn test_start_twice_fails() {
        let transport = Arc::new(MemoryTransport::new());
        let mut session = paginator(&transport, 2);
        assert_ok!(session.start().await);
        assert_eq!(session.start().await, Err(SessionError::AlreadyStarted));
        assert_eq!(transport.respond_count(), 1);
    }

    #[tokio::test]
    async fn test_expired_handshake_still_displays() {
        let transport = Arc::new(MemoryTransport::new());
        transport.fail_next_respond(TransportError::HandshakeExpired);
        let mut session = paginator(&transport, 1);

        assert_eq!(session.start().await, Ok(Started::Displayed));
        assert_eq!(session.phase(), Phase::Acknowledged);
        assert_eq!(transport.send_count(), 1);
        assert_eq!(transport.live_count(), 1);
    }

    #[tokio::test]
    async fn test_failed_first_render_is_dropped() {
        for error in [TransportError::Gone, TransportError::Other("503".to_string())] {
            let transport = Arc::new(MemoryTransport::new());
            transport.fail_next_respond(error);
            let mut session = paginator(&transport, 1);

            assert_eq!(session.start().await, Ok(Started::Dropped));
            assert!(session.is_closed());
            assert_eq!(session.handle(), None);
            assert_eq!(session.idle_deadline(), None);
            assert_eq!(transport.live_count(), 0);
        }
    }

    #[tokio::test]
    async fn test_run_reports_dropped_first_render() {
        let transport = Arc::new(MemoryTransport::new());
        transport.fail_next_respond(TransportError::Forbidden("missing access".to_string()));
        let registry = SessionRegistry::new();
        let session = paginator(&transport, 3);
        let id = session.id();

        assert_eq!(session.run(&registry).await, Ok(Outcome::Dropped));
        assert!(!registry.contains(id));
    }

    #[test]
    fn test_idle_timeout_override_is_checked() {
        for timeout in [Duration::ZERO, Duration::from_secs(u64::MAX)] {
            let transport = Arc::new(MemoryTransport::new());
            let result = SessionBuilder::new(transport, interaction(OWNER))
                .pages(pages(2))
                .idle_timeout(timeout)
                .build(Paginate);
            assert!(matches!(result, Err(SessionError::Config(_))));
        }
    }

    #[tokio::test]
    async fn test_missing_send_permission_is_silent() {
        let transport = Arc::new(MemoryTransport::new());
        let mut probe = MockCapabilityProbe::new();
        probe.expect_can_send_messages().return_const(false);
        probe.expect_can_render_rich_content().never();

        let mut session = SessionBuilder::new(transport.clone(), interaction(OWNER))
            .pages(pages(3))
            .probe(Arc::new(probe))
            .build(Paginate)
            .unwrap();

        assert_eq!(session.start().await, Ok(Started::Suppressed));
        assert!(session.is_closed());
        assert!(transport.calls().is_empty());
    }

    #[tokio::test]
    async fn test_missing_rich_content_is_distinguishable() {
        let transport = Arc::new(MemoryTransport::new());
        let mut probe = MockCapabilityProbe::new();
        probe
            .expect_can_send_messages()
            .withf(|channel| *channel == ChannelId(1))
            .return_const(true);
        probe.expect_can_render_rich_content().times(1).return_const(false);

        let mut session = SessionBuilder::new(transport.clone(), interaction(OWNER))
            .pages(pages(3))
            .probe(Arc::new(probe))
            .build(Paginate)
            .unwrap();

        assert_eq!(session.start().await, Err(SessionError::CannotRenderRichContent));
        assert!(transport.calls().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_rejected_event_changes_nothing() {
        let transport = Arc::new(MemoryTransport::new());
        let mut session = paginator(&transport, 5);
        session.start().await.unwrap();
        let deadline = session.idle_deadline();

        tokio::time::advance(Duration::from_secs(10)).await;
        let outcome = session.handle_event(event(&session, STRANGER, Action::Next)).await;

        assert_eq!(outcome, EventOutcome::Rejected);
        assert_eq!(session.cursor(), 0);
        assert_eq!(session.idle_deadline(), deadline);
        assert_eq!(
            transport.notices(),
            vec![(STRANGER, "Only <@100> can use these controls.".to_string())]
        );
        assert_eq!(transport.edit_count(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_accepted_event_rearms_idle_timer() {
        let transport = Arc::new(MemoryTransport::new());
        let mut session = paginator(&transport, 5);
        session.start().await.unwrap();
        let first_deadline = session.idle_deadline().unwrap();

        tokio::time::advance(Duration::from_secs(10)).await;
        let outcome = session.handle_event(event(&session, OWNER, Action::Next)).await;

        assert_eq!(outcome, EventOutcome::Updated);
        assert_eq!(session.cursor(), 1);
        assert_eq!(
            session.idle_deadline().unwrap(),
            first_deadline + Duration::from_secs(10)
        );
        assert_eq!(transport.last_render().unwrap().page, Page::text("page 2"));
    }

    #[tokio::test(start_paused = true)]
    async fn test_disabled_control_is_a_no_op() {
        let transport = Arc::new(MemoryTransport::new());
        let mut session = paginator(&transport, 5);
        session.start().await.unwrap();
        let deadline = session.idle_deadline();

        tokio::time::advance(Duration::from_secs(1)).await;
        for action in [Action::Previous, Action::First, Action::Confirm] {
            let outcome = session.handle_event(event(&session, OWNER, action)).await;
            assert_eq!(outcome, EventOutcome::Ignored);
        }
        assert_eq!(session.idle_deadline(), deadline);
        assert_eq!(transport.edit_count(), 0);
    }

    #[tokio::test]
    async fn test_seven_page_walkthrough() {
        let transport = Arc::new(MemoryTransport::new());
        let mut session = paginator(&transport, 7);
        session.start().await.unwrap();

        for _ in 0..5 {
            session.handle_event(event(&session, OWNER, Action::Next)).await;
        }
        assert_eq!(session.cursor(), 5);
        let controls = session.controls();
        assert!(!controls.button(&Action::First).unwrap().disabled);
        assert!(!controls.button(&Action::Previous).unwrap().disabled);
        assert!(!controls.button(&Action::Next).unwrap().disabled);

        session.handle_event(event(&session, OWNER, Action::Next)).await;
        assert_eq!(session.cursor(), 6);
        let shown = transport.last_render().unwrap();
        let next = shown.component(&Action::Next.custom_id(session.id())).unwrap();
        let last = shown.component(&Action::Last.custom_id(session.id())).unwrap();
        assert!(next.is_disabled());
        assert!(last.is_disabled());

        let outcome = session.handle_event(event(&session, OWNER, Action::First)).await;
        assert_eq!(outcome, EventOutcome::Updated);
        assert_eq!(session.cursor(), 0);
    }

    #[tokio::test]
    async fn test_stop_deletes_message() {
        let transport = Arc::new(MemoryTransport::new());
        let mut session = paginator(&transport, 3);
        session.start().await.unwrap();

        let outcome = session.handle_event(event(&session, OWNER, Action::Stop)).await;
        assert_eq!(outcome, EventOutcome::Finished(Outcome::Stopped));
        assert!(session.is_closed());
        assert_eq!(transport.delete_count(), 1);
        assert_eq!(transport.live_count(), 0);

        let late = session.handle_event(event(&session, OWNER, Action::Next)).await;
        assert_eq!(late, EventOutcome::Ignored);
    }

    #[tokio::test]
    async fn test_gone_message_keeps_session_alive() {
        let transport = Arc::new(MemoryTransport::new());
        let mut session = paginator(&transport, 4);
        session.start().await.unwrap();
        transport.vanish(&session.handle().unwrap());

        let outcome = session.handle_event(event(&session, OWNER, Action::Next)).await;
        assert_eq!(outcome, EventOutcome::Updated);
        assert_eq!(session.cursor(), 1);
        assert_eq!(session.lifecycle(), Lifecycle::Active);
        assert_eq!(transport.edit_count(), 0);
    }

    #[tokio::test]
    async fn test_idle_timeout_strips_controls() {
        let transport = Arc::new(MemoryTransport::new());
        let mut session = paginator(&transport, 4);
        session.start().await.unwrap();
        session.handle_event(event(&session, OWNER, Action::Next)).await;

        session.on_idle_timeout().await;
        assert!(session.is_closed());
        assert_eq!(session.idle_deadline(), None);

        let target = session.handle().unwrap();
        let shown = transport.message(&target).unwrap();
        assert_eq!(shown.page, Page::text("page 2"));
        assert!(!shown.has_controls());

        let edits = transport.edit_count();
        session.on_idle_timeout().await;
        assert_eq!(transport.edit_count(), edits);
    }

    #[tokio::test]
    async fn test_idle_teardown_swallows_transport_errors() {
        let transport = Arc::new(MemoryTransport::new());
        let mut session = paginator(&transport, 3);
        session.start().await.unwrap();
        let target = session.handle().unwrap();

        transport.fail_next_edit(TransportError::Other("timeout".to_string()));
        session.on_idle_timeout().await;
        assert_eq!(session.lifecycle(), Lifecycle::Closed);
        assert_eq!(session.idle_deadline(), None);
        assert!(transport.message(&target).unwrap().has_controls());

        let mut session = paginator(&transport, 3);
        session.start().await.unwrap();
        transport.vanish(&session.handle().unwrap());
        session.on_idle_timeout().await;
        assert!(session.is_closed());
    }

    #[tokio::test(start_paused = true)]
    async fn test_run_times_out_without_events() {
        let transport = Arc::new(MemoryTransport::new());
        let registry = SessionRegistry::new();
        let session = paginator(&transport, 3);
        let started = Instant::now();

        let outcome = session.run(&registry).await.unwrap();
        assert_eq!(outcome, Outcome::TimedOut);
        let elapsed = started.elapsed();
        let timeout = SessionConfig::default().idle_timeout;
        assert!(elapsed >= timeout && elapsed < timeout + Duration::from_secs(1));
        assert!(registry.is_empty());
        assert!(!transport.last_render().unwrap().has_controls());
    }

    #[tokio::test(start_paused = true)]
    async fn test_run_processes_events_in_order() {
        let transport = Arc::new(MemoryTransport::new());
        let registry = Arc::new(SessionRegistry::new());
        let session = paginator(&transport, 5);
        let id = session.id();

        let task = tokio::spawn({
            let registry = registry.clone();
            async move { session.run(&registry).await }
        });
        while !registry.contains(id) || transport.last_render().is_none() {
            tokio::task::yield_now().await;
        }

        for action in [Action::Next, Action::Next, Action::Previous, Action::Stop] {
            let dispatched =
                registry.dispatch(InboundEvent::new(id, action, interaction(OWNER)));
            assert_eq!(dispatched, crate::registry::Dispatch::Delivered);
        }

        let outcome = task.await.unwrap().unwrap();
        assert_eq!(outcome, Outcome::Stopped);
        assert_eq!(transport.edit_count(), 3);
        assert!(!registry.contains(id));
    }

    #[tokio::test(start_paused = true)]
    async fn test_registry_shutdown_disconnects() {
        let transport = Arc::new(MemoryTransport::new());
        let registry = Arc::new(SessionRegistry::new());
        let session = paginator(&transport, 2);
        let id = session.id();

        let task = tokio::spawn({
            let registry = registry.clone();
            async move { session.run(&registry).await }
        });
        while !registry.contains(id) {
            tokio::task::yield_now().await;
        }

        registry.shutdown();
        assert_eq!(task.await.unwrap(), Ok(Outcome::Disconnected));
    }
}
