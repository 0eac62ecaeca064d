//! Single-owner access control

use statbot_core::UserId;

/// Restricts who may drive a session.
///
/// Only the owner's events reach the state machine; everyone else gets an
/// actor-only notice and the session does not change.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AccessGuard {
    owner: UserId,
}

impl AccessGuard {
    pub fn new(owner: UserId) -> Self {
        Self { owner }
    }

    pub fn owner(&self) -> UserId {
        self.owner
    }

    pub fn permits(&self, actor: UserId) -> bool {
        actor == self.owner
    }
}
