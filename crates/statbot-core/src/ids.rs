//! Host platform identities

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;

macro_rules! snowflake {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(pub u64);

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<u64> for $name {
            fn from(raw: u64) -> Self {
                Self(raw)
            }
        }
    };
}

snowflake!(
    /// A platform user
    UserId
);
snowflake!(
    /// A text channel
    ChannelId
);
snowflake!(
    /// A message inside a channel
    MessageId
);

/// Address of a message the bot has posted
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MessageRef {
    pub channel: ChannelId,
    pub message: MessageId,
}

impl MessageRef {
    pub fn new(channel: ChannelId, message: MessageId) -> Self {
        Self { channel, message }
    }
}

impl fmt::Display for MessageRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.channel, self.message)
    }
}

/// An inbound interaction: a slash command or a component activation.
///
/// The host only accepts an initial response to an interaction inside a short
/// window after `issued_at`; past that the token is useless for replying.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Interaction {
    /// Opaque token used to answer this interaction
    pub token: String,
    /// Channel the interaction happened in
    pub channel: ChannelId,
    /// User who triggered it
    pub user: UserId,
    /// When the host delivered it
    pub issued_at: DateTime<Utc>,
}

impl Interaction {
    /// Create an interaction issued now
    pub fn new(token: impl Into<String>, channel: ChannelId, user: UserId) -> Self {
        Self {
            token: token.into(),
            channel,
            user,
            issued_at: Utc::now(),
        }
    }

    /// Override the issue timestamp
    pub fn issued_at(mut self, issued_at: DateTime<Utc>) -> Self {
        self.issued_at = issued_at;
        self
    }

    /// Whether the acknowledgment window has elapsed at `now`
    pub fn is_expired_at(&self, now: DateTime<Utc>, window: Duration) -> bool {
        let window = chrono::Duration::from_std(window).unwrap_or(chrono::Duration::MAX);
        now.signed_duration_since(self.issued_at) > window
    }

    /// Whether the acknowledgment window has elapsed
    pub fn is_expired(&self, window: Duration) -> bool {
        self.is_expired_at(Utc::now(), window)
    }
}
