//! Channel capability probing

use statbot_core::ChannelId;

/// Answers what the bot may post in a channel
#[cfg_attr(test, mockall::automock)]
pub trait CapabilityProbe: Send + Sync {
    /// Whether plain messages can be sent at all
    fn can_send_messages(&self, channel: ChannelId) -> bool;

    /// Whether rich content (structured pages, components) renders
    fn can_render_rich_content(&self, channel: ChannelId) -> bool;
}

/// A fixed capability snapshot, the same for every channel
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Capabilities {
    pub send_messages: bool,
    pub rich_content: bool,
}

impl Capabilities {
    pub const ALL: Capabilities = Capabilities {
        send_messages: true,
        rich_content: true,
    };

    pub const PLAIN_ONLY: Capabilities = Capabilities {
        send_messages: true,
        rich_content: false,
    };

    pub const NONE: Capabilities = Capabilities {
        send_messages: false,
        rich_content: false,
    };
}

impl Default for Capabilities {
    fn default() -> Self {
        Self::ALL
    }
}

impl CapabilityProbe for Capabilities {
    fn can_send_messages(&self, _channel: ChannelId) -> bool {
        self.send_messages
    }

    fn can_render_rich_content(&self, _channel: ChannelId) -> bool {
        self.rich_content
    }
}
