//! A host transport that renders to the terminal

use async_trait::async_trait;
use comfy_table::{ContentArrangement, Table, presets::UTF8_FULL};
use statbot_core::{
    ChannelId, Component, Interaction, MessageId, MessageRef, OutboundMessage, Page, Transport,
    TransportResult,
};
use std::collections::HashSet;
use std::fmt::Write as _;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Mutex, PoisonError};

/// Prints every call; messages live only as ids
#[derive(Debug, Default)]
pub struct ConsoleTransport {
    next_id: AtomicU64,
    live: Mutex<HashSet<MessageRef>>,
}

impl ConsoleTransport {
    pub fn new() -> Self {
        Self::default()
    }

    fn allocate(&self, channel: ChannelId) -> MessageRef {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed) + 1;
        let target = MessageRef::new(channel, MessageId(id));
        self.live
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(target);
        target
    }

    fn is_live(&self, target: &MessageRef) -> bool {
        self.live
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .contains(target)
    }
}

#[async_trait]
impl Transport for ConsoleTransport {
    async fn respond(
        &self,
        interaction: &Interaction,
        message: &OutboundMessage,
    ) -> TransportResult<MessageRef> {
        let target = self.allocate(interaction.channel);
        println!("── reply {target} ──\n{}", render(message));
        Ok(target)
    }

    async fn send(
        &self,
        channel: ChannelId,
        message: &OutboundMessage,
    ) -> TransportResult<MessageRef> {
        let target = self.allocate(channel);
        println!("── post {target} ──\n{}", render(message));
        Ok(target)
    }

    async fn edit(&self, target: &MessageRef, message: &OutboundMessage) -> TransportResult<()> {
        if !self.is_live(target) {
            return Err(statbot_core::TransportError::Gone);
        }
        println!("── edit {target} ──\n{}", render(message));
        Ok(())
    }

    async fn delete(&self, target: &MessageRef) -> TransportResult<()> {
        let removed = self
            .live
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(target);
        if !removed {
            return Err(statbot_core::TransportError::Gone);
        }
        println!("── deleted {target} ──");
        Ok(())
    }

    async fn notify(&self, interaction: &Interaction, text: &str) -> TransportResult<()> {
        println!("(only <@{}> sees this) {text}", interaction.user);
        Ok(())
    }
}

/// Text rendering of a message: the page, then one line of controls
pub fn render(message: &OutboundMessage) -> String {
    let mut out = render_page(&message.page);
    if message.has_controls() {
        let controls: Vec<String> = message.components.iter().map(render_component).collect();
        let _ = write!(out, "\n{}", controls.join(" "));
    }
    out
}

fn render_page(page: &Page) -> String {
    match page {
        Page::Text(text) => text.clone(),
        Page::Embed(embed) => {
            let mut table = Table::new();
            table
                .load_preset(UTF8_FULL)
                .set_content_arrangement(ContentArrangement::Dynamic)
                .set_header(vec![embed.title.as_str()]);
            if !embed.description.is_empty() {
                table.add_row(vec![embed.description.as_str()]);
            }
            for field in &embed.fields {
                table.add_row(vec![format!("{}: {}", field.name, field.value)]);
            }
            if let Some(image) = &embed.image {
                table.add_row(vec![format!("[image] {image}")]);
            }
            if let Some(footer) = &embed.footer {
                table.add_row(vec![footer.as_str()]);
            }
            table.to_string()
        }
        Page::Raw(map) => {
            serde_json::to_string_pretty(map).unwrap_or_else(|_| page.headline().to_string())
        }
    }
}

fn render_component(component: &Component) -> String {
    match component {
        Component::Button {
            label, disabled, ..
        } => {
            if *disabled {
                format!("[{label}·]")
            } else {
                format!("[{label}]")
            }
        }
        Component::Select {
            placeholder,
            options,
            ..
        } => {
            let values: Vec<&str> = options.iter().map(|o| o.value.as_str()).collect();
            format!("<{placeholder}: {}>", values.join(" | "))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use statbot_core::{ButtonStyle, Embed, TransportError, UserId};
    use tokio_test::assert_ok;

    #[test]
    fn test_render_embed_and_controls() {
        let page = Page::Embed(
            Embed::new("Stats")
                .with_field("K/D", "1.32", true)
                .with_footer("Page 1/2"),
        );
        let message = OutboundMessage::new(page).with_components(vec![
            Component::Button {
                custom_id: "x:prev".to_string(),
                label: "◀".to_string(),
                style: ButtonStyle::Primary,
                disabled: true,
            },
            Component::Button {
                custom_id: "x:next".to_string(),
                label: "▶".to_string(),
                style: ButtonStyle::Primary,
                disabled: false,
            },
        ]);

        let text = render(&message);
        assert!(text.contains("Stats"));
        assert!(text.contains("K/D: 1.32"));
        assert!(text.contains("Page 1/2"));
        assert!(text.ends_with("[◀·] [▶]"));
    }

    #[tokio::test]
    async fn test_deleted_message_is_gone() {
        let transport = ConsoleTransport::new();
        let origin = Interaction::new("tok", ChannelId(1), UserId(1));
        let message = OutboundMessage::new(Page::text("hi"));

        let target = transport.respond(&origin, &message).await.unwrap();
        assert_ok!(transport.edit(&target, &message).await);
        assert_ok!(transport.delete(&target).await);
        assert_eq!(
            transport.edit(&target, &message).await,
            Err(TransportError::Gone)
        );
    }
}
