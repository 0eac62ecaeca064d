//! Outbound messages and interactive components

use crate::page::Page;
use serde::{Deserialize, Serialize};

/// Visual style of a button
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ButtonStyle {
    Primary,
    Secondary,
    Success,
    Danger,
}

/// One entry of a select menu
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectOption {
    pub value: String,
    pub label: String,
    pub description: Option<String>,
}

impl SelectOption {
    pub fn new(value: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            label: label.into(),
            description: None,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

/// Interactive component attached to a message
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Component {
    Button {
        custom_id: String,
        label: String,
        style: ButtonStyle,
        disabled: bool,
    },
    Select {
        custom_id: String,
        placeholder: String,
        options: Vec<SelectOption>,
        disabled: bool,
    },
}

impl Component {
    /// The identifier the host echoes back when this component is used
    pub fn custom_id(&self) -> &str {
        match self {
            Component::Button { custom_id, .. } | Component::Select { custom_id, .. } => custom_id,
        }
    }

    pub fn is_disabled(&self) -> bool {
        match self {
            Component::Button { disabled, .. } | Component::Select { disabled, .. } => *disabled,
        }
    }
}

/// A fully rendered message: page content plus its controls
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutboundMessage {
    pub page: Page,
    pub components: Vec<Component>,
}

impl OutboundMessage {
    /// Message without any controls
    pub fn new(page: Page) -> Self {
        Self {
            page,
            components: Vec::new(),
        }
    }

    pub fn with_components(mut self, components: Vec<Component>) -> Self {
        self.components = components;
        self
    }

    /// Same content with every control stripped
    pub fn without_controls(&self) -> Self {
        Self::new(self.page.clone())
    }

    pub fn has_controls(&self) -> bool {
        !self.components.is_empty()
    }

    /// Look up a component by its custom id
    pub fn component(&self, custom_id: &str) -> Option<&Component> {
        self.components.iter().find(|c| c.custom_id() == custom_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn button(id: &str, disabled: bool) -> Component {
        Component::Button {
            custom_id: id.to_string(),
            label: id.to_string(),
            style: ButtonStyle::Secondary,
            disabled,
        }
    }

    #[test]
    fn test_without_controls_keeps_page() {
        let message = OutboundMessage::new(Page::text("stats"))
            .with_components(vec![button("a", false), button("b", true)]);
        assert!(message.has_controls());

        let stripped = message.without_controls();
        assert!(!stripped.has_controls());
        assert_eq!(stripped.page, message.page);
    }

    #[test]
    fn test_component_lookup() {
        let message =
            OutboundMessage::new(Page::text("x")).with_components(vec![button("next", true)]);
        let next = message.component("next").unwrap();
        assert!(next.is_disabled());
        assert!(message.component("prev").is_none());
    }
}
