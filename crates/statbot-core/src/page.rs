//! Page model
//!
//! A page is one renderable unit inside a session. Pages are immutable once
//! handed to a session.

use serde::{Deserialize, Serialize};

/// 24-bit RGB colour used for structured pages
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Color(pub u32);

impl Color {
    pub const DEFAULT: Color = Color(0x0058_65f2);
    pub const GREEN: Color = Color(0x0057_f287);
    pub const RED: Color = Color(0x00ed_4245);

    pub const fn from_rgb(r: u8, g: u8, b: u8) -> Self {
        Self(((r as u32) << 16) | ((g as u32) << 8) | b as u32)
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// A name/value field of a structured page
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmbedField {
    pub name: String,
    pub value: String,
    pub inline: bool,
}

/// Structured document page
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Embed {
    pub title: String,
    pub description: String,
    pub fields: Vec<EmbedField>,
    pub footer: Option<String>,
    pub image: Option<String>,
    pub color: Color,
}

impl Embed {
    /// Create an embed with a title
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Default::default()
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_field(
        mut self,
        name: impl Into<String>,
        value: impl Into<String>,
        inline: bool,
    ) -> Self {
        self.fields.push(EmbedField {
            name: name.into(),
            value: value.into(),
            inline,
        });
        self
    }

    pub fn with_footer(mut self, footer: impl Into<String>) -> Self {
        self.footer = Some(footer.into());
        self
    }

    pub fn with_image(mut self, url: impl Into<String>) -> Self {
        self.image = Some(url.into());
        self
    }

    pub fn with_color(mut self, color: Color) -> Self {
        self.color = color;
        self
    }
}

/// One renderable unit of a session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "body", rename_all = "snake_case")]
pub enum Page {
    /// Plain message content
    Text(String),
    /// Rich structured document
    Embed(Embed),
    /// Opaque payload forwarded to the host untouched
    Raw(serde_json::Map<String, serde_json::Value>),
}

impl Page {
    /// Plain text page
    pub fn text(content: impl Into<String>) -> Self {
        Page::Text(content.into())
    }

    /// Whether rendering this page needs rich content permissions
    pub fn is_rich(&self) -> bool {
        !matches!(self, Page::Text(_))
    }

    /// Short human-readable label, used in logs and console rendering
    pub fn headline(&self) -> &str {
        match self {
            Page::Text(text) => text.lines().next().unwrap_or_default(),
            Page::Embed(embed) => &embed.title,
            Page::Raw(map) => map
                .get("title")
                .and_then(serde_json::Value::as_str)
                .unwrap_or("<raw payload>"),
        }
    }
}

impl From<Embed> for Page {
    fn from(embed: Embed) -> Self {
        Page::Embed(embed)
    }
}

impl From<String> for Page {
    fn from(text: String) -> Self {
        Page::Text(text)
    }
}

impl From<&str> for Page {
    fn from(text: &str) -> Self {
        Page::Text(text.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_color_from_rgb() {
        assert_eq!(Color::from_rgb(0x12, 0x34, 0x56), Color(0x0012_3456));
    }

    #[test]
    fn test_embed_builder() {
        let embed = Embed::new("Ranked")
            .with_description("Season 3")
            .with_field("MMR", "3120", true)
            .with_footer("Page 1/2")
            .with_color(Color::GREEN);

        assert_eq!(embed.fields.len(), 1);
        assert_eq!(embed.footer.as_deref(), Some("Page 1/2"));
        assert_eq!(embed.color, Color::GREEN);
    }

    #[test]
    fn test_headline_and_richness() {
        let text = Page::text("first line\nsecond");
        assert_eq!(text.headline(), "first line");
        assert!(!text.is_rich());

        let embed: Page = Embed::new("Profile").into();
        assert_eq!(embed.headline(), "Profile");
        assert!(embed.is_rich());

        let raw = Page::Raw(serde_json::Map::new());
        assert_eq!(raw.headline(), "<raw payload>");
    }

    #[test]
    fn test_page_serialization_is_tagged() {
        let json = serde_json::to_value(Page::text("hi")).unwrap();
        assert_eq!(json["kind"], "text");
        assert_eq!(json["body"], "hi");
    }
}
