//! Read-only context for page building
//!
//! Command handlers snapshot whatever ambient bot state they need (language,
//! colour preference, premium status) into a `Context` before building the
//! pages of a session. The session engine itself never looks at it.

use crate::page::Color;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Well-known context keys
pub mod keys {
    /// Language preference (e.g., "en", "de")
    pub const LANGUAGE: &str = "language";
    /// Embed colour preference as a 24-bit RGB integer
    pub const EMBED_COLOR: &str = "embed_color";
    /// Whether the requesting user or guild has premium features
    pub const PREMIUM: &str = "premium";
    /// Requesting user ID
    pub const USER_ID: &str = "user_id";
}

/// Context passed to page builders
///
/// # Example
///
/// ```
/// use statbot_core::{Color, Context};
///
/// let ctx = Context::new()
///     .with_language("en")
///     .with_embed_color(Color::from_rgb(0x33, 0x99, 0xff))
///     .with_premium(true);
///
/// assert_eq!(ctx.language(), Some("en"));
/// assert!(ctx.is_premium());
/// ```
#[derive(Debug, Clone, Default)]
pub struct Context {
    data: HashMap<String, serde_json::Value>,
}

impl Context {
    /// Create a new empty context
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the language preference
    pub fn with_language(mut self, lang: impl Into<String>) -> Self {
        self.insert(keys::LANGUAGE, serde_json::json!(lang.into()));
        self
    }

    /// Set the embed colour preference
    pub fn with_embed_color(mut self, color: Color) -> Self {
        self.insert(keys::EMBED_COLOR, serde_json::json!(color.0));
        self
    }

    /// Set the premium flag
    pub fn with_premium(mut self, premium: bool) -> Self {
        self.insert(keys::PREMIUM, serde_json::json!(premium));
        self
    }

    /// Set the requesting user ID
    pub fn with_user_id(mut self, user_id: u64) -> Self {
        self.insert(keys::USER_ID, serde_json::json!(user_id));
        self
    }

    /// Get the language preference
    pub fn language(&self) -> Option<&str> {
        self.get(keys::LANGUAGE).and_then(|v| v.as_str())
    }

    /// Embed colour, falling back to [`Color::DEFAULT`]
    pub fn embed_color(&self) -> Color {
        self.get(keys::EMBED_COLOR)
            .and_then(serde_json::Value::as_u64)
            .and_then(|raw| u32::try_from(raw).ok())
            .map_or(Color::DEFAULT, Color)
    }

    /// Whether premium features are enabled
    pub fn is_premium(&self) -> bool {
        self.get(keys::PREMIUM)
            .and_then(serde_json::Value::as_bool)
            .unwrap_or(false)
    }

    /// Requesting user ID
    pub fn user_id(&self) -> Option<u64> {
        self.get(keys::USER_ID).and_then(serde_json::Value::as_u64)
    }

    /// Insert a value into the context
    pub fn insert(&mut self, key: impl Into<String>, value: serde_json::Value) {
        self.data.insert(key.into(), value);
    }

    /// Get a value from the context
    pub fn get(&self, key: &str) -> Option<&serde_json::Value> {
        self.data.get(key)
    }

    /// Insert a typed value into the context
    pub fn insert_typed<T: Serialize>(
        &mut self,
        key: impl Into<String>,
        value: &T,
    ) -> crate::Result<()> {
        let json_value = serde_json::to_value(value).map_err(|e| {
            crate::Error::Context(format!("Failed to serialize context value: {e}"))
        })?;
        self.data.insert(key.into(), json_value);
        Ok(())
    }

    /// Get a typed value from the context
    pub fn get_typed<T: for<'de> Deserialize<'de>>(&self, key: &str) -> crate::Result<Option<T>> {
        match self.data.get(key) {
            None => Ok(None),
            Some(value) => {
                let typed = serde_json::from_value(value.clone()).map_err(|e| {
                    crate::Error::Context(format!("Failed to deserialize context value: {e}"))
                })?;
                Ok(Some(typed))
            }
        }
    }

    /// Check if a key exists in the context
    pub fn contains_key(&self, key: &str) -> bool {
        self.data.contains_key(key)
    }

    /// Get the number of entries in the context
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Check if the context is empty
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Serialize, Deserialize, PartialEq)]
    struct Rank {
        tier: String,
        points: u32,
    }

    #[test]
    fn test_defaults_when_empty() {
        let ctx = Context::new();
        assert!(ctx.is_empty());
        assert_eq!(ctx.language(), None);
        assert_eq!(ctx.embed_color(), Color::DEFAULT);
        assert!(!ctx.is_premium());
    }

    #[test]
    fn test_builder_chain() {
        let ctx = Context::new()
            .with_language("de")
            .with_embed_color(Color(0x00ff_00ff))
            .with_premium(true)
            .with_user_id(42);

        assert_eq!(ctx.language(), Some("de"));
        assert_eq!(ctx.embed_color(), Color(0x00ff_00ff));
        assert!(ctx.is_premium());
        assert_eq!(ctx.user_id(), Some(42));
        assert_eq!(ctx.len(), 4);
    }

    #[test]
    fn test_typed_insert_get() {
        let mut ctx = Context::new();
        let rank = Rank {
            tier: "Diamond".to_string(),
            points: 4200,
        };

        ctx.insert_typed("rank", &rank).unwrap();
        assert!(ctx.contains_key("rank"));

        let back: Rank = ctx.get_typed("rank").unwrap().unwrap();
        assert_eq!(back, rank);
    }

    #[test]
    fn test_get_typed_wrong_shape() {
        let mut ctx = Context::new();
        ctx.insert("rank", serde_json::json!("not a rank"));
        let result: crate::Result<Option<Rank>> = ctx.get_typed("rank");
        assert!(matches!(result, Err(crate::Error::Context(_))));
    }
}
