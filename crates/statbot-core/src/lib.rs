//! Core types for statbot
//!
//! This crate defines the vocabulary shared by the session engine and the
//! host adapters: identities, the page model, outbound messages with their
//! interactive components, and the [`Transport`] trait that talks to the chat
//! platform.

pub mod context;
pub mod error;
pub mod ids;
pub mod message;
pub mod page;
pub mod transport;

pub use context::Context;
pub use error::{Error, Result};
pub use ids::{ChannelId, Interaction, MessageId, MessageRef, UserId};
pub use message::{ButtonStyle, Component, OutboundMessage, SelectOption};
pub use page::{Color, Embed, EmbedField, Page};
pub use transport::{Transport, TransportError, TransportResult};
