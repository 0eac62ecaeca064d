//! Interactive paginated sessions
//!
//! A session turns an ordered list of [`Page`](statbot_core::Page)s into a
//! button-driven UI bound to a single host message. It enforces that only its
//! owner drives it, closes itself after an idle period, and speaks the host's
//! two-phase reply protocol: one initial acknowledgment inside a short window,
//! then deadline-free edits.
//!
//! # Variants
//!
//! - [`Paginator`]: plain browsing with first/previous/stop/next/last
//! - [`HelpBrowser`]: browsing plus a category select that swaps the page list
//!   in place
//! - [`ActionPicker`]: one button per named action, resolves to the action
//! - [`Prompt`]: confirm/cancel or an option list, resolves to one [`Answer`]
//!
//! # Example
//!
//! ```rust,ignore
//! use statbot_session::{SessionBuilder, SessionRegistry};
//!
//! let registry = SessionRegistry::new();
//! let paginator = SessionBuilder::new(transport, interaction)
//!     .pages(pages)
//!     .paginator()?;
//! let outcome = paginator.run(&registry).await?;
//! ```

pub mod action;
pub mod capability;
pub mod config;
pub mod controls;
pub mod error;
pub mod guard;
pub mod pages;
pub mod registry;
pub mod responder;
pub mod session;
pub mod variants;

pub use action::{Action, SessionId};
pub use capability::{Capabilities, CapabilityProbe};
pub use config::{MAX_TIMEOUT, SessionConfig, SessionConfigBuilder};
pub use controls::{Button, ControlSet, Enablement, Menu, MenuKind};
pub use error::{Result, SessionError};
pub use guard::AccessGuard;
pub use pages::EmbedPages;
pub use registry::{Dispatch, InboundEvent, SessionRegistry};
pub use responder::{Phase, Responder, ResponderError};
pub use session::{
    Behavior, EventOutcome, Lifecycle, Outcome, Pager, Session, SessionBuilder, Started, Step,
    Teardown,
};
pub use variants::{
    ActionPicker, Answer, CategoryBrowser, Choices, HelpBrowser, HelpCategory, Paginate,
    Paginator, PickAction, PickerAction, Prompt, SingleChoice,
};
