//! Session variants
//!
//! Each variant is a [`Behavior`](crate::session::Behavior) plugged into the
//! shared state machine, plus a shortcut on
//! [`SessionBuilder`](crate::session::SessionBuilder) that validates its layout.

mod browser;
mod paginator;
mod picker;
mod prompt;

pub use browser::{CategoryBrowser, HelpBrowser, HelpCategory};
pub use paginator::{Paginate, Paginator};
pub use picker::{ActionPicker, PickAction, PickerAction};
pub use prompt::{Answer, Choices, Prompt, SingleChoice};
