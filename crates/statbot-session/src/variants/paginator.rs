//! Plain browsing

use crate::action::Action;
use crate::controls::ControlSet;
use crate::error::Result;
use crate::session::{Behavior, Pager, Session, SessionBuilder, Step, navigate};
use std::convert::Infallible;

/// Browse pages with first/previous/stop/next/last.
///
/// Never resolves to a value; it ends on stop or idle.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Paginate;

impl Behavior for Paginate {
    type Output = Infallible;

    fn controls(&self, pager: &Pager) -> ControlSet {
        ControlSet::navigation(pager.cursor(), pager.total())
    }

    fn transition(&self, pager: &Pager, action: &Action) -> Step<Infallible> {
        navigate(pager, action)
    }
}

pub type Paginator = Session<Paginate>;

impl SessionBuilder {
    /// Build a plain paginator
    pub fn paginator(self) -> Result<Paginator> {
        self.build(Paginate)
    }
}
