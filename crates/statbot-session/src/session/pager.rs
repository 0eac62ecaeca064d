//! Ordered pages with a cursor

use crate::error::{Result, SessionError};
use statbot_core::Page;

/// The page list of a session and the index of the page on screen.
///
/// Never empty, and the cursor always points at an existing page.
#[derive(Debug, Clone, PartialEq)]
pub struct Pager {
    pages: Vec<Page>,
    cursor: usize,
}

impl Pager {
    pub fn new(pages: Vec<Page>) -> Result<Self> {
        if pages.is_empty() {
            return Err(SessionError::EmptyPages);
        }
        Ok(Self { pages, cursor: 0 })
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn len(&self) -> usize {
        self.pages.len()
    }

    /// False for any pager built through [`Pager::new`]
    pub fn is_empty(&self) -> bool {
        self.pages.is_empty()
    }

    /// Index of the last page
    pub fn total(&self) -> usize {
        self.pages.len() - 1
    }

    pub fn current(&self) -> &Page {
        &self.pages[self.cursor]
    }

    /// Move the cursor, clamped to the last page
    pub(crate) fn seek(&mut self, cursor: usize) {
        self.cursor = cursor.min(self.total());
    }

    /// Swap the whole page list and rewind to the first page
    pub(crate) fn replace(&mut self, pages: Vec<Page>) -> Result<()> {
        if pages.is_empty() {
            return Err(SessionError::EmptyPages);
        }
        self.pages = pages;
        self.cursor = 0;
        Ok(())
    }
}
