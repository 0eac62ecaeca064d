//! Category browser used by the help command

use crate::action::Action;
use crate::controls::{ControlSet, Menu, MenuKind};
use crate::error::{Result, SessionError};
use crate::session::{Behavior, Pager, Session, SessionBuilder, Step, navigate};
use statbot_core::{Context, Embed, Page, SelectOption};
use std::collections::HashSet;
use std::convert::Infallible;

const DEFAULT_PLACEHOLDER: &str = "Choose a category";

/// A named group of pages selectable from the browser's menu
#[derive(Debug, Clone, PartialEq)]
pub struct HelpCategory {
    pub key: String,
    pub label: String,
    pub description: Option<String>,
    pub pages: Vec<Page>,
}

impl HelpCategory {
    pub fn new(key: impl Into<String>, label: impl Into<String>, pages: Vec<Page>) -> Result<Self> {
        let key = key.into();
        if pages.is_empty() {
            return Err(SessionError::EmptyCategory(key));
        }
        Ok(Self {
            key,
            label: label.into(),
            description: None,
            pages,
        })
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    fn option(&self) -> SelectOption {
        let option = SelectOption::new(&self.key, &self.label);
        match &self.description {
            Some(description) => option.with_description(description),
            None => option,
        }
    }
}

/// Browsing plus a category menu that swaps the page list in place
#[derive(Debug, Clone, PartialEq)]
pub struct CategoryBrowser {
    categories: Vec<HelpCategory>,
    placeholder: String,
}

impl CategoryBrowser {
    /// Category keys must be unique and there must be at least one category
    pub fn new(categories: Vec<HelpCategory>) -> Result<Self> {
        if categories.is_empty() {
            return Err(SessionError::InvalidLayout(
                "a category browser needs at least one category".to_string(),
            ));
        }
        let mut seen = HashSet::new();
        if let Some(dup) = categories.iter().find(|c| !seen.insert(c.key.as_str())) {
            return Err(SessionError::InvalidLayout(format!(
                "duplicate category '{}'",
                dup.key
            )));
        }
        Ok(Self {
            categories,
            placeholder: DEFAULT_PLACEHOLDER.to_string(),
        })
    }

    pub fn with_placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.placeholder = placeholder.into();
        self
    }

    pub fn categories(&self) -> &[HelpCategory] {
        &self.categories
    }

    pub fn category(&self, key: &str) -> Option<&HelpCategory> {
        self.categories.iter().find(|c| c.key == key)
    }

    /// Landing page listing every category
    pub fn overview(&self, title: &str, context: &Context) -> Page {
        let embed = self.categories.iter().fold(
            Embed::new(title)
                .with_description(self.placeholder.clone())
                .with_color(context.embed_color()),
            |embed, category| {
                let value = category.description.as_deref().unwrap_or("\u{200b}");
                embed.with_field(&category.label, value, false)
            },
        );
        Page::Embed(embed)
    }
}

impl Behavior for CategoryBrowser {
    type Output = Infallible;

    fn controls(&self, pager: &Pager) -> ControlSet {
        ControlSet::navigation(pager.cursor(), pager.total()).with_menu(Menu {
            kind: MenuKind::Category,
            placeholder: self.placeholder.clone(),
            options: self.categories.iter().map(HelpCategory::option).collect(),
            disabled: false,
        })
    }

    fn transition(&self, pager: &Pager, action: &Action) -> Step<Infallible> {
        match action {
            Action::Select(key) => self
                .category(key)
                .map_or(Step::Ignore, |category| Step::Rebind(category.pages.clone())),
            _ => navigate(pager, action),
        }
    }

    fn rebindable(&self) -> bool {
        true
    }
}

pub type HelpBrowser = Session<CategoryBrowser>;

impl Session<CategoryBrowser> {
    /// Replace the page list and rewind to its first page.
    ///
    /// The message, owner and idle policy are kept; the idle timer is not
    /// rearmed.
    pub async fn rebind(&mut self, pages: Vec<Page>) -> Result<()> {
        self.apply_rebind(pages).await
    }
}

impl SessionBuilder {
    /// Build a help browser.
    ///
    /// Without explicit pages the browser opens on an overview of its
    /// categories, styled from `context`.
    pub fn help_browser(
        self,
        categories: Vec<HelpCategory>,
        context: &Context,
    ) -> Result<HelpBrowser> {
        let browser = CategoryBrowser::new(categories)?;
        let builder = if self.has_pages() {
            self
        } else {
            self.page(browser.overview("Help", context))
        };
        builder.build(browser)
    }
}
