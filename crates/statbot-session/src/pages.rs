//! Helpers for turning long listings into session pages

use statbot_core::{Color, Context, Embed, EmbedField, Page};

/// Splits entries into structured pages with a "Page i/n" footer.
///
/// # Example
///
/// ```
/// use statbot_core::Context;
/// use statbot_session::EmbedPages;
///
/// let lines: Vec<String> = (1..=25).map(|i| format!("#{i}")).collect();
/// let pages = EmbedPages::new("Leaderboard", &Context::new())
///     .per_page(10)
///     .build_lines(&lines);
///
/// assert_eq!(pages.len(), 3);
/// ```
#[derive(Debug, Clone)]
pub struct EmbedPages {
    title: String,
    description: Option<String>,
    color: Color,
    per_page: usize,
}

impl EmbedPages {
    pub const DEFAULT_PER_PAGE: usize = 10;

    /// Pages titled `title`, coloured per the context
    pub fn new(title: impl Into<String>, context: &Context) -> Self {
        Self {
            title: title.into(),
            description: None,
            color: context.embed_color(),
            per_page: Self::DEFAULT_PER_PAGE,
        }
    }

    /// Entries per page, at least one
    pub fn per_page(mut self, per_page: usize) -> Self {
        self.per_page = per_page.max(1);
        self
    }

    /// Text shown above the entries on every page
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    fn page(&self, index: usize, count: usize) -> Embed {
        let embed = Embed::new(&self.title)
            .with_color(self.color)
            .with_footer(format!("Page {}/{}", index + 1, count));
        match &self.description {
            Some(description) => embed.with_description(description),
            None => embed,
        }
    }

    fn empty(&self) -> Vec<Page> {
        vec![Page::Embed(self.page(0, 1).with_description("No entries"))]
    }

    /// One entry per line
    pub fn build_lines(&self, lines: &[String]) -> Vec<Page> {
        if lines.is_empty() {
            return self.empty();
        }
        let count = lines.len().div_ceil(self.per_page);
        lines
            .chunks(self.per_page)
            .enumerate()
            .map(|(index, chunk)| {
                let body = chunk.join("\n");
                let embed = self.page(index, count);
                let description = match &self.description {
                    Some(header) => format!("{header}\n\n{body}"),
                    None => body,
                };
                Page::Embed(embed.with_description(description))
            })
            .collect()
    }

    /// One entry per field
    pub fn build_fields(&self, fields: Vec<EmbedField>) -> Vec<Page> {
        if fields.is_empty() {
            return self.empty();
        }
        let count = fields.len().div_ceil(self.per_page);
        fields
            .chunks(self.per_page)
            .enumerate()
            .map(|(index, chunk)| {
                let mut embed = self.page(index, count);
                embed.fields.extend_from_slice(chunk);
                Page::Embed(embed)
            })
            .collect()
    }
}
