//! Sample content for the console harness

use statbot_core::{ButtonStyle, Color, Context, Embed, EmbedField, Page, SelectOption};
use statbot_session::{EmbedPages, HelpCategory, PickerAction, Result};

const MAPS: [&str; 7] = [
    "Ancient", "Anubis", "Dust II", "Inferno", "Mirage", "Nuke", "Vertigo",
];

/// Context the demo pages are built with
pub fn context(premium: bool) -> Context {
    Context::new()
        .with_language("en")
        .with_embed_color(if premium { Color::GREEN } else { Color::DEFAULT })
        .with_premium(premium)
}

/// A match history split into `count` pages of three entries
pub fn match_history(count: usize, context: &Context) -> Vec<Page> {
    let lines: Vec<String> = (0..count * 3)
        .map(|i| {
            let map = MAPS[i % MAPS.len()];
            let (us, them) = (13 + i % 4, 7 + i % 9);
            format!("`#{:>3}` {map:<8} {us}:{them}", i + 1)
        })
        .collect();
    EmbedPages::new("Match history", context)
        .per_page(3)
        .description("Most recent first")
        .build_lines(&lines)
}

/// Per-map statistics as fields
fn map_stats(context: &Context) -> Vec<Page> {
    let fields = MAPS
        .iter()
        .enumerate()
        .map(|(i, map)| EmbedField {
            name: (*map).to_string(),
            value: format!("{}% win rate", 40 + i * 3),
            inline: true,
        })
        .collect();
    EmbedPages::new("Map statistics", context)
        .per_page(4)
        .build_fields(fields)
}

/// Categories of the help browser
pub fn help_categories(context: &Context) -> Result<Vec<HelpCategory>> {
    let commands = |names: &[&str]| -> Vec<String> {
        names.iter().map(|n| format!("`/{n}`")).collect()
    };
    Ok(vec![
        HelpCategory::new(
            "stats",
            "Statistics",
            EmbedPages::new("Statistics commands", context)
                .per_page(2)
                .build_lines(&commands(&["stats", "matches", "maps", "compare"])),
        )?
        .with_description("Player and match statistics"),
        HelpCategory::new("maps", "Maps", map_stats(context))?
            .with_description("Map pool breakdown"),
        HelpCategory::new(
            "profile",
            "Profile",
            vec![Page::Embed(
                Embed::new("Profile commands")
                    .with_description("`/profile link` `/profile unlink`")
                    .with_color(context.embed_color()),
            )],
        )?,
    ])
}

/// The single page of a confirmation prompt
pub fn prompt_page(context: &Context) -> Page {
    Page::Embed(
        Embed::new("Unlink profile?")
            .with_description("Your linked account and ratings will be removed.")
            .with_color(context.embed_color()),
    )
}

pub fn region_options() -> Vec<SelectOption> {
    vec![
        SelectOption::new("eu", "Europe"),
        SelectOption::new("na", "North America").with_description("US and Canada"),
        SelectOption::new("asia", "Asia"),
    ]
}

/// The profile manager's page and actions
pub fn profile_manager(context: &Context) -> (Page, Vec<PickerAction>) {
    let page = Page::Embed(
        Embed::new("Profile")
            .with_field("Account", "not linked", true)
            .with_field("Premium", context.is_premium().to_string(), true)
            .with_color(context.embed_color()),
    );
    let actions = vec![
        PickerAction::new("link", "Link account").with_style(ButtonStyle::Success),
        PickerAction::new("region", "Set region").with_style(ButtonStyle::Primary),
        PickerAction::new("unlink", "Unlink").with_style(ButtonStyle::Danger),
    ];
    (page, actions)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_history_page_count() {
        assert_eq!(match_history(7, &context(false)).len(), 7);
        assert_eq!(match_history(0, &context(false)).len(), 1);
    }

    #[test]
    fn test_help_categories_are_valid() {
        let categories = help_categories(&context(true)).unwrap();
        assert_eq!(categories.len(), 3);
        assert_eq!(categories[0].pages.len(), 2);
        assert_eq!(categories[1].pages.len(), 2);
    }
}
