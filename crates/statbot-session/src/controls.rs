//! Control sets and their enablement rules
//!
//! A [`ControlSet`] is derived from the session state on every render; it is
//! never stored. Membership (which controls exist) and enablement (which of
//! them are disabled) are both recomputed from scratch each time.

use crate::action::{Action, SessionId};
use statbot_core::{ButtonStyle, Component, SelectOption};

pub const FIRST_LABEL: &str = "⏮";
pub const PREVIOUS_LABEL: &str = "◀";
pub const STOP_LABEL: &str = "⏹";
pub const NEXT_LABEL: &str = "▶";
pub const LAST_LABEL: &str = "⏭";

/// A button control
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Button {
    pub action: Action,
    pub label: String,
    pub style: ButtonStyle,
    pub disabled: bool,
}

impl Button {
    pub fn new(action: Action, label: impl Into<String>, style: ButtonStyle) -> Self {
        Self {
            action,
            label: label.into(),
            style,
            disabled: false,
        }
    }

    pub fn disabled(mut self, disabled: bool) -> Self {
        self.disabled = disabled;
        self
    }
}

/// What picking an entry of a menu means
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuKind {
    /// Entries are categories; picking one produces [`Action::Select`]
    Category,
    /// Entries are answers; picking one produces [`Action::Choose`]
    Option,
}

/// A select menu control
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Menu {
    pub kind: MenuKind,
    pub placeholder: String,
    pub options: Vec<SelectOption>,
    pub disabled: bool,
}

impl Menu {
    fn offers(&self, value: &str) -> bool {
        self.options.iter().any(|o| o.value == value)
    }
}

/// How an action relates to the current control set
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Enablement {
    /// No control carries this action
    Missing,
    /// The control exists but is disabled
    Disabled,
    /// The control exists and may be used
    Enabled,
}

/// The controls of one render
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ControlSet {
    buttons: Vec<Button>,
    menu: Option<Menu>,
}

impl ControlSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Navigation controls for a cursor over pages `0..=total`.
    ///
    /// `first`/`last` only exist when `total > 2`, `previous`/`stop`/`next`
    /// only when `total > 0`. A single page therefore gets no controls.
    pub fn navigation(cursor: usize, total: usize) -> Self {
        let mut set = Self::new();
        let with_jumps = total > 2;

        if with_jumps {
            set.push(
                Button::new(Action::First, FIRST_LABEL, ButtonStyle::Secondary)
                    .disabled(cursor <= 1),
            );
        }
        if total > 0 {
            set.push(
                Button::new(Action::Previous, PREVIOUS_LABEL, ButtonStyle::Primary)
                    .disabled(cursor == 0),
            );
            set.push(Button::new(Action::Stop, STOP_LABEL, ButtonStyle::Danger));
            set.push(
                Button::new(Action::Next, NEXT_LABEL, ButtonStyle::Primary)
                    .disabled(cursor >= total),
            );
        }
        if with_jumps {
            set.push(
                Button::new(Action::Last, LAST_LABEL, ButtonStyle::Secondary)
                    .disabled(cursor + 1 >= total),
            );
        }
        set
    }

    /// Append a button
    pub fn push(&mut self, button: Button) {
        self.buttons.push(button);
    }

    pub fn with_button(mut self, button: Button) -> Self {
        self.push(button);
        self
    }

    pub fn with_menu(mut self, menu: Menu) -> Self {
        self.menu = Some(menu);
        self
    }

    pub fn buttons(&self) -> &[Button] {
        &self.buttons
    }

    pub fn menu(&self) -> Option<&Menu> {
        self.menu.as_ref()
    }

    /// The button carrying `action`, if any
    pub fn button(&self, action: &Action) -> Option<&Button> {
        self.buttons.iter().find(|b| &b.action == action)
    }

    pub fn contains(&self, action: &Action) -> bool {
        self.enablement(action) != Enablement::Missing
    }

    pub fn is_empty(&self) -> bool {
        self.buttons.is_empty() && self.menu.is_none()
    }

    /// Resolve an action against this set
    pub fn enablement(&self, action: &Action) -> Enablement {
        if let Some(button) = self.button(action) {
            return Self::state(button.disabled);
        }

        let wanted = match action {
            Action::Select(value) => Some((MenuKind::Category, value)),
            Action::Choose(value) => Some((MenuKind::Option, value)),
            _ => None,
        };
        match (wanted, &self.menu) {
            (Some((kind, value)), Some(menu)) if menu.kind == kind && menu.offers(value) => {
                Self::state(menu.disabled)
            }
            _ => Enablement::Missing,
        }
    }

    fn state(disabled: bool) -> Enablement {
        if disabled {
            Enablement::Disabled
        } else {
            Enablement::Enabled
        }
    }

    /// Host components for this set, addressed to `session`
    pub fn to_components(&self, session: SessionId) -> Vec<Component> {
        let mut components: Vec<Component> = self
            .buttons
            .iter()
            .map(|b| Component::Button {
                custom_id: b.action.custom_id(session),
                label: b.label.clone(),
                style: b.style,
                disabled: b.disabled,
            })
            .collect();

        if let Some(menu) = &self.menu {
            let custom_id = match menu.kind {
                MenuKind::Category => Action::category_menu_id(session),
                MenuKind::Option => Action::option_menu_id(session),
            };
            components.push(Component::Select {
                custom_id,
                placeholder: menu.placeholder.clone(),
                options: menu.options.clone(),
                disabled: menu.disabled,
            });
        }
        components
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn disabled(set: &ControlSet, action: Action) -> bool {
        set.button(&action).unwrap().disabled
    }

    fn actions(set: &ControlSet) -> Vec<Action> {
        set.buttons().iter().map(|b| b.action.clone()).collect()
    }

    #[test]
    fn test_single_page_has_no_controls() {
        assert!(ControlSet::navigation(0, 0).is_empty());
    }

    #[test]
    fn test_two_pages_have_no_jump_controls() {
        let set = ControlSet::navigation(0, 1);
        assert_eq!(actions(&set), vec![Action::Previous, Action::Stop, Action::Next]);
    }

    #[test]
    fn test_three_pages_have_no_jump_controls() {
        let set = ControlSet::navigation(1, 2);
        assert!(!set.contains(&Action::First));
        assert!(!set.contains(&Action::Last));
    }

    #[test]
    fn test_four_pages_have_every_control() {
        let set = ControlSet::navigation(0, 3);
        assert_eq!(
            actions(&set),
            vec![
                Action::First,
                Action::Previous,
                Action::Stop,
                Action::Next,
                Action::Last
            ]
        );
    }

    #[test]
    fn test_seven_page_walkthrough() {
        let total = 6;

        let set = ControlSet::navigation(0, total);
        assert!(disabled(&set, Action::First));
        assert!(disabled(&set, Action::Previous));
        assert!(!disabled(&set, Action::Next));
        assert!(!disabled(&set, Action::Last));

        let set = ControlSet::navigation(5, total);
        assert!(!disabled(&set, Action::First));
        assert!(!disabled(&set, Action::Previous));
        assert!(!disabled(&set, Action::Next));
        assert!(disabled(&set, Action::Last));

        let set = ControlSet::navigation(6, total);
        assert!(disabled(&set, Action::Next));
        assert!(disabled(&set, Action::Last));
    }

    #[test]
    fn test_enablement_rules_hold_for_every_cursor() {
        for total in 3..12 {
            for cursor in 0..=total {
                let set = ControlSet::navigation(cursor, total);
                assert_eq!(disabled(&set, Action::Previous), cursor == 0);
                assert_eq!(disabled(&set, Action::Next), cursor == total);
                assert_eq!(disabled(&set, Action::First), cursor <= 1);
                assert_eq!(
                    disabled(&set, Action::Last),
                    cursor == total - 1 || cursor == total
                );
                assert!(!disabled(&set, Action::Stop));
                assert_eq!(set, ControlSet::navigation(cursor, total));
            }
        }
    }

    #[test]
    fn test_menu_enablement() {
        let menu = Menu {
            kind: MenuKind::Category,
            placeholder: "Pick a category".to_string(),
            options: vec![SelectOption::new("stats", "Stats")],
            disabled: false,
        };
        let set = ControlSet::navigation(0, 1).with_menu(menu);

        assert_eq!(
            set.enablement(&Action::Select("stats".to_string())),
            Enablement::Enabled
        );
        assert_eq!(
            set.enablement(&Action::Select("nope".to_string())),
            Enablement::Missing
        );
        assert_eq!(
            set.enablement(&Action::Choose("stats".to_string())),
            Enablement::Missing
        );
        assert_eq!(set.enablement(&Action::Previous), Enablement::Disabled);
        assert_eq!(set.enablement(&Action::Confirm), Enablement::Missing);
    }

    #[test]
    fn test_components_carry_session_ids() {
        let session = SessionId::new();
        let set = ControlSet::navigation(0, 1);
        let components = set.to_components(session);

        assert_eq!(components.len(), 3);
        assert_eq!(components[0].custom_id(), Action::Previous.custom_id(session));
        assert!(components[0].is_disabled());
        assert!(!components[2].is_disabled());
    }
}
