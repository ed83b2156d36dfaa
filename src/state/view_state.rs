//! Headless view model
//!
//! Stands in for the page markup the settings act on: the body class list
//! (theme and effect markers), the interactive controls and the
//! translatable labels.

use super::{Effect, Language, Section, Theme};
use regex::Regex;
use std::collections::BTreeMap;
use std::sync::OnceLock;

/// Translation keys of the static labels shown by the interface
pub const TRANSLATABLE_KEYS: &[&str] = &[
    "header.title",
    "header.subtitle",
    "login.title",
    "login.username",
    "login.password",
    "login.submit",
    "login.guest",
    "nav.database",
    "nav.personnel",
    "nav.incidents",
    "nav.settings",
    "nav.logout",
    "database.title",
    "personnel.title",
    "incidents.title",
    "settings.title",
    "settings.language",
    "settings.theme",
    "settings.effects",
    "settings.reset",
    "logs.title",
];

fn theme_marker_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"theme-\w+").expect("theme marker pattern is valid"))
}

/// Identifier of an interactive control
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ControlId(String);

impl ControlId {
    #[cfg(test)]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Language picker button, `lang-<code>`
    pub fn language(language: Language) -> Self {
        Self(format!("lang-{}", language.code()))
    }

    /// Theme picker button, `theme-<id>`
    pub fn theme(theme: Theme) -> Self {
        Self(format!("theme-{}", theme.id()))
    }

    /// Effect checkbox, `toggle-<effect>`
    pub fn effect_toggle(effect: Effect) -> Self {
        Self(format!("toggle-{}", effect.name()))
    }

    /// Navigation button, `nav-<section>`
    pub fn nav(section: Section) -> Self {
        Self(format!("nav-{}", section.id()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for ControlId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// State of a single control
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Control {
    /// Carries the `active` marker
    pub active: bool,

    /// Checkbox state, `None` for buttons
    pub checked: Option<bool>,
}

/// A label whose text comes from the translation table
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Label {
    pub key: String,
    pub text: String,
}

/// The mutable presentation surface
#[derive(Debug, Clone)]
pub struct ViewState {
    body_class: String,
    controls: BTreeMap<ControlId, Control>,
    labels: Vec<Label>,
}

impl Default for ViewState {
    fn default() -> Self {
        Self::new()
    }
}

impl ViewState {
    /// Create the view with every known control and label.
    /// Labels start out showing their raw key.
    pub fn new() -> Self {
        let mut controls = BTreeMap::new();
        for language in Language::all() {
            controls.insert(ControlId::language(*language), Control::default());
        }
        for theme in Theme::all() {
            controls.insert(ControlId::theme(*theme), Control::default());
        }
        for effect in Effect::all() {
            controls.insert(
                ControlId::effect_toggle(*effect),
                Control {
                    active: false,
                    checked: Some(true),
                },
            );
        }
        for section in Section::all() {
            controls.insert(ControlId::nav(*section), Control::default());
        }

        let labels = TRANSLATABLE_KEYS
            .iter()
            .map(|key| Label {
                key: key.to_string(),
                text: key.to_string(),
            })
            .collect();

        Self {
            body_class: String::new(),
            controls,
            labels,
        }
    }

    /// Current body class list, space separated
    pub fn body_class(&self) -> &str {
        &self.body_class
    }

    pub fn has_marker(&self, marker: &str) -> bool {
        self.body_class.split_whitespace().any(|c| c == marker)
    }

    pub fn add_marker(&mut self, marker: &str) {
        if !self.has_marker(marker) {
            if !self.body_class.is_empty() {
                self.body_class.push(' ');
            }
            self.body_class.push_str(marker);
        }
    }

    pub fn remove_marker(&mut self, marker: &str) {
        self.body_class = self
            .body_class
            .split_whitespace()
            .filter(|c| *c != marker)
            .collect::<Vec<_>>()
            .join(" ");
    }

    /// Strip every theme marker, then add `marker` if given
    pub fn replace_theme_marker(&mut self, marker: Option<&str>) {
        let stripped = theme_marker_pattern().replace_all(&self.body_class, "");
        self.body_class = stripped.split_whitespace().collect::<Vec<_>>().join(" ");
        if let Some(marker) = marker {
            self.add_marker(marker);
        }
    }

    /// The theme marker currently on the body, if any
    #[cfg(test)]
    pub fn theme_marker(&self) -> Option<&str> {
        theme_marker_pattern()
            .find(&self.body_class)
            .map(|m| m.as_str())
    }

    pub fn control(&self, id: &ControlId) -> Option<&Control> {
        self.controls.get(id)
    }

    /// Remove a control from the view
    #[cfg(test)]
    pub fn remove_control(&mut self, id: &ControlId) -> Option<Control> {
        self.controls.remove(id)
    }

    /// Clear `active` on every control whose id starts with `prefix`, then
    /// set it on `id`. A missing `id` only clears the group.
    pub fn set_active_in_group(&mut self, prefix: &str, id: &ControlId) {
        for (control_id, control) in self.controls.iter_mut() {
            if control_id.as_str().starts_with(prefix) {
                control.active = false;
            }
        }
        if let Some(control) = self.controls.get_mut(id) {
            control.active = true;
        }
    }

    /// The active control of a group
    #[cfg(test)]
    pub fn active_in_group(&self, prefix: &str) -> Option<&ControlId> {
        self.controls
            .iter()
            .find(|(id, c)| c.active && id.as_str().starts_with(prefix))
            .map(|(id, _)| id)
    }

    /// Set a checkbox. Returns false when no such control exists.
    pub fn set_checked(&mut self, id: &ControlId, checked: bool) -> bool {
        match self.controls.get_mut(id) {
            Some(control) => {
                control.checked = Some(checked);
                true
            }
            None => false,
        }
    }

    pub fn label_text(&self, key: &str) -> Option<&str> {
        self.labels
            .iter()
            .find(|l| l.key == key)
            .map(|l| l.text.as_str())
    }

    /// Update every label from `resolve`. Labels without a translation keep
    /// their current text. Returns the number of labels updated.
    pub fn relabel<'t>(&mut self, resolve: impl Fn(&str) -> Option<&'t str>) -> usize {
        let mut updated = 0;
        for label in self.labels.iter_mut() {
            if let Some(text) = resolve(&label.key) {
                label.text = text.to_string();
                updated += 1;
            }
        }
        updated
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_markers() {
        let mut view = ViewState::new();
        view.add_marker("no-crt");
        view.add_marker("no-crt");
        view.add_marker("no-grid");
        assert_eq!(view.body_class(), "no-crt no-grid");

        view.remove_marker("no-crt");
        assert_eq!(view.body_class(), "no-grid");
        assert!(!view.has_marker("no-crt"));
    }

    #[test]
    fn test_theme_marker_is_replaced() {
        let mut view = ViewState::new();
        view.add_marker("no-glitch");
        view.replace_theme_marker(Some("theme-amber"));
        view.replace_theme_marker(Some("theme-blue"));
        assert_eq!(view.body_class(), "no-glitch theme-blue");
        assert_eq!(view.theme_marker(), Some("theme-blue"));

        view.replace_theme_marker(None);
        assert_eq!(view.body_class(), "no-glitch");
        assert_eq!(view.theme_marker(), None);
    }

    #[test]
    fn test_active_group_is_exclusive() {
        let mut view = ViewState::new();
        view.set_active_in_group("lang-", &ControlId::language(Language::Es));
        view.set_active_in_group("lang-", &ControlId::language(Language::En));
        assert_eq!(
            view.active_in_group("lang-"),
            Some(&ControlId::language(Language::En))
        );
        assert!(!view.control(&ControlId::language(Language::Es)).unwrap().active);
    }

    #[test]
    fn test_missing_control_is_noop() {
        let mut view = ViewState::new();
        view.remove_control(&ControlId::theme(Theme::Red));
        view.set_active_in_group("theme-", &ControlId::theme(Theme::Red));
        assert_eq!(view.active_in_group("theme-"), None);
        assert!(!view.set_checked(&ControlId::new("toggle-sparkles"), true));
    }

    #[test]
    fn test_relabel_keeps_untranslated_text() {
        let mut view = ViewState::new();
        let updated = view.relabel(|key| (key == "nav.database").then_some("Database"));
        assert_eq!(updated, 1);
        assert_eq!(view.label_text("nav.database"), Some("Database"));
        assert_eq!(view.label_text("nav.personnel"), Some("nav.personnel"));
    }
}
