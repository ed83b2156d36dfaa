//! Settings panel
//!
//! Shows the picker groups with their active control and the effect
//! checkboxes, as the view model currently has them.

use crate::state::{AppState, ControlId, Effect, Language, Theme};

/// Render the panel. Captions come from the view's labels, so they
/// follow the last relabel like every other static text.
pub fn render_settings_panel(state: &AppState) -> String {
    let view = &state.view;
    let caption = |key: &'static str| view.label_text(key).unwrap_or(key);
    let mut lines = vec![caption("settings.title").to_string()];

    let languages = Language::all()
        .iter()
        .map(|l| marked(l.code(), is_active(state, &ControlId::language(*l))))
        .collect::<Vec<_>>()
        .join(" ");
    lines.push(format!("{}: {}", caption("settings.language"), languages));

    let themes = Theme::all()
        .iter()
        .map(|t| marked(t.id(), is_active(state, &ControlId::theme(*t))))
        .collect::<Vec<_>>()
        .join(" ");
    lines.push(format!("{}: {}", caption("settings.theme"), themes));

    lines.push(format!("{}:", caption("settings.effects")));
    for effect in Effect::all() {
        let checked = view
            .control(&ControlId::effect_toggle(*effect))
            .and_then(|c| c.checked)
            .unwrap_or_else(|| state.settings.effects.is_enabled(*effect));
        lines.push(format!("  [{}] {}", if checked { "x" } else { " " }, effect));
    }

    if !view.body_class().is_empty() {
        lines.push(format!("body: {}", view.body_class()));
    }

    lines.join("\n")
}

fn is_active(state: &AppState, id: &ControlId) -> bool {
    state.view.control(id).map(|c| c.active).unwrap_or(false)
}

fn marked(name: &str, active: bool) -> String {
    if active {
        format!("[{}]", name)
    } else {
        name.to_string()
    }
}
