//! UI module for SCP Terminal
//!
//! Text renderers for every pane of the terminal:
//! - Anomaly entry list and detail view
//! - Personnel registry
//! - Incident reports
//! - Settings panel
//! - System log
//!
//! Renderers are pure functions of a [`RenderContext`]. The
//! [`RenderDispatch`] trait is the seam the settings applier calls to
//! repaint the dynamic lists after a language change.

mod entries;
mod incidents;
mod personnel;
mod settings_panel;
mod system_log;

use crate::data::DataFeeds;
use crate::i18n::TranslationTable;
use crate::state::{Language, Section};

pub use entries::{render_entry_detail, render_entry_list};
pub use incidents::render_incident_list;
pub use personnel::render_personnel_table;
pub use settings_panel::render_settings_panel;
pub use system_log::{format_log_entry, render_log_tail};

/// Everything a list renderer reads
#[derive(Debug, Clone, Copy)]
pub struct RenderContext<'a> {
    pub translations: &'a TranslationTable,
    pub language: Language,
    pub feeds: &'a DataFeeds,
}

impl<'a> RenderContext<'a> {
    /// Translated text, or `fallback` when the key is missing
    pub fn text(&self, key: &str, fallback: &'a str) -> &'a str {
        self.translations.text_or(self.language, key, fallback)
    }
}

/// Re-render triggers for the dynamic lists
pub trait RenderDispatch {
    fn render_entries(&mut self, ctx: &RenderContext<'_>);
    fn render_personnel(&mut self, ctx: &RenderContext<'_>);
    fn render_incidents(&mut self, ctx: &RenderContext<'_>);

    /// Last rendered content of a list section
    fn pane(&self, _section: Section) -> Option<&str> {
        None
    }
}

/// Keeps the last rendering of each list for the console to print
#[derive(Debug, Clone, Default)]
pub struct PaneRenderer {
    entries: String,
    personnel: String,
    incidents: String,
}

impl RenderDispatch for PaneRenderer {
    fn render_entries(&mut self, ctx: &RenderContext<'_>) {
        self.entries = render_entry_list(ctx);
    }

    fn render_personnel(&mut self, ctx: &RenderContext<'_>) {
        self.personnel = render_personnel_table(ctx);
    }

    fn render_incidents(&mut self, ctx: &RenderContext<'_>) {
        self.incidents = render_incident_list(ctx);
    }

    fn pane(&self, section: Section) -> Option<&str> {
        match section {
            Section::Database => Some(&self.entries),
            Section::Personnel => Some(&self.personnel),
            Section::Incidents => Some(&self.incidents),
            Section::Settings => None,
        }
    }
}
