//! Main application logic
//!
//! `ScpTerminal` owns the state container, the settings store, the loaded
//! catalog and the render dispatch. Settings changes all go through the
//! applier: update the in-memory settings, mirror the language, relabel,
//! re-render, swap the theme marker, toggle effect markers and finally
//! persist unless told not to.

use crate::config::DEFAULT_WARNING_THRESHOLD;
use crate::data::Catalog;
use crate::message::{
    DatabaseMessage, Message, NavigationMessage, SessionMessage, SettingsMessage, SystemMessage,
    COMMAND_HELP,
};
use crate::state::{
    routine_log_key, should_warn, AppState, ControlId, Effect, Language, LogLevel,
    OperatorSession, Section, Settings, Theme, ANOMALY_LOG_KEY, STARTUP_LOG_KEYS,
};
use crate::storage::SettingsStore;
use crate::ui::{self, RenderContext, RenderDispatch};
use rand::rngs::StdRng;
use rand::SeedableRng;

/// Number of log lines printed by the `log` command
const LOG_TAIL_LINES: usize = 20;

/// Applier state. `Applying` only exists for the duration of one
/// synchronous apply or setter call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ApplyPhase {
    #[default]
    Idle,
    Applying,
}

/// What the front-end should do after a message was handled
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Response {
    Nothing,
    Print(String),
    Quit,
}

/// The terminal application
pub struct ScpTerminal<R: RenderDispatch> {
    /// Application state
    pub state: AppState,

    catalog: Catalog,
    store: SettingsStore,
    renderer: R,
    phase: ApplyPhase,
    rng: StdRng,
    warning_threshold: f64,
}

impl<R: RenderDispatch> ScpTerminal<R> {
    pub fn new(catalog: Catalog, store: SettingsStore, renderer: R) -> Self {
        Self {
            state: AppState::new(),
            catalog,
            store,
            renderer,
            phase: ApplyPhase::Idle,
            rng: StdRng::from_entropy(),
            warning_threshold: DEFAULT_WARNING_THRESHOLD,
        }
    }

    /// Use a fixed seed for the log generator
    #[cfg(test)]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng = StdRng::seed_from_u64(seed);
        self
    }

    pub fn with_warning_threshold(mut self, threshold: f64) -> Self {
        self.warning_threshold = threshold;
        self
    }

    #[cfg(test)]
    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    #[cfg(test)]
    pub fn phase(&self) -> ApplyPhase {
        self.phase
    }

    /// Load saved settings (or defaults), apply them without re-saving and
    /// write the startup log lines.
    pub fn initialize(&mut self) {
        let settings = match self.store.load() {
            Ok(Some(settings)) => {
                log::info!("Loaded saved settings");
                settings
            }
            Ok(None) => {
                log::debug!("No saved settings, using defaults");
                Settings::defaults()
            }
            Err(e) => {
                log::warn!("{}; using defaults", e);
                Settings::defaults()
            }
        };

        self.apply(settings, false);

        for key in STARTUP_LOG_KEYS {
            let message = self.text_or_key(key);
            self.log_event(message, LogLevel::Info);
        }
    }

    /// Resolve a dotted key in the current language
    pub fn resolve(&self, key: &str) -> Option<&str> {
        self.catalog
            .translations
            .resolve(self.state.current_language, key)
    }

    /// Translated text or the given literal
    pub fn text_or(&self, key: &str, fallback: &str) -> String {
        self.resolve(key).unwrap_or(fallback).to_string()
    }

    /// Translated text or the raw key
    pub fn text_or_key(&self, key: &str) -> String {
        match self
            .catalog
            .translations
            .require(self.state.current_language, key)
        {
            Ok(text) => text.to_string(),
            Err(e) => {
                log::debug!("{}", e);
                key.to_string()
            }
        }
    }

    /// Replace the settings wholesale and apply every field
    pub fn apply(&mut self, settings: Settings, persist: bool) {
        self.phase = ApplyPhase::Applying;
        self.state.settings = settings;

        self.apply_language();
        self.apply_theme();
        for effect in Effect::all() {
            self.apply_effect(*effect);
        }
        if persist {
            self.save_settings();
        }

        self.phase = ApplyPhase::Idle;
        log::debug!(
            "Applied settings: language={} theme={} body='{}'",
            settings.language,
            settings.theme,
            self.state.view.body_class()
        );
    }

    /// Switch language. Lists are re-rendered even if it did not change.
    pub fn set_language(&mut self, language: Language, persist: bool) {
        self.phase = ApplyPhase::Applying;
        self.state.settings.language = language;
        self.apply_language();
        if persist {
            self.save_settings();
        }
        self.phase = ApplyPhase::Idle;
    }

    pub fn set_theme(&mut self, theme: Theme, persist: bool) {
        self.phase = ApplyPhase::Applying;
        self.state.settings.theme = theme;
        self.apply_theme();
        if persist {
            self.save_settings();
        }
        self.phase = ApplyPhase::Idle;
    }

    pub fn set_effect(&mut self, effect: Effect, enabled: bool, persist: bool) {
        self.phase = ApplyPhase::Applying;
        self.state.settings.effects.set(effect, enabled);
        self.apply_effect(effect);
        if persist {
            self.save_settings();
        }
        self.phase = ApplyPhase::Idle;
    }

    /// Drop the saved blob and apply defaults without persisting them
    pub fn reset_settings(&mut self) {
        let defaults = self.store.reset();
        self.apply(defaults, false);
        let message = self.text_or("settings.settingsReset", "Settings reset to defaults");
        self.log_event(message, LogLevel::Info);
    }

    fn apply_language(&mut self) {
        let language = self.state.settings.language;
        self.state.current_language = language;
        self.state
            .view
            .set_active_in_group("lang-", &ControlId::language(language));

        let translations = &self.catalog.translations;
        if !translations.has_language(language) {
            log::warn!("No translations loaded for '{}'", language);
        }
        let updated = self
            .state
            .view
            .relabel(|key| translations.resolve(language, key));
        log::debug!("Relabeled {} elements for '{}'", updated, language);

        self.render_lists();
    }

    fn apply_theme(&mut self) {
        let theme = self.state.settings.theme;
        self.state
            .view
            .set_active_in_group("theme-", &ControlId::theme(theme));
        self.state
            .view
            .replace_theme_marker(theme.marker().as_deref());
    }

    fn apply_effect(&mut self, effect: Effect) {
        let enabled = self.state.settings.effects.is_enabled(effect);
        let marker = effect.disabled_marker();
        self.state
            .view
            .set_checked(&ControlId::effect_toggle(effect), enabled);
        if enabled {
            self.state.view.remove_marker(&marker);
        } else {
            self.state.view.add_marker(&marker);
        }
    }

    /// Repaint entries, personnel and incidents, in that order
    fn render_lists(&mut self) {
        let ctx = RenderContext {
            translations: &self.catalog.translations,
            language: self.state.current_language,
            feeds: &self.catalog.feeds,
        };
        self.renderer.render_entries(&ctx);
        self.renderer.render_personnel(&ctx);
        self.renderer.render_incidents(&ctx);
    }

    fn save_settings(&mut self) {
        let settings = self.state.settings;
        match self.store.save(&settings) {
            Ok(()) => {
                let message = self.text_or("settings.settingsSaved", "Settings saved");
                self.log_event(message, LogLevel::Info);
            }
            Err(e) => {
                log::warn!("{}", e);
                let message = self.text_or("settings.saveFailed", &e.user_message());
                self.log_event(message, LogLevel::Warning);
            }
        }
    }

    /// Displayed text of a static label. Follows the last relabel, so a
    /// key missing from the current language keeps its previous text.
    pub fn label(&self, key: &str) -> String {
        self.state.view.label_text(key).unwrap_or(key).to_string()
    }

    /// Append to the system log and mirror to the diagnostic log
    pub fn log_event(&mut self, message: impl Into<String>, level: LogLevel) {
        let message = message.into();
        match level {
            LogLevel::Info => log::info!("{}", message),
            LogLevel::Warning => log::warn!("{}", message),
        }
        self.state.log.push(message, level);
    }

    /// Handle a message synchronously
    pub fn update(&mut self, message: Message) -> Response {
        match message {
            Message::Settings(msg) => self.handle_settings_message(msg),
            Message::Navigation(msg) => self.handle_navigation_message(msg),
            Message::Session(msg) => self.handle_session_message(msg),
            Message::Database(msg) => self.handle_database_message(msg),
            Message::System(msg) => self.handle_system_message(msg),
            Message::None => Response::Nothing,
        }
    }

    fn handle_settings_message(&mut self, message: SettingsMessage) -> Response {
        match message {
            SettingsMessage::SetLanguage(language) => self.set_language(language, true),
            SettingsMessage::SetTheme(theme) => self.set_theme(theme, true),
            SettingsMessage::SetEffect { effect, enabled } => {
                self.set_effect(effect, enabled, true)
            }
            SettingsMessage::Reset => self.reset_settings(),
            SettingsMessage::Show => {}
        }
        Response::Print(self.settings_panel())
    }

    fn handle_navigation_message(&mut self, message: NavigationMessage) -> Response {
        match message {
            NavigationMessage::ShowSection { section, target } => {
                if !self.state.is_signed_in() {
                    return Response::Print(self.label("login.title"));
                }

                self.state.view.set_active_in_group("nav-", &target);
                self.state.section = section;
                self.state.open_entry = None;

                let message = format!(
                    "{}: {}",
                    self.text_or("logs.accessingSection", "Accessing section"),
                    section.id().to_uppercase()
                );
                self.log_event(message, LogLevel::Info);

                Response::Print(self.section_view(section))
            }
        }
    }

    fn handle_session_message(&mut self, message: SessionMessage) -> Response {
        match message {
            SessionMessage::Login { username, password } => {
                if username.is_empty() || password.is_empty() {
                    return Response::Nothing;
                }
                let message = format!("{}: {}", self.text_or_key("logs.userAuth"), username);
                self.log_event(message, LogLevel::Info);
                self.state.sign_in(OperatorSession::authenticated(username));
                Response::Print(self.section_view(self.state.section))
            }
            SessionMessage::GuestAccess => {
                let message = self.text_or_key("logs.guestAccess");
                self.log_event(message, LogLevel::Info);
                self.state.sign_in(OperatorSession::guest());
                Response::Print(self.section_view(self.state.section))
            }
            SessionMessage::Logout => {
                let message = self.text_or_key("logs.userLogout");
                self.log_event(message, LogLevel::Info);
                if let Some(session) = self.state.sign_out() {
                    log::debug!("Closed session {}", session.id);
                }
                Response::Print(self.login_screen())
            }
        }
    }

    fn handle_database_message(&mut self, message: DatabaseMessage) -> Response {
        match message {
            DatabaseMessage::OpenEntry(number) => {
                if !self.state.is_signed_in() {
                    return Response::Print(self.label("login.title"));
                }
                let Some(entry) = self.catalog.feeds.entry(&number) else {
                    return Response::Nothing;
                };
                let ctx = RenderContext {
                    translations: &self.catalog.translations,
                    language: self.state.current_language,
                    feeds: &self.catalog.feeds,
                };
                let detail = ui::render_entry_detail(&ctx, entry);
                let entry_number = entry.number.clone();

                let message = format!(
                    "{}: {}",
                    self.text_or("logs.accessingFile", "Accessing file"),
                    entry_number
                );
                self.log_event(message, LogLevel::Info);
                self.state.open_entry = Some(entry_number);
                Response::Print(detail)
            }
            DatabaseMessage::CloseEntry => {
                self.state.open_entry = None;
                Response::Nothing
            }
        }
    }

    fn handle_system_message(&mut self, message: SystemMessage) -> Response {
        match message {
            SystemMessage::RoutineLogTick => {
                let key = routine_log_key(&mut self.rng);
                let message = self.text_or_key(key);
                self.log_event(message, LogLevel::Info);
                Response::Nothing
            }
            SystemMessage::WarningLogTick => {
                if should_warn(&mut self.rng, self.warning_threshold) {
                    let message = self.text_or_key(ANOMALY_LOG_KEY);
                    self.log_event(message, LogLevel::Warning);
                }
                Response::Nothing
            }
            SystemMessage::ShowLog => {
                Response::Print(ui::render_log_tail(&self.state.log, LOG_TAIL_LINES))
            }
            SystemMessage::Help => Response::Print(COMMAND_HELP.to_string()),
            SystemMessage::Quit => Response::Quit,
        }
    }

    /// Current text of a section
    pub fn section_view(&self, section: Section) -> String {
        if section == Section::Settings {
            return self.settings_panel();
        }
        let title = self.label(&format!("{}.title", section.id()));
        let body = self.renderer.pane(section).unwrap_or_default();
        match &self.state.operator {
            Some(session) => format!("{} :: {}\n{}", title, session.display_name(), body),
            None => format!("{}\n{}", title, body),
        }
    }

    /// Header and login prompt
    pub fn login_screen(&self) -> String {
        format!(
            "{}\n{}\n\n{}\n{}: login <user> <password>\n{}: guest",
            self.label("header.title"),
            self.label("header.subtitle"),
            self.label("login.title"),
            self.label("login.submit"),
            self.label("login.guest"),
        )
    }

    pub fn settings_panel(&self) -> String {
        ui::render_settings_panel(&self.state)
    }
}
