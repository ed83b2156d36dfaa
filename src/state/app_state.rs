//! Root application state container
//!
//! Owns the in-memory settings, the language used for lookups, the view
//! model and the session/navigation state.

use super::{Language, Settings, SystemLog, ViewState};
use uuid::Uuid;

/// Unique identifier for an operator session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SessionId(Uuid);

impl SessionId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for SessionId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for SessionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A simulated operator session
#[derive(Debug, Clone)]
pub struct OperatorSession {
    pub id: SessionId,

    /// `None` for guest access
    pub username: Option<String>,
}

impl OperatorSession {
    pub fn authenticated(username: impl Into<String>) -> Self {
        Self {
            id: SessionId::new(),
            username: Some(username.into()),
        }
    }

    pub fn guest() -> Self {
        Self {
            id: SessionId::new(),
            username: None,
        }
    }

    pub fn is_guest(&self) -> bool {
        self.username.is_none()
    }

    /// Name shown next to section titles
    pub fn display_name(&self) -> &str {
        match &self.username {
            Some(name) if !self.is_guest() => name.as_str(),
            _ => "GUEST",
        }
    }
}

/// Top-level screen
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Screen {
    #[default]
    Login,
    Main,
}

/// Content sections of the main screen
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Section {
    #[default]
    Database,
    Personnel,
    Incidents,
    Settings,
}

impl Section {
    pub fn id(&self) -> &'static str {
        match self {
            Section::Database => "database",
            Section::Personnel => "personnel",
            Section::Incidents => "incidents",
            Section::Settings => "settings",
        }
    }

    pub fn from_id(id: &str) -> Option<Self> {
        match id {
            "database" => Some(Section::Database),
            "personnel" => Some(Section::Personnel),
            "incidents" => Some(Section::Incidents),
            "settings" => Some(Section::Settings),
            _ => None,
        }
    }

    pub fn all() -> &'static [Section] {
        &[
            Section::Database,
            Section::Personnel,
            Section::Incidents,
            Section::Settings,
        ]
    }
}

/// Root application state
#[derive(Debug, Clone)]
pub struct AppState {
    /// Current user preferences
    pub settings: Settings,

    /// Language used for translation lookups, mirrors `settings.language`
    pub current_language: Language,

    /// Presentation surface the settings act on
    pub view: ViewState,

    /// Login or main screen
    pub screen: Screen,

    /// Active operator session
    pub operator: Option<OperatorSession>,

    /// Visible section of the main screen
    pub section: Section,

    /// Designation of the entry shown in the detail view
    pub open_entry: Option<String>,

    /// System log
    pub log: SystemLog,
}

impl AppState {
    pub fn new() -> Self {
        let settings = Settings::defaults();
        Self {
            current_language: settings.language,
            settings,
            view: ViewState::new(),
            screen: Screen::Login,
            operator: None,
            section: Section::Database,
            open_entry: None,
            log: SystemLog::default(),
        }
    }

    /// Enter the main screen with a new session
    pub fn sign_in(&mut self, session: OperatorSession) {
        self.operator = Some(session);
        self.screen = Screen::Main;
    }

    /// Return to the login screen
    pub fn sign_out(&mut self) -> Option<OperatorSession> {
        self.screen = Screen::Login;
        self.open_entry = None;
        self.operator.take()
    }

    pub fn is_signed_in(&self) -> bool {
        self.screen == Screen::Main
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}
