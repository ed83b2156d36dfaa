//! User preference state
//!
//! The settings value persisted across sessions: interface language,
//! visual theme and the toggleable screen effects.

use serde::{Deserialize, Serialize};

/// Supported interface languages
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    /// Spanish (default)
    #[default]
    Es,
    /// English
    En,
}

impl Language {
    /// ISO 639-1 code, also the top-level key of the translation table
    pub fn code(&self) -> &'static str {
        match self {
            Language::Es => "es",
            Language::En => "en",
        }
    }

    /// Parse a language code. Case-sensitive, codes are lowercase.
    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "es" => Some(Language::Es),
            "en" => Some(Language::En),
            _ => None,
        }
    }

    /// All supported languages, in display order
    pub fn all() -> &'static [Language] {
        &[Language::Es, Language::En]
    }
}

impl std::fmt::Display for Language {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// Visual themes. Exactly one is active at a time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    /// Phosphor green, the unmarked default
    #[default]
    Green,
    Amber,
    Blue,
    Red,
}

impl Theme {
    /// Theme identifier as stored and used in control ids
    pub fn id(&self) -> &'static str {
        match self {
            Theme::Green => "green",
            Theme::Amber => "amber",
            Theme::Blue => "blue",
            Theme::Red => "red",
        }
    }

    pub fn from_id(id: &str) -> Option<Self> {
        match id {
            "green" => Some(Theme::Green),
            "amber" => Some(Theme::Amber),
            "blue" => Some(Theme::Blue),
            "red" => Some(Theme::Red),
            _ => None,
        }
    }

    pub fn all() -> &'static [Theme] {
        &[Theme::Green, Theme::Amber, Theme::Blue, Theme::Red]
    }

    /// Body marker for this theme. The default theme carries none.
    pub fn marker(&self) -> Option<String> {
        match self {
            Theme::Green => None,
            other => Some(format!("theme-{}", other.id())),
        }
    }
}

impl std::fmt::Display for Theme {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.id())
    }
}

/// Named screen effects
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Effect {
    Crt,
    Scanlines,
    Glitch,
    Grid,
}

impl Effect {
    pub fn name(&self) -> &'static str {
        match self {
            Effect::Crt => "crt",
            Effect::Scanlines => "scanlines",
            Effect::Glitch => "glitch",
            Effect::Grid => "grid",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "crt" => Some(Effect::Crt),
            "scanlines" => Some(Effect::Scanlines),
            "glitch" => Some(Effect::Glitch),
            "grid" => Some(Effect::Grid),
            _ => None,
        }
    }

    /// All effects, in the order they are applied
    pub fn all() -> &'static [Effect] {
        &[Effect::Crt, Effect::Scanlines, Effect::Glitch, Effect::Grid]
    }

    /// Body marker present while the effect is disabled
    pub fn disabled_marker(&self) -> String {
        format!("no-{}", self.name())
    }
}

impl std::fmt::Display for Effect {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Enabled state of every known effect.
///
/// One field per effect, so an entry always exists for each of them and
/// unknown names in a stored blob are dropped on deserialization.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Effects {
    pub crt: bool,
    pub scanlines: bool,
    pub glitch: bool,
    pub grid: bool,
}

impl Default for Effects {
    fn default() -> Self {
        Self {
            crt: true,
            scanlines: true,
            glitch: true,
            grid: true,
        }
    }
}

impl Effects {
    pub fn is_enabled(&self, effect: Effect) -> bool {
        match effect {
            Effect::Crt => self.crt,
            Effect::Scanlines => self.scanlines,
            Effect::Glitch => self.glitch,
            Effect::Grid => self.grid,
        }
    }

    pub fn set(&mut self, effect: Effect, enabled: bool) {
        match effect {
            Effect::Crt => self.crt = enabled,
            Effect::Scanlines => self.scanlines = enabled,
            Effect::Glitch => self.glitch = enabled,
            Effect::Grid => self.grid = enabled,
        }
    }
}

/// Persisted user preferences
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Settings {
    /// Interface language
    pub language: Language,

    /// Active visual theme
    pub theme: Theme,

    /// Screen effect toggles
    pub effects: Effects,
}

impl Settings {
    /// Hard-coded defaults: Spanish, green theme, every effect enabled
    pub fn defaults() -> Self {
        Self::default()
    }
}
