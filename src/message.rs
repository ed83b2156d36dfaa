//! Application message types
//!
//! Defines all messages that can be sent to the application's update function,
//! and the console command syntax that produces them. Messages carry their
//! event target explicitly; handlers never look up an ambient "current event".

use crate::error::CommandError;
use crate::state::{ControlId, Effect, Language, Section, Theme};

/// Main application message enum
#[derive(Debug, Clone, PartialEq)]
pub enum Message {
    /// Preference changes
    Settings(SettingsMessage),

    /// Section navigation
    Navigation(NavigationMessage),

    /// Login screen and operator session
    Session(SessionMessage),

    /// Entry detail view
    Database(DatabaseMessage),

    /// Timers and console housekeeping
    System(SystemMessage),

    /// No-op message (blank input)
    None,
}

/// Settings-related messages
#[derive(Debug, Clone, PartialEq)]
pub enum SettingsMessage {
    SetLanguage(Language),
    SetTheme(Theme),
    SetEffect { effect: Effect, enabled: bool },

    /// Restore defaults and drop the saved blob
    Reset,

    /// Print the settings panel
    Show,
}

/// Navigation messages
#[derive(Debug, Clone, PartialEq)]
pub enum NavigationMessage {
    /// Switch section; `target` is the control that was activated
    ShowSection { section: Section, target: ControlId },
}

/// Session messages
#[derive(Debug, Clone, PartialEq)]
pub enum SessionMessage {
    Login { username: String, password: String },
    GuestAccess,
    Logout,
}

/// Entry detail messages
#[derive(Debug, Clone, PartialEq)]
pub enum DatabaseMessage {
    OpenEntry(String),
    CloseEntry,
}

/// System messages
#[derive(Debug, Clone, PartialEq)]
pub enum SystemMessage {
    /// Routine log timer fired
    RoutineLogTick,

    /// Anomaly warning timer fired
    WarningLogTick,

    /// Print the recent system log
    ShowLog,

    Help,
    Quit,
}

impl Message {
    /// Parse a console command line
    pub fn parse(line: &str) -> Result<Message, CommandError> {
        let mut words = line.split_whitespace();
        let Some(command) = words.next() else {
            return Ok(Message::None);
        };
        let args: Vec<&str> = words.collect();
        let arg = |index: usize, name: &str| {
            args.get(index)
                .copied()
                .ok_or_else(|| CommandError::MissingArgument {
                    command: command.to_string(),
                    argument: name.to_string(),
                })
        };
        let invalid = |value: &str, expected: &str| CommandError::InvalidValue {
            command: command.to_string(),
            value: value.to_string(),
            expected: expected.to_string(),
        };

        let message = match command {
            "lang" | "language" => {
                let code = arg(0, "language code")?;
                let language = Language::from_code(code).ok_or_else(|| invalid(code, "es|en"))?;
                Message::Settings(SettingsMessage::SetLanguage(language))
            }
            "theme" => {
                let id = arg(0, "theme")?;
                let theme =
                    Theme::from_id(id).ok_or_else(|| invalid(id, "green|amber|blue|red"))?;
                Message::Settings(SettingsMessage::SetTheme(theme))
            }
            "effect" => {
                let name = arg(0, "effect")?;
                let effect = Effect::from_name(name)
                    .ok_or_else(|| invalid(name, "crt|scanlines|glitch|grid"))?;
                let state = arg(1, "on|off")?;
                let enabled = match state {
                    "on" => true,
                    "off" => false,
                    other => return Err(invalid(other, "on|off")),
                };
                Message::Settings(SettingsMessage::SetEffect { effect, enabled })
            }
            "reset" => Message::Settings(SettingsMessage::Reset),
            "login" => Message::Session(SessionMessage::Login {
                username: arg(0, "username")?.to_string(),
                password: arg(1, "password")?.to_string(),
            }),
            "guest" => Message::Session(SessionMessage::GuestAccess),
            "logout" => Message::Session(SessionMessage::Logout),
            "show" => {
                let id = arg(0, "section")?;
                let section = Section::from_id(id)
                    .ok_or_else(|| invalid(id, "database|personnel|incidents|settings"))?;
                Message::Navigation(NavigationMessage::ShowSection {
                    section,
                    target: ControlId::nav(section),
                })
            }
            "open" => Message::Database(DatabaseMessage::OpenEntry(
                arg(0, "entry number")?.to_string(),
            )),
            "close" => Message::Database(DatabaseMessage::CloseEntry),
            "status" | "settings" => Message::Settings(SettingsMessage::Show),
            "log" => Message::System(SystemMessage::ShowLog),
            "help" | "?" => Message::System(SystemMessage::Help),
            "quit" | "exit" => Message::System(SystemMessage::Quit),
            other => return Err(CommandError::Unknown(other.to_string())),
        };

        Ok(message)
    }
}

/// Console command reference
pub const COMMAND_HELP: &str = "\
lang <es|en>                       switch interface language
theme <green|amber|blue|red>       switch visual theme
effect <crt|scanlines|glitch|grid> <on|off>
reset                              restore default settings
login <user> <password>            authenticate
guest                              continue as guest
logout                             return to the login screen
show <database|personnel|incidents|settings>
open <number>                      open an entry file
close                              close the entry file
status                             show current settings
log                                show recent system log
quit                               leave the terminal";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_settings_commands() {
        assert_eq!(
            Message::parse("lang en").unwrap(),
            Message::Settings(SettingsMessage::SetLanguage(Language::En))
        );
        assert_eq!(
            Message::parse("  theme   amber ").unwrap(),
            Message::Settings(SettingsMessage::SetTheme(Theme::Amber))
        );
        assert_eq!(
            Message::parse("effect crt off").unwrap(),
            Message::Settings(SettingsMessage::SetEffect {
                effect: Effect::Crt,
                enabled: false
            })
        );
    }

    #[test]
    fn test_parse_show_carries_target() {
        assert_eq!(
            Message::parse("show personnel").unwrap(),
            Message::Navigation(NavigationMessage::ShowSection {
                section: Section::Personnel,
                target: ControlId::new("nav-personnel"),
            })
        );
    }

    #[test]
    fn test_parse_blank_is_none() {
        assert_eq!(Message::parse("   ").unwrap(), Message::None);
    }

    #[test]
    fn test_parse_errors() {
        assert_eq!(
            Message::parse("dance").unwrap_err(),
            CommandError::Unknown("dance".to_string())
        );
        assert!(matches!(
            Message::parse("lang").unwrap_err(),
            CommandError::MissingArgument { .. }
        ));
        assert!(matches!(
            Message::parse("lang fr").unwrap_err(),
            CommandError::InvalidValue { .. }
        ));
        assert!(matches!(
            Message::parse("effect sparkles on").unwrap_err(),
            CommandError::InvalidValue { .. }
        ));
        assert!(matches!(
            Message::parse("effect crt maybe").unwrap_err(),
            CommandError::InvalidValue { .. }
        ));
        assert!(matches!(
            Message::parse("login alice").unwrap_err(),
            CommandError::MissingArgument { .. }
        ));
    }
}
