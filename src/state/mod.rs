//! State management module for SCP Terminal
//!
//! This module contains all application state types organized by concern:
//! - `settings`: Persisted user preferences (language, theme, effects)
//! - `app_state`: Root application state container
//! - `view_state`: Body markers, controls and translatable labels
//! - `log_state`: System log entries and routine log messages

mod app_state;
mod log_state;
mod settings;
mod view_state;

pub use app_state::*;
pub use log_state::*;
pub use settings::*;
pub use view_state::*;
