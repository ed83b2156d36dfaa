//! Storage module for SCP Terminal
//!
//! Handles persistence of user preferences:
//! - Key/value backends (directory of JSON files, or in-memory)
//! - Atomic writes for the file backend
//! - The settings blob format and its load/save/reset lifecycle

pub mod backend;
pub mod settings_store;

pub use backend::*;
pub use settings_store::*;
