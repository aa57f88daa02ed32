//! CLI utilities for the souk command-line tools
//!
//! Provides shared CLI functionality:
//! - Terminal output formatting
//! - Settings file loading

#![warn(missing_docs)]

pub mod output;
pub mod settings;

pub use settings::{SearchSettings, Settings, SettingsError};
