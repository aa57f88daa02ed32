//! Subcommand implementations

pub mod bbox;
pub mod distance;
pub mod nearby;
