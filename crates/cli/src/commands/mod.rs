//! Subcommand implementations

pub mod curves;
pub mod estimate;
