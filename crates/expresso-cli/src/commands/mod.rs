//! Command handlers. Each module owns one subcommand's `execute`.

pub mod completions;
pub mod config;
pub mod init;
pub mod new;
