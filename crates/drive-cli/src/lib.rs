//! Command-line front end: every subcommand drives a
//! [`drive_manager::FileManager`] over the HTTP gateway.

pub mod commands;
pub mod output;
pub mod session;

pub use commands::Cli;
