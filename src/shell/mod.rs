//! The command interpreter.
//!
//! Turns a raw command line into a [`CommandResult`] against a
//! [`Session`](crate::session::Session). Directives (clear, open, export, ...)
//! are returned as typed variants for the transport to act on.

/// Command classification.
pub mod command;
/// Completion engine.
pub mod completion;
mod error;
mod help;
mod interpreter;
mod result;

pub use command::{COMMAND_NAMES, Command, parse_command};
pub use completion::complete;
pub use error::CommandError;
pub use help::HELP_TEXT;
pub use interpreter::execute;
pub use result::{CommandResult, DataType, ExportData, ExportFormat};
