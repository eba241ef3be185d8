use thiserror::Error;

use crate::job::JobType;
use crate::session::Theme;

/// Every way a command can fail. The message is what the user sees.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CommandError {
    #[error("❌ Usage: {0}")]
    Usage(&'static str),

    #[error("❌ Invalid job type. Use: {}", JobType::names().join(", "))]
    InvalidJobType,

    #[error("❌ Invalid theme. Available: {}", Theme::names().join(", "))]
    InvalidTheme,

    #[error("❌ Format must be 'json' or 'csv'")]
    InvalidFormat,

    #[error("❌ No jobs to {0}. Use 'fetch' first.")]
    NoJobs(&'static str),

    #[error("❌ Job ID must be a number")]
    NotANumber,

    #[error("❌ Invalid job ID. Use 'list' to see available jobs (1-{0})")]
    InvalidIndex(usize),

    #[error("❌ No URL available for this job")]
    NoUrl,

    #[error("❌ Bookmark not found: {0}")]
    BookmarkNotFound(String),

    #[error(
        "❌ Unknown command: '{command}'\nType 'help' to see available commands.\n💡 Try 'complete {first_word}' for suggestions."
    )]
    Unknown {
        command: String,
        first_word: String,
    },
}

impl CommandError {
    pub fn unknown(command: &str) -> Self {
        Self::Unknown {
            command: command.to_string(),
            first_word: command
                .split_whitespace()
                .next()
                .unwrap_or_default()
                .to_string(),
        }
    }
}
