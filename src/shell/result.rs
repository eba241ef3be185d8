use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::job::{Job, JobType};
use crate::session::{Bookmark, SessionPayload, Theme};

/// Outcome of one interpreted command.
///
/// `Text` is plain output; every other variant is a directive the transport
/// acts on (and usually confirms with its own status line).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum CommandResult {
    Text { text: String, is_error: bool },
    Clear,
    Fetch { job_type: JobType },
    OpenLink { url: String, job: Job },
    Export {
        format: ExportFormat,
        data_type: DataType,
        data: ExportData,
    },
    ThemeChange { theme: Theme },
    SaveSession { payload: SessionPayload },
    LoadSession,
    Completions { list: Vec<String> },
}

impl CommandResult {
    pub fn text(text: impl Into<String>) -> Self {
        Self::Text {
            text: text.into(),
            is_error: false,
        }
    }

    pub fn error(text: impl Into<String>) -> Self {
        Self::Text {
            text: text.into(),
            is_error: true,
        }
    }

    pub const fn is_error(&self) -> bool {
        matches!(self, Self::Text { is_error: true, .. })
    }

    pub const fn is_directive(&self) -> bool {
        !matches!(self, Self::Text { .. })
    }

    /// The text of a `Text` result.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text { text, .. } => Some(text),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    Json,
    Csv,
}

impl ExportFormat {
    pub const ALL: [Self; 2] = [Self::Json, Self::Csv];

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Json => "json",
            Self::Csv => "csv",
        }
    }

    pub fn names() -> Vec<&'static str> {
        Self::ALL.iter().map(|f| f.as_str()).collect()
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ExportFormat {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL.into_iter().find(|f| f.as_str() == s).ok_or(())
    }
}

/// Which collection an export reads from.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DataType {
    /// The current filtered view.
    #[default]
    Jobs,
    Bookmarks,
}

impl DataType {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Jobs => "jobs",
            Self::Bookmarks => "bookmarks",
        }
    }
}

impl fmt::Display for DataType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DataType {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "jobs" => Ok(Self::Jobs),
            "bookmarks" => Ok(Self::Bookmarks),
            _ => Err(()),
        }
    }
}

/// Records carried by an export directive.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum ExportData {
    Jobs(Vec<Job>),
    Bookmarks(Vec<Bookmark>),
}

impl ExportData {
    pub fn len(&self) -> usize {
        match self {
            Self::Jobs(jobs) => jobs.len(),
            Self::Bookmarks(bookmarks) => bookmarks.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Each record as a JSON object, in field order.
    pub fn to_records(&self) -> serde_json::Result<Vec<serde_json::Value>> {
        match self {
            Self::Jobs(jobs) => jobs.iter().map(serde_json::to_value).collect(),
            Self::Bookmarks(bookmarks) => bookmarks.iter().map(serde_json::to_value).collect(),
        }
    }
}
