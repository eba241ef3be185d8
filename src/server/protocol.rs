//! JSON-lines wire messages. One JSON object per line in each direction.

use serde::{Deserialize, Serialize};

use crate::job::SourceMode;
use crate::session::{SessionPayload, Theme};
use crate::shell::ExportFormat;

/// Messages a client sends.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ClientMessage {
    /// A raw command line for the interpreter.
    Command { command: String },
    /// Flip the shared job feed between mock and remote.
    ToggleMode,
    Health,
    /// Hands a previously saved session back to the server.
    RestoreSession { payload: SessionPayload },
}

/// How a client should present a line of output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputKind {
    Welcome,
    Info,
    Success,
    Output,
    Error,
}

/// Events the server sends.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum ServerEvent {
    TerminalOutput {
        output: String,
        kind: OutputKind,
    },
    ClearTerminal,
    OpenLink {
        url: String,
    },
    DownloadFile {
        data: String,
        filename: String,
        format: ExportFormat,
    },
    ThemeChange {
        theme: Theme,
    },
    SaveSession {
        payload: SessionPayload,
    },
    LoadSession,
    ShowCompletions {
        completions: Vec<String>,
    },
    Health {
        status: String,
        sessions: usize,
        source_mode: SourceMode,
    },
}

impl ServerEvent {
    pub fn output(kind: OutputKind, output: impl Into<String>) -> Self {
        Self::TerminalOutput {
            output: output.into(),
            kind,
        }
    }

    pub fn info(output: impl Into<String>) -> Self {
        Self::output(OutputKind::Info, output)
    }

    pub fn success(output: impl Into<String>) -> Self {
        Self::output(OutputKind::Success, output)
    }

    pub fn error(output: impl Into<String>) -> Self {
        Self::output(OutputKind::Error, output)
    }

    pub fn internal_error(err: &anyhow::Error) -> Self {
        Self::error(format!("❌ Internal error: {err}\nPlease try again."))
    }
}
