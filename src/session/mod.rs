//! Per-connection session state.
//!
//! A [`Session`] is owned by exactly one connection at a time. It performs no
//! locking of its own; transports serialize commands per session (see
//! [`SessionStore`]).

mod store;

pub use store::{SessionId, SessionStore, SharedSession};

use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use crate::job::Job;

/// Number of history entries carried in a saved session.
pub const SAVED_HISTORY_LEN: usize = 20;

/// Terminal colour themes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Green,
    Blue,
    Amber,
    Red,
    Purple,
}

impl Theme {
    pub const ALL: [Self; 5] = [
        Self::Green,
        Self::Blue,
        Self::Amber,
        Self::Red,
        Self::Purple,
    ];

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Green => "green",
            Self::Blue => "blue",
            Self::Amber => "amber",
            Self::Red => "red",
            Self::Purple => "purple",
        }
    }

    pub fn names() -> Vec<&'static str> {
        Self::ALL.iter().map(|t| t.as_str()).collect()
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown theme '{0}'")]
pub struct UnknownTheme(pub String);

impl FromStr for Theme {
    type Err = UnknownTheme;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| UnknownTheme(s.to_string()))
    }
}

/// User preferences with a fixed key set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Preferences {
    #[serde(default)]
    pub theme: Theme,
    #[serde(default = "enabled")]
    pub notifications: bool,
    #[serde(default = "enabled")]
    pub auto_save: bool,
}

const fn enabled() -> bool {
    true
}

impl Default for Preferences {
    fn default() -> Self {
        Self {
            theme: Theme::default(),
            notifications: true,
            auto_save: true,
        }
    }
}

impl Preferences {
    /// `(key, value, is_set)` for every preference, in declaration order.
    pub fn entries(&self) -> [(&'static str, String, bool); 3] {
        [
            ("theme", self.theme.to_string(), true),
            (
                "notifications",
                self.notifications.to_string(),
                self.notifications,
            ),
            ("auto_save", self.auto_save.to_string(), self.auto_save),
        ]
    }
}

/// A bookmarked job: a copy of the job plus its id and save time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bookmark {
    #[serde(flatten)]
    pub job: Job,
    pub id: String,
    pub bookmarked_at: String,
}

impl Bookmark {
    pub fn new(job: &Job) -> Self {
        Self {
            job: job.clone(),
            id: job.bookmark_id(),
            bookmarked_at: Local::now().to_rfc3339(),
        }
    }

    /// Save time trimmed to `YYYY-MM-DDTHH:MM:SS`.
    pub fn saved_at(&self) -> &str {
        match self.bookmarked_at.char_indices().nth(19) {
            Some((idx, _)) => &self.bookmarked_at[..idx],
            None => &self.bookmarked_at,
        }
    }
}

/// The data a transport persists on `save` and hands back on load.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionPayload {
    #[serde(default)]
    pub bookmarks: Vec<Bookmark>,
    #[serde(default)]
    pub preferences: Preferences,
    #[serde(default)]
    pub command_history: Vec<String>,
}

/// Mutable state for one connection.
///
/// `filtered_jobs` always holds handles into the current `jobs` vector, so
/// the view is a subset of the loaded set by identity.
#[derive(Debug, Default)]
pub struct Session {
    jobs: Vec<Arc<Job>>,
    filtered_jobs: Vec<Arc<Job>>,
    bookmarks: Vec<Bookmark>,
    command_history: Vec<String>,
    preferences: Preferences,
    last_fetch_time: Option<DateTime<Local>>,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn jobs(&self) -> &[Arc<Job>] {
        &self.jobs
    }

    pub fn filtered_jobs(&self) -> &[Arc<Job>] {
        &self.filtered_jobs
    }

    pub fn bookmarks(&self) -> &[Bookmark] {
        &self.bookmarks
    }

    pub fn command_history(&self) -> &[String] {
        &self.command_history
    }

    pub const fn preferences(&self) -> &Preferences {
        &self.preferences
    }

    pub const fn last_fetch_time(&self) -> Option<DateTime<Local>> {
        self.last_fetch_time
    }

    /// Appends to history unconditionally. Callers decide whether to skip empties.
    pub fn record_command(&mut self, raw: &str) {
        self.command_history.push(raw.to_string());
    }

    /// Replaces the loaded jobs and resets the view to all of them.
    pub fn set_jobs(&mut self, jobs: Vec<Job>) {
        self.jobs = jobs.into_iter().map(Arc::new).collect();
        self.filtered_jobs = self.jobs.clone();
        self.last_fetch_time = Some(Local::now());
    }

    /// Replaces the view with every loaded job matching `predicate`.
    ///
    /// Always scans the full loaded set, never the previous view.
    pub fn narrow_view<F>(&mut self, predicate: F) -> usize
    where
        F: Fn(&Job) -> bool,
    {
        self.filtered_jobs = self
            .jobs
            .iter()
            .filter(|job| predicate(job))
            .cloned()
            .collect();
        self.filtered_jobs.len()
    }

    /// Job at a 1-based position in the current view.
    pub fn view_job(&self, position: usize) -> Option<&Arc<Job>> {
        position
            .checked_sub(1)
            .and_then(|idx| self.filtered_jobs.get(idx))
    }

    pub const fn set_theme(&mut self, theme: Theme) {
        self.preferences.theme = theme;
    }

    /// Adds a bookmark unless one with the same id exists.
    pub fn add_bookmark(&mut self, job: &Job) -> bool {
        let id = job.bookmark_id();
        if self.bookmarks.iter().any(|b| b.id == id) {
            return false;
        }
        self.bookmarks.push(Bookmark::new(job));
        true
    }

    /// Removes every bookmark with `id`. Returns whether anything was removed.
    pub fn remove_bookmark(&mut self, id: &str) -> bool {
        let before = self.bookmarks.len();
        self.bookmarks.retain(|b| b.id != id);
        self.bookmarks.len() < before
    }

    /// Clears loaded jobs and the view. Bookmarks, history and preferences survive.
    pub fn reset(&mut self) {
        self.jobs.clear();
        self.filtered_jobs.clear();
        self.last_fetch_time = None;
    }

    pub fn payload(&self) -> SessionPayload {
        let skip = self
            .command_history
            .len()
            .saturating_sub(SAVED_HISTORY_LEN);
        SessionPayload {
            bookmarks: self.bookmarks.clone(),
            preferences: self.preferences.clone(),
            command_history: self.command_history[skip..].to_vec(),
        }
    }

    /// Applies a previously saved payload and returns how many bookmarks were added.
    ///
    /// Preferences are replaced and bookmarks merged by id. History is left
    /// as is since it only ever grows.
    pub fn restore(&mut self, payload: SessionPayload) -> usize {
        self.preferences = payload.preferences;
        let mut added = 0;
        for bookmark in payload.bookmarks {
            if self.bookmarks.iter().any(|b| b.id == bookmark.id) {
                continue;
            }
            self.bookmarks.push(bookmark);
            added += 1;
        }
        added
    }
}
