use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use super::{Job, JobSource, JobType, MockSource};

/// Which source the feed consults first.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceMode {
    #[default]
    Mock,
    Remote,
}

impl fmt::Display for SourceMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Mock => f.write_str("mock"),
            Self::Remote => f.write_str("remote"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown source mode '{0}' (expected mock or remote)")]
pub struct UnknownSourceMode(pub String);

impl FromStr for SourceMode {
    type Err = UnknownSourceMode;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "mock" => Ok(Self::Mock),
            "remote" => Ok(Self::Remote),
            other => Err(UnknownSourceMode(other.to_string())),
        }
    }
}

/// Result of a feed fetch. Always carries a (possibly empty) job list.
#[derive(Debug, Clone)]
pub struct FetchOutcome {
    pub jobs: Vec<Job>,
    pub mode: SourceMode,
    /// The remote source failed or timed out and the mock table was used.
    pub degraded: bool,
}

impl FetchOutcome {
    /// Confirmation line shown once the jobs are loaded.
    pub fn summary(&self, job_type: JobType) -> String {
        let source = if self.degraded {
            "mock data, remote feed unavailable".to_string()
        } else {
            format!("{} data", self.mode)
        };
        format!(
            "✅ Fetched {} {job_type} jobs! ({source})\nUse 'list' to see them.",
            self.jobs.len()
        )
    }
}

/// Job-source strategy shared by every connection.
///
/// Fetches never fail: remote errors and timeouts degrade to the mock table.
pub struct JobFeed {
    mock: MockSource,
    remote: Option<Box<dyn JobSource>>,
    remote_mode: AtomicBool,
    timeout: Duration,
}

impl JobFeed {
    pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(15);

    /// A feed that only ever serves the mock table.
    pub fn mock_only() -> Self {
        Self::new(None, SourceMode::Mock, Self::DEFAULT_TIMEOUT)
    }

    /// Creates a feed. Remote mode without a remote source starts in mock mode.
    pub fn new(remote: Option<Box<dyn JobSource>>, mode: SourceMode, timeout: Duration) -> Self {
        let remote_mode = mode == SourceMode::Remote && remote.is_some();
        Self {
            mock: MockSource,
            remote,
            remote_mode: AtomicBool::new(remote_mode),
            timeout,
        }
    }

    pub fn mode(&self) -> SourceMode {
        if self.remote_mode.load(Ordering::Acquire) {
            SourceMode::Remote
        } else {
            SourceMode::Mock
        }
    }

    pub const fn has_remote(&self) -> bool {
        self.remote.is_some()
    }

    /// Flips between mock and remote mode and returns the new mode.
    ///
    /// Stays in mock mode when no remote source is configured.
    pub fn toggle_mode(&self) -> SourceMode {
        if self.remote.is_none() {
            return SourceMode::Mock;
        }
        let was_remote = self.remote_mode.fetch_xor(true, Ordering::AcqRel);
        let mode = if was_remote {
            SourceMode::Mock
        } else {
            SourceMode::Remote
        };
        tracing::info!(%mode, "switched job source mode");
        mode
    }

    pub async fn fetch(&self, job_type: JobType) -> FetchOutcome {
        let mode = self.mode();
        tracing::info!(%job_type, %mode, "fetching jobs");

        if let (SourceMode::Remote, Some(remote)) = (mode, self.remote.as_deref()) {
            match tokio::time::timeout(self.timeout, remote.fetch(job_type)).await {
                Ok(Ok(jobs)) => {
                    return FetchOutcome {
                        jobs,
                        mode,
                        degraded: false,
                    };
                }
                Ok(Err(e)) => {
                    tracing::warn!(error = %e, source = remote.name(), "remote fetch failed, using mock data");
                }
                Err(_) => {
                    tracing::warn!(timeout = ?self.timeout, source = remote.name(), "remote fetch timed out, using mock data");
                }
            }
            return FetchOutcome {
                jobs: MockSource::jobs(job_type),
                mode,
                degraded: true,
            };
        }

        let jobs = match self.mock.fetch(job_type).await {
            Ok(jobs) => jobs,
            Err(e) => {
                tracing::error!(error = %e, "mock source failed");
                Vec::new()
            }
        };
        FetchOutcome {
            jobs,
            mode,
            degraded: false,
        }
    }
}

impl Default for JobFeed {
    fn default() -> Self {
        Self::mock_only()
    }
}
