use anyhow::{Context, Result};
use std::net::SocketAddr;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tokio::net::TcpStream;
use tokio::net::tcp::OwnedWriteHalf;
use tokio::sync::mpsc;

use super::protocol::{ClientMessage, OutputKind, ServerEvent};
use super::{ServerState, WELCOME};
use crate::export;
use crate::job::{JobType, SourceMode};
use crate::session::{SessionId, SharedSession};
use crate::shell::{self, CommandResult};

type EventSender = mpsc::Sender<ServerEvent>;

/// Events queued for a client before reading from it pauses.
const EVENT_QUEUE_CAPACITY: usize = 64;

/// How long queued events may take to flush after the client stops sending.
const DRAIN_TIMEOUT: Duration = Duration::from_secs(5);

/// Serves one client until it disconnects.
pub(super) async fn handle(
    stream: TcpStream,
    peer: SocketAddr,
    state: Arc<ServerState>,
) -> Result<()> {
    let id = state.store.next_id();
    let session = state.store.create(id);
    tracing::info!(%peer, %id, "client connected");

    let (reader, writer) = stream.into_split();
    let (tx, rx) = mpsc::channel(EVENT_QUEUE_CAPACITY);
    let mut writer_task = tokio::spawn(write_events(writer, rx));

    let connection = Connection {
        id,
        session,
        state: Arc::clone(&state),
        tx,
        fetch_generation: Arc::new(AtomicU64::new(0)),
    };
    connection
        .send(ServerEvent::output(OutputKind::Welcome, WELCOME))
        .await;

    let mut lines = BufReader::new(reader).lines();
    let result = loop {
        match lines.next_line().await {
            Ok(Some(line)) => connection.handle_line(&line).await,
            Ok(None) => break Ok(()),
            Err(e) => break Err(e).context("Failed to read from client"),
        }
    };

    state.store.remove(id);
    tracing::info!(%peer, %id, "client disconnected");

    // In-flight fetches hold sender clones, so the queue may never close.
    drop(connection);
    match tokio::time::timeout(DRAIN_TIMEOUT, &mut writer_task).await {
        Ok(Ok(Err(e))) => tracing::debug!(%id, error = %e, "failed to flush events"),
        Ok(_) => {}
        Err(_) => {
            tracing::debug!(%id, "gave up flushing events");
            writer_task.abort();
        }
    }
    result
}

async fn write_events(
    mut writer: OwnedWriteHalf,
    mut rx: mpsc::Receiver<ServerEvent>,
) -> Result<()> {
    while let Some(event) = rx.recv().await {
        let mut line = serde_json::to_string(&event).context("Failed to encode event")?;
        line.push('\n');
        writer
            .write_all(line.as_bytes())
            .await
            .context("Failed to write to client")?;
    }
    writer
        .shutdown()
        .await
        .context("Failed to close client stream")
}

struct Connection {
    id: SessionId,
    session: SharedSession,
    state: Arc<ServerState>,
    tx: EventSender,
    /// Bumped for every fetch; a completed fetch only applies if still current.
    fetch_generation: Arc<AtomicU64>,
}

impl Connection {
    async fn send(&self, event: ServerEvent) {
        // A closed channel means the client is gone; nothing left to tell it.
        let _ = self.tx.send(event).await;
    }

    async fn handle_line(&self, line: &str) {
        if line.trim().is_empty() {
            return;
        }

        match serde_json::from_str::<ClientMessage>(line) {
            Ok(ClientMessage::Command { command }) => self.handle_command(&command).await,
            Ok(ClientMessage::ToggleMode) => self.toggle_mode().await,
            Ok(ClientMessage::Health) => self.send(self.state.health()).await,
            Ok(ClientMessage::RestoreSession { payload }) => {
                let added = self.session.lock().await.restore(payload);
                self.send(ServerEvent::success(format!(
                    "🔄 Session restored ({added} bookmarks added)"
                )))
                .await;
            }
            Err(e) => {
                tracing::debug!(id = %self.id, error = %e, "malformed client message");
                self.send(ServerEvent::error(format!("❌ Malformed message: {e}")))
                    .await;
            }
        }
    }

    async fn handle_command(&self, command: &str) {
        if command.trim().is_empty() {
            return;
        }
        tracing::info!(id = %self.id, command, "command");

        let result = {
            let mut session = self.session.lock().await;
            shell::execute(command, &mut session)
        };

        match directive_events(&result) {
            Ok(events) => {
                for event in events {
                    self.send(event).await;
                }
            }
            Err(e) => {
                tracing::error!(id = %self.id, command, error = %e, "failed to handle command");
                self.send(ServerEvent::internal_error(&e)).await;
                return;
            }
        }

        if let CommandResult::Fetch { job_type } = result {
            self.spawn_fetch(job_type);
        }
    }

    async fn toggle_mode(&self) {
        let mode = self.state.feed.toggle_mode();
        if mode == SourceMode::Mock && !self.state.feed.has_remote() {
            self.send(ServerEvent::info(
                "⚠️ No remote job feed configured. Staying in mock mode.",
            ))
            .await;
            return;
        }
        self.send(ServerEvent::info(format!("🔄 Switched to {mode} mode")))
            .await;
    }

    fn spawn_fetch(&self, job_type: JobType) {
        let generation = self.fetch_generation.fetch_add(1, Ordering::AcqRel) + 1;
        let current = Arc::clone(&self.fetch_generation);
        let session = Arc::clone(&self.session);
        let state = Arc::clone(&self.state);
        let tx = self.tx.clone();
        let id = self.id;

        tokio::spawn(async move {
            let outcome = state.feed.fetch(job_type).await;
            let summary = outcome.summary(job_type);

            {
                let mut session = session.lock().await;
                if current.load(Ordering::Acquire) != generation {
                    tracing::debug!(%id, %job_type, "discarding superseded fetch");
                    return;
                }
                session.set_jobs(outcome.jobs);
            }

            let _ = tx.send(ServerEvent::success(summary)).await;
        });
    }
}

/// Events to send for an interpreter result.
///
/// Directives are followed by a confirmation line. `Fetch` only yields the
/// progress line; the fetch itself is started by the caller.
pub fn directive_events(result: &CommandResult) -> Result<Vec<ServerEvent>> {
    let events = match result {
        CommandResult::Text { text, is_error } => {
            let kind = if *is_error {
                OutputKind::Error
            } else {
                OutputKind::Output
            };
            vec![ServerEvent::output(kind, text.clone())]
        }
        CommandResult::Clear => vec![ServerEvent::ClearTerminal],
        CommandResult::Fetch { job_type } => vec![ServerEvent::info(format!(
            "🔄 Fetching {job_type} jobs... Please wait..."
        ))],
        CommandResult::OpenLink { url, job } => vec![
            ServerEvent::OpenLink { url: url.clone() },
            ServerEvent::info(format!(
                "🌐 Opening {} position in new tab...",
                job.company_or("job")
            )),
        ],
        CommandResult::Export {
            format,
            data_type,
            data,
        } => {
            let file = export::render(*format, *data_type, data)?;
            let confirmation = format!(
                "📥 Exported {} {data_type} to {}",
                data.len(),
                file.filename
            );
            vec![
                ServerEvent::DownloadFile {
                    data: file.body,
                    filename: file.filename,
                    format: file.format,
                },
                ServerEvent::success(confirmation),
            ]
        }
        CommandResult::ThemeChange { theme } => vec![
            ServerEvent::ThemeChange { theme: *theme },
            ServerEvent::success(format!("🎨 Theme changed to {theme}")),
        ],
        CommandResult::SaveSession { payload } => vec![
            ServerEvent::SaveSession {
                payload: payload.clone(),
            },
            ServerEvent::success("💾 Session saved to client storage"),
        ],
        CommandResult::LoadSession => vec![
            ServerEvent::LoadSession,
            ServerEvent::info("🔄 Loading session from client storage..."),
        ],
        CommandResult::Completions { list } => vec![ServerEvent::ShowCompletions {
            completions: list.clone(),
        }],
    };
    Ok(events)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::job::{Job, MockSource};
    use crate::session::Theme;
    use crate::shell::{DataType, ExportData, ExportFormat};

    #[test]
    fn test_text_maps_to_output_kind() {
        let events = directive_events(&CommandResult::error("nope")).unwrap();
        assert_eq!(events, vec![ServerEvent::error("nope")]);

        let events = directive_events(&CommandResult::text("fine")).unwrap();
        assert_eq!(
            events,
            vec![ServerEvent::output(OutputKind::Output, "fine")]
        );
    }

    #[test]
    fn test_open_link_confirms_with_company() {
        let job = Job {
            company: Some("Meta".to_string()),
            ..Job::default()
        };
        let events = directive_events(&CommandResult::OpenLink {
            url: "https://www.metacareers.com".to_string(),
            job,
        })
        .unwrap();
        assert_eq!(
            events[0],
            ServerEvent::OpenLink {
                url: "https://www.metacareers.com".to_string()
            }
        );
        assert_eq!(
            events[1],
            ServerEvent::info("🌐 Opening Meta position in new tab...")
        );
    }

    #[test]
    fn test_export_renders_download() {
        let data = ExportData::Jobs(MockSource::jobs(JobType::Newgrad));
        let events = directive_events(&CommandResult::Export {
            format: ExportFormat::Csv,
            data_type: DataType::Jobs,
            data,
        })
        .unwrap();

        let ServerEvent::DownloadFile {
            data,
            filename,
            format,
        } = &events[0]
        else {
            panic!("expected DownloadFile");
        };
        assert_eq!(filename, "jobshell_jobs.csv");
        assert_eq!(*format, ExportFormat::Csv);
        assert_eq!(data.lines().count(), 4);
        assert_eq!(
            events[1],
            ServerEvent::success("📥 Exported 3 jobs to jobshell_jobs.csv")
        );
    }

    #[test]
    fn test_theme_and_completions() {
        let events = directive_events(&CommandResult::ThemeChange { theme: Theme::Red }).unwrap();
        assert_eq!(events[0], ServerEvent::ThemeChange { theme: Theme::Red });

        let events = directive_events(&CommandResult::Completions {
            list: vec!["fetch".to_string()],
        })
        .unwrap();
        assert_eq!(
            events,
            vec![ServerEvent::ShowCompletions {
                completions: vec!["fetch".to_string()]
            }]
        );
    }

    #[test]
    fn test_fetch_only_announces() {
        let events = directive_events(&CommandResult::Fetch {
            job_type: JobType::Fulltime,
        })
        .unwrap();
        assert_eq!(
            events,
            vec![ServerEvent::info("🔄 Fetching fulltime jobs... Please wait...")]
        );
    }
}
