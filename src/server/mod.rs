//! TCP transport: one session per connection, JSON lines on the wire.

mod connection;
/// Wire message types.
pub mod protocol;

pub use connection::directive_events;
pub use protocol::{ClientMessage, OutputKind, ServerEvent};

use anyhow::{Context, Result};
use std::sync::Arc;
use tokio::net::TcpListener;

use crate::job::JobFeed;
use crate::session::SessionStore;

pub const WELCOME: &str = "\
🚀 JOBSHELL - JOB HUNTING TERMINAL 🚀

Welcome to the ultimate job exploration experience!
Type 'help' to see available commands.

Ready to hack your way to your dream job? Let's go! 💼⚡";

/// Collaborators shared by every connection.
pub struct ServerState {
    pub store: SessionStore,
    pub feed: JobFeed,
}

impl ServerState {
    pub fn new(feed: JobFeed) -> Self {
        Self {
            store: SessionStore::new(),
            feed,
        }
    }

    pub fn health(&self) -> ServerEvent {
        ServerEvent::Health {
            status: "ok".to_string(),
            sessions: self.store.len(),
            source_mode: self.feed.mode(),
        }
    }
}

/// Binds `addr` and serves until the process exits.
pub async fn run(addr: &str, state: Arc<ServerState>) -> Result<()> {
    let listener = TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;
    tracing::info!(addr = %listener.local_addr()?, mode = %state.feed.mode(), "jobshell server listening");
    serve(listener, state).await
}

/// Accepts connections on an already-bound listener.
pub async fn serve(listener: TcpListener, state: Arc<ServerState>) -> Result<()> {
    loop {
        let (stream, peer) = listener
            .accept()
            .await
            .context("Failed to accept connection")?;
        let state = Arc::clone(&state);
        tokio::spawn(async move {
            if let Err(e) = connection::handle(stream, peer, state).await {
                tracing::warn!(%peer, error = %e, "connection ended with error");
            }
        });
    }
}
