use anyhow::Result;
use std::sync::Arc;

use super::{build_feed, load_config};
use crate::config::ResolveOptions;
use crate::server::{self, ServerState};

pub async fn run_serve(options: &ResolveOptions) -> Result<()> {
    let config = load_config(options)?;
    tracing::info!(
        source = %config.source,
        endpoint = config.endpoint.as_deref().unwrap_or("-"),
        timeout = ?config.fetch_timeout,
        "starting server"
    );

    let state = Arc::new(ServerState::new(build_feed(&config)));
    crate::status!("jobshell listening on {}", config.bind);
    server::run(&config.bind, state).await
}
