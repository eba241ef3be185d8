//! Subcommand implementations.

/// Configure command handler.
pub mod configure;

/// Interactive REPL handler.
pub mod repl;

/// TCP server handler.
pub mod serve;

use anyhow::Result;

use crate::config::{ConfigManager, ResolveOptions, ResolvedConfig, resolve_config};
use crate::job::{JobFeed, JobSource, RemoteSource};

/// Resolves CLI options against the config file on disk.
pub fn load_config(options: &ResolveOptions) -> Result<ResolvedConfig> {
    let manager = ConfigManager::new()?;
    let config_file = manager.load_or_default();
    resolve_config(options, &config_file)
}

/// Builds the job feed described by a resolved configuration.
pub fn build_feed(config: &ResolvedConfig) -> JobFeed {
    let remote = config
        .endpoint
        .clone()
        .map(|endpoint| Box::new(RemoteSource::new(endpoint)) as Box<dyn JobSource>);
    JobFeed::new(remote, config.source, config.fetch_timeout)
}
