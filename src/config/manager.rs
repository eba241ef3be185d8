use anyhow::{Context, Result, bail};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;
use std::time::Duration;

use crate::fs::atomic_write;
use crate::job::SourceMode;
use crate::paths;

/// Default TCP bind address for `jobshell serve`.
pub const DEFAULT_BIND: &str = "127.0.0.1:5000";

/// Default seconds to wait for a remote feed before falling back to mock data.
pub const DEFAULT_FETCH_TIMEOUT_SECS: u64 = 15;

/// Settings in the `[jobshell]` section of config.toml.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ShellConfig {
    /// Job source to start in (`mock` or `remote`).
    pub source: Option<SourceMode>,
    /// Base URL of the remote job feed.
    pub endpoint: Option<String>,
    /// Seconds before a remote fetch is abandoned.
    pub fetch_timeout_secs: Option<u64>,
    /// Address `jobshell serve` listens on.
    pub bind: Option<String>,
}

/// The complete configuration file structure.
///
/// Corresponds to `~/.config/jobshell/config.toml`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ConfigFile {
    #[serde(default)]
    pub jobshell: ShellConfig,
}

/// Resolved configuration after merging CLI arguments and config file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedConfig {
    pub source: SourceMode,
    pub endpoint: Option<String>,
    pub fetch_timeout: Duration,
    pub bind: String,
}

/// CLI overrides that take precedence over config file values.
#[derive(Debug, Clone, Default)]
pub struct ResolveOptions {
    pub source: Option<SourceMode>,
    pub endpoint: Option<String>,
    pub fetch_timeout_secs: Option<u64>,
    pub bind: Option<String>,
}

/// Merges CLI options over config file settings over built-in defaults.
///
/// # Errors
///
/// Returns an error if remote mode is selected without an endpoint or the
/// fetch timeout is zero.
pub fn resolve_config(
    options: &ResolveOptions,
    config_file: &ConfigFile,
) -> Result<ResolvedConfig> {
    let file = &config_file.jobshell;

    let source = options.source.or(file.source).unwrap_or_default();

    let endpoint = options
        .endpoint
        .as_ref()
        .or(file.endpoint.as_ref())
        .filter(|e| !e.trim().is_empty())
        .cloned();

    if source == SourceMode::Remote && endpoint.is_none() {
        bail!(
            "Missing required configuration: 'endpoint'\n\n\
             Remote mode needs a job feed URL. Provide it via:\n  \
             - CLI option: jobshell --endpoint <url>\n  \
             - Config file: ~/.config/jobshell/config.toml"
        );
    }

    let timeout_secs = options
        .fetch_timeout_secs
        .or(file.fetch_timeout_secs)
        .unwrap_or(DEFAULT_FETCH_TIMEOUT_SECS);
    if timeout_secs == 0 {
        bail!("Invalid configuration: 'fetch_timeout_secs' must be greater than 0");
    }

    let bind = options
        .bind
        .as_ref()
        .or(file.bind.as_ref())
        .cloned()
        .unwrap_or_else(|| DEFAULT_BIND.to_string());

    Ok(ResolvedConfig {
        source,
        endpoint,
        fetch_timeout: Duration::from_secs(timeout_secs),
        bind,
    })
}

/// Reads and writes `config.toml`.
pub struct ConfigManager {
    config_path: PathBuf,
}

impl ConfigManager {
    /// Manager for `$XDG_CONFIG_HOME/jobshell/config.toml`
    /// (`~/.config/jobshell/config.toml` when unset).
    pub fn new() -> Result<Self> {
        Ok(Self::with_path(paths::config_dir()?.join("config.toml")))
    }

    pub const fn with_path(config_path: PathBuf) -> Self {
        Self { config_path }
    }

    pub const fn config_path(&self) -> &PathBuf {
        &self.config_path
    }

    pub fn load(&self) -> Result<ConfigFile> {
        let path = &self.config_path;
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))
    }

    /// Writes the whole file, replacing it atomically.
    pub fn save(&self, config: &ConfigFile) -> Result<()> {
        let contents = toml::to_string_pretty(config).context("Failed to serialize config")?;
        atomic_write(&self.config_path, &contents)
    }

    /// The file's settings, or defaults when it is missing or unreadable.
    pub fn load_or_default(&self) -> ConfigFile {
        match self.load() {
            Ok(config) => config,
            Err(e) => {
                if self.config_path.exists() {
                    tracing::warn!(error = %format!("{e:#}"), "ignoring unreadable config file");
                }
                ConfigFile::default()
            }
        }
    }
}
