//! Configuration file management and CLI override resolution.

mod manager;

pub use manager::{
    ConfigFile, ConfigManager, DEFAULT_BIND, DEFAULT_FETCH_TIMEOUT_SECS, ResolveOptions,
    ResolvedConfig, ShellConfig, resolve_config,
};
