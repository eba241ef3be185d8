//! Process-wide output settings.
//!
//! Command results go to stdout. Status lines go to stderr and vanish under
//! `--quiet`; warnings are always shown. Setting `NO_COLOR` turns off styling.

use std::ffi::OsString;
use std::sync::OnceLock;

static SETTINGS: OnceLock<OutputConfig> = OnceLock::new();

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputConfig {
    pub quiet: bool,
    pub no_color: bool,
}

impl OutputConfig {
    /// Settings for a `--quiet` flag, with colour taken from the environment.
    pub fn from_env(quiet: bool) -> Self {
        Self {
            quiet,
            no_color: color_disabled(std::env::var_os("NO_COLOR")),
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self::from_env(false)
    }
}

/// `NO_COLOR` only counts when set to a non-empty value (https://no-color.org/).
fn color_disabled(value: Option<OsString>) -> bool {
    value.is_some_and(|v| !v.is_empty())
}

/// Installs the settings for this process. Returns `false` if already set.
pub fn init(config: OutputConfig) -> bool {
    SETTINGS.set(config).is_ok()
}

pub fn config() -> &'static OutputConfig {
    SETTINGS.get_or_init(OutputConfig::default)
}

pub fn is_quiet() -> bool {
    config().quiet
}

pub fn is_no_color() -> bool {
    config().no_color
}

/// Status line on stderr, suppressed by `--quiet`.
#[macro_export]
macro_rules! status {
    ($($arg:tt)*) => {
        if !$crate::output::is_quiet() {
            eprintln!($($arg)*);
        }
    };
}

/// Warning on stderr, shown even under `--quiet`.
#[macro_export]
macro_rules! warn {
    ($($arg:tt)*) => {
        eprintln!($($arg)*);
    };
}
