//! Configure command handler for editing default settings.

use anyhow::{Result, bail};
use inquire::{CustomType, Select, Text};

use crate::config::{
    ConfigFile, ConfigManager, DEFAULT_BIND, DEFAULT_FETCH_TIMEOUT_SECS, ShellConfig,
};
use crate::job::SourceMode;
use crate::ui::{Style, is_cancellation};

/// Runs the configure command.
///
/// With `show`, prints the current settings. Otherwise prompts for each
/// setting and writes the config file.
pub fn run_configure(show: bool) -> Result<()> {
    if show {
        let manager = ConfigManager::new()?;
        print_current_defaults(&manager.load_or_default());
        println!(
            "{} {}",
            Style::label("file"),
            Style::secondary(manager.config_path().display())
        );
        return Ok(());
    }
    match run_configure_inner() {
        Err(e) if is_cancellation(&e) => {
            println!();
            Ok(())
        }
        result => result,
    }
}

fn run_configure_inner() -> Result<()> {
    let manager = ConfigManager::new()?;
    let mut config = manager.load_or_default();

    print_current_defaults(&config);

    let source = select_source(config.jobshell.source)?;
    let endpoint = prompt_endpoint(config.jobshell.endpoint.as_deref(), source)?;
    let fetch_timeout_secs = CustomType::<u64>::new("Fetch timeout (seconds):")
        .with_default(
            config
                .jobshell
                .fetch_timeout_secs
                .unwrap_or(DEFAULT_FETCH_TIMEOUT_SECS),
        )
        .with_error_message("Enter a whole number of seconds")
        .prompt()?;
    if fetch_timeout_secs == 0 {
        bail!("Fetch timeout must be greater than 0");
    }
    let bind = Text::new("Server bind address:")
        .with_default(config.jobshell.bind.as_deref().unwrap_or(DEFAULT_BIND))
        .prompt()?;

    config.jobshell = ShellConfig {
        source: Some(source),
        endpoint,
        fetch_timeout_secs: Some(fetch_timeout_secs),
        bind: Some(bind.trim().to_string()),
    };

    manager.save(&config)?;

    println!();
    println!(
        "{} Configuration saved to {}",
        Style::success("✓"),
        Style::secondary(manager.config_path().display())
    );

    Ok(())
}

fn print_current_defaults(config: &ConfigFile) {
    let settings = &config.jobshell;
    let not_set = || Style::secondary("(not set)");

    println!("{}", Style::header("Current defaults"));
    println!(
        "  {}    {}",
        Style::label("source"),
        settings.source.map_or_else(not_set, Style::value)
    );
    println!(
        "  {}  {}",
        Style::label("endpoint"),
        settings.endpoint.as_deref().map_or_else(not_set, Style::value)
    );
    println!(
        "  {}   {}",
        Style::label("timeout"),
        settings
            .fetch_timeout_secs
            .map_or_else(not_set, |secs| Style::value(format!("{secs}s")))
    );
    println!(
        "  {}      {}",
        Style::label("bind"),
        settings.bind.as_deref().map_or_else(not_set, Style::value)
    );
    println!();
}

fn select_source(default: Option<SourceMode>) -> Result<SourceMode> {
    let options = vec![SourceMode::Mock, SourceMode::Remote];
    let default_index = usize::from(default == Some(SourceMode::Remote));

    let selection = Select::new("Default job source:", options)
        .with_starting_cursor(default_index)
        .prompt()?;

    Ok(selection)
}

fn prompt_endpoint(default: Option<&str>, source: SourceMode) -> Result<Option<String>> {
    let mut prompt = Text::new("Remote feed endpoint:")
        .with_help_message("Base URL; '/<job type>' is appended. Leave empty for none");
    if let Some(d) = default {
        prompt = prompt.with_default(d);
    }

    let endpoint = prompt.prompt()?;
    let endpoint = endpoint.trim();

    if endpoint.is_empty() {
        if source == SourceMode::Remote {
            bail!("Remote mode needs an endpoint");
        }
        return Ok(None);
    }
    Ok(Some(endpoint.to_string()))
}
