//! Interactive terminal front end.
//!
//! Runs the same interpreter as the TCP server against a single local
//! session, carrying out directives directly: exports land in the working
//! directory and saved sessions in the data directory.

mod completer;
mod ui;

pub use completer::ShellCompleter;

use anyhow::{Context, Result};
use inquire::Text;
use std::fs;
use std::path::PathBuf;

use crate::export;
use crate::fs::atomic_write;
use crate::job::{JobFeed, JobType};
use crate::session::{Session, SessionPayload};
use crate::shell::{self, CommandResult};
use crate::ui::{Spinner, Style, answered};

/// Where REPL directives read and write files.
#[derive(Debug, Clone)]
pub struct ReplPaths {
    pub session_file: PathBuf,
    pub export_dir: PathBuf,
}

/// A local, single-user shell session.
pub struct Repl {
    session: Session,
    feed: JobFeed,
    paths: ReplPaths,
}

impl Repl {
    pub fn new(feed: JobFeed, paths: ReplPaths) -> Self {
        Self {
            session: Session::new(),
            feed,
            paths,
        }
    }

    pub const fn session(&self) -> &Session {
        &self.session
    }

    pub async fn run(&mut self) -> Result<()> {
        ui::print_header(self.feed.mode());

        loop {
            let theme = self.session.preferences().theme;
            let input = Text::new("jobshell")
                .with_render_config(ui::render_config(theme))
                .with_autocomplete(ShellCompleter)
                .prompt();

            let Some(line) = answered(input)? else {
                println!();
                break;
            };
            if matches!(line.trim(), "exit" | "quit") {
                break;
            }
            if let Err(e) = self.handle_line(&line).await {
                tracing::debug!(error = %e, "directive failed");
                ui::print_error(&format!("❌ Internal error: {e:#}"));
            }
        }

        ui::print_goodbye();
        Ok(())
    }

    /// Interprets one line and carries out the resulting directive.
    pub async fn handle_line(&mut self, line: &str) -> Result<()> {
        let result = shell::execute(line, &mut self.session);
        self.apply(result).await
    }

    async fn apply(&mut self, result: CommandResult) -> Result<()> {
        let theme = self.session.preferences().theme;
        match result {
            CommandResult::Text { text, is_error } => {
                if is_error {
                    ui::print_error(&text);
                } else {
                    ui::print_output(theme, &text);
                }
            }
            CommandResult::Clear => ui::clear_screen(),
            CommandResult::Fetch { job_type } => self.fetch(job_type).await,
            CommandResult::OpenLink { url, job } => {
                ui::print_info(&format!(
                    "🌐 {} position: {url}",
                    job.company_or("Job")
                ));
            }
            CommandResult::Export {
                format,
                data_type,
                data,
            } => {
                let file = export::render(format, data_type, &data)?;
                let path = self.paths.export_dir.join(&file.filename);
                atomic_write(&path, &file.body)?;
                ui::print_success(&format!(
                    "📥 Exported {} {data_type} to {}",
                    data.len(),
                    path.display()
                ));
            }
            CommandResult::ThemeChange { theme } => {
                ui::print_success(&format!("🎨 Theme changed to {theme}"));
            }
            CommandResult::SaveSession { payload } => self.save(&payload)?,
            CommandResult::LoadSession => self.load()?,
            CommandResult::Completions { list } => {
                ui::print_output(theme, &format!("💡 {}", list.join("  ")));
            }
        }
        Ok(())
    }

    async fn fetch(&mut self, job_type: JobType) {
        let spinner = Spinner::new(&format!("Fetching {job_type} jobs..."));
        let outcome = self.feed.fetch(job_type).await;
        spinner.stop();

        let summary = outcome.summary(job_type);
        self.session.set_jobs(outcome.jobs);
        if outcome.degraded {
            crate::warn!(
                "{}",
                Style::warning("⚠️ Remote job feed unavailable, showing mock data.")
            );
        }
        ui::print_success(&summary);
    }

    fn save(&self, payload: &SessionPayload) -> Result<()> {
        let body =
            serde_json::to_string_pretty(payload).context("Failed to serialize session")?;
        atomic_write(&self.paths.session_file, &body)?;
        tracing::info!(path = %self.paths.session_file.display(), "session saved");
        ui::print_success(&format!(
            "💾 Session saved to {}",
            self.paths.session_file.display()
        ));
        Ok(())
    }

    fn load(&mut self) -> Result<()> {
        let path = &self.paths.session_file;
        if !path.exists() {
            ui::print_info("📭 No saved session found. Use 'save' first.");
            return Ok(());
        }
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read session file: {}", path.display()))?;
        let payload: SessionPayload = serde_json::from_str(&contents)
            .with_context(|| format!("Failed to parse session file: {}", path.display()))?;
        let added = self.session.restore(payload);
        ui::print_success(&format!("🔄 Session loaded ({added} bookmarks added)"));
        Ok(())
    }
}
