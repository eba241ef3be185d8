use std::fmt::Write as _;

use crate::job::{Job, JobType};
use crate::session::{Session, Theme};

use super::command::{Command, parse_command};
use super::completion::complete;
use super::error::CommandError;
use super::help::HELP_TEXT;
use super::result::{CommandResult, DataType, ExportData, ExportFormat};

const LIST_LIMIT: usize = 20;
const HISTORY_LIMIT: usize = 10;
const TITLE_MAX: usize = 50;
const REMOTE_MARKERS: [&str; 3] = ["remote", "anywhere", "distributed"];

type CommandOutcome = Result<CommandResult, CommandError>;

/// Interprets one raw command line against a session.
///
/// Non-blank input is recorded to history verbatim before it runs. Failures
/// come back as error `Text` results; nothing is raised to the caller.
pub fn execute(raw: &str, session: &mut Session) -> CommandResult {
    let Some(command) = parse_command(raw) else {
        return CommandResult::text("");
    };
    session.record_command(raw);

    let outcome = match command {
        Command::Help => Ok(CommandResult::text(HELP_TEXT)),
        Command::Clear => Ok(CommandResult::Clear),
        Command::Fetch(args) => fetch(args),
        Command::List => Ok(list(session)),
        Command::Filter(args) => filter(args, session),
        Command::Open(args) => open(args, session),
        Command::Status => Ok(status(session)),
        Command::History => Ok(history(session)),
        Command::Bookmark(args) => bookmark(args, session),
        Command::Bookmarks => Ok(bookmarks(session)),
        Command::Export(args) => export(args, session),
        Command::Theme(args) => theme(args, session),
        Command::Search(args) => search(args, session),
        Command::Preferences => Ok(preferences(session)),
        Command::Save => Ok(CommandResult::SaveSession {
            payload: session.payload(),
        }),
        Command::Load => Ok(CommandResult::LoadSession),
        Command::Reset => {
            session.reset();
            Ok(CommandResult::text(
                "🔄 Session reset. All jobs and filters cleared.",
            ))
        }
        Command::Complete(partial) => Ok(completions(partial)),
        Command::Unknown => Err(CommandError::unknown(raw.trim())),
    };

    outcome.unwrap_or_else(|e| CommandResult::error(e.to_string()))
}

fn fetch(args: &str) -> CommandOutcome {
    let Some(name) = args.split_whitespace().next() else {
        return Err(CommandError::Usage("fetch [internships|newgrad|fulltime]"));
    };
    let job_type: JobType = name
        .to_lowercase()
        .parse()
        .map_err(|_| CommandError::InvalidJobType)?;
    Ok(CommandResult::Fetch { job_type })
}

fn list(session: &Session) -> CommandResult {
    let view = session.filtered_jobs();
    if view.is_empty() {
        let message = if session.jobs().is_empty() {
            "📭 No jobs loaded. Use 'fetch' to get job listings first."
        } else {
            "📭 No jobs match current filters. Use 'reset' to clear filters."
        };
        return CommandResult::text(message);
    }

    let mut out = format!("\n📋 SHOWING {} JOBS:\n", view.len());
    for (i, job) in view.iter().take(LIST_LIMIT).enumerate() {
        let _ = write!(
            out,
            "\n{:2}. {} - {}\n    📍 {}",
            i + 1,
            job.company_or("Unknown Company"),
            truncate_title(job.title_or("Unknown Position")),
            job.location_or("Location TBD"),
        );
    }
    if view.len() > LIST_LIMIT {
        let _ = write!(
            out,
            "\n\n... and {} more jobs\nUse filters to narrow down results.",
            view.len() - LIST_LIMIT
        );
    }
    CommandResult::text(out)
}

fn truncate_title(title: &str) -> String {
    if title.chars().count() > TITLE_MAX {
        let head: String = title.chars().take(TITLE_MAX - 3).collect();
        format!("{head}...")
    } else {
        title.to_string()
    }
}

fn filter(args: &str, session: &mut Session) -> CommandOutcome {
    if session.jobs().is_empty() {
        return Err(CommandError::NoJobs("filter"));
    }
    if args.is_empty() {
        return Err(CommandError::Usage(
            "filter <criteria>\nExample: filter remote OR filter location=NYC",
        ));
    }

    let criteria = args.to_lowercase();
    let count = if criteria == "remote" {
        session.narrow_view(is_remote)
    } else if let Some((key, value)) = criteria.split_once('=') {
        let key = key.trim();
        let value = value.trim();
        session.narrow_view(|job| {
            job.field(key)
                .unwrap_or_default()
                .to_lowercase()
                .contains(value)
        })
    } else {
        session.narrow_view(|job| job.all_text().contains(&criteria))
    };

    Ok(CommandResult::text(format!(
        "🔍 Filter applied: '{criteria}'\n✅ Found {count} matching jobs"
    )))
}

fn is_remote(job: &Job) -> bool {
    let location = job.location_or("").to_lowercase();
    REMOTE_MARKERS.iter().any(|marker| location.contains(marker))
}

/// Parses a 1-based position and resolves it in the current view.
fn view_position(arg: &str, session: &Session) -> Result<usize, CommandError> {
    let position: i64 = arg.parse().map_err(|_| CommandError::NotANumber)?;
    let len = session.filtered_jobs().len();
    usize::try_from(position)
        .ok()
        .filter(|p| (1..=len).contains(p))
        .ok_or(CommandError::InvalidIndex(len))
}

fn open(args: &str, session: &Session) -> CommandOutcome {
    let Some(arg) = args.split_whitespace().next() else {
        return Err(CommandError::Usage("open <job_id>\nExample: open 3"));
    };
    let position = view_position(arg, session)?;
    let job = session
        .view_job(position)
        .ok_or_else(|| CommandError::InvalidIndex(session.filtered_jobs().len()))?;
    let url = job.open_url().ok_or(CommandError::NoUrl)?.to_string();

    Ok(CommandResult::OpenLink {
        url,
        job: Job::clone(job),
    })
}

fn status(session: &Session) -> CommandResult {
    let fetch_time = session.last_fetch_time().map_or_else(
        || "Never".to_string(),
        |t| t.format("%Y-%m-%d %H:%M:%S").to_string(),
    );

    CommandResult::text(format!(
        "📊 SESSION STATUS:\n  \
         Total jobs loaded: {}\n  \
         Visible jobs: {}\n  \
         Commands executed: {}\n  \
         Last fetch: {fetch_time}\n\n\
         💡 Use 'list' to see jobs or 'help' for commands",
        session.jobs().len(),
        session.filtered_jobs().len(),
        session.command_history().len(),
    ))
}

fn history(session: &Session) -> CommandResult {
    let history = session.command_history();
    if history.is_empty() {
        return CommandResult::text("📜 No command history yet");
    }

    let skip = history.len().saturating_sub(HISTORY_LIMIT);
    let mut out = String::from("📜 COMMAND HISTORY:");
    for (i, cmd) in history[skip..].iter().enumerate() {
        let _ = write!(out, "\n  {}. {cmd}", i + 1);
    }
    CommandResult::text(out)
}

fn bookmark(args: &str, session: &mut Session) -> CommandOutcome {
    const USAGE: &str = "bookmark <job_id> OR bookmark remove <job_id>";

    let Some((first, rest)) = args
        .split_once(char::is_whitespace)
        .map(|(f, r)| (f, r.trim()))
        .or_else(|| (!args.is_empty()).then_some((args, "")))
    else {
        return Err(CommandError::Usage(USAGE));
    };

    if first.eq_ignore_ascii_case("remove") {
        if rest.is_empty() {
            return Err(CommandError::Usage(USAGE));
        }
        return if session.remove_bookmark(rest) {
            Ok(CommandResult::text(format!("🗑️ Removed bookmark: {rest}")))
        } else {
            Err(CommandError::BookmarkNotFound(rest.to_string()))
        };
    }

    let position = view_position(first, session)?;
    let Some(job) = session.view_job(position).cloned() else {
        return Err(CommandError::InvalidIndex(session.filtered_jobs().len()));
    };

    if session.add_bookmark(&job) {
        Ok(CommandResult::text(format!(
            "⭐ Bookmarked: {} - {}",
            job.company_or("Unknown"),
            job.title_or("Unknown")
        )))
    } else {
        Ok(CommandResult::text("📌 Job already bookmarked"))
    }
}

fn bookmarks(session: &Session) -> CommandResult {
    let saved = session.bookmarks();
    if saved.is_empty() {
        return CommandResult::text("📭 No bookmarks saved yet.");
    }

    let mut out = format!("\n⭐ BOOKMARKS ({}):\n", saved.len());
    for (i, bookmark) in saved.iter().enumerate() {
        let _ = write!(
            out,
            "\n{:2}. {} - {}\n    📅 Saved: {}",
            i + 1,
            bookmark.job.company_or("Unknown"),
            bookmark.job.title_or("Unknown"),
            bookmark.saved_at(),
        );
    }
    CommandResult::text(out)
}

fn export(args: &str, session: &Session) -> CommandOutcome {
    let mut parts = args.split_whitespace().map(str::to_lowercase);
    let Some(format) = parts.next() else {
        return Err(CommandError::Usage("export [json|csv] [jobs|bookmarks]"));
    };
    let format: ExportFormat = format.parse().map_err(|()| CommandError::InvalidFormat)?;
    // Anything other than `bookmarks` exports the current view.
    let data_type: DataType = parts
        .next()
        .and_then(|name| name.parse().ok())
        .unwrap_or_default();

    let data = match data_type {
        DataType::Jobs => ExportData::Jobs(
            session
                .filtered_jobs()
                .iter()
                .map(|job| Job::clone(job))
                .collect(),
        ),
        DataType::Bookmarks => ExportData::Bookmarks(session.bookmarks().to_vec()),
    };

    if data.is_empty() {
        return Ok(CommandResult::text(format!("📭 No {data_type} to export")));
    }

    Ok(CommandResult::Export {
        format,
        data_type,
        data,
    })
}

fn theme(args: &str, session: &mut Session) -> CommandOutcome {
    let Some(name) = args.split_whitespace().next() else {
        return Ok(CommandResult::text(format!(
            "🎨 Current theme: {}\nAvailable: {}\nUsage: theme <color>",
            session.preferences().theme,
            Theme::names().join(", ")
        )));
    };

    let theme: Theme = name
        .to_lowercase()
        .parse()
        .map_err(|_| CommandError::InvalidTheme)?;
    session.set_theme(theme);
    Ok(CommandResult::ThemeChange { theme })
}

fn search(args: &str, session: &mut Session) -> CommandOutcome {
    if args.is_empty() {
        return Err(CommandError::Usage("search <keyword>"));
    }
    if session.jobs().is_empty() {
        return Err(CommandError::NoJobs("search"));
    }

    let keyword = args.to_lowercase();
    let count = session.narrow_view(|job| job.search_text().contains(&keyword));

    Ok(CommandResult::text(format!(
        "🔍 Search results for '{keyword}': {count} jobs found"
    )))
}

fn preferences(session: &Session) -> CommandResult {
    let mut out = String::from("\n⚙️ USER PREFERENCES:");
    for (key, value, is_set) in session.preferences().entries() {
        let marker = if is_set { "✅" } else { "❌" };
        let _ = write!(out, "\n  {marker} {key}: {value}");
    }
    out.push_str("\n\n💡 Use 'theme <color>' to change theme");
    CommandResult::text(out)
}

fn completions(partial: &str) -> CommandResult {
    let list = complete(partial);
    if list.is_empty() {
        CommandResult::text("💭 No completions available")
    } else {
        CommandResult::Completions { list }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::job::MockSource;
    use std::sync::Arc;

    fn session_with(job_type: JobType) -> Session {
        let mut session = Session::new();
        session.set_jobs(MockSource::jobs(job_type));
        session
    }

    fn text(result: &CommandResult) -> &str {
        result.as_text().unwrap()
    }

    #[test]
    fn test_empty_command_is_not_recorded() {
        let mut session = Session::new();
        let result = execute("   ", &mut session);
        assert_eq!(result, CommandResult::text(""));
        assert!(session.command_history().is_empty());
    }

    #[test]
    fn test_raw_command_recorded_verbatim() {
        let mut session = Session::new();
        execute("  HeLP  ", &mut session);
        assert_eq!(session.command_history(), ["  HeLP  "]);
    }

    #[test]
    fn test_help_is_case_insensitive() {
        let mut session = Session::new();
        let result = execute("HELP", &mut session);
        assert!(text(&result).contains("JOB COMMANDS"));
        assert!(!result.is_error());
    }

    #[test]
    fn test_unknown_command() {
        let mut session = Session::new();
        let result = execute("launch rockets", &mut session);
        assert!(result.is_error());
        assert!(text(&result).contains("complete launch"));
    }

    #[test]
    fn test_fetch_valid_types() {
        for job_type in JobType::ALL {
            let mut session = Session::new();
            let result = execute(&format!("fetch {job_type}"), &mut session);
            assert_eq!(result, CommandResult::Fetch { job_type });
            assert!(session.jobs().is_empty());
        }
    }

    #[test]
    fn test_fetch_invalid_and_missing() {
        let mut session = Session::new();
        assert!(execute("fetch", &mut session).is_error());
        let result = execute("fetch contract", &mut session);
        assert!(result.is_error());
        assert!(text(&result).contains("Invalid job type"));
    }

    #[test]
    fn test_list_empty_messages() {
        let mut session = Session::new();
        let result = execute("list", &mut session);
        assert!(text(&result).starts_with("📭 No jobs loaded"));
        assert!(!result.is_error());

        let mut session = session_with(JobType::Internships);
        execute("filter company=nobody", &mut session);
        let result = execute("ls", &mut session);
        assert!(text(&result).contains("No jobs match current filters"));
    }

    #[test]
    fn test_list_truncates_long_titles() {
        let mut session = Session::new();
        session.set_jobs(vec![Job {
            company: Some("Acme".to_string()),
            title: Some("A".repeat(60)),
            ..Job::default()
        }]);
        let result = execute("list", &mut session);
        let expected = format!("Acme - {}...", "A".repeat(47));
        assert!(text(&result).contains(&expected));
        assert!(text(&result).contains("📍 Location TBD"));
    }

    #[test]
    fn test_list_caps_at_twenty() {
        let mut session = Session::new();
        let jobs = (0..25)
            .map(|i| Job {
                company: Some(format!("Company {i}")),
                ..Job::default()
            })
            .collect();
        session.set_jobs(jobs);
        let result = execute("jobs", &mut session);
        let out = text(&result);
        assert!(out.contains("SHOWING 25 JOBS"));
        assert!(out.contains("20. Company 19"));
        assert!(!out.contains("Company 20 -"));
        assert!(out.contains("... and 5 more jobs"));
    }

    #[test]
    fn test_filter_requires_jobs() {
        let mut session = Session::new();
        let result = execute("filter remote", &mut session);
        assert!(result.is_error());
        assert!(text(&result).contains("No jobs to filter"));
    }

    #[test]
    fn test_filter_remote_is_idempotent_subset() {
        let mut session = Session::new();
        let mut jobs = MockSource::jobs(JobType::Internships);
        jobs.push(Job {
            location: Some("Anywhere (US)".to_string()),
            ..Job::default()
        });
        jobs.push(Job {
            location: Some("DISTRIBUTED team".to_string()),
            ..Job::default()
        });
        session.set_jobs(jobs);

        execute("filter remote", &mut session);
        let first: Vec<_> = session.filtered_jobs().to_vec();
        assert_eq!(first.len(), 3);
        for job in &first {
            assert!(is_remote(job));
            assert!(session.jobs().iter().any(|j| Arc::ptr_eq(j, job)));
        }

        execute("filter remote", &mut session);
        assert_eq!(session.filtered_jobs().len(), first.len());
        assert!(
            session
                .filtered_jobs()
                .iter()
                .zip(&first)
                .all(|(a, b)| Arc::ptr_eq(a, b))
        );
    }

    #[test]
    fn test_filter_key_value() {
        let mut session = session_with(JobType::Internships);
        let result = execute("filter company=GOOGLE", &mut session);
        assert!(text(&result).contains("Found 1 matching jobs"));
        assert_eq!(session.filtered_jobs()[0].company_or(""), "Google");

        execute("filter nonexistent=x", &mut session);
        assert!(session.filtered_jobs().is_empty());
    }

    #[test]
    fn test_filter_free_text_scans_all_fields() {
        let mut session = session_with(JobType::Internships);
        execute("filter 8500/month", &mut session);
        assert_eq!(session.filtered_jobs().len(), 1);
        assert_eq!(session.filtered_jobs()[0].company_or(""), "Meta");
    }

    #[test]
    fn test_filter_scans_full_set_not_view() {
        let mut session = session_with(JobType::Internships);
        execute("filter company=google", &mut session);
        execute("filter company=amazon", &mut session);
        assert_eq!(session.filtered_jobs().len(), 1);
        assert_eq!(session.filtered_jobs()[0].company_or(""), "Amazon");
    }

    #[test]
    fn test_open_returns_link() {
        let mut session = session_with(JobType::Internships);
        match execute("open 2", &mut session) {
            CommandResult::OpenLink { url, job } => {
                assert_eq!(url, "https://careers.microsoft.com");
                assert_eq!(job.company_or(""), "Microsoft");
            }
            other => panic!("expected OpenLink, got {other:?}"),
        }
    }

    #[test]
    fn test_open_out_of_range() {
        let mut session = session_with(JobType::Fulltime);
        for arg in ["0", "3", "-1", "999999999999999999999"] {
            let result = execute(&format!("open {arg}"), &mut session);
            assert!(result.is_error(), "open {arg} should fail");
        }
        let result = execute("open two", &mut session);
        assert!(text(&result).contains("must be a number"));
        assert!(execute("open", &mut session).is_error());
    }

    #[test]
    fn test_open_without_url() {
        let mut session = Session::new();
        session.set_jobs(vec![Job::default()]);
        let result = execute("open 1", &mut session);
        assert!(text(&result).contains("No URL available"));
    }

    #[test]
    fn test_status_counts() {
        let mut session = Session::new();
        let result = execute("status", &mut session);
        assert!(text(&result).contains("Last fetch: Never"));
        assert!(text(&result).contains("Commands executed: 1"));

        session.set_jobs(MockSource::jobs(JobType::Newgrad));
        let result = execute("status", &mut session);
        assert!(text(&result).contains("Total jobs loaded: 3"));
        assert!(!text(&result).contains("Never"));
    }

    #[test]
    fn test_history_shows_last_ten() {
        let mut session = Session::new();
        for i in 0..12 {
            execute(&format!("theme {i}"), &mut session);
        }
        let result = execute("history", &mut session);
        let out = text(&result);
        assert!(out.contains("1. theme 3"));
        assert!(out.contains("10. history"));
        assert!(!out.contains("theme 2\n"));
    }

    #[test]
    fn test_bookmark_add_and_duplicate() {
        let mut session = session_with(JobType::Internships);
        let result = execute("bookmark 1", &mut session);
        assert!(text(&result).contains("Bookmarked: Google"));
        let result = execute("bookmark 1", &mut session);
        assert_eq!(text(&result), "📌 Job already bookmarked");
        assert_eq!(session.bookmarks().len(), 1);
    }

    #[test]
    fn test_bookmark_errors() {
        let mut session = session_with(JobType::Internships);
        assert!(execute("bookmark", &mut session).is_error());
        assert!(execute("bookmark 9", &mut session).is_error());
        assert!(text(&execute("bookmark x", &mut session)).contains("must be a number"));
        assert!(execute("bookmark remove", &mut session).is_error());
    }

    #[test]
    fn test_bookmark_remove_keeps_id_case() {
        let mut session = session_with(JobType::Internships);
        execute("bookmark 3", &mut session);
        let result = execute(
            "bookmark remove Meta_Frontend Engineering Intern",
            &mut session,
        );
        assert!(!result.is_error());
        assert!(session.bookmarks().is_empty());

        let result = execute("bookmark remove Meta_Frontend Engineering Intern", &mut session);
        assert!(result.is_error());
        assert!(text(&result).contains("Bookmark not found"));
    }

    #[test]
    fn test_bookmarks_listing() {
        let mut session = session_with(JobType::Internships);
        assert_eq!(
            text(&execute("bookmarks", &mut session)),
            "📭 No bookmarks saved yet."
        );
        execute("bookmark 2", &mut session);
        let result = execute("bookmarks", &mut session);
        let out = text(&result);
        assert!(out.contains("BOOKMARKS (1)"));
        assert!(out.contains("Microsoft - Software Development Engineer Intern"));
        assert!(out.contains("📅 Saved: "));
    }

    #[test]
    fn test_export_defaults_to_filtered_jobs() {
        let mut session = session_with(JobType::Internships);
        execute("filter remote", &mut session);
        match execute("export json", &mut session) {
            CommandResult::Export {
                format,
                data_type,
                data,
            } => {
                assert_eq!(format, ExportFormat::Json);
                assert_eq!(data_type, DataType::Jobs);
                assert_eq!(data.len(), 1);
            }
            other => panic!("expected Export, got {other:?}"),
        }
    }

    #[test]
    fn test_export_empty_and_invalid() {
        let mut session = Session::new();
        let result = execute("export csv bookmarks", &mut session);
        assert_eq!(text(&result), "📭 No bookmarks to export");
        assert!(!result.is_error());

        assert!(execute("export", &mut session).is_error());
        assert!(execute("export xml", &mut session).is_error());
    }

    #[test]
    fn test_export_unknown_data_type_uses_view() {
        let mut session = session_with(JobType::Fulltime);
        let result = execute("export json users", &mut session);
        assert!(!result.is_error());
        let CommandResult::Export {
            data_type, data, ..
        } = result
        else {
            panic!("expected an export directive");
        };
        assert_eq!(data_type, DataType::Jobs);
        assert_eq!(data.len(), 2);

        let mut empty = Session::new();
        let result = execute("export csv users", &mut empty);
        assert_eq!(text(&result), "📭 No jobs to export");
    }

    #[test]
    fn test_theme_show_set_and_reject() {
        let mut session = Session::new();
        let result = execute("theme", &mut session);
        assert!(text(&result).contains("Current theme: green"));

        let result = execute("theme BLUE", &mut session);
        assert_eq!(result, CommandResult::ThemeChange { theme: Theme::Blue });
        assert_eq!(session.preferences().theme, Theme::Blue);

        let result = execute("theme pink", &mut session);
        assert!(result.is_error());
        assert_eq!(session.preferences().theme, Theme::Blue);
    }

    #[test]
    fn test_search_rescans_full_set() {
        let mut session = session_with(JobType::Internships);
        execute("filter company=meta", &mut session);
        let result = execute("search PYTHON", &mut session);
        assert!(text(&result).contains("'python': 3 jobs found"));
        assert_eq!(session.filtered_jobs().len(), 3);
    }

    #[test]
    fn test_search_errors() {
        let mut session = Session::new();
        assert!(execute("search", &mut session).is_error());
        assert!(execute("search rust", &mut session).is_error());
    }

    #[test]
    fn test_preferences_listing() {
        let mut session = Session::new();
        let result = execute("preferences", &mut session);
        let out = text(&result);
        assert!(out.contains("✅ theme: green"));
        assert!(out.contains("✅ notifications: true"));
        assert!(out.contains("✅ auto_save: true"));
    }

    #[test]
    fn test_save_and_load_directives() {
        let mut session = session_with(JobType::Internships);
        execute("bookmark 1", &mut session);
        match execute("save", &mut session) {
            CommandResult::SaveSession { payload } => {
                assert_eq!(payload.bookmarks.len(), 1);
                assert_eq!(payload.command_history, ["bookmark 1", "save"]);
            }
            other => panic!("expected SaveSession, got {other:?}"),
        }
        assert_eq!(execute("load", &mut session), CommandResult::LoadSession);
    }

    #[test]
    fn test_reset_and_clear() {
        let mut session = session_with(JobType::Internships);
        execute("bookmark 1", &mut session);
        let result = execute("reset", &mut session);
        assert!(text(&result).contains("Session reset"));
        assert!(session.jobs().is_empty());
        assert_eq!(session.bookmarks().len(), 1);
        assert_eq!(session.command_history().len(), 2);

        assert_eq!(execute("clear", &mut session), CommandResult::Clear);
    }

    #[test]
    fn test_complete_command() {
        let mut session = Session::new();
        assert_eq!(
            execute("complete", &mut session),
            CommandResult::Completions {
                list: vec![
                    "help".to_string(),
                    "fetch".to_string(),
                    "list".to_string(),
                    "filter".to_string(),
                    "open".to_string(),
                ]
            }
        );
        assert_eq!(
            execute("complete theme p", &mut session),
            CommandResult::Completions {
                list: vec!["purple".to_string()]
            }
        );
        assert_eq!(
            text(&execute("complete xyz", &mut session)),
            "💭 No completions available"
        );
    }
}
