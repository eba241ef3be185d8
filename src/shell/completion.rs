use crate::job::JobType;
use crate::session::Theme;

use super::command::COMMAND_NAMES;
use super::result::ExportFormat;

const MAX_COMMAND_SUGGESTIONS: usize = 5;

/// Completion candidates for a partial command line.
///
/// Depends only on the fixed vocabularies, never on session state.
pub fn complete(partial: &str) -> Vec<String> {
    let parts: Vec<String> = partial
        .split_whitespace()
        .map(str::to_lowercase)
        .collect();

    match parts.as_slice() {
        [] => COMMAND_NAMES
            .iter()
            .take(MAX_COMMAND_SUGGESTIONS)
            .map(ToString::to_string)
            .collect(),
        [word] => COMMAND_NAMES
            .iter()
            .filter(|name| name.starts_with(word.as_str()))
            .take(MAX_COMMAND_SUGGESTIONS)
            .map(ToString::to_string)
            .collect(),
        [command, sub] => {
            let vocabulary = match command.as_str() {
                "fetch" => JobType::names(),
                "theme" => Theme::names(),
                "export" => ExportFormat::names(),
                _ => return Vec::new(),
            };
            vocabulary
                .into_iter()
                .filter(|candidate| candidate.starts_with(sub.as_str()))
                .map(ToString::to_string)
                .collect()
        }
        _ => Vec::new(),
    }
}
