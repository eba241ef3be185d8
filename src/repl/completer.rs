use inquire::autocompletion::{Autocomplete, Replacement};

use crate::shell;

/// Tab completion for the REPL prompt, backed by [`shell::complete`].
#[derive(Clone, Default)]
pub struct ShellCompleter;

impl Autocomplete for ShellCompleter {
    fn get_suggestions(&mut self, input: &str) -> Result<Vec<String>, inquire::CustomUserError> {
        if input.trim().is_empty() {
            return Ok(vec![]);
        }
        Ok(shell::complete(input))
    }

    fn get_completion(
        &mut self,
        input: &str,
        highlighted_suggestion: Option<String>,
    ) -> Result<Replacement, inquire::CustomUserError> {
        Ok(highlighted_suggestion.map(|s| replace_last_word(input, &s)))
    }
}

/// Replaces the word being typed with `suggestion`.
fn replace_last_word(input: &str, suggestion: &str) -> String {
    let head = input.trim_end_matches(|c: char| !c.is_whitespace());
    format!("{head}{suggestion}")
}
