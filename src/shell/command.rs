/// Command names offered by completion, in declared order.
pub const COMMAND_NAMES: &[&str] = &[
    "help",
    "fetch",
    "list",
    "filter",
    "open",
    "bookmark",
    "bookmarks",
    "export",
    "theme",
    "status",
    "history",
    "reset",
    "clear",
    "search",
    "preferences",
    "save",
    "load",
    "complete",
];

/// A classified command line. Arguments keep the caller's original case.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command<'a> {
    Help,
    Clear,
    Fetch(&'a str),
    List,
    Filter(&'a str),
    Open(&'a str),
    Status,
    History,
    Bookmark(&'a str),
    Bookmarks,
    Export(&'a str),
    Theme(&'a str),
    Search(&'a str),
    Preferences,
    Save,
    Load,
    Reset,
    Complete(&'a str),
    Unknown,
}

/// Classifies a command line. Returns `None` for blank input.
///
/// The first word is matched case-insensitively against a fixed table. Bare
/// commands (`help`, `list`, ...) only match without arguments.
pub fn parse_command(input: &str) -> Option<Command<'_>> {
    let input = input.trim();
    if input.is_empty() {
        return None;
    }

    let (word, args) = input
        .split_once(char::is_whitespace)
        .map_or((input, ""), |(w, rest)| (w, rest.trim()));
    let keyword = word.to_lowercase();
    let bare = args.is_empty();

    let command = match keyword.as_str() {
        "help" if bare => Command::Help,
        "clear" if bare => Command::Clear,
        "fetch" => Command::Fetch(args),
        "list" | "ls" | "jobs" if bare => Command::List,
        "filter" => Command::Filter(args),
        "open" => Command::Open(args),
        "status" | "info" if bare => Command::Status,
        "history" if bare => Command::History,
        "bookmark" => Command::Bookmark(args),
        "bookmarks" if bare => Command::Bookmarks,
        "export" => Command::Export(args),
        "theme" => Command::Theme(args),
        "search" => Command::Search(args),
        "preferences" if bare => Command::Preferences,
        "save" if bare => Command::Save,
        "load" if bare => Command::Load,
        "reset" if bare => Command::Reset,
        "complete" => Command::Complete(args),
        _ => Command::Unknown,
    };

    Some(command)
}
