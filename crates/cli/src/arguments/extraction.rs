//! Sub-command and API path extraction.
//!
//! Runs on the raw arguments before any flag parsing. The command is taken
//! first and only from the very first argument; the path is then taken from
//! whatever is left, so a reserved name that follows a path is never mistaken
//! for the command.

use twurl_core::request_config::Command;

/// The result of pulling the command and path out of the raw arguments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Extracted {
    pub command: Command,
    pub path: Option<String>,
    /// Everything else, in its original order.
    pub remaining: Vec<String>,
}

/// Removes a leading reserved command name from `args`.
///
/// Returns [`Command::Request`] and leaves `args` untouched when the first
/// argument is not reserved.
pub fn extract_command(args: &mut Vec<String>) -> Command {
    match args.first().and_then(|first| Command::from_reserved(first)) {
        Some(command) => {
            args.remove(0);
            command
        }
        None => Command::Request,
    }
}

/// Removes and returns the first argument that looks like an API path.
pub fn extract_path(args: &mut Vec<String>) -> Option<String> {
    let index = args.iter().position(|arg| is_path(arg))?;
    Some(args.remove(index))
}

/// A `/` followed by at least one ASCII word character.
#[must_use]
pub fn is_path(arg: &str) -> bool {
    arg.strip_prefix('/')
        .and_then(|rest| rest.chars().next())
        .is_some_and(|c| c.is_ascii_alphanumeric() || c == '_')
}

/// Extracts the command, then the path.
///
/// # Examples
///
/// ```rust
/// use twurl_cli::arguments::extract;
/// use twurl_core::request_config::Command;
///
/// let extracted = extract(vec!["alias".to_string(), "h".to_string(), "/1.1/x.json".to_string()]);
/// assert_eq!(extracted.command, Command::Alias);
/// assert_eq!(extracted.path.as_deref(), Some("/1.1/x.json"));
/// assert_eq!(extracted.remaining, vec!["h".to_string()]);
/// ```
#[must_use]
pub fn extract(mut args: Vec<String>) -> Extracted {
    let command = extract_command(&mut args);
    let path = extract_path(&mut args);

    Extracted {
        command,
        path,
        remaining: args,
    }
}
