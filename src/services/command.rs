//! City extraction from free-text weather commands.
//!
//! Recognized phrasings (case-insensitive, optional trailing `?`):
//! - "weather in|at|for <city>"
//! - "what's|what is the weather in|at|for <city>"
//!
//! The city must run to the end of the command (a single final newline is
//! tolerated) and consist of letters and whitespace only.

use std::sync::LazyLock;

use regex::Regex;

/// Phrasings tried in order; the first capture group is the city.
static CITY_PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    [
        r"weather (?:in|at|for) ([a-zA-Z\s]+)(?:\?)?\n?$",
        r"what(?:'s| is) the weather (?:in|at|for) ([a-zA-Z\s]+)(?:\?)?\n?$",
    ]
    .iter()
    .filter_map(|p| Regex::new(p).ok())
    .collect()
});

/// Extract the city name from a command.
///
/// The command is lowercased before matching, so the returned city is
/// lowercase. Returns `None` when no phrasing matches.
pub fn extract_city(command: &str) -> Option<String> {
    let command = command.to_lowercase();

    CITY_PATTERNS
        .iter()
        .find_map(|re| re.captures(&command))
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().trim().to_string())
        .filter(|city| !city.is_empty())
}
