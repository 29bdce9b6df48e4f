//! Password token embedded in a file name: `Some.Release{{secret}}.nzb`.

use regex::Regex;
use std::sync::LazyLock;

// Greedy: first `{{` through last `}}`.
static TOKEN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\{\{(?P<password>.*)\}\}").expect("static password token pattern")
});

/// Inner text of the `{{...}}` token, if any and not blank.
pub fn password_from_file_name(file_name: &str) -> Option<String> {
    TOKEN
        .captures(file_name)
        .and_then(|c| c.name("password"))
        .map(|m| m.as_str().trim())
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}
