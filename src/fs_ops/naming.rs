//! Target name construction.
//!
//! The base name (source file stem) gets an optional password suffix appended,
//! then the *base* is shortened from the end until `base + suffix` fits the
//! configured maximum. The suffix carries the password and is never cut.
//! Lengths are counted in chars; truncation always lands on a char boundary.

use tracing::debug;

/// Build the target file name (without extension or collision prefix).
///
/// - `max_len`: `None` or `Some(0)` disables the limit.
/// - `suffix`: pre-formatted token such as `{{secret}}`; blank suffixes are ignored.
///
/// The base keeps at least one char, so if the suffix alone meets the limit the
/// result is one char over it rather than a bare suffix.
pub fn build_target_file_name(base: &str, max_len: Option<usize>, suffix: Option<&str>) -> String {
    let suffix = suffix.filter(|s| !s.trim().is_empty()).unwrap_or("");
    let base_chars = base.chars().count();
    let suffix_chars = suffix.chars().count();

    let keep = match max_len {
        Some(limit) if limit > 0 && base_chars + suffix_chars > limit => {
            let budget = limit.saturating_sub(suffix_chars).max(1).min(base_chars);
            debug!(base, limit, keep = budget, "Truncating target name");
            budget
        }
        _ => base_chars,
    };

    let mut name: String = base.chars().take(keep).collect();
    name.push_str(suffix);
    name
}

/// Format a password as the filename token recognised by the extractor.
pub fn password_suffix(password: &str) -> String {
    format!("{{{{{}}}}}", password.trim())
}
