//! CLI definition and parsing.
//! Defines Args and provides parse() for command-line handling.
//!
//! Notes:
//! - SOURCE is optional here; a missing file is reported by the app with its own exit code.
//! - --debug is a shorthand for --log-level debug and also enables detailed error output.

use clap::{Parser, ValueHint};
use std::path::{Path, PathBuf};

use crate::config::types::{Config, LogLevel};
use crate::fs_ops::FileAction;
use crate::password::PasswordExtractionMode;

/// Move or copy an NZB (or any file) into a target folder, tagging it with its password.
/// CLI flags override config values (which are loaded from XML).
#[derive(Parser, Debug, Clone)]
#[command(
    author,
    version,
    about = "Drop an NZB into a watch folder, extracting its password"
)]
pub struct Args {
    /// File to move (usually passed by "Open with" / drag and drop).
    #[arg(value_name = "SOURCE", value_hint = ValueHint::FilePath)]
    pub source: Option<PathBuf>,

    /// Override the target directory.
    #[arg(long, value_hint = ValueHint::DirPath)]
    pub target: Option<PathBuf>,

    /// Override the action: move or copy.
    #[arg(long, value_name = "ACTION")]
    pub action: Option<FileAction>,

    /// Override duplicate handling (true numbers clashes, false refuses them).
    #[arg(long, value_name = "BOOL")]
    pub allow_duplicates: Option<bool>,

    /// Override the password extraction method.
    #[arg(long = "password-method", value_name = "MODE")]
    pub password_method: Option<PasswordExtractionMode>,

    /// Override the maximum file name length (0 = unlimited).
    #[arg(long = "max-length", value_name = "N")]
    pub max_length: Option<usize>,

    /// Never prompt for a password.
    #[arg(long)]
    pub no_prompt: bool,

    /// Exit immediately instead of waiting (countdown on success, keypress on error).
    #[arg(long)]
    pub no_wait: bool,

    /// Enable debug logging and detailed errors (equivalent to `--log-level debug`).
    #[arg(short = 'd', long)]
    pub debug: bool,

    /// Set log level. One of: quiet, normal, info, debug.
    #[arg(long, help = "Set log level: quiet, normal, info, debug")]
    pub log_level: Option<String>,

    /// Emit logs in structured JSON (includes timestamp, level, and structured fields).
    #[arg(long, help = "Emit logs in structured JSON")]
    pub json: bool,

    /// Print where nzb_move will look for the config file, then exit.
    #[arg(long, help = "Print the config file location used by nzb_move and exit")]
    pub print_config: bool,
}

impl Args {
    /// Source path with surrounding quotes removed (Windows shells sometimes pass them through).
    pub fn resolved_source(&self) -> Option<PathBuf> {
        self.source.as_deref().map(sanitize_path)
    }

    /// Effective log level derived from flags.
    /// Precedence: --debug > --log-level value > None (use config default).
    pub fn effective_log_level(&self) -> Option<LogLevel> {
        if self.debug {
            return Some(LogLevel::Debug);
        }
        self.log_level.as_deref().and_then(LogLevel::parse)
    }

    /// Apply CLI overrides to a loaded Config (in-place). No-ops for unset flags.
    pub fn apply_overrides(&self, cfg: &mut Config) {
        if let Some(t) = &self.target {
            cfg.target = t.clone();
        }
        if let Some(a) = self.action {
            cfg.action = a;
        }
        if let Some(d) = self.allow_duplicates {
            cfg.allow_duplicates = d;
        }
        if let Some(m) = self.password_method {
            cfg.password_extraction_method = m;
        }
        if let Some(n) = self.max_length {
            cfg.file_name_max_length = (n > 0).then_some(n);
        }
        if self.no_prompt {
            cfg.ask_for_password = false;
        }
        if self.no_wait {
            cfg.close_success = 0;
        }
        if self.debug {
            cfg.debug = true;
        }
        if let Some(level) = self.effective_log_level() {
            cfg.log_level = level;
        }
    }
}

fn sanitize_path(p: &Path) -> PathBuf {
    // Non-UTF-8 paths pass through untouched; the request refuses them by name.
    let Some(s) = p.to_str() else {
        return p.to_path_buf();
    };
    let trimmed = s.trim();
    let inner = trimmed
        .strip_prefix('"')
        .and_then(|t| t.strip_suffix('"'))
        .or_else(|| trimmed.strip_prefix('\'').and_then(|t| t.strip_suffix('\'')))
        .unwrap_or(trimmed);
    PathBuf::from(inner)
}

pub fn parse() -> Args {
    Args::parse()
}
