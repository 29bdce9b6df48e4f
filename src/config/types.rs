//! Core configuration types.
//! - Config holds runtime settings with sensible defaults.
//! - LogLevel represents verbosity with simple parsing helpers.

use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use crate::fs_ops::FileAction;
use crate::password::PasswordExtractionMode;

use super::TARGET_DEFAULT;

/// Program-defined verbosity levels exposed to users/config.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum LogLevel {
    /// Only errors
    Quiet,
    /// Informational output (default)
    #[default]
    Normal,
    /// More info (like verbose)
    Info,
    /// Debug/trace
    Debug,
}

impl LogLevel {
    /// Parse common string names into our LogLevel (case-insensitive).
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "quiet" | "error" | "none" => Some(LogLevel::Quiet),
            "normal" => Some(LogLevel::Normal),
            "info" | "verbose" | "detailed" => Some(LogLevel::Info),
            "debug" | "trace" => Some(LogLevel::Debug),
            _ => None,
        }
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            LogLevel::Quiet => "quiet",
            LogLevel::Normal => "normal",
            LogLevel::Info => "info",
            LogLevel::Debug => "debug",
        };
        f.write_str(s)
    }
}

impl FromStr for LogLevel {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        LogLevel::parse(s).ok_or_else(|| format!("unknown log level '{}'", s.trim()))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Directory the file ends up in (e.g. a downloader's watch folder).
    pub target: PathBuf,
    pub action: FileAction,
    /// Number duplicates ("1 - name.nzb") instead of refusing them.
    pub allow_duplicates: bool,
    /// Seconds to keep the window open after success (0 = exit immediately).
    pub close_success: u64,
    /// Prompt for a password when none was extracted.
    pub ask_for_password: bool,
    pub password_extraction_method: PasswordExtractionMode,
    /// Cap on the target base name length (suffix included, extension excluded).
    pub file_name_max_length: Option<usize>,
    /// Show full error chains; also raises the log level to debug.
    pub debug: bool,
    pub log_level: LogLevel,
    pub log_file: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            target: PathBuf::from(TARGET_DEFAULT),
            action: FileAction::Move,
            allow_duplicates: true,
            close_success: 3,
            ask_for_password: false,
            password_extraction_method: PasswordExtractionMode::default(),
            file_name_max_length: None,
            debug: false,
            log_level: LogLevel::Normal,
            log_file: None,
        }
    }
}

impl Config {
    /// Construct a config targeting `target`, everything else default.
    pub fn new(target: impl Into<PathBuf>) -> Self {
        Self {
            target: target.into(),
            ..Self::default()
        }
    }

    /// Log level after applying the `debug` switch.
    pub fn effective_log_level(&self) -> LogLevel {
        if self.debug {
            LogLevel::Debug
        } else {
            self.log_level.clone()
        }
    }

    pub fn close_delay(&self) -> Option<Duration> {
        (self.close_success > 0).then(|| Duration::from_secs(self.close_success))
    }
}
