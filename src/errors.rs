//! Typed error definitions for nzb_move.
//! Provides a small set of well-known failure modes for better logs, tests and exit codes.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum NzbMoveError {
    #[error("No file specified")]
    NoSourceGiven,

    #[error("Source file not found: {0}")]
    SourceNotFound(PathBuf),

    #[error("Source file name is not valid UTF-8: {}", .0.display())]
    InvalidSourceName(PathBuf),

    #[error("Target already contains the file '{name}'")]
    AlreadyExists { name: String, path: PathBuf },

    #[error("{op} '{}': {source}", path.display())]
    Transfer {
        op: &'static str,
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("No config file found; a template was written to {0}")]
    ConfigMissing(PathBuf),

    #[error("Configuration error: {0:#}")]
    Config(#[source] anyhow::Error),

    #[error("Operation interrupted by user")]
    Interrupted,
}

impl NzbMoveError {
    /// Stable process exit code for this failure.
    pub fn code(&self) -> u8 {
        match self {
            NzbMoveError::Config(_) | NzbMoveError::ConfigMissing(_) => 2,
            NzbMoveError::NoSourceGiven
            | NzbMoveError::SourceNotFound(_)
            | NzbMoveError::InvalidSourceName(_) => 3,
            NzbMoveError::AlreadyExists { .. } => 4,
            NzbMoveError::Transfer { .. } => 5,
            NzbMoveError::Interrupted => 130,
        }
    }

    /// Build a closure for `.map_err(...)` that wraps an io::Error into `Transfer`.
    pub(crate) fn transfer<'a>(
        op: &'static str,
        path: &'a std::path::Path,
    ) -> impl FnOnce(io::Error) -> NzbMoveError + 'a {
        move |source| NzbMoveError::Transfer {
            op,
            path: path.to_path_buf(),
            source,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn codes_are_distinct_per_category() {
        let exists = NzbMoveError::AlreadyExists {
            name: "a.nzb".into(),
            path: PathBuf::from("/t/a.nzb"),
        };
        let transfer = NzbMoveError::Transfer {
            op: "open source",
            path: PathBuf::from("/s/a.nzb"),
            source: io::Error::from(io::ErrorKind::PermissionDenied),
        };
        assert_eq!(exists.code(), 4);
        assert_eq!(transfer.code(), 5);
        assert_eq!(NzbMoveError::NoSourceGiven.code(), 3);
        assert_eq!(NzbMoveError::InvalidSourceName(PathBuf::from("/s/x")).code(), 3);
        assert_eq!(NzbMoveError::Interrupted.code(), 130);
    }

    #[test]
    fn already_exists_message_names_file() {
        let e = NzbMoveError::AlreadyExists {
            name: "movie.mkv".into(),
            path: PathBuf::from("/t/movie.mkv"),
        };
        assert_eq!(e.to_string(), "Target already contains the file 'movie.mkv'");
    }
}
