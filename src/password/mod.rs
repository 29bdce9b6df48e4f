//! Password discovery.
//!
//! Two independent sources:
//! - a `{{...}}` token in the file name,
//! - a `password` entry in the sidecar (NZB) metadata.
//!
//! `PasswordExtractionMode` decides which one counts and which wins when both exist.

mod filename;
mod sidecar;

pub use filename::password_from_file_name;
pub use sidecar::{PASSWORD_META_KEY, password_from_sidecar};

use std::fmt;
use std::path::Path;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PasswordExtractionMode {
    None,
    OnlyFilenamePattern,
    OnlySidecarMetadata,
    #[default]
    FilenamePatternOverSidecar,
    SidecarOverFilenamePattern,
}

impl FromStr for PasswordExtractionMode {
    type Err = String;

    /// Case-insensitive; `_`, `-` and spaces are ignored. Also accepts the
    /// legacy names (`OnlyName`, `NzbMetadataOverFilename`, ...).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key: String = s
            .chars()
            .filter(|c| !matches!(c, '_' | '-' | ' '))
            .collect::<String>()
            .to_ascii_lowercase();
        match key.as_str() {
            "none" | "off" => Ok(Self::None),
            "onlyfilenamepattern" | "onlyname" | "filename" => Ok(Self::OnlyFilenamePattern),
            "onlysidecarmetadata" | "onlynzbmetadata" | "sidecar" | "nzb" => {
                Ok(Self::OnlySidecarMetadata)
            }
            "filenamepatternoversidecar" | "filenameovernzbmetadata" => {
                Ok(Self::FilenamePatternOverSidecar)
            }
            "sidecaroverfilenamepattern" | "nzbmetadataoverfilename" => {
                Ok(Self::SidecarOverFilenamePattern)
            }
            _ => Err(format!("unknown password extraction method '{}'", s.trim())),
        }
    }
}

impl fmt::Display for PasswordExtractionMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::None => "None",
            Self::OnlyFilenamePattern => "OnlyFilenamePattern",
            Self::OnlySidecarMetadata => "OnlySidecarMetadata",
            Self::FilenamePatternOverSidecar => "FilenamePatternOverSidecar",
            Self::SidecarOverFilenamePattern => "SidecarOverFilenamePattern",
        })
    }
}

/// Find a password for `file_name`, consulting `sidecar` as the mode allows.
pub fn extract_password(
    file_name: &str,
    sidecar: &Path,
    mode: PasswordExtractionMode,
) -> Option<String> {
    resolve_with(
        mode,
        || password_from_file_name(file_name),
        || password_from_sidecar(sidecar),
    )
}

/// Apply the precedence rules to two lazily evaluated candidates.
/// A source is only consulted when the mode can still use its answer.
pub fn resolve_with<F, S>(mode: PasswordExtractionMode, from_name: F, from_sidecar: S) -> Option<String>
where
    F: FnOnce() -> Option<String>,
    S: FnOnce() -> Option<String>,
{
    let non_blank = |c: Option<String>| c.filter(|s| !s.trim().is_empty());
    match mode {
        PasswordExtractionMode::None => None,
        PasswordExtractionMode::OnlyFilenamePattern => non_blank(from_name()),
        PasswordExtractionMode::OnlySidecarMetadata => non_blank(from_sidecar()),
        PasswordExtractionMode::FilenamePatternOverSidecar => {
            non_blank(from_name()).or_else(|| non_blank(from_sidecar()))
        }
        PasswordExtractionMode::SidecarOverFilenamePattern => {
            non_blank(from_sidecar()).or_else(|| non_blank(from_name()))
        }
    }
}
