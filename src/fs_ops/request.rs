//! One run's worth of transfer parameters.

use std::path::{Path, PathBuf};

use crate::config::Config;
use crate::errors::NzbMoveError;

use super::naming::build_target_file_name;
use super::resolve::resolve_unique_path;
use super::transfer::FileAction;

/// Everything needed to place one source file into the target directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransferRequest {
    pub source_path: PathBuf,
    pub desired_base_name: String,
    pub extension: String,
    pub target_directory: PathBuf,
    pub max_base_name_length: Option<usize>,
    pub password_suffix: Option<String>,
    pub allow_duplicates: bool,
    pub action: FileAction,
}

impl TransferRequest {
    /// Derive a request from the source path and loaded config.
    /// Names that are not valid UTF-8 are refused rather than rewritten.
    pub fn from_source(
        source: &Path,
        config: &Config,
        password_suffix: Option<String>,
    ) -> Result<Self, NzbMoveError> {
        if !source.is_file() {
            return Err(NzbMoveError::SourceNotFound(source.to_path_buf()));
        }
        let invalid = || NzbMoveError::InvalidSourceName(source.to_path_buf());
        let desired_base_name = source
            .file_stem()
            .ok_or_else(|| NzbMoveError::SourceNotFound(source.to_path_buf()))?
            .to_str()
            .ok_or_else(invalid)?
            .to_owned();
        let extension = match source.extension() {
            Some(e) => e.to_str().ok_or_else(invalid)?.to_owned(),
            None => String::new(),
        };

        Ok(Self {
            source_path: source.to_path_buf(),
            desired_base_name,
            extension,
            target_directory: config.target.clone(),
            max_base_name_length: config.file_name_max_length,
            password_suffix,
            allow_duplicates: config.allow_duplicates,
            action: config.action,
        })
    }

    /// Replace the password suffix, consuming the request.
    pub fn with_password_suffix(self, password_suffix: Option<String>) -> Self {
        Self {
            password_suffix,
            ..self
        }
    }

    /// Final target file name without extension (suffix applied, length capped).
    pub fn target_file_name(&self) -> String {
        build_target_file_name(
            &self.desired_base_name,
            self.max_base_name_length,
            self.password_suffix.as_deref(),
        )
    }

    /// Resolve the collision-free destination for this request.
    /// Recomputed on every call; the directory may have changed in between.
    pub fn target_path(&self) -> Result<PathBuf, NzbMoveError> {
        resolve_unique_path(
            &self.target_directory,
            &self.target_file_name(),
            &self.extension,
            self.allow_duplicates,
        )
    }
}
