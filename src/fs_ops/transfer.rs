//! Move-with-copy-fallback.
//!
//! Move attempts a rename; on *any* failure it logs a hint and falls back to a
//! shared-read streaming copy, reporting `FileAction::Copy` as what happened.
//! Copy failures are terminal and not retried.
//!
//! After a fallback copy the source stays where it is; removing it is left to the user.

use std::fmt;
use std::fs;
use std::io;
use std::path::Path;
use std::str::FromStr;
use tracing::{debug, info, warn};

use crate::errors::NzbMoveError;

use super::atomic::try_atomic_move;
use super::helpers::hint_for;
use super::io_copy::copy_shared;
use super::util::is_cross_device;

/// What to do with the source file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FileAction {
    #[default]
    Move,
    Copy,
}

impl FromStr for FileAction {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "move" => Ok(FileAction::Move),
            "copy" => Ok(FileAction::Copy),
            other => Err(format!("unknown action '{other}' (expected move or copy)")),
        }
    }
}

impl fmt::Display for FileAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            FileAction::Move => "move",
            FileAction::Copy => "copy",
        })
    }
}

/// Outcome of a successful transfer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TransferReport {
    /// The action actually performed (Copy after a failed Move).
    pub performed: FileAction,
    /// Bytes streamed by the copy path; `None` for a rename.
    pub bytes: Option<u64>,
}

impl TransferReport {
    pub fn fell_back(&self, requested: FileAction) -> bool {
        requested == FileAction::Move && self.performed == FileAction::Copy
    }
}

/// Transfer `src` to `dst` using the requested action.
pub fn execute(src: &Path, dst: &Path, action: FileAction) -> Result<TransferReport, NzbMoveError> {
    execute_with_rename(src, dst, action, try_atomic_move)
}

/// Same as [`execute`] with an injectable rename step.
pub fn execute_with_rename<R>(
    src: &Path,
    dst: &Path,
    action: FileAction,
    rename: R,
) -> Result<TransferReport, NzbMoveError>
where
    R: FnOnce(&Path, &Path) -> io::Result<()>,
{
    if action == FileAction::Move {
        match rename(src, dst) {
            Ok(()) => {
                info!(src = %src.display(), dest = %dst.display(), "Renamed file");
                return Ok(TransferReport {
                    performed: FileAction::Move,
                    bytes: None,
                });
            }
            Err(e) => {
                let hint = if is_cross_device(&e) {
                    "cross-filesystem; will copy instead"
                } else {
                    hint_for(&e).unwrap_or("falling back to copy")
                };
                warn!(error = %e, hint, "Move failed, copying instead");
            }
        }
    }

    match copy_shared(src, dst) {
        Ok(bytes) => {
            info!(src = %src.display(), dest = %dst.display(), bytes, "Copied file");
            Ok(TransferReport {
                performed: FileAction::Copy,
                bytes: Some(bytes),
            })
        }
        Err(e) => {
            // Only a destination this copy created may be removed.
            if let NzbMoveError::Transfer { op, .. } = &e
                && matches!(
                    *op,
                    "read source" | "write destination" | "flush destination" | "sync destination"
                )
            {
                match fs::remove_file(dst) {
                    Ok(()) => debug!(dest = %dst.display(), "Removed partial destination"),
                    Err(rm) => warn!(dest = %dst.display(), error = %rm, "Could not remove partial destination"),
                }
            }
            Err(e)
        }
    }
}
