//! Collision-free target path resolution.
//!
//! Policy:
//! - `{dir}/{name}.{ext}` is used when free.
//! - Otherwise, if duplicates are not allowed, `AlreadyExists` names the conflict.
//! - Otherwise `{dir}/{n} - {name}.{ext}` for n = 1, 2, 3, ... until a free path turns up.
//!
//! Notes:
//! - The counter loop has no upper bound; a directory full of numbered
//!   variants ends it the way the filesystem ends it (ENOSPC/inode limits on write).
//! - A directory entry of any kind occupies its name, including a symlink
//!   whose target is missing. Writing through such a link would land outside `dir`.
//! - Only a snapshot of the directory is consulted. Another process may
//!   create the returned path before the transfer writes it; that race is accepted.

use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, trace};

use crate::errors::NzbMoveError;

fn with_extension(name: &str, extension: &str) -> String {
    let ext = extension.trim_start_matches('.');
    if ext.is_empty() {
        name.to_string()
    } else {
        format!("{name}.{ext}")
    }
}

/// True if `path` names any entry, without following a final symlink.
fn is_occupied(path: &Path) -> bool {
    fs::symlink_metadata(path).is_ok()
}

/// Return a path inside `dir` that does not exist right now.
pub fn resolve_unique_path(
    dir: &Path,
    file_name: &str,
    extension: &str,
    allow_duplicates: bool,
) -> Result<PathBuf, NzbMoveError> {
    let first = with_extension(file_name, extension);
    let candidate = dir.join(&first);
    if !is_occupied(&candidate) {
        return Ok(candidate);
    }

    if !allow_duplicates {
        return Err(NzbMoveError::AlreadyExists {
            name: first,
            path: candidate,
        });
    }

    let mut counter: u64 = 1;
    loop {
        let candidate = dir.join(with_extension(&format!("{counter} - {file_name}"), extension));
        if !is_occupied(&candidate) {
            debug!(path = %candidate.display(), counter, "Picked numbered target");
            return Ok(candidate);
        }
        if counter == 3 {
            trace!(name = file_name, dir = %dir.display(), "duplicate: multiple collisions, still searching");
        }
        counter += 1;
    }
}
