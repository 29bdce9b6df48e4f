//! Rename helper.
//! - Plain rename; never removes an existing destination (the resolver picked a free path).
//! - On Unix, best-effort fsync of the destination directory after rename.

use std::fs;
use std::io;
use std::path::Path;

pub fn try_atomic_move(src: &Path, dst: &Path) -> io::Result<()> {
    fs::rename(src, dst)?;

    #[cfg(unix)]
    if let Some(parent) = dst.parent() {
        // A failed dir fsync must not turn a successful rename into a failure.
        let _ = super::util::fsync_dir(parent);
    }

    Ok(())
}
