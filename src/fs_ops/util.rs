//! Small filesystem utilities shared by the transfer code.

use std::fs::File;
use std::io;
use std::path::Path;

/// True when a rename failed because source and target live on different devices.
pub(crate) fn is_cross_device(e: &io::Error) -> bool {
    // No stable ErrorKind for EXDEV / ERROR_NOT_SAME_DEVICE; look at raw codes.
    match e.raw_os_error() {
        #[cfg(unix)]
        Some(code) => code == libc::EXDEV,
        #[cfg(windows)]
        Some(code) => code == 17,
        #[cfg(not(any(unix, windows)))]
        Some(_) => false,
        None => false,
    }
}

#[cfg(unix)]
pub(crate) fn fsync_dir(dir: &Path) -> io::Result<()> {
    File::open(dir)?.sync_all()
}

#[cfg(not(unix))]
pub(crate) fn fsync_dir(_dir: &Path) -> io::Result<()> {
    Ok(())
}
