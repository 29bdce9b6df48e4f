//! I/O error hints.
//!
//! Maps raw OS codes (or io::ErrorKind as a fallback) to a short, actionable
//! hint, and offers `.map_err(...)` adapters for anyhow and io::Result code.
//!
//! Usage:
//!   fs::create_dir_all(dir).map_err(io_error_with_help("create target directory", dir))?;
//!   File::open(p).map_err(io_error_with_help_io("open source", p))?;

use anyhow::anyhow;
use std::io;
use std::path::Path;

/// Short hint for an I/O error, if we know something useful about it.
pub fn hint_for(e: &io::Error) -> Option<&'static str> {
    if let Some(code) = e.raw_os_error() {
        #[cfg(unix)]
        {
            let hint = match code {
                libc::EACCES | libc::EPERM => Some("permission denied; check ownership and write permissions"),
                libc::EXDEV => Some("cross-filesystem; rename not possible, copying instead"),
                libc::EBUSY => Some("resource busy; another process holds the file"),
                libc::ENOENT => Some("path not found; verify it exists"),
                libc::EEXIST => Some("already exists; pick a unique name or remove the target"),
                libc::ENOSPC => Some("insufficient space on device"),
                libc::EROFS => Some("read-only filesystem; cannot write here"),
                libc::ENAMETOOLONG => Some("filename or path too long; lower file_name_max_length"),
                libc::EMFILE | libc::ENFILE => Some("too many open files"),
                _ => None,
            };
            if hint.is_some() {
                return hint;
            }
        }
        #[cfg(windows)]
        {
            let hint = match code {
                5 => Some("access denied; check permissions"),           // ERROR_ACCESS_DENIED
                17 => Some("not same device; copying instead"),          // ERROR_NOT_SAME_DEVICE
                32 | 33 => Some("sharing violation; file is in use"),    // SHARING / LOCK_VIOLATION
                2 | 3 => Some("path not found; verify it exists"),       // FILE / PATH NOT FOUND
                80 | 183 => Some("already exists; pick a unique name"),  // FILE_EXISTS / ALREADY_EXISTS
                39 | 112 => Some("insufficient disk space"),             // HANDLE_DISK_FULL / DISK_FULL
                19 => Some("write protected / read-only media"),         // ERROR_WRITE_PROTECT
                206 => Some("filename or path too long; lower file_name_max_length"),
                _ => None,
            };
            if hint.is_some() {
                return hint;
            }
        }
        let _ = code;
    }

    match e.kind() {
        io::ErrorKind::PermissionDenied => Some("permission denied; check ownership and write permissions"),
        io::ErrorKind::NotFound => Some("path not found; verify it exists"),
        io::ErrorKind::AlreadyExists => Some("already exists; pick a unique name or remove the target"),
        io::ErrorKind::WouldBlock | io::ErrorKind::TimedOut => Some("busy; another process holds the file"),
        _ => None,
    }
}

fn build_message(op: &str, path: &Path, e: &io::Error) -> String {
    let mut msg = format!("{} '{}': {}", op, path.display(), e);
    if let Some(hint) = hint_for(e) {
        msg.push_str(" (");
        msg.push_str(hint);
        msg.push(')');
    }
    if let Some(code) = e.raw_os_error() {
        msg.push_str(&format!(" [os code: {}]", code));
    }
    msg
}

/// Adapter for anyhow::Result code.
pub fn io_error_with_help<'a>(
    op: &'a str,
    path: &'a Path,
) -> impl FnOnce(io::Error) -> anyhow::Error + 'a {
    move |e: io::Error| anyhow!(build_message(op, path, &e))
}

/// Adapter for io::Result code; keeps the original ErrorKind.
pub fn io_error_with_help_io<'a>(
    op: &'a str,
    path: &'a Path,
) -> impl FnOnce(io::Error) -> io::Error + 'a {
    move |e: io::Error| io::Error::new(e.kind(), build_message(op, path, &e))
}
