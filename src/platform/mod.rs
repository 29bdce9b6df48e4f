//! Platform-specific helpers.
//! Hides OS differences (Unix/Windows) behind a uniform API so the transfer
//! and config code can remain platform-agnostic.

#[cfg(unix)]
mod unix;
#[cfg(not(unix))]
mod windows;

#[cfg(unix)]
pub use unix::{
    open_log_file_secure_append, open_source_shared, set_dir_mode_0700,
    write_config_secure_new_0600,
};

#[cfg(not(unix))]
pub use windows::{
    open_log_file_secure_append, open_source_shared, set_dir_mode_0700,
    write_config_secure_new_0600,
};

use std::path::{Path, PathBuf};

/// Hidden sibling name used for atomic config writes.
pub(crate) fn tmp_config_sibling_name(target: &Path) -> PathBuf {
    let pid = std::process::id();
    let nanos = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_nanos())
        .unwrap_or(0);
    let name = format!(".nzb_move.config.tmp.{pid}.{nanos}");
    target
        .parent()
        .unwrap_or_else(|| Path::new("."))
        .join(name)
}
