//! Default path helpers and symlink checks.
//! Determines where the config lives and detects symlinked ancestors for safety.

use anyhow::{Result, anyhow};
use dirs::{config_dir, data_dir};
use std::env;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use super::{CONFIG_ENV, EXE_CONFIG_NAME};

/// Platform config location: `<config_dir>/nzb_move/config.xml`.
pub fn platform_config_path() -> Result<PathBuf> {
    if let Some(mut base) = config_dir() {
        base.push("nzb_move");
        base.push("config.xml");
        return Ok(base);
    }
    env::var_os("HOME")
        .map(|h| PathBuf::from(h).join(".config").join("nzb_move").join("config.xml"))
        .ok_or_else(|| anyhow!("cannot determine a config directory (no config dir and no HOME)"))
}

/// `nzb_move.xml` next to the running executable.
pub fn exe_adjacent_config_path() -> Option<PathBuf> {
    let exe = env::current_exe().ok()?;
    Some(exe.parent()?.join(EXE_CONFIG_NAME))
}

/// Config path actually used, in order:
/// 1) `NZB_MOVE_CONFIG` (relative values resolve against the current dir)
/// 2) `nzb_move.xml` beside the executable, if it exists
/// 3) the platform default (may not exist yet)
pub fn default_config_path() -> Result<PathBuf> {
    if let Some(p) = env::var_os(CONFIG_ENV) {
        let p = PathBuf::from(p);
        if p.is_absolute() {
            return Ok(p);
        }
        return Ok(env::current_dir()?.join(p));
    }
    if let Some(p) = exe_adjacent_config_path().filter(|p| p.is_file()) {
        return Ok(p);
    }
    platform_config_path()
}

/// Suggested log file location (data dir).
pub fn default_log_path() -> Result<PathBuf> {
    data_dir()
        .map(|d| d.join("nzb_move").join("nzb_move.log"))
        .ok_or_else(|| anyhow!("cannot determine a data directory"))
}

/// Return true if any existing ancestor of `path` is a symlink.
pub fn path_has_symlink_ancestor(path: &Path) -> io::Result<bool> {
    let mut p = path.parent();
    while let Some(anc) = p {
        if anc.exists() {
            let meta = fs::symlink_metadata(anc)?;
            if meta.file_type().is_symlink() {
                return Ok(true);
            }
        }
        p = anc.parent();
    }
    Ok(false)
}
