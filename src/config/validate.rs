//! Config validation logic.
//! Ensures the target directory exists (creating it if needed), is a directory,
//! and is writable; then normalizes it to an absolute path.

use anyhow::{Context, Result, bail};
use std::fs;
use std::path::Path;
use tracing::{debug, error, info};

use crate::fs_ops::io_error_with_help;

use super::types::Config;

impl Config {
    /// Validate the target directory and replace it with its canonical form.
    pub fn validate_and_normalize(&mut self) -> Result<()> {
        if self.target.as_os_str().is_empty() {
            bail!("target is empty; set <target> in the config or pass --target");
        }

        ensure_dir_is_or_create(&self.target, "target")?;
        ensure_writable(&self.target, "target")?;

        // dunce keeps Windows paths free of the \\?\ prefix
        self.target = dunce::canonicalize(&self.target)
            .with_context(|| format!("Cannot resolve target '{}'", self.target.display()))?;

        info!(
            "Config validated: target='{}' action={} duplicates={} password={}",
            self.target.display(),
            self.action,
            self.allow_duplicates,
            self.password_extraction_method
        );
        Ok(())
    }
}

/// Ensure directory exists (create if missing). If exists, it must be a directory.
fn ensure_dir_is_or_create(path: &Path, name: &str) -> Result<()> {
    if path.exists() {
        if !path.is_dir() {
            error!("{name} exists but isn't a directory: {}", path.display());
            bail!("{name} exists but isn't a directory: {}", path.display());
        }
    } else {
        fs::create_dir_all(path).map_err(io_error_with_help("create target directory", path))?;
        info!("Created {name} directory: {}", path.display());
    }
    Ok(())
}

/// Ensure directory is writable using a non-destructive probe file.
fn ensure_writable(path: &Path, name: &str) -> Result<()> {
    is_writable_probe(path).map_err(io_error_with_help("write probe file in target", path))?;
    debug!("{name} writable: {}", path.display());
    Ok(())
}

fn is_writable_probe(dir: &Path) -> std::io::Result<()> {
    let probe = dir.join(format!(".nzb_move_probe_{}.tmp", std::process::id()));
    fs::OpenOptions::new()
        .create_new(true)
        .write(true)
        .open(&probe)?;
    let _ = fs::remove_file(&probe);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn missing_target_is_created_and_made_absolute() {
        let td = tempdir().unwrap();
        let mut cfg = Config::new(td.path().join("watch").join("nested"));
        cfg.validate_and_normalize().unwrap();
        assert!(cfg.target.is_dir());
        assert!(cfg.target.is_absolute());
        assert!(fs::read_dir(&cfg.target).unwrap().next().is_none(), "probe left behind");
    }

    #[test]
    fn target_that_is_a_file_is_rejected() {
        let td = tempdir().unwrap();
        let f = td.path().join("file");
        fs::write(&f, b"x").unwrap();
        let err = Config::new(&f).validate_and_normalize().unwrap_err();
        assert!(err.to_string().contains("isn't a directory"));
    }

    #[test]
    fn empty_target_is_rejected() {
        let err = Config::new("").validate_and_normalize().unwrap_err();
        assert!(err.to_string().contains("target is empty"));
    }
}
