//! XML configuration support.
//! - Loads settings from an XML file (quick_xml + serde).
//! - Creates a secure template at the platform default when no config exists.
//!
//! Notes:
//! - Unknown elements are rejected so typos do not silently fall back to defaults.
//! - Values are read as text and parsed here to give precise error messages.

use anyhow::{Context, Result, anyhow, bail};
use quick_xml::de::from_str as from_xml_str;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

use super::paths::{default_config_path, default_log_path, path_has_symlink_ancestor};
use super::types::{Config, LogLevel};
use super::TARGET_DEFAULT;

use crate::platform::{set_dir_mode_0700, write_config_secure_new_0600};

/// Struct mirroring the XML config for deserialization.
#[derive(Debug, Default, Deserialize)]
#[serde(rename = "config")]
#[serde(deny_unknown_fields)]
struct XmlConfig {
    target: Option<String>,
    action: Option<String>,
    allow_duplicates: Option<String>,
    close_success: Option<String>,
    ask_for_password: Option<String>,
    password_extraction_method: Option<String>,
    file_name_max_length: Option<String>,
    debug: Option<String>,
    log_level: Option<String>,
    log_file: Option<String>,
}

/// Outcome of locating the config.
#[derive(Debug)]
pub enum LoadResult {
    Loaded { config: Config, path: PathBuf },
    CreatedTemplate(PathBuf),
}

fn non_empty(v: Option<&str>) -> Option<&str> {
    v.map(str::trim).filter(|s| !s.is_empty())
}

fn parse_bool(field: &str, v: &str) -> Result<bool> {
    match v.to_ascii_lowercase().as_str() {
        "true" | "yes" | "on" | "1" => Ok(true),
        "false" | "no" | "off" | "0" => Ok(false),
        _ => bail!("{field}: expected true or false, got '{v}'"),
    }
}

fn parse_num<T: std::str::FromStr>(field: &str, v: &str) -> Result<T> {
    v.parse::<T>()
        .map_err(|_| anyhow!("{field}: expected a non-negative number, got '{v}'"))
}

// Map XmlConfig -> Config on top of defaults.
fn xml_to_config(parsed: XmlConfig) -> Result<Config> {
    let mut cfg = Config::default();

    if let Some(s) = non_empty(parsed.target.as_deref()) {
        cfg.target = PathBuf::from(s);
    }
    if let Some(s) = non_empty(parsed.action.as_deref()) {
        cfg.action = s.parse().map_err(|e: String| anyhow!("action: {e}"))?;
    }
    if let Some(s) = non_empty(parsed.allow_duplicates.as_deref()) {
        cfg.allow_duplicates = parse_bool("allow_duplicates", s)?;
    }
    if let Some(s) = non_empty(parsed.close_success.as_deref()) {
        cfg.close_success = parse_num("close_success", s)?;
    }
    if let Some(s) = non_empty(parsed.ask_for_password.as_deref()) {
        cfg.ask_for_password = parse_bool("ask_for_password", s)?;
    }
    if let Some(s) = non_empty(parsed.password_extraction_method.as_deref()) {
        cfg.password_extraction_method = s
            .parse()
            .map_err(|e: String| anyhow!("password_extraction_method: {e}"))?;
    }
    if let Some(s) = non_empty(parsed.file_name_max_length.as_deref()) {
        let n: usize = parse_num("file_name_max_length", s)?;
        cfg.file_name_max_length = (n > 0).then_some(n);
    }
    if let Some(s) = non_empty(parsed.debug.as_deref()) {
        cfg.debug = parse_bool("debug", s)?;
    }
    if let Some(s) = non_empty(parsed.log_level.as_deref()) {
        cfg.log_level = s.parse::<LogLevel>().map_err(|e| anyhow!("log_level: {e}"))?;
    }
    cfg.log_file = non_empty(parsed.log_file.as_deref()).map(PathBuf::from);

    Ok(cfg)
}

/// Parse config XML text.
pub fn parse_config_xml(contents: &str) -> Result<Config> {
    let parsed: XmlConfig = from_xml_str(contents).context("parse config xml")?;
    xml_to_config(parsed)
}

/// Load a Config from a specific XML file path.
pub fn load_config_from_xml_path(path: &Path) -> Result<Config> {
    let contents = fs::read_to_string(path)
        .with_context(|| format!("read config xml '{}'", path.display()))?;
    parse_config_xml(&contents).with_context(|| format!("in '{}'", path.display()))
}

/// Locate and load the config. When nothing exists at the resolved default
/// location, write a template there instead (never for an explicit NZB_MOVE_CONFIG).
pub fn load_or_init() -> Result<LoadResult> {
    let path = default_config_path()?;
    if path.exists() {
        let config = load_config_from_xml_path(&path)?;
        return Ok(LoadResult::Loaded { config, path });
    }
    if std::env::var_os(super::CONFIG_ENV).is_some() {
        bail!("config file from {} not found: {}", super::CONFIG_ENV, path.display());
    }
    create_template_config(&path)?;
    Ok(LoadResult::CreatedTemplate(path))
}

/// Template written on first run.
pub fn template_contents() -> String {
    let suggested_log = default_log_path()
        .map(|p| p.display().to_string())
        .unwrap_or_else(|_| "/path/to/nzb_move.log".into());

    format!(
        "<!--\n  nzb_move configuration (XML)\n\n    target                      -> directory the NZB is placed in (e.g. a downloader watch folder)\n    action                      -> move | copy (a failed move always falls back to copy)\n    allow_duplicates            -> true: number clashes as \"1 - name.nzb\"; false: refuse\n    close_success               -> seconds to wait before exiting after success (0 = immediately)\n    ask_for_password            -> prompt for a password when none was found\n    password_extraction_method  -> None | OnlyFilenamePattern | OnlySidecarMetadata |\n                                   FilenamePatternOverSidecar | SidecarOverFilenamePattern\n    file_name_max_length        -> cap on the name length without extension (0 = unlimited)\n    debug                       -> show full error details and debug logs\n    log_level                   -> quiet | normal | info | debug\n    log_file                    -> optional log file path (leave empty to log to stdout only)\n-->\n<config>\n  <target>{}</target>\n  <action>move</action>\n  <allow_duplicates>true</allow_duplicates>\n  <close_success>3</close_success>\n  <ask_for_password>false</ask_for_password>\n  <password_extraction_method>FilenamePatternOverSidecar</password_extraction_method>\n  <file_name_max_length>0</file_name_max_length>\n  <debug>false</debug>\n  <log_level>normal</log_level>\n  <!-- <log_file>{}</log_file> -->\n</config>\n",
        TARGET_DEFAULT, suggested_log
    )
}

/// Create the template config file and its parent directory (best-effort permissions).
pub fn create_template_config(path: &Path) -> Result<()> {
    if path_has_symlink_ancestor(path)? {
        bail!(
            "Refusing to create config: ancestor of {} is a symlink",
            path.display()
        );
    }

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
        let _ = set_dir_mode_0700(parent);
    }

    write_config_secure_new_0600(path, template_contents().as_bytes())?;
    info!("Created template config at {}", path.display());
    Ok(())
}
