//! Config module.
//! Provides configuration types, default paths, XML loading, and validation.

pub mod paths;
pub mod types;
mod validate;
pub mod xml;

pub use paths::{default_config_path, default_log_path, path_has_symlink_ancestor};
pub use types::{Config, LogLevel};
pub use xml::{
    LoadResult, create_template_config, load_config_from_xml_path, load_or_init, parse_config_xml,
};

/// Environment variable that points at an explicit config file.
pub const CONFIG_ENV: &str = "NZB_MOVE_CONFIG";

/// Config file name looked up beside the executable.
pub const EXE_CONFIG_NAME: &str = "nzb_move.xml";

#[cfg(windows)]
pub const TARGET_DEFAULT: &str = r"C:\Downloads\nzb";
#[cfg(not(windows))]
pub const TARGET_DEFAULT: &str = "/srv/downloads/nzb";
