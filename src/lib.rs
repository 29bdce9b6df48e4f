//! Core library for `nzb_move`.
//!
//! Places one downloaded file (usually an `.nzb`) into a target directory:
//! password discovery, collision-free naming, and a move that falls back to a
//! shared-read copy. The binary in `main.rs` wires config, logging and console output around it.

pub mod cli;
pub mod config;
pub mod errors;
pub mod fs_ops;
pub mod nzb;
pub mod output;
pub mod password;
pub mod platform;
pub mod shutdown;

pub use config::{Config, LogLevel, default_config_path, default_log_path, path_has_symlink_ancestor};
pub use errors::NzbMoveError;
pub use fs_ops::{FileAction, TransferReport, TransferRequest, execute, resolve_unique_path};
pub use nzb::NzbDocument;
pub use password::{PasswordExtractionMode, extract_password};
