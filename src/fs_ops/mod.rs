//! Filesystem operations: target naming, collision handling and the transfer itself.

mod atomic;
mod helpers;
mod io_copy;
mod naming;
mod request;
mod resolve;
mod transfer;
mod util;

pub use helpers::{hint_for, io_error_with_help, io_error_with_help_io};
pub use io_copy::{CHUNK_SIZE, copy_shared};
pub use naming::{build_target_file_name, password_suffix};
pub use request::TransferRequest;
pub use resolve::resolve_unique_path;
pub use transfer::{FileAction, TransferReport, execute, execute_with_rename};
