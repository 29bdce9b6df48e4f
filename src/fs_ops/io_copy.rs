//! Streaming copy that tolerates a busy source.
//!
//! - The source is opened through `platform::open_source_shared`, so another
//!   process may keep it open for read or write while we copy.
//! - The destination is created or truncated (the resolver already picked the path).
//! - Data moves in fixed 64 KiB chunks; the destination is flushed and fsynced.
//!
//! Snapshot semantics: the source is read once from start to EOF; bytes appended
//! concurrently after we pass them are not included.

use std::fs::OpenOptions;
use std::io::{self, Read, Write};
use std::path::Path;

use crate::errors::NzbMoveError;
use crate::platform::open_source_shared;

/// Chunk size for the streaming copy.
pub const CHUNK_SIZE: usize = 64 * 1024;

/// Copy `src` -> `dst`, returning the number of bytes written.
/// Handles are scoped to this function and dropped on every exit path.
pub fn copy_shared(src: &Path, dst: &Path) -> Result<u64, NzbMoveError> {
    let mut reader = open_source_shared(src).map_err(NzbMoveError::transfer("open source", src))?;
    let mut writer = OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(true)
        .open(dst)
        .map_err(NzbMoveError::transfer("create destination", dst))?;

    let mut buf = vec![0u8; CHUNK_SIZE];
    let mut total: u64 = 0;
    loop {
        let n = match reader.read(&mut buf) {
            Ok(0) => break,
            Ok(n) => n,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(NzbMoveError::transfer("read source", src)(e)),
        };
        writer
            .write_all(&buf[..n])
            .map_err(NzbMoveError::transfer("write destination", dst))?;
        total += n as u64;
    }

    writer.flush().map_err(NzbMoveError::transfer("flush destination", dst))?;
    writer
        .sync_all()
        .map_err(NzbMoveError::transfer("sync destination", dst))?;
    Ok(total)
}
