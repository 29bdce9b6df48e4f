//! Process-wide shutdown coordination.
//! Provides a flag set by the Ctrl-C handler; the app checks it after the password prompt
//! and before starting a transfer.
//!
//! Notes:
//! - Relaxed atomics are sufficient for a one-way "stop" flag.
//! - `request()` is safe to call from signal handlers.
//! - A transfer already in progress is never interrupted.

use std::sync::atomic::{AtomicBool, Ordering};

use crate::errors::NzbMoveError;

static SHUTDOWN: AtomicBool = AtomicBool::new(false);

/// Request a cooperative shutdown (idempotent).
#[inline]
pub fn request() {
    SHUTDOWN.store(true, Ordering::Relaxed);
}

/// Check whether a shutdown has been requested.
#[inline]
pub fn is_requested() -> bool {
    SHUTDOWN.load(Ordering::Relaxed)
}

/// `Err(Interrupted)` once a shutdown has been requested.
pub fn ensure_running() -> Result<(), NzbMoveError> {
    if is_requested() {
        Err(NzbMoveError::Interrupted)
    } else {
        Ok(())
    }
}

#[cfg(test)]
pub(crate) fn reset() {
    SHUTDOWN.store(false, Ordering::Relaxed);
}
