//! Password stored in the NZB `<head>` metadata.

use std::path::Path;
use tracing::debug;

use crate::nzb::NzbDocument;

/// Metadata key holding the archive password.
pub const PASSWORD_META_KEY: &str = "password";

/// Read `path` as an NZB and return its non-blank `password` meta value.
/// Any I/O or parse failure is reported as "no password".
pub fn password_from_sidecar(path: &Path) -> Option<String> {
    let doc = match NzbDocument::load(path) {
        Ok(doc) => doc,
        Err(e) => {
            debug!(path = %path.display(), error = %e, "No sidecar metadata");
            return None;
        }
    };
    doc.meta(PASSWORD_META_KEY)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}
