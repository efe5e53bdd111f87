//! URL utility functions
//!
//! Batch URLs only need to be syntactically valid; the renderer decides
//! whether it can actually load them. Local snapshots may be given as
//! `file://` URLs.

use std::path::PathBuf;

use url::Url;

/// Check whether a string parses as an absolute URL.
///
/// Any scheme is accepted (`https:`, `file:`, `data:`, ...), matching generic
/// URL-syntax validation rather than a web-only check.
#[must_use]
pub fn is_valid_url(s: &str) -> bool {
    Url::parse(s).is_ok()
}

/// Resolve a batch URL to a local filesystem path.
///
/// `file://` URLs are converted to paths; strings that are not URLs at all
/// are treated as paths as-is. Other schemes yield `None`.
#[must_use]
pub fn local_path(s: &str) -> Option<PathBuf> {
    match Url::parse(s) {
        Ok(url) if url.scheme() == "file" => url.to_file_path().ok(),
        Ok(_) => None,
        Err(_) => Some(PathBuf::from(s)),
    }
}
