//! Error types for rs-pagematch.
//!
//! Similarity scoring and brand classification are total functions and never
//! fail; errors come from batch input handling and from page rendering.

/// Error type for batch and rendering operations.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A batch record could not be parsed.
    #[error("Invalid batch input: {0}")]
    InvalidInput(String),

    /// A batch URL failed URL-syntax validation.
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// The batch contained no (url, brand name) pairs.
    #[error("Batch is empty: at least one (url, brand name) pair is required")]
    EmptyBatch,

    /// The rendering session could not be started or crashed.
    #[error("Renderer failed: {0}")]
    Render(String),

    /// Loading a page failed.
    #[error("Failed to load {url}: {reason}")]
    Navigation {
        /// The URL being visited.
        url: String,
        /// Renderer-supplied failure description.
        reason: String,
    },

    /// Reading a local snapshot or batch file failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for batch and rendering operations.
pub type Result<T> = std::result::Result<T, Error>;
