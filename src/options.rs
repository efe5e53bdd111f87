//! Configuration options for rendering sessions.
//!
//! The `Options` struct controls how pages are loaded before they are
//! fingerprinted. Extraction and scoring themselves take no options.

use std::path::PathBuf;
use std::time::Duration;

/// User agent the analysis service presents when no override is configured.
pub const SERVICE_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/58.0.3029.110 Safari/537";

/// Configuration options for a rendering session.
///
/// All fields are public for easy configuration. Use `Default::default()`
/// for standard settings.
///
/// # Example
///
/// ```rust
/// use std::time::Duration;
/// use rs_pagematch::Options;
///
/// let options = Options {
///     settle_delay: Duration::from_millis(1500),
///     ..Options::default()
/// };
/// assert_eq!(options.max_sessions, 4);
/// ```
#[derive(Debug, Clone)]
pub struct Options {
    /// Fixed wait after navigation completes, letting client-side rendering
    /// finish before the DOM is read.
    ///
    /// Default: `5s`
    pub settle_delay: Duration,

    /// Upper bound for a single navigation.
    ///
    /// Default: `30s`
    pub navigation_timeout: Duration,

    /// User agent override for the rendering tab.
    ///
    /// Default: `None` (the browser's own user agent)
    pub user_agent: Option<String>,

    /// Path to the Chrome/Chromium binary.
    ///
    /// When `None`, the `CHROME_PATH` environment variable is consulted and
    /// then the renderer's own discovery.
    ///
    /// Default: `None`
    pub chrome_path: Option<PathBuf>,

    /// Whether to run Chrome with its sandbox enabled.
    ///
    /// When `None`, the sandbox is disabled inside containers (detected via
    /// `/.dockerenv` or the `PAGEMATCH_CONTAINER` environment variable).
    ///
    /// Default: `None`
    pub sandbox: Option<bool>,

    /// Maximum number of rendering sessions the HTTP service runs at once.
    ///
    /// Default: `4`
    pub max_sessions: usize,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            settle_delay: Duration::from_millis(5000),
            navigation_timeout: Duration::from_secs(30),
            user_agent: None,
            chrome_path: None,
            sandbox: None,
            max_sessions: 4,
        }
    }
}

impl Options {
    /// Resolve the Chrome binary path from options, then `CHROME_PATH`.
    #[must_use]
    pub fn resolved_chrome_path(&self) -> Option<PathBuf> {
        self.chrome_path
            .clone()
            .or_else(|| std::env::var_os("CHROME_PATH").map(PathBuf::from))
    }

    /// Resolve the sandbox setting, disabling it inside containers.
    #[must_use]
    pub fn resolved_sandbox(&self) -> bool {
        self.sandbox.unwrap_or_else(|| !running_in_container())
    }

    /// Options for HTTP service sessions: the service user agent unless one
    /// is set explicitly.
    #[must_use]
    pub fn for_service(mut self) -> Self {
        self.user_agent = self
            .user_agent
            .or_else(|| Some(SERVICE_USER_AGENT.to_string()));
        self
    }
}

fn running_in_container() -> bool {
    std::env::var_os("PAGEMATCH_CONTAINER").is_some()
        || std::path::Path::new("/.dockerenv").exists()
}
