//! Page rendering sessions.
//!
//! A [`Renderer`] is one exclusively owned rendering session. Visits happen
//! one at a time through `&mut self`, so a navigation can never overlap the
//! DOM read of the previous page. The session's resources are acquired when
//! the renderer is constructed and released when it is dropped.

use std::path::PathBuf;

use tracing::debug;

use crate::error::{Error, Result};
use crate::features::{fingerprint_elements, fingerprint_html, ElementFeature, PageFingerprint};
use crate::url_utils;

/// What a renderer captured from a visited page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PageContent {
    /// Serialized markup, parsed here to enumerate elements.
    Markup(String),

    /// Elements enumerated by the renderer from its live DOM, in `body *`
    /// order.
    Elements(Vec<ElementFeature>),
}

/// The rendered document of one visited page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedPage {
    /// The URL that was visited.
    pub url: String,

    /// Captured document after client-side rendering settled.
    pub content: PageContent,
}

impl RenderedPage {
    /// A page captured as HTML markup.
    pub fn from_html(url: impl Into<String>, html: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            content: PageContent::Markup(html.into()),
        }
    }

    /// A page captured as a live element enumeration.
    pub fn from_elements(url: impl Into<String>, elements: Vec<ElementFeature>) -> Self {
        Self {
            url: url.into(),
            content: PageContent::Elements(elements),
        }
    }

    /// Fingerprint the rendered page for a brand name.
    #[must_use]
    pub fn fingerprint(&self, brand_name: &str) -> PageFingerprint {
        match &self.content {
            PageContent::Markup(html) => fingerprint_html(html, brand_name),
            PageContent::Elements(elements) => fingerprint_elements(elements.clone(), brand_name),
        }
    }
}

/// A rendering session that loads URLs one after another.
pub trait Renderer {
    /// Load `url`, wait for it to settle, and return the rendered document.
    fn render(&mut self, url: &str) -> Result<RenderedPage>;
}

impl<R: Renderer + ?Sized> Renderer for Box<R> {
    fn render(&mut self, url: &str) -> Result<RenderedPage> {
        (**self).render(url)
    }
}

/// Renders saved HTML snapshots from the local filesystem.
///
/// Accepts `file://` URLs and plain paths. Scripts are not executed, so this
/// suits pages captured after rendering or static pages.
#[derive(Debug, Clone, Default)]
pub struct FileRenderer {
    root: Option<PathBuf>,
}

impl FileRenderer {
    /// Resolve relative paths against the working directory.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Resolve relative paths against `root`.
    #[must_use]
    pub fn with_root(root: impl Into<PathBuf>) -> Self {
        Self {
            root: Some(root.into()),
        }
    }
}

impl Renderer for FileRenderer {
    fn render(&mut self, url: &str) -> Result<RenderedPage> {
        let path = url_utils::local_path(url).ok_or_else(|| Error::Navigation {
            url: url.to_string(),
            reason: "not a local file".to_string(),
        })?;
        let path = match &self.root {
            Some(root) if path.is_relative() => root.join(path),
            _ => path,
        };

        debug!(path = %path.display(), "reading page snapshot");
        let bytes = std::fs::read(&path).map_err(|e| Error::Navigation {
            url: url.to_string(),
            reason: e.to_string(),
        })?;

        Ok(RenderedPage::from_html(url, crate::encoding::decode_html(&bytes)))
    }
}

#[cfg(feature = "chrome")]
pub use chrome::ChromeRenderer;

#[cfg(feature = "chrome")]
mod chrome {
    use std::sync::Arc;
    use std::time::Duration;

    use headless_chrome::{Browser, LaunchOptions, Tab};
    use serde_json::Value;
    use tracing::{debug, info};

    use super::{RenderedPage, Renderer};
    use crate::error::{Error, Result};
    use crate::features::elements_from_json;
    use crate::options::Options;

    /// Enumerates `body *` in the live DOM as `{tagName, attrs, text}` records.
    const ELEMENT_SCRIPT: &str = r#"
        JSON.stringify(Array.from(document.querySelectorAll('body *'), (element) => ({
            tagName: element.tagName.toLowerCase(),
            attrs: Array.from(element.attributes, (attr) => `${attr.name}=${attr.value}`).join(';'),
            text: element.textContent ? element.textContent.trim().toLowerCase() : '',
        })))
    "#;

    /// Headless Chrome session with a single tab reused across visits.
    ///
    /// Chrome is launched by [`ChromeRenderer::launch`] and killed when the
    /// renderer is dropped.
    pub struct ChromeRenderer {
        // Declared before the browser so the tab is released first.
        tab: Arc<Tab>,
        _browser: Browser,
        settle_delay: Duration,
    }

    impl ChromeRenderer {
        /// Launch Chrome and open the session's tab.
        pub fn launch(options: &Options) -> Result<Self> {
            let sandbox = options.resolved_sandbox();
            let launch_options = LaunchOptions::default_builder()
                .sandbox(sandbox)
                .path(options.resolved_chrome_path())
                .idle_browser_timeout(
                    options.navigation_timeout + options.settle_delay + Duration::from_secs(30),
                )
                .build()
                .map_err(|e| Error::Render(format!("Failed to build Chrome launch options: {e}")))?;

            let browser = Browser::new(launch_options)
                .map_err(|e| Error::Render(format!("Failed to launch headless Chrome: {e}")))?;
            let tab = browser
                .new_tab()
                .map_err(|e| Error::Render(format!("Failed to create browser tab: {e}")))?;

            tab.set_default_timeout(options.navigation_timeout);
            if let Some(user_agent) = &options.user_agent {
                tab.set_user_agent(user_agent, None, None)
                    .map_err(|e| Error::Render(format!("Failed to set user agent: {e}")))?;
            }

            info!(sandbox, "rendering session started");

            Ok(Self {
                tab,
                _browser: browser,
                settle_delay: options.settle_delay,
            })
        }
    }

    impl Renderer for ChromeRenderer {
        fn render(&mut self, url: &str) -> Result<RenderedPage> {
            let navigation_error = |e: anyhow::Error| Error::Navigation {
                url: url.to_string(),
                reason: e.to_string(),
            };

            self.tab.navigate_to(url).map_err(navigation_error)?;
            self.tab.wait_until_navigated().map_err(navigation_error)?;

            // Client-side rendering has no completion signal; wait a fixed time.
            std::thread::sleep(self.settle_delay);

            let enumeration = self
                .tab
                .evaluate(ELEMENT_SCRIPT, false)
                .map_err(|e| Error::Render(format!("Failed to read rendered DOM: {e}")))?;
            let elements = match enumeration.value {
                Some(Value::String(json)) => elements_from_json(&json)?,
                other => {
                    return Err(Error::Render(format!(
                        "Unexpected DOM enumeration result: {other:?}"
                    )))
                }
            };
            debug!(url, elements = elements.len(), "page rendered");

            Ok(RenderedPage::from_elements(url, elements))
        }
    }

    impl Drop for ChromeRenderer {
        fn drop(&mut self) {
            debug!("closing rendering session");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn file_renderer_reads_plain_path() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "<html><body><h1>Acme</h1></body></html>").unwrap();
        let path = file.path().to_string_lossy().into_owned();

        let page = FileRenderer::new().render(&path).unwrap();
        assert_eq!(page.url, path);
        assert!(matches!(&page.content, PageContent::Markup(html) if html.contains("<h1>Acme</h1>")));
        assert_eq!(page.fingerprint("acme").brand_positions, vec![0]);
    }

    #[test]
    fn file_renderer_resolves_against_root() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("brand.html"), "<body><p>x</p></body>").unwrap();

        let page = FileRenderer::with_root(dir.path()).render("brand.html").unwrap();
        assert_eq!(page.fingerprint("x").features.len(), 1);
    }

    #[test]
    fn file_renderer_decodes_declared_charset() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join("latin1.html"),
            b"<html><head><meta charset=\"ISO-8859-1\"></head><body><p>Caf\xE9</p></body></html>",
        )
        .unwrap();

        let page = FileRenderer::with_root(dir.path()).render("latin1.html").unwrap();
        assert_eq!(page.fingerprint("x").features[0].text, "café");
    }

    #[test]
    fn element_pages_are_fingerprinted_without_reparsing() {
        let elements = vec![
            ElementFeature {
                tag_name: "p".to_string(),
                attrs: String::new(),
                text: "acme".to_string(),
            },
            ElementFeature {
                tag_name: "div".to_string(),
                attrs: String::new(),
                text: "acme".to_string(),
            },
        ];
        let page = RenderedPage::from_elements("https://acme.example/", elements);

        let fp = page.fingerprint("Acme");
        assert_eq!(fp.features.len(), 2);
        assert_eq!(fp.brand_positions, vec![0, 1]);
    }

    #[test]
    fn markup_pages_are_parsed() {
        let page = RenderedPage::from_html(
            "https://acme.example/",
            "<body><p><div>Acme</div></p></body>",
        );
        assert_eq!(page.fingerprint("acme").features.len(), 3);
    }

    #[test]
    fn file_renderer_rejects_remote_urls() {
        let err = FileRenderer::new().render("https://example.com/").unwrap_err();
        assert!(matches!(err, Error::Navigation { .. }));
    }

    #[test]
    fn file_renderer_reports_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = FileRenderer::with_root(dir.path()).render("missing.html").unwrap_err();
        assert!(matches!(err, Error::Navigation { ref url, .. } if url == "missing.html"));
    }
}
