//! DOM Operations Adapter
//!
//! Thin layer over the `dom_query` crate exposing exactly what fingerprinting
//! reads from a rendered document: element enumeration under `<body>`, tag
//! names, attributes in native order and cumulative text content.

// Re-export core types for external use
pub use dom_query::{Document, Selection};

pub use tendril::StrTendril;

/// Selector matching every element below `<body>`, in document order.
pub const BODY_ELEMENTS: &str = "body *";

// === Parsing ===

/// Parse an HTML string into a document.
#[inline]
#[must_use]
pub fn parse(html: &str) -> Document {
    Document::from(html)
}

// === Enumeration ===

/// All elements under the document body, depth-first pre-order.
///
/// Empty when the document has no body or the body has no element children.
#[inline]
#[must_use]
pub fn body_elements(doc: &Document) -> Selection<'_> {
    doc.select(BODY_ELEMENTS)
}

// === Tag/Node Information ===

/// Get tag name (lowercase)
#[must_use]
pub fn tag_name(sel: &Selection) -> Option<String> {
    sel.nodes()
        .first()
        .and_then(dom_query::NodeRef::node_name)
        .map(|t| t.to_lowercase())
}

/// Get all attributes as `(name, value)` pairs in the element's own order.
///
/// Namespaced attributes keep their prefix (`xlink:href`), matching what a
/// browser reports as the attribute name.
#[must_use]
pub fn attributes(sel: &Selection) -> Vec<(String, String)> {
    sel.nodes()
        .first()
        .map(|node| {
            node.attrs()
                .iter()
                .map(|attr| {
                    let name = match &attr.name.prefix {
                        Some(prefix) => format!("{prefix}:{}", attr.name.local),
                        None => attr.name.local.to_string(),
                    };
                    (name, attr.value.to_string())
                })
                .collect()
        })
        .unwrap_or_default()
}

// === Text Content ===

/// Get all text content of node and descendants
///
/// Returns `StrTendril` for zero-copy passing.
#[inline]
#[must_use]
pub fn text_content(sel: &Selection) -> StrTendril {
    sel.text()
}
