//! Feature extraction from a rendered document.
//!
//! Every element under `<body>` becomes one [`ElementFeature`], in document
//! order. The element's index in that enumeration is what brand positions
//! refer to.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::dom::{self, Document};
use crate::error::{Error, Result};

/// Separator between tag, attributes and text in a structural key.
pub const STRUCTURAL_KEY_SEPARATOR: char = ',';

/// One element's tag/attributes/text triple.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ElementFeature {
    /// Lowercase tag name.
    #[serde(alias = "tagName")]
    pub tag_name: String,

    /// `name=value` pairs in the element's attribute order, joined by `;`.
    pub attrs: String,

    /// Descendant text content, trimmed and lowercased.
    ///
    /// Cumulative: an ancestor's text includes all of its descendants' text.
    pub text: String,
}

impl ElementFeature {
    /// Key used for structural comparison: `tag,attrs,text`.
    #[must_use]
    pub fn structural_key(&self) -> String {
        let mut key =
            String::with_capacity(self.tag_name.len() + self.attrs.len() + self.text.len() + 2);
        key.push_str(&self.tag_name);
        key.push(STRUCTURAL_KEY_SEPARATOR);
        key.push_str(&self.attrs);
        key.push(STRUCTURAL_KEY_SEPARATOR);
        key.push_str(&self.text);
        key
    }
}

/// Element features and brand-name occurrence data for one page.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageFingerprint {
    /// One feature per element under `<body>`, in traversal order.
    pub features: Vec<ElementFeature>,

    /// Number of elements whose text contains the brand name.
    pub brand_occurrences: usize,

    /// Traversal indices of those elements, ascending.
    pub brand_positions: Vec<usize>,
}

impl PageFingerprint {
    /// Fingerprint of a page with no elements.
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    /// True when no elements were enumerated.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.features.is_empty()
    }

    /// Structural projection: one `tag,attrs,text` key per element.
    #[must_use]
    pub fn structural_keys(&self) -> Vec<String> {
        self.features
            .iter()
            .map(ElementFeature::structural_key)
            .collect()
    }

    /// Content projection: element texts.
    #[must_use]
    pub fn texts(&self) -> Vec<&str> {
        self.features.iter().map(|f| f.text.as_str()).collect()
    }
}

/// Extract a fingerprint from a rendered document.
///
/// The brand name is matched as a case-insensitive substring of each
/// element's (already lowercased) text. Internal whitespace is not
/// normalized on either side.
///
/// The document is only read, never modified.
///
/// # Example
///
/// ```rust
/// use rs_pagematch::dom;
/// use rs_pagematch::features::extract_fingerprint;
///
/// let doc = dom::parse("<html><body><div><h1>Acme Bank</h1></div><p>Login</p></body></html>");
/// let fp = extract_fingerprint(&doc, "ACME");
///
/// assert_eq!(fp.features.len(), 3);
/// assert_eq!(fp.brand_occurrences, 2);
/// assert_eq!(fp.brand_positions, vec![0, 1]);
/// ```
#[must_use]
pub fn extract_fingerprint(doc: &Document, brand_name: &str) -> PageFingerprint {
    let features = dom::body_elements(doc)
        .iter()
        .map(|element| element_feature(&element))
        .collect();

    fingerprint_elements(features, brand_name)
}

/// Build a fingerprint from features already enumerated in `body *` order.
///
/// Used for element lists read from a live browser DOM, where the page's
/// structure must not be reparsed.
///
/// # Example
///
/// ```rust
/// use rs_pagematch::features::{fingerprint_elements, ElementFeature};
///
/// let features = vec![
///     ElementFeature { tag_name: "p".into(), attrs: String::new(), text: "acme".into() },
///     ElementFeature { tag_name: "div".into(), attrs: String::new(), text: "acme".into() },
/// ];
/// let fp = fingerprint_elements(features, "Acme");
/// assert_eq!(fp.brand_positions, vec![0, 1]);
/// ```
#[must_use]
pub fn fingerprint_elements(features: Vec<ElementFeature>, brand_name: &str) -> PageFingerprint {
    let brand = brand_name.to_lowercase();
    let brand_positions: Vec<usize> = features
        .iter()
        .enumerate()
        .filter(|(_, feature)| feature.text.contains(&brand))
        .map(|(index, _)| index)
        .collect();

    let fingerprint = PageFingerprint {
        brand_occurrences: brand_positions.len(),
        brand_positions,
        features,
    };

    debug!(
        elements = fingerprint.features.len(),
        brand_occurrences = fingerprint.brand_occurrences,
        "extracted page fingerprint"
    );

    fingerprint
}

/// Decode a JSON array of `{tagName, attrs, text}` element records.
pub fn elements_from_json(json: &str) -> Result<Vec<ElementFeature>> {
    serde_json::from_str(json)
        .map_err(|e| Error::Render(format!("Malformed element enumeration: {e}")))
}

/// Parse HTML and extract its fingerprint.
#[must_use]
pub fn fingerprint_html(html: &str, brand_name: &str) -> PageFingerprint {
    extract_fingerprint(&dom::parse(html), brand_name)
}

fn element_feature(element: &dom::Selection) -> ElementFeature {
    let attrs = dom::attributes(element)
        .iter()
        .map(|(name, value)| format!("{name}={value}"))
        .collect::<Vec<_>>()
        .join(";");

    ElementFeature {
        tag_name: dom::tag_name(element).unwrap_or_default(),
        attrs,
        text: dom::text_content(element).trim().to_lowercase(),
    }
}
