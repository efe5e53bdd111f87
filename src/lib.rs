//! # rs-pagematch
//!
//! Fingerprints rendered web pages and scores how closely each one mimics a
//! template page, to spot cloned or phishing copies of a brand's site.
//!
//! A page's fingerprint is one `(tag, attributes, text)` record per element
//! under `<body>`, plus where the brand name appears. Two fingerprints are
//! compared as multisets of those records (structural similarity) and of
//! their texts alone (content similarity), and the brand-name placement is
//! classified as a match or a count/position mismatch.
//!
//! ## Quick Start
//!
//! ```rust
//! use rs_pagematch::{compare, fingerprint_html, BrandMatch};
//!
//! let template = fingerprint_html(
//!     "<html><body><h1>Acme Bank</h1><form><input name=user></form></body></html>",
//!     "Acme",
//! );
//! let candidate = fingerprint_html(
//!     "<html><body><h1>Acme Bank</h1><form><input name=login></form></body></html>",
//!     "Acme",
//! );
//!
//! let row = compare("https://acme-secure.example/", &template, &candidate);
//! assert_eq!(row.content_similarity, 100.0);
//! assert!(row.structural_similarity < 100.0);
//! assert_eq!(row.brand_match, BrandMatch::Match);
//! ```
//!
//! ## Batches
//!
//! [`analyze_batch`] drives a [`Renderer`] over a list of `(url, brand)`
//! pairs, the first being the template. [`render::ChromeRenderer`] (feature
//! `chrome`) loads live pages in headless Chrome; [`render::FileRenderer`]
//! reads saved snapshots.

mod error;
mod options;

/// DOM operations adapter over `dom_query`.
pub mod dom;

/// Page fingerprint extraction.
pub mod features;

/// Multiset similarity and brand-match classification.
pub mod similarity;

/// Comparison results and their presentation.
pub mod report;

/// Batch parsing and the sequential comparison loop.
pub mod batch;

/// Rendering sessions.
pub mod render;

/// URL validation and local path resolution.
pub mod url_utils;

/// Character encoding detection for local snapshots.
pub mod encoding;

/// HTTP analysis service.
#[cfg(feature = "server")]
pub mod server;

// Public API - re-exports
pub use batch::{analyze_batch, parse_batch_tsv, read_batch_file, validate_entries, BatchEntry};
pub use error::{Error, Result};
pub use features::{
    extract_fingerprint, fingerprint_elements, fingerprint_html, ElementFeature, PageFingerprint,
};
pub use options::{Options, SERVICE_USER_AGENT};
pub use render::{FileRenderer, PageContent, RenderedPage, Renderer};
pub use report::ComparisonResult;
pub use similarity::{
    classify_brand_match, compare, content_similarity, similarity, structural_similarity,
    BrandMatch,
};
