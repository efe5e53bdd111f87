//! Batch input and the sequential comparison loop.
//!
//! A batch is an ordered list of `(url, brand name)` pairs whose first entry
//! is the template. Every entry, the template included, is rendered and
//! compared against the template's fingerprint.

use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::error::{Error, Result};
use crate::render::Renderer;
use crate::report::ComparisonResult;
use crate::similarity::compare;
use crate::url_utils;

/// One `(url, brand name)` pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchEntry {
    /// Page to visit.
    pub url: String,

    /// Brand name to locate on that page.
    pub brand_name: String,
}

impl BatchEntry {
    /// Create an entry.
    pub fn new(url: impl Into<String>, brand_name: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            brand_name: brand_name.into(),
        }
    }
}

/// Parse newline-delimited `url<TAB>brand` records.
///
/// Blank lines are skipped. The URL is the first tab-separated field and the
/// brand name the second, trimmed; any further fields are ignored.
///
/// # Example
///
/// ```rust
/// use rs_pagematch::batch::parse_batch_tsv;
///
/// let entries = parse_batch_tsv("https://acme.example/\tAcme\n\nhttps://acme-login.example/\tAcme \n")?;
/// assert_eq!(entries.len(), 2);
/// assert_eq!(entries[1].brand_name, "Acme");
/// # Ok::<(), rs_pagematch::Error>(())
/// ```
pub fn parse_batch_tsv(input: &str) -> Result<Vec<BatchEntry>> {
    input
        .split('\n')
        .enumerate()
        .filter(|(_, line)| !line.trim().is_empty())
        .map(|(index, line)| {
            let mut fields = line.split('\t');
            fields
                .next()
                .zip(fields.next())
                .map(|(url, brand)| BatchEntry::new(url, brand.trim()))
                .ok_or_else(|| {
                    Error::InvalidInput(format!(
                        "line {}: expected `url<TAB>brand name`",
                        index + 1
                    ))
                })
        })
        .collect()
}

/// Read and parse a batch file of `url<TAB>brand` lines.
pub fn read_batch_file(path: impl AsRef<Path>) -> Result<Vec<BatchEntry>> {
    let input = std::fs::read_to_string(path)?;
    parse_batch_tsv(&input)
}

/// Reject empty batches and syntactically invalid URLs.
pub fn validate_entries(entries: &[BatchEntry]) -> Result<()> {
    if entries.is_empty() {
        return Err(Error::EmptyBatch);
    }

    match entries.iter().find(|e| !url_utils::is_valid_url(&e.url)) {
        Some(invalid) => Err(Error::InvalidUrl(invalid.url.clone())),
        None => Ok(()),
    }
}

/// Render every entry and compare it against the first (template) entry.
///
/// Pages are visited strictly one at a time on the given session. The first
/// rendering failure aborts the batch; no partial results are returned.
pub fn analyze_batch<R>(renderer: &mut R, entries: &[BatchEntry]) -> Result<Vec<ComparisonResult>>
where
    R: Renderer + ?Sized,
{
    let template_entry = entries.first().ok_or(Error::EmptyBatch)?;

    info!(url = %template_entry.url, brand = %template_entry.brand_name, "fingerprinting template");
    let template = renderer
        .render(&template_entry.url)
        .inspect_err(|e| warn!(url = %template_entry.url, error = %e, "template render failed"))?
        .fingerprint(&template_entry.brand_name);

    let mut results = Vec::with_capacity(entries.len());
    for (index, entry) in entries.iter().enumerate() {
        info!(index, url = %entry.url, "visiting candidate");
        let candidate = renderer
            .render(&entry.url)
            .inspect_err(|e| warn!(url = %entry.url, error = %e, "candidate render failed"))?
            .fingerprint(&entry.brand_name);

        results.push(compare(&entry.url, &template, &candidate));
    }

    info!(pages = results.len(), "batch complete");
    Ok(results)
}
