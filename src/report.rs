//! Comparison report types and presentation.
//!
//! A [`ComparisonResult`] serializes to the JSON shape the analysis service
//! returns; [`render_table`] produces the console table of the batch script.

use serde::{Serialize, Serializer};

use crate::similarity::BrandMatch;

/// Horizontal rule between table rows.
pub const TABLE_RULE: &str = "----------------------------------------------------------";

/// Table header row.
pub const TABLE_HEADER: &str =
    "| URL | Structural Similarity | Content Similarity | Brand Name Match |";

/// Similarity of one candidate page to the template.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ComparisonResult {
    /// Candidate URL as supplied in the batch.
    pub url: String,

    /// Percentage overlap of `tag,attrs,text` keys (0-100).
    #[serde(rename = "structuralSim", serialize_with = "serialize_percentage")]
    pub structural_similarity: f64,

    /// Percentage overlap of element texts (0-100).
    #[serde(rename = "contentSim", serialize_with = "serialize_percentage")]
    pub content_similarity: f64,

    /// Brand-name placement agreement.
    #[serde(rename = "brandNameMatch")]
    pub brand_match: BrandMatch,
}

/// Format a percentage with two decimals, as reported.
#[must_use]
pub fn format_percentage(value: f64) -> String {
    format!("{value:.2}")
}

#[allow(clippy::trivially_copy_pass_by_ref)]
fn serialize_percentage<S: Serializer>(value: &f64, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&format_percentage(*value))
}

/// Render results as the console comparison table.
///
/// # Example
///
/// ```rust
/// use rs_pagematch::report::{render_table, ComparisonResult};
/// use rs_pagematch::similarity::BrandMatch;
///
/// let rows = vec![ComparisonResult {
///     url: "https://a.example/".to_string(),
///     structural_similarity: 100.0,
///     content_similarity: 100.0,
///     brand_match: BrandMatch::Match,
/// }];
/// let table = render_table("https://a.example/", &rows);
/// assert!(table.contains("| https://a.example/ | 100.00% | 100.00% | MATCH |"));
/// ```
#[must_use]
pub fn render_table(template_url: &str, results: &[ComparisonResult]) -> String {
    let mut lines = vec![
        format!("Comparing against template: {template_url}"),
        TABLE_RULE.to_string(),
        TABLE_HEADER.to_string(),
        TABLE_RULE.to_string(),
    ];

    for result in results {
        lines.push(format!(
            "| {} | {}% | {}% | {} |",
            result.url,
            format_percentage(result.structural_similarity),
            format_percentage(result.content_similarity),
            result.brand_match
        ));
        lines.push(TABLE_RULE.to_string());
    }

    let mut table = lines.join("\n");
    table.push('\n');
    table
}
