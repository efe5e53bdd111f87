//! Similarity scoring between page fingerprints.
//!
//! Sequences are compared as multisets: order is ignored and each value
//! counts as many times as it occurs. Values match only when identical.

use std::collections::HashMap;
use std::fmt;
use std::hash::Hash;

use serde::{Deserialize, Serialize};

use crate::features::PageFingerprint;
use crate::report::ComparisonResult;

/// Multiset-overlap (Dice) similarity between two sequences, in `[0, 1]`.
///
/// `2 * Σ min(countA, countB) / (len(A) + len(B))`, capped at `1.0`.
/// Two empty sequences are identical and score `1.0`.
///
/// # Examples
///
/// ```
/// use rs_pagematch::similarity::similarity;
///
/// let a = ["a", "b", "c"];
/// let b = ["a", "b", "d"];
/// assert!((similarity(&a, &b) - 4.0 / 6.0).abs() < 1e-12);
/// ```
#[must_use]
pub fn similarity<T: Eq + Hash>(a: &[T], b: &[T]) -> f64 {
    let total = a.len() + b.len();
    if total == 0 {
        return 1.0;
    }

    let counts_a = frequencies(a);
    let counts_b = frequencies(b);

    let common: usize = counts_a
        .iter()
        .map(|(value, &count_a)| count_a.min(counts_b.get(value).copied().unwrap_or(0)))
        .sum();

    (2.0 * common as f64 / total as f64).min(1.0)
}

fn frequencies<T: Eq + Hash>(values: &[T]) -> HashMap<&T, usize> {
    let mut counts = HashMap::with_capacity(values.len());
    for value in values {
        *counts.entry(value).or_insert(0) += 1;
    }
    counts
}

/// Percentage similarity over `tag,attrs,text` keys.
#[must_use]
pub fn structural_similarity(a: &PageFingerprint, b: &PageFingerprint) -> f64 {
    similarity(&a.structural_keys(), &b.structural_keys()) * 100.0
}

/// Percentage similarity over element texts alone.
#[must_use]
pub fn content_similarity(a: &PageFingerprint, b: &PageFingerprint) -> f64 {
    similarity(&a.texts(), &b.texts()) * 100.0
}

/// Agreement between template and candidate on brand-name placement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BrandMatch {
    /// Same occurrence count at the same element indices.
    #[serde(rename = "MATCH")]
    Match,

    /// Occurrence counts differ.
    #[serde(rename = "Count Mismatch")]
    CountMismatch,

    /// Counts agree but the brand sits at different element indices.
    #[serde(rename = "Position Mismatch")]
    PositionMismatch,
}

impl BrandMatch {
    /// Report label for this classification.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Match => "MATCH",
            Self::CountMismatch => "Count Mismatch",
            Self::PositionMismatch => "Position Mismatch",
        }
    }
}

impl fmt::Display for BrandMatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Classify brand-name agreement between a template and a candidate.
///
/// Positions must be equal element for element; the same set of indices in
/// a different order would not occur, as positions are always ascending.
#[must_use]
pub fn classify_brand_match(template: &PageFingerprint, candidate: &PageFingerprint) -> BrandMatch {
    if template.brand_occurrences != candidate.brand_occurrences {
        BrandMatch::CountMismatch
    } else if template.brand_positions != candidate.brand_positions {
        BrandMatch::PositionMismatch
    } else {
        BrandMatch::Match
    }
}

/// Compare a candidate page against the template, producing one report row.
#[must_use]
pub fn compare(url: &str, template: &PageFingerprint, candidate: &PageFingerprint) -> ComparisonResult {
    ComparisonResult {
        url: url.to_string(),
        structural_similarity: structural_similarity(template, candidate),
        content_similarity: content_similarity(template, candidate),
        brand_match: classify_brand_match(template, candidate),
    }
}
