mod common;

use common::{BRAND_PAGE, CLONE_PAGE, UNRELATED_PAGE};
use rs_pagematch::{
    classify_brand_match, compare, content_similarity, fingerprint_html, similarity,
    structural_similarity, BrandMatch, ElementFeature, PageFingerprint,
};

fn feature(tag: &str, text: &str) -> ElementFeature {
    ElementFeature {
        tag_name: tag.to_string(),
        attrs: String::new(),
        text: text.to_string(),
    }
}

fn brand_only(occurrences: usize, positions: &[usize]) -> PageFingerprint {
    PageFingerprint {
        features: Vec::new(),
        brand_occurrences: occurrences,
        brand_positions: positions.to_vec(),
    }
}

#[test]
fn identical_pages_score_full_match() {
    let template = PageFingerprint {
        features: vec![feature("div", "hello"), feature("span", "world")],
        brand_occurrences: 0,
        brand_positions: Vec::new(),
    };
    assert_eq!(template.structural_keys(), vec!["div,,hello", "span,,world"]);

    let row = compare("https://a.example/", &template, &template.clone());
    assert_eq!(row.structural_similarity, 100.0);
    assert_eq!(row.content_similarity, 100.0);
    assert_eq!(row.brand_match, BrandMatch::Match);
}

#[test]
fn one_changed_text_scores_two_thirds() {
    let score = similarity(&["a", "b", "c"], &["a", "b", "d"]);
    assert!((score - 2.0 * 2.0 / 6.0).abs() < 1e-12);
    assert_eq!(format!("{:.2}", score * 100.0), "66.67");
}

#[test]
fn moved_brand_is_position_mismatch() {
    assert_eq!(
        classify_brand_match(&brand_only(2, &[3, 7]), &brand_only(2, &[3, 9])),
        BrandMatch::PositionMismatch
    );
}

#[test]
fn missing_brand_is_count_mismatch() {
    assert_eq!(
        classify_brand_match(&brand_only(1, &[0]), &brand_only(0, &[])),
        BrandMatch::CountMismatch
    );
}

#[test]
fn empty_fingerprints_are_identical() {
    let empty = PageFingerprint::empty();
    assert_eq!(structural_similarity(&empty, &empty), 100.0);
    assert_eq!(content_similarity(&empty, &empty), 100.0);
    assert!(!structural_similarity(&empty, &empty).is_nan());
}

#[test]
fn empty_against_nonempty_scores_zero() {
    let empty = PageFingerprint::empty();
    let page = fingerprint_html(BRAND_PAGE, "acme");
    assert_eq!(structural_similarity(&empty, &page), 0.0);
    assert_eq!(content_similarity(&page, &empty), 0.0);
}

#[test]
fn self_similarity_of_real_page() {
    let fp = fingerprint_html(BRAND_PAGE, "acme");
    assert_eq!(structural_similarity(&fp, &fp), 100.0);
    assert_eq!(content_similarity(&fp, &fp), 100.0);
    assert_eq!(classify_brand_match(&fp, &fp), BrandMatch::Match);
}

#[test]
fn clone_with_changed_form_action() {
    let template = fingerprint_html(BRAND_PAGE, "acme");
    let candidate = fingerprint_html(CLONE_PAGE, "acme");

    let row = compare("https://acme-login.example/", &template, &candidate);
    // 12 of 13 structural keys shared
    assert_eq!(format!("{:.2}", row.structural_similarity), "92.31");
    assert_eq!(row.content_similarity, 100.0);
    assert_eq!(row.brand_match, BrandMatch::Match);
}

#[test]
fn unrelated_page_shares_nothing() {
    let template = fingerprint_html(BRAND_PAGE, "acme");
    let candidate = fingerprint_html(UNRELATED_PAGE, "acme");

    let row = compare("https://garden.example/", &template, &candidate);
    assert_eq!(row.structural_similarity, 0.0);
    assert_eq!(row.content_similarity, 0.0);
    assert_eq!(row.brand_match, BrandMatch::CountMismatch);
}

#[test]
fn similarity_properties_hold_across_samples() {
    let samples: [&[&str]; 6] = [
        &[],
        &["a"],
        &["a", "a", "b"],
        &["b", "c", "c", "c"],
        &["x", "y", "z"],
        &["a", "b", "c", "a", "b", "c"],
    ];

    for a in samples {
        for b in samples {
            let ab = similarity(a, b);
            assert_eq!(ab, similarity(b, a), "symmetry: {a:?} vs {b:?}");
            assert!((0.0..=1.0).contains(&ab), "bounds: {a:?} vs {b:?} = {ab}");
        }
        assert_eq!(similarity(a, a), 1.0, "self: {a:?}");
    }

    assert_eq!(similarity(samples[2], samples[4]), 0.0);
}

#[test]
fn text_duplicates_from_nesting_inflate_content_similarity() {
    // Wrapper divs repeat the same text at every level.
    let template = fingerprint_html("<body><div><div><p>Acme</p></div></div></body>", "acme");
    let candidate = fingerprint_html("<body><p>Acme</p><p>Other</p><p>More</p></body>", "acme");

    // texts: [acme, acme, acme] vs [acme, other, more]; common = 1
    assert!((content_similarity(&template, &candidate) - 100.0 / 3.0).abs() < 1e-9);
}
