//! Searcher behavior through the public API
//!
//! Searchers are created from field specs the way a query evaluation sets
//! them up: duplicated from the spec, prepared with terms, then run over
//! documents.

use std::sync::Arc;
use vsm_core::{Document, FieldInfo, FieldValue, QueryTerm, QueryTermList, SearcherBuf};
use vsm_search::{count_words, FieldSearchSpec, FieldSearcher, SearchMethod};

// ============================================================================
// Test Helpers
// ============================================================================

fn query(raw: &[&str]) -> QueryTermList {
    raw.iter().map(|t| Arc::new(QueryTerm::parse(t))).collect()
}

fn searcher_for(method: SearchMethod, arg1: &str, terms: &QueryTermList) -> Box<dyn FieldSearcher> {
    let spec = FieldSearchSpec::new(0, "f", method, arg1, 0x100000);
    let mut searcher = spec.searcher().expect("valid spec").duplicate();
    searcher.prepare(terms, &SearcherBuf::shared(32));
    searcher
}

/// Hit positions of a single term over one field value
fn positions(method: SearchMethod, arg1: &str, term: &str, value: FieldValue) -> Vec<u32> {
    let terms = query(&[term]);
    let mut searcher = searcher_for(method, arg1, &terms);
    searcher.search(&Document::new().with_field(0, value));
    let hits = terms[0].hit_list();
    hits.iter().map(|h| h.pos()).collect()
}

// ============================================================================
// Searcher Selection
// ============================================================================

#[test]
fn test_text_methods_by_arg1() {
    let text = || FieldValue::string("Vespa rocks");
    assert_eq!(positions(SearchMethod::Utf8, "", "rocks", text()), vec![1]);
    assert_eq!(positions(SearchMethod::AutoUtf8, "", "vespa", text()), vec![0]);
    assert_eq!(positions(SearchMethod::AutoUtf8, "prefix", "roc", text()), vec![1]);
    assert_eq!(positions(SearchMethod::AutoUtf8, "suffix", "pa", text()), vec![0]);
    assert_eq!(positions(SearchMethod::AutoUtf8, "substring", "ock", text()), vec![1]);
    assert_eq!(positions(SearchMethod::AutoUtf8, "exact", "Vespa rocks", text()), vec![0]);
}

#[test]
fn test_word_method_ignores_partial_words() {
    let text = || FieldValue::string("Vespa rocks");
    assert!(positions(SearchMethod::Utf8, "", "roc", text()).is_empty());
    assert!(positions(SearchMethod::AutoUtf8, "exact", "vespa rocks", text()).is_empty());
}

#[test]
fn test_numeric_methods() {
    assert_eq!(positions(SearchMethod::Int32, "", "[1;5]", FieldValue::Int(3)), vec![0]);
    assert!(positions(SearchMethod::Int32, "", "[1;5]", FieldValue::Int(6)).is_empty());
    assert_eq!(positions(SearchMethod::Int64, "", ">10", FieldValue::Long(11)), vec![0]);
    assert_eq!(positions(SearchMethod::Float, "", "<2.5", FieldValue::Float(2.0)), vec![0]);
    assert_eq!(positions(SearchMethod::Double, "", ">2.5", FieldValue::Double(3.0)), vec![0]);
    assert!(positions(SearchMethod::Int32, "", "abc", FieldValue::Int(3)).is_empty());
}

#[test]
fn test_none_method_has_no_searcher() {
    let spec = FieldSearchSpec::new(0, "f", SearchMethod::None, "", 0x100000);
    assert!(!spec.valid());
    assert!(spec.searcher().is_none());
}

// ============================================================================
// Field Statistics
// ============================================================================

#[test]
fn test_text_searchers_agree_on_field_info() {
    for arg1 in ["", "prefix", "suffix", "substring"] {
        let terms = query(&["bar"]);
        let mut searcher = searcher_for(SearchMethod::AutoUtf8, arg1, &terms);
        searcher.search(&Document::new().with_field(0, FieldValue::string("foo bar baz")));
        assert_eq!(terms[0].field_info(0), FieldInfo::new(0, 1, 3), "arg1 {:?}", arg1);
    }
}

#[test]
fn test_identical_word_matches_in_every_text_searcher() {
    for method in [SearchMethod::Utf8, SearchMethod::AutoUtf8] {
        for arg1 in ["", "prefix", "suffix", "substring", "exact"] {
            for word in ["ΟΔΟΣ", "İstanbul", "Straße"] {
                let terms = query(&[word]);
                let mut searcher = searcher_for(method, arg1, &terms);
                searcher.search(&Document::new().with_field(0, FieldValue::string(word)));
                assert_eq!(
                    terms[0].field_info(0),
                    FieldInfo::new(0, 1, count_words(word.as_bytes()) as u32),
                    "{} {:?} {}",
                    method,
                    arg1,
                    word
                );
            }
        }
    }
}

#[test]
fn test_positions_continue_across_elements() {
    let value = FieldValue::array(["a b", "c bar"]);
    assert_eq!(positions(SearchMethod::Utf8, "", "bar", value), vec![3]);

    let terms = query(&["bar"]);
    let mut searcher = searcher_for(SearchMethod::Utf8, "", &terms);
    searcher.search(&Document::new().with_field(0, FieldValue::array(["a b", "c bar"])));
    let hits = terms[0].hit_list();
    assert_eq!(hits[0].element_id, 1);
    assert_eq!(terms[0].field_info(0), FieldInfo::new(0, 1, 4));
}

#[test]
fn test_max_length_from_spec() {
    let spec = FieldSearchSpec::new(0, "f", SearchMethod::AutoUtf8, "", 6);
    let terms = query(&["bar"]);
    let mut searcher = spec.searcher().expect("valid spec").duplicate();
    assert_eq!(searcher.max_field_length(), 6);
    searcher.prepare(&terms, &SearcherBuf::shared(32));
    searcher.search(&Document::new().with_field(0, FieldValue::string("foo bar")));
    assert_eq!(terms[0].hit_count(), 0);
    assert_eq!(terms[0].field_info(0), FieldInfo::new(0, 0, 2));
}

// ============================================================================
// Independence
// ============================================================================

#[test]
fn test_duplicates_do_not_share_terms() {
    let spec = FieldSearchSpec::new(0, "f", SearchMethod::Utf8, "", 0x100000);
    let first = query(&["foo"]);
    let second = query(&["bar"]);

    let mut a = spec.searcher().expect("valid spec").duplicate();
    let mut b = spec.searcher().expect("valid spec").duplicate();
    a.prepare(&first, &SearcherBuf::shared(32));
    b.prepare(&second, &SearcherBuf::shared(32));

    let doc = Document::new().with_field(0, FieldValue::string("foo bar"));
    a.search(&doc);
    b.search(&doc);
    assert_eq!(first[0].hit_list()[0].pos(), 0);
    assert_eq!(second[0].hit_list()[0].pos(), 1);
    assert!(spec.searcher().expect("valid spec").query_terms().is_empty());
}
