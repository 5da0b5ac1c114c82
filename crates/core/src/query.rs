//! Query terms
//!
//! A [`QueryTerm`] is created once when a query is parsed and lives for the
//! duration of the query. The term text, index and match type are immutable.
//! Hits and per-field statistics are written by field searchers while a
//! document is scanned, so they sit behind a lock and the term is shared as
//! `Arc<QueryTerm>`.
//!
//! Hits are not cleared between documents. Callers evaluating several
//! documents with the same query call [`QueryTerm::reset`] before each one.

use crate::search_types::{FieldId, FieldInfo, Hit, HitList};
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Bound, RangeBounds};
use std::str::FromStr;
use std::sync::Arc;

/// Index name used when a term does not name one
pub const DEFAULT_INDEX: &str = "index";

/// List of query terms shared between the query and its searchers
pub type QueryTermList = Vec<Arc<QueryTerm>>;

// ============================================================================
// TermType
// ============================================================================

/// How a term is matched against words
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum TermType {
    /// Whole word equality
    #[default]
    Word,
    /// Word starts with the term (`term*`)
    Prefix,
    /// Word ends with the term (`*term`)
    Suffix,
    /// Term occurs anywhere in the word (`*term*`)
    Substring,
}

// ============================================================================
// NumericRange
// ============================================================================

/// Numeric predicate of a term
///
/// Term syntax:
///
/// | Syntax | Meaning |
/// |--------|---------|
/// | `v` | equal to v |
/// | `>v` | strictly greater than v |
/// | `<v` | strictly less than v |
/// | `[lo;hi]` | lo ≤ x ≤ hi, an empty bound is open |
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NumericRange<T> {
    /// Lower bound
    pub low: Bound<T>,
    /// Upper bound
    pub high: Bound<T>,
}

impl<T> NumericRange<T>
where
    T: FromStr + PartialOrd + Copy,
{
    /// Parse a numeric term. Returns `None` if the text is not a number of
    /// type `T` in one of the supported forms.
    pub fn parse(text: &str) -> Option<Self> {
        let text = text.trim();
        if let Some(inner) = text.strip_prefix('[').and_then(|s| s.strip_suffix(']')) {
            let (lo, hi) = inner.split_once(';')?;
            return Some(NumericRange {
                low: parse_bound(lo)?,
                high: parse_bound(hi)?,
            });
        }
        if let Some(v) = text.strip_prefix('>') {
            return Some(NumericRange {
                low: Bound::Excluded(v.trim().parse().ok()?),
                high: Bound::Unbounded,
            });
        }
        if let Some(v) = text.strip_prefix('<') {
            return Some(NumericRange {
                low: Bound::Unbounded,
                high: Bound::Excluded(v.trim().parse().ok()?),
            });
        }
        let v: T = text.parse().ok()?;
        Some(NumericRange {
            low: Bound::Included(v),
            high: Bound::Included(v),
        })
    }
}

impl<T: PartialOrd> NumericRange<T> {
    /// Check whether a value satisfies the predicate
    pub fn matches(&self, value: T) -> bool {
        self.contains(&value)
    }
}

fn parse_bound<T: FromStr>(s: &str) -> Option<Bound<T>> {
    let s = s.trim();
    if s.is_empty() {
        Some(Bound::Unbounded)
    } else {
        s.parse().ok().map(Bound::Included)
    }
}

impl<T> RangeBounds<T> for NumericRange<T> {
    fn start_bound(&self) -> Bound<&T> {
        self.low.as_ref()
    }

    fn end_bound(&self) -> Bound<&T> {
        self.high.as_ref()
    }
}

// ============================================================================
// QueryTerm
// ============================================================================

#[derive(Debug, Default)]
struct TermState {
    hits: HitList,
    field_info: Vec<FieldInfo>,
}

/// A single term of a parsed query
#[derive(Debug)]
pub struct QueryTerm {
    term: String,
    index: String,
    term_type: TermType,
    chars: Vec<char>,
    state: Mutex<TermState>,
}

impl QueryTerm {
    /// Create a new query term. An empty index selects [`DEFAULT_INDEX`].
    pub fn new(term: impl Into<String>, index: impl Into<String>, term_type: TermType) -> Self {
        let term = term.into();
        let mut index = index.into();
        if index.is_empty() {
            index = DEFAULT_INDEX.to_string();
        }
        let chars = term.chars().collect();
        QueryTerm {
            term,
            index,
            term_type,
            chars,
            state: Mutex::new(TermState::default()),
        }
    }

    /// Parse `index:term` syntax with `*` wildcards
    ///
    /// # Example
    ///
    /// ```
    /// use vsm_core::query::{QueryTerm, TermType};
    ///
    /// let qt = QueryTerm::parse("title:*vesp");
    /// assert_eq!(qt.index(), "title");
    /// assert_eq!(qt.term(), "vesp");
    /// assert_eq!(qt.term_type(), TermType::Suffix);
    /// ```
    pub fn parse(raw: &str) -> Self {
        let (index, term) = split_index(raw);
        let (term, term_type) = split_wildcards(term);
        QueryTerm::new(term, index, term_type)
    }

    /// Term text as given in the query
    pub fn term(&self) -> &str {
        &self.term
    }

    /// Term text as codepoints
    pub fn chars(&self) -> &[char] {
        &self.chars
    }

    /// Index (field alias) the term searches
    pub fn index(&self) -> &str {
        &self.index
    }

    /// Match type of the term
    pub fn term_type(&self) -> TermType {
        self.term_type
    }

    /// Check if this is a prefix term
    pub fn is_prefix(&self) -> bool {
        self.term_type == TermType::Prefix
    }

    /// Check if this is a suffix term
    pub fn is_suffix(&self) -> bool {
        self.term_type == TermType::Suffix
    }

    /// Check if this is a substring term
    pub fn is_substring(&self) -> bool {
        self.term_type == TermType::Substring
    }

    /// Interpret the term text as a numeric predicate over `T`
    pub fn numeric_range<T>(&self) -> Option<NumericRange<T>>
    where
        T: FromStr + PartialOrd + Copy,
    {
        NumericRange::parse(&self.term)
    }

    // ========================================================================
    // Hits and field info
    // ========================================================================

    /// Record a hit
    pub fn add_hit(&self, hit: Hit) {
        self.state.lock().hits.push(hit);
    }

    /// Snapshot of the hit list
    pub fn hit_list(&self) -> HitList {
        self.state.lock().hits.clone()
    }

    /// Number of recorded hits
    pub fn hit_count(&self) -> usize {
        self.state.lock().hits.len()
    }

    /// Make room for statistics of `field_id`
    pub fn resize_field_id(&self, field_id: FieldId) {
        let mut state = self.state.lock();
        let needed = field_id as usize + 1;
        if state.field_info.len() < needed {
            state.field_info.resize(needed, FieldInfo::default());
        }
    }

    /// Statistics of `field_id`, all zero if the field was never searched
    pub fn field_info(&self, field_id: FieldId) -> FieldInfo {
        self.state
            .lock()
            .field_info
            .get(field_id as usize)
            .copied()
            .unwrap_or_default()
    }

    /// Store statistics of `field_id`
    pub fn set_field_info(&self, field_id: FieldId, info: FieldInfo) {
        self.resize_field_id(field_id);
        self.state.lock().field_info[field_id as usize] = info;
    }

    /// Clear hits and field statistics before evaluating another document
    pub fn reset(&self) {
        let mut state = self.state.lock();
        state.hits.clear();
        state.field_info.clear();
    }
}

impl fmt::Display for QueryTerm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (pre, post) = match self.term_type {
            TermType::Word => ("", ""),
            TermType::Prefix => ("", "*"),
            TermType::Suffix => ("*", ""),
            TermType::Substring => ("*", "*"),
        };
        write!(f, "{}:{}{}{}", self.index, pre, self.term, post)
    }
}

/// Split `index:term` at the first colon. No colon means no index.
fn split_index(raw: &str) -> (&str, &str) {
    raw.split_once(':').unwrap_or(("", raw))
}

fn split_wildcards(term: &str) -> (&str, TermType) {
    if term.len() >= 2 && term.starts_with('*') && term.ends_with('*') {
        (&term[1..term.len() - 1], TermType::Substring)
    } else if let Some(rest) = term.strip_prefix('*') {
        (rest, TermType::Suffix)
    } else if let Some(rest) = term.strip_suffix('*') {
        (rest, TermType::Prefix)
    } else {
        (term, TermType::Word)
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn closed_range_matches_exactly_its_interval(
            lo in -1000i64..1000,
            width in 0i64..100,
            v in -1200i64..1200,
        ) {
            let hi = lo + width;
            let r: NumericRange<i64> = NumericRange::parse(&format!("[{};{}]", lo, hi)).unwrap();
            prop_assert_eq!(r.matches(v), lo <= v && v <= hi);
        }

        #[test]
        fn strict_bounds_exclude_the_bound(b in any::<i32>(), v in any::<i32>()) {
            let (b, v) = (i64::from(b), i64::from(v));
            let gt: NumericRange<i64> = NumericRange::parse(&format!(">{}", b)).unwrap();
            let lt: NumericRange<i64> = NumericRange::parse(&format!("<{}", b)).unwrap();
            prop_assert_eq!(gt.matches(v), v > b);
            prop_assert_eq!(lt.matches(v), v < b);
        }
    }
}
