//! Field searchers
//!
//! A field searcher is configured once per field, prepared once per query
//! and then invoked once per document. Preparation binds the query terms
//! that target the field; each search scans the field value and appends hits
//! to the bound terms, then stores the term's [`FieldInfo`] for the field.
//!
//! Variants:
//! - `Utf8StrChrFieldSearcher`, `FUtf8StrChrFieldSearcher`: word and prefix matching
//! - `Utf8SubStringFieldSearcher`: substring matching
//! - `Utf8SuffixStringFieldSearcher`: suffix matching
//! - `Utf8ExactStringFieldSearcher`: whole value matching
//! - `Utf8FlexibleStringFieldSearcher`: per-term dispatch on match type
//! - `IntFieldSearcher`, `FloatFieldSearcher`, `DoubleFieldSearcher`:
//!   numeric equality and range matching
//!
//! Searchers keep no per-document state besides the shared scratch buffer.
//! Terms are not reset between documents; see [`QueryTerm::reset`].

mod exact;
mod flexible;
mod numeric;
mod strchr;
mod substring;
mod suffix;

pub use exact::Utf8ExactStringFieldSearcher;
pub use flexible::Utf8FlexibleStringFieldSearcher;
pub use numeric::{
    DoubleFieldSearcher, FloatFieldSearcher, FloatFieldSearcherT, FloatValue, IntFieldSearcher,
};
pub use strchr::{FUtf8StrChrFieldSearcher, Utf8StrChrFieldSearcher};
pub use substring::Utf8SubStringFieldSearcher;
pub use suffix::Utf8SuffixStringFieldSearcher;

use crate::text::{decode_prefix, fold_into, fold_spans, fold_str, words, FoldSpan, Normalizing};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use vsm_core::{
    Document, FieldId, FieldInfo, FieldValue, Hit, QueryTerm, QueryTermList, SearcherBuf,
    SharedSearcherBuf,
};

/// Default bound on the number of bytes scanned per field element
pub const DEFAULT_MAX_FIELD_LENGTH: usize = 0x100000;

/// Match behavior configured on a searcher
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum MatchType {
    /// Whole word
    #[default]
    Regular,
    /// Word prefix
    Prefix,
    /// Anywhere inside a word
    Substring,
    /// Word suffix
    Suffix,
    /// Whole field value
    Exact,
}

// ============================================================================
// BoundTerm
// ============================================================================

/// A query term bound to a searcher, with its text folded the way the
/// searcher folds field text
#[derive(Debug, Clone)]
pub struct BoundTerm {
    /// The shared query term
    pub term: Arc<QueryTerm>,
    /// Folded term text
    pub text: String,
    /// Folded term codepoints
    pub chars: Vec<char>,
}

impl BoundTerm {
    fn new(term: Arc<QueryTerm>, normalizing: Normalizing) -> Self {
        let text = fold_str(term.term(), normalizing);
        let chars = text.chars().collect();
        BoundTerm { term, text, chars }
    }

    /// Check if the folded term is empty. Empty terms never match.
    pub fn is_empty(&self) -> bool {
        self.chars.is_empty()
    }
}

// ============================================================================
// SearcherBase
// ============================================================================

/// State shared by every searcher variant
#[derive(Debug)]
pub struct SearcherBase {
    field: FieldId,
    match_type: MatchType,
    normalizing: Normalizing,
    max_field_length: usize,
    ascii_fast_path: bool,
    pub(crate) terms: Vec<BoundTerm>,
    pub(crate) buf: SharedSearcherBuf,
    /// Words (or elements) consumed by earlier elements of the current value
    pub(crate) words: u32,
}

impl SearcherBase {
    /// Create the base state of a searcher for `field`
    pub fn new(field: FieldId, match_type: MatchType, normalizing: Normalizing) -> Self {
        SearcherBase {
            field,
            match_type,
            normalizing,
            max_field_length: DEFAULT_MAX_FIELD_LENGTH,
            ascii_fast_path: false,
            terms: Vec::new(),
            buf: SearcherBuf::shared(vsm_core::DEFAULT_BUF_CAPACITY),
            words: 0,
        }
    }

    pub(crate) fn with_ascii_fast_path(mut self) -> Self {
        self.ascii_fast_path = true;
        self
    }

    /// Fresh base with the same configuration and no bound terms
    pub fn duplicate(&self) -> Self {
        SearcherBase {
            field: self.field,
            match_type: self.match_type,
            normalizing: self.normalizing,
            max_field_length: self.max_field_length,
            ascii_fast_path: self.ascii_fast_path,
            terms: Vec::new(),
            buf: SearcherBuf::shared(vsm_core::DEFAULT_BUF_CAPACITY),
            words: 0,
        }
    }

    /// Field this searcher scans
    pub fn field(&self) -> FieldId {
        self.field
    }

    /// Terms bound by the last `prepare`
    pub fn terms(&self) -> &[BoundTerm] {
        &self.terms
    }

    /// Bind terms and the shared scratch buffer
    pub fn prepare(&mut self, terms: &QueryTermList, buf: &SharedSearcherBuf) {
        let normalizing = self.normalizing;
        self.terms = terms
            .iter()
            .map(|t| BoundTerm::new(Arc::clone(t), normalizing))
            .collect();
        self.buf = Arc::clone(buf);
        tracing::debug!(
            target: "vsm::search",
            field = self.field,
            terms = self.terms.len(),
            match_type = ?self.match_type,
            "Prepared field searcher"
        );
    }

    /// Build a hit at `position` relative to the current element
    #[inline]
    pub(crate) fn hit(&self, element_id: u32, position: u32) -> Hit {
        Hit::new(self.field, element_id, self.words + position)
    }

    /// Decoded part of `bytes` within the max field length
    pub(crate) fn scanned_text<'a>(&self, bytes: &'a [u8]) -> &'a str {
        let limit = bytes.len().min(self.max_field_length);
        decode_prefix(&bytes[..limit])
    }

    /// Decode the scanned part of `bytes`, fold it as a whole, and hand it to `f`
    ///
    /// The scratch buffer stays locked while `f` runs.
    pub(crate) fn with_text<R>(&self, bytes: &[u8], f: impl FnOnce(&str) -> R) -> R {
        let text = self.scanned_text(bytes);
        if self.normalizing == Normalizing::None {
            return f(text);
        }
        let mut buf = self.buf.lock();
        buf.reset();
        fold_into(text, self.normalizing, self.ascii_fast_path, &mut buf);
        f(decode_prefix(buf.as_bytes()))
    }

    /// Call `f` with the index and folded text of every word in the scanned
    /// part of `bytes`
    ///
    /// Words are split on the source text. Returns the number of words.
    pub(crate) fn for_each_word(&self, bytes: &[u8], mut f: impl FnMut(u32, &str)) -> u32 {
        let text = self.scanned_text(bytes);
        let mut count = 0u32;
        if self.normalizing == Normalizing::None {
            for word in words(text) {
                f(count, word);
                count += 1;
            }
            return count;
        }
        let mut buf = self.buf.lock();
        for word in words(text) {
            buf.reset();
            fold_into(word, self.normalizing, self.ascii_fast_path, &mut buf);
            f(count, decode_prefix(buf.as_bytes()));
            count += 1;
        }
        count
    }

    /// Fold the scanned part of `bytes` and hand the folded codepoints with
    /// their source spans to `f`
    ///
    /// Returns the number of words in the scanned text together with the
    /// result of `f`.
    pub(crate) fn with_folded_chars<R>(
        &self,
        bytes: &[u8],
        skip_unit_separator: bool,
        f: impl FnOnce(&[char], &[FoldSpan]) -> R,
    ) -> (u32, R) {
        let text = self.scanned_text(bytes);
        let mut buf = self.buf.lock();
        buf.reset();
        let mut spans = Vec::with_capacity(text.len());
        let words = fold_spans(text, self.normalizing, skip_unit_separator, &mut buf, &mut spans);
        let folded: Vec<char> = decode_prefix(buf.as_bytes()).chars().collect();
        (words, f(&folded, &spans))
    }
}

// ============================================================================
// FieldSearcher
// ============================================================================

/// Capability interface of all field searchers
pub trait FieldSearcher: Send {
    /// Shared state
    fn base(&self) -> &SearcherBase;

    /// Shared state, mutable
    fn base_mut(&mut self) -> &mut SearcherBase;

    /// Scan one scalar element and record hits
    ///
    /// Returns the number of word positions the element occupies.
    fn on_value(&mut self, value: &FieldValue, element_id: u32) -> u32;

    /// New searcher with the same configuration and no bound terms
    fn duplicate(&self) -> Box<dyn FieldSearcher>;

    /// Field this searcher scans
    fn field(&self) -> FieldId {
        self.base().field
    }

    /// Bind `terms` for the coming searches
    fn prepare(&mut self, terms: &QueryTermList, buf: &SharedSearcherBuf) {
        self.base_mut().prepare(terms, buf);
    }

    /// Search the searcher's field of `doc`
    ///
    /// Returns false if the document has no value for the field, in which
    /// case no term is touched.
    fn search(&mut self, doc: &Document) -> bool {
        match doc.field(self.field()) {
            Some(value) => {
                self.search_value(value);
                true
            }
            None => false,
        }
    }

    /// Search a field value directly
    fn search_value(&mut self, value: &FieldValue) {
        let field = self.field();
        let offsets: Vec<usize> = self
            .base()
            .terms
            .iter()
            .map(|bt| {
                bt.term.resize_field_id(field);
                bt.term.hit_count()
            })
            .collect();

        self.base_mut().words = 0;
        for (element_id, element) in value.elements().enumerate() {
            let words = self.on_value(element, element_id as u32);
            self.base_mut().words += words;
        }

        let base = self.base();
        for (bt, offset) in base.terms.iter().zip(offsets) {
            let hit_count = bt.term.hit_count() - offset;
            let hit_offset = if hit_count == 0 { 0 } else { offset };
            bt.term.set_field_info(
                field,
                FieldInfo::new(hit_offset as u32, hit_count as u32, base.words),
            );
        }
        tracing::trace!(
            target: "vsm::search",
            field,
            words = base.words,
            "Searched field value"
        );
    }

    /// Configured match type
    fn match_type(&self) -> MatchType {
        self.base().match_type
    }

    /// Change the match type
    fn set_match_type(&mut self, match_type: MatchType) {
        self.base_mut().match_type = match_type;
    }

    /// Check if the searcher matches substrings
    fn is_substring(&self) -> bool {
        self.match_type() == MatchType::Substring
    }

    /// Case folding applied before comparison
    fn normalizing(&self) -> Normalizing {
        self.base().normalizing
    }

    /// Change case folding; affects terms bound by later `prepare` calls
    fn set_normalizing(&mut self, normalizing: Normalizing) {
        self.base_mut().normalizing = normalizing;
    }

    /// Number of bytes scanned per element
    fn max_field_length(&self) -> usize {
        self.base().max_field_length
    }

    /// Change the number of bytes scanned per element
    fn set_max_field_length(&mut self, max_field_length: usize) {
        self.base_mut().max_field_length = max_field_length;
    }

    /// Terms bound by the last `prepare`
    fn query_terms(&self) -> &[BoundTerm] {
        &self.base().terms
    }
}

impl std::fmt::Debug for dyn FieldSearcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FieldSearcher")
            .field("field", &self.field())
            .field("match_type", &self.match_type())
            .field("max_field_length", &self.max_field_length())
            .finish()
    }
}
