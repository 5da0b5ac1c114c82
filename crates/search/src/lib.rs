//! Field matching and snippet highlighting for streaming search
//!
//! This crate provides:
//! - FieldSearcher trait and the word, prefix, suffix, substring, exact,
//!   flexible and numeric searchers
//! - FieldSearchSpec / FieldSearchSpecMap for per-field searcher setup
//! - VsmFieldsConfig, the TOML field configuration
//! - SnippetModifier and SnippetModifierManager for highlighted snippets
//! - Shared UTF-8 word utilities
//!
//! # Usage
//!
//! ```
//! use std::sync::Arc;
//! use vsm_core::{Document, FieldValue, QueryTerm, SearcherBuf};
//! use vsm_search::{FieldSearcher, Utf8StrChrFieldSearcher};
//!
//! let terms = vec![Arc::new(QueryTerm::parse("oper*"))];
//! let mut searcher = Utf8StrChrFieldSearcher::new(0);
//! searcher.prepare(&terms, &SearcherBuf::shared(32));
//!
//! let doc = Document::new().with_field(0, FieldValue::string("operators and operator"));
//! searcher.search(&doc);
//!
//! let positions: Vec<u32> = terms[0].hit_list().iter().map(|h| h.pos()).collect();
//! assert_eq!(positions, vec![0, 2]);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod config;
pub mod field_search_spec;
pub mod searcher;
pub mod snippet;
pub mod text;

// Re-export commonly used types
pub use config::{FieldSpecConfig, IndexConfig, VsmFieldsConfig};
pub use field_search_spec::{
    FieldSearchSpec, FieldSearchSpecMap, FieldSearchSpecMapT, FieldSearcherMap, IndexFieldMap,
    SearchMethod,
};
pub use searcher::{
    DoubleFieldSearcher, FUtf8StrChrFieldSearcher, FieldSearcher, FloatFieldSearcher,
    FloatFieldSearcherT, IntFieldSearcher, MatchType, Utf8ExactStringFieldSearcher,
    Utf8FlexibleStringFieldSearcher, Utf8StrChrFieldSearcher, Utf8SubStringFieldSearcher,
    Utf8SuffixStringFieldSearcher,
};
pub use snippet::{
    FieldModifier, FieldModifierMap, SnippetModifier, SnippetModifierManager,
    Utf8SubstringSnippetModifier,
};
pub use text::{count_words, Normalizing, RECORD_SEPARATOR, UNIT_SEPARATOR};
