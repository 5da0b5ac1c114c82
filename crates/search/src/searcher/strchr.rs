//! Word and prefix searchers

use super::{BoundTerm, FieldSearcher, MatchType, SearcherBase};
use crate::text::Normalizing;
use vsm_core::{FieldId, FieldValue};

/// Add a hit for every (word, term) pair accepted by `matches`
///
/// Returns the number of words in the element.
pub(crate) fn scan_words(
    base: &SearcherBase,
    bytes: &[u8],
    element_id: u32,
    matches: impl Fn(&BoundTerm, &str) -> bool,
) -> u32 {
    base.for_each_word(bytes, |i, word| {
        for bt in base.terms.iter().filter(|bt| !bt.is_empty()) {
            if matches(bt, word) {
                bt.term.add_hit(base.hit(element_id, i));
            }
        }
    })
}

/// Word equality, or prefix when the term or the searcher asks for it
pub(crate) fn match_word(bt: &BoundTerm, word: &str, match_type: MatchType) -> bool {
    if bt.term.is_prefix() || match_type == MatchType::Prefix {
        word.starts_with(bt.text.as_str())
    } else {
        word == bt.text
    }
}

fn on_word_value(base: &SearcherBase, value: &FieldValue, element_id: u32) -> u32 {
    let Some(bytes) = value.as_bytes() else {
        return 0;
    };
    let match_type = base.match_type;
    scan_words(base, bytes, element_id, |bt, word| match_word(bt, word, match_type))
}

// ============================================================================
// Utf8StrChrFieldSearcher
// ============================================================================

/// Matches terms against whole words of UTF-8 text
#[derive(Debug)]
pub struct Utf8StrChrFieldSearcher {
    base: SearcherBase,
}

impl Utf8StrChrFieldSearcher {
    /// Create a word searcher for `field`
    pub fn new(field: FieldId) -> Self {
        Utf8StrChrFieldSearcher {
            base: SearcherBase::new(field, MatchType::Regular, Normalizing::Lowercase),
        }
    }
}

impl FieldSearcher for Utf8StrChrFieldSearcher {
    fn base(&self) -> &SearcherBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut SearcherBase {
        &mut self.base
    }

    fn on_value(&mut self, value: &FieldValue, element_id: u32) -> u32 {
        on_word_value(&self.base, value, element_id)
    }

    fn duplicate(&self) -> Box<dyn FieldSearcher> {
        Box::new(Utf8StrChrFieldSearcher {
            base: self.base.duplicate(),
        })
    }
}

// ============================================================================
// FUtf8StrChrFieldSearcher
// ============================================================================

/// Word searcher that folds pure ASCII text byte by byte
///
/// Results are identical to [`Utf8StrChrFieldSearcher`]; text containing
/// non-ASCII codepoints takes the UTF-8 path.
#[derive(Debug)]
pub struct FUtf8StrChrFieldSearcher {
    base: SearcherBase,
}

impl FUtf8StrChrFieldSearcher {
    /// Create a fast word searcher for `field`
    pub fn new(field: FieldId) -> Self {
        FUtf8StrChrFieldSearcher {
            base: SearcherBase::new(field, MatchType::Regular, Normalizing::Lowercase)
                .with_ascii_fast_path(),
        }
    }
}

impl FieldSearcher for FUtf8StrChrFieldSearcher {
    fn base(&self) -> &SearcherBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut SearcherBase {
        &mut self.base
    }

    fn on_value(&mut self, value: &FieldValue, element_id: u32) -> u32 {
        on_word_value(&self.base, value, element_id)
    }

    fn duplicate(&self) -> Box<dyn FieldSearcher> {
        Box::new(FUtf8StrChrFieldSearcher {
            base: self.base.duplicate(),
        })
    }
}
