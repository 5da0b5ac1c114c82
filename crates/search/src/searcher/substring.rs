//! Substring searcher

use super::{BoundTerm, FieldSearcher, MatchType, SearcherBase};
use crate::text::{FoldSpan, Normalizing};
use vsm_core::{FieldId, FieldValue};

/// Scan the folded codepoints for every term, adding a hit at the source
/// word containing the start of each occurrence
///
/// `spans[i]` describes `folded[i]`. With `overlapping` unset the scan
/// resumes after the end of a match.
pub(crate) fn scan_substrings(
    base: &SearcherBase,
    folded: &[char],
    spans: &[FoldSpan],
    element_id: u32,
    overlapping: bool,
) {
    let terms: Vec<&BoundTerm> = base.terms.iter().filter(|bt| !bt.is_empty()).collect();
    let mut i = 0;
    while i < folded.len() {
        let mut next = i + 1;
        for bt in &terms {
            if folded[i..].starts_with(&bt.chars) {
                bt.term.add_hit(base.hit(element_id, spans[i].word));
                if !overlapping {
                    next = i + bt.chars.len();
                }
            }
        }
        i = next;
    }
}

/// Matches terms anywhere in the text, across word boundaries
///
/// A single bound term is matched without overlap: `aa` occurs twice in
/// `aaaa`. Several bound terms are matched at every position.
#[derive(Debug)]
pub struct Utf8SubStringFieldSearcher {
    base: SearcherBase,
}

impl Utf8SubStringFieldSearcher {
    /// Create a substring searcher for `field`
    pub fn new(field: FieldId) -> Self {
        Utf8SubStringFieldSearcher {
            base: SearcherBase::new(field, MatchType::Substring, Normalizing::Lowercase),
        }
    }
}

impl FieldSearcher for Utf8SubStringFieldSearcher {
    fn base(&self) -> &SearcherBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut SearcherBase {
        &mut self.base
    }

    fn on_value(&mut self, value: &FieldValue, element_id: u32) -> u32 {
        let Some(bytes) = value.as_bytes() else {
            return 0;
        };
        let base = &self.base;
        let overlapping = base.terms.len() != 1;
        let (words, ()) = base.with_folded_chars(bytes, false, |folded, spans| {
            scan_substrings(base, folded, spans, element_id, overlapping)
        });
        words
    }

    fn duplicate(&self) -> Box<dyn FieldSearcher> {
        Box::new(Utf8SubStringFieldSearcher {
            base: self.base.duplicate(),
        })
    }
}
