//! Substring searcher that annotates matches
//!
//! Besides recording hits like a substring searcher, the modifier writes a
//! copy of each scanned element into its modified buffer with every match
//! wrapped in unit separators:
//!
//! ```text
//! term "o", value "foo"  ->  "f" 0x1F "o" 0x1F 0x1F "o" 0x1F
//! ```
//!
//! Unit separators already present in the value are ignored while matching,
//! so a match may span one; inside a match they are dropped from the output.
//! When two matches overlap only the first is annotated, but both are
//! counted as hits.

use crate::searcher::{FieldSearcher, MatchType, SearcherBase};
use crate::text::{Normalizing, UNIT_SEPARATOR};
use vsm_core::{FieldId, FieldValue, SearcherBuf, SharedSearcherBuf, DEFAULT_BUF_CAPACITY};

/// Substring searcher producing an annotated copy of the scanned text
#[derive(Debug)]
pub struct Utf8SubstringSnippetModifier {
    base: SearcherBase,
    modified: SharedSearcherBuf,
}

impl Utf8SubstringSnippetModifier {
    /// Create a modifier for `field` with its own modified buffer
    pub fn new(field: FieldId) -> Self {
        Self::with_modified_buf(field, SearcherBuf::shared(DEFAULT_BUF_CAPACITY))
    }

    /// Create a modifier writing its annotated copies into `modified`
    ///
    /// `modified` must not be the scratch buffer later passed to `prepare`;
    /// both are locked during a scan.
    pub fn with_modified_buf(field: FieldId, modified: SharedSearcherBuf) -> Self {
        Utf8SubstringSnippetModifier {
            base: SearcherBase::new(field, MatchType::Substring, Normalizing::Lowercase),
            modified,
        }
    }

    /// Buffer holding the annotated copy of the last scanned element
    pub fn modified_buf(&self) -> &SharedSearcherBuf {
        &self.modified
    }
}

impl FieldSearcher for Utf8SubstringSnippetModifier {
    fn base(&self) -> &SearcherBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut SearcherBase {
        &mut self.base
    }

    fn on_value(&mut self, value: &FieldValue, element_id: u32) -> u32 {
        let mut out = self.modified.lock();
        out.reset();
        let Some(bytes) = value.as_bytes() else {
            return 0;
        };
        let base = &self.base;
        let (words, read) = base.with_folded_chars(bytes, true, |folded, spans| {
            let mut read = 0;
            for i in 0..folded.len() {
                for bt in base.terms.iter().filter(|bt| !bt.is_empty()) {
                    if !folded[i..].starts_with(&bt.chars) {
                        continue;
                    }
                    bt.term.add_hit(base.hit(element_id, spans[i].word));
                    let start = spans[i].start;
                    let end = spans[i + bt.chars.len() - 1].end;
                    if start < read {
                        continue;
                    }
                    out.put(&bytes[read..start]);
                    out.put_byte(UNIT_SEPARATOR);
                    for &b in bytes[start..end].iter().filter(|&&b| b != UNIT_SEPARATOR) {
                        out.put_byte(b);
                    }
                    out.put_byte(UNIT_SEPARATOR);
                    read = end;
                }
            }
            read
        });
        out.put(&bytes[read..]);
        words
    }

    fn duplicate(&self) -> Box<dyn FieldSearcher> {
        Box::new(Utf8SubstringSnippetModifier {
            base: self.base.duplicate(),
            modified: SearcherBuf::shared(DEFAULT_BUF_CAPACITY),
        })
    }
}
