//! Exact searcher

use super::{BoundTerm, FieldSearcher, MatchType, SearcherBase};
use crate::text::Normalizing;
use vsm_core::{FieldId, FieldValue};

/// Whole value equality, or value prefix for prefix terms
pub(crate) fn match_exact(bt: &BoundTerm, text: &str) -> bool {
    if bt.term.is_prefix() {
        text.starts_with(bt.text.as_str())
    } else {
        text == bt.text
    }
}

/// Matches terms against the complete element value
///
/// Comparison is case sensitive by default. Each element occupies a single
/// position.
#[derive(Debug)]
pub struct Utf8ExactStringFieldSearcher {
    base: SearcherBase,
}

impl Utf8ExactStringFieldSearcher {
    /// Create an exact searcher for `field`
    pub fn new(field: FieldId) -> Self {
        Utf8ExactStringFieldSearcher {
            base: SearcherBase::new(field, MatchType::Exact, Normalizing::None),
        }
    }
}

impl FieldSearcher for Utf8ExactStringFieldSearcher {
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
        base.with_text(bytes, |text| {
            for bt in base.terms.iter().filter(|bt| !bt.is_empty()) {
                if match_exact(bt, text) {
                    bt.term.add_hit(base.hit(element_id, 0));
                }
            }
        });
        1
    }

    fn duplicate(&self) -> Box<dyn FieldSearcher> {
        Box::new(Utf8ExactStringFieldSearcher {
            base: self.base.duplicate(),
        })
    }
}
