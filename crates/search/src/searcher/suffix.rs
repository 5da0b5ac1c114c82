//! Suffix searcher

use super::strchr::scan_words;
use super::{FieldSearcher, MatchType, SearcherBase};
use crate::text::{match_term_suffix, Normalizing};
use vsm_core::{FieldId, FieldValue};

/// Matches words ending with a term
#[derive(Debug)]
pub struct Utf8SuffixStringFieldSearcher {
    base: SearcherBase,
}

impl Utf8SuffixStringFieldSearcher {
    /// Create a suffix searcher for `field`
    pub fn new(field: FieldId) -> Self {
        Utf8SuffixStringFieldSearcher {
            base: SearcherBase::new(field, MatchType::Suffix, Normalizing::Lowercase),
        }
    }
}

impl FieldSearcher for Utf8SuffixStringFieldSearcher {
    fn base(&self) -> &SearcherBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut SearcherBase {
        &mut self.base
    }

    fn on_value(&mut self, value: &FieldValue, element_id: u32) -> u32 {
        match value.as_bytes() {
            Some(bytes) => scan_words(&self.base, bytes, element_id, |bt, word| {
                match_term_suffix(&bt.chars, word)
            }),
            None => 0,
        }
    }

    fn duplicate(&self) -> Box<dyn FieldSearcher> {
        Box::new(Utf8SuffixStringFieldSearcher {
            base: self.base.duplicate(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::super::test_util::*;
    use super::*;

    const OPERATORS: &str = "operators and operator overloading";

    #[test]
    fn test_suffix_positions() {
        let mut fs = Utf8SuffixStringFieldSearcher::new(0);
        assert!(string_hits(&mut fs, "rsand", OPERATORS).is_empty());
        assert_eq!(string_hits(&mut fs, "tor", OPERATORS), vec![2]);
        assert_eq!(string_hits(&mut fs, "tors", OPERATORS), vec![0]);
        assert_eq!(string_hits(&mut fs, "TORS", OPERATORS), vec![0]);
    }

    #[test]
    fn test_multiple_terms() {
        let mut fs = Utf8SuffixStringFieldSearcher::new(0);
        let value = FieldValue::string(OPERATORS);
        assert_eq!(hits(&mut fs, &["an", "din"], &value), vec![vec![], vec![]]);
        assert_eq!(hits(&mut fs, &["nd", "g"], &value), vec![vec![1], vec![3]]);
    }

    #[test]
    fn test_field_info() {
        check_string_field_info(&mut Utf8SuffixStringFieldSearcher::new(0));
    }
}
