//! Flexible searcher
//!
//! Chooses the comparison per term. A term written as a prefix, suffix or
//! substring term is matched that way; a plain word term follows the
//! searcher's match type.

use super::exact::match_exact;
use super::strchr::scan_words;
use super::{BoundTerm, FieldSearcher, MatchType, SearcherBase};
use crate::text::{match_term_suffix, Normalizing};
use vsm_core::{FieldId, FieldValue, TermType};

fn effective_match_type(bt: &BoundTerm, match_type: MatchType) -> MatchType {
    match bt.term.term_type() {
        TermType::Prefix => MatchType::Prefix,
        TermType::Suffix => MatchType::Suffix,
        TermType::Substring => MatchType::Substring,
        TermType::Word => match_type,
    }
}

fn match_flexible(bt: &BoundTerm, word: &str, match_type: MatchType) -> bool {
    match effective_match_type(bt, match_type) {
        MatchType::Regular => word == bt.text,
        MatchType::Prefix => word.starts_with(bt.text.as_str()),
        MatchType::Substring => word.contains(bt.text.as_str()),
        MatchType::Suffix => match_term_suffix(&bt.chars, word),
        MatchType::Exact => false,
    }
}

/// Matches each term with the comparison its type or the searcher selects
#[derive(Debug)]
pub struct Utf8FlexibleStringFieldSearcher {
    base: SearcherBase,
}

impl Utf8FlexibleStringFieldSearcher {
    /// Create a flexible searcher for `field`
    pub fn new(field: FieldId) -> Self {
        Utf8FlexibleStringFieldSearcher {
            base: SearcherBase::new(field, MatchType::Regular, Normalizing::Lowercase),
        }
    }
}

impl FieldSearcher for Utf8FlexibleStringFieldSearcher {
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
        let match_type = base.match_type;
        if match_type != MatchType::Exact {
            return scan_words(base, bytes, element_id, |bt, word| {
                match_flexible(bt, word, match_type)
            });
        }

        // exact for plain terms, word comparisons for the rest
        base.with_text(bytes, |text| {
            for bt in base.terms.iter().filter(|bt| !bt.is_empty()) {
                if bt.term.term_type() == TermType::Word && match_exact(bt, text) {
                    bt.term.add_hit(base.hit(element_id, 0));
                }
            }
        });
        scan_words(base, bytes, element_id, |bt, word| {
            bt.term.term_type() != TermType::Word && match_flexible(bt, word, match_type)
        })
    }

    fn duplicate(&self) -> Box<dyn FieldSearcher> {
        Box::new(Utf8FlexibleStringFieldSearcher {
            base: self.base.duplicate(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::super::test_util::*;
    use super::*;

    #[test]
    fn test_regular() {
        let mut fs = Utf8FlexibleStringFieldSearcher::new(0);
        assert_eq!(string_hits(&mut fs, "vespa", "vespa"), vec![0]);
        assert!(string_hits(&mut fs, "vesp", "vespa").is_empty());
        assert!(string_hits(&mut fs, "esp", "vespa").is_empty());
        assert!(string_hits(&mut fs, "espa", "vespa").is_empty());
    }

    #[test]
    fn test_prefix() {
        let mut fs = Utf8FlexibleStringFieldSearcher::new(0);
        assert_eq!(string_hits(&mut fs, "vesp*", "vespa"), vec![0]);
        fs.set_match_type(MatchType::Prefix);
        assert_eq!(string_hits(&mut fs, "vesp", "vespa"), vec![0]);
    }

    #[test]
    fn test_substring() {
        let mut fs = Utf8FlexibleStringFieldSearcher::new(0);
        assert_eq!(string_hits(&mut fs, "*esp*", "vespa"), vec![0]);
        fs.set_match_type(MatchType::Substring);
        assert_eq!(string_hits(&mut fs, "esp", "vespa"), vec![0]);
    }

    #[test]
    fn test_suffix() {
        let mut fs = Utf8FlexibleStringFieldSearcher::new(0);
        assert_eq!(string_hits(&mut fs, "*espa", "vespa"), vec![0]);
        fs.set_match_type(MatchType::Suffix);
        assert_eq!(string_hits(&mut fs, "espa", "vespa"), vec![0]);
    }

    #[test]
    fn test_exact() {
        let mut fs = Utf8FlexibleStringFieldSearcher::new(0);
        fs.set_match_type(MatchType::Exact);
        assert!(string_hits(&mut fs, "vespa", "vespa search").is_empty());
        assert_eq!(string_hits(&mut fs, "vespa search", "Vespa Search"), vec![0]);
        // explicit term types keep their word comparison
        assert_eq!(string_hits(&mut fs, "sea*", "vespa search"), vec![1]);
    }

    #[test]
    fn test_field_info() {
        check_string_field_info(&mut Utf8FlexibleStringFieldSearcher::new(0));
    }
}
