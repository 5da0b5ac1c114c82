//! Field modifier producing highlighted snippet text

use super::searcher::Utf8SubstringSnippetModifier;
use super::FieldModifier;
use crate::searcher::FieldSearcher;
use crate::text::RECORD_SEPARATOR;
use vsm_core::{FieldValue, SearcherBuf, SharedSearcherBuf, DEFAULT_BUF_CAPACITY};

/// Builds an annotated string from a field value
///
/// Each string element is run through the wrapped searcher and its annotated
/// copy appended to the value buffer. Elements are separated by the record
/// separator.
#[derive(Debug)]
pub struct SnippetModifier {
    searcher: Utf8SubstringSnippetModifier,
    value_buf: SharedSearcherBuf,
}

impl SnippetModifier {
    /// Wrap a prepared searcher, with a value buffer of its own
    pub fn new(searcher: Utf8SubstringSnippetModifier) -> Self {
        Self::with_value_buf(searcher, SearcherBuf::shared(DEFAULT_BUF_CAPACITY))
    }

    /// Wrap a prepared searcher, building values in `value_buf`
    pub fn with_value_buf(searcher: Utf8SubstringSnippetModifier, value_buf: SharedSearcherBuf) -> Self {
        SnippetModifier {
            searcher,
            value_buf,
        }
    }

    /// The wrapped searcher
    pub fn searcher(&self) -> &Utf8SubstringSnippetModifier {
        &self.searcher
    }

    /// The wrapped searcher, mutable
    pub fn searcher_mut(&mut self) -> &mut Utf8SubstringSnippetModifier {
        &mut self.searcher
    }

    /// Buffer the last modified value was built in
    pub fn value_buf(&self) -> &SharedSearcherBuf {
        &self.value_buf
    }
}

impl FieldModifier for SnippetModifier {
    fn modify(&mut self, value: &FieldValue) -> FieldValue {
        self.searcher.base_mut().words = 0;

        // collected apart from the value buffer, which may be the modified buffer
        let mut annotated = Vec::new();
        let mut first = true;
        for (element_id, element) in value.elements().enumerate() {
            if element.as_bytes().is_none() {
                continue;
            }
            let words = self.searcher.on_value(element, element_id as u32);
            self.searcher.base_mut().words += words;
            if !first {
                annotated.push(RECORD_SEPARATOR);
            }
            first = false;
            annotated.extend_from_slice(self.searcher.modified_buf().lock().as_bytes());
        }

        let mut out = self.value_buf.lock();
        out.reset();
        out.put(&annotated);
        FieldValue::String(annotated)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::searcher::test_util::query;
    use std::sync::Arc;

    fn setup(terms: &[&str]) -> SnippetModifier {
        let mut searcher = Utf8SubstringSnippetModifier::new(0);
        searcher.prepare(&query(terms), &SearcherBuf::shared(32));
        SnippetModifier::new(searcher)
    }

    fn modify(sm: &mut SnippetModifier, value: FieldValue) -> Vec<u8> {
        match sm.modify(&value) {
            FieldValue::String(bytes) => bytes,
            other => panic!("expected string, got {}", other.type_name()),
        }
    }

    fn strings(values: &[&str]) -> FieldValue {
        FieldValue::array(values.iter().copied())
    }

    #[test]
    fn test_string_value_repeated() {
        let mut sm = setup(&["ab"]);
        assert_eq!(modify(&mut sm, FieldValue::string("ab")), b"\x1Fab\x1F");
        assert_eq!(
            modify(&mut sm, FieldValue::string("xxxxabxxxxabxxxx")),
            b"xxxx\x1Fab\x1Fxxxx\x1Fab\x1Fxxxx"
        );
        assert_eq!(modify(&mut sm, FieldValue::string("xxabxx")), b"xx\x1Fab\x1Fxx");
    }

    #[test]
    fn test_array_value() {
        let mut sm = setup(&["ab"]);
        assert_eq!(modify(&mut sm, strings(&["ab"])), b"\x1Fab\x1F");
        assert_eq!(modify(&mut sm, strings(&["xxabxx"])), b"xx\x1Fab\x1Fxx");
        assert_eq!(
            modify(&mut sm, strings(&["ab", "xxabxx", "xxxxxx"])),
            b"\x1Fab\x1F\x1Exx\x1Fab\x1Fxx\x1Exxxxxx"
        );
        assert_eq!(modify(&mut sm, strings(&["cd", "ef", "gh"])), b"cd\x1Eef\x1Egh");
    }

    #[test]
    fn test_input_untouched() {
        let mut sm = setup(&["ab"]);
        let value = FieldValue::string("xxabxx");
        let before = value.clone();
        sm.modify(&value);
        assert_eq!(value, before);
    }

    #[test]
    fn test_value_buf_grows() {
        let mut sm = setup(&["a"]);
        assert_eq!(sm.value_buf().lock().capacity(), 32);
        assert_eq!(sm.value_buf().lock().len(), 0);
        sm.modify(&FieldValue::string("a".repeat(16)));
        let buf = sm.value_buf().lock();
        assert_eq!(buf.len(), 16 + 2 * 16);
        assert!(buf.capacity() >= buf.len());
    }

    #[test]
    fn test_value_buf_shared_with_modified_buf() {
        let shared = SearcherBuf::shared(32);
        let mut searcher = Utf8SubstringSnippetModifier::with_modified_buf(0, Arc::clone(&shared));
        searcher.prepare(&query(&["ab"]), &SearcherBuf::shared(32));
        let mut sm = SnippetModifier::with_value_buf(searcher, Arc::clone(&shared));
        assert_eq!(
            modify(&mut sm, strings(&["ab", "xxabxx"])),
            b"\x1Fab\x1F\x1Exx\x1Fab\x1Fxx"
        );
        assert_eq!(shared.lock().as_bytes(), b"\x1Fab\x1F\x1Exx\x1Fab\x1Fxx");
    }

    #[test]
    fn test_hit_positions_continue_across_elements() {
        let q = query(&["ab"]);
        let mut searcher = Utf8SubstringSnippetModifier::new(0);
        searcher.prepare(&q, &SearcherBuf::shared(32));
        let mut sm = SnippetModifier::new(searcher);
        sm.modify(&strings(&["ab cd", "xx ab"]));
        let positions: Vec<u32> = q[0].hit_list().iter().map(|h| h.pos()).collect();
        assert_eq!(positions, vec![0, 3]);
    }
}
