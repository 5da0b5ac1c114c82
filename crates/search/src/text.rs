//! UTF-8 text utilities shared by all string searchers
//!
//! - Word splitting: a word is a maximal run of alphanumeric codepoints.
//!   Everything else, underscore included, separates words, and a run of
//!   separators of any length separates exactly once.
//! - Decoding: field bytes are decoded up to the last complete, valid
//!   codepoint; malformed tails are dropped.
//! - Normalization: optional lowercase folding, one codepoint at a time, the
//!   same way for terms and field text. Accented letters are never folded to
//!   their base letter.
//! - Words are split on the source codepoints and folded afterwards, so
//!   folding never changes word boundaries.

use serde::{Deserialize, Serialize};
use vsm_core::SearcherBuf;

/// Marks the start and end of a highlighted match
pub const UNIT_SEPARATOR: u8 = 0x1F;

/// Separates the elements of a multi-valued field in snippet output
pub const RECORD_SEPARATOR: u8 = 0x1E;

/// Case folding applied to field text and term text before comparison
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Normalizing {
    /// Compare codepoints as they are
    None,
    /// Fold both sides to lowercase
    #[default]
    Lowercase,
}

/// Check if a codepoint belongs to a word
#[inline]
pub fn is_word_char(c: char) -> bool {
    c.is_alphanumeric()
}

/// Longest valid UTF-8 prefix of `bytes`
pub fn decode_prefix(bytes: &[u8]) -> &str {
    match std::str::from_utf8(bytes) {
        Ok(s) => s,
        Err(e) => std::str::from_utf8(&bytes[..e.valid_up_to()]).unwrap_or_default(),
    }
}

/// Fold a single codepoint
pub fn fold_char(c: char, normalizing: Normalizing) -> impl Iterator<Item = char> {
    let lower = match normalizing {
        Normalizing::None => None,
        Normalizing::Lowercase => Some(c.to_lowercase()),
    };
    lower
        .into_iter()
        .flatten()
        .chain(std::iter::once(c).filter(move |_| normalizing == Normalizing::None))
}

/// Fold a string codepoint by codepoint
///
/// Unlike `str::to_lowercase` this has no context rules: a word-final `Σ`
/// folds to `σ`, exactly as [`fold_into`] folds field text.
pub fn fold_str(s: &str, normalizing: Normalizing) -> String {
    s.chars().flat_map(|c| fold_char(c, normalizing)).collect()
}

/// Write the folded form of `text` into `out`
///
/// With `ascii_fast_path` set, pure ASCII text is folded byte by byte.
pub fn fold_into(text: &str, normalizing: Normalizing, ascii_fast_path: bool, out: &mut SearcherBuf) {
    out.reserve(text.len());
    match normalizing {
        Normalizing::None => out.put(text.as_bytes()),
        Normalizing::Lowercase if ascii_fast_path && text.is_ascii() => {
            for b in text.bytes() {
                out.put_byte(b.to_ascii_lowercase());
            }
        }
        Normalizing::Lowercase => {
            for c in text.chars() {
                for f in c.to_lowercase() {
                    out.put_char(f);
                }
            }
        }
    }
}

/// Source span and word of one folded codepoint
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FoldSpan {
    /// Byte offset of the source codepoint
    pub start: usize,
    /// Byte offset just past the source codepoint
    pub end: usize,
    /// Index of the source word the codepoint belongs to
    pub word: u32,
}

/// Fold `text` into `out`, recording one [`FoldSpan`] per folded codepoint
///
/// Word indexes come from the source codepoints. With `skip_unit_separator`
/// set, 0x1F codepoints are left out of `out` and `spans`. Returns the number
/// of words in `text`.
pub fn fold_spans(
    text: &str,
    normalizing: Normalizing,
    skip_unit_separator: bool,
    out: &mut SearcherBuf,
    spans: &mut Vec<FoldSpan>,
) -> u32 {
    out.reserve(text.len());
    spans.clear();
    let mut tracker = WordTracker::new();
    for (start, c) in text.char_indices() {
        tracker.feed(c);
        if skip_unit_separator && c as u32 == u32::from(UNIT_SEPARATOR) {
            continue;
        }
        let span = FoldSpan {
            start,
            end: start + c.len_utf8(),
            word: tracker.current(),
        };
        for f in fold_char(c, normalizing) {
            out.put_char(f);
            spans.push(span);
        }
    }
    tracker.count()
}

/// Iterate over the words of `text`
pub fn words(text: &str) -> impl Iterator<Item = &str> {
    text.split(|c: char| !is_word_char(c)).filter(|w| !w.is_empty())
}

/// Count the words in raw field bytes
///
/// # Example
///
/// ```
/// use vsm_search::text::count_words;
///
/// assert_eq!(count_words(b"? foo bar"), 2);
/// assert_eq!(count_words(b""), 0);
/// ```
pub fn count_words(bytes: &[u8]) -> usize {
    words(decode_prefix(bytes)).count()
}

/// Check if `word` ends with `term`, comparing codepoints from the end
///
/// A word shorter than the term never matches; an empty term never matches.
pub fn match_term_suffix(term: &[char], word: &str) -> bool {
    if term.is_empty() {
        return false;
    }
    let mut rev = word.chars().rev();
    term.iter().rev().all(|t| rev.next() == Some(*t))
}

// ============================================================================
// WordTracker
// ============================================================================

/// Tracks which word a scan position belongs to
///
/// Feed every codepoint of the scanned text in order. `current()` is the
/// index of the word containing (or preceding) the last codepoint fed.
#[derive(Debug, Clone, Copy, Default)]
pub struct WordTracker {
    count: u32,
    in_word: bool,
}

impl WordTracker {
    /// Create a tracker positioned before any word
    pub fn new() -> Self {
        WordTracker::default()
    }

    /// Advance past one codepoint
    #[inline]
    pub fn feed(&mut self, c: char) {
        if is_word_char(c) {
            if !self.in_word {
                self.count += 1;
                self.in_word = true;
            }
        } else {
            self.in_word = false;
        }
    }

    /// Index of the current word, 0 before the first word
    #[inline]
    pub fn current(&self) -> u32 {
        self.count.saturating_sub(1)
    }

    /// Number of words seen so far
    pub fn count(&self) -> u32 {
        self.count
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chars(s: &str) -> Vec<char> {
        s.chars().collect()
    }

    #[test]
    fn test_count_words() {
        assert_eq!(count_words(b""), 0);
        assert_eq!(count_words(b"?"), 0);
        assert_eq!(count_words(b"foo"), 1);
        assert_eq!(count_words(b"foo bar"), 2);
        assert_eq!(count_words(b"? foo bar"), 2);
        assert_eq!(count_words(b"foo bar ?"), 2);
    }

    #[test]
    fn test_underscore_runs_separate_once() {
        for text in ["foo_bar", "foo___bar", "foo____________________bar", "__foo__bar__"] {
            let w: Vec<_> = words(text).collect();
            assert_eq!(w, vec!["foo", "bar"], "text {:?}", text);
        }
    }

    #[test]
    fn test_words_unicode() {
        let w: Vec<_> = words("char oe = Ø 石明凱").collect();
        assert_eq!(w, vec!["char", "oe", "Ø", "石明凱"]);
    }

    #[test]
    fn test_decode_prefix_drops_malformed_tail() {
        assert_eq!(decode_prefix(b"abc"), "abc");
        // "hü" truncated in the middle of the two-byte ü
        assert_eq!(decode_prefix(&[b'h', 0xC3]), "h");
        assert_eq!(decode_prefix(&[b'a', 0xFF, b'b']), "a");
    }

    #[test]
    fn test_match_term_suffix() {
        assert!(match_term_suffix(&chars("a"), "vespa"));
        assert!(match_term_suffix(&chars("spa"), "vespa"));
        assert!(match_term_suffix(&chars("vespa"), "vespa"));
        assert!(!match_term_suffix(&chars("vvespa"), "vespa"));
        assert!(!match_term_suffix(&chars("fspa"), "vespa"));
        assert!(!match_term_suffix(&chars("v"), "vespa"));
        assert!(!match_term_suffix(&[], "vespa"));
    }

    #[test]
    fn test_fold_lowercase_keeps_accents() {
        assert_eq!(fold_str("Hütte", Normalizing::Lowercase), "hütte");
        assert_eq!(fold_str("Hütte", Normalizing::None), "Hütte");
        assert_ne!(fold_str("hütte", Normalizing::Lowercase), "hutte");
    }

    #[test]
    fn test_fold_str_has_no_final_sigma_rule() {
        assert_eq!(fold_str("ΟΔΟΣ", Normalizing::Lowercase), "οδοσ");
        let mut buf = SearcherBuf::default();
        fold_into("ΟΔΟΣ", Normalizing::Lowercase, false, &mut buf);
        assert_eq!(decode_prefix(buf.as_bytes()), fold_str("ΟΔΟΣ", Normalizing::Lowercase));
    }

    #[test]
    fn test_fold_spans_keep_source_words() {
        let mut buf = SearcherBuf::default();
        let mut spans = Vec::new();
        // İ folds to two codepoints, the second one not alphanumeric
        let words = fold_spans("İx y", Normalizing::Lowercase, false, &mut buf, &mut spans);
        assert_eq!(words, 2);
        assert_eq!(decode_prefix(buf.as_bytes()), "i\u{307}x y");
        let word_of: Vec<u32> = spans.iter().map(|s| s.word).collect();
        assert_eq!(word_of, vec![0, 0, 0, 0, 1]);
        assert_eq!(spans[0], FoldSpan { start: 0, end: 2, word: 0 });
        assert_eq!(spans[1], spans[0]);
    }

    #[test]
    fn test_fold_spans_skip_unit_separator() {
        let mut buf = SearcherBuf::default();
        let mut spans = Vec::new();
        let words = fold_spans("a\x1Fb", Normalizing::Lowercase, true, &mut buf, &mut spans);
        assert_eq!(buf.as_bytes(), b"ab");
        assert_eq!(spans[1].start, 2);
        assert_eq!(words, 2);
    }

    #[test]
    fn test_fold_char() {
        let lower: String = fold_char('Ø', Normalizing::Lowercase).collect();
        assert_eq!(lower, "ø");
        let same: String = fold_char('Ø', Normalizing::None).collect();
        assert_eq!(same, "Ø");
    }

    #[test]
    fn test_fold_into_ascii_fast_path() {
        let mut buf = SearcherBuf::default();
        fold_into("Road Runner", Normalizing::Lowercase, true, &mut buf);
        assert_eq!(buf.as_bytes(), b"road runner");
        buf.reset();
        fold_into("RØAD", Normalizing::Lowercase, true, &mut buf);
        assert_eq!(decode_prefix(buf.as_bytes()), "røad");
    }

    #[test]
    fn test_word_tracker() {
        let mut t = WordTracker::new();
        let mut positions = Vec::new();
        for c in "  ab_cd e".chars() {
            t.feed(c);
            positions.push(t.current());
        }
        assert_eq!(positions, vec![0, 0, 0, 0, 0, 1, 1, 1, 2]);
        assert_eq!(t.count(), 3);
    }
}
