//! Field path canonicalization
//!
//! Configured field paths may address into collections: `f[0]` for an array
//! element, `f{key}` or `f{"some key"}` for a map value. Field search specs
//! are registered on the collection field itself (`f`) or on the map value
//! field (`f.value`), so raw paths are canonicalized before lookup.
//!
//! | Raw path | Canonical |
//! |----------|-----------|
//! | `f` | `f` |
//! | `f[0]` | `f` |
//! | `f[a]` | `f[a]` |
//! | `f{a0}` | `f.value` |
//! | `f{"a 0"}` | `f.value` |
//! | `f{a 0}` | `f{a 0}` |

/// Suffix that replaces a map lookup
pub const MAP_VALUE_SUFFIX: &str = ".value";

/// Strip array indexes and map keys that do not name a field
///
/// # Example
///
/// ```
/// use vsm_core::path::strip_non_fields;
///
/// assert_eq!(strip_non_fields("f[0]"), "f");
/// assert_eq!(strip_non_fields("f{a}"), "f.value");
/// ```
pub fn strip_non_fields(raw: &str) -> String {
    if !raw.contains('[') && !raw.contains('{') {
        return raw.to_string();
    }

    let mut out = String::with_capacity(raw.len());
    let mut i = 0;
    while i < raw.len() {
        let rest = &raw[i..];
        if let Some(len) = map_key_len(rest) {
            out.push_str(MAP_VALUE_SUFFIX);
            i += len;
        } else if let Some(len) = array_index_len(rest) {
            i += len;
        } else {
            // rest is non-empty and i is always on a char boundary
            let c = rest.chars().next().unwrap_or_default();
            out.push(c);
            i += c.len_utf8();
        }
    }
    out
}

/// Length of a `{identifier}` or `{"quoted"}` map key at the start of `s`
fn map_key_len(s: &str) -> Option<usize> {
    let inner = s.strip_prefix('{')?;
    if let Some(quoted) = inner.strip_prefix('"') {
        // Quoted keys extend to the last closing `"}` on the line.
        let line = quoted.split('\n').next().unwrap_or_default();
        let end = line.rfind("\"}")?;
        return Some(2 + end + 2);
    }
    let ident = inner
        .bytes()
        .take_while(|b| b.is_ascii_alphanumeric())
        .count();
    if ident > 0 && inner.as_bytes().get(ident) == Some(&b'}') {
        Some(1 + ident + 1)
    } else {
        None
    }
}

/// Length of a numeric `[N]` array index at the start of `s`
fn array_index_len(s: &str) -> Option<usize> {
    let inner = s.strip_prefix('[')?;
    let digits = inner.bytes().take_while(|b| b.is_ascii_digit()).count();
    if digits > 0 && inner.as_bytes().get(digits) == Some(&b']') {
        Some(1 + digits + 1)
    } else {
        None
    }
}
