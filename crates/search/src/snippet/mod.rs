//! Snippet highlighting
//!
//! - `Utf8SubstringSnippetModifier`: substring searcher that also writes an
//!   annotated copy of each scanned element
//! - `SnippetModifier`: turns a whole field value into one annotated string
//! - `SnippetModifierManager`: builds one modifier per field that needs
//!   highlighting for a query
//!
//! Matches are wrapped in [`UNIT_SEPARATOR`](crate::text::UNIT_SEPARATOR)
//! bytes; elements of multi-valued fields are joined with
//! [`RECORD_SEPARATOR`](crate::text::RECORD_SEPARATOR).

mod manager;
mod modifier;
mod searcher;

pub use manager::{SnippetModifierManager, MODIFY_BUF_CAPACITY, VALUE_BUF_CAPACITY};
pub use modifier::SnippetModifier;
pub use searcher::Utf8SubstringSnippetModifier;

use std::collections::btree_map;
use std::collections::BTreeMap;
use vsm_core::{FieldId, FieldValue};

/// Produces a modified copy of a field value
pub trait FieldModifier: Send {
    /// Build the modified value. `value` is left untouched.
    fn modify(&mut self, value: &FieldValue) -> FieldValue;
}

impl<M: FieldModifier + ?Sized> FieldModifier for Box<M> {
    fn modify(&mut self, value: &FieldValue) -> FieldValue {
        (**self).modify(value)
    }
}

/// Field modifiers keyed by field id
#[derive(Debug)]
pub struct FieldModifierMap<M = Box<dyn FieldModifier>> {
    modifiers: BTreeMap<FieldId, M>,
}

impl<M> Default for FieldModifierMap<M> {
    fn default() -> Self {
        FieldModifierMap {
            modifiers: BTreeMap::new(),
        }
    }
}

impl<M> FieldModifierMap<M> {
    /// Create an empty map
    pub fn new() -> Self {
        Self::default()
    }

    /// Register the modifier of `field`, replacing any previous one
    pub fn insert(&mut self, field: FieldId, modifier: M) -> Option<M> {
        self.modifiers.insert(field, modifier)
    }

    /// Modifier of `field`, if the field has one
    pub fn get_modifier(&self, field: FieldId) -> Option<&M> {
        self.modifiers.get(&field)
    }

    /// Modifier of `field`, mutable
    pub fn get_modifier_mut(&mut self, field: FieldId) -> Option<&mut M> {
        self.modifiers.get_mut(&field)
    }

    /// Iterate over (field, modifier) in field order
    pub fn iter(&self) -> btree_map::Iter<'_, FieldId, M> {
        self.modifiers.iter()
    }

    /// Number of fields with a modifier
    pub fn len(&self) -> usize {
        self.modifiers.len()
    }

    /// Check if no field has a modifier
    pub fn is_empty(&self) -> bool {
        self.modifiers.is_empty()
    }

    /// Remove all modifiers
    pub fn clear(&mut self) {
        self.modifiers.clear();
    }
}

impl<M: FieldModifier> FieldModifierMap<M> {
    /// Modify `value` with the modifier of `field`
    ///
    /// Returns `None` if the field has no modifier.
    pub fn modify(&mut self, field: FieldId, value: &FieldValue) -> Option<FieldValue> {
        self.modifiers.get_mut(&field).map(|m| m.modify(value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Upper;

    impl FieldModifier for Upper {
        fn modify(&mut self, value: &FieldValue) -> FieldValue {
            match value.as_bytes() {
                Some(b) => FieldValue::String(b.to_ascii_uppercase()),
                None => value.clone(),
            }
        }
    }

    #[test]
    fn test_boxed_modifiers() {
        let mut map: FieldModifierMap = FieldModifierMap::new();
        map.insert(3, Box::new(Upper));
        assert!(map.get_modifier(3).is_some());
        assert!(map.get_modifier(0).is_none());
        assert_eq!(
            map.modify(3, &FieldValue::string("abc")),
            Some(FieldValue::string("ABC"))
        );
        assert_eq!(map.modify(0, &FieldValue::string("abc")), None);
    }

    #[test]
    fn test_insert_replaces() {
        let mut map: FieldModifierMap<Upper> = FieldModifierMap::new();
        assert!(map.insert(1, Upper).is_none());
        assert!(map.insert(1, Upper).is_some());
        assert_eq!(map.len(), 1);
        map.clear();
        assert!(map.is_empty());
    }
}
