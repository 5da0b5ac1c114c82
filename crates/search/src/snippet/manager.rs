//! Per-query snippet modifier setup

use super::{FieldModifierMap, SnippetModifier, Utf8SubstringSnippetModifier};
use crate::field_search_spec::{FieldSearchSpecMapT, IndexFieldMap};
use crate::searcher::FieldSearcher;
use std::collections::BTreeMap;
use std::sync::Arc;
use vsm_core::{FieldId, QueryTermList, SearcherBuf, SharedSearcherBuf, DEFAULT_BUF_CAPACITY};

/// Initial capacity of the buffer holding one annotated element
pub const MODIFY_BUF_CAPACITY: usize = 64;

/// Initial capacity of the buffer holding one annotated field value
pub const VALUE_BUF_CAPACITY: usize = 128;

/// Owns the snippet modifiers of one query
///
/// All modifiers share the manager's buffers, so the output of a
/// modifier is valid until the next modifier runs.
#[derive(Debug)]
pub struct SnippetModifierManager {
    modifiers: FieldModifierMap<SnippetModifier>,
    modify_buf: SharedSearcherBuf,
    value_buf: SharedSearcherBuf,
    search_buf: SharedSearcherBuf,
}

impl Default for SnippetModifierManager {
    fn default() -> Self {
        SnippetModifierManager {
            modifiers: FieldModifierMap::new(),
            modify_buf: SearcherBuf::shared(MODIFY_BUF_CAPACITY),
            value_buf: SearcherBuf::shared(VALUE_BUF_CAPACITY),
            search_buf: SearcherBuf::shared(DEFAULT_BUF_CAPACITY),
        }
    }
}

impl SnippetModifierManager {
    /// Create a manager with no modifiers
    pub fn new() -> Self {
        Self::default()
    }

    /// Create modifiers for the fields `terms` need highlighted in
    ///
    /// A field gets a term when the term's index covers the field and
    /// either the field is searched by substring or the term is a substring
    /// term. Terms keep their query order. Previous modifiers are dropped.
    pub fn setup(
        &mut self,
        terms: &QueryTermList,
        specs: &FieldSearchSpecMapT,
        index_map: &IndexFieldMap,
    ) {
        self.modifiers.clear();

        let mut field_terms: BTreeMap<FieldId, QueryTermList> = BTreeMap::new();
        for term in terms {
            let Some(fields) = index_map.get(term.index()) else {
                tracing::debug!(
                    target: "vsm::search",
                    index = term.index(),
                    "Index resolves to no fields"
                );
                continue;
            };
            for &field in fields {
                let Some(spec) = specs.get(&field) else {
                    tracing::warn!(
                        target: "vsm::search",
                        field,
                        index = term.index(),
                        "Index references field without search spec"
                    );
                    continue;
                };
                if spec.is_substring() || term.is_substring() {
                    field_terms.entry(field).or_default().push(Arc::clone(term));
                }
            }
        }

        for (field, terms) in field_terms {
            let Some(spec) = specs.get(&field) else {
                continue;
            };
            let mut searcher =
                Utf8SubstringSnippetModifier::with_modified_buf(field, Arc::clone(&self.modify_buf));
            searcher.set_max_field_length(spec.max_length());
            searcher.prepare(&terms, &self.search_buf);
            self.modifiers.insert(
                field,
                SnippetModifier::with_value_buf(searcher, Arc::clone(&self.value_buf)),
            );
        }

        tracing::debug!(
            target: "vsm::search",
            terms = terms.len(),
            modifiers = self.modifiers.len(),
            "Snippet modifiers set up"
        );
    }

    /// Modifiers created by the last `setup`
    pub fn modifiers(&self) -> &FieldModifierMap<SnippetModifier> {
        &self.modifiers
    }

    /// Modifiers created by the last `setup`, mutable
    pub fn modifiers_mut(&mut self) -> &mut FieldModifierMap<SnippetModifier> {
        &mut self.modifiers
    }

    /// Modifier of `field`, if the field needs highlighting
    pub fn get_modifier(&self, field: FieldId) -> Option<&SnippetModifier> {
        self.modifiers.get_modifier(field)
    }

    /// Modifier of `field`, mutable
    pub fn get_modifier_mut(&mut self, field: FieldId) -> Option<&mut SnippetModifier> {
        self.modifiers.get_modifier_mut(field)
    }
}
