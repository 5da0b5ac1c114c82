//! Field search specs
//!
//! A [`FieldSearchSpec`] ties a field id and name to the searcher configured
//! for it. [`FieldSearchSpecMap`] holds the specs of all fields together with
//! the index to field mapping and builds the prepared searchers of a query.
//!
//! ## Search methods
//!
//! | Method | Searcher |
//! |--------|----------|
//! | `UTF8` | UTF-8 word searcher, or by `arg1` |
//! | `ASCII`, `AUTOUTF8`, `SSE2UTF8` | fast word searcher, or by `arg1` |
//! | `INT8` .. `INT64` | integer searcher |
//! | `FLOAT`, `DOUBLE` | floating point searcher |
//! | `NONE` | no searcher, the spec is not valid |
//!
//! Text methods honor `arg1`: `substring`, `suffix`, `exact` select those
//! searchers and `prefix` switches the word searcher to prefix matching.

use crate::config::VsmFieldsConfig;
use crate::searcher::{
    DoubleFieldSearcher, FUtf8StrChrFieldSearcher, FieldSearcher, FloatFieldSearcher,
    IntFieldSearcher, MatchType, Utf8ExactStringFieldSearcher, Utf8StrChrFieldSearcher,
    Utf8SubStringFieldSearcher, Utf8SuffixStringFieldSearcher, DEFAULT_MAX_FIELD_LENGTH,
};
use std::collections::{btree_map, BTreeMap, HashMap};
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;
use vsm_core::{Document, Error, FieldId, QueryTermList, Result, SharedSearcherBuf};

pub use vsm_core::strip_non_fields;

/// Specs keyed by field id
pub type FieldSearchSpecMapT = BTreeMap<FieldId, FieldSearchSpec>;

/// Index name to the ids of the fields it covers
pub type IndexFieldMap = BTreeMap<String, Vec<FieldId>>;

// ============================================================================
// SearchMethod
// ============================================================================

/// Search method named by a field spec
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SearchMethod {
    /// Field is not searched
    #[default]
    None,
    /// ASCII text
    Ascii,
    /// UTF-8 text
    Utf8,
    /// UTF-8 text, implementation chosen automatically
    AutoUtf8,
    /// UTF-8 text, vectorized implementation
    Sse2Utf8,
    /// 8-bit integer
    Int8,
    /// 16-bit integer
    Int16,
    /// 32-bit integer
    Int32,
    /// 64-bit integer
    Int64,
    /// 32-bit floating point
    Float,
    /// 64-bit floating point
    Double,
}

impl SearchMethod {
    /// Configuration name of the method
    pub fn as_str(&self) -> &'static str {
        match self {
            SearchMethod::None => "NONE",
            SearchMethod::Ascii => "ASCII",
            SearchMethod::Utf8 => "UTF8",
            SearchMethod::AutoUtf8 => "AUTOUTF8",
            SearchMethod::Sse2Utf8 => "SSE2UTF8",
            SearchMethod::Int8 => "INT8",
            SearchMethod::Int16 => "INT16",
            SearchMethod::Int32 => "INT32",
            SearchMethod::Int64 => "INT64",
            SearchMethod::Float => "FLOAT",
            SearchMethod::Double => "DOUBLE",
        }
    }

    /// Check if this method searches text
    pub fn is_text(&self) -> bool {
        matches!(
            self,
            SearchMethod::Ascii | SearchMethod::Utf8 | SearchMethod::AutoUtf8 | SearchMethod::Sse2Utf8
        )
    }
}

impl FromStr for SearchMethod {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Ok(match s.to_ascii_uppercase().as_str() {
            "NONE" => SearchMethod::None,
            "ASCII" => SearchMethod::Ascii,
            "UTF8" => SearchMethod::Utf8,
            "AUTOUTF8" => SearchMethod::AutoUtf8,
            "SSE2UTF8" => SearchMethod::Sse2Utf8,
            "INT8" => SearchMethod::Int8,
            "INT16" => SearchMethod::Int16,
            "INT32" => SearchMethod::Int32,
            "INT64" => SearchMethod::Int64,
            "FLOAT" => SearchMethod::Float,
            "DOUBLE" => SearchMethod::Double,
            _ => return Err(Error::UnknownSearchMethod(s.to_string())),
        })
    }
}

impl fmt::Display for SearchMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

fn create_searcher(id: FieldId, method: SearchMethod, arg1: &str) -> Option<Box<dyn FieldSearcher>> {
    let searcher: Box<dyn FieldSearcher> = match method {
        SearchMethod::None => return None,
        SearchMethod::Int8 | SearchMethod::Int16 | SearchMethod::Int32 | SearchMethod::Int64 => {
            Box::new(IntFieldSearcher::new(id))
        }
        SearchMethod::Float => Box::new(FloatFieldSearcher::new(id)),
        SearchMethod::Double => Box::new(DoubleFieldSearcher::new(id)),
        SearchMethod::Ascii | SearchMethod::Utf8 | SearchMethod::AutoUtf8 | SearchMethod::Sse2Utf8 => {
            match arg1 {
                "substring" => Box::new(Utf8SubStringFieldSearcher::new(id)),
                "suffix" => Box::new(Utf8SuffixStringFieldSearcher::new(id)),
                "exact" => Box::new(Utf8ExactStringFieldSearcher::new(id)),
                _ => {
                    let mut searcher: Box<dyn FieldSearcher> = if method == SearchMethod::Utf8 {
                        Box::new(Utf8StrChrFieldSearcher::new(id))
                    } else {
                        Box::new(FUtf8StrChrFieldSearcher::new(id))
                    };
                    if arg1 == "prefix" {
                        searcher.set_match_type(MatchType::Prefix);
                    }
                    searcher
                }
            }
        }
    };
    Some(searcher)
}

// ============================================================================
// FieldSearchSpec
// ============================================================================

/// Search configuration of one field
#[derive(Debug)]
pub struct FieldSearchSpec {
    id: FieldId,
    name: String,
    max_length: usize,
    method: SearchMethod,
    arg1: String,
    searcher: Option<Box<dyn FieldSearcher>>,
}

impl Default for FieldSearchSpec {
    fn default() -> Self {
        FieldSearchSpec {
            id: 0,
            name: String::new(),
            max_length: DEFAULT_MAX_FIELD_LENGTH,
            method: SearchMethod::None,
            arg1: String::new(),
            searcher: None,
        }
    }
}

impl Clone for FieldSearchSpec {
    fn clone(&self) -> Self {
        FieldSearchSpec {
            id: self.id,
            name: self.name.clone(),
            max_length: self.max_length,
            method: self.method,
            arg1: self.arg1.clone(),
            searcher: self.searcher.as_ref().map(|s| s.duplicate()),
        }
    }
}

impl FieldSearchSpec {
    /// Create the spec of field `id`
    ///
    /// # Example
    ///
    /// ```
    /// use vsm_search::field_search_spec::{FieldSearchSpec, SearchMethod};
    /// use vsm_search::searcher::FieldSearcher;
    ///
    /// let spec = FieldSearchSpec::new(7, "f0", SearchMethod::AutoUtf8, "substring", 789);
    /// assert!(spec.valid());
    /// assert!(spec.is_substring());
    /// assert_eq!(spec.searcher().unwrap().max_field_length(), 789);
    /// ```
    pub fn new(
        id: FieldId,
        name: impl Into<String>,
        method: SearchMethod,
        arg1: &str,
        max_length: usize,
    ) -> Self {
        let mut searcher = create_searcher(id, method, arg1);
        if let Some(s) = searcher.as_mut() {
            s.set_max_field_length(max_length);
        }
        FieldSearchSpec {
            id,
            name: name.into(),
            max_length,
            method,
            arg1: arg1.to_string(),
            searcher,
        }
    }

    /// Field id
    pub fn id(&self) -> FieldId {
        self.id
    }

    /// Field name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Bytes scanned per element
    pub fn max_length(&self) -> usize {
        self.max_length
    }

    /// Configured search method
    pub fn search_method(&self) -> SearchMethod {
        self.method
    }

    /// Match mode argument of text methods
    pub fn arg1(&self) -> &str {
        &self.arg1
    }

    /// Configured searcher, `None` for invalid specs
    pub fn searcher(&self) -> Option<&dyn FieldSearcher> {
        self.searcher.as_deref()
    }

    /// Configured searcher, mutable
    pub fn searcher_mut(&mut self) -> Option<&mut (dyn FieldSearcher + 'static)> {
        self.searcher.as_deref_mut()
    }

    /// Check if the spec has a searcher
    pub fn valid(&self) -> bool {
        self.searcher.is_some()
    }

    /// Check if the field is searched by substring
    pub fn is_substring(&self) -> bool {
        self.searcher().is_some_and(|s| s.is_substring())
    }
}

// ============================================================================
// FieldSearcherMap
// ============================================================================

/// Prepared searchers of one query, keyed by field id
#[derive(Debug, Default)]
pub struct FieldSearcherMap {
    searchers: BTreeMap<FieldId, Box<dyn FieldSearcher>>,
}

impl FieldSearcherMap {
    /// Searcher of `field`
    pub fn get(&self, field: FieldId) -> Option<&dyn FieldSearcher> {
        self.searchers.get(&field).map(|s| s.as_ref())
    }

    /// Iterate over prepared searchers in field order
    pub fn iter(&self) -> btree_map::Iter<'_, FieldId, Box<dyn FieldSearcher>> {
        self.searchers.iter()
    }

    /// Number of prepared searchers
    pub fn len(&self) -> usize {
        self.searchers.len()
    }

    /// Check if no field is searched
    pub fn is_empty(&self) -> bool {
        self.searchers.is_empty()
    }

    /// Run every searcher over `doc`
    ///
    /// Returns the number of searched fields present in the document.
    pub fn search(&mut self, doc: &Document) -> usize {
        self.searchers
            .values_mut()
            .map(|s| s.search(doc))
            .filter(|&found| found)
            .count()
    }
}

// ============================================================================
// FieldSearchSpecMap
// ============================================================================

/// Specs of all fields plus the index to field mapping
#[derive(Debug, Clone, Default)]
pub struct FieldSearchSpecMap {
    specs: FieldSearchSpecMapT,
    index_map: IndexFieldMap,
    names: HashMap<String, FieldId>,
}

impl FieldSearchSpecMap {
    /// Create an empty map
    pub fn new() -> Self {
        Self::default()
    }

    /// Build specs and index mapping from configuration
    ///
    /// # Errors
    ///
    /// - [`Error::UnknownSearchMethod`] for an unsupported method
    /// - [`Error::InvalidConfig`] for duplicate field or index names
    /// - [`Error::UnknownField`] for an index naming an undeclared field
    pub fn from_config(config: &VsmFieldsConfig) -> Result<Self> {
        let mut map = FieldSearchSpecMap::new();
        for (i, fs) in config.field_specs.iter().enumerate() {
            let method: SearchMethod = fs.searchmethod.parse()?;
            let name = strip_non_fields(&fs.name);
            if map.names.contains_key(&name) {
                return Err(Error::invalid_config(format!("duplicate field '{}'", name)));
            }
            map.insert_spec(FieldSearchSpec::new(i as FieldId, name, method, &fs.arg1, fs.maxlength));
        }
        for index in &config.indexes {
            if map.index_map.contains_key(&index.name) {
                return Err(Error::invalid_config(format!("duplicate index '{}'", index.name)));
            }
            let mut fields = Vec::with_capacity(index.fields.len());
            for name in &index.fields {
                match map.field_id(name) {
                    Some(id) => fields.push(id),
                    None => {
                        tracing::warn!(
                            target: "vsm::search",
                            index = %index.name,
                            field = %name,
                            "Index references undeclared field"
                        );
                        return Err(Error::UnknownField(name.clone()));
                    }
                }
            }
            map.index_map.insert(index.name.clone(), fields);
        }
        tracing::debug!(
            target: "vsm::search",
            fields = map.specs.len(),
            indexes = map.index_map.len(),
            "Loaded field search specs"
        );
        Ok(map)
    }

    /// Add or replace a spec
    pub fn insert_spec(&mut self, spec: FieldSearchSpec) {
        self.names.insert(spec.name().to_string(), spec.id());
        self.specs.insert(spec.id(), spec);
    }

    /// Let `index` cover `field`
    pub fn add_index_field(&mut self, index: impl Into<String>, field: FieldId) {
        self.index_map.entry(index.into()).or_default().push(field);
    }

    /// Canonical field name of a configured field path
    pub fn strip_non_fields(path: &str) -> String {
        strip_non_fields(path)
    }

    /// Id of the field a path refers to
    pub fn field_id(&self, path: &str) -> Option<FieldId> {
        self.names.get(&strip_non_fields(path)).copied()
    }

    /// Spec of `field`
    pub fn spec(&self, field: FieldId) -> Option<&FieldSearchSpec> {
        self.specs.get(&field)
    }

    /// All specs
    pub fn specs(&self) -> &FieldSearchSpecMapT {
        &self.specs
    }

    /// Index to field mapping
    pub fn index_map(&self) -> &IndexFieldMap {
        &self.index_map
    }

    /// Fields covered by `index`
    pub fn index_fields(&self, index: &str) -> &[FieldId] {
        self.index_map.get(index).map(Vec::as_slice).unwrap_or_default()
    }

    /// Prepare a searcher for every field a term's index covers
    ///
    /// Each searcher is bound to the terms reaching its field, in query
    /// order. Fields without a valid spec are skipped.
    pub fn build_searcher_map(&self, terms: &QueryTermList, buf: &SharedSearcherBuf) -> FieldSearcherMap {
        let mut field_terms: BTreeMap<FieldId, QueryTermList> = BTreeMap::new();
        for term in terms {
            for &field in self.index_fields(term.index()) {
                let field_list = field_terms.entry(field).or_default();
                if !field_list.iter().any(|t| Arc::ptr_eq(t, term)) {
                    field_list.push(Arc::clone(term));
                }
            }
        }

        let mut map = FieldSearcherMap::default();
        for (field, terms) in field_terms {
            let Some(searcher) = self.spec(field).and_then(FieldSearchSpec::searcher) else {
                continue;
            };
            let mut searcher = searcher.duplicate();
            searcher.prepare(&terms, buf);
            map.searchers.insert(field, searcher);
        }
        map
    }
}
