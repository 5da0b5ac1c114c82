//! Core types for VSM field matching
//!
//! This crate defines the foundational types shared by field searchers and
//! snippet modifiers:
//! - FieldValue / Document: typed field values as seen by searchers
//! - QueryTerm: parsed query term with hit and field statistics
//! - Hit, HitList, FieldInfo: per-term match records
//! - SearcherBuf: growable scratch buffer with shared handle
//! - strip_non_fields: field path canonicalization
//! - Error: configuration error hierarchy

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod buffer;
pub mod error;
pub mod path;
pub mod query;
pub mod search_types;
pub mod value;

pub use buffer::{SearcherBuf, SharedSearcherBuf, DEFAULT_BUF_CAPACITY};
pub use error::{Error, Result};
pub use path::strip_non_fields;
pub use query::{NumericRange, QueryTerm, QueryTermList, TermType, DEFAULT_INDEX};
pub use search_types::{FieldId, FieldInfo, Hit, HitList};
pub use value::{Document, FieldValue};
