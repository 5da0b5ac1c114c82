//! Field value model
//!
//! This module defines:
//! - FieldValue: typed value stored in a document field slot
//! - Document: field-id indexed collection of values, as seen by searchers
//!
//! ## Value Rules
//!
//! - Strings are raw bytes. They are expected to be UTF-8, but searchers must
//!   cope with malformed input, so nothing here validates them.
//! - Arrays hold scalar elements. Nested arrays are flattened by `elements()`.
//! - Different variants are never equal, `Long(1) != Int(1)`.

use crate::search_types::FieldId;
use serde::{Deserialize, Serialize};

/// Typed value of a document field
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum FieldValue {
    /// 8-bit signed integer
    Byte(i8),
    /// 32-bit signed integer
    Int(i32),
    /// 64-bit signed integer
    Long(i64),
    /// 32-bit floating point
    Float(f32),
    /// 64-bit floating point
    Double(f64),
    /// Raw string bytes, normally UTF-8
    String(Vec<u8>),
    /// Multi-valued field, elements in declaration order
    Array(Vec<FieldValue>),
}

impl FieldValue {
    /// Create a string value from text
    pub fn string(s: impl AsRef<str>) -> Self {
        FieldValue::String(s.as_ref().as_bytes().to_vec())
    }

    /// Create a string value from raw bytes (may be malformed UTF-8)
    pub fn raw_string(bytes: impl Into<Vec<u8>>) -> Self {
        FieldValue::String(bytes.into())
    }

    /// Create an array value
    pub fn array<I>(values: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<FieldValue>,
    {
        FieldValue::Array(values.into_iter().map(Into::into).collect())
    }

    /// Get the type name as a string
    pub fn type_name(&self) -> &'static str {
        match self {
            FieldValue::Byte(_) => "Byte",
            FieldValue::Int(_) => "Int",
            FieldValue::Long(_) => "Long",
            FieldValue::Float(_) => "Float",
            FieldValue::Double(_) => "Double",
            FieldValue::String(_) => "String",
            FieldValue::Array(_) => "Array",
        }
    }

    /// Check if this is a multi-valued field
    pub fn is_array(&self) -> bool {
        matches!(self, FieldValue::Array(_))
    }

    /// Get the encoded bytes if this is a String value
    pub fn as_bytes(&self) -> Option<&[u8]> {
        match self {
            FieldValue::String(b) => Some(b),
            _ => None,
        }
    }

    /// Get the integer value of an integral scalar
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            FieldValue::Byte(v) => Some(i64::from(*v)),
            FieldValue::Int(v) => Some(i64::from(*v)),
            FieldValue::Long(v) => Some(*v),
            _ => None,
        }
    }

    /// Get the value of a floating point scalar as f32
    ///
    /// Doubles are narrowed, integers are not converted.
    pub fn as_f32(&self) -> Option<f32> {
        match self {
            FieldValue::Float(v) => Some(*v),
            FieldValue::Double(v) => Some(*v as f32),
            _ => None,
        }
    }

    /// Get the value of a floating point scalar as f64
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            FieldValue::Float(v) => Some(f64::from(*v)),
            FieldValue::Double(v) => Some(*v),
            _ => None,
        }
    }

    /// Iterate over the scalar elements of this value
    ///
    /// A scalar yields itself once; an array yields its elements in order,
    /// descending into nested arrays.
    pub fn elements(&self) -> Elements<'_> {
        Elements { stack: vec![std::slice::from_ref(self)] }
    }

    /// Number of scalar elements
    pub fn len_elements(&self) -> usize {
        self.elements().count()
    }
}

impl From<&str> for FieldValue {
    fn from(s: &str) -> Self {
        FieldValue::string(s)
    }
}

impl From<String> for FieldValue {
    fn from(s: String) -> Self {
        FieldValue::String(s.into_bytes())
    }
}

impl From<i32> for FieldValue {
    fn from(v: i32) -> Self {
        FieldValue::Int(v)
    }
}

impl From<i64> for FieldValue {
    fn from(v: i64) -> Self {
        FieldValue::Long(v)
    }
}

impl From<f32> for FieldValue {
    fn from(v: f32) -> Self {
        FieldValue::Float(v)
    }
}

impl From<f64> for FieldValue {
    fn from(v: f64) -> Self {
        FieldValue::Double(v)
    }
}

/// Depth-first iterator over scalar elements
pub struct Elements<'a> {
    stack: Vec<&'a [FieldValue]>,
}

impl<'a> Iterator for Elements<'a> {
    type Item = &'a FieldValue;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let top = self.stack.last_mut()?;
            let slice: &'a [FieldValue] = *top;
            match slice.split_first() {
                None => {
                    self.stack.pop();
                }
                Some((first, rest)) => {
                    *top = rest;
                    match first {
                        FieldValue::Array(inner) => self.stack.push(inner),
                        scalar => return Some(scalar),
                    }
                }
            }
        }
    }
}

// ============================================================================
// Document
// ============================================================================

/// A document as presented to field searchers
///
/// Field slots are addressed by field id. Slots that were never set read
/// as missing.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Document {
    fields: Vec<Option<FieldValue>>,
}

impl Document {
    /// Create an empty document
    pub fn new() -> Self {
        Document::default()
    }

    /// Create a document with `count` empty field slots
    pub fn with_field_count(count: usize) -> Self {
        Document { fields: vec![None; count] }
    }

    /// Set the value of a field, growing the slot table as needed
    pub fn set_field(&mut self, id: FieldId, value: FieldValue) {
        let idx = id as usize;
        if idx >= self.fields.len() {
            self.fields.resize(idx + 1, None);
        }
        self.fields[idx] = Some(value);
    }

    /// Builder: set a field
    pub fn with_field(mut self, id: FieldId, value: FieldValue) -> Self {
        self.set_field(id, value);
        self
    }

    /// Get the value of a field
    pub fn field(&self, id: FieldId) -> Option<&FieldValue> {
        self.fields.get(id as usize).and_then(Option::as_ref)
    }

    /// Number of field slots
    pub fn field_count(&self) -> usize {
        self.fields.len()
    }
}
