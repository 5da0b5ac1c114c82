//! Hit and field statistics types
//!
//! This module defines the per-term match records produced by field searchers:
//! - FieldId: numeric identifier of a document field
//! - Hit: a single recorded match position
//! - HitList: ordered hits of one term for one document
//! - FieldInfo: per-field aggregate statistics consumed by ranking
//!
//! These types are read-only for consumers once a search pass is complete.

use serde::{Deserialize, Serialize};

/// Numeric identifier of a document field
pub type FieldId = u32;

// ============================================================================
// Hit
// ============================================================================

/// A single match of a query term within a field
///
/// For string fields `position` is the word index counted cumulatively over
/// all elements of the field. For numeric fields it is the element index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Hit {
    /// Field the hit was recorded in
    pub field_id: FieldId,
    /// Index of the element within a multi-valued field
    pub element_id: u32,
    /// Word or element position
    pub position: u32,
}

impl Hit {
    /// Create a new hit
    pub fn new(field_id: FieldId, element_id: u32, position: u32) -> Self {
        Hit {
            field_id,
            element_id,
            position,
        }
    }

    /// Position of the hit
    pub fn pos(&self) -> u32 {
        self.position
    }
}

/// Ordered hits of one query term, append-only during a search pass
pub type HitList = Vec<Hit>;

// ============================================================================
// FieldInfo
// ============================================================================

/// Per-field statistics of one query term
///
/// `hit_offset` indexes the term's [`HitList`] at the first hit recorded for
/// this field. It is 0 when `hit_count` is 0.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldInfo {
    /// Index of this field's first hit in the term's hit list
    pub hit_offset: u32,
    /// Number of hits in this field
    pub hit_count: u32,
    /// Number of words (or elements) in this field
    pub field_length: u32,
}

impl FieldInfo {
    /// Create field info
    pub fn new(hit_offset: u32, hit_count: u32, field_length: u32) -> Self {
        FieldInfo {
            hit_offset,
            hit_count,
            field_length,
        }
    }
}
