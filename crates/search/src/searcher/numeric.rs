//! Numeric searchers
//!
//! Terms are parsed into [`NumericRange`] predicates when the searcher is
//! prepared. A term that is not a number never matches. Every element
//! occupies one position, so hit positions are element indexes.

use super::{FieldSearcher, MatchType, SearcherBase};
use crate::text::Normalizing;
use std::fmt::Debug;
use std::str::FromStr;
use vsm_core::{FieldId, FieldValue, NumericRange, QueryTermList, SharedSearcherBuf};

fn on_numeric_value<T: PartialOrd + Copy>(
    base: &SearcherBase,
    ranges: &[Option<NumericRange<T>>],
    value: Option<T>,
    element_id: u32,
) -> u32 {
    if let Some(v) = value {
        for (bt, range) in base.terms.iter().zip(ranges) {
            if range.as_ref().is_some_and(|r| r.matches(v)) {
                bt.term.add_hit(base.hit(element_id, 0));
            }
        }
    }
    1
}

fn parse_ranges<T>(base: &SearcherBase) -> Vec<Option<NumericRange<T>>>
where
    T: FromStr + PartialOrd + Copy,
{
    base.terms
        .iter()
        .map(|bt| bt.term.numeric_range::<T>())
        .collect()
}

// ============================================================================
// IntFieldSearcher
// ============================================================================

/// Matches integral field values against integer terms and ranges
#[derive(Debug)]
pub struct IntFieldSearcher {
    base: SearcherBase,
    ranges: Vec<Option<NumericRange<i64>>>,
}

impl IntFieldSearcher {
    /// Create an integer searcher for `field`
    pub fn new(field: FieldId) -> Self {
        IntFieldSearcher {
            base: SearcherBase::new(field, MatchType::Regular, Normalizing::None),
            ranges: Vec::new(),
        }
    }
}

impl Default for IntFieldSearcher {
    fn default() -> Self {
        Self::new(0)
    }
}

impl FieldSearcher for IntFieldSearcher {
    fn base(&self) -> &SearcherBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut SearcherBase {
        &mut self.base
    }

    fn prepare(&mut self, terms: &QueryTermList, buf: &SharedSearcherBuf) {
        self.base.prepare(terms, buf);
        self.ranges = parse_ranges(&self.base);
    }

    fn on_value(&mut self, value: &FieldValue, element_id: u32) -> u32 {
        on_numeric_value(&self.base, &self.ranges, value.as_i64(), element_id)
    }

    fn duplicate(&self) -> Box<dyn FieldSearcher> {
        Box::new(IntFieldSearcher {
            base: self.base.duplicate(),
            ranges: Vec::new(),
        })
    }
}

// ============================================================================
// FloatFieldSearcherT
// ============================================================================

/// Floating point type a [`FloatFieldSearcherT`] compares in
pub trait FloatValue: FromStr + PartialOrd + Copy + Debug + Send + 'static {
    /// Read a field element as this type
    fn from_field(value: &FieldValue) -> Option<Self>;
}

impl FloatValue for f32 {
    fn from_field(value: &FieldValue) -> Option<Self> {
        value.as_f32()
    }
}

impl FloatValue for f64 {
    fn from_field(value: &FieldValue) -> Option<Self> {
        value.as_f64()
    }
}

/// Matches floating point field values against numeric terms and ranges
#[derive(Debug)]
pub struct FloatFieldSearcherT<T: FloatValue> {
    base: SearcherBase,
    ranges: Vec<Option<NumericRange<T>>>,
}

/// Single precision searcher
pub type FloatFieldSearcher = FloatFieldSearcherT<f32>;

/// Double precision searcher
pub type DoubleFieldSearcher = FloatFieldSearcherT<f64>;

impl<T: FloatValue> FloatFieldSearcherT<T> {
    /// Create a floating point searcher for `field`
    pub fn new(field: FieldId) -> Self {
        FloatFieldSearcherT {
            base: SearcherBase::new(field, MatchType::Regular, Normalizing::None),
            ranges: Vec::new(),
        }
    }
}

impl<T: FloatValue> Default for FloatFieldSearcherT<T> {
    fn default() -> Self {
        Self::new(0)
    }
}

impl<T: FloatValue> FieldSearcher for FloatFieldSearcherT<T> {
    fn base(&self) -> &SearcherBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut SearcherBase {
        &mut self.base
    }

    fn prepare(&mut self, terms: &QueryTermList, buf: &SharedSearcherBuf) {
        self.base.prepare(terms, buf);
        self.ranges = parse_ranges(&self.base);
    }

    fn on_value(&mut self, value: &FieldValue, element_id: u32) -> u32 {
        on_numeric_value(&self.base, &self.ranges, T::from_field(value), element_id)
    }

    fn duplicate(&self) -> Box<dyn FieldSearcher> {
        Box::new(FloatFieldSearcherT::<T> {
            base: self.base.duplicate(),
            ranges: Vec::new(),
        })
    }
}
