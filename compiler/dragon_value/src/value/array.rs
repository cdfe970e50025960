//! Fixed-size arrays of scalars.

use std::fmt;

use super::Scalar;
use crate::errors::{array_too_large, index_out_of_range, EvalError};

/// Fixed-length, mutable, 0-indexed sequence of scalars.
///
/// The length is set at construction and never changes: storage is a boxed
/// slice, and only element-wise mutation is exposed. Elements are scalars,
/// so arrays cannot nest.
#[derive(Clone, Debug, PartialEq)]
pub struct ArrayValue {
    elements: Box<[Scalar]>,
}

impl ArrayValue {
    /// Create an array of `len` `NIL` elements.
    ///
    /// # Panics
    /// Panics if the allocation fails; use `try_new` for sizes that come
    /// from a running program.
    pub fn new(len: usize) -> Self {
        Self {
            elements: vec![Scalar::Nil; len].into_boxed_slice(),
        }
    }

    /// Create an array of `len` `NIL` elements, failing with
    /// `ArrayTooLarge` instead of aborting when the storage cannot be
    /// allocated.
    pub fn try_new(len: usize) -> Result<Self, EvalError> {
        let mut elements = Vec::new();
        elements
            .try_reserve_exact(len)
            .map_err(|_| array_too_large(len as u64))?;
        elements.resize(len, Scalar::Nil);
        Ok(Self {
            elements: elements.into_boxed_slice(),
        })
    }

    /// Create an array from existing elements.
    pub fn from_elements(elements: Vec<Scalar>) -> Self {
        Self {
            elements: elements.into_boxed_slice(),
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.elements.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// Convert a signed index to a slot, rejecting anything outside `0..len`.
    pub fn slot(&self, index: i64) -> Result<usize, EvalError> {
        usize::try_from(index)
            .ok()
            .filter(|&i| i < self.elements.len())
            .ok_or_else(|| index_out_of_range(index, self.elements.len()))
    }

    /// Bounds-checked element read.
    pub fn get(&self, index: i64) -> Result<&Scalar, EvalError> {
        let slot = self.slot(index)?;
        Ok(&self.elements[slot])
    }

    /// Bounds-checked element write.
    pub fn set(&mut self, index: i64, value: Scalar) -> Result<(), EvalError> {
        let slot = self.slot(index)?;
        self.elements[slot] = value;
        Ok(())
    }

    /// The backing elements.
    #[inline]
    pub fn elements(&self) -> &[Scalar] {
        &self.elements
    }

    /// The backing elements, mutably. The length still cannot change.
    #[inline]
    pub fn elements_mut(&mut self) -> &mut [Scalar] {
        &mut self.elements
    }
}

impl fmt::Display for ArrayValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[")?;
        for (i, element) in self.elements.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{element}")?;
        }
        write!(f, "]")
    }
}
