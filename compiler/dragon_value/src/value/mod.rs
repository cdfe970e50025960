//! Runtime values for the DragonLisp interpreter.
//!
//! A `Value` is either a `Scalar` (`NIL`, `T`, integer, float, string) or an
//! `ArrayValue` of scalars. Equality is tag + payload: `1` and `1.0` are
//! different values. Ordering is only defined between numbers.

mod array;

use std::cmp::Ordering;
use std::fmt;

use dragon_ir::Literal;

use crate::errors::{integer_overflow, type_mismatch, EvalError};

pub use array::ArrayValue;

/// Scalar value. Exactly one tag is active.
#[derive(Clone, Debug, PartialEq)]
pub enum Scalar {
    /// The false / empty constant.
    Nil,
    /// The true constant.
    T,
    Int(i64),
    Float(f64),
    Str(String),
}

/// Numeric view of a scalar, used for int/float coercion.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum Numeric {
    Int(i64),
    Float(f64),
}

impl Numeric {
    /// Promote to float.
    #[inline]
    #[expect(
        clippy::cast_precision_loss,
        reason = "int-to-float promotion is the language's coercion rule"
    )]
    pub fn to_f64(self) -> f64 {
        match self {
            Numeric::Int(n) => n as f64,
            Numeric::Float(f) => f,
        }
    }

    #[inline]
    pub fn is_float(self) -> bool {
        matches!(self, Numeric::Float(_))
    }

    /// Compare two numbers, promoting to float when the tags differ.
    ///
    /// `None` only when a float comparison involves NaN.
    pub fn compare(self, other: Numeric) -> Option<Ordering> {
        match (self, other) {
            (Numeric::Int(a), Numeric::Int(b)) => Some(a.cmp(&b)),
            (a, b) => a.to_f64().partial_cmp(&b.to_f64()),
        }
    }
}

impl From<Numeric> for Scalar {
    fn from(n: Numeric) -> Self {
        match n {
            Numeric::Int(i) => Scalar::Int(i),
            Numeric::Float(f) => Scalar::Float(f),
        }
    }
}

impl Scalar {
    /// `T` for `true`, `NIL` for `false`.
    #[inline]
    pub fn bool(value: bool) -> Self {
        if value {
            Scalar::T
        } else {
            Scalar::Nil
        }
    }

    #[inline]
    pub fn is_nil(&self) -> bool {
        matches!(self, Scalar::Nil)
    }

    #[inline]
    pub fn is_int(&self) -> bool {
        matches!(self, Scalar::Int(_))
    }

    #[inline]
    pub fn is_float(&self) -> bool {
        matches!(self, Scalar::Float(_))
    }

    #[inline]
    pub fn is_numeric(&self) -> bool {
        matches!(self, Scalar::Int(_) | Scalar::Float(_))
    }

    #[inline]
    pub fn as_int(&self) -> Option<i64> {
        match self {
            Scalar::Int(n) => Some(*n),
            _ => None,
        }
    }

    #[inline]
    pub fn as_numeric(&self) -> Option<Numeric> {
        match self {
            Scalar::Int(n) => Some(Numeric::Int(*n)),
            Scalar::Float(f) => Some(Numeric::Float(*f)),
            _ => None,
        }
    }

    /// Name of the active tag, for error messages.
    pub fn type_name(&self) -> &'static str {
        match self {
            Scalar::Nil => "NIL",
            Scalar::T => "T",
            Scalar::Int(_) => "integer",
            Scalar::Float(_) => "float",
            Scalar::Str(_) => "string",
        }
    }

    fn numeric_for(&self, operator: &'static str) -> Result<Numeric, EvalError> {
        self.as_numeric()
            .ok_or_else(|| type_mismatch(operator, "number", self.type_name()))
    }

    /// Numeric `<`. Fails on non-numeric operands.
    pub fn numeric_lt(&self, other: &Scalar) -> Result<bool, EvalError> {
        let (a, b) = (self.numeric_for("<")?, other.numeric_for("<")?);
        Ok(a.compare(b) == Some(Ordering::Less))
    }

    /// Numeric `<=`. Fails on non-numeric operands.
    pub fn numeric_le(&self, other: &Scalar) -> Result<bool, EvalError> {
        let (a, b) = (self.numeric_for("<=")?, other.numeric_for("<=")?);
        Ok(matches!(
            a.compare(b),
            Some(Ordering::Less | Ordering::Equal)
        ))
    }

    /// Add 1 in place.
    pub fn increment(&mut self) -> Result<(), EvalError> {
        match self {
            Scalar::Int(n) => {
                *n = n.checked_add(1).ok_or_else(|| integer_overflow("increment"))?;
                Ok(())
            }
            Scalar::Float(f) => {
                *f += 1.0;
                Ok(())
            }
            other => Err(type_mismatch("increment", "number", other.type_name())),
        }
    }

    /// Subtract 1 in place.
    pub fn decrement(&mut self) -> Result<(), EvalError> {
        match self {
            Scalar::Int(n) => {
                *n = n.checked_sub(1).ok_or_else(|| integer_overflow("decrement"))?;
                Ok(())
            }
            Scalar::Float(f) => {
                *f -= 1.0;
                Ok(())
            }
            other => Err(type_mismatch("decrement", "number", other.type_name())),
        }
    }
}

impl From<&Literal> for Scalar {
    fn from(literal: &Literal) -> Self {
        match literal {
            Literal::Nil => Scalar::Nil,
            Literal::T => Scalar::T,
            Literal::Int(n) => Scalar::Int(*n),
            Literal::Float(f) => Scalar::Float(*f),
            Literal::Str(s) => Scalar::Str(s.clone()),
        }
    }
}

impl fmt::Display for Scalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Scalar::Nil => write!(f, "NIL"),
            Scalar::T => write!(f, "T"),
            Scalar::Int(n) => write!(f, "{n}"),
            // Six fractional digits, like C's `%f`
            Scalar::Float(x) => write!(f, "{x:.6}"),
            Scalar::Str(s) => write!(f, "{s}"),
        }
    }
}

/// Runtime value: a scalar or an array of scalars.
#[derive(Clone, Debug, PartialEq)]
pub enum Value {
    Scalar(Scalar),
    Array(ArrayValue),
}

// Factory Methods

impl Value {
    #[inline]
    pub fn nil() -> Self {
        Value::Scalar(Scalar::Nil)
    }

    #[inline]
    pub fn t() -> Self {
        Value::Scalar(Scalar::T)
    }

    #[inline]
    pub fn bool(value: bool) -> Self {
        Value::Scalar(Scalar::bool(value))
    }

    #[inline]
    pub fn int(n: i64) -> Self {
        Value::Scalar(Scalar::Int(n))
    }

    #[inline]
    pub fn float(f: f64) -> Self {
        Value::Scalar(Scalar::Float(f))
    }

    #[inline]
    pub fn string(s: impl Into<String>) -> Self {
        Value::Scalar(Scalar::Str(s.into()))
    }

    /// Fresh array of `len` `NIL` elements.
    #[inline]
    pub fn array(len: usize) -> Self {
        Value::Array(ArrayValue::new(len))
    }
}

impl Value {
    #[inline]
    pub fn is_array(&self) -> bool {
        matches!(self, Value::Array(_))
    }

    /// Independent copy of this value.
    ///
    /// Used whenever a value leaves storage, so later mutation of the copy
    /// never reaches the stored original.
    #[inline]
    #[must_use]
    pub fn copy(&self) -> Value {
        self.clone()
    }

    /// Whether this is the scalar `NIL`. Arrays are never `NIL`.
    #[inline]
    pub fn is_nil(&self) -> bool {
        matches!(self, Value::Scalar(Scalar::Nil))
    }

    /// Truthiness: everything except scalar `NIL`.
    #[inline]
    pub fn is_truthy(&self) -> bool {
        !self.is_nil()
    }

    #[inline]
    pub fn as_scalar(&self) -> Option<&Scalar> {
        match self {
            Value::Scalar(s) => Some(s),
            Value::Array(_) => None,
        }
    }

    #[inline]
    pub fn as_int(&self) -> Option<i64> {
        self.as_scalar().and_then(Scalar::as_int)
    }

    #[inline]
    pub fn as_numeric(&self) -> Option<Numeric> {
        self.as_scalar().and_then(Scalar::as_numeric)
    }

    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Scalar(s) => s.type_name(),
            Value::Array(_) => "array",
        }
    }
}

impl From<Scalar> for Value {
    fn from(scalar: Scalar) -> Self {
        Value::Scalar(scalar)
    }
}

impl From<ArrayValue> for Value {
    fn from(array: ArrayValue) -> Self {
        Value::Array(array)
    }
}

impl From<Numeric> for Value {
    fn from(n: Numeric) -> Self {
        Value::Scalar(n.into())
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Scalar(s) => s.fmt(f),
            Value::Array(a) => a.fmt(f),
        }
    }
}
