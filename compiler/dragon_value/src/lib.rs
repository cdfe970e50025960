//! Dragon Value - runtime values and evaluation errors.
//!
//! This crate provides:
//! - `Scalar`, `ArrayValue` and `Value`, the dynamically typed value model
//! - `Numeric`, the int/float view used for coercion
//! - `EvalError` / `EvalErrorKind`, the error taxonomy, with one factory
//!   function per kind
//!
//! Values have plain value semantics: reading a value out of storage clones
//! it (`Value::copy`), so nothing downstream can alias a stored binding.

mod errors;
mod value;

pub use errors::{
    array_too_large, assign_to_undefined, cannot_assign_array_element, division_by_zero,
    index_out_of_range, integer_overflow, missing_operands, non_integer_index, not_an_array,
    recursion_limit_exceeded, too_few_arguments, type_mismatch, undefined_function,
    undefined_variable, EvalBacktrace, EvalError, EvalErrorKind, EvalResult,
};
pub use value::{ArrayValue, Numeric, Scalar, Value};
