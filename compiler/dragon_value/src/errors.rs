//! Error types for evaluation.
//!
//! Every evaluation failure is fatal to the top-level form being executed.
//! Errors carry a structured `EvalErrorKind`; the factory functions below
//! are the public way to build them.

use crate::value::Value;
use std::fmt;

/// Result of evaluation.
pub type EvalResult = Result<Value, EvalError>;

/// Typed error category.
///
/// Each variant carries the data needed to render its message, so callers
/// can match on the kind instead of parsing strings.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum EvalErrorKind {
    // Lookup
    #[error("undefined variable: {name}")]
    UndefinedVariable { name: String },
    #[error("undefined function: {name}")]
    UndefinedFunction { name: String },
    #[error("cannot assign to undefined variable: {name}")]
    AssignToUndefined { name: String },

    // Function
    #[error("{name} expects {expected} arguments, got {got}")]
    TooFewArguments {
        name: String,
        expected: usize,
        got: usize,
    },
    #[error("maximum recursion depth exceeded (limit: {depth})")]
    RecursionLimit { depth: usize },

    // Array access
    #[error("variable {name} is not an array")]
    NotAnArray { name: String },
    #[error("array index must be an integer, got {got}")]
    NonIntegerIndex { got: &'static str },
    #[error("index {index} out of range for array of size {size}")]
    IndexOutOfRange { index: i64, size: usize },
    #[error("cannot store an array in an array element")]
    CannotAssignArrayElement,
    #[error("array of size {size} is too large to allocate")]
    ArrayTooLarge { size: u64 },

    // Type/Operator
    #[error("type mismatch in {operator}: expected {expected}, got {got}")]
    TypeMismatch {
        operator: &'static str,
        expected: &'static str,
        got: &'static str,
    },
    #[error("{operator} requires at least one operand")]
    MissingOperands { operator: &'static str },

    // Arithmetic
    #[error("division by zero")]
    DivisionByZero,
    #[error("integer overflow in {operation}")]
    IntegerOverflow { operation: &'static str },
}

/// Snapshot of the user-function frames active when an error occurred.
///
/// Frames are ordered innermost first.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct EvalBacktrace {
    frames: Vec<String>,
}

impl EvalBacktrace {
    /// Create a backtrace from function names, innermost first.
    pub fn new(frames: Vec<String>) -> Self {
        Self { frames }
    }

    pub fn frames(&self) -> &[String] {
        &self.frames
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    pub fn len(&self) -> usize {
        self.frames.len()
    }
}

impl fmt::Display for EvalBacktrace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.frames.is_empty() {
            return Ok(());
        }
        writeln!(f, "call backtrace:")?;
        for (i, frame) in self.frames.iter().enumerate() {
            writeln!(f, "  {i}: {frame}")?;
        }
        Ok(())
    }
}

/// Evaluation error.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("{kind}")]
pub struct EvalError {
    /// Structured error category.
    pub kind: EvalErrorKind,
    /// Call frames active at the error site, if it escaped a function call.
    pub backtrace: Option<EvalBacktrace>,
}

impl EvalError {
    fn from_kind(kind: EvalErrorKind) -> Self {
        Self {
            kind,
            backtrace: None,
        }
    }

    /// Attach a backtrace to this error.
    ///
    /// An existing backtrace is kept: the first capture is the deepest one.
    #[must_use]
    pub fn with_backtrace(mut self, backtrace: EvalBacktrace) -> Self {
        if self.backtrace.is_none() {
            self.backtrace = Some(backtrace);
        }
        self
    }

    #[inline]
    pub fn kind(&self) -> &EvalErrorKind {
        &self.kind
    }
}

impl From<EvalErrorKind> for EvalError {
    fn from(kind: EvalErrorKind) -> Self {
        Self::from_kind(kind)
    }
}

// Lookup Errors

/// Variable read of an unbound name.
#[cold]
pub fn undefined_variable(name: &str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::UndefinedVariable {
        name: name.to_string(),
    })
}

/// Call of an unregistered function.
#[cold]
pub fn undefined_function(name: &str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::UndefinedFunction {
        name: name.to_string(),
    })
}

/// `SETQ` on a name bound nowhere in the scope chain.
#[cold]
pub fn assign_to_undefined(name: &str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::AssignToUndefined {
        name: name.to_string(),
    })
}

// Function Errors

/// Fewer arguments than declared parameters.
#[cold]
pub fn too_few_arguments(name: &str, expected: usize, got: usize) -> EvalError {
    EvalError::from_kind(EvalErrorKind::TooFewArguments {
        name: name.to_string(),
        expected,
        got,
    })
}

/// Call depth exceeded the configured limit.
#[cold]
pub fn recursion_limit_exceeded(depth: usize) -> EvalError {
    EvalError::from_kind(EvalErrorKind::RecursionLimit { depth })
}

// Array Errors

#[cold]
pub fn not_an_array(name: &str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::NotAnArray {
        name: name.to_string(),
    })
}

#[cold]
pub fn non_integer_index(got: &'static str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::NonIntegerIndex { got })
}

#[cold]
pub fn index_out_of_range(index: i64, size: usize) -> EvalError {
    EvalError::from_kind(EvalErrorKind::IndexOutOfRange { index, size })
}

#[cold]
pub fn cannot_assign_array_element() -> EvalError {
    EvalError::from_kind(EvalErrorKind::CannotAssignArrayElement)
}

#[cold]
pub fn array_too_large(size: u64) -> EvalError {
    EvalError::from_kind(EvalErrorKind::ArrayTooLarge { size })
}

// Type/Operator Errors

/// Operand kind does not match what `operator` requires.
#[cold]
pub fn type_mismatch(
    operator: &'static str,
    expected: &'static str,
    got: &'static str,
) -> EvalError {
    EvalError::from_kind(EvalErrorKind::TypeMismatch {
        operator,
        expected,
        got,
    })
}

#[cold]
pub fn missing_operands(operator: &'static str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::MissingOperands { operator })
}

// Arithmetic Errors

#[cold]
pub fn division_by_zero() -> EvalError {
    EvalError::from_kind(EvalErrorKind::DivisionByZero)
}

#[cold]
pub fn integer_overflow(operation: &'static str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::IntegerOverflow { operation })
}
