//! Operator tags.
//!
//! Every operator family is a closed enum so the evaluator can match on it
//! exhaustively. `as_symbol` returns the source-level spelling used in
//! error messages.

/// Unary operators.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum UnaryOp {
    /// `NOT` - `T` iff the operand is scalar `NIL`.
    Not,
    /// `MAKE-ARRAY` - fresh all-`NIL` array of the given length.
    MakeArray,
    /// `PRINT` - write the operand and a newline, yield the operand.
    Print,
}

impl UnaryOp {
    /// Returns the source-level symbol for this operator.
    pub const fn as_symbol(self) -> &'static str {
        match self {
            Self::Not => "NOT",
            Self::MakeArray => "MAKE-ARRAY",
            Self::Print => "PRINT",
        }
    }
}

/// Strictly two-operand operators.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum BinaryOp {
    // Comparison
    Lt,
    LtEq,
    Gt,
    GtEq,

    // Remainder
    Mod,
    Rem,

    // Bitwise
    LogNor,
}

impl BinaryOp {
    /// Returns the source-level symbol for this operator.
    pub const fn as_symbol(self) -> &'static str {
        match self {
            Self::Lt => "<",
            Self::LtEq => "<=",
            Self::Gt => ">",
            Self::GtEq => ">=",
            Self::Mod => "MOD",
            Self::Rem => "REM",
            Self::LogNor => "LOGNOR",
        }
    }
}

/// Variadic (one or more operands) operators.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum ListOp {
    // Logical (eager: every operand is evaluated)
    And,
    Or,

    // Arithmetic folds
    Add,
    Sub,
    Mul,
    Div,

    // Selection
    Max,
    Min,

    // Equality against the first operand
    Eq,
    NotEq,

    // Bitwise folds
    LogAnd,
    LogIor,
    LogXor,
    LogEqv,
}

impl ListOp {
    /// Returns the source-level symbol for this operator.
    pub const fn as_symbol(self) -> &'static str {
        match self {
            Self::And => "AND",
            Self::Or => "OR",
            Self::Add => "+",
            Self::Sub => "-",
            Self::Mul => "*",
            Self::Div => "/",
            Self::Max => "MAX",
            Self::Min => "MIN",
            Self::Eq => "=",
            Self::NotEq => "/=",
            Self::LogAnd => "LOGAND",
            Self::LogIor => "LOGIOR",
            Self::LogXor => "LOGXOR",
            Self::LogEqv => "LOGEQV",
        }
    }

    /// Whether every operand must be an integer.
    pub const fn is_bitwise(self) -> bool {
        matches!(self, Self::LogAnd | Self::LogIor | Self::LogXor | Self::LogEqv)
    }

    /// Whether the operator selects among its operands by truthiness.
    pub const fn is_logical(self) -> bool {
        matches!(self, Self::And | Self::Or)
    }
}

/// Variable declaration / assignment forms.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum VarOp {
    /// `DEFVAR` - bind in the current scope.
    Defvar,
    /// `SETQ` - re-bind an existing variable.
    Setq,
}

impl VarOp {
    /// Returns the source-level symbol for this operator.
    pub const fn as_symbol(self) -> &'static str {
        match self {
            Self::Defvar => "DEFVAR",
            Self::Setq => "SETQ",
        }
    }
}

/// Forms that operate on an lvalue (identifier or array element).
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum LValueOp {
    Setf,
    Incf,
    Decf,
}

impl LValueOp {
    /// Returns the source-level symbol for this operator.
    pub const fn as_symbol(self) -> &'static str {
        match self {
            Self::Setf => "SETF",
            Self::Incf => "INCF",
            Self::Decf => "DECF",
        }
    }
}
