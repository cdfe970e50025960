//! AST node set.
//!
//! Nodes own their children (`Box<Expr>` / `Vec<Expr>`) and are immutable
//! once built. Function and loop bodies are plain statement lists that the
//! evaluator walks on every call or iteration.

mod operators;

pub use operators::{BinaryOp, LValueOp, ListOp, UnaryOp, VarOp};

use crate::Name;

/// Constant embedded in a literal node.
#[derive(Clone, Debug, PartialEq)]
pub enum Literal {
    Nil,
    T,
    Int(i64),
    Float(f64),
    Str(String),
}

/// Reference to one element of an array variable: `(aref name index)`.
#[derive(Clone, Debug, PartialEq)]
pub struct ArrayRef {
    pub name: Name,
    pub index: Box<Expr>,
}

/// Node kinds that can be both read and written.
#[derive(Clone, Debug, PartialEq)]
pub enum LValue {
    Ident(Name),
    ArrayRef(ArrayRef),
}

/// Expression node.
#[derive(Clone, Debug, PartialEq)]
pub enum Expr {
    /// Constant value.
    Literal(Literal),

    /// Variable read.
    Ident(Name),

    /// Array element read.
    ArrayRef(ArrayRef),

    /// `NOT`, `MAKE-ARRAY`, `PRINT`.
    Unary { op: UnaryOp, operand: Box<Expr> },

    /// Comparison, `MOD`/`REM`, `LOGNOR`.
    Binary {
        op: BinaryOp,
        left: Box<Expr>,
        right: Box<Expr>,
    },

    /// Variadic operator over one or more operands.
    List { op: ListOp, operands: Vec<Expr> },

    /// `DEFVAR` / `SETQ`.
    VarOp {
        op: VarOp,
        name: Name,
        value: Box<Expr>,
    },

    /// `SETF` / `INCF` / `DECF`.
    LValueOp {
        op: LValueOp,
        target: LValue,
        value: Box<Expr>,
    },

    /// Conditional. The else branch may be absent.
    If {
        cond: Box<Expr>,
        then_branch: Box<Expr>,
        else_branch: Option<Box<Expr>>,
    },

    /// `(loop body...)` - runs until a body-level `return`.
    LoopForever { body: Vec<Expr> },

    /// `(loop for var from start to end do body...)`.
    LoopFor {
        var: Name,
        start: Box<Expr>,
        end: Box<Expr>,
        body: Vec<Expr>,
    },

    /// `(dotimes (var count) body...)`.
    LoopDoTimes {
        var: Name,
        count: Box<Expr>,
        body: Vec<Expr>,
    },

    /// Call of a user-defined function.
    Call { func: Name, args: Vec<Expr> },

    /// Early exit from a function or loop body.
    Return(Box<Expr>),
}

impl From<LValue> for Expr {
    fn from(lvalue: LValue) -> Self {
        match lvalue {
            LValue::Ident(name) => Expr::Ident(name),
            LValue::ArrayRef(aref) => Expr::ArrayRef(aref),
        }
    }
}

/// User function definition: `(defun name (params...) body...)`.
#[derive(Clone, Debug, PartialEq)]
pub struct FunctionDef {
    pub name: Name,
    pub params: Vec<Name>,
    pub body: Vec<Expr>,
}

/// One top-level form handed to the interpreter.
#[derive(Clone, Debug, PartialEq)]
pub enum TopLevel {
    /// Evaluated under the program's root scope.
    Expr(Expr),
    /// Registered in the shared function table.
    Function(FunctionDef),
}

impl From<Expr> for TopLevel {
    fn from(expr: Expr) -> Self {
        TopLevel::Expr(expr)
    }
}

impl From<FunctionDef> for TopLevel {
    fn from(def: FunctionDef) -> Self {
        TopLevel::Function(def)
    }
}
