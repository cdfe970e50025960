//! Dragon IR - names and AST nodes for the DragonLisp interpreter.
//!
//! This crate contains the data the evaluator consumes:
//! - `Name` / `StringInterner` for interned identifiers
//! - The closed AST node set (`Expr`, `LValue`, `FunctionDef`, `TopLevel`)
//! - Operator tags (`UnaryOp`, `BinaryOp`, `ListOp`, `VarOp`, `LValueOp`)
//! - `AstFactory`, the construction API used by the (external) parser
//!
//! # Design Philosophy
//!
//! - **Intern names**: identifiers are `Name(u32)`, compared in O(1).
//! - **Closed node set**: every node kind is a variant of one enum, so the
//!   evaluator matches exhaustively instead of dispatching through vtables.
//! - **Immutable nodes**: once built, a node can be evaluated any number of
//!   times against different scopes.

pub mod ast;
mod factory;
mod interner;
mod name;

pub use ast::{
    ArrayRef, BinaryOp, Expr, FunctionDef, LValue, LValueOp, ListOp, Literal, TopLevel, UnaryOp,
    VarOp,
};
pub use factory::AstFactory;
pub use interner::{SharedInterner, StringInterner, StringLookup};
pub use name::Name;
