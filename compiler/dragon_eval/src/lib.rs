#![deny(clippy::arithmetic_side_effects)]
//! Dragon Eval - tree-walking evaluator for DragonLisp.
//!
//! # Architecture
//!
//! The evaluator uses:
//! - `Scope` / `LocalScope`: chained binding maps, innermost first, each
//!   holding a handle to the program's shared `FunctionTable`
//! - `Environment`: the program's root scope and function table
//! - `evaluate_unary`, `evaluate_binary`, `evaluate_list`: direct enum-based
//!   operator dispatch
//! - `Interpreter`: walks `Expr` nodes, owns the call stack and the print
//!   capability
//!
//! Value and error types come from `dragon_value` and are re-exported here.

mod diagnostics;
mod environment;
pub mod exec;
mod function_table;
pub mod interpreter;
mod list_operators;
mod operators;
mod print_handler;
mod shared;
mod unary_operators;

pub use dragon_value::{
    ArrayValue, EvalBacktrace, EvalError, EvalErrorKind, EvalResult, Numeric, Scalar, Value,
};

pub use diagnostics::{CallFrame, CallStack};
pub use environment::{root_of, AssignError, Environment, LocalScope, Scope};
pub use function_table::{FunctionTable, SharedFunction};
pub use interpreter::{Interpreter, InterpreterBuilder};
pub use list_operators::evaluate_list;
pub use operators::evaluate_binary;
pub use print_handler::{
    buffer_handler, silent_handler, stdout_handler, BufferPrintHandler, PrintHandlerImpl,
    SharedPrintHandler, StdoutPrintHandler,
};
pub use shared::{Shared, SharedMutableRegistry};
pub use unary_operators::evaluate_unary;

#[cfg(test)]
mod tests;
