//! Evaluation helpers shared by the interpreter.
//!
//! - `control`: branch selection and the body-execution outcome
//! - `call`: argument count checks and parameter binding
//! - `place`: resolved assignment targets

pub mod call;
pub mod control;
pub mod place;
