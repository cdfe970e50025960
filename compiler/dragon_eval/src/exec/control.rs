//! Branch selection for conditionals.
//!
//! Selecting a branch evaluates only the condition. Function and loop bodies
//! use `resolve_statement` so that a `return` reached through body-level
//! `if`s ends the body instead of being evaluated as an ordinary value.

use dragon_ir::Expr;
use dragon_value::{EvalError, EvalResult, Value};

/// How a function or loop body finished.
#[derive(Clone, Debug, PartialEq)]
pub enum BodyOutcome {
    /// A body-level `return` fired with this value.
    Returned(Value),
    /// Every statement ran; carries the last statement's value.
    Completed(Value),
}

impl BodyOutcome {
    pub fn into_value(self) -> Value {
        match self {
            BodyOutcome::Returned(v) | BodyOutcome::Completed(v) => v,
        }
    }
}

/// Pick the live branch given an evaluated condition.
///
/// `None` when the condition is false and there is no else branch.
#[inline]
pub fn select_branch<'e>(
    cond: &Value,
    then_branch: &'e Expr,
    else_branch: Option<&'e Expr>,
) -> Option<&'e Expr> {
    if cond.is_truthy() {
        Some(then_branch)
    } else {
        else_branch
    }
}

/// Resolve a body statement to the node that should actually run.
///
/// Non-`if` statements resolve to themselves. An `if` resolves to its
/// selected branch, repeatedly, so nested `if`s collapse to one node.
/// Returns `None` when an `if` selects an absent branch.
pub fn resolve_statement<'e, F>(
    stmt: &'e Expr,
    mut eval_cond: F,
) -> Result<Option<&'e Expr>, EvalError>
where
    F: FnMut(&'e Expr) -> EvalResult,
{
    let mut current = stmt;
    loop {
        let Expr::If {
            cond,
            then_branch,
            else_branch,
        } = current
        else {
            return Ok(Some(current));
        };
        let cond_val = eval_cond(cond)?;
        match select_branch(&cond_val, then_branch, else_branch.as_deref()) {
            Some(next) => current = next,
            None => return Ok(None),
        }
    }
}
