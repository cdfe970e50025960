//! Loop forms.
//!
//! `loop for` and `dotimes` run in one child scope created per loop; the
//! loop variable is re-bound in it before every iteration. Loops yield
//! `NIL` when they run to completion, or the value of a body-level
//! `return`.

use super::Interpreter;
use crate::exec::control::BodyOutcome;
use crate::{Environment, LocalScope, Scope};
use dragon_ir::{Expr, Name};
use dragon_value::{type_mismatch, EvalResult, Scalar, Value};

impl Interpreter<'_> {
    /// `(loop body...)`: repeat until a body-level `return`.
    pub(super) fn eval_loop_forever(
        &mut self,
        body: &[Expr],
        scope: &LocalScope<Scope>,
    ) -> EvalResult {
        loop {
            if let BodyOutcome::Returned(value) = self.run_body(body, scope)? {
                return Ok(value);
            }
        }
    }

    /// `(loop for var from start to end do body...)`: inclusive, step 1.
    pub(super) fn eval_loop_for(
        &mut self,
        var: Name,
        start: &Expr,
        end: &Expr,
        body: &[Expr],
        scope: &LocalScope<Scope>,
    ) -> EvalResult {
        let start = self.eval(start, scope)?;
        let end = self.eval(end, scope)?;
        let mut counter = numeric_bound(start)?;
        let end = numeric_bound(end)?;

        let loop_scope = Environment::child_of(scope);
        while counter.numeric_le(&end)? {
            loop_scope
                .borrow_mut()
                .define(var, Value::Scalar(counter.clone()));
            if let BodyOutcome::Returned(value) = self.run_body(body, &loop_scope)? {
                return Ok(value);
            }
            counter.increment()?;
        }
        Ok(Value::nil())
    }

    /// `(dotimes (var count) body...)`: `var` takes `0..count`.
    pub(super) fn eval_dotimes(
        &mut self,
        var: Name,
        count: &Expr,
        body: &[Expr],
        scope: &LocalScope<Scope>,
    ) -> EvalResult {
        let count = self.eval(count, scope)?;
        let n = count
            .as_int()
            .ok_or_else(|| type_mismatch("DOTIMES", "integer", count.type_name()))?;

        let loop_scope = Environment::child_of(scope);
        for i in 0..n {
            loop_scope.borrow_mut().define(var, Value::int(i));
            if let BodyOutcome::Returned(value) = self.run_body(body, &loop_scope)? {
                return Ok(value);
            }
        }
        Ok(Value::nil())
    }
}

/// A `loop for` bound must be a numeric scalar.
fn numeric_bound(value: Value) -> Result<Scalar, dragon_value::EvalError> {
    match value {
        Value::Scalar(s) if s.is_numeric() => Ok(s),
        other => Err(type_mismatch("LOOP FOR", "number", other.type_name())),
    }
}
