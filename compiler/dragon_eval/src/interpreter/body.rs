//! Statement-list execution shared by function and loop bodies.

use super::Interpreter;
use crate::exec::control::{resolve_statement, BodyOutcome};
use crate::{LocalScope, Scope};
use dragon_ir::Expr;
use dragon_value::{EvalError, Value};

impl Interpreter<'_> {
    /// Run `body` statement by statement under `scope`.
    ///
    /// Body-level `if`s are resolved to their selected branch first; a
    /// resolved `return` ends the body. A statement whose `if` selects no
    /// branch is skipped and leaves the running value alone.
    pub(crate) fn run_body(
        &mut self,
        body: &[Expr],
        scope: &LocalScope<Scope>,
    ) -> Result<BodyOutcome, EvalError> {
        let mut last = Value::nil();
        for stmt in body {
            let Some(live) = resolve_statement(stmt, |cond| self.eval(cond, scope))? else {
                continue;
            };
            if let Expr::Return(value) = live {
                return Ok(BodyOutcome::Returned(self.eval(value, scope)?));
            }
            last = self.eval(live, scope)?;
        }
        Ok(BodyOutcome::Completed(last))
    }
}
