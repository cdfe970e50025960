//! User-function call evaluation.

use super::Interpreter;
use crate::diagnostics::CallFrame;
use crate::exec::call::{bind_parameters, check_arg_count};
use crate::{root_of, Environment, LocalScope, Scope};
use dragon_ir::{Expr, Name};
use dragon_value::{undefined_function, EvalResult};

impl Interpreter<'_> {
    /// Call a user function.
    ///
    /// The callee is resolved before the arguments are evaluated. The body
    /// runs in a fresh child of the root scope, so free variables resolve
    /// against globals rather than the caller's locals.
    #[tracing::instrument(
        level = "debug",
        skip_all,
        fields(function = self.interner.lookup(func), depth = self.call_stack.depth())
    )]
    pub(super) fn eval_call(
        &mut self,
        func: Name,
        args: &[Expr],
        scope: &LocalScope<Scope>,
    ) -> EvalResult {
        let def = scope
            .borrow()
            .function(func)
            .ok_or_else(|| undefined_function(self.interner.lookup(func)))?;

        let values = args
            .iter()
            .map(|arg| self.eval(arg, scope))
            .collect::<Result<Vec<_>, _>>()?;
        check_arg_count(&def, values.len(), self.interner)?;

        let call_scope = Environment::child_of(&root_of(scope));
        bind_parameters(&call_scope, &def, values);

        self.call_stack.push(CallFrame { name: func })?;
        let result = self
            .run_body(&def.body, &call_scope)
            .map_err(|err| self.call_stack.attach_backtrace(err, self.interner));
        self.call_stack.pop();

        result.map(crate::exec::control::BodyOutcome::into_value)
    }
}
