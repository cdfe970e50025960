//! Tree-walking interpreter for DragonLisp.
//!
//! # Architecture
//!
//! `Interpreter::eval` matches on the `Expr` variant and dispatches to the
//! operator functions (`evaluate_unary`, `evaluate_binary`,
//! `evaluate_list`) or to the evaluation methods split across submodules:
//!
//! - `function_call`: user-function calls
//! - `body`: statement lists shared by functions and loops
//! - `loops`: `loop`, `loop for`, `dotimes`
//!
//! Each interpreter owns one program environment. Top-level expressions run
//! under its root scope; function calls run in a fresh child of the root.

mod body;
mod builder;
mod function_call;
mod loops;

pub use builder::InterpreterBuilder;

use dragon_ir::{ArrayRef, Expr, LValue, LValueOp, Name, StringInterner, TopLevel, VarOp};
use dragon_stack::ensure_sufficient_stack;
use dragon_value::{
    assign_to_undefined, integer_overflow, non_integer_index, type_mismatch, EvalError,
    EvalResult, Scalar, Value,
};

use crate::diagnostics::CallStack;
use crate::exec::control::select_branch;
use crate::exec::place::Place;
use crate::print_handler::SharedPrintHandler;
use crate::{evaluate_binary, evaluate_list, evaluate_unary, Environment, LocalScope, Scope};

/// Tree-walking interpreter for one DragonLisp program.
pub struct Interpreter<'a> {
    /// String interner for name lookup in error messages.
    pub(crate) interner: &'a StringInterner,
    /// Root scope and shared function table.
    pub(crate) env: Environment,
    /// Destination of `PRINT`.
    pub(crate) print_handler: SharedPrintHandler,
    /// Active user-function frames, with the optional depth limit.
    pub(crate) call_stack: CallStack,
}

impl<'a> Interpreter<'a> {
    /// Create an interpreter printing to stdout with no call-depth limit.
    ///
    /// For more configuration options, use `Interpreter::builder(interner)`.
    pub fn new(interner: &'a StringInterner) -> Self {
        InterpreterBuilder::new(interner).build()
    }

    pub fn builder(interner: &'a StringInterner) -> InterpreterBuilder<'a> {
        InterpreterBuilder::new(interner)
    }

    #[inline]
    pub fn interner(&self) -> &StringInterner {
        self.interner
    }

    #[inline]
    pub fn env(&self) -> &Environment {
        &self.env
    }

    /// The program's root scope.
    #[inline]
    pub fn root(&self) -> &LocalScope<Scope> {
        self.env.root()
    }

    #[inline]
    pub fn print_handler(&self) -> &SharedPrintHandler {
        &self.print_handler
    }

    /// Run one top-level form.
    ///
    /// Expressions are evaluated under the root scope and yield `Some`.
    /// Function definitions are registered (replacing any earlier one with
    /// the same name) and yield `None`.
    pub fn execute(&mut self, item: TopLevel) -> Result<Option<Value>, EvalError> {
        match item {
            TopLevel::Expr(expr) => {
                tracing::trace!("executing top-level expression");
                let root = self.env.root().clone();
                self.eval(&expr, &root).map(Some)
            }
            TopLevel::Function(def) => {
                let name = def.name;
                let replaced = self.env.define_function(def);
                tracing::debug!(
                    function = self.interner.lookup(name),
                    replaced,
                    "defined function"
                );
                Ok(None)
            }
        }
    }

    /// Evaluate an expression under `scope`.
    pub fn eval(&mut self, expr: &Expr, scope: &LocalScope<Scope>) -> EvalResult {
        ensure_sufficient_stack(|| self.eval_inner(expr, scope))
    }

    fn eval_inner(&mut self, expr: &Expr, scope: &LocalScope<Scope>) -> EvalResult {
        match expr {
            Expr::Literal(literal) => Ok(Value::Scalar(Scalar::from(literal))),
            Expr::Ident(name) => Place::Var(*name).read(scope, self.interner),
            Expr::ArrayRef(aref) => {
                let place = self.resolve_element(aref, scope)?;
                place.read(scope, self.interner)
            }
            Expr::Unary { op, operand } => {
                let value = self.eval(operand, scope)?;
                evaluate_unary(*op, value, &self.print_handler)
            }
            Expr::Binary { op, left, right } => {
                let left = self.eval(left, scope)?;
                let right = self.eval(right, scope)?;
                evaluate_binary(*op, &left, &right)
            }
            Expr::List { op, operands } => {
                let values = operands
                    .iter()
                    .map(|operand| self.eval(operand, scope))
                    .collect::<Result<Vec<_>, _>>()?;
                evaluate_list(*op, values)
            }
            Expr::VarOp { op, name, value } => self.eval_var_op(*op, *name, value, scope),
            Expr::LValueOp { op, target, value } => {
                self.eval_lvalue_op(*op, target, value, scope)
            }
            Expr::If {
                cond,
                then_branch,
                else_branch,
            } => {
                let cond_val = self.eval(cond, scope)?;
                match select_branch(&cond_val, then_branch, else_branch.as_deref()) {
                    Some(branch) => self.eval(branch, scope),
                    None => Ok(Value::nil()),
                }
            }
            Expr::LoopForever { body } => self.eval_loop_forever(body, scope),
            Expr::LoopFor {
                var,
                start,
                end,
                body,
            } => self.eval_loop_for(*var, start, end, body, scope),
            Expr::LoopDoTimes { var, count, body } => {
                self.eval_dotimes(*var, count, body, scope)
            }
            Expr::Call { func, args } => self.eval_call(*func, args, scope),
            Expr::Return(value) => self.eval(value, scope),
        }
    }

    /// Store `value` into an lvalue under `scope`, returning it.
    pub fn write(
        &mut self,
        target: &LValue,
        scope: &LocalScope<Scope>,
        value: Value,
    ) -> EvalResult {
        let place = self.resolve_place(target, scope)?;
        place.write(scope, value, self.interner)
    }

    /// Evaluate the index of an lvalue, if it has one.
    pub(crate) fn resolve_place(
        &mut self,
        target: &LValue,
        scope: &LocalScope<Scope>,
    ) -> Result<Place, EvalError> {
        match target {
            LValue::Ident(name) => Ok(Place::Var(*name)),
            LValue::ArrayRef(aref) => self.resolve_element(aref, scope),
        }
    }

    fn resolve_element(
        &mut self,
        aref: &ArrayRef,
        scope: &LocalScope<Scope>,
    ) -> Result<Place, EvalError> {
        let index = self.eval(&aref.index, scope)?;
        let index = index
            .as_int()
            .ok_or_else(|| non_integer_index(index.type_name()))?;
        Ok(Place::Element {
            name: aref.name,
            index,
        })
    }

    /// `DEFVAR` binds in the current scope; `SETQ` re-binds an existing name.
    fn eval_var_op(
        &mut self,
        op: VarOp,
        name: Name,
        value: &Expr,
        scope: &LocalScope<Scope>,
    ) -> EvalResult {
        let value = self.eval(value, scope)?;
        match op {
            VarOp::Defvar => scope.borrow_mut().define(name, value.copy()),
            VarOp::Setq => scope
                .borrow_mut()
                .assign(name, value.copy())
                .map_err(|_| assign_to_undefined(self.interner.lookup(name)))?,
        }
        Ok(value)
    }

    /// `SETF` writes through the target; `INCF`/`DECF` read-modify-write an
    /// integer target.
    fn eval_lvalue_op(
        &mut self,
        op: LValueOp,
        target: &LValue,
        value: &Expr,
        scope: &LocalScope<Scope>,
    ) -> EvalResult {
        let value = self.eval(value, scope)?;
        let place = self.resolve_place(target, scope)?;
        if op == LValueOp::Setf {
            return place.write(scope, value, self.interner);
        }

        let symbol = op.as_symbol();
        let current = place.read(scope, self.interner)?;
        let current = current
            .as_int()
            .ok_or_else(|| type_mismatch(symbol, "integer", current.type_name()))?;
        let delta = value
            .as_int()
            .ok_or_else(|| type_mismatch(symbol, "integer", value.type_name()))?;
        let updated = if op == LValueOp::Incf {
            current.checked_add(delta)
        } else {
            current.checked_sub(delta)
        }
        .ok_or_else(|| integer_overflow(symbol))?;
        place.write(scope, Value::int(updated), self.interner)
    }
}
