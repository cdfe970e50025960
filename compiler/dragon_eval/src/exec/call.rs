//! Function call helpers: argument validation and parameter binding.

use dragon_ir::{FunctionDef, StringInterner};
use dragon_value::{too_few_arguments, EvalError, Value};

use crate::{LocalScope, Scope};

/// Fail if fewer arguments than parameters were supplied.
///
/// Extra arguments are accepted and ignored.
pub fn check_arg_count(
    func: &FunctionDef,
    arg_count: usize,
    interner: &StringInterner,
) -> Result<(), EvalError> {
    if arg_count < func.params.len() {
        return Err(too_few_arguments(
            interner.lookup(func.name),
            func.params.len(),
            arg_count,
        ));
    }
    Ok(())
}

/// Bind parameters positionally in the call scope.
pub fn bind_parameters(scope: &LocalScope<Scope>, func: &FunctionDef, args: Vec<Value>) {
    let mut scope = scope.borrow_mut();
    for (param, arg) in func.params.iter().zip(args) {
        scope.define(*param, arg);
    }
}
