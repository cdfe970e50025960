//! Unary operator implementations for the evaluator.

use dragon_ir::UnaryOp;
use dragon_value::{array_too_large, type_mismatch, ArrayValue, EvalResult, Value};

use crate::PrintHandlerImpl;

/// Evaluate a unary operation.
///
/// `PRINT` writes through `print` and yields its operand unchanged.
pub fn evaluate_unary(op: UnaryOp, operand: Value, print: &PrintHandlerImpl) -> EvalResult {
    match op {
        UnaryOp::Not => Ok(Value::bool(operand.is_nil())),
        UnaryOp::MakeArray => make_array(&operand),
        UnaryOp::Print => {
            print.println(&operand.to_string());
            Ok(operand)
        }
    }
}

fn make_array(size: &Value) -> EvalResult {
    let symbol = UnaryOp::MakeArray.as_symbol();
    let Some(n) = size.as_int() else {
        return Err(type_mismatch(symbol, "integer", size.type_name()));
    };
    if n < 0 {
        return Err(type_mismatch(symbol, "non-negative integer", "negative integer"));
    }
    let len = usize::try_from(n).map_err(|_| array_too_large(n.unsigned_abs()))?;
    ArrayValue::try_new(len).map(Value::from)
}
