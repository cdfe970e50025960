//! Binary operator implementations for the evaluator.
//!
//! Provides direct enum-based dispatch for the strictly two-operand
//! operators: comparisons, `MOD`/`REM` and `LOGNOR`. Operands must be
//! numeric scalars; an int paired with a float is promoted to float.

use std::cmp::Ordering;

use dragon_ir::BinaryOp;
use dragon_value::{
    division_by_zero, integer_overflow, type_mismatch, EvalError, EvalResult, Numeric, Value,
};

/// Numeric view of an operand, or a `TypeMismatch` naming `operator`.
#[inline]
pub(crate) fn numeric_operand(value: &Value, operator: &'static str) -> Result<Numeric, EvalError> {
    value
        .as_numeric()
        .ok_or_else(|| type_mismatch(operator, "number", value.type_name()))
}

/// Integer payload of an operand, or a `TypeMismatch` naming `operator`.
#[inline]
pub(crate) fn integer_operand(value: &Value, operator: &'static str) -> Result<i64, EvalError> {
    value
        .as_int()
        .ok_or_else(|| type_mismatch(operator, "integer", value.type_name()))
}

/// Evaluate a binary operation.
pub fn evaluate_binary(op: BinaryOp, left: &Value, right: &Value) -> EvalResult {
    let symbol = op.as_symbol();
    match op {
        BinaryOp::Lt | BinaryOp::LtEq | BinaryOp::Gt | BinaryOp::GtEq => {
            let a = numeric_operand(left, symbol)?;
            let b = numeric_operand(right, symbol)?;
            Ok(Value::bool(comparison_holds(op, a.compare(b))))
        }
        BinaryOp::Mod | BinaryOp::Rem => {
            let a = numeric_operand(left, symbol)?;
            let b = numeric_operand(right, symbol)?;
            remainder(a, b, symbol)
        }
        BinaryOp::LogNor => {
            let a = integer_operand(left, symbol)?;
            let b = integer_operand(right, symbol)?;
            Ok(Value::int(!(a | b)))
        }
    }
}

/// Unordered (NaN) comparisons are false.
fn comparison_holds(op: BinaryOp, ordering: Option<Ordering>) -> bool {
    let Some(ordering) = ordering else {
        return false;
    };
    match op {
        BinaryOp::Lt => ordering.is_lt(),
        BinaryOp::LtEq => ordering.is_le(),
        BinaryOp::Gt => ordering.is_gt(),
        BinaryOp::GtEq => ordering.is_ge(),
        BinaryOp::Mod | BinaryOp::Rem | BinaryOp::LogNor => false,
    }
}

/// Truncating remainder; the sign follows the dividend.
fn remainder(a: Numeric, b: Numeric, symbol: &'static str) -> EvalResult {
    match (a, b) {
        (Numeric::Int(_), Numeric::Int(0)) => Err(division_by_zero()),
        (Numeric::Int(x), Numeric::Int(y)) => x
            .checked_rem(y)
            .map(Value::int)
            .ok_or_else(|| integer_overflow(symbol)),
        (x, y) => Ok(Value::float(x.to_f64() % y.to_f64())),
    }
}
