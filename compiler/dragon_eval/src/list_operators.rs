//! Variadic operator implementations for the evaluator.
//!
//! Every list operator receives its operands already evaluated, left to
//! right; none of them short-circuits evaluation. At least one operand is
//! required. With a single operand each operator type-checks and returns it
//! (`=`/`/=` return `T`/`NIL` instead).

use std::cmp::Ordering;
use std::vec;

use dragon_ir::ListOp;
use dragon_value::{
    division_by_zero, integer_overflow, missing_operands, EvalError, EvalResult, Numeric, Value,
};

use crate::operators::{integer_operand, numeric_operand};

/// Evaluate a list operation over its evaluated operands.
pub fn evaluate_list(op: ListOp, operands: Vec<Value>) -> EvalResult {
    let symbol = op.as_symbol();
    let mut rest = operands.into_iter();
    let Some(first) = rest.next() else {
        return Err(missing_operands(symbol));
    };

    match op {
        ListOp::And => Ok(all_non_nil(first, rest)),
        ListOp::Or => Ok(first_non_nil(first, rest)),
        ListOp::Eq | ListOp::NotEq => {
            let all_equal = all_equal_to_first(&first, rest, symbol)?;
            Ok(Value::bool(all_equal == (op == ListOp::Eq)))
        }
        ListOp::Max | ListOp::Min => select_extremum(op, first, rest),
        ListOp::Add | ListOp::Sub | ListOp::Mul | ListOp::Div => fold_arithmetic(op, &first, rest),
        ListOp::LogAnd | ListOp::LogIor | ListOp::LogXor | ListOp::LogEqv => {
            fold_bitwise(op, &first, rest)
        }
    }
}

/// `AND`: `NIL` if any operand is `NIL`, else the last operand.
fn all_non_nil(first: Value, rest: vec::IntoIter<Value>) -> Value {
    let mut any_nil = first.is_nil();
    let mut last = first;
    for value in rest {
        any_nil |= value.is_nil();
        last = value;
    }
    if any_nil {
        Value::nil()
    } else {
        last
    }
}

/// `OR`: the first operand that is not `NIL`, else `NIL`.
fn first_non_nil(first: Value, mut rest: vec::IntoIter<Value>) -> Value {
    if first.is_truthy() {
        return first;
    }
    rest.find(Value::is_truthy).unwrap_or_else(Value::nil)
}

/// `=` / `/=`: tag and payload equality against the first operand.
fn all_equal_to_first(
    first: &Value,
    rest: vec::IntoIter<Value>,
    symbol: &'static str,
) -> Result<bool, EvalError> {
    numeric_operand(first, symbol)?;
    let mut all_equal = true;
    for value in rest {
        numeric_operand(&value, symbol)?;
        all_equal &= value == *first;
    }
    Ok(all_equal)
}

/// `MAX` / `MIN`: the original operand with the extreme numeric value.
///
/// Ties keep the earliest operand.
fn select_extremum(op: ListOp, first: Value, rest: vec::IntoIter<Value>) -> EvalResult {
    let symbol = op.as_symbol();
    let wanted = if op == ListOp::Max {
        Ordering::Greater
    } else {
        Ordering::Less
    };

    let mut best_key = numeric_operand(&first, symbol)?;
    let mut best = first;
    for value in rest {
        let key = numeric_operand(&value, symbol)?;
        if key.compare(best_key) == Some(wanted) {
            best_key = key;
            best = value;
        }
    }
    Ok(best)
}

/// `+ - * /`: left fold, in float if any operand is a float.
fn fold_arithmetic(op: ListOp, first: &Value, rest: vec::IntoIter<Value>) -> EvalResult {
    let symbol = op.as_symbol();
    let head = numeric_operand(first, symbol)?;
    let tail = rest
        .map(|value| numeric_operand(&value, symbol))
        .collect::<Result<Vec<_>, _>>()?;
    let int_tail = tail
        .iter()
        .map(|n| match n {
            Numeric::Int(i) => Some(*i),
            Numeric::Float(_) => None,
        })
        .collect::<Option<Vec<i64>>>();

    match (head, int_tail) {
        (Numeric::Int(h), Some(ints)) => ints
            .into_iter()
            .try_fold(h, |acc, n| apply_int(op, acc, n))
            .map(Value::int),
        _ => {
            let acc = tail
                .iter()
                .fold(head.to_f64(), |acc, n| apply_float(op, acc, n.to_f64()));
            Ok(Value::float(acc))
        }
    }
}

fn apply_float(op: ListOp, a: f64, b: f64) -> f64 {
    match op {
        ListOp::Add => a + b,
        ListOp::Sub => a - b,
        ListOp::Mul => a * b,
        _ => a / b,
    }
}

fn apply_int(op: ListOp, a: i64, b: i64) -> Result<i64, EvalError> {
    let symbol = op.as_symbol();
    let result = match op {
        ListOp::Add => a.checked_add(b),
        ListOp::Sub => a.checked_sub(b),
        ListOp::Mul => a.checked_mul(b),
        _ => {
            if b == 0 {
                return Err(division_by_zero());
            }
            a.checked_div(b)
        }
    };
    result.ok_or_else(|| integer_overflow(symbol))
}

/// `LOGAND LOGIOR LOGXOR LOGEQV`: left fold over integers.
fn fold_bitwise(op: ListOp, first: &Value, rest: vec::IntoIter<Value>) -> EvalResult {
    let symbol = op.as_symbol();
    let mut acc = integer_operand(first, symbol)?;
    for value in rest {
        let n = integer_operand(&value, symbol)?;
        acc = match op {
            ListOp::LogAnd => acc & n,
            ListOp::LogIor => acc | n,
            ListOp::LogXor => acc ^ n,
            _ => !(acc ^ n),
        };
    }
    Ok(Value::int(acc))
}
