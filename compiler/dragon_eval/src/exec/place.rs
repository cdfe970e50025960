//! Resolved assignment targets.
//!
//! A `Place` is an lvalue whose array index, if any, has already been
//! evaluated. Read-modify-write forms (`INCF`, `DECF`) resolve the place
//! once and then read and write through it.

use dragon_ir::{Name, StringInterner};
use dragon_value::{
    assign_to_undefined, cannot_assign_array_element, not_an_array, undefined_variable,
    EvalError, EvalResult, Value,
};

use crate::{LocalScope, Scope};

/// An assignable location.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Place {
    /// A variable.
    Var(Name),
    /// One element of an array variable.
    Element { name: Name, index: i64 },
}

impl Place {
    /// Read the current value. Array elements are returned as scalars.
    pub fn read(self, scope: &LocalScope<Scope>, interner: &StringInterner) -> EvalResult {
        match self {
            Place::Var(name) => scope
                .borrow()
                .lookup(name)
                .ok_or_else(|| undefined_variable(interner.lookup(name))),
            Place::Element { name, index } => scope
                .borrow()
                .with_binding(name, |value| match value {
                    Value::Array(array) => array.get(index).map(|s| Value::Scalar(s.clone())),
                    Value::Scalar(_) => Err(not_an_array(interner.lookup(name))),
                })
                .unwrap_or_else(|| Err(undefined_variable(interner.lookup(name)))),
        }
    }

    /// Store `value`, returning it.
    ///
    /// A variable is re-bound where it is defined, or declared in `scope`
    /// if it is bound nowhere. An element write mutates the stored array in
    /// place and only accepts scalars.
    pub fn write(
        self,
        scope: &LocalScope<Scope>,
        value: Value,
        interner: &StringInterner,
    ) -> EvalResult {
        match self {
            Place::Var(name) => {
                let mut scope = scope.borrow_mut();
                if scope.contains(name) {
                    scope
                        .assign(name, value.copy())
                        .map_err(|_| assign_to_undefined(interner.lookup(name)))?;
                } else {
                    scope.define(name, value.copy());
                }
                Ok(value)
            }
            Place::Element { name, index } => {
                let written = value.clone();
                scope
                    .borrow_mut()
                    .with_binding_mut(name, |stored| {
                        store_element(stored, index, value, name, interner)
                    })
                    .unwrap_or_else(|| Err(undefined_variable(interner.lookup(name))))?;
                Ok(written)
            }
        }
    }
}

fn store_element(
    stored: &mut Value,
    index: i64,
    value: Value,
    name: Name,
    interner: &StringInterner,
) -> Result<(), EvalError> {
    let Value::Array(array) = stored else {
        return Err(not_an_array(interner.lookup(name)));
    };
    // Bounds are checked before the stored value's type
    let slot = array.slot(index)?;
    let Value::Scalar(scalar) = value else {
        return Err(cannot_assign_array_element());
    };
    array.elements_mut()[slot] = scalar;
    Ok(())
}
