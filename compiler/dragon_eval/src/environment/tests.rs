#![expect(clippy::unwrap_used, reason = "Tests use unwrap for brevity")]

use super::*;
use dragon_ir::{AstFactory, SharedInterner};
use dragon_value::Scalar;
use pretty_assertions::assert_eq;

#[test]
fn test_define_lookup() {
    let interner = SharedInterner::default();
    let x = interner.intern("x");

    let env = Environment::new();
    env.root().borrow_mut().define(x, Value::int(42));
    assert_eq!(env.root().borrow().lookup(x), Some(Value::int(42)));
    assert_eq!(env.root().borrow().lookup(interner.intern("y")), None);
}

#[test]
fn test_child_shadows_parent() {
    let interner = SharedInterner::default();
    let x = interner.intern("x");

    let env = Environment::new();
    env.root().borrow_mut().define(x, Value::int(1));

    let child = Environment::child_of(env.root());
    child.borrow_mut().define(x, Value::int(2));

    assert_eq!(child.borrow().lookup(x), Some(Value::int(2)));
    assert_eq!(env.root().borrow().lookup(x), Some(Value::int(1)));
}

#[test]
fn test_assign_rebinds_in_defining_scope() {
    let interner = SharedInterner::default();
    let x = interner.intern("x");

    let env = Environment::new();
    env.root().borrow_mut().define(x, Value::int(1));
    let child = Environment::child_of(env.root());
    let grandchild = Environment::child_of(&child);

    grandchild.borrow_mut().assign(x, Value::int(7)).unwrap();

    // No new binding was introduced in the inner scopes
    assert_eq!(env.root().borrow().lookup(x), Some(Value::int(7)));
    assert_eq!(grandchild.borrow().lookup(x), Some(Value::int(7)));
}

#[test]
fn test_assign_undefined() {
    let interner = SharedInterner::default();
    let env = Environment::new();
    assert_eq!(
        env.root()
            .borrow_mut()
            .assign(interner.intern("missing"), Value::nil()),
        Err(AssignError::Undefined)
    );
}

#[test]
fn test_contains_walks_chain() {
    let interner = SharedInterner::default();
    let x = interner.intern("x");

    let env = Environment::new();
    let child = Environment::child_of(env.root());
    assert!(!child.borrow().contains(x));
    env.root().borrow_mut().define(x, Value::t());
    assert!(child.borrow().contains(x));
}

#[test]
fn test_lookup_returns_copy() {
    let interner = SharedInterner::default();
    let arr = interner.intern("arr");

    let env = Environment::new();
    env.root().borrow_mut().define(arr, Value::array(2));

    let mut copy = env.root().borrow().lookup(arr).unwrap();
    if let Value::Array(a) = &mut copy {
        a.set(0, Scalar::Int(5)).unwrap();
    }
    assert_eq!(env.root().borrow().lookup(arr), Some(Value::array(2)));
}

#[test]
fn test_with_binding_mut_mutates_in_place() {
    let interner = SharedInterner::default();
    let arr = interner.intern("arr");

    let env = Environment::new();
    env.root().borrow_mut().define(arr, Value::array(2));
    let child = Environment::child_of(env.root());

    let outcome = child.borrow_mut().with_binding_mut(arr, |value| match value {
        Value::Array(a) => a.set(1, Scalar::T),
        Value::Scalar(_) => unreachable!(),
    });
    assert!(matches!(outcome, Some(Ok(()))));

    let stored = env.root().borrow().lookup(arr).unwrap();
    assert_eq!(stored.to_string(), "[NIL, T]");
    assert!(child
        .borrow_mut()
        .with_binding_mut(interner.intern("nope"), |_| ())
        .is_none());
}

#[test]
fn test_root_detection() {
    let env = Environment::new();
    let child = Environment::child_of(env.root());
    let grandchild = Environment::child_of(&child);

    assert!(env.root().borrow().is_root());
    assert!(!grandchild.borrow().is_root());
    assert!(root_of(&grandchild).ptr_eq(env.root()));
    assert!(root_of(env.root()).ptr_eq(env.root()));
}

#[test]
fn test_function_table_is_shared_by_all_scopes() {
    let interner = SharedInterner::default();
    let f = AstFactory::new(&interner);

    let env = Environment::new();
    let child = Environment::child_of(env.root());
    let grandchild = Environment::child_of(&child);

    grandchild
        .borrow()
        .define_function(f.function("double", &["n"], vec![]));

    let name = interner.intern("double");
    assert!(env.function(name).is_some());
    assert!(child.borrow().function(name).is_some());
    assert!(SharedMutableRegistry::ptr_eq(
        env.functions(),
        grandchild.borrow().functions()
    ));
}

#[test]
fn test_redefinition_replaces() {
    let interner = SharedInterner::default();
    let f = AstFactory::new(&interner);
    let env = Environment::new();

    assert!(!env.define_function(f.function("g", &[], vec![f.int(1)])));
    assert!(env.define_function(f.function("g", &["a"], vec![f.int(2)])));

    let def = env.function(interner.intern("g")).unwrap();
    assert_eq!(def.params.len(), 1);
    assert_eq!(env.functions().read().len(), 1);
}

#[test]
fn test_local_scope_clone_shares_allocation() {
    let scope1 = LocalScope::new(42);
    let scope2 = scope1.clone();
    *scope1.borrow_mut() = 100;
    assert_eq!(*scope2.borrow(), 100);
    assert!(scope1.ptr_eq(&scope2));
}
