//! Scope chain and program environment.
//!
//! A scope is a binding map plus an optional parent. Lookup walks outward to
//! the root; declaration binds in the current scope only; assignment re-binds
//! in the nearest scope that already defines the name. Every scope of one
//! program shares a single `FunctionTable`.

// Rc is the intentional implementation detail of LocalScope<T>
#![expect(
    clippy::disallowed_types,
    reason = "Rc is the implementation of LocalScope<T>"
)]

use rustc_hash::FxHashMap;
use std::cell::RefCell;
use std::fmt;
use std::ops::Deref;
use std::rc::Rc;

use dragon_ir::{FunctionDef, Name};
use dragon_value::Value;

use crate::{FunctionTable, SharedFunction, SharedMutableRegistry};

/// Error returned by `Scope::assign` when assignment fails.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AssignError {
    /// Variable not found in any scope.
    Undefined,
}

/// A single-threaded scope wrapper for reference-counted interior mutability.
///
/// Wraps `Rc<RefCell<T>>`; all scope allocations go through
/// `LocalScope::new()`. Not thread-safe: the evaluator is synchronous.
#[repr(transparent)]
pub struct LocalScope<T>(Rc<RefCell<T>>);

impl<T> LocalScope<T> {
    #[inline]
    pub fn new(value: T) -> Self {
        LocalScope(Rc::new(RefCell::new(value)))
    }

    /// Borrow the inner value immutably.
    #[inline]
    pub fn borrow(&self) -> std::cell::Ref<'_, T> {
        self.0.borrow()
    }

    /// Borrow the inner value mutably.
    #[inline]
    pub fn borrow_mut(&self) -> std::cell::RefMut<'_, T> {
        self.0.borrow_mut()
    }

    /// Whether two handles refer to the same scope.
    #[inline]
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

impl<T> Clone for LocalScope<T> {
    #[inline]
    fn clone(&self) -> Self {
        LocalScope(Rc::clone(&self.0))
    }
}

impl<T: fmt::Debug> fmt::Debug for LocalScope<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("LocalScope").field(&self.0).finish()
    }
}

impl<T> Deref for LocalScope<T> {
    type Target = RefCell<T>;

    #[inline]
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

/// A single scope containing variable bindings.
#[derive(Clone, Debug)]
pub struct Scope {
    bindings: FxHashMap<Name, Value>,
    /// `None` for the root.
    parent: Option<LocalScope<Scope>>,
    functions: SharedMutableRegistry<FunctionTable>,
}

impl Scope {
    /// Create a root scope over the given function table.
    pub fn root(functions: SharedMutableRegistry<FunctionTable>) -> Self {
        Scope {
            bindings: FxHashMap::default(),
            parent: None,
            functions,
        }
    }

    /// Create a child scope sharing the parent's function table.
    pub fn with_parent(parent: LocalScope<Scope>) -> Self {
        let functions = parent.borrow().functions.clone();
        Scope {
            bindings: FxHashMap::default(),
            parent: Some(parent),
            functions,
        }
    }

    #[inline]
    pub fn is_root(&self) -> bool {
        self.parent.is_none()
    }

    #[inline]
    pub fn parent(&self) -> Option<&LocalScope<Scope>> {
        self.parent.as_ref()
    }

    /// Bind a variable in this scope, shadowing any outer binding.
    #[inline]
    pub fn define(&mut self, name: Name, value: Value) {
        self.bindings.insert(name, value);
    }

    /// Look up a variable by name, returning a copy of the stored value.
    #[inline]
    pub fn lookup(&self, name: Name) -> Option<Value> {
        if let Some(value) = self.bindings.get(&name) {
            return Some(value.copy());
        }
        if let Some(parent) = &self.parent {
            return parent.borrow().lookup(name);
        }
        None
    }

    /// Whether `name` is bound anywhere in the chain.
    pub fn contains(&self, name: Name) -> bool {
        if self.bindings.contains_key(&name) {
            return true;
        }
        match &self.parent {
            Some(parent) => parent.borrow().contains(name),
            None => false,
        }
    }

    /// Re-bind `name` in the nearest scope that defines it.
    #[inline]
    pub fn assign(&mut self, name: Name, value: Value) -> Result<(), AssignError> {
        if let Some(slot) = self.bindings.get_mut(&name) {
            *slot = value;
            return Ok(());
        }
        if let Some(parent) = &self.parent {
            return parent.borrow_mut().assign(name, value);
        }
        Err(AssignError::Undefined)
    }

    /// Run `f` on the stored value in the nearest defining scope.
    ///
    /// `None` if the name is unbound.
    pub fn with_binding<R>(&self, name: Name, f: impl FnOnce(&Value) -> R) -> Option<R> {
        if let Some(value) = self.bindings.get(&name) {
            return Some(f(value));
        }
        self.parent
            .as_ref()
            .and_then(|parent| parent.borrow().with_binding(name, f))
    }

    /// Mutate the stored value in the nearest defining scope in place.
    ///
    /// `None` if the name is unbound.
    pub fn with_binding_mut<R>(
        &mut self,
        name: Name,
        f: impl FnOnce(&mut Value) -> R,
    ) -> Option<R> {
        if let Some(value) = self.bindings.get_mut(&name) {
            return Some(f(value));
        }
        self.parent
            .as_ref()
            .and_then(|parent| parent.borrow_mut().with_binding_mut(name, f))
    }

    /// Look up a user function in the shared table.
    #[inline]
    pub fn function(&self, name: Name) -> Option<SharedFunction> {
        self.functions.read().get(name)
    }

    /// Register a user function in the shared table.
    ///
    /// Returns the definition it replaced, if any.
    pub fn define_function(&self, def: FunctionDef) -> Option<SharedFunction> {
        self.functions.write().define(def)
    }

    /// Handle to the shared function table.
    pub fn functions(&self) -> &SharedMutableRegistry<FunctionTable> {
        &self.functions
    }
}

/// Climb from `scope` to the root of its chain.
pub fn root_of(scope: &LocalScope<Scope>) -> LocalScope<Scope> {
    let mut current = scope.clone();
    loop {
        let parent = current.borrow().parent.clone();
        match parent {
            Some(parent) => current = parent,
            None => return current,
        }
    }
}

/// The environment of one program: its root scope and function table.
pub struct Environment {
    root: LocalScope<Scope>,
    functions: SharedMutableRegistry<FunctionTable>,
}

impl Environment {
    /// Create an environment with an empty root scope and function table.
    pub fn new() -> Self {
        let functions = SharedMutableRegistry::new(FunctionTable::new());
        Environment {
            root: LocalScope::new(Scope::root(functions.clone())),
            functions,
        }
    }

    #[inline]
    pub fn root(&self) -> &LocalScope<Scope> {
        &self.root
    }

    /// Create a scope nested in `parent`.
    #[inline]
    pub fn child_of(parent: &LocalScope<Scope>) -> LocalScope<Scope> {
        LocalScope::new(Scope::with_parent(parent.clone()))
    }

    /// Register a user function.
    ///
    /// Returns `true` if an earlier definition was replaced.
    pub fn define_function(&self, def: FunctionDef) -> bool {
        self.functions.write().define(def).is_some()
    }

    pub fn function(&self, name: Name) -> Option<SharedFunction> {
        self.functions.read().get(name)
    }

    pub fn functions(&self) -> &SharedMutableRegistry<FunctionTable> {
        &self.functions
    }
}

impl Default for Environment {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Environment")
            .field("root", &self.root)
            .field("functions", &self.functions.read().len())
            .finish()
    }
}

#[cfg(test)]
mod tests;
