//! The program-wide table of user-defined functions.

use dragon_ir::{FunctionDef, Name};
use rustc_hash::FxHashMap;

use crate::Shared;

/// Handle to a registered definition.
///
/// Calls clone the handle out of the table before running the body, so the
/// table lock is never held across evaluation.
pub type SharedFunction = Shared<FunctionDef>;

/// Name-keyed function definitions.
#[derive(Debug, Default)]
pub struct FunctionTable {
    functions: FxHashMap<Name, SharedFunction>,
}

impl FunctionTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `def`, replacing any earlier definition with the same name.
    ///
    /// Returns the replaced definition.
    pub fn define(&mut self, def: FunctionDef) -> Option<SharedFunction> {
        self.functions.insert(def.name, Shared::new(def))
    }

    #[inline]
    pub fn get(&self, name: Name) -> Option<SharedFunction> {
        self.functions.get(&name).cloned()
    }

    #[inline]
    pub fn contains(&self, name: Name) -> bool {
        self.functions.contains_key(&name)
    }

    pub fn len(&self) -> usize {
        self.functions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.functions.is_empty()
    }
}
