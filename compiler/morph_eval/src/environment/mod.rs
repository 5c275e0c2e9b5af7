//! Variable bindings for one run or one arrow invocation.
//!
//! There are no nested scopes: the top level of a run owns one environment,
//! and each arrow-function call gets a fresh one holding only its
//! parameter. Both carry the function registry used to resolve calls.

use std::sync::Arc;

use rustc_hash::FxHashMap;

use crate::object::{Object, ObjectMap};
use crate::registry::FunctionRegistry;

/// Name to object bindings plus the registry for calls.
#[derive(Clone)]
pub struct Environment {
    vars: FxHashMap<String, Object>,
    registry: Arc<FunctionRegistry>,
}

impl Environment {
    pub fn new(registry: Arc<FunctionRegistry>) -> Self {
        Environment {
            vars: FxHashMap::default(),
            registry,
        }
    }

    #[inline]
    pub fn registry(&self) -> &Arc<FunctionRegistry> {
        &self.registry
    }

    #[inline]
    pub fn get(&self, name: &str) -> Option<&Object> {
        self.vars.get(name)
    }

    /// Bind or rebind `name`.
    pub fn set(&mut self, name: impl Into<String>, value: Object) {
        self.vars.insert(name.into(), value);
    }

    /// Mutable slot for `name`, created as `Null` when unbound.
    pub fn slot(&mut self, name: &str) -> &mut Object {
        self.vars.entry(name.to_string()).or_insert(Object::Null)
    }

    pub fn remove(&mut self, name: &str) -> Option<Object> {
        self.vars.remove(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.vars.contains_key(name)
    }

    /// Drop every binding.
    pub fn clear(&mut self) {
        self.vars.clear();
    }

    pub fn len(&self) -> usize {
        self.vars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vars.is_empty()
    }

    /// All bindings as one map object keyed by name.
    pub fn to_object(&self) -> Object {
        Object::map(
            self.vars
                .iter()
                .map(|(k, v)| (k.clone(), v.clone()))
                .collect::<ObjectMap>(),
        )
    }
}

impl std::fmt::Debug for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut names: Vec<_> = self.vars.keys().collect();
        names.sort();
        f.debug_struct("Environment").field("vars", &names).finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests;
