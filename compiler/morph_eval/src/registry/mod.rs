//! Namespaced function registry.
//!
//! A registry maps a namespace to its functions. Unqualified calls resolve
//! in [`DEFAULT_NAMESPACE`]; `ns.fn(...)` resolves in `ns`. Namespace names
//! are trimmed and lowercased on registration and lookup. Registering a
//! name twice replaces the earlier entry.
//!
//! The registry is immutable once a program holds it, so a single
//! `Arc<FunctionRegistry>` is shared by every run and every arrow function.

mod entry;

use rustc_hash::FxHashMap;
use tracing::instrument;

pub use entry::{ArgSpec, Example, FunctionAttrs, FunctionEntry, FunctionImpl, TypeSet};

use crate::errors;
use crate::object::Object;

/// Namespace for unqualified calls.
pub const DEFAULT_NAMESPACE: &str = "std";

/// Functions of one namespace.
#[derive(Clone, Debug, Default)]
pub struct Namespace {
    functions: FxHashMap<String, FunctionEntry>,
}

impl Namespace {
    pub fn get(&self, name: &str) -> Option<&FunctionEntry> {
        self.functions.get(name)
    }

    pub fn len(&self) -> usize {
        self.functions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.functions.is_empty()
    }

    /// Entries sorted by name.
    pub fn entries(&self) -> Vec<&FunctionEntry> {
        let mut entries: Vec<_> = self.functions.values().collect();
        entries.sort_by(|a, b| a.name().cmp(b.name()));
        entries
    }
}

/// Store of function entries keyed by namespace and name.
#[derive(Clone, Debug, Default)]
pub struct FunctionRegistry {
    namespaces: FxHashMap<String, Namespace>,
}

impl FunctionRegistry {
    /// An empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// A registry holding every builtin in `std`.
    pub fn with_builtins() -> Self {
        let mut registry = Self::new();
        crate::builtins::register_builtins(&mut registry);
        registry
    }

    /// Register `entry` under `namespace`, replacing any entry of the same name.
    pub fn register(&mut self, namespace: &str, mut entry: FunctionEntry) {
        let namespace = normalize(namespace);
        entry.set_namespace(namespace.clone());
        self.namespaces
            .entry(namespace)
            .or_default()
            .functions
            .insert(entry.name().to_string(), entry);
    }

    /// Register in the default namespace.
    pub fn register_std(&mut self, entry: FunctionEntry) {
        self.register(DEFAULT_NAMESPACE, entry);
    }

    pub fn get(&self, namespace: &str, name: &str) -> Option<&FunctionEntry> {
        self.namespaces.get(&normalize(namespace))?.get(name)
    }

    pub fn namespace(&self, namespace: &str) -> Option<&Namespace> {
        self.namespaces.get(&normalize(namespace))
    }

    /// Namespace names, sorted.
    pub fn namespace_names(&self) -> Vec<&str> {
        let mut names: Vec<_> = self.namespaces.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// Every entry, sorted by namespace then name.
    pub fn entries(&self) -> Vec<&FunctionEntry> {
        self.namespace_names()
            .into_iter()
            .filter_map(|ns| self.namespaces.get(ns))
            .flat_map(Namespace::entries)
            .collect()
    }

    /// Resolve and call a function.
    ///
    /// Unknown functions, signature violations and errors raised by the
    /// function all come back as `Object::Error`.
    #[instrument(level = "debug", skip_all, fields(namespace = %namespace, name = %name))]
    pub fn call(&self, namespace: &str, name: &str, args: &[Object]) -> Object {
        match self.get(namespace, name) {
            Some(entry) => entry.call(args),
            None => errors::undefined_function(&normalize(namespace), name).into(),
        }
    }
}

fn normalize(namespace: &str) -> String {
    namespace.trim().to_lowercase()
}

#[cfg(test)]
mod tests;
