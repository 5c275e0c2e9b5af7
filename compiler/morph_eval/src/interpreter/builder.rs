//! `InterpreterBuilder` for setting up a run.

use std::sync::Arc;

use morph_ir::SharedAst;

use super::Interpreter;
use crate::environment::Environment;
use crate::registry::FunctionRegistry;
use crate::{Object, INPUT_NAME};

/// Builder for an [`Interpreter`].
///
/// Without an explicit environment the run starts from an empty one over
/// `registry` (the builtins when unset). The input, when given, is bound to
/// `@in` after the environment is chosen.
pub struct InterpreterBuilder<'a> {
    ast: &'a SharedAst,
    registry: Option<Arc<FunctionRegistry>>,
    env: Option<Environment>,
    input: Option<Object>,
}

impl<'a> InterpreterBuilder<'a> {
    pub fn new(ast: &'a SharedAst) -> Self {
        InterpreterBuilder {
            ast,
            registry: None,
            env: None,
            input: None,
        }
    }

    #[must_use]
    pub fn registry(mut self, registry: Arc<FunctionRegistry>) -> Self {
        self.registry = Some(registry);
        self
    }

    /// Start from an existing environment; its registry wins over
    /// [`registry`](Self::registry).
    #[must_use]
    pub fn env(mut self, env: Environment) -> Self {
        self.env = Some(env);
        self
    }

    #[must_use]
    pub fn input(mut self, input: Object) -> Self {
        self.input = Some(input);
        self
    }

    pub fn build(self) -> Interpreter<'a> {
        let registry = self.registry;
        let mut env = self.env.unwrap_or_else(|| {
            Environment::new(registry.unwrap_or_else(|| Arc::new(FunctionRegistry::with_builtins())))
        });
        if let Some(input) = self.input {
            env.set(INPUT_NAME, input);
        }
        Interpreter::new(self.ast, env)
    }
}
