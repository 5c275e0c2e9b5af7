//! Arrow functions: `param ~> { body }` passed to higher-order builtins.
//!
//! An arrow captures the program it was written in and the registry it was
//! evaluated against, never the caller's variables. Each call runs the body
//! in a fresh [`Environment`] holding only the parameter; the caller reads
//! the results back out of the returned [`ArrowFrame`].

use std::fmt;
use std::sync::Arc;

use morph_ir::{SharedAst, StmtId};
use tracing::trace;

use crate::environment::Environment;
use crate::interpreter::Interpreter;
use crate::registry::FunctionRegistry;
use crate::{Object, Signal};

/// Binding the body assigns to hand a result back to the caller.
pub const RETURN_NAME: &str = "return";

#[derive(Clone)]
pub struct ArrowFunction {
    param: String,
    body: StmtId,
    ast: SharedAst,
    registry: Arc<FunctionRegistry>,
}

impl ArrowFunction {
    pub fn new(
        param: impl Into<String>,
        body: StmtId,
        ast: SharedAst,
        registry: Arc<FunctionRegistry>,
    ) -> Self {
        ArrowFunction {
            param: param.into(),
            body,
            ast,
            registry,
        }
    }

    pub fn param(&self) -> &str {
        &self.param
    }

    /// Whether both handles run the same body of the same program.
    pub fn same_body(&self, other: &ArrowFunction) -> bool {
        Arc::ptr_eq(&self.ast, &other.ast) && self.body == other.body
    }

    /// Run the body with the parameter bound to `entry`.
    ///
    /// An error or terminate signal raised by the body is returned as-is;
    /// the builtin decides how to surface it.
    pub fn call(&self, entry: Object) -> Result<ArrowFrame, Signal> {
        trace!(param = %self.param, "arrow call");
        let mut env = Environment::new(Arc::clone(&self.registry));
        env.set(self.param.clone(), entry);
        let mut interpreter = Interpreter::new(&self.ast, env);
        interpreter.exec_stmt(self.body)?;
        Ok(ArrowFrame {
            param: self.param.clone(),
            return_by_path: interpreter.return_by_path(),
            env: interpreter.into_env(),
        })
    }
}

impl fmt::Debug for ArrowFunction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ArrowFunction")
            .field("param", &self.param)
            .field("body", &self.body)
            .finish_non_exhaustive()
    }
}

/// The environment an arrow body finished with.
#[derive(Debug)]
pub struct ArrowFrame {
    param: String,
    return_by_path: bool,
    env: Environment,
}

impl ArrowFrame {
    /// The value bound to `return`, if the body assigned it.
    pub fn returned(&self) -> Option<&Object> {
        self.env.get(RETURN_NAME)
    }

    /// Whether `return` was built field by field (`set return.key = ...`)
    /// instead of bound as a whole value.
    pub fn returned_by_path(&self) -> bool {
        self.return_by_path
    }

    /// The parameter binding after the body ran.
    pub fn entry(&self) -> Option<&Object> {
        self.env.get(&self.param)
    }
}
