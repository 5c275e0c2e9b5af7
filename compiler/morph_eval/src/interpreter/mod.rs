//! Tree-walking interpreter.
//!
//! Statements execute against one [`Environment`]; expressions evaluate to
//! an [`EvalResult`]. Errors and terminate signals travel up as
//! `Err(Signal)`, so `?` after every sub-evaluation gives the propagation
//! rules: a block stops at the first signal, `when` does not consume them,
//! and the run ends on them at the top level.

mod builder;
mod call;
mod path;

use std::sync::Arc;

use morph_ir::{Ast, BinaryOp, ExprId, ExprKind, SharedAst, StmtId, StmtKind};
use morph_stack::ensure_sufficient_stack;
use tracing::{debug, instrument};

pub use builder::InterpreterBuilder;

use crate::arrow::ArrowFunction;
use crate::environment::Environment;
use crate::object::ObjectMap;
use crate::operators::{evaluate_binary, evaluate_unary};
use crate::{EvalResult, Object, Signal};

/// Evaluator for one program run or one arrow-function call.
pub struct Interpreter<'a> {
    ast: &'a SharedAst,
    env: Environment,
    /// Whether `return` was created by a path write rather than bound whole.
    return_by_path: bool,
}

impl<'a> Interpreter<'a> {
    pub fn new(ast: &'a SharedAst, env: Environment) -> Self {
        Interpreter {
            ast,
            env,
            return_by_path: false,
        }
    }

    pub fn builder(ast: &'a SharedAst) -> InterpreterBuilder<'a> {
        InterpreterBuilder::new(ast)
    }

    pub fn env(&self) -> &Environment {
        &self.env
    }

    pub fn env_mut(&mut self) -> &mut Environment {
        &mut self.env
    }

    pub fn into_env(self) -> Environment {
        self.env
    }

    /// Whether the current `return` binding was built through path writes
    /// such as `set return.key = k`.
    pub fn return_by_path(&self) -> bool {
        self.return_by_path
    }

    /// Execute the program's top-level statements in order.
    #[instrument(level = "debug", skip_all, fields(statements = self.ast.root().len()))]
    pub fn run(&mut self) -> Result<(), Signal> {
        let ast: &'a Ast = self.ast;
        for &stmt in ast.root() {
            if let Err(signal) = self.exec_stmt(stmt) {
                match &signal {
                    Signal::Terminate { drop } => debug!(drop, "run terminated"),
                    Signal::Error(error) => debug!(%error, "run failed"),
                }
                return Err(signal);
            }
        }
        Ok(())
    }

    pub fn exec_stmt(&mut self, id: StmtId) -> Result<(), Signal> {
        ensure_sufficient_stack(|| self.exec_stmt_inner(id))
    }

    fn exec_stmt_inner(&mut self, id: StmtId) -> Result<(), Signal> {
        let ast: &'a Ast = self.ast;
        match &ast.stmt(id).kind {
            StmtKind::Set { target, value } => {
                let value = self.eval_expr(*value)?;
                self.assign(*target, value)
            }
            StmtKind::When {
                condition,
                consequence,
                alternative,
            } => {
                if self.eval_expr(*condition)?.is_truthy() {
                    self.exec_stmt(*consequence)
                } else if let Some(alternative) = alternative {
                    self.exec_stmt(*alternative)
                } else {
                    Ok(())
                }
            }
            StmtKind::Block(stmts) => {
                for &stmt in stmts {
                    self.exec_stmt(stmt)?;
                }
                Ok(())
            }
            StmtKind::Expr(expr) => self.eval_expr(*expr).map(|_| ()),
        }
    }

    /// Evaluate an expression. Errors raised without a location get this
    /// expression's span.
    pub fn eval_expr(&self, id: ExprId) -> EvalResult {
        ensure_sufficient_stack(|| {
            self.eval_expr_inner(id).map_err(|signal| match signal {
                Signal::Error(error) => Signal::Error(error.with_span(self.ast.expr(id).span)),
                other => other,
            })
        })
    }

    fn eval_expr_inner(&self, id: ExprId) -> EvalResult {
        let expr = self.ast.expr(id);
        match &expr.kind {
            ExprKind::Int(n) => Ok(Object::Integer(*n)),
            ExprKind::Float(f) => Ok(Object::Float(*f)),
            ExprKind::Bool(b) => Ok(Object::Boolean(*b)),
            ExprKind::Null => Ok(Object::Null),
            ExprKind::Str(s) => Ok(Object::string(s.as_str())),
            ExprKind::Array(items) => {
                let items = items
                    .iter()
                    .map(|item| self.eval_expr(*item))
                    .collect::<Result<Vec<_>, _>>()?;
                Ok(Object::array(items))
            }
            ExprKind::Map(entries) => {
                let mut map = ObjectMap::new();
                for (key, value) in entries {
                    map.insert(key.clone(), self.eval_expr(*value)?);
                }
                Ok(Object::map(map))
            }
            ExprKind::Ident(name) => Ok(self.env.get(name).cloned().unwrap_or(Object::Null)),
            ExprKind::Path { head, segment } => {
                let base = self.eval_expr(*head)?;
                self.read_segment(&base, segment)
            }
            ExprKind::Prefix { op, operand } => {
                let operand = self.eval_expr(*operand)?;
                Ok(evaluate_unary(*op, &operand)?)
            }
            ExprKind::Binary { op, left, right } => self.eval_binary(*op, *left, *right),
            ExprKind::Call { name, args } => self.eval_call(None, name, args, expr.span),
            ExprKind::NamespacedCall {
                namespace,
                name,
                args,
            } => self.eval_call(Some(namespace), name, args, expr.span),
            ExprKind::Arrow { param, body } => Ok(Object::ArrowFunction(ArrowFunction::new(
                param.as_str(),
                *body,
                Arc::clone(self.ast),
                Arc::clone(self.env.registry()),
            ))),
        }
    }

    fn eval_binary(&self, op: BinaryOp, left: ExprId, right: ExprId) -> EvalResult {
        let left = self.eval_expr(left)?;
        match op {
            BinaryOp::And if !left.is_truthy() => Ok(Object::Boolean(false)),
            BinaryOp::Or if left.is_truthy() => Ok(Object::Boolean(true)),
            _ => {
                let right = self.eval_expr(right)?;
                Ok(evaluate_binary(op, &left, &right)?)
            }
        }
    }
}

#[cfg(test)]
mod tests;
