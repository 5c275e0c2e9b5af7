//! Function calls.
//!
//! `catch`, `coalesce` and `fallback` in `std` see their arguments
//! unevaluated: `catch` traps an error from its first argument and
//! `coalesce` stops at the first non-null one. Every other call evaluates
//! its arguments left to right and dispatches through the registry.

use morph_ir::{ExprId, Span};
use smallvec::SmallVec;
use tracing::trace;

use super::Interpreter;
use crate::errors;
use crate::registry::DEFAULT_NAMESPACE;
use crate::{EvalResult, Object, Signal};

impl Interpreter<'_> {
    pub(super) fn eval_call(
        &self,
        namespace: Option<&str>,
        name: &str,
        args: &[ExprId],
        span: Span,
    ) -> EvalResult {
        let namespace = namespace.unwrap_or(DEFAULT_NAMESPACE);
        if is_default_namespace(namespace) {
            match name {
                "catch" => return self.eval_catch(args),
                "coalesce" | "fallback" => return self.eval_coalesce(name, args),
                _ => {}
            }
        }

        let mut values = SmallVec::<[Object; 4]>::with_capacity(args.len());
        for &arg in args {
            values.push(self.eval_expr(arg)?);
        }
        let result = self.env.registry().call(namespace, name, &values);
        Signal::from_object(result, span)
    }

    fn eval_catch(&self, args: &[ExprId]) -> EvalResult {
        let &[value, fallback] = args else {
            let error = if args.len() < 2 {
                errors::too_few_arguments("catch", 2, args.len())
            } else {
                errors::too_many_arguments("catch", 2, args.len())
            };
            return Err(error.into());
        };
        match self.eval_expr(value) {
            Err(Signal::Error(error)) => {
                trace!(%error, "caught");
                self.eval_expr(fallback)
            }
            other => other,
        }
    }

    fn eval_coalesce(&self, name: &str, args: &[ExprId]) -> EvalResult {
        if args.is_empty() {
            return Err(errors::too_few_arguments(name, 1, 0).into());
        }
        for &arg in args {
            let value = self.eval_expr(arg)?;
            if !value.is_null() {
                return Ok(value);
            }
        }
        Ok(Object::Null)
    }
}

fn is_default_namespace(namespace: &str) -> bool {
    namespace.trim().eq_ignore_ascii_case(DEFAULT_NAMESPACE)
}
