//! Non-local control flow out of evaluation.

use std::fmt;

use morph_ir::Span;

use crate::Object;

/// A runtime error with the source location it was raised at.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RuntimeError {
    pub message: String,
    /// Set by the evaluator when the error crosses an expression boundary.
    pub span: Option<Span>,
}

impl RuntimeError {
    pub fn new(message: impl Into<String>) -> Self {
        RuntimeError {
            message: message.into(),
            span: None,
        }
    }

    /// Attach `span` unless a more precise one is already set.
    #[must_use]
    pub fn with_span(mut self, span: Span) -> Self {
        self.span.get_or_insert(span);
        self
    }
}

impl fmt::Display for RuntimeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

impl std::error::Error for RuntimeError {}

impl From<RuntimeError> for Object {
    fn from(error: RuntimeError) -> Self {
        Object::Error(error.message)
    }
}

/// Why evaluation stopped early.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Signal {
    Error(RuntimeError),
    /// `drop()` or `emit()` fired. With `drop` the environment is discarded.
    Terminate { drop: bool },
}

impl Signal {
    /// Convert an `Error`/`Terminate` object into a signal. Other objects
    /// pass through as `Ok`.
    pub fn from_object(object: Object, span: Span) -> Result<Object, Signal> {
        match object {
            Object::Error(message) => Err(Signal::Error(RuntimeError::new(message).with_span(span))),
            Object::Terminate { drop } => Err(Signal::Terminate { drop }),
            other => Ok(other),
        }
    }

    /// The object form of this signal, as seen by builtins.
    pub fn into_object(self) -> Object {
        match self {
            Signal::Error(error) => error.into(),
            Signal::Terminate { drop } => Object::Terminate { drop },
        }
    }
}

impl From<RuntimeError> for Signal {
    fn from(error: RuntimeError) -> Self {
        Signal::Error(error)
    }
}

/// Result of evaluating an expression.
pub type EvalResult = Result<Object, Signal>;
