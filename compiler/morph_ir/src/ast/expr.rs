//! Expression nodes.

use std::fmt;

use super::operators::{BinaryOp, UnaryOp};
use crate::{ExprId, Span, StmtId};

/// Expression node.
#[derive(Clone, PartialEq)]
pub struct Expr {
    pub kind: ExprKind,
    pub span: Span,
}

impl Expr {
    pub fn new(kind: ExprKind, span: Span) -> Self {
        Expr { kind, span }
    }
}

impl fmt::Debug for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?} @ {:?}", self.kind, self.span)
    }
}

/// One step of a path expression.
#[derive(Clone, PartialEq, Debug)]
pub enum PathSegment {
    /// `head.name`
    Field(String),
    /// `head[expr]` (also `head.0`, which the parser lowers to an integer
    /// literal index).
    Index(ExprId),
}

/// Expression variants.
#[derive(Clone, PartialEq, Debug)]
pub enum ExprKind {
    Int(i64),
    Float(f64),
    Bool(bool),
    Null,
    Str(String),
    Array(Vec<ExprId>),
    /// Map literal entries in source order; duplicate keys keep the last value.
    Map(Vec<(String, ExprId)>),
    Ident(String),

    /// Left-deep chain: `a.b.c` is `Path(Path(a, b), c)`.
    Path {
        head: ExprId,
        segment: PathSegment,
    },

    Prefix {
        op: UnaryOp,
        operand: ExprId,
    },
    Binary {
        op: BinaryOp,
        left: ExprId,
        right: ExprId,
    },

    /// `name(args...)`, resolved in the `std` namespace.
    Call {
        name: String,
        args: Vec<ExprId>,
    },
    /// `namespace.name(args...)`.
    NamespacedCall {
        namespace: String,
        name: String,
        args: Vec<ExprId>,
    },

    /// `param ~> { body }`. Only produced in call-argument position.
    Arrow {
        param: String,
        body: StmtId,
    },
}
