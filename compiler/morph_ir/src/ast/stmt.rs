//! Statement nodes.

use std::fmt;

use crate::{ExprId, Span, StmtId};

/// Statement node.
#[derive(Clone, PartialEq)]
pub struct Stmt {
    pub kind: StmtKind,
    pub span: Span,
}

impl Stmt {
    pub fn new(kind: StmtKind, span: Span) -> Self {
        Stmt { kind, span }
    }
}

impl fmt::Debug for Stmt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?} @ {:?}", self.kind, self.span)
    }
}

/// Statement variants.
#[derive(Clone, PartialEq, Debug)]
pub enum StmtKind {
    /// `set target = value`; `target` is an identifier or a path.
    Set { target: ExprId, value: ExprId },
    /// `when condition :: consequence else alternative`
    When {
        condition: ExprId,
        consequence: StmtId,
        alternative: Option<StmtId>,
    },
    /// `{ statements... }`
    Block(Vec<StmtId>),
    /// A bare expression evaluated for its effect (e.g. `drop()`).
    Expr(ExprId),
}
