//! Morph IR - shared data structures for the morph pipeline.
//!
//! - [`Span`]: half-open byte range into the program source
//! - [`Token`] / [`TokenKind`]: lexer output
//! - [`Ast`]: flat arena of statements and expressions, addressed by
//!   [`StmtId`] and [`ExprId`]
//!
//! Every node keeps the span of the token that introduced it so diagnostics
//! can point back into the source.

mod ast;
mod span;
mod token;

pub use ast::{
    Ast, BinaryOp, Expr, ExprId, ExprKind, PathSegment, SharedAst, Stmt, StmtId, StmtKind,
    UnaryOp,
};
pub use span::{Span, SpanError};
pub use token::{Token, TokenKind};
