//! Flat AST arena.
//!
//! Statements and expressions live in two contiguous vectors and refer to
//! each other through [`StmtId`] / [`ExprId`] indices instead of boxes. A
//! parsed program is immutable, so the arena is shared between concurrent
//! runs and captured by arrow functions as a [`SharedAst`].

mod expr;
mod operators;
mod stmt;

use std::fmt;
use std::sync::Arc;

pub use expr::{Expr, ExprKind, PathSegment};
pub use operators::{BinaryOp, UnaryOp};
pub use stmt::{Stmt, StmtKind};

/// Index into the expression arena.
#[derive(Copy, Clone, Eq, PartialEq, Hash)]
#[repr(transparent)]
pub struct ExprId(u32);

impl ExprId {
    #[inline]
    pub const fn new(index: u32) -> Self {
        ExprId(index)
    }

    #[inline]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Debug for ExprId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ExprId({})", self.0)
    }
}

/// Index into the statement arena.
#[derive(Copy, Clone, Eq, PartialEq, Hash)]
#[repr(transparent)]
pub struct StmtId(u32);

impl StmtId {
    #[inline]
    pub const fn new(index: u32) -> Self {
        StmtId(index)
    }

    #[inline]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Debug for StmtId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "StmtId({})", self.0)
    }
}

/// Parsed program: node arenas plus the top-level statement list.
#[derive(Clone, Default, PartialEq)]
pub struct Ast {
    exprs: Vec<Expr>,
    stmts: Vec<Stmt>,
    root: Vec<StmtId>,
}

/// An immutable AST shared between runs and captured by arrow functions.
pub type SharedAst = Arc<Ast>;

impl Ast {
    pub fn new() -> Self {
        Self::default()
    }

    /// Allocate an expression, returning its id.
    pub fn alloc_expr(&mut self, expr: Expr) -> ExprId {
        let id = ExprId::new(to_u32(self.exprs.len()));
        self.exprs.push(expr);
        id
    }

    /// Allocate a statement, returning its id.
    pub fn alloc_stmt(&mut self, stmt: Stmt) -> StmtId {
        let id = StmtId::new(to_u32(self.stmts.len()));
        self.stmts.push(stmt);
        id
    }

    /// Append a top-level statement.
    pub fn push_root(&mut self, stmt: StmtId) {
        self.root.push(stmt);
    }

    /// Top-level statements in program order.
    pub fn root(&self) -> &[StmtId] {
        &self.root
    }

    /// Look up an expression.
    ///
    /// Ids are only ever produced by this arena, so indexing is in bounds.
    #[inline]
    pub fn expr(&self, id: ExprId) -> &Expr {
        &self.exprs[id.index()]
    }

    #[inline]
    pub fn stmt(&self, id: StmtId) -> &Stmt {
        &self.stmts[id.index()]
    }

    pub fn expr_count(&self) -> usize {
        self.exprs.len()
    }

    pub fn stmt_count(&self) -> usize {
        self.stmts.len()
    }

    pub fn into_shared(self) -> SharedAst {
        Arc::new(self)
    }
}

impl fmt::Debug for Ast {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Ast")
            .field("root", &self.root)
            .field("stmts", &self.stmts)
            .field("exprs", &self.exprs)
            .finish()
    }
}

fn to_u32(len: usize) -> u32 {
    u32::try_from(len).unwrap_or(u32::MAX)
}
