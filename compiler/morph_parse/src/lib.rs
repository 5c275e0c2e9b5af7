//! Pratt parser for morph.
//!
//! Produces the flat [`Ast`] arena from `morph_ir`. Parsing never stops at
//! the first problem: a failed statement is recorded, the cursor skips to
//! the next statement keyword, and parsing resumes. [`parse`] returns the
//! AST together with every diagnostic found; a non-empty list means the
//! program must not be run.

mod cursor;
mod error;
mod grammar;

use morph_diagnostic::{Diagnostic, LineOffsetTable};
use morph_ir::{Ast, Expr, ExprId, Span, Stmt, StmtId, TokenKind};
use tracing::debug;

use crate::cursor::Cursor;
pub use crate::error::ParseError;

/// Result type for grammar functions.
pub(crate) type PResult<T> = Result<T, ParseError>;

/// Output of [`parse`].
#[derive(Debug)]
pub struct ParseOutput {
    pub ast: Ast,
    pub errors: Vec<Diagnostic>,
}

impl ParseOutput {
    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }
}

/// Parse a whole program.
pub fn parse(source: &str) -> ParseOutput {
    let tokens = morph_lexer::lex(source);
    let mut parser = Parser::new(tokens);
    parser.parse_program();

    let errors = if parser.errors.is_empty() {
        Vec::new()
    } else {
        let lines = LineOffsetTable::build(source);
        parser
            .errors
            .iter()
            .map(|e| e.to_diagnostic(source, &lines))
            .collect()
    };
    debug!(
        statements = parser.ast.root().len(),
        errors = errors.len(),
        "parsed program"
    );
    ParseOutput {
        ast: parser.ast,
        errors,
    }
}

/// Parser state.
pub(crate) struct Parser {
    cursor: Cursor,
    ast: Ast,
    errors: Vec<ParseError>,
}

impl Parser {
    fn new(tokens: Vec<morph_ir::Token>) -> Self {
        Parser {
            cursor: Cursor::new(tokens),
            ast: Ast::new(),
            errors: Vec::new(),
        }
    }

    fn parse_program(&mut self) {
        while !self.cursor.is_at_end() {
            if self.cursor.eat(TokenKind::Semicolon) {
                continue;
            }
            let before = self.cursor.position();
            match self.parse_stmt() {
                Ok(stmt) => self.ast.push_root(stmt),
                Err(error) => {
                    self.errors.push(error);
                    self.synchronize(before);
                }
            }
        }
    }

    /// Skip to the next token that can start a fresh statement.
    ///
    /// Always consumes at least one token so a failing statement cannot
    /// stall the loop.
    fn synchronize(&mut self, before: usize) {
        if self.cursor.position() == before {
            self.cursor.advance();
        }
        while !matches!(
            self.cursor.current_kind(),
            TokenKind::Set | TokenKind::When | TokenKind::If | TokenKind::Semicolon | TokenKind::Eof
        ) {
            self.cursor.advance();
        }
    }

    #[inline]
    fn alloc_expr(&mut self, expr: morph_ir::ExprKind, span: Span) -> ExprId {
        self.ast.alloc_expr(Expr::new(expr, span))
    }

    #[inline]
    fn alloc_stmt(&mut self, stmt: morph_ir::StmtKind, span: Span) -> StmtId {
        self.ast.alloc_stmt(Stmt::new(stmt, span))
    }

    #[inline]
    fn expr_span(&self, id: ExprId) -> Span {
        self.ast.expr(id).span
    }

    #[inline]
    fn stmt_span(&self, id: StmtId) -> Span {
        self.ast.stmt(id).span
    }
}
