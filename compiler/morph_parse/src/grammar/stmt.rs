//! Statement productions.
//!
//! ```text
//! statement := set | when | block | exprStmt
//! set       := "set" target "=" expression
//! when      := ("when" | "if") expression "::" statement ("else" statement)?
//! block     := "{" statement* "}"
//! ```

use morph_ir::{ExprKind, StmtId, StmtKind, TokenKind};
use tracing::trace;

use crate::{PResult, ParseError, Parser};

impl Parser {
    pub(crate) fn parse_stmt(&mut self) -> PResult<StmtId> {
        let kind = self.cursor.current_kind();
        trace!(?kind, "statement");
        match kind {
            TokenKind::Set => self.parse_set(),
            TokenKind::When | TokenKind::If => self.parse_when(),
            TokenKind::LBrace => self.parse_block(),
            _ => {
                let expr = self.parse_expr()?;
                let span = self.expr_span(expr);
                Ok(self.alloc_stmt(StmtKind::Expr(expr), span))
            }
        }
    }

    fn parse_set(&mut self) -> PResult<StmtId> {
        let start = self.cursor.advance().span;
        let target = self.parse_expr()?;
        if !matches!(
            self.ast.expr(target).kind,
            ExprKind::Ident(_) | ExprKind::Path { .. }
        ) {
            return Err(ParseError::new(
                self.expr_span(target),
                "invalid assignment target",
            ));
        }
        self.cursor.expect(TokenKind::Assign, "after assignment target")?;
        let value = self.parse_expr()?;
        let span = start.merge(self.expr_span(value));
        Ok(self.alloc_stmt(StmtKind::Set { target, value }, span))
    }

    fn parse_when(&mut self) -> PResult<StmtId> {
        let start = self.cursor.advance().span;
        let condition = self.parse_expr()?;
        self.cursor.expect(TokenKind::DoubleColon, "after condition")?;
        let consequence = self.parse_stmt()?;
        let alternative = if self.cursor.eat(TokenKind::Else) {
            Some(self.parse_stmt()?)
        } else {
            None
        };
        let end = self.stmt_span(alternative.unwrap_or(consequence));
        Ok(self.alloc_stmt(
            StmtKind::When {
                condition,
                consequence,
                alternative,
            },
            start.merge(end),
        ))
    }

    pub(crate) fn parse_block(&mut self) -> PResult<StmtId> {
        let start = self.cursor.expect(TokenKind::LBrace, "to open block")?;
        let mut stmts = Vec::new();
        loop {
            if self.cursor.eat(TokenKind::Semicolon) {
                continue;
            }
            if self.cursor.check(TokenKind::RBrace) || self.cursor.is_at_end() {
                break;
            }
            stmts.push(self.parse_stmt()?);
        }
        let end = self.cursor.expect(TokenKind::RBrace, "to close block")?;
        Ok(self.alloc_stmt(StmtKind::Block(stmts), start.merge(end)))
    }
}
