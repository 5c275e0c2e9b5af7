//! Expression productions.
//!
//! Pratt parsing: [`Parser::parse_prefix`] handles the token that starts an
//! operand, then the loop in `parse_expr_bp` folds infix and postfix
//! operators while their precedence is above the caller's binding power.

use morph_ir::{BinaryOp, ExprId, ExprKind, PathSegment, Span, TokenKind, UnaryOp};
use morph_stack::ensure_sufficient_stack;

use crate::{PResult, ParseError, Parser};

/// Binding power, lowest to highest.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord)]
enum Precedence {
    Lowest,
    Or,
    And,
    Equals,
    LessGreater,
    Sum,
    Product,
    Prefix,
    Call,
}

fn infix_precedence(kind: TokenKind) -> Precedence {
    match kind {
        TokenKind::PipePipe => Precedence::Or,
        TokenKind::AmpAmp => Precedence::And,
        TokenKind::EqEq | TokenKind::NotEq => Precedence::Equals,
        TokenKind::Lt | TokenKind::LtEq | TokenKind::Gt | TokenKind::GtEq => {
            Precedence::LessGreater
        }
        TokenKind::Plus | TokenKind::Minus => Precedence::Sum,
        TokenKind::Star | TokenKind::Slash | TokenKind::Percent => Precedence::Product,
        TokenKind::LParen | TokenKind::LBracket | TokenKind::Dot => Precedence::Call,
        _ => Precedence::Lowest,
    }
}

impl Parser {
    pub(crate) fn parse_expr(&mut self) -> PResult<ExprId> {
        self.parse_expr_bp(Precedence::Lowest)
    }

    fn parse_expr_bp(&mut self, min: Precedence) -> PResult<ExprId> {
        ensure_sufficient_stack(|| {
            let mut left = self.parse_prefix()?;
            loop {
                let kind = self.cursor.current_kind();
                let precedence = infix_precedence(kind);
                if precedence <= min {
                    break;
                }
                left = match kind {
                    TokenKind::LParen => self.parse_call(left)?,
                    TokenKind::LBracket => self.parse_index(left)?,
                    TokenKind::Dot => self.parse_dot(left)?,
                    _ => self.parse_binary(left, kind, precedence)?,
                };
            }
            Ok(left)
        })
    }

    fn parse_prefix(&mut self) -> PResult<ExprId> {
        let token = self.cursor.current().clone();
        match token.kind {
            TokenKind::Ident => {
                if self.cursor.peek_kind() == TokenKind::Arrow {
                    return Err(ParseError::new(
                        token.span,
                        "arrow functions are only allowed as call arguments",
                    ));
                }
                self.cursor.advance();
                Ok(self.alloc_expr(ExprKind::Ident(token.value), token.span))
            }
            TokenKind::Int => {
                self.cursor.advance();
                let value = token.value.parse::<i64>().map_err(|_| {
                    ParseError::new(
                        token.span,
                        format!("integer literal `{}` is out of range", token.value),
                    )
                })?;
                Ok(self.alloc_expr(ExprKind::Int(value), token.span))
            }
            TokenKind::Float => {
                self.cursor.advance();
                let value = token.value.parse::<f64>().map_err(|_| {
                    ParseError::new(token.span, format!("invalid float literal `{}`", token.value))
                })?;
                Ok(self.alloc_expr(ExprKind::Float(value), token.span))
            }
            TokenKind::Str => {
                self.cursor.advance();
                Ok(self.alloc_expr(ExprKind::Str(token.value), token.span))
            }
            TokenKind::True | TokenKind::False => {
                self.cursor.advance();
                let value = token.is(TokenKind::True);
                Ok(self.alloc_expr(ExprKind::Bool(value), token.span))
            }
            TokenKind::Null => {
                self.cursor.advance();
                Ok(self.alloc_expr(ExprKind::Null, token.span))
            }
            TokenKind::LParen => {
                self.cursor.advance();
                let inner = self.parse_expr()?;
                self.cursor.expect(TokenKind::RParen, "to close group")?;
                Ok(inner)
            }
            TokenKind::LBracket => self.parse_array(),
            TokenKind::LBrace => self.parse_map(),
            TokenKind::Minus | TokenKind::Bang => {
                self.cursor.advance();
                let op = if token.is(TokenKind::Minus) {
                    UnaryOp::Neg
                } else {
                    UnaryOp::Not
                };
                let operand = self.parse_expr_bp(Precedence::Prefix)?;
                let span = token.span.merge(self.expr_span(operand));
                Ok(self.alloc_expr(ExprKind::Prefix { op, operand }, span))
            }
            TokenKind::Illegal => Err(ParseError::illegal(&token)),
            _ => Err(ParseError::expected("expression", &token)),
        }
    }

    fn parse_binary(
        &mut self,
        left: ExprId,
        kind: TokenKind,
        precedence: Precedence,
    ) -> PResult<ExprId> {
        let token = self.cursor.advance();
        let op = BinaryOp::from_token(kind)
            .ok_or_else(|| ParseError::expected("operator", &token))?;
        let right = self.parse_expr_bp(precedence)?;
        let span = self.expr_span(left).merge(self.expr_span(right));
        Ok(self.alloc_expr(ExprKind::Binary { op, left, right }, span))
    }

    /// `[a, b, c]`
    fn parse_array(&mut self) -> PResult<ExprId> {
        let start = self.cursor.advance().span;
        let mut items = Vec::new();
        while !self.cursor.check(TokenKind::RBracket) {
            items.push(self.parse_expr()?);
            if !self.cursor.eat(TokenKind::Comma) {
                break;
            }
        }
        let end = self.cursor.expect(TokenKind::RBracket, "to close array")?;
        Ok(self.alloc_expr(ExprKind::Array(items), start.merge(end)))
    }

    /// `{key: value, "other key": value}`
    fn parse_map(&mut self) -> PResult<ExprId> {
        let start = self.cursor.advance().span;
        let mut entries = Vec::new();
        while !self.cursor.check(TokenKind::RBrace) {
            let key = self.cursor.current().clone();
            if !(matches!(key.kind, TokenKind::Str | TokenKind::Ident) || key.kind.is_keyword()) {
                return Err(ParseError::expected("map key", &key));
            }
            self.cursor.advance();
            self.cursor.expect(TokenKind::Colon, "after map key")?;
            let value = self.parse_expr()?;
            entries.push((key.value, value));
            if !self.cursor.eat(TokenKind::Comma) {
                break;
            }
        }
        let end = self.cursor.expect(TokenKind::RBrace, "to close map")?;
        Ok(self.alloc_expr(ExprKind::Map(entries), start.merge(end)))
    }

    /// Call postfix. The callee must be `name` or `namespace.name`.
    fn parse_call(&mut self, callee: ExprId) -> PResult<ExprId> {
        let callee_span = self.expr_span(callee);
        let (namespace, name) = match &self.ast.expr(callee).kind {
            ExprKind::Ident(name) => (None, name.clone()),
            ExprKind::Path {
                head,
                segment: PathSegment::Field(name),
            } => match &self.ast.expr(*head).kind {
                ExprKind::Ident(namespace) => (Some(namespace.clone()), name.clone()),
                _ => return Err(ParseError::new(callee_span, "expression is not callable")),
            },
            _ => return Err(ParseError::new(callee_span, "expression is not callable")),
        };

        self.cursor.advance();
        let mut args = Vec::new();
        while !self.cursor.check(TokenKind::RParen) {
            args.push(self.parse_call_arg()?);
            if !self.cursor.eat(TokenKind::Comma) {
                break;
            }
        }
        let end = self.cursor.expect(TokenKind::RParen, "to close argument list")?;
        let span = callee_span.merge(end);
        let kind = match namespace {
            Some(namespace) => ExprKind::NamespacedCall {
                namespace,
                name,
                args,
            },
            None => ExprKind::Call { name, args },
        };
        Ok(self.alloc_expr(kind, span))
    }

    /// A call argument: an arrow function literal or any expression.
    fn parse_call_arg(&mut self) -> PResult<ExprId> {
        if self.cursor.check(TokenKind::Ident) && self.cursor.peek_kind() == TokenKind::Arrow {
            let param = self.cursor.advance();
            self.cursor.advance();
            if !self.cursor.check(TokenKind::LBrace) {
                return Err(ParseError::expected(
                    "`{` after `~>`",
                    self.cursor.current(),
                ));
            }
            let body = self.parse_block()?;
            let span = param.span.merge(self.stmt_span(body));
            return Ok(self.alloc_expr(
                ExprKind::Arrow {
                    param: param.value,
                    body,
                },
                span,
            ));
        }
        self.parse_expr()
    }

    /// `head[index]`
    fn parse_index(&mut self, head: ExprId) -> PResult<ExprId> {
        self.cursor.advance();
        let index = self.parse_expr()?;
        let end = self.cursor.expect(TokenKind::RBracket, "to close index")?;
        let span = self.expr_span(head).merge(end);
        Ok(self.alloc_expr(
            ExprKind::Path {
                head,
                segment: PathSegment::Index(index),
            },
            span,
        ))
    }

    /// `head.name`, `head.keyword` or `head.0`.
    fn parse_dot(&mut self, head: ExprId) -> PResult<ExprId> {
        self.cursor.advance();
        let token = self.cursor.current().clone();
        match token.kind {
            TokenKind::Ident => {
                self.cursor.advance();
                Ok(self.field(head, token.value, token.span))
            }
            kind if kind.is_keyword() => {
                self.cursor.advance();
                Ok(self.field(head, token.value, token.span))
            }
            TokenKind::Int => {
                self.cursor.advance();
                self.index_segment(head, &token.value, token.span)
            }
            // `a.0.1` lexes the trailing `0.1` as one float.
            TokenKind::Float if token.value.bytes().all(|b| b.is_ascii_digit() || b == b'.') => {
                self.cursor.advance();
                let mut path = head;
                let mut offset = token.span.start;
                for part in token.value.split('.') {
                    let len = u32::try_from(part.len()).unwrap_or(u32::MAX);
                    let span = Span::new(offset, offset.saturating_add(len));
                    path = self.index_segment(path, part, span)?;
                    offset = span.end.saturating_add(1);
                }
                Ok(path)
            }
            _ => Err(ParseError::expected("field name after `.`", &token)),
        }
    }

    fn field(&mut self, head: ExprId, name: String, span: Span) -> ExprId {
        let span = self.expr_span(head).merge(span);
        self.alloc_expr(
            ExprKind::Path {
                head,
                segment: PathSegment::Field(name),
            },
            span,
        )
    }

    fn index_segment(&mut self, head: ExprId, digits: &str, span: Span) -> PResult<ExprId> {
        let value = digits.parse::<i64>().map_err(|_| {
            ParseError::new(span, format!("index `{digits}` is out of range"))
        })?;
        let index = self.alloc_expr(ExprKind::Int(value), span);
        let span = self.expr_span(head).merge(span);
        Ok(self.alloc_expr(
            ExprKind::Path {
                head,
                segment: PathSegment::Index(index),
            },
            span,
        ))
    }
}
