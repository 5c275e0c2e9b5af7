//! Token cursor for navigating the token stream.

use morph_ir::{Span, Token, TokenKind};

use crate::error::ParseError;

/// Cursor over a lexed token vector.
///
/// Invariant: the vector is non-empty and ends with `Eof`, and the cursor
/// never moves past that final token.
pub(crate) struct Cursor {
    tokens: Vec<Token>,
    pos: usize,
}

impl Cursor {
    pub(crate) fn new(mut tokens: Vec<Token>) -> Self {
        if !tokens.last().is_some_and(|t| t.is(TokenKind::Eof)) {
            let end = tokens.last().map_or(0, |t| t.span.end);
            tokens.push(Token::eof(end));
        }
        Cursor { tokens, pos: 0 }
    }

    /// Current position, used to detect whether a parse step made progress.
    #[inline]
    pub(crate) fn position(&self) -> usize {
        self.pos
    }

    #[inline]
    pub(crate) fn current(&self) -> &Token {
        &self.tokens[self.pos]
    }

    #[inline]
    pub(crate) fn current_kind(&self) -> TokenKind {
        self.current().kind
    }

    #[inline]
    pub(crate) fn current_span(&self) -> Span {
        self.current().span
    }

    /// Kind of the token after the current one.
    pub(crate) fn peek_kind(&self) -> TokenKind {
        self.tokens
            .get(self.pos + 1)
            .map_or(TokenKind::Eof, |t| t.kind)
    }

    #[inline]
    pub(crate) fn check(&self, kind: TokenKind) -> bool {
        self.current_kind() == kind
    }

    #[inline]
    pub(crate) fn is_at_end(&self) -> bool {
        self.check(TokenKind::Eof)
    }

    /// Move past the current token and return it. Stays on `Eof`.
    pub(crate) fn advance(&mut self) -> Token {
        let token = self.current().clone();
        if self.pos + 1 < self.tokens.len() {
            self.pos += 1;
        }
        token
    }

    /// Consume the current token if it has the given kind.
    pub(crate) fn eat(&mut self, kind: TokenKind) -> bool {
        if self.check(kind) {
            self.advance();
            true
        } else {
            false
        }
    }

    /// Consume a token of the given kind or fail with
    /// "expected `kind` {context}, found ...".
    pub(crate) fn expect(&mut self, kind: TokenKind, context: &str) -> Result<Span, ParseError> {
        if self.check(kind) {
            Ok(self.advance().span)
        } else {
            Err(ParseError::expected(
                &format!("{} {context}", kind.display_name()),
                self.current(),
            ))
        }
    }
}
