//! Parse errors.

use morph_diagnostic::{Diagnostic, LineOffsetTable};
use morph_ir::{Span, Token, TokenKind};

/// A parse error located by byte span.
///
/// Converted to a line/column [`Diagnostic`] once parsing is finished.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ParseError {
    pub span: Span,
    pub message: String,
}

impl ParseError {
    pub fn new(span: Span, message: impl Into<String>) -> Self {
        ParseError {
            span,
            message: message.into(),
        }
    }

    /// "expected X, found Y" at the offending token.
    pub fn expected(expected: &str, found: &Token) -> Self {
        if found.is(TokenKind::Illegal) {
            return Self::illegal(found);
        }
        ParseError::new(
            found.span,
            format!("expected {expected}, found {}", describe(found)),
        )
    }

    /// An `Illegal` token from the lexer.
    pub fn illegal(token: &Token) -> Self {
        let message = if token.value.chars().count() == 1 {
            format!("illegal character `{}`", token.value)
        } else {
            token.value.clone()
        };
        ParseError::new(token.span, message)
    }

    pub fn to_diagnostic(&self, source: &str, lines: &LineOffsetTable) -> Diagnostic {
        let (line, col) = lines.offset_to_line_col(source, self.span.start);
        Diagnostic::new(line, col, self.message.clone())
    }
}

fn describe(token: &Token) -> String {
    match token.kind {
        TokenKind::Ident => format!("identifier `{}`", token.value),
        TokenKind::Int | TokenKind::Float => format!("number `{}`", token.value),
        TokenKind::Str => "string literal".to_string(),
        kind => kind.display_name().to_string(),
    }
}
