//! Token types produced by the lexer.

use std::fmt;

use crate::Span;

/// Token kinds.
///
/// Keywords are matched case-insensitively by the lexer; the token keeps
/// the original spelling in [`Token::value`].
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum TokenKind {
    // Literals and names
    Ident,
    Int,
    Float,
    Str,

    // Keywords
    Set,
    When,
    If,
    Else,
    True,
    False,
    Null,

    // Punctuation
    Dot,
    Comma,
    Colon,
    Semicolon,
    LParen,
    RParen,
    LBrace,
    RBrace,
    LBracket,
    RBracket,
    /// `::` separates a `when` condition from its consequence.
    DoubleColon,
    /// `~>` introduces an arrow function body.
    Arrow,

    // Operators
    Assign,
    EqEq,
    NotEq,
    Lt,
    LtEq,
    Gt,
    GtEq,
    Plus,
    Minus,
    Star,
    Slash,
    Percent,
    Bang,
    AmpAmp,
    PipePipe,

    // Control
    Eof,
    /// Unexpected input. The token value carries the offending text or a
    /// description of the problem (e.g. an unterminated string).
    Illegal,
}

impl TokenKind {
    /// Resolve a lowercase-folded word to its keyword kind.
    pub fn keyword(folded: &str) -> Option<TokenKind> {
        match folded {
            "set" => Some(TokenKind::Set),
            "when" => Some(TokenKind::When),
            "if" => Some(TokenKind::If),
            "else" => Some(TokenKind::Else),
            "true" => Some(TokenKind::True),
            "false" => Some(TokenKind::False),
            "null" => Some(TokenKind::Null),
            _ => None,
        }
    }

    pub fn is_keyword(self) -> bool {
        matches!(
            self,
            TokenKind::Set
                | TokenKind::When
                | TokenKind::If
                | TokenKind::Else
                | TokenKind::True
                | TokenKind::False
                | TokenKind::Null
        )
    }

    /// Whether a token of this kind can end an operand.
    ///
    /// The lexer uses this to tell a path dot (`a.5` after an identifier)
    /// from a leading-dot float literal (`.5` at the start of an operand).
    pub fn ends_operand(self) -> bool {
        matches!(
            self,
            TokenKind::Ident
                | TokenKind::Int
                | TokenKind::Float
                | TokenKind::Str
                | TokenKind::True
                | TokenKind::False
                | TokenKind::Null
                | TokenKind::RParen
                | TokenKind::RBracket
                | TokenKind::RBrace
        )
    }

    /// Human-readable name for diagnostics.
    pub const fn display_name(self) -> &'static str {
        match self {
            TokenKind::Ident => "identifier",
            TokenKind::Int => "integer literal",
            TokenKind::Float => "float literal",
            TokenKind::Str => "string literal",
            TokenKind::Set => "`set`",
            TokenKind::When => "`when`",
            TokenKind::If => "`if`",
            TokenKind::Else => "`else`",
            TokenKind::True => "`true`",
            TokenKind::False => "`false`",
            TokenKind::Null => "`null`",
            TokenKind::Dot => "`.`",
            TokenKind::Comma => "`,`",
            TokenKind::Colon => "`:`",
            TokenKind::Semicolon => "`;`",
            TokenKind::LParen => "`(`",
            TokenKind::RParen => "`)`",
            TokenKind::LBrace => "`{`",
            TokenKind::RBrace => "`}`",
            TokenKind::LBracket => "`[`",
            TokenKind::RBracket => "`]`",
            TokenKind::DoubleColon => "`::`",
            TokenKind::Arrow => "`~>`",
            TokenKind::Assign => "`=`",
            TokenKind::EqEq => "`==`",
            TokenKind::NotEq => "`!=`",
            TokenKind::Lt => "`<`",
            TokenKind::LtEq => "`<=`",
            TokenKind::Gt => "`>`",
            TokenKind::GtEq => "`>=`",
            TokenKind::Plus => "`+`",
            TokenKind::Minus => "`-`",
            TokenKind::Star => "`*`",
            TokenKind::Slash => "`/`",
            TokenKind::Percent => "`%`",
            TokenKind::Bang => "`!`",
            TokenKind::AmpAmp => "`&&`",
            TokenKind::PipePipe => "`||`",
            TokenKind::Eof => "end of input",
            TokenKind::Illegal => "illegal token",
        }
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

/// A lexed token: kind, literal text and source span.
///
/// For string literals `value` holds the unescaped contents; for every
/// other kind it is the source text of the token.
#[derive(Clone, Eq, PartialEq, Hash)]
pub struct Token {
    pub kind: TokenKind,
    pub value: String,
    pub span: Span,
}

impl Token {
    pub fn new(kind: TokenKind, value: impl Into<String>, span: Span) -> Self {
        Token {
            kind,
            value: value.into(),
            span,
        }
    }

    pub fn eof(offset: u32) -> Self {
        Token::new(TokenKind::Eof, "", Span::new(offset, offset))
    }

    #[inline]
    pub fn is(&self, kind: TokenKind) -> bool {
        self.kind == kind
    }
}

impl fmt::Debug for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}({:?}) @ {:?}", self.kind, self.value, self.span)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keywords_resolve_from_folded_text() {
        assert_eq!(TokenKind::keyword("set"), Some(TokenKind::Set));
        assert_eq!(TokenKind::keyword("when"), Some(TokenKind::When));
        assert_eq!(TokenKind::keyword("if"), Some(TokenKind::If));
        assert_eq!(TokenKind::keyword("null"), Some(TokenKind::Null));
        assert_eq!(TokenKind::keyword("SET"), None);
        assert_eq!(TokenKind::keyword("entry"), None);
    }

    #[test]
    fn operand_enders() {
        assert!(TokenKind::Ident.ends_operand());
        assert!(TokenKind::RBracket.ends_operand());
        assert!(!TokenKind::Plus.ends_operand());
        assert!(!TokenKind::LParen.ends_operand());
    }

    #[test]
    fn keyword_kinds_are_flagged() {
        assert!(TokenKind::Else.is_keyword());
        assert!(!TokenKind::Ident.is_keyword());
    }
}
