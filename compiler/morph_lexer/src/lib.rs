//! Lexer for morph.
//!
//! [`Lexer`] produces tokens lazily: each call to [`Lexer::tokenize`] skips
//! whitespace and comments and classifies the next token using one or two
//! characters of lookahead. The lexer never fails. Unexpected input becomes
//! a [`TokenKind::Illegal`] token and the parser turns it into a diagnostic.
//! Once the input is exhausted every further call returns [`TokenKind::Eof`].

mod cursor;
mod escape;
mod keywords;

use morph_ir::{Span, Token, TokenKind};

use crate::cursor::Cursor;

/// Lazy token stream over a program source.
pub struct Lexer<'src> {
    cursor: Cursor<'src>,
    /// Kind of the previously produced token; decides whether `.5` is a
    /// float literal or a path dot followed by an integer.
    prev: Option<TokenKind>,
    /// Set once `Eof` has been yielded through the `Iterator` impl.
    done: bool,
}

impl<'src> Lexer<'src> {
    pub fn new(source: &'src str) -> Self {
        Lexer {
            cursor: Cursor::new(source),
            prev: None,
            done: false,
        }
    }

    /// Produce the next token.
    pub fn tokenize(&mut self) -> Token {
        let token = match self.skip_trivia() {
            Some(illegal) => illegal,
            None => self.scan_token(),
        };
        self.prev = Some(token.kind);
        token
    }

    /// Skip whitespace, `// line` and `/* block */` comments.
    ///
    /// Returns an illegal token for an unterminated block comment.
    fn skip_trivia(&mut self) -> Option<Token> {
        loop {
            self.cursor.eat_while(char::is_whitespace);
            match (self.cursor.current(), self.cursor.peek()) {
                (Some('/'), Some('/')) => self.cursor.eat_while(|c| c != '\n'),
                (Some('/'), Some('*')) => {
                    let start = self.cursor.pos();
                    self.cursor.bump();
                    self.cursor.bump();
                    if !self.skip_block_comment() {
                        return Some(Token::new(
                            TokenKind::Illegal,
                            "unterminated block comment",
                            self.span_from(start),
                        ));
                    }
                }
                _ => return None,
            }
        }
    }

    /// Consume through the closing `*/`. Returns false at end of input.
    fn skip_block_comment(&mut self) -> bool {
        while let Some(c) = self.cursor.bump() {
            if c == '*' && self.cursor.current() == Some('/') {
                self.cursor.bump();
                return true;
            }
        }
        false
    }

    fn scan_token(&mut self) -> Token {
        let start = self.cursor.pos();
        let Some(c) = self.cursor.current() else {
            return Token::eof(offset(start));
        };

        if is_ident_start(c) {
            return self.scan_ident(start);
        }
        if c == '@' && self.cursor.peek().is_some_and(is_ident_start) {
            self.cursor.bump();
            return self.scan_ident(start);
        }
        if c.is_ascii_digit() {
            return self.scan_number(start);
        }
        if c == '.'
            && self.cursor.peek().is_some_and(|n| n.is_ascii_digit())
            && !self.prev.is_some_and(TokenKind::ends_operand)
        {
            return self.scan_number(start);
        }
        if c == '"' {
            return self.scan_string(start);
        }

        self.cursor.bump();
        let next = self.cursor.current();
        let kind = match (c, next) {
            ('=', Some('=')) => self.double(TokenKind::EqEq),
            ('!', Some('=')) => self.double(TokenKind::NotEq),
            ('<', Some('=')) => self.double(TokenKind::LtEq),
            ('>', Some('=')) => self.double(TokenKind::GtEq),
            ('&', Some('&')) => self.double(TokenKind::AmpAmp),
            ('|', Some('|')) => self.double(TokenKind::PipePipe),
            (':', Some(':')) => self.double(TokenKind::DoubleColon),
            ('~', Some('>')) => self.double(TokenKind::Arrow),
            ('=', _) => TokenKind::Assign,
            ('!', _) => TokenKind::Bang,
            ('<', _) => TokenKind::Lt,
            ('>', _) => TokenKind::Gt,
            (':', _) => TokenKind::Colon,
            ('.', _) => TokenKind::Dot,
            (',', _) => TokenKind::Comma,
            (';', _) => TokenKind::Semicolon,
            ('(', _) => TokenKind::LParen,
            (')', _) => TokenKind::RParen,
            ('{', _) => TokenKind::LBrace,
            ('}', _) => TokenKind::RBrace,
            ('[', _) => TokenKind::LBracket,
            (']', _) => TokenKind::RBracket,
            ('+', _) => TokenKind::Plus,
            ('-', _) => TokenKind::Minus,
            ('*', _) => TokenKind::Star,
            ('/', _) => TokenKind::Slash,
            ('%', _) => TokenKind::Percent,
            _ => TokenKind::Illegal,
        };
        Token::new(kind, self.cursor.slice_from(start), self.span_from(start))
    }

    /// Consume the second character of a two-character operator.
    #[inline]
    fn double(&mut self, kind: TokenKind) -> TokenKind {
        self.cursor.bump();
        kind
    }

    fn scan_ident(&mut self, start: usize) -> Token {
        self.cursor.eat_while(is_ident_continue);
        let text = self.cursor.slice_from(start);
        let kind = if text.starts_with('@') {
            TokenKind::Ident
        } else {
            keywords::lookup(text)
        };
        Token::new(kind, text, self.span_from(start))
    }

    /// Integer: `digits`. Float: `digits . digits` or `. digits`.
    fn scan_number(&mut self, start: usize) -> Token {
        self.cursor.eat_while(|c| c.is_ascii_digit());
        let mut kind = TokenKind::Int;
        if self.cursor.current() == Some('.') && self.cursor.peek().is_some_and(|c| c.is_ascii_digit())
        {
            self.cursor.bump();
            self.cursor.eat_while(|c| c.is_ascii_digit());
            kind = TokenKind::Float;
        }
        Token::new(kind, self.cursor.slice_from(start), self.span_from(start))
    }

    fn scan_string(&mut self, start: usize) -> Token {
        self.cursor.bump();
        let content_start = self.cursor.pos();
        loop {
            match self.cursor.bump() {
                Some('"') => break,
                Some('\\') => {
                    self.cursor.bump();
                }
                Some(_) => {}
                None => {
                    return Token::new(
                        TokenKind::Illegal,
                        "unterminated string literal",
                        self.span_from(start),
                    );
                }
            }
        }
        let raw = self.cursor.slice_from(content_start);
        let raw = &raw[..raw.len() - 1];
        Token::new(
            TokenKind::Str,
            escape::unescape_string(raw),
            self.span_from(start),
        )
    }

    #[inline]
    fn span_from(&self, start: usize) -> Span {
        Span::from_range(start..self.cursor.pos())
    }
}

impl Iterator for Lexer<'_> {
    type Item = Token;

    /// Yields every token including a single trailing `Eof`, then `None`.
    fn next(&mut self) -> Option<Token> {
        if self.done {
            return None;
        }
        let token = self.tokenize();
        if token.is(TokenKind::Eof) {
            self.done = true;
        }
        Some(token)
    }
}

/// Lex a whole source into a token vector ending with exactly one `Eof`.
pub fn lex(source: &str) -> Vec<Token> {
    Lexer::new(source).collect()
}

#[inline]
fn is_ident_start(c: char) -> bool {
    c.is_ascii_alphabetic() || c == '_'
}

#[inline]
fn is_ident_continue(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}

#[inline]
fn offset(pos: usize) -> u32 {
    u32::try_from(pos).unwrap_or(u32::MAX)
}
