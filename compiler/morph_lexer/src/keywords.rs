//! Keyword resolution.
//!
//! Keywords are case-insensitive: `SET`, `Set` and `set` all lex as
//! [`TokenKind::Set`]. Identifiers keep their case.

use morph_ir::TokenKind;

/// Classify an identifier-shaped word as a keyword or a plain identifier.
///
/// Every keyword is 2-5 ASCII letters, so anything outside that length is
/// rejected before folding.
#[inline]
pub(crate) fn lookup(text: &str) -> TokenKind {
    if !(2..=5).contains(&text.len()) {
        return TokenKind::Ident;
    }
    let folded = text.to_ascii_lowercase();
    TokenKind::keyword(&folded).unwrap_or(TokenKind::Ident)
}
