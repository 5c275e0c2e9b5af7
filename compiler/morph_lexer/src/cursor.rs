//! Character cursor over the program source.
//!
//! Advances one Unicode scalar at a time while tracking the byte offset, so
//! tokens can carry byte spans while the lexer reasons about characters.

pub(crate) struct Cursor<'src> {
    source: &'src str,
    pos: usize,
}

impl<'src> Cursor<'src> {
    pub(crate) fn new(source: &'src str) -> Self {
        Cursor { source, pos: 0 }
    }

    /// Current byte offset.
    #[inline]
    pub(crate) fn pos(&self) -> usize {
        self.pos
    }

    #[inline]
    pub(crate) fn is_eof(&self) -> bool {
        self.pos >= self.source.len()
    }

    /// Character at the cursor.
    #[inline]
    pub(crate) fn current(&self) -> Option<char> {
        self.rest().chars().next()
    }

    /// Character after the current one.
    #[inline]
    pub(crate) fn peek(&self) -> Option<char> {
        let mut chars = self.rest().chars();
        chars.next();
        chars.next()
    }

    /// Advance past the current character, returning it.
    #[inline]
    pub(crate) fn bump(&mut self) -> Option<char> {
        let c = self.current()?;
        self.pos += c.len_utf8();
        Some(c)
    }

    /// Advance while `pred` holds for the current character.
    pub(crate) fn eat_while(&mut self, mut pred: impl FnMut(char) -> bool) {
        while let Some(c) = self.current() {
            if !pred(c) {
                break;
            }
            self.pos += c.len_utf8();
        }
    }

    /// Source text between `start` and the cursor.
    #[inline]
    pub(crate) fn slice_from(&self, start: usize) -> &'src str {
        &self.source[start..self.pos]
    }

    #[inline]
    fn rest(&self) -> &'src str {
        &self.source[self.pos..]
    }
}
