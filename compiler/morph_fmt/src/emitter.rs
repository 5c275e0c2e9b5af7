//! Output emitter.

use crate::INDENT_WIDTH;

/// Sink for formatted text.
pub trait Emitter {
    fn emit(&mut self, text: &str);

    fn emit_newline(&mut self);

    /// Emit indentation for `level` nesting levels.
    fn emit_indent(&mut self, level: usize);
}

/// In-memory emitter.
#[derive(Default)]
pub struct StringEmitter {
    buffer: String,
}

impl StringEmitter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn output(self) -> String {
        self.buffer
    }

    /// Ensure the output ends with exactly one newline, unless empty.
    pub fn ensure_trailing_newline(&mut self) {
        while self.buffer.ends_with("\n\n") {
            self.buffer.pop();
        }
        if !self.buffer.is_empty() && !self.buffer.ends_with('\n') {
            self.buffer.push('\n');
        }
    }
}

impl Emitter for StringEmitter {
    #[inline]
    fn emit(&mut self, text: &str) {
        self.buffer.push_str(text);
    }

    #[inline]
    fn emit_newline(&mut self) {
        self.buffer.push('\n');
    }

    fn emit_indent(&mut self, level: usize) {
        for _ in 0..level * INDENT_WIDTH {
            self.buffer.push(' ');
        }
    }
}
