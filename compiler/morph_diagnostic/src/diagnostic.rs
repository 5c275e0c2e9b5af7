use std::fmt;

use morph_ir::Span;

use crate::span_utils::offset_to_line_col;

/// A located message: `line:col: message`.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Diagnostic {
    /// 1-based line.
    pub line: u32,
    /// 1-based column, counted in characters.
    pub col: u32,
    pub message: String,
}

impl Diagnostic {
    pub fn new(line: u32, col: u32, message: impl Into<String>) -> Self {
        Diagnostic {
            line,
            col,
            message: message.into(),
        }
    }

    /// Locate `span` in `source` and attach `message`.
    pub fn at(source: &str, span: Span, message: impl Into<String>) -> Self {
        let (line, col) = offset_to_line_col(source, span.start);
        Diagnostic::new(line, col, message)
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}: {}", self.line, self.col, self.message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn located_from_span() {
        let source = "set a = 1\nset b = ?";
        let diag = Diagnostic::at(source, Span::new(18, 19), "illegal token: ?");
        assert_eq!(diag.line, 2);
        assert_eq!(diag.col, 9);
        assert_eq!(diag.to_string(), "2:9: illegal token: ?");
    }
}
