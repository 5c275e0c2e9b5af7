//! Line and column computation from byte offsets.
//!
//! For a single lookup use [`offset_to_line_col`]. When many diagnostics are
//! reported against the same source, build a [`LineOffsetTable`] once and
//! query it with a binary search per lookup.

use morph_ir::Span;

/// Pre-computed line start offsets for O(log L) position lookup.
///
/// ```
/// use morph_diagnostic::span_utils::LineOffsetTable;
///
/// let source = "set a = 1\nset b = 2";
/// let table = LineOffsetTable::build(source);
///
/// assert_eq!(table.offset_to_line_col(source, 0), (1, 1));
/// assert_eq!(table.offset_to_line_col(source, 14), (2, 5));
/// ```
#[derive(Clone, Debug, Default)]
pub struct LineOffsetTable {
    /// Byte offset of each line start; `offsets[0] == 0`.
    offsets: Vec<u32>,
}

impl LineOffsetTable {
    pub fn build(source: &str) -> Self {
        let mut offsets = vec![0u32];
        for (i, byte) in source.bytes().enumerate() {
            if byte == b'\n' {
                offsets.push(u32::try_from(i + 1).unwrap_or(u32::MAX));
            }
        }
        LineOffsetTable { offsets }
    }

    /// 1-based line containing `offset`.
    #[inline]
    pub fn line_from_offset(&self, offset: u32) -> u32 {
        let line_idx = match self.offsets.binary_search(&offset) {
            Ok(exact) => exact,
            Err(insert) => insert.saturating_sub(1),
        };
        u32::try_from(line_idx).unwrap_or(u32::MAX - 1) + 1
    }

    /// 1-based (line, column); the column counts characters, not bytes.
    pub fn offset_to_line_col(&self, source: &str, offset: u32) -> (u32, u32) {
        let line = self.line_from_offset(offset);
        let line_start = self
            .offsets
            .get((line - 1) as usize)
            .copied()
            .unwrap_or(0) as usize;
        (line, column(source, line_start, offset as usize))
    }

    pub fn line_count(&self) -> usize {
        self.offsets.len()
    }
}

/// 1-based line where `span` starts.
pub fn line_number(source: &str, span: Span) -> u32 {
    offset_to_line_col(source, span.start).0
}

/// 1-based (line, column) of a byte offset, by linear scan.
pub fn offset_to_line_col(source: &str, offset: u32) -> (u32, u32) {
    let offset = (offset as usize).min(source.len());
    let before = &source.as_bytes()[..offset];
    let line = before.iter().filter(|&&b| b == b'\n').count();
    let line_start = before
        .iter()
        .rposition(|&b| b == b'\n')
        .map_or(0, |nl| nl + 1);
    let line = u32::try_from(line).unwrap_or(u32::MAX - 1) + 1;
    (line, column(source, line_start, offset))
}

fn column(source: &str, line_start: usize, offset: usize) -> u32 {
    let end = offset.min(source.len());
    // Offsets from the lexer always sit on char boundaries; fall back to
    // byte counting if a caller passes one that does not.
    let count = source
        .get(line_start..end)
        .map_or(end.saturating_sub(line_start), |s| s.chars().count());
    u32::try_from(count).unwrap_or(u32::MAX - 1) + 1
}

#[cfg(test)]
mod tests;
