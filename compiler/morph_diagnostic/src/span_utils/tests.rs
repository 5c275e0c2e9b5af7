use super::*;
use pretty_assertions::assert_eq;

#[test]
fn first_line_positions() {
    assert_eq!(offset_to_line_col("set a = 1", 0), (1, 1));
    assert_eq!(offset_to_line_col("set a = 1", 4), (1, 5));
}

#[test]
fn positions_after_newlines() {
    let source = "a\nbb\nccc";
    assert_eq!(offset_to_line_col(source, 2), (2, 1));
    assert_eq!(offset_to_line_col(source, 6), (3, 2));
    assert_eq!(line_number(source, Span::new(5, 8)), 3);
}

#[test]
fn columns_count_characters() {
    // "é" is two bytes; the column after it is still 2.
    let source = "é = 1";
    assert_eq!(offset_to_line_col(source, 2), (1, 2));
}

#[test]
fn offset_past_end_clamps() {
    assert_eq!(offset_to_line_col("ab", 99), (1, 3));
}

#[test]
fn table_matches_linear_scan() {
    let source = "set a = 1\n\nwhen a == 1 :: {\n  set b = \"ü\"\n}\n";
    let table = LineOffsetTable::build(source);
    for offset in 0..=u32::try_from(source.len()).unwrap() {
        if source.is_char_boundary(offset as usize) {
            assert_eq!(
                table.offset_to_line_col(source, offset),
                offset_to_line_col(source, offset),
                "offset {offset}"
            );
        }
    }
    assert_eq!(table.line_count(), 6);
}
