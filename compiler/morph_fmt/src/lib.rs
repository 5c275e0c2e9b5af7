//! Morph formatter.
//!
//! Renders a parsed [`Ast`](morph_ir::Ast) back to canonical source:
//!
//! - keywords in lowercase, one statement per line
//! - blocks indented by [`INDENT_WIDTH`] spaces
//! - every nested operator expression parenthesized, so precedence never
//!   depends on the reader
//! - string literals re-escaped
//!
//! Formatting is a fixed point: parsing the output and formatting again
//! yields the same text.

mod emitter;
mod formatter;

pub use emitter::{Emitter, StringEmitter};
pub use formatter::{format_program, Formatter};

/// Spaces per indentation level.
pub const INDENT_WIDTH: usize = 4;

#[cfg(test)]
mod tests;
