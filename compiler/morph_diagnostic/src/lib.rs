//! Diagnostics for morph programs.
//!
//! A [`Diagnostic`] is the user-facing form of a parse or runtime failure:
//! a 1-based line and column plus a message. Spans are converted to
//! positions lazily through [`span_utils`], since most programs never
//! produce one.

mod diagnostic;
pub mod span_utils;

pub use diagnostic::Diagnostic;
pub use span_utils::LineOffsetTable;
