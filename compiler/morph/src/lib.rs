//! Morph - an embeddable language for transforming JSON.
//!
//! ```
//! let program = morph::Program::compile(r#"set @out = upper(@in.name)"#).unwrap();
//! let output = program.run(br#"{"name": "ada"}"#).unwrap();
//! assert_eq!(output, br#""ADA""#);
//! ```
//!
//! A [`Program`] is compiled once and may be run concurrently. Hosts extend
//! the language by registering functions in a [`FunctionRegistry`] and
//! handing it to [`ProgramBuilder::registry`].

mod error;
mod program;

use std::sync::Once;

pub use error::MorphError;
pub use program::{OutputMode, Program, ProgramBuilder};

pub use morph_diagnostic::Diagnostic;
pub use morph_eval::{
    cast_array, cast_auto, cast_bool, cast_error, cast_float, cast_int, cast_map, cast_string,
    cast_time, from_json, object_null, object_terminate, object_terminate_drop, to_json, ArgSpec, EncodeError,
    Example, FunctionEntry, FunctionRegistry, Object, ObjectMap, ObjectType, TypeSet,
    DEFAULT_NAMESPACE, INPUT_NAME, OUTPUT_NAME,
};

/// Canonical source text for a program.
pub fn format(source: &str) -> Result<String, MorphError> {
    let parsed = morph_parse::parse(source);
    if parsed.has_errors() {
        return Err(MorphError::Parse {
            diagnostics: parsed.errors,
        });
    }
    Ok(morph_fmt::format_program(&parsed.ast))
}

static TRACING_INIT: Once = Once::new();

/// Initialize tracing for debug output.
///
/// Safe to call multiple times. Enable with `RUST_LOG=morph_eval=debug` or
/// `RUST_LOG=trace`.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{fmt, prelude::*, EnvFilter};

        if std::env::var("RUST_LOG").is_ok() {
            let filter = EnvFilter::from_default_env();
            tracing_subscriber::registry()
                .with(fmt::layer().with_target(true).with_level(true))
                .with(filter)
                .init();
        }
    });
}
