//! Compiled programs and how they run.

use std::fmt;
use std::sync::Arc;

use morph_diagnostic::span_utils::offset_to_line_col;
use morph_eval::{
    from_json, to_json, FunctionRegistry, Interpreter, Object, RuntimeError, Signal, OUTPUT_NAME,
};
use morph_ir::SharedAst;
use serde_json::Value;
use tracing::debug;

use crate::MorphError;

/// What a run produces when the program never binds `@out`.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum OutputMode {
    /// The whole environment as a JSON object keyed by variable name.
    #[default]
    OutOrEnvironment,
    /// `null`.
    OutOnly,
}

/// A parsed program ready to run any number of times, from any thread.
///
/// Each run starts from a fresh environment holding only `@in`. Output is
/// `@out` when bound, otherwise decided by the [`OutputMode`]. `drop()`
/// discards everything and yields `null`; `emit()` stops early and keeps
/// what was set so far.
#[derive(Clone)]
pub struct Program {
    source: Arc<str>,
    ast: SharedAst,
    registry: Arc<FunctionRegistry>,
    output: OutputMode,
}

impl Program {
    /// Parse `source` against the builtin registry.
    pub fn compile(source: &str) -> Result<Program, MorphError> {
        ProgramBuilder::new(source).build()
    }

    pub fn builder(source: &str) -> ProgramBuilder {
        ProgramBuilder::new(source)
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn registry(&self) -> &Arc<FunctionRegistry> {
        &self.registry
    }

    pub fn output_mode(&self) -> OutputMode {
        self.output
    }

    /// Run on JSON bytes and return JSON bytes.
    pub fn run(&self, input: &[u8]) -> Result<Vec<u8>, MorphError> {
        let input: Value = serde_json::from_slice(input)?;
        let output = self.run_value(&input)?.to_string().into_bytes();
        debug!(output_bytes = output.len(), "run finished");
        Ok(output)
    }

    /// Run on an already-decoded JSON value.
    pub fn run_value(&self, input: &Value) -> Result<Value, MorphError> {
        let mut interpreter = Interpreter::builder(&self.ast)
            .registry(Arc::clone(&self.registry))
            .input(from_json(input))
            .build();
        match interpreter.run() {
            Ok(()) | Err(Signal::Terminate { drop: false }) => {}
            Err(Signal::Terminate { drop: true }) => return Ok(Value::Null),
            Err(Signal::Error(error)) => return Err(self.runtime_error(error)),
        }

        let env = interpreter.into_env();
        let output = match (env.get(OUTPUT_NAME), self.output) {
            (Some(out), _) => out.clone(),
            (None, OutputMode::OutOrEnvironment) => env.to_object(),
            (None, OutputMode::OutOnly) => Object::Null,
        };
        Ok(to_json(&output)?)
    }

    fn runtime_error(&self, error: RuntimeError) -> MorphError {
        let offset = error.span.map_or(0, |span| span.start);
        let (line, col) = offset_to_line_col(&self.source, offset);
        MorphError::Runtime {
            line,
            col,
            message: error.message,
        }
    }
}

impl fmt::Debug for Program {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Program")
            .field("statements", &self.ast.root().len())
            .field("output", &self.output)
            .finish_non_exhaustive()
    }
}

/// Builder for a [`Program`].
pub struct ProgramBuilder {
    source: String,
    registry: Option<Arc<FunctionRegistry>>,
    output: OutputMode,
}

impl ProgramBuilder {
    pub fn new(source: impl Into<String>) -> Self {
        ProgramBuilder {
            source: source.into(),
            registry: None,
            output: OutputMode::default(),
        }
    }

    /// Resolve calls in `registry` instead of the builtins.
    #[must_use]
    pub fn registry(mut self, registry: Arc<FunctionRegistry>) -> Self {
        self.registry = Some(registry);
        self
    }

    #[must_use]
    pub fn output(mut self, output: OutputMode) -> Self {
        self.output = output;
        self
    }

    pub fn build(self) -> Result<Program, MorphError> {
        let parsed = morph_parse::parse(&self.source);
        debug!(
            source_bytes = self.source.len(),
            errors = parsed.errors.len(),
            "compiled program"
        );
        if parsed.has_errors() {
            return Err(MorphError::Parse {
                diagnostics: parsed.errors,
            });
        }
        Ok(Program {
            source: Arc::from(self.source),
            ast: parsed.ast.into_shared(),
            registry: self
                .registry
                .unwrap_or_else(|| Arc::new(FunctionRegistry::with_builtins())),
            output: self.output,
        })
    }
}
