//! Errors returned to the host.

use std::fmt;

use morph_diagnostic::Diagnostic;
use morph_eval::EncodeError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum MorphError {
    /// The program failed to parse; every diagnostic found is listed.
    #[error("{}", DiagnosticList(diagnostics))]
    Parse { diagnostics: Vec<Diagnostic> },

    /// An error reached the top level of a run.
    #[error("{line}:{col}: {message}")]
    Runtime { line: u32, col: u32, message: String },

    #[error("input is not valid JSON: {0}")]
    InvalidInput(#[from] serde_json::Error),

    #[error(transparent)]
    Encode(#[from] EncodeError),
}

impl MorphError {
    /// Diagnostics for parse errors, or the single location of a runtime error.
    pub fn diagnostics(&self) -> Vec<Diagnostic> {
        match self {
            MorphError::Parse { diagnostics } => diagnostics.clone(),
            MorphError::Runtime { line, col, message } => {
                vec![Diagnostic::new(*line, *col, message.as_str())]
            }
            MorphError::InvalidInput(_) | MorphError::Encode(_) => Vec::new(),
        }
    }
}

/// One diagnostic per line.
struct DiagnosticList<'a>(&'a [Diagnostic]);

impl fmt::Display for DiagnosticList<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, diagnostic) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str("\n")?;
            }
            write!(f, "{diagnostic}")?;
        }
        Ok(())
    }
}
