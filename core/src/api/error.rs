//! Public error types.
//!
//! Engine errors are converted to these types at the API boundary.

use core::fmt;

use crate::compiler::ConvertError;
use crate::expr::Span;
use crate::{String, Vec};

/// Public error type of the conversion engine.
#[derive(Debug)]
pub enum Error {
    /// Compiler defect; the current compilation unit cannot be completed.
    Internal(Diagnostic),

    /// Errors in the compiled program itself.
    Compilation(Vec<Diagnostic>),
}

impl Error {
    /// Wraps `err`, attributing it to `span`.
    pub fn from_convert(err: ConvertError, span: Span) -> Self {
        let diagnostic = err.to_diagnostic(span);
        if err.is_internal() {
            Error::Internal(diagnostic)
        } else {
            Error::Compilation(Vec::from([diagnostic]))
        }
    }

    pub fn diagnostics(&self) -> &[Diagnostic] {
        match self {
            Error::Internal(diagnostic) => core::slice::from_ref(diagnostic),
            Error::Compilation(diagnostics) => diagnostics,
        }
    }

    pub fn is_internal(&self) -> bool {
        matches!(self, Error::Internal(_))
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Error::Internal(diagnostic) => {
                write!(f, "Internal compiler error: {}", diagnostic.message)
            }
            Error::Compilation(diagnostics) => {
                let error_count = diagnostics
                    .iter()
                    .filter(|d| d.severity == Severity::Error)
                    .count();
                write!(f, "Compilation failed with {} error(s)", error_count)
            }
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for Error {}

impl From<ConvertError> for Error {
    fn from(err: ConvertError) -> Self {
        Error::from_convert(err, Span::default())
    }
}

/// A diagnostic message with source location.
#[derive(Debug, Clone)]
pub struct Diagnostic {
    pub severity: Severity,

    /// Primary diagnostic message.
    pub message: String,

    /// Source location of the primary issue.
    pub span: Span,

    /// Related locations that provide additional context.
    pub related: Vec<RelatedInfo>,

    /// Help messages suggesting how to fix the issue.
    pub help: Vec<String>,

    /// Optional error code (e.g., "C001") for documentation lookup.
    pub code: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Error,
    Warning,
    Info,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Severity::Error => write!(f, "error"),
            Severity::Warning => write!(f, "warning"),
            Severity::Info => write!(f, "info"),
        }
    }
}

/// Related information for a diagnostic.
#[derive(Debug, Clone)]
pub struct RelatedInfo {
    pub span: Span,
    pub message: String,
}
