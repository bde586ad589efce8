use cinder_types::Repr;

use crate::api::{Diagnostic, Severity};
use crate::catalog::Op;
use crate::expr::Span;
use crate::{ToString, Vec, format};

/// Failure of a conversion request.
///
/// Everything except [`ConvertError::NotCallable`] is a compiler defect:
/// it aborts the current method and is never retried.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConvertError {
    /// The representation matrix has a hole for the injected catalog.
    #[error("conversion from {from} to {to} is not implemented (missing {missing})")]
    NotImplemented { from: Repr, to: Repr, missing: Op },

    /// No coercion to the callable contract exists for this representation.
    #[error("a value of type {from} cannot be used as a callable")]
    NotCallable { from: Repr },

    /// Raised while emitting; reported as [`ConvertError::NotImplemented`]
    /// once the requested pair is known.
    #[error("runtime operation {0} is not bound")]
    MissingRuntimeOp(Op),

    #[error("too many locals")]
    TooManyLocals,

    #[error("too many interned strings")]
    TooManyStrings,

    /// A place without an address was asked for one.
    #[error("storage location has no address")]
    InvalidAccess,
}

impl ConvertError {
    pub fn is_internal(&self) -> bool {
        !matches!(self, ConvertError::NotCallable { .. })
    }

    /// Attributes a missing runtime operation to the conversion that needed it.
    pub(crate) fn in_conversion(self, from: Repr, to: Repr) -> Self {
        match self {
            ConvertError::MissingRuntimeOp(missing) => {
                tracing::warn!(%from, %to, %missing, "Conversion not implemented");
                ConvertError::NotImplemented { from, to, missing }
            }
            other => other,
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            ConvertError::NotCallable { .. } => "C001",
            ConvertError::NotImplemented { .. } | ConvertError::MissingRuntimeOp(_) => "I001",
            ConvertError::TooManyLocals | ConvertError::TooManyStrings => "I002",
            ConvertError::InvalidAccess => "I003",
        }
    }

    pub fn to_diagnostic(&self, span: Span) -> Diagnostic {
        let mut help = Vec::new();
        match self {
            ConvertError::NotCallable { .. } => {
                help.push("Only routine names and callable objects can be called".to_string());
            }
            ConvertError::NotImplemented { missing, .. } => {
                help.push(format!("Bind {missing} in the runtime catalog"));
            }
            _ => {}
        }

        Diagnostic {
            severity: Severity::Error,
            message: self.to_string(),
            span,
            related: Vec::new(),
            help,
            code: Some(self.code().to_string()),
        }
    }
}
