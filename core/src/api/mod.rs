//! Public API surface: errors, diagnostics and options.

pub mod error;
pub mod options;

pub use error::{Diagnostic, Error, RelatedInfo, Severity};
pub use options::{ConvertOptions, ConvertOptionsOverride};
