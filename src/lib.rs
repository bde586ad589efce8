//! Cinder - value-conversion code generation for a dynamic language compiler
//!
//! # Overview
//!
//! A compiler from a dynamically typed scripting language to stack bytecode
//! needs, at almost every use site, to turn a value from the physical
//! representation it has into the one the site requires: an integer into
//! text for concatenation, a dynamic union into a boolean for a branch, a
//! routine name into something callable.
//!
//! Cinder emits those conversions. Given the source [`Repr`], the
//! flow-sensitive [`TypeHint`] of the value and the target representation, a
//! [`Converter`] appends the instructions reproducing the language's
//! implicit coercion rules to a [`Sink`].
//!
//! # Quick Start
//!
//! ```
//! use cinder::{ClassTable, CodeBuilder, Converter, Instruction, Op, Repr, RuntimeCatalog, Sink, TypeHint};
//!
//! let catalog = RuntimeCatalog::standard();
//! let classes = ClassTable::new();
//!
//! let mut builder = CodeBuilder::new(&catalog);
//! let slot = builder.declare_local(Repr::Int64).unwrap();
//! builder.emit(Instruction::LdLoc(slot));
//!
//! let mut converter = Converter::new(&catalog, &classes, builder);
//! let result = converter.convert(Repr::Int64, TypeHint::LONG, Repr::Text).unwrap();
//! assert_eq!(result, Repr::Text);
//!
//! let code = converter.into_sink().finalize();
//! assert_eq!(code.instructions[1], Instruction::Call(Op::LongToText));
//! ```
//!
//! # Expressions
//!
//! [`Converter::convert_expr`] also decides how an expression is evaluated:
//! known values are emitted directly in the target representation, and
//! union-typed places are read through their address when the hint allows.
//!
//! ```
//! use bumpalo::Bump;
//! use cinder::{ClassTable, CodeBuilder, Converter, ExprBuilder, Instruction, Repr, RuntimeCatalog};
//!
//! let catalog = RuntimeCatalog::standard();
//! let classes = ClassTable::new();
//! let arena = Bump::new();
//! let exprs = ExprBuilder::new(&arena);
//!
//! let mut converter = Converter::new(&catalog, &classes, CodeBuilder::new(&catalog));
//! converter.convert_expr(exprs.long(42), Repr::Text).unwrap();
//!
//! let code = converter.into_sink().finalize();
//! assert_eq!(code.instructions, vec![Instruction::LdStr(0)]);
//! assert_eq!(code.strings, vec!["42".to_string()]);
//! ```

// Error rendering utilities
pub mod error_renderer;
pub use error_renderer::{CharSet, RenderConfig, render_error, render_error_to};

pub use cinder_core::api::{
    ConvertOptions, ConvertOptionsOverride, Diagnostic, Error, RelatedInfo, Severity,
};
pub use cinder_core::catalog::{Op, Param, Receiver, RuntimeCatalog, RuntimeMethod};
pub use cinder_core::compiler::{ConvertError, Converter, TempPool};
pub use cinder_core::emit::{Code, CodeBuilder, Instruction, Label, Sink};
pub use cinder_core::expr::{Access, Expr, ExprBuilder, ExprKind, LocalPlace, ParamPlace, Place, Span};
pub use cinder_core::types::{
    self, ClassFlags, ClassId, ClassInfo, ClassTable, Constant, Prim, Repr, TypeHint,
};
