//! Value representations of the cinder compiler.
//!
//! This crate describes *how* a runtime value is laid out, independently of
//! the code generator that moves values between layouts:
//!
//! - [`Repr`]: the closed set of physical representations
//! - [`TypeHint`]: a flow-sensitive set of possible representation families
//! - [`ClassTable`]: the class hierarchy consulted for reference assignability
//! - [`Constant`]: compile-time known values
//!
//! # Example
//!
//! ```
//! use cinder_types::{Repr, TypeHint};
//!
//! let hint = TypeHint::LONG;
//! assert_eq!(hint.single(), Some(Repr::Int64));
//! assert!(Repr::Number.needs_address());
//! ```

#![no_std]
extern crate alloc;

mod class;
mod constant;
mod hint;
mod repr;

pub use class::{ClassFlags, ClassId, ClassInfo, ClassTable};
pub use constant::Constant;
pub use hint::TypeHint;
pub use repr::{Prim, Repr};
