#![cfg_attr(all(not(feature = "std"), not(test)), no_std)]

//! Value-conversion code generation.
//!
//! Given a value in one physical [`Repr`](cinder_types::Repr) and a required
//! target representation, the [`compiler::Converter`] appends the instructions
//! reproducing the language's implicit coercion rules to an
//! [`emit::Sink`].

// This works on std and no_std and is harmless.
extern crate alloc;

#[doc(hidden)]
pub mod shim {
    pub use alloc::{boxed::Box, fmt, format, string::String, string::ToString, vec, vec::Vec};
}

// Re-export (crate only) for convenience so other modules don't need alloc:: prefix
#[allow(unused_imports)]
pub(crate) use shim::*;

pub mod api;
pub mod catalog;
pub mod compiler;
pub mod emit;
pub mod expr;

pub use cinder_types as types;
