//! Instruction stream produced by the conversion engine.
//!
//! The engine writes into any [`Sink`]; [`CodeBuilder`] is the reference
//! sink used by tests and by embedders without their own assembler.

mod builder;
mod instruction;
mod sink;

pub use builder::{Code, CodeBuilder};
pub use instruction::{Instruction, Label};
pub use sink::Sink;
