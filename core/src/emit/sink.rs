use cinder_types::Repr;

use super::{Instruction, Label};
use crate::compiler::ConvertError;

/// Consumer of the instruction stream.
///
/// Conversions only ever append; they never inspect or rewrite what was
/// emitted before.
pub trait Sink {
    fn emit(&mut self, instruction: Instruction);

    /// Interns `value` and returns its index for [`Instruction::LdStr`].
    fn intern_str(&mut self, value: &str) -> Result<u32, ConvertError>;

    /// Declares a fresh local slot holding `repr`.
    fn declare_local(&mut self, repr: Repr) -> Result<u32, ConvertError>;

    fn define_label(&mut self) -> Label;
}

impl<S: Sink + ?Sized> Sink for &mut S {
    fn emit(&mut self, instruction: Instruction) {
        (**self).emit(instruction)
    }

    fn intern_str(&mut self, value: &str) -> Result<u32, ConvertError> {
        (**self).intern_str(value)
    }

    fn declare_local(&mut self, repr: Repr) -> Result<u32, ConvertError> {
        (**self).declare_local(repr)
    }

    fn define_label(&mut self) -> Label {
        (**self).define_label()
    }
}
