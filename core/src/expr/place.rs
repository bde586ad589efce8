use core::fmt;

use cinder_types::Repr;

use crate::compiler::ConvertError;
use crate::emit::{Instruction, Sink};

/// Addressable storage location.
///
/// Owned by the storage layer; conversions only load through it.
pub trait Place: fmt::Debug {
    /// Static representation of the stored value, `None` if unknown.
    fn repr(&self) -> Option<Repr>;

    /// Whether [`Place::emit_load_address`] is supported.
    fn has_address(&self) -> bool {
        true
    }

    /// Pushes the stored value and returns its representation.
    fn emit_load(&self, sink: &mut dyn Sink) -> Result<Repr, ConvertError>;

    /// Pushes the address of the storage and returns the representation
    /// stored there.
    fn emit_load_address(&self, sink: &mut dyn Sink) -> Result<Repr, ConvertError>;
}

/// A local variable slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LocalPlace {
    pub slot: u32,
    pub repr: Repr,
}

impl Place for LocalPlace {
    fn repr(&self) -> Option<Repr> {
        Some(self.repr)
    }

    fn emit_load(&self, sink: &mut dyn Sink) -> Result<Repr, ConvertError> {
        sink.emit(Instruction::LdLoc(self.slot));
        Ok(self.repr)
    }

    fn emit_load_address(&self, sink: &mut dyn Sink) -> Result<Repr, ConvertError> {
        sink.emit(Instruction::LdLocA(self.slot));
        Ok(self.repr)
    }
}

/// A routine parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParamPlace {
    pub index: u32,
    pub repr: Repr,
}

impl Place for ParamPlace {
    fn repr(&self) -> Option<Repr> {
        Some(self.repr)
    }

    fn emit_load(&self, sink: &mut dyn Sink) -> Result<Repr, ConvertError> {
        sink.emit(Instruction::LdArg(self.index));
        Ok(self.repr)
    }

    fn emit_load_address(&self, sink: &mut dyn Sink) -> Result<Repr, ConvertError> {
        sink.emit(Instruction::LdArgA(self.index));
        Ok(self.repr)
    }
}
