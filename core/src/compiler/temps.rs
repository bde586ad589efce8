use cinder_types::Repr;

use super::{ConvertError, Converter};
use crate::Vec;
use crate::emit::{Instruction, Sink};

/// Scratch locals for values that must be addressed.
///
/// One slot per representation is handed out within a statement, so the
/// content of a temporary is only valid until the next request for the same
/// representation. [`TempPool::reset`] ends the statement and makes its
/// slots available to the next one.
#[derive(Debug, Default)]
pub struct TempPool {
    active: hashbrown::HashMap<Repr, u32>,
    released: hashbrown::HashMap<Repr, Vec<u32>>,
    declared: usize,
}

impl TempPool {
    pub fn new() -> Self {
        Self::default()
    }

    /// The slot of the current statement holding `repr`.
    pub fn acquire(&mut self, sink: &mut dyn Sink, repr: Repr) -> Result<u32, ConvertError> {
        if let Some(&slot) = self.active.get(&repr) {
            return Ok(slot);
        }

        let slot = match self.released.get_mut(&repr).and_then(Vec::pop) {
            Some(slot) => slot,
            None => {
                let slot = sink.declare_local(repr)?;
                self.declared += 1;
                tracing::debug!(%repr, slot, "Declared temporary");
                slot
            }
        };
        self.active.insert(repr, slot);
        Ok(slot)
    }

    pub fn reset(&mut self) {
        for (repr, slot) in self.active.drain() {
            self.released.entry(repr).or_default().push(slot);
        }
    }

    /// Number of temporaries in use by the current statement.
    pub fn active(&self) -> usize {
        self.active.len()
    }

    /// Number of locals declared for temporaries so far.
    pub fn declared(&self) -> usize {
        self.declared
    }
}

impl<S: Sink> Converter<'_, S> {
    /// Spills the value of `repr` on the stack into a temporary and pushes
    /// its address instead.
    pub fn struct_addr(&mut self, repr: Repr) -> Result<u32, ConvertError> {
        debug_assert!(repr.needs_address(), "{repr} is not addressed");
        let slot = self.temps.acquire(&mut self.sink, repr)?;
        self.emit(Instruction::StLoc(slot));
        self.emit(Instruction::LdLocA(slot));
        Ok(slot)
    }
}
