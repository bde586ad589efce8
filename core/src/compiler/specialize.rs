//! Narrowing of union representations by flow hints.

use cinder_types::{Repr, TypeHint};

use super::{ConvertError, Converter};
use crate::catalog::Op;
use crate::emit::Sink;
use crate::expr::Place;

/// The typed accessor that reads a `from` value proven by `hint` to hold a
/// single narrower representation.
fn accessor(from: Repr, hint: TypeHint) -> Option<Op> {
    // The value may sit behind an alias; accessors would see the alias.
    if hint.contains(TypeHint::REF) {
        return None;
    }
    let single = hint.single()?;
    let op = match (from, single) {
        (Repr::Value, Repr::Int64) => Op::ValueLong,
        (Repr::Value, Repr::Float64) => Op::ValueDouble,
        (Repr::Value, Repr::Bool) => Op::ValueBool,
        (Repr::Value, Repr::Text) => Op::ValueText,
        (Repr::Value, Repr::MutText) => Op::ValueMutText,
        (Repr::Value, Repr::Array) => Op::ValueArray,
        (Repr::Value, Repr::Object(_)) => Op::ValueObject,
        (Repr::Number, Repr::Int64) => Op::NumberLong,
        (Repr::Number, Repr::Float64) => Op::NumberDouble,
        _ => return None,
    };
    Some(op)
}

impl<S: Sink> Converter<'_, S> {
    /// Narrows the value of `from` on the stack when `hint` proves a single
    /// narrower representation.
    ///
    /// Returns the new representation, or `None` (emitting nothing) when no
    /// specialization applies.
    pub fn specialize(&mut self, from: Repr, hint: TypeHint) -> Result<Option<Repr>, ConvertError> {
        let Some(op) = accessor(from, hint) else {
            return Ok(None);
        };
        let narrowed = self.call_on_temp(from, op)?;
        tracing::debug!(%from, %narrowed, "Specialized value");
        Ok(Some(narrowed))
    }

    /// Like [`Converter::specialize`], but reads through the address of the
    /// place instead of a copy. Nothing is loaded if `None` is returned.
    pub fn specialize_place(
        &mut self,
        place: &dyn Place,
        hint: TypeHint,
    ) -> Result<Option<Repr>, ConvertError> {
        let Some(from) = place.repr() else {
            return Ok(None);
        };
        if !place.has_address() {
            return Ok(None);
        }
        let Some(op) = accessor(from, hint) else {
            return Ok(None);
        };
        place.emit_load_address(&mut self.sink)?;
        let narrowed = self.call(op)?;
        tracing::debug!(%from, %narrowed, "Specialized place");
        Ok(Some(narrowed))
    }
}
