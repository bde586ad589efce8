//! Stack-level conversion dispatcher.

use cinder_types::{ClassId, Repr, TypeHint};

use super::{ConvertError, Converter};
use crate::catalog::Op;
use crate::emit::{Instruction, Sink};

impl<S: Sink> Converter<'_, S> {
    /// Converts the value of representation `from` on top of the stack to
    /// `to`, and returns the representation actually left on the stack.
    ///
    /// `hint` is the flow-sensitive hint of the value. For a `from` of
    /// [`Repr::Void`] nothing is on the stack.
    pub fn convert(&mut self, from: Repr, hint: TypeHint, to: Repr) -> Result<Repr, ConvertError> {
        self.dispatch(from, hint, to)
            .map_err(|err| err.in_conversion(from, to))
    }

    pub(super) fn dispatch(
        &mut self,
        from: Repr,
        hint: TypeHint,
        to: Repr,
    ) -> Result<Repr, ConvertError> {
        if from == to {
            tracing::trace!(%from, "Identity conversion");
            return Ok(to);
        }

        if to == Repr::Void {
            tracing::trace!(%from, "Discarding value");
            self.emit_pop(from);
            return Ok(Repr::Void);
        }

        if from == Repr::Alias {
            let from = self.alias_dereference(from)?;
            return self.dispatch(from, hint.without_ref(), to);
        }

        if self.classes.is_assignable(from, to) {
            tracing::trace!(%from, %to, "Reference is assignable");
            return Ok(from);
        }

        if let Some(narrowed) = self.specialize(from, hint)? {
            return self.dispatch(narrowed, narrowed.hint(), to);
        }

        tracing::trace!(%from, %to, ?hint, "Converting");
        match to {
            Repr::Void => Ok(Repr::Void),
            Repr::Bool => self.to_bool(from),
            Repr::Int32 => self.to_int(from),
            Repr::Int64 => self.to_long(from),
            Repr::Float32 => {
                self.to_double(from)?;
                self.emit(Instruction::ConvR4);
                Ok(Repr::Float32)
            }
            Repr::Float64 => self.to_double(from),
            Repr::Number => self.to_number(from),
            Repr::Char => {
                self.to_text(from)?;
                self.call(Op::TextToChar)
            }
            Repr::Text => self.to_text(from),
            Repr::MutText => self.to_mut_text(from),
            Repr::Value => self.to_value(from),
            Repr::Key => self.to_key(from),
            Repr::Array => self.to_array(from),
            Repr::Alias => self.to_alias(from),
            Repr::Callable => self.to_callable(from),
            Repr::Bytes => {
                self.dispatch(from, hint, Repr::MutText)?;
                self.call_on_temp(Repr::MutText, Op::MutTextToBytes)
            }
            Repr::Object(_) | Repr::Resource => self.to_object(from, to),
            Repr::Nullable(payload) => {
                self.dispatch(from, hint, payload.repr())?;
                self.emit(Instruction::NewNullable(payload));
                Ok(to)
            }
        }
    }

    /// Replaces an alias on the stack with the value it refers to.
    ///
    /// Any other representation is left untouched.
    pub fn alias_dereference(&mut self, from: Repr) -> Result<Repr, ConvertError> {
        if from != Repr::Alias {
            return Ok(from);
        }
        tracing::trace!("Dereferencing alias");
        self.call(Op::AliasGetValue)
    }

    /// Widens a 32-bit integer or boolean to the native integer.
    ///
    /// Any other representation is left untouched.
    pub fn convert_int_to_long(&mut self, from: Repr) -> Repr {
        match from {
            Repr::Bool | Repr::Int32 => {
                self.emit(Instruction::ConvI8);
                Repr::Int64
            }
            other => other,
        }
    }

    /// Parses text into the numeric union. Any other representation is left
    /// untouched.
    pub fn convert_string_to_number(&mut self, from: Repr) -> Result<Repr, ConvertError> {
        match from {
            Repr::Text => self.call(Op::TextToNumber),
            Repr::MutText => self.call_on_temp(Repr::MutText, Op::MutTextToNumber),
            other => Ok(other),
        }
    }

    /// Converts to boolean, optionally negating the result.
    pub fn convert_to_bool_from(
        &mut self,
        from: Repr,
        hint: TypeHint,
        negation: bool,
    ) -> Result<Repr, ConvertError> {
        self.convert(from, hint, Repr::Bool)?;
        if negation {
            self.emit_logic_negation();
        }
        Ok(Repr::Bool)
    }

    pub fn convert_to_value_from(
        &mut self,
        from: Repr,
        hint: TypeHint,
    ) -> Result<Repr, ConvertError> {
        self.convert(from, hint, Repr::Value)
    }

    /// "As" conversion to array: the instance, or null if the value is not
    /// an array. Never fails at run time.
    pub fn as_array(&mut self, from: Repr) -> Result<Repr, ConvertError> {
        let from = self.alias_dereference(from)?;
        match from {
            Repr::Array => {}
            Repr::Value => {
                self.call(Op::ValueAsArray)?;
            }
            Repr::Void => self.emit(Instruction::LdNull),
            other if other.is_reference_type() => self.emit(Instruction::IsInst(Repr::Array)),
            other => {
                self.emit_pop(other);
                self.emit(Instruction::LdNull);
            }
        }
        Ok(Repr::Array)
    }

    /// "As" conversion to a class instance: the instance, or null if the
    /// value is not an object. Never fails at run time.
    pub fn as_object(&mut self, from: Repr) -> Result<Repr, ConvertError> {
        let from = self.alias_dereference(from)?;
        match from {
            Repr::Object(_) | Repr::Callable => Ok(from),
            Repr::Value => self.call(Op::ValueAsObject),
            other => {
                self.emit_pop(other);
                self.emit(Instruction::LdNull);
                Ok(Repr::Object(ClassId::OBJECT))
            }
        }
    }
}
