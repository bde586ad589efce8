//! Conversions into each target representation.
//!
//! Every function here expects a dereferenced, already specialized source
//! that differs from the target.

use cinder_types::{ClassId, Prim, Repr, TypeHint};

use super::{ConvertError, Converter};
use crate::catalog::Op;
use crate::emit::{Instruction, Sink};

impl<S: Sink> Converter<'_, S> {
    /// Boxes into the dynamic union, then calls `op` on its address.
    fn via_value(&mut self, from: Repr, op: Op) -> Result<Repr, ConvertError> {
        self.to_value(from)?;
        self.call_on_temp(Repr::Value, op)
    }

    pub(super) fn to_bool(&mut self, from: Repr) -> Result<Repr, ConvertError> {
        match from {
            Repr::Bool => {}
            Repr::Int32 => {
                self.emit(Instruction::LdcI4(0));
                self.emit(Instruction::CgtUn);
            }
            Repr::Int64 => {
                self.emit(Instruction::LdcI8(0));
                self.emit(Instruction::CgtUn);
            }
            Repr::Float32 | Repr::Float64 => {
                if from == Repr::Float32 {
                    self.emit(Instruction::ConvR8);
                }
                self.call(Op::DoubleToBool)?;
            }
            Repr::Char => {
                self.call(Op::CharToText)?;
                self.call(Op::TextToBool)?;
            }
            Repr::Text => {
                self.call(Op::TextToBool)?;
            }
            Repr::Array => {
                self.call(Op::ArrayToBool)?;
            }
            Repr::MutText => {
                self.call_on_temp(from, Op::MutTextToBool)?;
            }
            Repr::Number => {
                self.call_on_temp(from, Op::NumberToBool)?;
            }
            Repr::Value => {
                self.call_on_temp(from, Op::ValueToBool)?;
            }
            Repr::Void => self.emit(Instruction::LdcI4(0)),
            Repr::Object(_) | Repr::Resource | Repr::Callable | Repr::Bytes => {
                // Instances are always true, only null is false.
                self.emit(Instruction::LdNull);
                self.emit(Instruction::CgtUn);
            }
            Repr::Key | Repr::Alias | Repr::Nullable(_) => {
                self.via_value(from, Op::ValueToBool)?;
            }
        }
        Ok(Repr::Bool)
    }

    pub(super) fn to_long(&mut self, from: Repr) -> Result<Repr, ConvertError> {
        match from {
            Repr::Bool | Repr::Int32 => self.emit(Instruction::ConvI8),
            Repr::Int64 => {}
            Repr::Float32 | Repr::Float64 => {
                if from == Repr::Float32 {
                    self.emit(Instruction::ConvR8);
                }
                self.call(Op::DoubleToLong)?;
            }
            Repr::Char => {
                self.call(Op::CharToText)?;
                self.call(Op::TextToLong)?;
            }
            Repr::Text => {
                self.call(Op::TextToLong)?;
            }
            Repr::MutText => {
                self.call_on_temp(from, Op::MutTextToLong)?;
            }
            Repr::Number => {
                self.call_on_temp(from, Op::NumberToLong)?;
            }
            Repr::Value => {
                self.call_on_temp(from, Op::ValueToLong)?;
            }
            Repr::Void => self.emit(Instruction::LdcI8(0)),
            _ => {
                self.via_value(from, Op::ValueToLong)?;
            }
        }
        Ok(Repr::Int64)
    }

    pub(super) fn to_int(&mut self, from: Repr) -> Result<Repr, ConvertError> {
        match from {
            // Already 0/1.
            Repr::Bool | Repr::Int32 => {}
            Repr::Void => self.emit(Instruction::LdcI4(0)),
            _ => {
                self.to_long(from)?;
                self.emit(Instruction::ConvI4);
            }
        }
        Ok(Repr::Int32)
    }

    pub(super) fn to_double(&mut self, from: Repr) -> Result<Repr, ConvertError> {
        match from {
            Repr::Bool | Repr::Int32 | Repr::Int64 | Repr::Float32 => {
                self.emit(Instruction::ConvR8)
            }
            Repr::Float64 => {}
            Repr::Char => {
                self.call(Op::CharToText)?;
                self.call(Op::TextToDouble)?;
            }
            Repr::Text => {
                self.call(Op::TextToDouble)?;
            }
            Repr::MutText => {
                self.call_on_temp(from, Op::MutTextToDouble)?;
            }
            Repr::Number => {
                self.call_on_temp(from, Op::NumberToDouble)?;
            }
            Repr::Value => {
                self.call_on_temp(from, Op::ValueToDouble)?;
            }
            Repr::Void => self.emit(Instruction::LdcR8(0.0)),
            _ => {
                self.via_value(from, Op::ValueToDouble)?;
            }
        }
        Ok(Repr::Float64)
    }

    pub(super) fn to_number(&mut self, from: Repr) -> Result<Repr, ConvertError> {
        match from {
            Repr::Bool | Repr::Int32 => {
                self.emit(Instruction::ConvI8);
                self.call(Op::NumberFromLong)?;
            }
            Repr::Int64 => {
                self.call(Op::NumberFromLong)?;
            }
            Repr::Float32 => {
                self.emit(Instruction::ConvR8);
                self.call(Op::NumberFromDouble)?;
            }
            Repr::Float64 => {
                self.call(Op::NumberFromDouble)?;
            }
            Repr::Char => {
                self.call(Op::CharToText)?;
                self.call(Op::TextToNumber)?;
            }
            Repr::Text | Repr::MutText => {
                self.convert_string_to_number(from)?;
            }
            Repr::Number => {}
            Repr::Value => {
                self.call_on_temp(from, Op::ValueToNumber)?;
            }
            Repr::Void => {
                self.call(Op::NumberZero)?;
            }
            _ => {
                self.via_value(from, Op::ValueToNumber)?;
            }
        }
        Ok(Repr::Number)
    }

    pub(super) fn to_text(&mut self, from: Repr) -> Result<Repr, ConvertError> {
        match from {
            Repr::Bool => self.call(Op::BoolToText),
            Repr::Int32 => self.call(Op::IntToText),
            Repr::Int64 => self.call(Op::LongToText),
            Repr::Float32 => {
                self.emit(Instruction::ConvR8);
                self.call(Op::DoubleToText)
            }
            Repr::Float64 => self.call(Op::DoubleToText),
            Repr::Char => self.call(Op::CharToText),
            Repr::Text => Ok(Repr::Text),
            Repr::MutText => self.call_on_temp(from, Op::MutTextToText),
            Repr::Number => self.call_on_temp(from, Op::NumberToText),
            Repr::Value => self.call_on_temp(from, Op::ValueToText),
            Repr::Void => self.emit_str(""),
            Repr::Object(_) | Repr::Resource | Repr::Callable | Repr::Bytes => {
                self.call(Op::ObjectToText)
            }
            Repr::Array | Repr::Key | Repr::Alias | Repr::Nullable(_) => {
                self.via_value(from, Op::ValueToText)
            }
        }
    }

    pub(super) fn to_mut_text(&mut self, from: Repr) -> Result<Repr, ConvertError> {
        match from {
            Repr::MutText => Ok(Repr::MutText),
            Repr::Value => self.call(Op::ValueToMutText),
            _ => {
                self.to_text(from)?;
                self.call(Op::NewMutText)
            }
        }
    }

    pub(super) fn to_value(&mut self, from: Repr) -> Result<Repr, ConvertError> {
        match from {
            Repr::Bool => self.call(Op::ValueFromBool),
            Repr::Int32 => {
                self.emit(Instruction::ConvI8);
                self.call(Op::ValueFromLong)
            }
            Repr::Int64 => self.call(Op::ValueFromLong),
            Repr::Float32 => {
                self.emit(Instruction::ConvR8);
                self.call(Op::ValueFromDouble)
            }
            Repr::Float64 => self.call(Op::ValueFromDouble),
            Repr::Char => {
                self.call(Op::CharToText)?;
                self.call(Op::ValueFromText)
            }
            Repr::Text => self.call(Op::ValueFromText),
            Repr::MutText => self.call(Op::ValueFromMutText),
            Repr::Number => self.call(Op::ValueFromNumber),
            Repr::Value => Ok(Repr::Value),
            Repr::Key => self.call(Op::ValueFromKey),
            Repr::Array => self.call(Op::ValueFromArray),
            Repr::Alias => self.call(Op::AliasGetValue),
            Repr::Object(_) | Repr::Resource | Repr::Callable | Repr::Bytes => {
                self.call(Op::ValueFromObject)
            }
            // Distinct from null: no value was produced at all.
            Repr::Void => self.call(Op::ValueVoid),
            Repr::Nullable(payload) => self.nullable_to_value(payload),
        }
    }

    /// `has_value ? value : null`
    fn nullable_to_value(&mut self, payload: Prim) -> Result<Repr, ConvertError> {
        let nullable = Repr::Nullable(payload);
        let slot = self.temps.acquire(&mut self.sink, nullable)?;
        let null_label = self.sink.define_label();
        let end_label = self.sink.define_label();

        self.emit(Instruction::StLoc(slot));
        self.emit(Instruction::LdLocA(slot));
        self.emit(Instruction::NullableHasValue(payload));
        self.emit(Instruction::BrFalse(null_label));

        self.emit(Instruction::LdLocA(slot));
        self.emit(Instruction::NullableGetValue(payload));
        self.dispatch(payload.repr(), TypeHint::empty(), Repr::Value)?;
        self.emit(Instruction::Br(end_label));

        self.emit(Instruction::MarkLabel(null_label));
        self.call(Op::ValueNull)?;
        self.emit(Instruction::MarkLabel(end_label));
        Ok(Repr::Value)
    }

    pub(super) fn to_key(&mut self, from: Repr) -> Result<Repr, ConvertError> {
        match from {
            Repr::Int64 => {
                self.emit(Instruction::ConvI4);
                self.call(Op::NewKeyFromInt)
            }
            Repr::Int32 => self.call(Op::NewKeyFromInt),
            Repr::Text => self.call(Op::NewKeyFromText),
            Repr::Key => Ok(Repr::Key),
            _ => {
                self.to_value(from)?;
                self.call(Op::ValueToKey)
            }
        }
    }

    /// Null for void, unwrap-or-null for the union, a checked cast otherwise.
    pub(super) fn to_array(&mut self, from: Repr) -> Result<Repr, ConvertError> {
        match from {
            Repr::Array => {}
            Repr::Void => self.emit(Instruction::LdNull),
            Repr::Value => {
                self.call_on_temp(from, Op::ValueGetArray)?;
            }
            other if other.is_reference_type() => {
                self.emit(Instruction::CastClass(Repr::Array));
            }
            other => {
                self.emit(Instruction::Box(other));
                self.emit(Instruction::CastClass(Repr::Array));
            }
        }
        Ok(Repr::Array)
    }

    pub(super) fn to_alias(&mut self, from: Repr) -> Result<Repr, ConvertError> {
        match from {
            Repr::Alias => Ok(Repr::Alias),
            Repr::Value => self.call_on_temp(from, Op::ValueEnsureAlias),
            _ => {
                self.to_value(from)?;
                self.call(Op::NewAlias)
            }
        }
    }

    /// Conversion to the callable contract.
    ///
    /// Text names a routine resolved in the scope of the caller class. Any
    /// other non-numeric source is resolved at run time through the union.
    pub(super) fn to_callable(&mut self, from: Repr) -> Result<Repr, ConvertError> {
        match from {
            Repr::Callable => Ok(Repr::Callable),
            Repr::Text => self.call(Op::TextAsCallable),
            Repr::Char | Repr::MutText => {
                self.to_text(from)?;
                self.call(Op::TextAsCallable)
            }
            Repr::Number => Err(ConvertError::NotCallable { from }),
            other if other.is_numeric_scalar() => Err(ConvertError::NotCallable { from }),
            other => {
                self.to_value(other)?;
                self.call(Op::ValueAsCallable)
            }
        }
    }

    /// Conversion to a class instance or a resource.
    ///
    /// Unions hinted to hold an instance were already narrowed by the
    /// specializer and arrive here as the root class.
    pub(super) fn to_object(&mut self, from: Repr, to: Repr) -> Result<Repr, ConvertError> {
        match from {
            Repr::Value => {
                self.call(Op::ValueAsObject)?;
                if to != Repr::Object(ClassId::OBJECT) {
                    self.emit(Instruction::CastClass(to));
                }
            }
            // Text never denotes an instance.
            other if other.is_reference_type() && other != Repr::Text => {
                self.emit(Instruction::CastClass(to));
            }
            other => {
                self.emit_pop(other);
                self.emit(Instruction::LdNull);
            }
        }
        Ok(to)
    }
}
