//! Constant folding.

use cinder_types::{Constant, Repr};

use super::{ConvertError, Converter};
use crate::ToString;
use crate::catalog::Op;
use crate::emit::{Instruction, Sink};

impl<S: Sink> Converter<'_, S> {
    /// Loads `constant` directly in the representation `to`.
    ///
    /// Only folds conversions whose run-time result does not depend on the
    /// execution context; returns `None` without emitting anything otherwise.
    /// Rendering a float as text depends on the context and is never folded.
    pub fn load_constant(
        &mut self,
        constant: Constant<'_>,
        to: Repr,
    ) -> Result<Option<Repr>, ConvertError> {
        use Instruction::*;

        match (constant, to) {
            (Constant::Null, Repr::Value) => {
                self.call(Op::ValueNull)?;
            }
            (Constant::Null, Repr::Text) => {
                self.emit_str("")?;
            }
            (Constant::Null, Repr::Array | Repr::Object(_) | Repr::Resource | Repr::Callable) => {
                self.emit(LdNull)
            }

            (Constant::Bool(b), Repr::Value) => {
                self.call(if b { Op::ValueTrue } else { Op::ValueFalse })?;
            }
            (Constant::Bool(b), Repr::Text) => {
                self.emit_str(if b { "1" } else { "" })?;
            }

            (Constant::Long(l), Repr::Text) => {
                self.emit_str(&l.to_string())?;
            }
            (Constant::Long(l), Repr::Int32) => self.emit(LdcI4(l as i32)),

            (Constant::Double(d), Repr::Float32) => self.emit(LdcR4(d as f32)),

            (Constant::Text(s), Repr::Text) => {
                self.emit_str(s)?;
            }
            (Constant::Text(s), Repr::MutText) => {
                self.emit_str(s)?;
                self.call(Op::NewMutText)?;
            }

            (c, Repr::Bool) => self.emit(LdcI4(c.is_truthy() as i32)),
            (Constant::Null | Constant::Bool(_), Repr::Int32) => {
                self.emit(LdcI4(c_bool(constant) as i32))
            }
            (Constant::Null | Constant::Bool(_) | Constant::Long(_), Repr::Int64) => {
                self.emit(LdcI8(match constant {
                    Constant::Long(l) => l,
                    other => c_bool(other) as i64,
                }))
            }
            (
                Constant::Null | Constant::Bool(_) | Constant::Long(_) | Constant::Double(_),
                Repr::Float64,
            ) => self.emit(LdcR8(match constant {
                Constant::Long(l) => l as f64,
                Constant::Double(d) => d,
                other => c_bool(other) as i64 as f64,
            })),

            _ => return Ok(None),
        }

        tracing::trace!(?constant, %to, "Folded constant");
        Ok(Some(to))
    }
}

/// `true` as 1, `false` and null as 0.
fn c_bool(constant: Constant<'_>) -> bool {
    matches!(constant, Constant::Bool(true))
}
