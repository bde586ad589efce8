//! Expression-level conversion entry points.

use cinder_types::{ClassFlags, ClassId, Constant, Repr, TypeHint};

use super::{ConvertError, Converter};
use crate::catalog::Op;
use crate::emit::{Instruction, Sink};
use crate::expr::{Access, Expr, ExprKind, Place};

/// Representation an expression has when evaluated without a target.
fn static_repr(expr: &Expr<'_>) -> Repr {
    match expr.kind {
        ExprKind::Literal(constant) => constant.natural_repr(),
        ExprKind::Load(place) => place.repr().unwrap_or(Repr::Value),
        ExprKind::Invoke { returns, .. } => returns,
    }
}

impl<S: Sink> Converter<'_, S> {
    /// Evaluates `expr` and converts its value to `to`.
    ///
    /// The access mode of `expr` is bound here: discarded for a void target,
    /// otherwise read by value unless the caller asked for a by-reference
    /// read beforehand.
    pub fn convert_expr(&mut self, expr: &Expr<'_>, to: Repr) -> Result<Repr, ConvertError> {
        self.convert_expr_inner(expr, to)
            .map_err(|err| err.in_conversion(static_repr(expr), to))
    }

    fn convert_expr_inner(&mut self, expr: &Expr<'_>, to: Repr) -> Result<Repr, ConvertError> {
        if to == Repr::Void {
            expr.set_access(Access::None);
            if self.options.elide_pure_discards && expr.is_pure() {
                tracing::trace!("Elided discarded pure expression");
                return Ok(Repr::Void);
            }
            let from = self.emit_expr(expr)?;
            self.emit_pop(from);
            return Ok(Repr::Void);
        }

        if expr.access() != Access::ReadRef {
            expr.set_access(Access::Read);

            if self.options.fold_constants {
                if let Some(constant) = expr.constant() {
                    if let Some(repr) = self.load_constant(constant, to)? {
                        return Ok(repr);
                    }
                }
            }

            if let ExprKind::Load(place) = expr.kind {
                // A place already in the target representation is loaded as is.
                if place.repr() != Some(to) {
                    if let Some(narrowed) = self.specialize_place(place, expr.hint)? {
                        return self.dispatch(narrowed, narrowed.hint(), to);
                    }
                }
                if self.options.place_fast_paths {
                    if let Some(repr) = self.place_fast_path(place, to)? {
                        return Ok(repr);
                    }
                }
            }
        }

        let from = self.emit_expr(expr)?;
        if from == Repr::Alias && to == Repr::Value && expr.access() == Access::ReadRef {
            // Keep the reference, the union can hold it.
            return self.call(Op::ValueFromAlias);
        }
        self.dispatch(from, expr.hint, to)
    }

    /// Typed operations invoked on the address of a union place, saving the
    /// copy of the union.
    fn place_fast_path(&mut self, place: &dyn Place, to: Repr) -> Result<Option<Repr>, ConvertError> {
        if !place.has_address() {
            return Ok(None);
        }
        let op = match (place.repr(), to) {
            (Some(Repr::Number), Repr::Int64) => Op::NumberToLong,
            (Some(Repr::Number), Repr::Float64) => Op::NumberToDouble,
            (Some(Repr::Number), Repr::Text) => Op::NumberToText,
            (Some(Repr::Value), Repr::Text) => Op::ValueToText,
            (Some(Repr::Value), Repr::Object(ClassId::OBJECT)) => Op::ValueToClass,
            (Some(Repr::Int64), Repr::Text) => Op::LongAddrToText,
            _ => return Ok(None),
        };
        place.emit_load_address(&mut self.sink)?;
        tracing::trace!(%op, "Place fast path");
        self.call(op).map(Some)
    }

    /// Emits the evaluation of `expr` and returns the representation left on
    /// the stack.
    pub fn emit_expr(&mut self, expr: &Expr<'_>) -> Result<Repr, ConvertError> {
        match expr.kind {
            ExprKind::Literal(constant) => self.emit_literal(constant),
            ExprKind::Load(place) => {
                if expr.access() == Access::ReadRef {
                    self.emit_load_ref(place, expr.hint)
                } else {
                    place.emit_load(&mut self.sink)
                }
            }
            ExprKind::Invoke { routine, returns } => {
                let routine = self.sink.intern_str(routine)?;
                self.emit(Instruction::Invoke {
                    routine,
                    returns_value: returns != Repr::Void,
                });
                Ok(returns)
            }
        }
    }

    fn emit_literal(&mut self, constant: Constant<'_>) -> Result<Repr, ConvertError> {
        match constant {
            Constant::Null => self.call(Op::ValueNull),
            Constant::Bool(b) => {
                self.emit(Instruction::LdcI4(b as i32));
                Ok(Repr::Bool)
            }
            Constant::Long(l) => {
                self.emit(Instruction::LdcI8(l));
                Ok(Repr::Int64)
            }
            Constant::Double(d) => {
                self.emit(Instruction::LdcR8(d));
                Ok(Repr::Float64)
            }
            Constant::Text(s) => self.emit_str(s),
        }
    }

    /// Loads an alias to the storage of `place`.
    fn emit_load_ref(&mut self, place: &dyn Place, hint: TypeHint) -> Result<Repr, ConvertError> {
        match place.repr() {
            Some(Repr::Value) if place.has_address() => {
                place.emit_load_address(&mut self.sink)?;
                self.call(Op::ValueEnsureAlias)
            }
            _ => {
                let from = place.emit_load(&mut self.sink)?;
                self.dispatch(from, hint, Repr::Alias)
            }
        }
    }

    // === Convenience entry points ===

    /// Converts to boolean, optionally negating the result.
    pub fn convert_to_bool(&mut self, expr: &Expr<'_>, negation: bool) -> Result<Repr, ConvertError> {
        self.convert_expr(expr, Repr::Bool)?;
        if negation {
            self.emit_logic_negation();
        }
        Ok(Repr::Bool)
    }

    pub fn convert_to_value(&mut self, expr: &Expr<'_>) -> Result<Repr, ConvertError> {
        self.convert_expr(expr, Repr::Value)
    }

    pub fn convert_to_text(&mut self, expr: &Expr<'_>) -> Result<Repr, ConvertError> {
        self.convert_expr(expr, Repr::Text)
    }

    pub fn convert_to_mut_text(&mut self, expr: &Expr<'_>) -> Result<Repr, ConvertError> {
        self.convert_expr(expr, Repr::MutText)
    }

    pub fn convert_to_number(&mut self, expr: &Expr<'_>) -> Result<Repr, ConvertError> {
        self.convert_expr(expr, Repr::Number)
    }

    pub fn convert_to_array(&mut self, expr: &Expr<'_>) -> Result<Repr, ConvertError> {
        self.convert_expr(expr, Repr::Array)
    }

    pub fn convert_to_key(&mut self, expr: &Expr<'_>) -> Result<Repr, ConvertError> {
        self.convert_expr(expr, Repr::Key)
    }

    pub fn convert_to_class(&mut self, expr: &Expr<'_>, class: ClassId) -> Result<Repr, ConvertError> {
        self.convert_expr(expr, Repr::Object(class))
    }

    pub fn convert_to_callable(&mut self, expr: &Expr<'_>) -> Result<Repr, ConvertError> {
        self.convert_expr(expr, Repr::Callable)
    }

    /// Converts a numeric expression to a float, folding numeric literals.
    pub fn convert_number_to_double(&mut self, expr: &Expr<'_>) -> Result<Repr, ConvertError> {
        expr.set_access(Access::Read);
        if self.options.fold_constants {
            let folded = match expr.constant() {
                Some(Constant::Long(l)) => Some(l as f64),
                Some(Constant::Double(d)) => Some(d),
                Some(Constant::Bool(b)) => Some(if b { 1.0 } else { 0.0 }),
                _ => None,
            };
            if let Some(value) = folded {
                self.emit(Instruction::LdcR8(value));
                return Ok(Repr::Float64);
            }
        }

        let from = self.emit_expr(expr)?;
        self.convert(from, expr.hint, Repr::Float64)
    }

    /// Converts to an array that is never null.
    ///
    /// Objects that know how to convert themselves are asked to; everything
    /// else goes through the union's own conversion.
    pub fn cast_to_array(&mut self, expr: &Expr<'_>) -> Result<Repr, ConvertError> {
        self.cast_to_array_inner(expr)
            .map_err(|err| err.in_conversion(static_repr(expr), Repr::Array))
    }

    fn cast_to_array_inner(&mut self, expr: &Expr<'_>) -> Result<Repr, ConvertError> {
        expr.set_access(Access::Read);
        let from = self.emit_expr(expr)?;
        match self.alias_dereference(from)? {
            Repr::Array => Ok(Repr::Array),
            Repr::Object(class) if self.classes.has_flags(class, ClassFlags::CONVERTIBLE) => {
                self.call(Op::ConvertibleToArray)
            }
            other => {
                self.dispatch(other, expr.hint.without_ref(), Repr::Value)?;
                self.call_on_temp(Repr::Value, Op::ValueToArray)
            }
        }
    }
}
