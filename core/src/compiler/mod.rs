//! The conversion engine.
//!
//! A [`Converter`] reshapes a value from the representation it has into the
//! representation a use site requires, appending instructions to its
//! [`Sink`]. It is created once per compiled method and used synchronously
//! by the surrounding code generator.
//!
//! Two entry levels exist:
//!
//! - [`Converter::convert`] works on a value already on the evaluation stack.
//! - [`Converter::convert_expr`] also decides how the expression is
//!   evaluated, which enables constant folding and typed loads from places.

mod constant;
mod dispatch;
mod error;
mod expression;
mod specialize;
mod targets;
mod temps;

#[cfg(test)]
mod scenario_test;

pub use error::ConvertError;
pub use temps::TempPool;

use cinder_types::{ClassId, ClassTable, Repr};

use crate::api::ConvertOptions;
use crate::catalog::{Op, Param, Receiver, RuntimeCatalog};
use crate::emit::{Instruction, Sink};

pub struct Converter<'c, S: Sink> {
    catalog: &'c RuntimeCatalog,
    classes: &'c ClassTable,
    sink: S,
    temps: TempPool,
    options: ConvertOptions,
    /// Class whose method is being compiled, for name resolution of callables.
    caller: Option<ClassId>,
}

impl<'c, S: Sink> Converter<'c, S> {
    pub fn new(catalog: &'c RuntimeCatalog, classes: &'c ClassTable, sink: S) -> Self {
        Self {
            catalog,
            classes,
            sink,
            temps: TempPool::new(),
            options: ConvertOptions::default(),
            caller: None,
        }
    }

    pub fn with_options(mut self, options: ConvertOptions) -> Self {
        self.options = options;
        self
    }

    /// Sets the class in scope of the compiled method.
    pub fn with_caller(mut self, caller: ClassId) -> Self {
        self.caller = Some(caller);
        self
    }

    pub fn options(&self) -> &ConvertOptions {
        &self.options
    }

    pub fn catalog(&self) -> &'c RuntimeCatalog {
        self.catalog
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    pub fn sink_mut(&mut self) -> &mut S {
        &mut self.sink
    }

    pub fn into_sink(self) -> S {
        self.sink
    }

    pub fn temps(&self) -> &TempPool {
        &self.temps
    }

    /// Ends the current statement; its temporaries become reusable.
    pub fn end_statement(&mut self) {
        self.temps.reset();
    }

    // === Emission helpers ===

    fn emit(&mut self, instruction: Instruction) {
        self.sink.emit(instruction);
    }

    /// Calls a runtime operation whose receiver and explicit arguments are
    /// already on the stack. Implicit arguments are pushed here.
    fn call(&mut self, op: Op) -> Result<Repr, ConvertError> {
        let catalog = self.catalog;
        let method = catalog.get(op).ok_or(ConvertError::MissingRuntimeOp(op))?;

        for param in &method.params {
            match param {
                Param::Repr(_) => {}
                Param::Context => self.emit(Instruction::LdContext),
                Param::TypeHandle => self.emit(Instruction::LdTypeHandle(self.caller)),
            }
        }

        self.emit(match method.receiver {
            Receiver::Constructor(_) => Instruction::NewObj(op),
            Receiver::Instance(_) => Instruction::CallVirt(op),
            Receiver::Static | Receiver::Address(_) => Instruction::Call(op),
        });
        Ok(method.returns)
    }

    /// Calls an address-receiver operation on the value of `repr` on the stack.
    fn call_on_temp(&mut self, repr: Repr, op: Op) -> Result<Repr, ConvertError> {
        self.struct_addr(repr)?;
        self.call(op)
    }

    fn emit_pop(&mut self, repr: Repr) {
        if repr != Repr::Void {
            self.emit(Instruction::Pop);
        }
    }

    fn emit_str(&mut self, value: &str) -> Result<Repr, ConvertError> {
        let index = self.sink.intern_str(value)?;
        self.emit(Instruction::LdStr(index));
        Ok(Repr::Text)
    }

    /// Negates the boolean on the stack.
    fn emit_logic_negation(&mut self) {
        self.emit(Instruction::LdcI4(0));
        self.emit(Instruction::Ceq);
    }
}
