//! Reference implementation of [`Sink`].

use core::fmt::Write as _;

use cinder_types::Repr;

use super::{Instruction, Label, Sink};
use crate::catalog::RuntimeCatalog;
use crate::compiler::ConvertError;
use crate::{String, ToString, Vec};

/// Upper bound of local slots per method.
const MAX_LOCALS: usize = u16::MAX as usize;

/// Accumulates an instruction stream.
///
/// Tracks the evaluation stack precisely so that the exact `max_stack_size`
/// is known once the code is finalized. Runtime calls take their stack effect
/// from the catalog the builder was created with.
pub struct CodeBuilder<'c> {
    catalog: &'c RuntimeCatalog,

    instructions: Vec<Instruction>,

    /// Interned text, indexed by `LdStr`.
    strings: Vec<String>,
    string_map: hashbrown::HashMap<String, u32>,

    /// Representation of each declared local.
    locals: Vec<Repr>,

    num_labels: u32,
    /// Stack depth recorded at the first branch to each label.
    label_depths: hashbrown::HashMap<Label, usize>,

    current_stack_depth: usize,
    max_stack_size: usize,
}

/// Finalized instruction stream.
#[derive(Debug, Clone, PartialEq)]
pub struct Code {
    pub instructions: Vec<Instruction>,
    pub strings: Vec<String>,
    pub locals: Vec<Repr>,
    pub max_stack_size: usize,
}

impl<'c> CodeBuilder<'c> {
    pub fn new(catalog: &'c RuntimeCatalog) -> Self {
        Self {
            catalog,
            instructions: Vec::new(),
            strings: Vec::new(),
            string_map: hashbrown::HashMap::new(),
            locals: Vec::new(),
            num_labels: 0,
            label_depths: hashbrown::HashMap::new(),
            current_stack_depth: 0,
            max_stack_size: 0,
        }
    }

    pub fn instructions(&self) -> &[Instruction] {
        &self.instructions
    }

    /// Number of instructions emitted so far.
    pub fn len(&self) -> usize {
        self.instructions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.instructions.is_empty()
    }

    pub fn stack_depth(&self) -> usize {
        self.current_stack_depth
    }

    pub fn max_stack_size(&self) -> usize {
        self.max_stack_size
    }

    pub fn local(&self, slot: u32) -> Option<Repr> {
        self.locals.get(slot as usize).copied()
    }

    pub fn string(&self, index: u32) -> Option<&str> {
        self.strings.get(index as usize).map(String::as_str)
    }

    pub fn finalize(self) -> Code {
        Code {
            instructions: self.instructions,
            strings: self.strings,
            locals: self.locals,
            max_stack_size: self.max_stack_size,
        }
    }

    // === Stack Management ===

    fn push_stack(&mut self) {
        self.current_stack_depth += 1;
        if self.current_stack_depth > self.max_stack_size {
            self.max_stack_size = self.current_stack_depth;
        }
    }

    fn pop_stack_n(&mut self, n: usize) {
        debug_assert!(
            self.current_stack_depth >= n,
            "Stack underflow: trying to pop {} but depth is {}",
            n,
            self.current_stack_depth
        );
        self.current_stack_depth = self.current_stack_depth.saturating_sub(n);
    }

    /// Applies the stack effect of `instruction`.
    fn track(&mut self, instruction: &Instruction) {
        use Instruction::*;

        let (pops, pushes) = match *instruction {
            Nop => (0, 0),
            Pop => (1, 0),
            Dup => (1, 2),
            LdNull | LdcI4(_) | LdcI8(_) | LdcR4(_) | LdcR8(_) | LdStr(_) => (0, 1),
            LdLoc(_) | LdLocA(_) | LdArg(_) | LdArgA(_) | LdContext | LdTypeHandle(_) => (0, 1),
            StLoc(_) => (1, 0),
            ConvI4 | ConvI8 | ConvR4 | ConvR8 => (1, 1),
            Ceq | CgtUn => (2, 1),
            Call(op) | CallVirt(op) | NewObj(op) => match self.catalog.get(op) {
                Some(method) => (method.pops(), method.pushes()),
                None => {
                    tracing::warn!(%op, "Emitting a call to an unbound runtime operation");
                    (0, 0)
                }
            },
            Invoke { returns_value, .. } => (0, returns_value as usize),
            Box(_) | CastClass(_) | IsInst(_) => (1, 1),
            NewNullable(_) | NullableHasValue(_) | NullableGetValue(_) => (1, 1),
            Br(label) => {
                self.label_depths
                    .entry(label)
                    .or_insert(self.current_stack_depth);
                (0, 0)
            }
            BrFalse(label) => {
                self.pop_stack_n(1);
                self.label_depths
                    .entry(label)
                    .or_insert(self.current_stack_depth);
                (0, 0)
            }
            MarkLabel(label) => {
                // Code after an unconditional branch is only reachable
                // through the label, so the depth comes from the branches.
                if let Some(&depth) = self.label_depths.get(&label) {
                    self.current_stack_depth = depth;
                }
                (0, 0)
            }
            Ret => (self.current_stack_depth, 0),
        };

        self.pop_stack_n(pops);
        for _ in 0..pushes {
            self.push_stack();
        }
    }
}

impl Sink for CodeBuilder<'_> {
    fn emit(&mut self, instruction: Instruction) {
        self.track(&instruction);
        self.instructions.push(instruction);
    }

    fn intern_str(&mut self, value: &str) -> Result<u32, ConvertError> {
        if let Some(&index) = self.string_map.get(value) {
            return Ok(index);
        }

        let index: u32 = self
            .strings
            .len()
            .try_into()
            .map_err(|_| ConvertError::TooManyStrings)?;
        self.strings.push(value.to_string());
        self.string_map.insert(value.to_string(), index);
        Ok(index)
    }

    fn declare_local(&mut self, repr: Repr) -> Result<u32, ConvertError> {
        let index = self.locals.len();
        if index >= MAX_LOCALS {
            return Err(ConvertError::TooManyLocals);
        }
        self.locals.push(repr);
        Ok(index as u32)
    }

    fn define_label(&mut self) -> Label {
        let label = Label(self.num_labels);
        self.num_labels += 1;
        label
    }
}

impl Code {
    /// Human-readable listing, one numbered instruction per line.
    ///
    /// Runtime calls are rendered with the signature bound in `catalog`,
    /// interned text is shown inline.
    pub fn disassemble(&self, catalog: &RuntimeCatalog) -> String {
        let mut out = String::new();
        for (i, instruction) in self.instructions.iter().enumerate() {
            // Writing to a String cannot fail.
            let _ = match instruction {
                Instruction::LdStr(index) => match self.strings.get(*index as usize) {
                    Some(text) => writeln!(out, "{i:04} ldstr {text:?}"),
                    None => writeln!(out, "{i:04} {instruction}"),
                },
                Instruction::Call(op) | Instruction::CallVirt(op) | Instruction::NewObj(op) => {
                    let mnemonic = match instruction {
                        Instruction::CallVirt(_) => "callvirt",
                        Instruction::NewObj(_) => "newobj",
                        _ => "call",
                    };
                    match catalog.get(*op) {
                        Some(method) => writeln!(out, "{i:04} {mnemonic} {method}"),
                        None => writeln!(out, "{i:04} {mnemonic} <unbound {op}>"),
                    }
                }
                _ => writeln!(out, "{i:04} {instruction}"),
            };
        }
        out
    }
}
