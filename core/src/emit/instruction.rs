use core::fmt;

use cinder_types::{ClassId, Prim, Repr};

use crate::catalog::Op;

/// A symbolic branch target, resolved when the code is assembled.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct Label(pub u32);

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "L{}", self.0)
    }
}

/// Stack-machine instruction.
///
/// Runtime operations are referenced by their [`Op`] key; the sink resolves
/// them through the catalog it was created with.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum Instruction {
    Nop,
    Pop,
    Dup,

    // === Constants ===
    LdNull,
    LdcI4(i32),
    LdcI8(i64),
    LdcR4(f32),
    LdcR8(f64),
    /// Load interned text by pool index.
    LdStr(u32),

    // === Storage ===
    LdLoc(u32),
    LdLocA(u32),
    StLoc(u32),
    LdArg(u32),
    LdArgA(u32),

    /// Load the ambient runtime context.
    LdContext,
    /// Load the runtime type handle of a class, `None` outside any class.
    LdTypeHandle(Option<ClassId>),

    // === Numeric ===
    ConvI4,
    ConvI8,
    ConvR4,
    ConvR8,
    Ceq,
    CgtUn,

    // === Calls ===
    Call(Op),
    CallVirt(Op),
    NewObj(Op),
    /// Opaque call of a user routine, arguments already evaluated.
    Invoke { routine: u32, returns_value: bool },

    // === Type tests ===
    Box(Repr),
    /// Checked reference cast, fails at run time on mismatch.
    CastClass(Repr),
    /// Reference test yielding the instance or null.
    IsInst(Repr),

    // === Nullable ===
    NewNullable(Prim),
    /// Consumes the address of a nullable.
    NullableHasValue(Prim),
    /// Consumes the address of a nullable.
    NullableGetValue(Prim),

    // === Control flow ===
    Br(Label),
    BrFalse(Label),
    MarkLabel(Label),
    Ret,
}

impl Instruction {
    /// The runtime operation this instruction calls, if any.
    pub fn op(&self) -> Option<Op> {
        match *self {
            Instruction::Call(op) | Instruction::CallVirt(op) | Instruction::NewObj(op) => Some(op),
            _ => None,
        }
    }

    /// Whether this instruction calls into the runtime.
    pub fn is_runtime_call(&self) -> bool {
        self.op().is_some()
    }
}

static_assertions::assert_eq_size!(Instruction, [u64; 2]);

impl fmt::Display for Instruction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Instruction::LdcI4(v) => write!(f, "ldc.i4 {v}"),
            Instruction::LdcI8(v) => write!(f, "ldc.i8 {v}"),
            Instruction::LdcR4(v) => write!(f, "ldc.r4 {v:?}"),
            Instruction::LdcR8(v) => write!(f, "ldc.r8 {v:?}"),
            Instruction::LdStr(i) => write!(f, "ldstr #{i}"),
            Instruction::LdLoc(i) => write!(f, "ldloc {i}"),
            Instruction::LdLocA(i) => write!(f, "ldloca {i}"),
            Instruction::StLoc(i) => write!(f, "stloc {i}"),
            Instruction::LdArg(i) => write!(f, "ldarg {i}"),
            Instruction::LdArgA(i) => write!(f, "ldarga {i}"),
            Instruction::LdTypeHandle(Some(class)) => write!(f, "ldtoken class#{}", class.index()),
            Instruction::LdTypeHandle(None) => write!(f, "ldtoken <global>"),
            Instruction::Call(op) => write!(f, "call {op}"),
            Instruction::CallVirt(op) => write!(f, "callvirt {op}"),
            Instruction::NewObj(op) => write!(f, "newobj {op}"),
            Instruction::Invoke {
                routine,
                returns_value,
            } => write!(f, "invoke #{routine} ({returns_value})"),
            Instruction::Box(repr) => write!(f, "box {repr}"),
            Instruction::CastClass(repr) => write!(f, "castclass {repr}"),
            Instruction::IsInst(repr) => write!(f, "isinst {repr}"),
            Instruction::NewNullable(p) => write!(f, "newobj nullable<{}>", p.repr()),
            Instruction::NullableHasValue(p) => write!(f, "has_value nullable<{}>", p.repr()),
            Instruction::NullableGetValue(p) => write!(f, "get_value nullable<{}>", p.repr()),
            Instruction::Br(label) => write!(f, "br {label}"),
            Instruction::BrFalse(label) => write!(f, "brfalse {label}"),
            Instruction::MarkLabel(label) => write!(f, "{label}:"),
            Instruction::Nop => write!(f, "nop"),
            Instruction::Pop => write!(f, "pop"),
            Instruction::Dup => write!(f, "dup"),
            Instruction::LdNull => write!(f, "ldnull"),
            Instruction::LdContext => write!(f, "ldctx"),
            Instruction::ConvI4 => write!(f, "conv.i4"),
            Instruction::ConvI8 => write!(f, "conv.i8"),
            Instruction::ConvR4 => write!(f, "conv.r4"),
            Instruction::ConvR8 => write!(f, "conv.r8"),
            Instruction::Ceq => write!(f, "ceq"),
            Instruction::CgtUn => write!(f, "cgt.un"),
            Instruction::Ret => write!(f, "ret"),
        }
    }
}
