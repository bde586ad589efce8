use core::fmt;

use crate::class::ClassId;
use crate::hint::TypeHint;

/// Physical representation of a runtime value.
///
/// Exactly one representation describes the layout of a value at any program
/// point. Flow analysis may only know a *set* of possible representation
/// families for a storage location, see [`TypeHint`].
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Repr {
    /// Absence of a value (result of a statement, `void` routine).
    Void,

    /// Boolean, 0/1 on the evaluation stack.
    Bool,

    /// 32-bit signed integer.
    Int32,

    /// 64-bit signed integer, the language's native integer.
    Int64,

    /// 32-bit float.
    Float32,

    /// 64-bit float, the language's native float.
    Float64,

    /// A single UTF-16 code unit.
    Char,

    /// Immutable text (heap reference).
    Text,

    /// Mutable, rope-like text (multi-field value type).
    MutText,

    /// Tagged integer-or-float union (multi-field value type).
    Number,

    /// The dynamic union able to hold a value of any representation.
    Value,

    /// Integer-or-text key of an ordered collection (value type).
    Key,

    /// Ordered associative collection (heap reference).
    Array,

    /// Reference cell used for by-reference semantics (heap reference).
    Alias,

    /// Resource handle (heap reference).
    Resource,

    /// The callable capability interface (heap reference).
    Callable,

    /// Byte array (heap reference), produced by binary-safe text coercion.
    Bytes,

    /// Boxed class instance.
    Object(ClassId),

    /// Nullable wrapper around a value-type payload.
    Nullable(Prim),
}

static_assertions::assert_eq_size!(Repr, u64);

impl Repr {
    /// Every representation the engine knows about, with `Object` and
    /// `Nullable` instantiated once (root class, 64-bit integer payload).
    pub const ALL: [Repr; 19] = [
        Repr::Void,
        Repr::Bool,
        Repr::Int32,
        Repr::Int64,
        Repr::Float32,
        Repr::Float64,
        Repr::Char,
        Repr::Text,
        Repr::MutText,
        Repr::Number,
        Repr::Value,
        Repr::Key,
        Repr::Array,
        Repr::Alias,
        Repr::Resource,
        Repr::Callable,
        Repr::Bytes,
        Repr::Object(ClassId::OBJECT),
        Repr::Nullable(Prim::Int64),
    ];

    /// The root class `object`.
    pub const OBJECT: Repr = Repr::Object(ClassId::OBJECT);

    /// Values of this representation are heap references (may be null).
    pub fn is_reference_type(self) -> bool {
        matches!(
            self,
            Repr::Text
                | Repr::Array
                | Repr::Alias
                | Repr::Resource
                | Repr::Callable
                | Repr::Bytes
                | Repr::Object(_)
        )
    }

    /// Values of this representation are copied by value.
    pub fn is_value_type(self) -> bool {
        !self.is_reference_type() && self != Repr::Void
    }

    /// Multi-field value types whose operations are invoked on an address.
    ///
    /// A value of such a representation sitting on the evaluation stack has
    /// to be spilled into scratch storage before calling those operations.
    pub fn needs_address(self) -> bool {
        matches!(
            self,
            Repr::MutText | Repr::Number | Repr::Value | Repr::Key | Repr::Nullable(_)
        )
    }

    /// Numeric scalars, including booleans (they promote to 0/1).
    pub fn is_numeric_scalar(self) -> bool {
        matches!(
            self,
            Repr::Bool | Repr::Int32 | Repr::Int64 | Repr::Float32 | Repr::Float64
        )
    }

    /// The hint family a value of this representation belongs to.
    pub fn hint(self) -> TypeHint {
        match self {
            Repr::Void => TypeHint::VOID,
            Repr::Bool => TypeHint::BOOL,
            Repr::Int32 | Repr::Int64 => TypeHint::LONG,
            Repr::Float32 | Repr::Float64 => TypeHint::DOUBLE,
            Repr::Char | Repr::Text => TypeHint::STRING,
            Repr::MutText => TypeHint::WRITABLE_STRING,
            Repr::Number => TypeHint::LONG | TypeHint::DOUBLE,
            Repr::Value => TypeHint::ANY,
            Repr::Key => TypeHint::LONG | TypeHint::STRING,
            Repr::Array => TypeHint::ARRAY,
            Repr::Alias => TypeHint::REF,
            Repr::Resource => TypeHint::RESOURCE,
            Repr::Callable | Repr::Bytes | Repr::Object(_) => TypeHint::OBJECT,
            Repr::Nullable(payload) => payload.repr().hint() | TypeHint::NULL,
        }
    }
}

impl fmt::Display for Repr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Repr::Void => write!(f, "void"),
            Repr::Bool => write!(f, "bool"),
            Repr::Int32 => write!(f, "int32"),
            Repr::Int64 => write!(f, "int64"),
            Repr::Float32 => write!(f, "float32"),
            Repr::Float64 => write!(f, "float64"),
            Repr::Char => write!(f, "char"),
            Repr::Text => write!(f, "text"),
            Repr::MutText => write!(f, "mut_text"),
            Repr::Number => write!(f, "number"),
            Repr::Value => write!(f, "value"),
            Repr::Key => write!(f, "key"),
            Repr::Array => write!(f, "array"),
            Repr::Alias => write!(f, "alias"),
            Repr::Resource => write!(f, "resource"),
            Repr::Callable => write!(f, "callable"),
            Repr::Bytes => write!(f, "bytes"),
            Repr::Object(class) => write!(f, "object#{}", class.index()),
            Repr::Nullable(payload) => write!(f, "nullable<{}>", payload.repr()),
        }
    }
}

/// Value-type payloads of [`Repr::Nullable`].
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Prim {
    Bool,
    Int32,
    Int64,
    Float32,
    Float64,
    Char,
    Number,
    Key,
}

impl Prim {
    pub fn repr(self) -> Repr {
        match self {
            Prim::Bool => Repr::Bool,
            Prim::Int32 => Repr::Int32,
            Prim::Int64 => Repr::Int64,
            Prim::Float32 => Repr::Float32,
            Prim::Float64 => Repr::Float64,
            Prim::Char => Repr::Char,
            Prim::Number => Repr::Number,
            Prim::Key => Repr::Key,
        }
    }

    /// The payload for `repr`, if it may be wrapped in a nullable.
    pub fn from_repr(repr: Repr) -> Option<Prim> {
        Some(match repr {
            Repr::Bool => Prim::Bool,
            Repr::Int32 => Prim::Int32,
            Repr::Int64 => Prim::Int64,
            Repr::Float32 => Prim::Float32,
            Repr::Float64 => Prim::Float64,
            Repr::Char => Prim::Char,
            Repr::Number => Prim::Number,
            Repr::Key => Prim::Key,
            _ => return None,
        })
    }
}
