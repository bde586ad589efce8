use bitflags::bitflags;

use crate::repr::Repr;

bitflags! {
    /// Flow-sensitive hint: the set of representation families a value may
    /// have at a given program point.
    ///
    /// Produced by flow analysis before code generation. The empty set means
    /// "nothing is known" and never enables a specialization.
    #[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Default)]
    pub struct TypeHint: u16 {
        const NULL = 1;
        const BOOL = 1 << 1;
        const LONG = 1 << 2;
        const DOUBLE = 1 << 3;
        const STRING = 1 << 4;
        const WRITABLE_STRING = 1 << 5;
        const ARRAY = 1 << 6;
        const OBJECT = 1 << 7;
        const RESOURCE = 1 << 8;
        /// The value may be reached through an alias.
        const REF = 1 << 9;
        /// No value is produced.
        const VOID = 1 << 10;

        const ANY = Self::NULL.bits()
            | Self::BOOL.bits()
            | Self::LONG.bits()
            | Self::DOUBLE.bits()
            | Self::STRING.bits()
            | Self::WRITABLE_STRING.bits()
            | Self::ARRAY.bits()
            | Self::OBJECT.bits()
            | Self::RESOURCE.bits();
    }
}

impl TypeHint {
    /// Removes the by-reference marker, i.e. the hint of the dereferenced value.
    pub fn without_ref(self) -> Self {
        self - TypeHint::REF
    }

    /// The single representation this hint proves, if any.
    ///
    /// Only exact single-family hints qualify. `NULL` and `VOID` never do:
    /// they describe the absence of a payload rather than a layout.
    pub fn single(self) -> Option<Repr> {
        let hint = self.without_ref();
        let repr = if hint == TypeHint::BOOL {
            Repr::Bool
        } else if hint == TypeHint::LONG {
            Repr::Int64
        } else if hint == TypeHint::DOUBLE {
            Repr::Float64
        } else if hint == TypeHint::STRING {
            Repr::Text
        } else if hint == TypeHint::WRITABLE_STRING {
            Repr::MutText
        } else if hint == TypeHint::ARRAY {
            Repr::Array
        } else if hint == TypeHint::OBJECT {
            Repr::OBJECT
        } else if hint == TypeHint::RESOURCE {
            Repr::Resource
        } else {
            return None;
        };
        Some(repr)
    }
}
