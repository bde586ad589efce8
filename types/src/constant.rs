use crate::repr::Repr;

/// A compile-time known value.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum Constant<'a> {
    Null,
    Bool(bool),
    Long(i64),
    Double(f64),
    Text(&'a str),
}

impl<'a> Constant<'a> {
    /// The representation the value has when loaded without a target.
    pub fn natural_repr(&self) -> Repr {
        match self {
            Constant::Null => Repr::Value,
            Constant::Bool(_) => Repr::Bool,
            Constant::Long(_) => Repr::Int64,
            Constant::Double(_) => Repr::Float64,
            Constant::Text(_) => Repr::Text,
        }
    }

    /// Truthiness as the language defines it.
    ///
    /// `null`, `false`, `0`, `0.0`, `""` and `"0"` are false; everything else,
    /// `NaN` included, is true.
    pub fn is_truthy(&self) -> bool {
        match *self {
            Constant::Null => false,
            Constant::Bool(b) => b,
            Constant::Long(l) => l != 0,
            Constant::Double(d) => d != 0.0,
            Constant::Text(s) => !(s.is_empty() || s == "0"),
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Constant::Null)
    }
}
