//! Bindings of the standard runtime.

use cinder_types::Repr;

use super::{Op, Param, Receiver, RuntimeMethod};

use Param::{Context, TypeHandle};
use Receiver::{Address, Constructor, Instance, Static};

const CONVERT: &str = "Convert";
const NUMBER: &str = "Number";
const MUT_STRING: &str = "MutString";
const VALUE: &str = "Value";

fn p(repr: Repr) -> Param {
    Param::Repr(repr)
}

pub(super) fn method(op: Op) -> RuntimeMethod {
    let m = RuntimeMethod::new;
    match op {
        // Text
        Op::BoolToText => m(CONVERT, "to_string", Static, &[p(Repr::Bool)], Repr::Text),
        Op::IntToText => m(CONVERT, "to_string", Static, &[p(Repr::Int32)], Repr::Text),
        Op::LongToText => m(CONVERT, "to_string", Static, &[p(Repr::Int64)], Repr::Text),
        Op::LongAddrToText => m("long", "to_string", Address(Repr::Int64), &[], Repr::Text),
        Op::DoubleToText => m(
            CONVERT,
            "to_string",
            Static,
            &[p(Repr::Float64), Context],
            Repr::Text,
        ),
        Op::CharToText => m(CONVERT, "to_string", Static, &[p(Repr::Char)], Repr::Text),
        Op::ObjectToText => m("object", "to_string", Instance(Repr::OBJECT), &[], Repr::Text),
        Op::NumberToText => m(NUMBER, "to_string", Address(Repr::Number), &[Context], Repr::Text),
        Op::MutTextToText => m(
            MUT_STRING,
            "to_string",
            Address(Repr::MutText),
            &[Context],
            Repr::Text,
        ),
        Op::ValueToText => m(VALUE, "as_string", Address(Repr::Value), &[Context], Repr::Text),
        Op::TextToChar => m(CONVERT, "to_char", Static, &[p(Repr::Text)], Repr::Char),

        // Mutable text
        Op::NewMutText => m(
            MUT_STRING,
            "new",
            Constructor(Repr::MutText),
            &[p(Repr::Text)],
            Repr::MutText,
        ),
        Op::ValueToMutText => m(
            CONVERT,
            "to_mut_string",
            Static,
            &[p(Repr::Value), Context],
            Repr::MutText,
        ),
        Op::MutTextToBytes => m(
            MUT_STRING,
            "to_bytes",
            Address(Repr::MutText),
            &[Context],
            Repr::Bytes,
        ),

        // Boolean
        Op::DoubleToBool => m(CONVERT, "to_bool", Static, &[p(Repr::Float64)], Repr::Bool),
        Op::TextToBool => m(CONVERT, "to_bool", Static, &[p(Repr::Text)], Repr::Bool),
        Op::ArrayToBool => m(CONVERT, "to_bool", Static, &[p(Repr::Array)], Repr::Bool),
        Op::MutTextToBool => m(MUT_STRING, "to_bool", Address(Repr::MutText), &[], Repr::Bool),
        Op::NumberToBool => m(NUMBER, "to_bool", Address(Repr::Number), &[], Repr::Bool),
        Op::ValueToBool => m(VALUE, "to_bool", Address(Repr::Value), &[], Repr::Bool),

        // Integer
        Op::DoubleToLong => m(CONVERT, "to_long", Static, &[p(Repr::Float64)], Repr::Int64),
        Op::TextToLong => m(CONVERT, "to_long", Static, &[p(Repr::Text)], Repr::Int64),
        Op::MutTextToLong => m(MUT_STRING, "to_long", Address(Repr::MutText), &[], Repr::Int64),
        Op::NumberToLong => m(NUMBER, "to_long", Address(Repr::Number), &[], Repr::Int64),
        Op::ValueToLong => m(VALUE, "to_long", Address(Repr::Value), &[], Repr::Int64),

        // Float
        Op::TextToDouble => m(CONVERT, "to_double", Static, &[p(Repr::Text)], Repr::Float64),
        Op::MutTextToDouble => m(
            MUT_STRING,
            "to_double",
            Address(Repr::MutText),
            &[],
            Repr::Float64,
        ),
        Op::NumberToDouble => m(NUMBER, "to_double", Address(Repr::Number), &[], Repr::Float64),
        Op::ValueToDouble => m(VALUE, "to_double", Address(Repr::Value), &[], Repr::Float64),

        // Numeric union
        Op::NumberFromLong => m(NUMBER, "from_long", Static, &[p(Repr::Int64)], Repr::Number),
        Op::NumberFromDouble => m(
            NUMBER,
            "from_double",
            Static,
            &[p(Repr::Float64)],
            Repr::Number,
        ),
        Op::NumberZero => m(NUMBER, "zero", Static, &[], Repr::Number),
        Op::TextToNumber => m(CONVERT, "to_number", Static, &[p(Repr::Text)], Repr::Number),
        Op::MutTextToNumber => m(
            MUT_STRING,
            "to_number",
            Address(Repr::MutText),
            &[],
            Repr::Number,
        ),
        Op::ValueToNumber => m(VALUE, "to_number", Address(Repr::Value), &[], Repr::Number),
        Op::NumberLong => m(NUMBER, "long", Address(Repr::Number), &[], Repr::Int64),
        Op::NumberDouble => m(NUMBER, "double", Address(Repr::Number), &[], Repr::Float64),

        // Dynamic union construction
        Op::ValueFromBool => m(VALUE, "from_bool", Static, &[p(Repr::Bool)], Repr::Value),
        Op::ValueFromLong => m(VALUE, "from_long", Static, &[p(Repr::Int64)], Repr::Value),
        Op::ValueFromDouble => m(VALUE, "from_double", Static, &[p(Repr::Float64)], Repr::Value),
        Op::ValueFromText => m(VALUE, "from_string", Static, &[p(Repr::Text)], Repr::Value),
        Op::ValueFromMutText => m(
            VALUE,
            "from_mut_string",
            Static,
            &[p(Repr::MutText)],
            Repr::Value,
        ),
        Op::ValueFromNumber => m(VALUE, "from_number", Static, &[p(Repr::Number)], Repr::Value),
        Op::ValueFromArray => m(VALUE, "from_array", Static, &[p(Repr::Array)], Repr::Value),
        Op::ValueFromAlias => m(VALUE, "from_alias", Static, &[p(Repr::Alias)], Repr::Value),
        Op::ValueFromKey => m(VALUE, "from_key", Static, &[p(Repr::Key)], Repr::Value),
        Op::ValueFromObject => m(VALUE, "from_class", Static, &[p(Repr::OBJECT)], Repr::Value),
        Op::ValueVoid => m(VALUE, "void", Static, &[], Repr::Value),
        Op::ValueNull => m(VALUE, "null", Static, &[], Repr::Value),
        Op::ValueTrue => m(VALUE, "true", Static, &[], Repr::Value),
        Op::ValueFalse => m(VALUE, "false", Static, &[], Repr::Value),

        // Dynamic union accessors
        Op::ValueLong => m(VALUE, "long", Address(Repr::Value), &[], Repr::Int64),
        Op::ValueDouble => m(VALUE, "double", Address(Repr::Value), &[], Repr::Float64),
        Op::ValueBool => m(VALUE, "boolean", Address(Repr::Value), &[], Repr::Bool),
        Op::ValueText => m(VALUE, "string", Address(Repr::Value), &[], Repr::Text),
        Op::ValueMutText => m(VALUE, "mut_string", Address(Repr::Value), &[], Repr::MutText),
        Op::ValueArray => m(VALUE, "array", Address(Repr::Value), &[], Repr::Array),
        Op::ValueObject => m(VALUE, "object", Address(Repr::Value), &[], Repr::OBJECT),

        // Dynamic union unwrapping
        Op::ValueGetArray => m(VALUE, "get_array", Address(Repr::Value), &[], Repr::Array),
        Op::ValueToArray => m(VALUE, "to_array", Address(Repr::Value), &[], Repr::Array),
        Op::ValueAsArray => m(CONVERT, "as_array", Static, &[p(Repr::Value)], Repr::Array),
        Op::ValueAsObject => m(CONVERT, "as_object", Static, &[p(Repr::Value)], Repr::OBJECT),
        Op::ValueToClass => m(VALUE, "to_class", Address(Repr::Value), &[], Repr::OBJECT),
        Op::ValueEnsureAlias => m(
            VALUE,
            "ensure_alias",
            Address(Repr::Value),
            &[],
            Repr::Alias,
        ),
        Op::ValueToKey => m(CONVERT, "to_key", Static, &[p(Repr::Value)], Repr::Key),

        // Alias
        Op::AliasGetValue => m("Alias", "value", Instance(Repr::Alias), &[], Repr::Value),
        Op::NewAlias => m(
            "Alias",
            "new",
            Constructor(Repr::Alias),
            &[p(Repr::Value)],
            Repr::Alias,
        ),

        // Key
        Op::NewKeyFromInt => m("Key", "new", Constructor(Repr::Key), &[p(Repr::Int32)], Repr::Key),
        Op::NewKeyFromText => m("Key", "new", Constructor(Repr::Key), &[p(Repr::Text)], Repr::Key),

        // Callable
        Op::TextAsCallable => m(
            CONVERT,
            "as_callable",
            Static,
            &[p(Repr::Text), TypeHandle],
            Repr::Callable,
        ),
        Op::ValueAsCallable => m(
            CONVERT,
            "as_callable",
            Static,
            &[p(Repr::Value), TypeHandle],
            Repr::Callable,
        ),

        // Array
        Op::ConvertibleToArray => m(
            "Convertible",
            "to_array",
            Instance(Repr::OBJECT),
            &[],
            Repr::Array,
        ),
    }
}
