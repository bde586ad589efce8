use core::fmt;

/// Key of a runtime operation in the [`RuntimeCatalog`](super::RuntimeCatalog).
///
/// The set is closed: the code generator never invents operations, it only
/// asks the catalog how a known operation is bound in the target runtime.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Op {
    // === Text ===
    BoolToText,
    IntToText,
    LongToText,
    LongAddrToText,
    DoubleToText,
    CharToText,
    ObjectToText,
    NumberToText,
    MutTextToText,
    ValueToText,
    TextToChar,

    // === Mutable text ===
    NewMutText,
    ValueToMutText,
    MutTextToBytes,

    // === Boolean ===
    DoubleToBool,
    TextToBool,
    ArrayToBool,
    MutTextToBool,
    NumberToBool,
    ValueToBool,

    // === Integer ===
    DoubleToLong,
    TextToLong,
    MutTextToLong,
    NumberToLong,
    ValueToLong,

    // === Float ===
    TextToDouble,
    MutTextToDouble,
    NumberToDouble,
    ValueToDouble,

    // === Numeric union ===
    NumberFromLong,
    NumberFromDouble,
    NumberZero,
    TextToNumber,
    MutTextToNumber,
    ValueToNumber,
    NumberLong,
    NumberDouble,

    // === Dynamic union construction ===
    ValueFromBool,
    ValueFromLong,
    ValueFromDouble,
    ValueFromText,
    ValueFromMutText,
    ValueFromNumber,
    ValueFromArray,
    ValueFromAlias,
    ValueFromKey,
    ValueFromObject,
    ValueVoid,
    ValueNull,
    ValueTrue,
    ValueFalse,

    // === Dynamic union accessors ===
    ValueLong,
    ValueDouble,
    ValueBool,
    ValueText,
    ValueMutText,
    ValueArray,
    ValueObject,

    // === Dynamic union unwrapping ===
    ValueGetArray,
    ValueToArray,
    ValueAsArray,
    ValueAsObject,
    ValueToClass,
    ValueEnsureAlias,
    ValueToKey,

    // === Alias ===
    AliasGetValue,
    NewAlias,

    // === Key ===
    NewKeyFromInt,
    NewKeyFromText,

    // === Callable ===
    TextAsCallable,
    ValueAsCallable,

    // === Array ===
    ConvertibleToArray,
}

impl Op {
    pub const ALL: [Op; 72] = [
        Op::BoolToText,
        Op::IntToText,
        Op::LongToText,
        Op::LongAddrToText,
        Op::DoubleToText,
        Op::CharToText,
        Op::ObjectToText,
        Op::NumberToText,
        Op::MutTextToText,
        Op::ValueToText,
        Op::TextToChar,
        Op::NewMutText,
        Op::ValueToMutText,
        Op::MutTextToBytes,
        Op::DoubleToBool,
        Op::TextToBool,
        Op::ArrayToBool,
        Op::MutTextToBool,
        Op::NumberToBool,
        Op::ValueToBool,
        Op::DoubleToLong,
        Op::TextToLong,
        Op::MutTextToLong,
        Op::NumberToLong,
        Op::ValueToLong,
        Op::TextToDouble,
        Op::MutTextToDouble,
        Op::NumberToDouble,
        Op::ValueToDouble,
        Op::NumberFromLong,
        Op::NumberFromDouble,
        Op::NumberZero,
        Op::TextToNumber,
        Op::MutTextToNumber,
        Op::ValueToNumber,
        Op::NumberLong,
        Op::NumberDouble,
        Op::ValueFromBool,
        Op::ValueFromLong,
        Op::ValueFromDouble,
        Op::ValueFromText,
        Op::ValueFromMutText,
        Op::ValueFromNumber,
        Op::ValueFromArray,
        Op::ValueFromAlias,
        Op::ValueFromKey,
        Op::ValueFromObject,
        Op::ValueVoid,
        Op::ValueNull,
        Op::ValueTrue,
        Op::ValueFalse,
        Op::ValueLong,
        Op::ValueDouble,
        Op::ValueBool,
        Op::ValueText,
        Op::ValueMutText,
        Op::ValueArray,
        Op::ValueObject,
        Op::ValueGetArray,
        Op::ValueToArray,
        Op::ValueAsArray,
        Op::ValueAsObject,
        Op::ValueToClass,
        Op::ValueEnsureAlias,
        Op::ValueToKey,
        Op::AliasGetValue,
        Op::NewAlias,
        Op::NewKeyFromInt,
        Op::NewKeyFromText,
        Op::TextAsCallable,
        Op::ValueAsCallable,
        Op::ConvertibleToArray,
    ];
}

impl fmt::Display for Op {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}
