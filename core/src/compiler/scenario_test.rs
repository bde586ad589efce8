//! End-to-end conversions of expressions, from evaluation to the requested
//! representation.

use bumpalo::Bump;
use cinder_types::{ClassFlags, ClassId, ClassTable, Constant, Repr, TypeHint};
use expect_test::expect;
use pretty_assertions::assert_eq;

use crate::api::ConvertOptions;
use crate::catalog::{Op, RuntimeCatalog};
use crate::compiler::{ConvertError, Converter};
use crate::emit::{CodeBuilder, Instruction, Sink};
use crate::expr::{Access, ExprBuilder, Place};
use crate::test_utils::init_test_logging;

use Instruction::*;

/// A converter over a fresh builder with the given locals declared.
fn new_converter<'c>(
    catalog: &'c RuntimeCatalog,
    classes: &'c ClassTable,
    locals: &[Repr],
) -> Converter<'c, CodeBuilder<'c>> {
    let mut builder = CodeBuilder::new(catalog);
    for &repr in locals {
        builder.declare_local(repr).unwrap();
    }
    Converter::new(catalog, classes, builder)
}

/// A parameter slot whose address cannot be taken.
#[derive(Debug)]
struct OpaquePlace {
    repr: Repr,
}

impl Place for OpaquePlace {
    fn repr(&self) -> Option<Repr> {
        Some(self.repr)
    }

    fn has_address(&self) -> bool {
        false
    }

    fn emit_load(&self, sink: &mut dyn Sink) -> Result<Repr, ConvertError> {
        sink.emit(LdArg(0));
        Ok(self.repr)
    }

    fn emit_load_address(&self, _sink: &mut dyn Sink) -> Result<Repr, ConvertError> {
        Err(ConvertError::InvalidAccess)
    }
}

/// A place that claims an address but fails to produce it.
#[derive(Debug)]
struct BrokenPlace;

impl Place for BrokenPlace {
    fn repr(&self) -> Option<Repr> {
        Some(Repr::Value)
    }

    fn emit_load(&self, sink: &mut dyn Sink) -> Result<Repr, ConvertError> {
        sink.emit(LdArg(0));
        Ok(Repr::Value)
    }

    fn emit_load_address(&self, _sink: &mut dyn Sink) -> Result<Repr, ConvertError> {
        Err(ConvertError::InvalidAccess)
    }
}

#[test]
fn test_true_to_text_is_folded() {
    let catalog = RuntimeCatalog::standard();
    let classes = ClassTable::new();
    let arena = Bump::new();
    let exprs = ExprBuilder::new(&arena);

    let mut converter = new_converter(&catalog, &classes, &[]);
    let result = converter.convert_expr(exprs.bool(true), Repr::Text);

    assert_eq!(result, Ok(Repr::Text));
    let code = converter.into_sink().finalize();
    assert_eq!(code.instructions, vec![LdStr(0)]);
    assert_eq!(code.strings, vec!["1".to_string()]);
}

#[test]
fn test_long_local_to_text() {
    let catalog = RuntimeCatalog::standard();
    let classes = ClassTable::new();
    let arena = Bump::new();
    let exprs = ExprBuilder::new(&arena);

    let mut converter = new_converter(&catalog, &classes, &[Repr::Int64]);
    let local = exprs.local(0, Repr::Int64);
    let result = converter.convert_expr(exprs.load(local, TypeHint::LONG), Repr::Text);

    assert_eq!(result, Ok(Repr::Text));
    assert_eq!(
        converter.sink().instructions(),
        &[LdLocA(0), Call(Op::LongAddrToText)]
    );

    let mut general = new_converter(&catalog, &classes, &[Repr::Int64])
        .with_options(ConvertOptions::unoptimized());
    general
        .convert_expr(exprs.load(local, TypeHint::LONG), Repr::Text)
        .unwrap();
    assert_eq!(
        general.sink().instructions(),
        &[LdLoc(0), Call(Op::LongToText)]
    );
    assert_eq!(general.temps().declared(), 0);
}

#[test]
fn test_number_place_reads_through_address() {
    let catalog = RuntimeCatalog::standard();
    let classes = ClassTable::new();
    let arena = Bump::new();
    let exprs = ExprBuilder::new(&arena);

    let mut converter = new_converter(&catalog, &classes, &[Repr::Number]);
    let local = exprs.local(0, Repr::Number);
    let expr = exprs.load(local, TypeHint::LONG | TypeHint::DOUBLE);
    let result = converter.convert_expr(expr, Repr::Int64);

    assert_eq!(result, Ok(Repr::Int64));
    assert_eq!(
        converter.sink().instructions(),
        &[LdLocA(0), Call(Op::NumberToLong)]
    );
    assert_eq!(converter.temps().declared(), 0);
}

#[test]
fn test_void_invocation_to_array_is_null() {
    let catalog = RuntimeCatalog::standard();
    let classes = ClassTable::new();
    let arena = Bump::new();
    let exprs = ExprBuilder::new(&arena);

    let mut converter = new_converter(&catalog, &classes, &[]);
    let call = exprs.invoke("reset", Repr::Void, TypeHint::VOID);
    let result = converter.convert_expr(call, Repr::Array);

    assert_eq!(result, Ok(Repr::Array));
    assert_eq!(
        converter.sink().instructions(),
        &[
            Invoke {
                routine: 0,
                returns_value: false,
            },
            LdNull,
        ]
    );
    assert_eq!(converter.sink().stack_depth(), 1);
}

#[test]
fn test_unrelated_instance_to_array_is_checked_cast() {
    let catalog = RuntimeCatalog::standard();
    let mut classes = ClassTable::new();
    let point = classes.declare("Point", None, ClassFlags::empty());
    let arena = Bump::new();
    let exprs = ExprBuilder::new(&arena);

    let mut converter = new_converter(&catalog, &classes, &[Repr::Object(point)]);
    let local = exprs.local(0, Repr::Object(point));
    let result = converter.convert_expr(exprs.load(local, TypeHint::OBJECT), Repr::Array);

    assert_eq!(result, Ok(Repr::Array));
    assert_eq!(
        converter.sink().instructions(),
        &[LdLoc(0), CastClass(Repr::Array)]
    );
}

#[test]
fn test_aliased_text_to_mutable_text() {
    init_test_logging();

    let catalog = RuntimeCatalog::standard();
    let classes = ClassTable::new();
    let arena = Bump::new();
    let exprs = ExprBuilder::new(&arena);

    let mut converter = new_converter(&catalog, &classes, &[Repr::Alias]);
    let local = exprs.local(0, Repr::Alias);
    let expr = exprs.load(local, TypeHint::STRING | TypeHint::REF);
    let result = converter.convert_expr(expr, Repr::MutText);

    assert_eq!(result, Ok(Repr::MutText));
    assert_eq!(
        converter.sink().instructions(),
        &[
            LdLoc(0),
            CallVirt(Op::AliasGetValue),
            StLoc(1),
            LdLocA(1),
            Call(Op::ValueText),
            NewObj(Op::NewMutText),
        ]
    );

    let code = converter.into_sink().finalize();
    assert_eq!(code.locals, vec![Repr::Alias, Repr::Value]);
    expect![[r#"
        0000 ldloc 0
        0001 callvirt Alias::value() -> value
        0002 stloc 1
        0003 ldloca 1
        0004 call Value::string() -> text
        0005 newobj MutString::new(text) -> mut_text
    "#]]
    .assert_eq(&code.disassemble(&catalog));
}

#[test]
fn test_folding_matches_general_paths() {
    let catalog = RuntimeCatalog::standard();
    let classes = ClassTable::new();
    let arena = Bump::new();
    let exprs = ExprBuilder::new(&arena);

    let constants = [
        exprs.null(),
        exprs.bool(true),
        exprs.bool(false),
        exprs.long(-7),
        exprs.long(1 << 40),
        exprs.double(0.5),
        exprs.text("12"),
        exprs.text(""),
    ];

    for expr in constants {
        for to in Repr::ALL {
            let mut folded = new_converter(&catalog, &classes, &[]);
            let folded_result = folded.convert_expr(expr, to);

            let mut general =
                new_converter(&catalog, &classes, &[]).with_options(ConvertOptions::unoptimized());
            let general_result = general.convert_expr(expr, to);

            assert_eq!(folded_result, general_result, "{:?} -> {to}", expr.kind);
            if folded_result.is_ok() {
                assert_eq!(
                    folded.sink().stack_depth(),
                    general.sink().stack_depth(),
                    "{:?} -> {to}",
                    expr.kind
                );
                assert!(
                    folded.sink().len() <= general.sink().len(),
                    "{:?} -> {to}",
                    expr.kind
                );
            }
        }
    }
}

#[test]
fn test_float_to_text_is_not_folded() {
    let catalog = RuntimeCatalog::standard();
    let classes = ClassTable::new();
    let arena = Bump::new();
    let exprs = ExprBuilder::new(&arena);

    let mut converter = new_converter(&catalog, &classes, &[]);
    converter.convert_expr(exprs.double(1.5), Repr::Text).unwrap();

    assert_eq!(
        converter.sink().instructions(),
        &[LdcR8(1.5), LdContext, Call(Op::DoubleToText)]
    );
}

#[test]
fn test_known_load_is_folded() {
    let catalog = RuntimeCatalog::standard();
    let classes = ClassTable::new();
    let arena = Bump::new();
    let exprs = ExprBuilder::new(&arena);

    let mut converter = new_converter(&catalog, &classes, &[Repr::Int64]);
    let local = exprs.local(0, Repr::Int64);
    let expr = exprs.known_load(local, TypeHint::LONG, Constant::Long(42));
    converter.convert_expr(expr, Repr::Text).unwrap();

    assert_eq!(expr.access(), Access::Read);
    let code = converter.into_sink().finalize();
    assert_eq!(code.instructions, vec![LdStr(0)]);
    assert_eq!(code.strings, vec!["42".to_string()]);
}

#[test]
fn test_discarding_expressions() {
    let catalog = RuntimeCatalog::standard();
    let classes = ClassTable::new();
    let arena = Bump::new();
    let exprs = ExprBuilder::new(&arena);
    let local = exprs.local(0, Repr::Value);

    let mut converter = new_converter(&catalog, &classes, &[Repr::Value]);
    let load = exprs.load(local, TypeHint::ANY);
    assert_eq!(converter.convert_expr(load, Repr::Void), Ok(Repr::Void));
    assert_eq!(load.access(), Access::None);
    assert_eq!(converter.sink().len(), 0);

    let call = exprs.invoke("next", Repr::Int64, TypeHint::LONG);
    converter.convert_expr(call, Repr::Void).unwrap();
    let procedure = exprs.invoke("flush", Repr::Void, TypeHint::VOID);
    converter.convert_expr(procedure, Repr::Void).unwrap();

    assert_eq!(
        converter.sink().instructions(),
        &[
            Invoke {
                routine: 0,
                returns_value: true,
            },
            Pop,
            Invoke {
                routine: 1,
                returns_value: false,
            },
        ]
    );
    assert_eq!(converter.sink().stack_depth(), 0);

    let mut unoptimized =
        new_converter(&catalog, &classes, &[Repr::Value]).with_options(ConvertOptions::unoptimized());
    unoptimized.convert_expr(load, Repr::Void).unwrap();
    assert_eq!(unoptimized.sink().instructions(), &[LdLoc(0), Pop]);
}

#[test]
fn test_place_fast_paths() {
    let catalog = RuntimeCatalog::standard();
    let classes = ClassTable::new();
    let arena = Bump::new();
    let exprs = ExprBuilder::new(&arena);
    let local = exprs.local(0, Repr::Value);
    let load = exprs.load(local, TypeHint::empty());

    let mut fast = new_converter(&catalog, &classes, &[Repr::Value]);
    fast.convert_expr(load, Repr::Text).unwrap();
    fast.convert_expr(load, Repr::OBJECT).unwrap();
    assert_eq!(
        fast.sink().instructions(),
        &[
            LdLocA(0),
            LdContext,
            Call(Op::ValueToText),
            LdLocA(0),
            Call(Op::ValueToClass),
        ]
    );

    let mut general =
        new_converter(&catalog, &classes, &[Repr::Value]).with_options(ConvertOptions::unoptimized());
    general.convert_expr(load, Repr::Text).unwrap();
    general.convert_expr(load, Repr::OBJECT).unwrap();
    assert_eq!(
        general.sink().instructions(),
        &[
            LdLoc(0),
            StLoc(1),
            LdLocA(1),
            LdContext,
            Call(Op::ValueToText),
            LdLoc(0),
            Call(Op::ValueAsObject),
        ]
    );
}

#[test]
fn test_place_specialization() {
    let catalog = RuntimeCatalog::standard();
    let classes = ClassTable::new();
    let arena = Bump::new();
    let exprs = ExprBuilder::new(&arena);
    let value = exprs.local(0, Repr::Value);
    let number = exprs.local(1, Repr::Number);

    let mut converter = new_converter(&catalog, &classes, &[Repr::Value, Repr::Number]);
    converter
        .convert_expr(exprs.load(value, TypeHint::LONG), Repr::Int64)
        .unwrap();
    converter
        .convert_expr(exprs.load(value, TypeHint::DOUBLE), Repr::Text)
        .unwrap();
    converter
        .convert_expr(exprs.load(number, TypeHint::DOUBLE), Repr::Float64)
        .unwrap();

    assert_eq!(
        converter.sink().instructions(),
        &[
            LdLocA(0),
            Call(Op::ValueLong),
            LdLocA(0),
            Call(Op::ValueDouble),
            LdContext,
            Call(Op::DoubleToText),
            LdLocA(1),
            Call(Op::NumberDouble),
        ]
    );
    assert_eq!(converter.temps().declared(), 0);
}

#[test]
fn test_place_in_target_repr_is_loaded_as_is() {
    let catalog = RuntimeCatalog::standard();
    let classes = ClassTable::new();
    let arena = Bump::new();
    let exprs = ExprBuilder::new(&arena);
    let value = exprs.local(0, Repr::Value);
    let number = exprs.local(1, Repr::Number);

    let mut converter = new_converter(&catalog, &classes, &[Repr::Value, Repr::Number]);
    for hint in [TypeHint::LONG, TypeHint::WRITABLE_STRING, TypeHint::ARRAY] {
        let load = exprs.load(value, hint);
        assert_eq!(converter.convert_expr(load, Repr::Value), Ok(Repr::Value), "{hint:?}");
        converter.sink_mut().emit(Pop);
    }
    let load = exprs.load(number, TypeHint::DOUBLE);
    assert_eq!(converter.convert_expr(load, Repr::Number), Ok(Repr::Number));

    assert_eq!(
        converter.sink().instructions(),
        &[LdLoc(0), Pop, LdLoc(0), Pop, LdLoc(0), Pop, LdLoc(1)]
    );
    assert_eq!(converter.temps().declared(), 0);
}

#[test]
fn test_read_by_reference() {
    let catalog = RuntimeCatalog::standard();
    let classes = ClassTable::new();
    let arena = Bump::new();
    let exprs = ExprBuilder::new(&arena);

    let mut converter = new_converter(&catalog, &classes, &[Repr::Value, Repr::Alias, Repr::Int64]);

    let value = exprs.load(exprs.local(0, Repr::Value), TypeHint::LONG);
    value.set_access(Access::ReadRef);
    assert_eq!(converter.convert_expr(value, Repr::Alias), Ok(Repr::Alias));
    assert_eq!(value.access(), Access::ReadRef);

    let alias = exprs.load(exprs.local(1, Repr::Alias), TypeHint::LONG | TypeHint::REF);
    alias.set_access(Access::ReadRef);
    assert_eq!(converter.convert_expr(alias, Repr::Value), Ok(Repr::Value));

    let long = exprs.load(exprs.local(2, Repr::Int64), TypeHint::LONG);
    long.set_access(Access::ReadRef);
    assert_eq!(converter.convert_expr(long, Repr::Alias), Ok(Repr::Alias));

    assert_eq!(
        converter.sink().instructions(),
        &[
            LdLocA(0),
            Call(Op::ValueEnsureAlias),
            LdLoc(1),
            Call(Op::ValueFromAlias),
            LdLoc(2),
            Call(Op::ValueFromLong),
            NewObj(Op::NewAlias),
        ]
    );
}

#[test]
fn test_place_without_address_is_loaded() {
    let catalog = RuntimeCatalog::standard();
    let classes = ClassTable::new();
    let arena = Bump::new();
    let exprs = ExprBuilder::new(&arena);
    let place: &dyn Place = arena.alloc(OpaquePlace { repr: Repr::Value });

    let mut converter = new_converter(&catalog, &classes, &[]);
    converter
        .convert_expr(exprs.load(place, TypeHint::LONG), Repr::Text)
        .unwrap();

    assert_eq!(
        converter.sink().instructions(),
        &[
            LdArg(0),
            StLoc(0),
            LdLocA(0),
            Call(Op::ValueLong),
            Call(Op::LongToText),
        ]
    );
}

#[test]
fn test_place_errors_are_internal() {
    let catalog = RuntimeCatalog::standard();
    let classes = ClassTable::new();
    let arena = Bump::new();
    let exprs = ExprBuilder::new(&arena);
    let place: &dyn Place = arena.alloc(BrokenPlace);

    let mut converter = new_converter(&catalog, &classes, &[]);
    let err = converter
        .convert_expr(exprs.load(place, TypeHint::empty()), Repr::Text)
        .unwrap_err();

    assert_eq!(err, ConvertError::InvalidAccess);
    assert!(err.is_internal());
}

#[test]
fn test_missing_op_names_expression_conversion() {
    let catalog = RuntimeCatalog::standard().without(Op::DoubleToText);
    let classes = ClassTable::new();
    let arena = Bump::new();
    let exprs = ExprBuilder::new(&arena);

    let mut converter = new_converter(&catalog, &classes, &[Repr::Value]);
    let load = exprs.load(exprs.local(0, Repr::Value), TypeHint::DOUBLE);
    let err = converter.convert_expr(load, Repr::Text).unwrap_err();

    assert_eq!(
        err,
        ConvertError::NotImplemented {
            from: Repr::Value,
            to: Repr::Text,
            missing: Op::DoubleToText,
        }
    );
}

#[test]
fn test_number_to_double() {
    let catalog = RuntimeCatalog::standard();
    let classes = ClassTable::new();
    let arena = Bump::new();
    let exprs = ExprBuilder::new(&arena);

    let mut converter = new_converter(&catalog, &classes, &[Repr::Number]);
    converter.convert_number_to_double(exprs.long(2)).unwrap();
    converter.convert_number_to_double(exprs.bool(true)).unwrap();
    let number = exprs.load(exprs.local(0, Repr::Number), TypeHint::LONG | TypeHint::DOUBLE);
    assert_eq!(converter.convert_number_to_double(number), Ok(Repr::Float64));

    assert_eq!(
        converter.sink().instructions(),
        &[
            LdcR8(2.0),
            LdcR8(1.0),
            LdLoc(0),
            StLoc(1),
            LdLocA(1),
            Call(Op::NumberToDouble),
        ]
    );
}

#[test]
fn test_cast_to_array() {
    let catalog = RuntimeCatalog::standard();
    let mut classes = ClassTable::new();
    let list = classes.declare("List", None, ClassFlags::CONVERTIBLE);
    let arena = Bump::new();
    let exprs = ExprBuilder::new(&arena);

    let locals = [Repr::Object(list), Repr::Array, Repr::Int64, Repr::Alias];
    let mut converter = new_converter(&catalog, &classes, &locals);
    for (slot, repr) in locals.into_iter().enumerate() {
        let load = exprs.load(exprs.local(slot as u32, repr), repr.hint());
        assert_eq!(converter.cast_to_array(load), Ok(Repr::Array), "{repr}");
        converter.sink_mut().emit(Pop);
    }

    assert_eq!(
        converter.sink().instructions(),
        &[
            LdLoc(0),
            CallVirt(Op::ConvertibleToArray),
            Pop,
            LdLoc(1),
            Pop,
            LdLoc(2),
            Call(Op::ValueFromLong),
            StLoc(4),
            LdLocA(4),
            Call(Op::ValueToArray),
            Pop,
            LdLoc(3),
            CallVirt(Op::AliasGetValue),
            StLoc(4),
            LdLocA(4),
            Call(Op::ValueToArray),
            Pop,
        ]
    );
}

#[test]
fn test_class_and_callable_entry_points() {
    let catalog = RuntimeCatalog::standard();
    let mut classes = ClassTable::new();
    let shape = classes.declare("Shape", None, ClassFlags::empty());
    let arena = Bump::new();
    let exprs = ExprBuilder::new(&arena);

    let mut converter = new_converter(&catalog, &classes, &[]).with_caller(shape);
    assert_eq!(
        converter.convert_to_class(exprs.null(), shape),
        Ok(Repr::Object(shape))
    );
    assert_eq!(
        converter.convert_to_callable(exprs.text("strlen")),
        Ok(Repr::Callable)
    );
    assert_eq!(
        converter.convert_to_callable(exprs.long(1)),
        Err(ConvertError::NotCallable { from: Repr::Int64 })
    );

    assert_eq!(
        converter.sink().instructions(),
        &[
            LdNull,
            LdStr(0),
            LdTypeHandle(Some(shape)),
            Call(Op::TextAsCallable),
            LdcI8(1),
        ]
    );
    assert_ne!(shape, ClassId::OBJECT);
}

#[test]
fn test_negated_bool_entry_point() {
    let catalog = RuntimeCatalog::standard();
    let classes = ClassTable::new();
    let arena = Bump::new();
    let exprs = ExprBuilder::new(&arena);

    let mut converter = new_converter(&catalog, &classes, &[Repr::Text]);
    let load = exprs.load(exprs.local(0, Repr::Text), TypeHint::STRING);
    assert_eq!(converter.convert_to_bool(load, true), Ok(Repr::Bool));
    assert_eq!(converter.convert_to_bool(exprs.long(0), true), Ok(Repr::Bool));

    assert_eq!(
        converter.sink().instructions(),
        &[
            LdLoc(0),
            Call(Op::TextToBool),
            LdcI4(0),
            Ceq,
            LdcI4(0),
            LdcI4(0),
            Ceq,
        ]
    );
}
