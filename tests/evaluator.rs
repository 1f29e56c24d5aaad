use mathex::{
    ast::{BinaryOperator, UnaryOperator},
    error::{EngineError, RegistrationError, RuntimeError},
    interpreter::{
        evaluator::{
            binary::{arithmetic::apply_arithmetic, bitwise::apply_bitwise, comparison::apply_comparison},
            function::core::{FunctionDefinition, FunctionRegistry},
            unary::apply_unary,
        },
        resolution::signature::Signature,
        value::kind::SupportedValueType,
    },
    ExpressionParsingService, Tolerance, Value,
};

#[test]
fn integer_overflow_is_reported() {
    let r = apply_arithmetic(BinaryOperator::Add, Value::Integer(i64::MAX), Value::Integer(1));
    assert_eq!(r, Err(RuntimeError::Overflow));

    let r = apply_arithmetic(BinaryOperator::Multiply, Value::Integer(i64::MIN), Value::Integer(-1));
    assert_eq!(r, Err(RuntimeError::Overflow));
}

#[test]
fn byte_arrays_are_stitched() {
    let r = apply_arithmetic(BinaryOperator::Add, Value::from(vec![0xAB_u8]), Value::from(vec![0xCD_u8, 0xEF]));
    assert_eq!(r.unwrap(), Value::from(vec![0xAB_u8, 0xCD, 0xEF]));
}

#[test]
fn shifts_reject_out_of_range_amounts() {
    assert_eq!(apply_arithmetic(BinaryOperator::LeftShift, Value::Integer(1), Value::Integer(4)).unwrap(),
               Value::Integer(16));
    assert!(matches!(apply_arithmetic(BinaryOperator::LeftShift, Value::Integer(1), Value::Integer(64)),
                     Err(RuntimeError::InvalidArgument { .. })));
    assert!(matches!(apply_arithmetic(BinaryOperator::RightShift, Value::Integer(1), Value::Integer(-1)),
                     Err(RuntimeError::InvalidArgument { .. })));
}

#[test]
fn floating_point_division_by_zero_is_infinite() {
    let r = apply_arithmetic(BinaryOperator::Divide, Value::Numeric(1.0), Value::Numeric(0.0));
    assert_eq!(r.unwrap(), Value::Numeric(f64::INFINITY));
}

#[test]
fn mismatched_operands_are_engine_faults() {
    let r = apply_arithmetic(BinaryOperator::Subtract, Value::from("a"), Value::from("b"));
    assert!(matches!(r, Err(RuntimeError::Engine(EngineError::OperandMismatch { .. }))));
}

#[test]
fn shorter_byte_arrays_are_left_padded() {
    let r = apply_bitwise(BinaryOperator::Or, Value::from(vec![0x01_u8, 0x00]), Value::from(vec![0x0F_u8]));
    assert_eq!(r.unwrap(), Value::from(vec![0x01_u8, 0x0F]));
}

#[test]
fn integer_ranges_apply_to_integers() {
    let tolerance = Tolerance::integer_range(2, 2);
    assert!(apply_comparison(BinaryOperator::Equals, &Value::Integer(8), &Value::Integer(10), Some(&tolerance)).unwrap());
    assert!(!apply_comparison(BinaryOperator::Equals, &Value::Integer(7), &Value::Integer(10), Some(&tolerance)).unwrap());
}

#[test]
fn strict_ordering_requires_leaving_the_interval() {
    let tolerance = Tolerance::range(0.5, 0.5);
    let less = |a: f64| {
        apply_comparison(BinaryOperator::LessThan, &Value::Numeric(a), &Value::Numeric(2.0), Some(&tolerance)).unwrap()
    };
    assert!(!less(1.75));
    assert!(less(1.25));
}

#[test]
fn tolerance_is_ignored_for_strings() {
    let tolerance = Tolerance::percentage(1.0);
    assert!(!apply_comparison(BinaryOperator::Equals, &Value::from("a"), &Value::from("b"), Some(&tolerance)).unwrap());
}

#[test]
fn booleans_have_no_order() {
    assert!(apply_comparison(BinaryOperator::LessThan, &Value::Boolean(false), &Value::Boolean(true), None).is_err());
}

#[test]
fn negating_the_minimum_integer_overflows() {
    assert_eq!(apply_unary(UnaryOperator::Negate, Value::Integer(i64::MIN)), Err(RuntimeError::Overflow));
}

#[test]
fn strings_cannot_be_negated() {
    assert!(matches!(apply_unary(UnaryOperator::Negate, Value::from("x")),
                     Err(RuntimeError::Engine(EngineError::OperandMismatch { .. }))));
}

#[test]
fn random_functions_are_not_deterministic() {
    let registry = FunctionRegistry::with_builtins();
    assert!(!registry.lookup("random", 0).unwrap().is_deterministic());
    assert!(!registry.lookup("randomint", 2).unwrap().is_deterministic());
    assert!(registry.lookup("sqrt", 1).unwrap().is_deterministic());
}

#[test]
fn builtins_are_found_by_name_and_arity() {
    let registry = FunctionRegistry::with_builtins();
    for definition in registry.iter() {
        let found = registry.lookup(definition.name(), definition.arity())
                            .unwrap_or_else(|| panic!("{} is not found by its arity", definition.name()));
        assert_eq!(found.name(), definition.name());
        assert!(definition.signatures().iter().all(|signature| signature.arity() == definition.arity()));
    }
}

#[test]
fn registration_rejects_bad_definitions() {
    const MIXED: &[Signature] = &[Signature::new(&[SupportedValueType::Integer], SupportedValueType::Integer, 1),
                                  Signature::new(&[], SupportedValueType::Integer, 1)];
    const ONE: &[Signature] = &[Signature::new(&[SupportedValueType::Integer], SupportedValueType::Integer, 1)];
    const FOUR: &[Signature] = &[Signature::new(&[SupportedValueType::Integer; 4], SupportedValueType::Integer, 1)];

    assert!(matches!(FunctionDefinition::new("f", MIXED, |_: &[Value]| Ok(Value::Integer(0))),
                     Err(RegistrationError::InconsistentArity { .. })));
    assert!(matches!(FunctionDefinition::new("f", &[], |_: &[Value]| Ok(Value::Integer(0))),
                     Err(RegistrationError::NoSignatures { .. })));
    assert!(matches!(FunctionDefinition::new("2f", ONE, |_: &[Value]| Ok(Value::Integer(0))),
                     Err(RegistrationError::InvalidName { .. })));
    assert!(matches!(FunctionDefinition::new("f", FOUR, |_: &[Value]| Ok(Value::Integer(0))),
                     Err(RegistrationError::UnsupportedArity { arity: 4, .. })));
}

#[test]
fn custom_functions_replace_builtins_of_the_same_arity() {
    const ONE: &[Signature] = &[Signature::new(&[SupportedValueType::Integer], SupportedValueType::Integer, 1)];

    let mut registry = FunctionRegistry::with_builtins();
    registry.register(FunctionDefinition::new("abs", ONE, |_: &[Value]| Ok(Value::Integer(42))).unwrap());

    let abs = registry.lookup("abs", 1).unwrap();
    assert_eq!((abs.implementation())(&[Value::Integer(-1)]).unwrap(), Value::Integer(42));
}

#[test]
fn function_arguments_convert_to_booleans_and_bytes() {
    assert_eq!(Value::Boolean(true).to_boolean(), Ok(true));
    assert!(matches!(Value::Integer(1).to_boolean(), Err(RuntimeError::InvalidCast { .. })));

    assert_eq!(Value::Integer(0x0102).to_bytes(), Ok(vec![0, 0, 0, 0, 0, 0, 0x01, 0x02]));
    assert_eq!(Value::Boolean(true).to_bytes(), Ok(vec![1]));
    assert!(matches!(Value::from("ab").to_bytes(), Err(RuntimeError::InvalidCast { .. })));
}

#[test]
fn registered_functions_read_booleans_and_bytes() {
    const PICK: &[Signature] = &[Signature::new(&[SupportedValueType::Boolean, SupportedValueType::ByteArray],
                                                SupportedValueType::Integer,
                                                1)];

    let mut service = ExpressionParsingService::new();
    service.register_function(FunctionDefinition::new("pick", PICK, |args: &[Value]| {
                                  let bytes = args[1].to_bytes()?;
                                  let index = if args[0].to_boolean()? { bytes.len() - 1 } else { 0 };
                                  Ok(Value::Integer(i64::from(bytes[index])))
                              }).unwrap());

    let expression = service.interpret("pick(flag, 0x0A0B)");
    assert_eq!(expression.compute(None, &[Value::Boolean(true)]), Ok(Value::Integer(0x0B)));
    assert_eq!(expression.compute(None, &[Value::Boolean(false)]), Ok(Value::Integer(0x0A)));
}

#[test]
fn tolerances_only_affect_comparisons() {
    let service = ExpressionParsingService::new();
    let tolerance = Tolerance::range(1.0, 1.0);

    let sum = service.interpret("x + 0.5");
    assert_eq!(sum.compute(Some(&tolerance), &[Value::Numeric(2.0)]), Ok(Value::Numeric(2.5)));

    let equal = service.interpret("x + 0.5 = 3");
    assert_eq!(equal.compute(Some(&tolerance), &[Value::Numeric(2.0)]), Ok(Value::Boolean(true)));
    assert_eq!(equal.compute(None, &[Value::Numeric(2.0)]), Ok(Value::Boolean(false)));
}
