use std::{
    collections::HashMap,
    f64::consts::PI,
    sync::{
        atomic::{AtomicUsize, Ordering},
        Arc,
    },
    thread,
};

use mathex::{
    error::RuntimeError,
    interpreter::{
        definition::{DefinitionError, MathDefinition},
        evaluator::function::core::FunctionDefinition,
        extraction::core::{inside_placeholder, ConstantExtractor, ConstantInterpreter, Extraction},
        resolution::signature::Signature,
        service::FinderFn,
        value::kind::SupportedValueType,
    },
    CancellationToken, ExpressionParsingService, ParameterValue, Value,
};

fn init_tracing() {
    let _ = tracing_subscriber::fmt().with_test_writer()
                                     .with_max_level(tracing::Level::TRACE)
                                     .try_init();
}

/// Reads `90°` as radians.
struct DegreesExtractor;

impl ConstantExtractor for DegreesExtractor {
    fn name(&self) -> &str {
        "degrees"
    }

    fn priority(&self) -> i32 {
        5
    }

    fn find(&self, text: &str, from: usize, _: &MathDefinition) -> Extraction {
        let Some(offset) = text[from..].find('°') else {
            return Extraction::None;
        };
        let end = from + offset;
        if inside_placeholder(text, end) {
            return Extraction::Malformed { at: end };
        }
        let digits = text[from..end].chars()
                                    .rev()
                                    .take_while(|c| c.is_ascii_digit() || *c == '.')
                                    .count();
        let start = end - digits;
        match text[start..end].parse::<f64>() {
            Ok(degrees) => Extraction::Found { start,
                                               end: end + '°'.len_utf8(),
                                               value: Value::Numeric(degrees.to_radians()) },
            Err(_) => Extraction::Malformed { at: end },
        }
    }
}

/// Knows the answer.
struct AnswerInterpreter;

impl ConstantInterpreter for AnswerInterpreter {
    fn interpret(&self, text: &str) -> Option<Value> {
        (text == "answer").then_some(Value::Integer(42))
    }
}

#[test]
fn identical_texts_share_one_expression() {
    init_tracing();
    let service = ExpressionParsingService::new();

    let first = service.interpret("x * 2 + 1");
    let second = service.interpret("x * 2 + 1");
    assert!(Arc::ptr_eq(&first, &second));

    service.clear_cache();
    let third = service.interpret("x * 2 + 1");
    assert!(!Arc::ptr_eq(&first, &third));
    assert_eq!(third.compute(None, &[Value::Integer(4)]), Ok(Value::Integer(9)));
}

#[test]
fn unrecognized_texts_are_cached_too() {
    let service = ExpressionParsingService::new();
    let first = service.interpret("1 +");
    let second = service.interpret("1 +");
    assert!(!first.recognized_correctly());
    assert!(Arc::ptr_eq(&first, &second));
}

#[test]
fn one_expression_computes_from_many_threads() {
    let service = ExpressionParsingService::new();

    thread::scope(|scope| {
        for i in 0..8_i64 {
            let service = &service;
            scope.spawn(move || {
                     let expression = service.interpret("x * 2 + y");
                     for j in 0..50_i64 {
                         let r = expression.compute(None, &[Value::Integer(i), Value::Integer(j)]);
                         assert_eq!(r, Ok(Value::Integer(i * 2 + j)));
                     }
                     let r = expression.compute(None, &[Value::Numeric(0.5), Value::Integer(1)]);
                     assert_eq!(r, Ok(Value::Numeric(2.0)));
                 });
        }
    });

    let first = service.interpret("x * 2 + y");
    assert!(Arc::ptr_eq(&first, &service.interpret("x * 2 + y")));
}

#[test]
fn cancelled_interpretations_are_not_cached() {
    let service = ExpressionParsingService::new();
    let token = CancellationToken::new();
    token.cancel();

    let cancelled = service.interpret_with_cancellation("x + 1", &token);
    assert!(!cancelled.recognized_correctly());
    assert_eq!(cancelled.compute(None, &[]), Ok(Value::from("x + 1")));

    let completed = service.interpret("x + 1");
    assert!(completed.recognized_correctly());
    assert!(!Arc::ptr_eq(&cancelled, &completed));

    let cached = service.interpret_with_cancellation("x + 1", &token);
    assert!(Arc::ptr_eq(&cached, &completed));
}

#[test]
fn uncancelled_interpretations_are_cached() {
    let service = ExpressionParsingService::new();
    let token = CancellationToken::new();

    let first = service.interpret_with_cancellation("2 * 21", &token);
    assert_eq!(first.compute(None, &[]), Ok(Value::Integer(42)));
    assert!(Arc::ptr_eq(&first, &service.interpret("2 * 21")));
}

#[test]
fn finders_supply_parameters_by_name() {
    let service = ExpressionParsingService::new();
    let expression = service.interpret("price * quantity");

    let mut values = HashMap::new();
    values.insert("price", Value::Numeric(2.5));
    values.insert("quantity", Value::Integer(4));
    assert_eq!(expression.compute_with_finder(None, &values), Ok(Value::Numeric(10.0)));

    values.remove("quantity");
    assert_eq!(expression.compute_with_finder(None, &values),
               Err(RuntimeError::MissingParameter { name: "quantity".to_string() }));

    let finder = FinderFn(|name: &str| (name == "price" || name == "quantity").then_some(Value::Integer(3)));
    assert_eq!(expression.compute_with_finder(None, &finder), Ok(Value::Integer(9)));
}

#[test]
fn deferred_values_are_resolved_on_demand() {
    let service = ExpressionParsingService::new();
    let expression = service.interpret("x + 1");
    let calls = Arc::new(AtomicUsize::new(0));

    let counter = Arc::clone(&calls);
    let x = ParameterValue::deferred(move || {
        counter.fetch_add(1, Ordering::SeqCst);
        Value::Integer(2)
    });

    assert_eq!(expression.compute_lazy(None, &[x.clone()]), Ok(Value::Integer(3)));
    assert_eq!(calls.load(Ordering::SeqCst), 1);
    assert_eq!(expression.compute_lazy(None, &[x]), Ok(Value::Integer(3)));
    assert_eq!(calls.load(Ordering::SeqCst), 2);

    let immediate = ParameterValue::from(Value::Integer(10));
    assert_eq!(expression.compute_lazy(None, &[immediate]), Ok(Value::Integer(11)));
}

#[test]
fn registered_functions_are_callable() {
    const SQUARE: &[Signature] = &[Signature::new(&[SupportedValueType::Integer], SupportedValueType::Integer, 1)];

    let mut service = ExpressionParsingService::new();
    assert!(!service.interpret("square(4)").recognized_correctly());

    service.register_function(FunctionDefinition::new("square", SQUARE, |args: &[Value]| {
                                  let n = args[0].to_integer()?;
                                  n.checked_mul(n).map(Value::Integer).ok_or(RuntimeError::Overflow)
                              }).unwrap());

    assert_eq!(service.interpret("square(4) + 1").compute(None, &[]), Ok(Value::Integer(17)));
    assert_eq!(service.interpret("square(x)").compute(None, &[Value::Integer(i64::MAX)]),
               Err(RuntimeError::Overflow));
}

#[test]
fn custom_extractors_add_literals() {
    init_tracing();
    let mut service = ExpressionParsingService::new();
    service.register_constant_extractor(DegreesExtractor);

    match service.interpret("sin(90°)").compute(None, &[]) {
        Ok(Value::Numeric(r)) => assert!((r - 1.0).abs() < 1e-12),
        other => panic!("sin(90°) gave {other:?}"),
    }
    match service.interpret("180° / x").compute(None, &[Value::Integer(2)]) {
        Ok(Value::Numeric(r)) => assert!((r - PI / 2.0).abs() < 1e-12),
        other => panic!("180° / x gave {other:?}"),
    }
}

#[test]
fn custom_interpreters_resolve_unknown_names() {
    let mut service = ExpressionParsingService::new();
    service.register_constant_interpreter(AnswerInterpreter);

    let expression = service.interpret("answer * 2");
    assert!(expression.parameter_names().is_empty());
    assert_eq!(expression.compute(None, &[]), Ok(Value::Integer(84)));

    let expression = service.interpret("answer + question");
    assert_eq!(expression.parameter_names(), ["question"]);
}

#[test]
fn custom_definitions_change_the_grammar() {
    let definition = MathDefinition { and_symbol: "&&".to_string(),
                                      or_symbol: "||".to_string(),
                                      string_delimiter: '\'',
                                      ..MathDefinition::default() };
    let service = ExpressionParsingService::with_definition(definition).unwrap();

    assert_eq!(service.interpret("1 < 2 && 2 < 1 || true").compute(None, &[]), Ok(Value::Boolean(true)));
    assert_eq!(service.interpret("'a' + 'b'").compute(None, &[]), Ok(Value::from("ab")));
}

#[test]
fn ambiguous_definitions_are_rejected() {
    let definition = MathDefinition { xor_symbol: "|".to_string(),
                                      ..MathDefinition::default() };
    assert!(matches!(ExpressionParsingService::with_definition(definition),
                     Err(DefinitionError::DuplicateSymbol { .. })));

    let definition = MathDefinition { add_symbol: String::new(),
                                      ..MathDefinition::default() };
    assert!(matches!(ExpressionParsingService::with_definition(definition),
                     Err(DefinitionError::EmptyToken { .. })));
}

#[test]
fn compute_uses_a_shared_default_service() {
    assert_eq!(mathex::compute("x * y", &[Value::Integer(6), Value::Integer(7)]), Ok(Value::Integer(42)));
    assert_eq!(mathex::compute("(1 +", &[]), Ok(Value::from("(1 +")));
}
