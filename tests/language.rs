use std::f64::consts::{E, PI};

use mathex::{ast::Node, error::RuntimeError, ExpressionParsingService, Tolerance, Value};

fn compute(src: &str) -> Value {
    let service = ExpressionParsingService::new();
    let expression = service.interpret(src);
    assert!(expression.recognized_correctly(), "'{src}' was not recognized");
    expression.compute(None, &[])
              .unwrap_or_else(|e| panic!("'{src}' failed: {e}"))
}

fn compute_with(src: &str, values: &[Value]) -> Result<Value, RuntimeError> {
    ExpressionParsingService::new().interpret(src).compute(None, values)
}

fn assert_numeric(src: &str, expected: f64) {
    match compute(src) {
        Value::Numeric(r) => assert!((r - expected).abs() < 1e-9, "'{src}' gave {r}, expected {expected}"),
        other => panic!("'{src}' gave {other:?}, expected a numeric value"),
    }
}

fn assert_not_recognized(src: &str) {
    let expression = ExpressionParsingService::new().interpret(src);
    assert!(!expression.recognized_correctly(), "'{src}' was recognized as {expression}");
}

#[test]
fn literal_arithmetic_matches_native_arithmetic() {
    assert_eq!(compute("2+3*4"), Value::Integer(14));
    assert_eq!(compute("(2+3)*4"), Value::Integer(20));
    assert_eq!(compute("10 - 4 - 3"), Value::Integer(3));
    assert_eq!(compute("2 * 3 % 4"), Value::Integer(2));
    assert_eq!(compute("7 / 2"), Value::Numeric(3.5));
    assert_eq!(compute("((1))"), Value::Integer(1));
}

#[test]
fn operator_precedence_and_associativity() {
    assert_numeric("2^3^2", 64.0);
    assert_numeric("-2^2", 4.0);
    assert_eq!(compute("5 - -3"), Value::Integer(8));
    assert_eq!(compute("2 * -3"), Value::Integer(-6));
    assert_eq!(compute("1 + 2 < 4"), Value::Boolean(true));
    assert_eq!(compute("1 < 2 = true"), Value::Boolean(true));
    assert_eq!(compute("1 << 2 + 1"), Value::Integer(8));
    assert_eq!(compute("2 < 3 & 3 < 2 | true"), Value::Boolean(true));
}

#[test]
fn type_unification_picks_the_cheapest_common_type() {
    assert_eq!(compute("1+2"), Value::Integer(3));
    assert_eq!(compute("1+2.5"), Value::Numeric(3.5));
    assert_eq!(compute(r#""a"+"b""#), Value::from("ab"));
    assert_eq!(compute(r#""n = " + 4"#), Value::from("n = 4"));
    assert_eq!(compute("0xAB + 0xAB"), Value::from(vec![0xAB_u8, 0xAB]));
}

#[test]
fn comparisons_and_logic() {
    assert_eq!(compute("2 <= 2"), Value::Boolean(true));
    assert_eq!(compute("3 >= 4"), Value::Boolean(false));
    assert_eq!(compute("2 != 3"), Value::Boolean(true));
    assert_eq!(compute("1.5 > 1"), Value::Boolean(true));
    assert_eq!(compute(r#""abc" < "abd""#), Value::Boolean(true));
    assert_eq!(compute("!false"), Value::Boolean(true));
    assert_eq!(compute("true # true"), Value::Boolean(false));
}

#[test]
fn bitwise_operators_and_shifts() {
    assert_eq!(compute("6 & 3"), Value::Integer(2));
    assert_eq!(compute("6 | 3"), Value::Integer(7));
    assert_eq!(compute("5 # 1"), Value::Integer(4));
    assert_eq!(compute("1 << 4"), Value::Integer(16));
    assert_eq!(compute("256 >> 4"), Value::Integer(16));
    assert_eq!(compute("!0"), Value::Integer(-1));
}

#[test]
fn byte_array_literals() {
    assert_eq!(compute("0x0F | 0xF0"), Value::from(vec![0xFF_u8]));
    assert_eq!(compute("0b11111111"), Value::from(vec![0xFF_u8]));
    assert_eq!(compute("0x1"), Value::from(vec![0x01_u8]));
    assert_eq!(compute("0x0102 + 0x03"), Value::from(vec![0x01_u8, 0x02, 0x03]));
}

#[test]
fn string_literals_and_escapes() {
    assert_eq!(compute(r#""say \"hi\"""#), Value::from(r#"say "hi""#));
    assert_eq!(compute(r#""back\\slash""#), Value::from(r"back\slash"));
    assert_eq!(compute(r#""(not a group) + 1""#), Value::from("(not a group) + 1"));
    assert_not_recognized(r#""unterminated"#);
}

#[test]
fn named_constants() {
    assert_eq!(compute("pi"), Value::Numeric(PI));
    assert_eq!(compute("π"), Value::Numeric(PI));
    assert_eq!(compute("2 * e"), Value::Numeric(2.0 * E));
    assert_eq!(compute("true & false"), Value::Boolean(false));
}

#[test]
fn functions_dispatch_by_name_and_arity() {
    assert_eq!(compute("min(3,5)"), Value::Integer(3));
    assert_eq!(compute("max(2, 3.5)"), Value::Numeric(3.5));
    assert_eq!(compute(r#"substr("abalaportocala", 2)"#), Value::from("alaportocala"));
    assert_eq!(compute(r#"substr("abalaportocala", 2, 3)"#), Value::from("ala"));
    assert_eq!(compute("round(2.5)"), Value::Numeric(3.0));
    assert_eq!(compute("round(7)"), Value::Integer(7));
    assert_numeric("round(3.14159, 2)", 3.14);
    assert_eq!(compute("abs(-5)"), Value::Integer(5));
    assert_eq!(compute("sqrt(16)"), Value::Numeric(4.0));
    assert_eq!(compute("clamp(15, 0, 10)"), Value::Integer(10));
    assert_numeric("log(8, 2)", 3.0);
    assert_numeric("pow(2, 10)", 1024.0);
    assert_numeric("floor(-1.5) + ceiling(1.2)", 0.0);
}

#[test]
fn text_functions() {
    assert_eq!(compute(r#"strlen("hello")"#), Value::Integer(5));
    assert_eq!(compute(r#"upper("abc")"#), Value::from("ABC"));
    assert_eq!(compute(r#"trim("  padded ")"#), Value::from("padded"));
    assert_eq!(compute(r#"replace("a-b-c", "-", "+")"#), Value::from("a+b+c"));
}

#[test]
fn whitespace_before_call_parenthesis_is_allowed() {
    assert_eq!(compute("max (1, 2)"), Value::Integer(2));
}

#[test]
fn constant_expressions_fold_at_parse_time() {
    let service = ExpressionParsingService::new();
    let expression = service.interpret("2+3");
    assert_eq!(expression.root().and_then(Node::as_constant), Some(&Value::Integer(5)));
    assert!(service.interpret("sqrt(4) * 2").is_constant());
    assert!(!service.interpret("x + 1").is_constant());
    assert!(!service.interpret("random()").is_constant());
}

#[test]
fn failing_constant_subtrees_are_not_folded() {
    let service = ExpressionParsingService::new();
    let expression = service.interpret("5 % 0");
    assert!(expression.recognized_correctly());
    assert!(!expression.is_constant());
    assert_eq!(expression.compute(None, &[]), Err(RuntimeError::DivisionByZero));
}

#[test]
fn parameters_are_ordered_by_first_appearance() {
    let expression = ExpressionParsingService::new().interpret("y+x");
    assert_eq!(expression.parameter_names(), ["y", "x"]);
    assert_eq!(expression.compute(None, &[Value::Integer(10), Value::Integer(3)]), Ok(Value::Integer(13)));
    assert_eq!(expression.compute(None, &[Value::Numeric(0.5), Value::Integer(3)]), Ok(Value::Numeric(3.5)));
}

#[test]
fn repeated_parameters_share_one_slot() {
    let expression = ExpressionParsingService::new().interpret("x * x + x1");
    assert_eq!(expression.parameter_names(), ["x", "x1"]);
    assert_eq!(expression.compute(None, &[Value::Integer(3), Value::Integer(1)]), Ok(Value::Integer(10)));
}

#[test]
fn functions_narrow_their_parameters() {
    let expression = ExpressionParsingService::new().interpret("strlen(x)");
    assert_eq!(expression.compute(None, &[Value::from("four")]), Ok(Value::Integer(4)));
    assert_eq!(expression.compute(None, &[Value::Integer(12345)]), Ok(Value::Integer(5)));
}

#[test]
fn tolerance_relaxes_comparisons() {
    let expression = ExpressionParsingService::new().interpret("x=y");
    let values = [Value::Numeric(1.7), Value::Numeric(1.9)];

    let loose = Tolerance::range(0.2, 0.2);
    assert_eq!(expression.compute(Some(&loose), &values), Ok(Value::Boolean(true)));

    let strict = Tolerance::range(0.1, 0.1);
    assert_eq!(expression.compute(Some(&strict), &values), Ok(Value::Boolean(false)));

    assert_eq!(expression.compute(None, &values), Ok(Value::Boolean(false)));
}

#[test]
fn proportional_and_percentage_tolerances() {
    let expression = ExpressionParsingService::new().interpret("x = 100");
    let value = [Value::Numeric(109.0)];

    assert_eq!(expression.compute(Some(&Tolerance::percentage(0.1)), &value), Ok(Value::Boolean(true)));
    assert_eq!(expression.compute(Some(&Tolerance::percentage(0.05)), &value), Ok(Value::Boolean(false)));
    assert_eq!(expression.compute(Some(&Tolerance::proportional(1.1)), &value), Ok(Value::Boolean(true)));
}

#[test]
fn malformed_expressions_are_not_recognized() {
    assert_not_recognized("(1+2");
    assert_not_recognized("1+2)");
    assert_not_recognized("");
    assert_not_recognized("1 +");
    assert_not_recognized("unknown(1)");
    assert_not_recognized("min(1, 2, 3, 4)");
}

#[test]
fn logically_invalid_expressions_are_not_recognized() {
    assert_not_recognized(r#"-"text""#);
    assert_not_recognized(r#"1 << "a""#);
    assert_not_recognized(r#"sqrt("four")"#);
    assert_not_recognized("strlen(x) << x");
}

#[test]
fn unrecognized_expressions_compute_to_their_text() {
    let expression = ExpressionParsingService::new().interpret("(1+2");
    assert_eq!(expression.compute(None, &[]), Ok(Value::from("(1+2")));
    assert_eq!(expression.compute_to_string(None, &[]), Ok("(1+2".to_string()));
    assert_eq!(expression.to_string(), "(1+2");
}

#[test]
fn runtime_errors_fail_only_the_call() {
    let expression = ExpressionParsingService::new().interpret("x % y");
    assert_eq!(expression.compute(None, &[Value::Integer(5), Value::Integer(0)]),
               Err(RuntimeError::DivisionByZero));
    assert_eq!(expression.compute(None, &[Value::Integer(5), Value::Integer(3)]), Ok(Value::Integer(2)));
}

#[test]
fn integer_overflow_is_reported() {
    assert_eq!(compute_with("x * 2", &[Value::Integer(i64::MAX)]), Err(RuntimeError::Overflow));
}

#[test]
fn shifts_reject_fractional_operands() {
    assert!(matches!(compute_with("x << 2", &[Value::Numeric(2.5)]), Err(RuntimeError::InvalidCast { .. })));
    assert_eq!(compute_with("x << 2", &[Value::Numeric(4.0)]), Ok(Value::Integer(16)));
}

#[test]
fn wrong_parameter_counts_are_rejected() {
    assert_eq!(compute_with("x + y", &[Value::Integer(1)]),
               Err(RuntimeError::ParameterCountMismatch { expected: 2, found: 1 }));
}

#[test]
fn incompatible_parameter_values_are_rejected() {
    assert!(matches!(compute_with("x << 1", &[Value::from("text")]), Err(RuntimeError::TypeMismatch { .. })));
}

#[test]
fn results_render_as_text() {
    let service = ExpressionParsingService::new();
    assert_eq!(service.interpret("1 + 2").compute_to_string(None, &[]), Ok("3".to_string()));
    assert_eq!(service.interpret("1 = 1").compute_to_string(None, &[]), Ok("true".to_string()));
    assert_eq!(service.interpret("0xAB").compute_to_string(None, &[]), Ok("0xAB".to_string()));
    assert_eq!(service.interpret("x * 2").compute_to_string(None, &[Value::Integer(21)]), Ok("42".to_string()));
}

#[test]
fn expressions_render_with_minimal_parentheses() {
    let service = ExpressionParsingService::new();
    assert_eq!(service.interpret("(x+1)*y").to_string(), "(x + 1) * y");
    assert_eq!(service.interpret("x-(y-z)").to_string(), "x - (y - z)");
    assert_eq!(service.interpret("(x-y)-z").to_string(), "x - y - z");
    assert_eq!(service.interpret(r#"strlen(s) + 1"#).to_string(), "strlen(s) + 1");
}

#[test]
fn random_functions_stay_in_range() {
    let service = ExpressionParsingService::new();
    let expression = service.interpret("randomint(1, 4)");
    for _ in 0..50 {
        let Ok(Value::Integer(n)) = expression.compute(None, &[]) else {
            panic!("randomint did not produce an integer");
        };
        assert!((1..4).contains(&n));
    }
    let Ok(Value::Numeric(r)) = service.interpret("random()").compute(None, &[]) else {
        panic!("random did not produce a number");
    };
    assert!((0.0..1.0).contains(&r));
}
