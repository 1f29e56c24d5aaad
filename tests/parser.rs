use std::time::{Duration, Instant};

use mathex::{
    ast::{BinaryNode, BinaryOperator, Node},
    error::{EngineError, ParseError},
    interpreter::{
        definition::MathDefinition,
        evaluator::{function::core::FunctionRegistry, simplify::simplify},
        parameters::ParameterRegistry,
        parser::core::{parse_expression, ParserSettings, MAX_NESTING},
        resolution::cost::CostTable,
        symbols::{extract_symbols, SymbolTable},
        value::kind::{SupportableValueType, SupportedValueType},
    },
    ExpressionParsingService, Value,
};

fn parse(text: &str) -> Result<Node, ParseError> {
    let definition = MathDefinition::default();
    let functions = FunctionRegistry::with_builtins();
    let settings = ParserSettings { definition: &definition, functions: &functions, extractors: &[], interpreters: &[] };
    parse_expression(text, settings, None).map(|parsed| parsed.root)
}

fn assert_rejected_quickly(text: &str) {
    let started = Instant::now();
    let expression = ExpressionParsingService::new().interpret(text);
    let elapsed = started.elapsed();

    assert!(!expression.recognized_correctly(), "'{text}' was recognized as {expression}");
    assert!(elapsed < Duration::from_secs(5), "rejecting '{text}' took {elapsed:?}");
}

#[test]
fn long_invalid_chains_are_rejected_quickly() {
    assert_rejected_quickly(&format!("\"a\"{}", " - 1".repeat(30)));
    assert_rejected_quickly(&format!("1{} - \"a\"", " * 2 - 1".repeat(30)));
    assert_rejected_quickly(&format!("x{} - \"a\"", " - x".repeat(30)));
}

#[test]
fn long_valid_chains_still_compute() {
    let sum = vec!["1"; 100].join(" + ");
    let expression = ExpressionParsingService::new().interpret(&sum);
    assert_eq!(expression.compute(None, &[]), Ok(Value::Integer(100)));

    let sum = vec!["x"; 100].join(" + ");
    let expression = ExpressionParsingService::new().interpret(&sum);
    assert_eq!(expression.compute(None, &[Value::Integer(2)]), Ok(Value::Integer(200)));
}

#[test]
fn deep_operator_chains_are_not_recognized() {
    let sum = vec!["1"; 3000].join(" + ");
    assert!(matches!(parse(&sum), Err(ParseError::NestingTooDeep { limit: MAX_NESTING })));

    let expression = ExpressionParsingService::new().interpret(&sum);
    assert!(!expression.recognized_correctly());
    assert_eq!(expression.compute(None, &[]), Ok(Value::String(sum)));
}

#[test]
fn deep_parentheses_are_not_recognized() {
    let nested = format!("{}1{}", "(".repeat(2000), ")".repeat(2000));
    assert!(matches!(parse(&nested), Err(ParseError::NestingTooDeep { .. })));
    assert!(!ExpressionParsingService::new().interpret(&nested).recognized_correctly());

    let definition = MathDefinition::default();
    let mut symbols = SymbolTable::new(&nested);
    assert!(matches!(extract_symbols(&nested, &mut symbols, &definition, None),
                     Err(ParseError::NestingTooDeep { .. })));

    let nested = format!("{}x{} * 2", "(".repeat(100), ")".repeat(100));
    let expression = ExpressionParsingService::new().interpret(&nested);
    assert_eq!(expression.compute(None, &[Value::Integer(21)]), Ok(Value::Integer(42)));
}

#[test]
fn failed_candidates_do_not_leak_into_later_resolutions() {
    assert_eq!(parse("\"a\" + 1 - 1").map(|root| root.as_constant().cloned()),
               Ok(Some(Value::from("a0"))));
    assert_eq!(parse("2 - 1 - 1").map(|root| root.as_constant().cloned()), Ok(Some(Value::Integer(0))));
}

#[test]
fn inconsistent_nodes_are_engine_faults() {
    let mut costs = CostTable::default();
    costs.offer(SupportedValueType::Integer, 1, 0);
    let node = Node::Binary(BinaryNode { op: BinaryOperator::Add,
                                         left: Box::new(Node::constant("a")),
                                         right: Box::new(Node::constant(Value::Integer(1))),
                                         costs });

    let fault = simplify(node);
    assert!(matches!(fault, Err(ParseError::Engine(EngineError::MissingView { .. }))));
    assert!(fault.is_err_and(|error| error.is_fatal()));
}

#[test]
fn consistent_nodes_fold() {
    let mut costs = CostTable::default();
    costs.offer(SupportedValueType::Integer, 1, 0);
    let node = Node::Binary(BinaryNode { op: BinaryOperator::Add,
                                         left: Box::new(Node::constant(Value::Integer(2))),
                                         right: Box::new(Node::constant(Value::Integer(1))),
                                         costs });

    let folded = simplify(node).unwrap();
    assert_eq!(folded.as_constant(), Some(&Value::Integer(3)));
}

#[test]
fn recognized_expressions_carry_no_engine_fault() {
    let service = ExpressionParsingService::new();
    assert!(service.interpret("x + 1").engine_fault().is_none());
    assert!(service.interpret("x +").engine_fault().is_none());
}

#[test]
fn parameter_masks_follow_registration_order() {
    let mut registry = ParameterRegistry::default();
    registry.register("a");
    registry.register("b");
    registry.get_mut("b")
            .unwrap()
            .determine_weakly(SupportableValueType::STRING)
            .unwrap();

    assert_eq!(registry.masks(), [SupportableValueType::ALL, SupportableValueType::STRING]);
}
