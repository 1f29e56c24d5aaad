use crate::{
    ast::BinaryOperator,
    error::EngineError,
    interpreter::{
        evaluator::{
            binary::{arithmetic::apply_arithmetic, bitwise::apply_bitwise, comparison::apply_comparison},
            core::EvalResult,
        },
        value::{core::Value, tolerance::Tolerance},
    },
};

/// Applies a binary operator to operands already converted to one of the
/// operator's signatures.
///
/// The tolerance is only consulted by comparisons.
///
/// # Example
/// ```
/// use mathex::{
///     ast::BinaryOperator,
///     interpreter::{evaluator::binary::core::apply_binary, value::core::Value},
/// };
///
/// let sum = apply_binary(BinaryOperator::Add, Value::from("ab"), Value::from("cd"), None).unwrap();
/// assert_eq!(sum, Value::from("abcd"));
/// ```
pub fn apply_binary(op: BinaryOperator,
                    left: Value,
                    right: Value,
                    tolerance: Option<&Tolerance>)
                    -> EvalResult<Value> {
    match op {
        BinaryOperator::Add
        | BinaryOperator::Subtract
        | BinaryOperator::Multiply
        | BinaryOperator::Divide
        | BinaryOperator::Modulo
        | BinaryOperator::Power
        | BinaryOperator::LeftShift
        | BinaryOperator::RightShift => apply_arithmetic(op, left, right),
        BinaryOperator::And | BinaryOperator::Or | BinaryOperator::Xor => apply_bitwise(op, left, right),
        BinaryOperator::Equals
        | BinaryOperator::NotEquals
        | BinaryOperator::LessThan
        | BinaryOperator::LessThanOrEqual
        | BinaryOperator::GreaterThan
        | BinaryOperator::GreaterThanOrEqual => apply_comparison(op, &left, &right, tolerance).map(Value::Boolean),
    }
}

/// Error for operands matching none of the operator's signatures.
pub(crate) fn operand_mismatch(op: BinaryOperator, left: &Value, right: &Value) -> EngineError {
    EngineError::OperandMismatch { operation: op.name().to_string(),
                                   operands:  format!("{} and {}", left.value_type(), right.value_type()), }
}
